use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::{PatternError, Result};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdInfo {
    pub id_number: u32,
}

/// `id_info` is reference data: a shallow copy shares it with the
/// original, a deep copy owns a fresh one.
#[derive(Debug)]
pub struct Person {
    pub age: u32,
    pub birth_date: NaiveDate,
    pub name: String,
    pub id_info: Rc<RefCell<IdInfo>>,
}

impl Person {
    pub fn new(age: u32, birth_date: NaiveDate, name: impl Into<String>, id_number: u32) -> Self {
        Self {
            age,
            birth_date,
            name: name.into(),
            id_info: Rc::new(RefCell::new(IdInfo { id_number })),
        }
    }

    pub fn shallow_copy(&self) -> Self {
        Self {
            age: self.age,
            birth_date: self.birth_date,
            name: self.name.clone(),
            id_info: Rc::clone(&self.id_info),
        }
    }

    pub fn deep_copy(&self) -> Self {
        Self {
            id_info: Rc::new(RefCell::new(*self.id_info.borrow())),
            ..self.shallow_copy()
        }
    }

    pub fn id_number(&self) -> u32 {
        self.id_info.borrow().id_number
    }

    pub fn display(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "      Name: {}, Age: {}, BirthDate: {}",
            self.name,
            self.age,
            self.birth_date.format("%m/%d/%y")
        )?;
        writeln!(out, "      ID#: {}", self.id_number())?;
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| PatternError::InvalidArgument {
        argument: "birth_date".to_string(),
        reason: format!("{y}-{m}-{d} is not a calendar date"),
    })
}

pub struct PrototypeDemo;

impl Demo for PrototypeDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Prototype
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Shallow and deep copies"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let mut p1 = Person::new(42, date(1977, 1, 1)?, "Jack", 313);
        let p2 = p1.shallow_copy();
        let p3 = p1.deep_copy();

        writeln!(out, "Original values of p1, p2, p3:")?;
        writeln!(out, "   p1 instance values:")?;
        p1.display(out)?;
        writeln!(out, "   p2 instance values:")?;
        p2.display(out)?;
        writeln!(out, "   p3 instance values:")?;
        p3.display(out)?;

        p1.age = 32;
        p1.birth_date = date(1900, 1, 1)?;
        p1.name = "Frank".to_string();
        p1.id_info.borrow_mut().id_number = 7878;

        writeln!(out)?;
        writeln!(out, "Values of p1, p2 and p3 after changes to p1:")?;
        writeln!(out, "   p1 instance values:")?;
        p1.display(out)?;
        writeln!(out, "   p2 instance values (reference values have changed):")?;
        p2.display(out)?;
        writeln!(out, "   p3 instance values (everything was kept the same):")?;
        p3.display(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jack() -> Person {
        Person::new(42, NaiveDate::from_ymd_opt(1977, 1, 1).unwrap(), "Jack", 313)
    }

    #[test]
    fn test_shallow_copy_shares_id_info() {
        let original = jack();
        let copy = original.shallow_copy();
        original.id_info.borrow_mut().id_number = 7878;
        assert_eq!(copy.id_number(), 7878);
        assert!(Rc::ptr_eq(&original.id_info, &copy.id_info));
    }

    #[test]
    fn test_deep_copy_keeps_its_own_id_info() {
        let original = jack();
        let copy = original.deep_copy();
        original.id_info.borrow_mut().id_number = 7878;
        assert_eq!(copy.id_number(), 313);
        assert!(!Rc::ptr_eq(&original.id_info, &copy.id_info));
    }

    #[test]
    fn test_value_fields_are_independent() {
        let mut original = jack();
        let copy = original.shallow_copy();
        original.name = "Frank".to_string();
        original.age = 32;
        assert_eq!(copy.name, "Jack");
        assert_eq!(copy.age, 42);
    }

    #[test]
    fn test_display_formats_date() {
        let mut out = Vec::new();
        jack().display(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Name: Jack, Age: 42, BirthDate: 01/01/77"));
        assert!(text.contains("ID#: 313"));
    }
}
