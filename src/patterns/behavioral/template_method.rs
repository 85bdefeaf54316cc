use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

fn base_operation1(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "AbstractClass says: I am doing the bulk of the work")?;
    Ok(())
}

fn base_operation2(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "AbstractClass says: But I let subclasses override some operations")?;
    Ok(())
}

fn base_operation3(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "AbstractClass says: But I am doing the bulk of the work anyway")?;
    Ok(())
}

/// Required steps plus optional hooks; the skeleton lives in
/// [`template_method`].
pub trait Steps {
    fn required_operation1(&self, out: &mut dyn Write) -> Result<()>;
    fn required_operation2(&self, out: &mut dyn Write) -> Result<()>;

    fn hook1(&self, _out: &mut dyn Write) -> Result<()> {
        Ok(())
    }

    fn hook2(&self, _out: &mut dyn Write) -> Result<()> {
        Ok(())
    }
}

pub fn template_method(steps: &dyn Steps, out: &mut dyn Write) -> Result<()> {
    base_operation1(out)?;
    steps.required_operation1(out)?;
    base_operation2(out)?;
    steps.hook1(out)?;
    steps.required_operation2(out)?;
    base_operation3(out)?;
    steps.hook2(out)
}

pub struct ConcreteClass1;

impl Steps for ConcreteClass1 {
    fn required_operation1(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "ConcreteClass1 says: Implemented Operation1")?;
        Ok(())
    }

    fn required_operation2(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "ConcreteClass1 says: Implemented Operation2")?;
        Ok(())
    }
}

pub struct ConcreteClass2;

impl Steps for ConcreteClass2 {
    fn required_operation1(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "ConcreteClass2 says: Implemented Operation1")?;
        Ok(())
    }

    fn required_operation2(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "ConcreteClass2 says: Implemented Operation2")?;
        Ok(())
    }

    fn hook1(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "ConcreteClass2 says: Overridden Hook1")?;
        Ok(())
    }
}

pub struct TemplateMethodDemo;

impl Demo for TemplateMethodDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::TemplateMethod
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "One skeleton, two classes"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let classes: [&dyn Steps; 2] = [&ConcreteClass1, &ConcreteClass2];
        for (i, steps) in classes.into_iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "Same client code can work with different subclasses:")?;
            template_method(steps, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(steps: &dyn Steps) -> Vec<String> {
        let mut out = Vec::new();
        template_method(steps, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_default_hooks_are_silent() {
        let lines = run(&ConcreteClass1);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "ConcreteClass1 says: Implemented Operation1");
        assert_eq!(lines[3], "ConcreteClass1 says: Implemented Operation2");
    }

    #[test]
    fn test_overridden_hook_runs_between_steps() {
        let lines = run(&ConcreteClass2);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "ConcreteClass2 says: Overridden Hook1");
        assert_eq!(lines[4], "ConcreteClass2 says: Implemented Operation2");
    }
}
