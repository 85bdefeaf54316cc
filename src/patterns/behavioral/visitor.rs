//! Visitor: double dispatch. Components accept a visitor and call the
//! visit method matching their concrete type.

use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

pub trait Component {
    fn accept(&self, visitor: &dyn Visitor, out: &mut dyn Write) -> Result<()>;
}

pub trait Visitor {
    fn visit_component_a(&self, element: &ConcreteComponentA, out: &mut dyn Write) -> Result<()>;
    fn visit_component_b(&self, element: &ConcreteComponentB, out: &mut dyn Write) -> Result<()>;
}

pub struct ConcreteComponentA;

impl ConcreteComponentA {
    pub fn exclusive_method_of_component_a(&self) -> &'static str {
        "A"
    }
}

impl Component for ConcreteComponentA {
    fn accept(&self, visitor: &dyn Visitor, out: &mut dyn Write) -> Result<()> {
        visitor.visit_component_a(self, out)
    }
}

pub struct ConcreteComponentB;

impl ConcreteComponentB {
    pub fn special_method_of_component_b(&self) -> &'static str {
        "B"
    }
}

impl Component for ConcreteComponentB {
    fn accept(&self, visitor: &dyn Visitor, out: &mut dyn Write) -> Result<()> {
        visitor.visit_component_b(self, out)
    }
}

pub struct ConcreteVisitor1;

impl Visitor for ConcreteVisitor1 {
    fn visit_component_a(&self, element: &ConcreteComponentA, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{} + ConcreteVisitor1", element.exclusive_method_of_component_a())?;
        Ok(())
    }

    fn visit_component_b(&self, element: &ConcreteComponentB, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{} + ConcreteVisitor1", element.special_method_of_component_b())?;
        Ok(())
    }
}

pub struct ConcreteVisitor2;

impl Visitor for ConcreteVisitor2 {
    fn visit_component_a(&self, element: &ConcreteComponentA, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{} + ConcreteVisitor2", element.exclusive_method_of_component_a())?;
        Ok(())
    }

    fn visit_component_b(&self, element: &ConcreteComponentB, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{} + ConcreteVisitor2", element.special_method_of_component_b())?;
        Ok(())
    }
}

pub fn visit_all(
    components: &[Box<dyn Component>],
    visitor: &dyn Visitor,
    out: &mut dyn Write,
) -> Result<()> {
    for component in components {
        component.accept(visitor, out)?;
    }
    Ok(())
}

pub struct VisitorDemo;

impl Demo for VisitorDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Visitor
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Two visitors over two components"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let components: Vec<Box<dyn Component>> =
            vec![Box::new(ConcreteComponentA), Box::new(ConcreteComponentB)];

        writeln!(
            out,
            "The client code works with all visitors via the base Visitor interface:"
        )?;
        visit_all(&components, &ConcreteVisitor1, out)?;

        writeln!(out)?;

        writeln!(
            out,
            "It allows the same client code to work with different types of visitors:"
        )?;
        visit_all(&components, &ConcreteVisitor2, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Counting {
        seen: RefCell<Vec<&'static str>>,
    }

    impl Visitor for Counting {
        fn visit_component_a(&self, _: &ConcreteComponentA, _: &mut dyn Write) -> Result<()> {
            self.seen.borrow_mut().push("a");
            Ok(())
        }

        fn visit_component_b(&self, _: &ConcreteComponentB, _: &mut dyn Write) -> Result<()> {
            self.seen.borrow_mut().push("b");
            Ok(())
        }
    }

    #[test]
    fn test_double_dispatch_reaches_matching_method() {
        let components: Vec<Box<dyn Component>> = vec![
            Box::new(ConcreteComponentB),
            Box::new(ConcreteComponentA),
            Box::new(ConcreteComponentB),
        ];
        let visitor = Counting::default();
        visit_all(&components, &visitor, &mut Vec::new()).unwrap();
        assert_eq!(*visitor.seen.borrow(), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_demo_output() {
        let mut out = Vec::new();
        VisitorDemo.run(&DemoSettings::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("A + ConcreteVisitor1\nB + ConcreteVisitor1\n"));
        assert!(text.contains("A + ConcreteVisitor2\nB + ConcreteVisitor2\n"));
    }
}
