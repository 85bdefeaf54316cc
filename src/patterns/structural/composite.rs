use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::{PatternError, Result};
use std::io::Write;

/// A node of the tree. Only composites accept children; the provided
/// `add`/`remove` reject the call.
pub trait Component {
    fn operation(&self) -> String;

    fn is_composite(&self) -> bool {
        false
    }

    fn add(&mut self, _component: Box<dyn Component>) -> Result<()> {
        Err(self.unsupported("add"))
    }

    fn remove(&mut self, _index: usize) -> Result<Box<dyn Component>> {
        Err(self.unsupported("remove"))
    }

    fn unsupported(&self, operation: &str) -> PatternError {
        PatternError::UnsupportedOperation {
            component: self.operation(),
            operation: operation.to_string(),
        }
    }
}

pub struct Leaf;

impl Component for Leaf {
    fn operation(&self) -> String {
        "Leaf".to_string()
    }
}

#[derive(Default)]
pub struct Composite {
    children: Vec<Box<dyn Component>>,
}

impl Composite {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Component for Composite {
    fn operation(&self) -> String {
        let inner: Vec<String> = self.children.iter().map(|c| c.operation()).collect();
        format!("Branch({})", inner.join("+"))
    }

    fn is_composite(&self) -> bool {
        true
    }

    fn add(&mut self, component: Box<dyn Component>) -> Result<()> {
        self.children.push(component);
        Ok(())
    }

    fn remove(&mut self, index: usize) -> Result<Box<dyn Component>> {
        if index >= self.children.len() {
            return Err(PatternError::InvalidArgument {
                argument: "index".to_string(),
                reason: format!("composite has {} children", self.children.len()),
            });
        }
        Ok(self.children.remove(index))
    }
}

/// Grafts `other` into `component` when it can hold children.
pub fn client_code2(
    component: &mut dyn Component,
    other: Box<dyn Component>,
    out: &mut dyn Write,
) -> Result<()> {
    if component.is_composite() {
        component.add(other)?;
    }
    writeln!(out, "RESULT: {}", component.operation())?;
    Ok(())
}

pub struct CompositeDemo;

impl Demo for CompositeDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Composite
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Leaves and branches"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let leaf = Leaf;
        writeln!(out, "Client: I get a simple component:")?;
        writeln!(out, "RESULT: {}", leaf.operation())?;
        writeln!(out)?;

        let mut tree = Composite::default();
        let mut branch1 = Composite::default();
        branch1.add(Box::new(Leaf))?;
        branch1.add(Box::new(Leaf))?;
        let mut branch2 = Composite::default();
        branch2.add(Box::new(Leaf))?;
        tree.add(Box::new(branch1))?;
        tree.add(Box::new(branch2))?;

        writeln!(out, "Client: Now I've got a composite tree:")?;
        writeln!(out, "RESULT: {}", tree.operation())?;
        writeln!(out)?;

        writeln!(
            out,
            "Client: I don't need to check the components classes even when managing the tree:"
        )?;
        client_code2(&mut tree, Box::new(leaf), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_rendering() {
        let mut branch = Composite::default();
        branch.add(Box::new(Leaf)).unwrap();
        branch.add(Box::new(Leaf)).unwrap();
        assert_eq!(branch.operation(), "Branch(Leaf+Leaf)");

        let mut tree = Composite::default();
        tree.add(Box::new(branch)).unwrap();
        tree.add(Box::new(Leaf)).unwrap();
        assert_eq!(tree.operation(), "Branch(Branch(Leaf+Leaf)+Leaf)");

        let removed = tree.remove(0).unwrap();
        assert!(removed.is_composite());
        assert_eq!(tree.operation(), "Branch(Leaf)");
        assert!(tree.remove(5).is_err());
    }

    #[test]
    fn test_leaf_rejects_children() {
        let mut leaf = Leaf;
        assert!(matches!(
            leaf.add(Box::new(Leaf)),
            Err(PatternError::UnsupportedOperation { ref operation, .. }) if operation == "add"
        ));
        assert!(leaf.remove(0).is_err());
    }

    #[test]
    fn test_client_code2_skips_leaves() {
        let mut out = Vec::new();
        client_code2(&mut Leaf, Box::new(Leaf), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "RESULT: Leaf\n");
    }

    #[test]
    fn test_demo_final_tree() {
        let mut out = Vec::new();
        CompositeDemo.run(&DemoSettings::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("RESULT: Branch(Branch(Leaf+Leaf)+Branch(Leaf)+Leaf)\n"));
    }
}
