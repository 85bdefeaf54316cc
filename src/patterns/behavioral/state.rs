use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

/// A state handles requests and may ask the context to move on by returning
/// the next state.
pub trait State {
    fn name(&self) -> &'static str;
    fn handle1(&self, out: &mut dyn Write) -> Result<Option<Box<dyn State>>>;
    fn handle2(&self, out: &mut dyn Write) -> Result<Option<Box<dyn State>>>;
}

pub struct Context {
    state: Box<dyn State>,
}

impl Context {
    pub fn new(state: Box<dyn State>, out: &mut dyn Write) -> Result<Self> {
        writeln!(out, "Context: Transition to {}.", state.name())?;
        Ok(Self { state })
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    pub fn transition_to(&mut self, state: Box<dyn State>, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Context: Transition to {}.", state.name())?;
        self.state = state;
        Ok(())
    }

    pub fn request1(&mut self, out: &mut dyn Write) -> Result<()> {
        if let Some(next) = self.state.handle1(out)? {
            self.transition_to(next, out)?;
        }
        Ok(())
    }

    pub fn request2(&mut self, out: &mut dyn Write) -> Result<()> {
        if let Some(next) = self.state.handle2(out)? {
            self.transition_to(next, out)?;
        }
        Ok(())
    }
}

pub struct ConcreteStateA;

impl State for ConcreteStateA {
    fn name(&self) -> &'static str {
        "ConcreteStateA"
    }

    fn handle1(&self, out: &mut dyn Write) -> Result<Option<Box<dyn State>>> {
        writeln!(out, "ConcreteStateA handles request1.")?;
        writeln!(out, "ConcreteStateA wants to change the state of the context.")?;
        Ok(Some(Box::new(ConcreteStateB)))
    }

    fn handle2(&self, out: &mut dyn Write) -> Result<Option<Box<dyn State>>> {
        writeln!(out, "ConcreteStateA handles request2.")?;
        Ok(None)
    }
}

pub struct ConcreteStateB;

impl State for ConcreteStateB {
    fn name(&self) -> &'static str {
        "ConcreteStateB"
    }

    fn handle1(&self, out: &mut dyn Write) -> Result<Option<Box<dyn State>>> {
        writeln!(out, "ConcreteStateB handles request1.")?;
        Ok(None)
    }

    fn handle2(&self, out: &mut dyn Write) -> Result<Option<Box<dyn State>>> {
        writeln!(out, "ConcreteStateB handles request2.")?;
        writeln!(out, "ConcreteStateB wants to change the state of the context.")?;
        Ok(Some(Box::new(ConcreteStateA)))
    }
}

pub struct StateDemo;

impl Demo for StateDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::State
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Two-state context"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let mut context = Context::new(Box::new(ConcreteStateA), out)?;
        context.request1(out)?;
        context.request2(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut sink = Vec::new();
        let mut context = Context::new(Box::new(ConcreteStateA), &mut sink).unwrap();
        assert_eq!(context.state_name(), "ConcreteStateA");

        context.request2(&mut sink).unwrap();
        assert_eq!(context.state_name(), "ConcreteStateA");

        context.request1(&mut sink).unwrap();
        assert_eq!(context.state_name(), "ConcreteStateB");

        context.request1(&mut sink).unwrap();
        assert_eq!(context.state_name(), "ConcreteStateB");

        context.request2(&mut sink).unwrap();
        assert_eq!(context.state_name(), "ConcreteStateA");
    }

    #[test]
    fn test_demo_announces_each_transition() {
        let mut out = Vec::new();
        StateDemo.run(&DemoSettings::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Context: Transition to").count(), 3);
    }
}
