//! Mediator: components talk only to the mediator, which decides who
//! reacts to what. Components keep a weak back-reference so the
//! mediator stays the single owner.

use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    A,
    B,
    C,
    D,
}

pub trait Mediator {
    fn notify(&self, event: Event, out: &mut dyn Write) -> Result<()>;
}

fn notify(mediator: &Weak<dyn Mediator>, event: Event, out: &mut dyn Write) -> Result<()> {
    match mediator.upgrade() {
        Some(mediator) => mediator.notify(event, out),
        None => {
            tracing::debug!("Event {:?} raised without a mediator", event);
            Ok(())
        }
    }
}

pub struct Component1 {
    mediator: Weak<dyn Mediator>,
}

impl Component1 {
    pub fn do_a(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Component 1 does A.")?;
        notify(&self.mediator, Event::A, out)
    }

    pub fn do_b(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Component 1 does B.")?;
        notify(&self.mediator, Event::B, out)
    }
}

pub struct Component2 {
    mediator: Weak<dyn Mediator>,
}

impl Component2 {
    pub fn do_c(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Component 2 does C.")?;
        notify(&self.mediator, Event::C, out)
    }

    pub fn do_d(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Component 2 does D.")?;
        notify(&self.mediator, Event::D, out)
    }
}

pub struct ConcreteMediator {
    component1: Component1,
    component2: Component2,
}

impl ConcreteMediator {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|me: &Weak<ConcreteMediator>| {
            let mediator: Weak<dyn Mediator> = me.clone();
            ConcreteMediator {
                component1: Component1 {
                    mediator: mediator.clone(),
                },
                component2: Component2 { mediator },
            }
        })
    }

    pub fn component1(&self) -> &Component1 {
        &self.component1
    }

    pub fn component2(&self) -> &Component2 {
        &self.component2
    }
}

impl Mediator for ConcreteMediator {
    fn notify(&self, event: Event, out: &mut dyn Write) -> Result<()> {
        match event {
            Event::A => {
                writeln!(out, "Mediator reacts on A and triggers following operations:")?;
                self.component2.do_c(out)
            }
            Event::D => {
                writeln!(out, "Mediator reacts on D and triggers following operations:")?;
                self.component1.do_b(out)?;
                self.component2.do_c(out)
            }
            Event::B | Event::C => Ok(()),
        }
    }
}

pub struct MediatorDemo;

impl Demo for MediatorDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Mediator
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Two components and a mediator"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let mediator = ConcreteMediator::new();

        writeln!(out, "Client triggers operation A.")?;
        mediator.component1().do_a(out)?;

        writeln!(out)?;

        writeln!(out, "Client triggers operation D.")?;
        mediator.component2().do_d(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> Vec<String> {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_event_a_triggers_c() {
        let mediator = ConcreteMediator::new();
        let lines = lines(|out| mediator.component1().do_a(out));
        assert_eq!(
            lines,
            vec![
                "Component 1 does A.",
                "Mediator reacts on A and triggers following operations:",
                "Component 2 does C.",
            ]
        );
    }

    #[test]
    fn test_event_d_triggers_b_then_c() {
        let mediator = ConcreteMediator::new();
        let lines = lines(|out| mediator.component2().do_d(out));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "Component 1 does B.");
        assert_eq!(lines[3], "Component 2 does C.");
    }

    #[test]
    fn test_quiet_events() {
        let mediator = ConcreteMediator::new();
        assert_eq!(lines(|out| mediator.component1().do_b(out)).len(), 1);
        assert_eq!(lines(|out| mediator.component2().do_c(out)).len(), 1);
    }
}
