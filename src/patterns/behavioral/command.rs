use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;
use std::rc::Rc;

pub trait Command {
    fn execute(&self, out: &mut dyn Write) -> Result<()>;
}

pub struct SimpleCommand {
    payload: String,
}

impl SimpleCommand {
    pub fn new(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
        }
    }
}

impl Command for SimpleCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "SimpleCommand: See, I can do simple things like printing ({})",
            self.payload
        )?;
        Ok(())
    }
}

/// Does the real work behind complex commands.
#[derive(Debug, Default)]
pub struct Receiver;

impl Receiver {
    pub fn do_something(&self, a: &str, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Receiver: Working on ({}.)", a)?;
        Ok(())
    }

    pub fn do_something_else(&self, b: &str, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Receiver: Also working on ({}.)", b)?;
        Ok(())
    }
}

pub struct ComplexCommand {
    receiver: Rc<Receiver>,
    a: String,
    b: String,
}

impl ComplexCommand {
    pub fn new(receiver: Rc<Receiver>, a: &str, b: &str) -> Self {
        Self {
            receiver,
            a: a.to_string(),
            b: b.to_string(),
        }
    }
}

impl Command for ComplexCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "ComplexCommand: Complex stuff should be done by a receiver object."
        )?;
        self.receiver.do_something(&self.a, out)?;
        self.receiver.do_something_else(&self.b, out)
    }
}

#[derive(Default)]
pub struct Invoker {
    on_start: Option<Box<dyn Command>>,
    on_finish: Option<Box<dyn Command>>,
}

impl Invoker {
    pub fn set_on_start(&mut self, command: Box<dyn Command>) {
        self.on_start = Some(command);
    }

    pub fn set_on_finish(&mut self, command: Box<dyn Command>) {
        self.on_finish = Some(command);
    }

    pub fn do_something_important(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Invoker: Does anybody want something done before I begin?")?;
        if let Some(command) = &self.on_start {
            command.execute(out)?;
        }

        writeln!(out, "Invoker: ...doing something really important...")?;

        writeln!(out, "Invoker: Does anybody want something done after I finish?")?;
        if let Some(command) = &self.on_finish {
            command.execute(out)?;
        }
        Ok(())
    }
}

pub struct CommandDemo;

impl Demo for CommandDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Command
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Invoker with start and finish hooks"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let mut invoker = Invoker::default();
        invoker.set_on_start(Box::new(SimpleCommand::new("Say Hi!")));
        let receiver = Rc::new(Receiver);
        invoker.set_on_finish(Box::new(ComplexCommand::new(
            receiver,
            "Send email",
            "Save report",
        )));

        invoker.do_something_important(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoker_without_commands_only_narrates() {
        let mut out = Vec::new();
        Invoker::default().do_something_important(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_commands_run_around_the_work() {
        let mut out = Vec::new();
        CommandDemo.run(&DemoSettings::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[1],
            "SimpleCommand: See, I can do simple things like printing (Say Hi!)"
        );
        assert_eq!(lines[2], "Invoker: ...doing something really important...");
        assert_eq!(lines[5], "Receiver: Working on (Send email.)");
        assert_eq!(lines[6], "Receiver: Also working on (Save report.)");
    }
}
