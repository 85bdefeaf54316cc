use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

pub trait Implementation {
    fn operation_implementation(&self) -> String;
}

pub struct ConcreteImplementationA;

impl Implementation for ConcreteImplementationA {
    fn operation_implementation(&self) -> String {
        "ConcreteImplementationA: The result in platform A.".to_string()
    }
}

pub struct ConcreteImplementationB;

impl Implementation for ConcreteImplementationB {
    fn operation_implementation(&self) -> String {
        "ConcreteImplementationB: The result in platform B.".to_string()
    }
}

pub trait Abstraction {
    fn operation(&self) -> String;
}

pub struct BasicAbstraction {
    implementation: Box<dyn Implementation>,
}

impl BasicAbstraction {
    pub fn new(implementation: Box<dyn Implementation>) -> Self {
        Self { implementation }
    }
}

impl Abstraction for BasicAbstraction {
    fn operation(&self) -> String {
        format!(
            "Abstraction: Base operation with:\n{}",
            self.implementation.operation_implementation()
        )
    }
}

pub struct ExtendedAbstraction {
    implementation: Box<dyn Implementation>,
}

impl ExtendedAbstraction {
    pub fn new(implementation: Box<dyn Implementation>) -> Self {
        Self { implementation }
    }
}

impl Abstraction for ExtendedAbstraction {
    fn operation(&self) -> String {
        format!(
            "ExtendedAbstraction: Extended operation with:\n{}",
            self.implementation.operation_implementation()
        )
    }
}

pub struct BridgeDemo;

impl Demo for BridgeDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Bridge
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Abstractions over two platforms"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let abstractions: [Box<dyn Abstraction>; 2] = [
            Box::new(BasicAbstraction::new(Box::new(ConcreteImplementationA))),
            Box::new(ExtendedAbstraction::new(Box::new(ConcreteImplementationB))),
        ];
        for (i, abstraction) in abstractions.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", abstraction.operation())?;
        }
        Ok(())
    }
}
