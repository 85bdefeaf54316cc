use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

pub trait Product {
    fn operation(&self) -> String;
}

pub struct ConcreteProduct1;

impl Product for ConcreteProduct1 {
    fn operation(&self) -> String {
        "Result of ConcreteProduct1".to_string()
    }
}

pub struct ConcreteProduct2;

impl Product for ConcreteProduct2 {
    fn operation(&self) -> String {
        "Result of ConcreteProduct2".to_string()
    }
}

pub trait Creator {
    fn factory_method(&self) -> Box<dyn Product>;

    fn some_operation(&self) -> String {
        let product = self.factory_method();
        format!(
            "Creator: The same creator's code has just worked with {}",
            product.operation()
        )
    }
}

pub struct ConcreteCreator1;

impl Creator for ConcreteCreator1 {
    fn factory_method(&self) -> Box<dyn Product> {
        Box::new(ConcreteProduct1)
    }
}

pub struct ConcreteCreator2;

impl Creator for ConcreteCreator2 {
    fn factory_method(&self) -> Box<dyn Product> {
        Box::new(ConcreteProduct2)
    }
}

fn client_code(creator: &dyn Creator, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Client: I'm not aware of the creator's type, but it still works.")?;
    writeln!(out, "{}", creator.some_operation())?;
    Ok(())
}

pub struct FactoryMethodDemo;

impl Demo for FactoryMethodDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::FactoryMethod
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Creators deciding the product"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "App: Launched with the ConcreteCreator1.")?;
        client_code(&ConcreteCreator1, out)?;

        writeln!(out)?;

        writeln!(out, "App: Launched with the ConcreteCreator2.")?;
        client_code(&ConcreteCreator2, out)
    }
}
