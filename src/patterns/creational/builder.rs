use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::{PatternError, Result};
use std::io::Write;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Product {
    parts: Vec<String>,
}

impl Product {
    pub fn add(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn list_parts(&self) -> String {
        format!("Product parts: {}", self.parts.join(", "))
    }
}

pub trait Builder {
    fn build_part_a(&mut self);
    fn build_part_b(&mut self);
    fn build_part_c(&mut self);
}

#[derive(Default)]
pub struct ConcreteBuilder {
    product: Product,
}

impl ConcreteBuilder {
    pub fn reset(&mut self) {
        self.product = Product::default();
    }

    /// Hands over the product built so far and starts a fresh one.
    pub fn product(&mut self) -> Product {
        std::mem::take(&mut self.product)
    }
}

impl Builder for ConcreteBuilder {
    fn build_part_a(&mut self) {
        self.product.add("PartA1");
    }

    fn build_part_b(&mut self) {
        self.product.add("PartB1");
    }

    fn build_part_c(&mut self) {
        self.product.add("PartC1");
    }
}

pub struct Director;

impl Director {
    pub fn build_minimal_viable_product(&self, builder: &mut dyn Builder) {
        builder.build_part_a();
    }

    pub fn build_full_featured_product(&self, builder: &mut dyn Builder) {
        builder.build_part_a();
        builder.build_part_b();
        builder.build_part_c();
    }
}

pub struct BuilderDemo;

impl Demo for BuilderDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Builder
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Director and product parts"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let director = Director;
        let mut builder = ConcreteBuilder::default();

        writeln!(out, "Standard basic product:")?;
        director.build_minimal_viable_product(&mut builder);
        writeln!(out, "{}", builder.product().list_parts())?;

        writeln!(out, "Standard full featured product:")?;
        director.build_full_featured_product(&mut builder);
        writeln!(out, "{}", builder.product().list_parts())?;

        writeln!(out, "Custom product:")?;
        builder.build_part_a();
        builder.build_part_c();
        writeln!(out, "{}", builder.product().list_parts())?;
        Ok(())
    }
}

/// Fluent builder assembling laptops.
pub mod laptop {
    use super::*;
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Laptop {
        pub cpu: String,
        pub ram_gb: u32,
        pub storage: String,
        pub gpu: Option<String>,
        pub os: String,
    }

    impl fmt::Display for Laptop {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "Laptop: {}, {} GB RAM, {}, {}, {}",
                self.cpu,
                self.ram_gb,
                self.storage,
                self.gpu.as_deref().unwrap_or("integrated graphics"),
                self.os
            )
        }
    }

    #[derive(Debug, Clone)]
    pub struct LaptopBuilder {
        cpu: Option<String>,
        ram_gb: u32,
        storage: String,
        gpu: Option<String>,
        os: String,
    }

    impl Default for LaptopBuilder {
        fn default() -> Self {
            Self {
                cpu: None,
                ram_gb: 8,
                storage: "256 GB SSD".to_string(),
                gpu: None,
                os: "Linux".to_string(),
            }
        }
    }

    impl LaptopBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn cpu(mut self, cpu: impl Into<String>) -> Self {
            self.cpu = Some(cpu.into());
            self
        }

        pub fn ram_gb(mut self, ram_gb: u32) -> Self {
            self.ram_gb = ram_gb;
            self
        }

        pub fn storage(mut self, storage: impl Into<String>) -> Self {
            self.storage = storage.into();
            self
        }

        pub fn gpu(mut self, gpu: impl Into<String>) -> Self {
            self.gpu = Some(gpu.into());
            self
        }

        pub fn os(mut self, os: impl Into<String>) -> Self {
            self.os = os.into();
            self
        }

        pub fn build(self) -> Result<Laptop> {
            let cpu = self.cpu.ok_or_else(|| PatternError::MissingPart {
                product: "laptop".to_string(),
                part: "cpu".to_string(),
            })?;

            Ok(Laptop {
                cpu,
                ram_gb: self.ram_gb,
                storage: self.storage,
                gpu: self.gpu,
                os: self.os,
            })
        }
    }

    /// Recipes for commonly ordered configurations.
    pub struct LaptopDirector;

    impl LaptopDirector {
        pub fn office(&self, builder: LaptopBuilder) -> Result<Laptop> {
            builder.cpu("4-core CPU").ram_gb(16).os("Windows").build()
        }

        pub fn gaming(&self, builder: LaptopBuilder) -> Result<Laptop> {
            builder
                .cpu("8-core CPU")
                .ram_gb(32)
                .storage("1 TB NVMe")
                .gpu("discrete GPU")
                .build()
        }
    }

    pub struct LaptopDemo;

    impl Demo for LaptopDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::Builder
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Fluent laptop builder"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let director = LaptopDirector;

            writeln!(out, "Office recipe:")?;
            writeln!(out, "{}", director.office(LaptopBuilder::new())?)?;

            writeln!(out, "Gaming recipe:")?;
            writeln!(out, "{}", director.gaming(LaptopBuilder::new())?)?;

            writeln!(out, "Custom order without a CPU:")?;
            match LaptopBuilder::new().ram_gb(64).build() {
                Ok(laptop) => writeln!(out, "{laptop}")?,
                Err(e) => writeln!(out, "Rejected: {e}")?,
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::laptop::*;
    use super::*;

    #[test]
    fn test_minimal_product_has_one_part() {
        let mut builder = ConcreteBuilder::default();
        Director.build_minimal_viable_product(&mut builder);
        assert_eq!(builder.product().parts(), ["PartA1"]);
    }

    #[test]
    fn test_full_product_has_three_parts_in_order() {
        let mut builder = ConcreteBuilder::default();
        Director.build_full_featured_product(&mut builder);
        let product = builder.product();
        assert_eq!(product.parts(), ["PartA1", "PartB1", "PartC1"]);
        assert_eq!(product.list_parts(), "Product parts: PartA1, PartB1, PartC1");
    }

    #[test]
    fn test_taking_product_resets_builder() {
        let mut builder = ConcreteBuilder::default();
        builder.build_part_b();
        let _ = builder.product();
        assert!(builder.product().parts().is_empty());

        builder.build_part_c();
        builder.reset();
        assert!(builder.product().parts().is_empty());
    }

    #[test]
    fn test_laptop_requires_cpu() {
        let err = LaptopBuilder::new().gpu("any").build().unwrap_err();
        assert!(matches!(err, PatternError::MissingPart { ref part, .. } if part == "cpu"));
    }

    #[test]
    fn test_laptop_recipes() {
        let gaming = LaptopDirector.gaming(LaptopBuilder::new()).unwrap();
        assert_eq!(gaming.ram_gb, 32);
        assert!(gaming.gpu.is_some());

        let office = LaptopDirector.office(LaptopBuilder::new()).unwrap();
        assert_eq!(office.gpu, None);
        assert_eq!(office.os, "Windows");
    }
}
