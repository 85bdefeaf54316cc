use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use std::io::Write;

pub trait Chair {
    fn describe(&self) -> &'static str;
}

pub trait ArmChair {
    fn describe(&self) -> &'static str;
}

pub trait Couch {
    fn describe(&self) -> &'static str;
}

/// Creates a matching family of furniture.
pub trait FurnitureFactory {
    fn style(&self) -> &'static str;
    fn create_chair(&self) -> Box<dyn Chair>;
    fn create_arm_chair(&self) -> Box<dyn ArmChair>;
    fn create_couch(&self) -> Box<dyn Couch>;
}

macro_rules! furniture {
    ($($ty:ident: $trait:ident => $label:literal),* $(,)?) => {
        $(
            pub struct $ty;

            impl $trait for $ty {
                fn describe(&self) -> &'static str {
                    $label
                }
            }
        )*
    };
}

furniture! {
    VictorianChair: Chair => "Victorian Chair",
    VictorianArmChair: ArmChair => "Victorian Armchair",
    VictorianCouch: Couch => "Victorian Couch",
    ArtDecoChair: Chair => "ArtDeco Chair",
    ArtDecoArmChair: ArmChair => "ArtDeco Armchair",
    ArtDecoCouch: Couch => "ArtDeco Couch",
    ModernChair: Chair => "Modern Chair",
    ModernArmChair: ArmChair => "Modern Armchair",
    ModernCouch: Couch => "Modern Couch",
}

pub struct VictorianFactory;

impl FurnitureFactory for VictorianFactory {
    fn style(&self) -> &'static str {
        "Victorian"
    }

    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(VictorianChair)
    }

    fn create_arm_chair(&self) -> Box<dyn ArmChair> {
        Box::new(VictorianArmChair)
    }

    fn create_couch(&self) -> Box<dyn Couch> {
        Box::new(VictorianCouch)
    }
}

pub struct ArtDecoFactory;

impl FurnitureFactory for ArtDecoFactory {
    fn style(&self) -> &'static str {
        "ArtDeco"
    }

    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(ArtDecoChair)
    }

    fn create_arm_chair(&self) -> Box<dyn ArmChair> {
        Box::new(ArtDecoArmChair)
    }

    fn create_couch(&self) -> Box<dyn Couch> {
        Box::new(ArtDecoCouch)
    }
}

pub struct ModernFactory;

impl FurnitureFactory for ModernFactory {
    fn style(&self) -> &'static str {
        "Modern"
    }

    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(ModernChair)
    }

    fn create_arm_chair(&self) -> Box<dyn ArmChair> {
        Box::new(ModernArmChair)
    }

    fn create_couch(&self) -> Box<dyn Couch> {
        Box::new(ModernCouch)
    }
}

/// Client code only sees the factory and product traits.
pub fn furnish(factory: &dyn FurnitureFactory) -> [&'static str; 3] {
    [
        factory.create_chair().describe(),
        factory.create_arm_chair().describe(),
        factory.create_couch().describe(),
    ]
}

pub struct AbstractFactoryDemo;

impl Demo for AbstractFactoryDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::AbstractFactory
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Furniture families"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let factories: [&dyn FurnitureFactory; 3] =
            [&VictorianFactory, &ArtDecoFactory, &ModernFactory];
        for factory in factories {
            writeln!(
                out,
                "Client: Testing client code with the {} factory type...",
                factory.style()
            )?;
            for piece in furnish(factory) {
                writeln!(out, "{piece}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Toy factories producing bears and cats in a shared material.
pub mod toys {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Bear {
        pub name: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Cat {
        pub name: String,
    }

    pub trait ToyFactory {
        fn material(&self) -> &'static str;

        fn bear(&self) -> Bear {
            Bear {
                name: format!("{} Bear", self.material()),
            }
        }

        fn cat(&self) -> Cat {
            Cat {
                name: format!("{} Cat", self.material()),
            }
        }
    }

    pub struct TeddyFactory;

    impl ToyFactory for TeddyFactory {
        fn material(&self) -> &'static str {
            "Teddy"
        }
    }

    pub struct WoodenFactory;

    impl ToyFactory for WoodenFactory {
        fn material(&self) -> &'static str {
            "Wooden"
        }
    }

    pub struct ToyFactoryDemo;

    impl Demo for ToyFactoryDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::AbstractFactory
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Teddy and wooden toys"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let factories: [&dyn ToyFactory; 2] = [&TeddyFactory, &WoodenFactory];
            for factory in factories {
                writeln!(out, "{}", factory.bear().name)?;
                writeln!(out, "{}", factory.cat().name)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::toys::*;
    use super::*;

    #[test]
    fn test_factories_produce_matching_families() {
        assert_eq!(
            furnish(&VictorianFactory),
            ["Victorian Chair", "Victorian Armchair", "Victorian Couch"]
        );
        for factory in [&ArtDecoFactory as &dyn FurnitureFactory, &ModernFactory] {
            assert!(furnish(factory)
                .iter()
                .all(|piece| piece.starts_with(factory.style())));
        }
    }

    #[test]
    fn test_toy_names() {
        assert_eq!(TeddyFactory.bear().name, "Teddy Bear");
        assert_eq!(WoodenFactory.cat().name, "Wooden Cat");
    }
}
