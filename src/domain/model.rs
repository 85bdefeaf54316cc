use crate::utils::error::{ErrorSeverity, PatternError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternFamily {
    Creational,
    Structural,
    Behavioral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    AbstractFactory,
    Adapter,
    Bridge,
    Builder,
    ChainOfResponsibility,
    Command,
    Composite,
    Decorator,
    Facade,
    FactoryMethod,
    Flyweight,
    Iterator,
    Mediator,
    Memento,
    Observer,
    Prototype,
    Proxy,
    Singleton,
    State,
    Strategy,
    TemplateMethod,
    Visitor,
}

impl PatternKind {
    pub const ALL: [PatternKind; 22] = [
        PatternKind::AbstractFactory,
        PatternKind::Adapter,
        PatternKind::Bridge,
        PatternKind::Builder,
        PatternKind::ChainOfResponsibility,
        PatternKind::Command,
        PatternKind::Composite,
        PatternKind::Decorator,
        PatternKind::Facade,
        PatternKind::FactoryMethod,
        PatternKind::Flyweight,
        PatternKind::Iterator,
        PatternKind::Mediator,
        PatternKind::Memento,
        PatternKind::Observer,
        PatternKind::Prototype,
        PatternKind::Proxy,
        PatternKind::Singleton,
        PatternKind::State,
        PatternKind::Strategy,
        PatternKind::TemplateMethod,
        PatternKind::Visitor,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            PatternKind::AbstractFactory => "abstract-factory",
            PatternKind::Adapter => "adapter",
            PatternKind::Bridge => "bridge",
            PatternKind::Builder => "builder",
            PatternKind::ChainOfResponsibility => "chain-of-responsibility",
            PatternKind::Command => "command",
            PatternKind::Composite => "composite",
            PatternKind::Decorator => "decorator",
            PatternKind::Facade => "facade",
            PatternKind::FactoryMethod => "factory-method",
            PatternKind::Flyweight => "flyweight",
            PatternKind::Iterator => "iterator",
            PatternKind::Mediator => "mediator",
            PatternKind::Memento => "memento",
            PatternKind::Observer => "observer",
            PatternKind::Prototype => "prototype",
            PatternKind::Proxy => "proxy",
            PatternKind::Singleton => "singleton",
            PatternKind::State => "state",
            PatternKind::Strategy => "strategy",
            PatternKind::TemplateMethod => "template-method",
            PatternKind::Visitor => "visitor",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::AbstractFactory => "Abstract Factory",
            PatternKind::Adapter => "Adapter",
            PatternKind::Bridge => "Bridge",
            PatternKind::Builder => "Builder",
            PatternKind::ChainOfResponsibility => "Chain of Responsibility",
            PatternKind::Command => "Command",
            PatternKind::Composite => "Composite",
            PatternKind::Decorator => "Decorator",
            PatternKind::Facade => "Facade",
            PatternKind::FactoryMethod => "Factory Method",
            PatternKind::Flyweight => "Flyweight",
            PatternKind::Iterator => "Iterator",
            PatternKind::Mediator => "Mediator",
            PatternKind::Memento => "Memento",
            PatternKind::Observer => "Observer",
            PatternKind::Prototype => "Prototype",
            PatternKind::Proxy => "Proxy",
            PatternKind::Singleton => "Singleton",
            PatternKind::State => "State",
            PatternKind::Strategy => "Strategy",
            PatternKind::TemplateMethod => "Template Method",
            PatternKind::Visitor => "Visitor",
        }
    }

    pub fn family(&self) -> PatternFamily {
        match self {
            PatternKind::AbstractFactory
            | PatternKind::Builder
            | PatternKind::FactoryMethod
            | PatternKind::Prototype
            | PatternKind::Singleton => PatternFamily::Creational,
            PatternKind::Adapter
            | PatternKind::Bridge
            | PatternKind::Composite
            | PatternKind::Decorator
            | PatternKind::Facade
            | PatternKind::Flyweight
            | PatternKind::Proxy => PatternFamily::Structural,
            _ => PatternFamily::Behavioral,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for PatternKind {
    type Err = PatternError;

    /// Accepts slugs and display names: "chain-of-responsibility",
    /// "Chain of Responsibility" and "chain_of_responsibility" all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        PatternKind::ALL
            .iter()
            .copied()
            .find(|kind| normalize(kind.slug()) == wanted)
            .ok_or_else(|| PatternError::UnknownPattern {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// The direct textbook structure of the pattern.
    Textbook,
    /// A small themed example (furniture, sockets, laptops, ...).
    Illustrative,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Textbook, Variant::Illustrative];

    pub fn slug(&self) -> &'static str {
        match self {
            Variant::Textbook => "textbook",
            Variant::Illustrative => "illustrative",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Variant {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "textbook" | "classic" | "v1" => Ok(Variant::Textbook),
            "illustrative" | "variant" | "v2" => Ok(Variant::Illustrative),
            _ => Err(PatternError::UnknownVariant {
                name: s.to_string(),
            }),
        }
    }
}

/// Runtime knobs handed to every demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    /// Simulated processing time per step (Memento, Observer).
    pub work_delay: Duration,
    pub proxy_max_retries: u32,
    /// Seed for the random parts of the narrative; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            work_delay: Duration::ZERO,
            proxy_max_retries: 3,
            seed: None,
        }
    }
}

impl DemoSettings {
    pub fn from_provider<C: crate::domain::ports::ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            work_delay: Duration::from_millis(config.work_delay_ms()),
            proxy_max_retries: config.proxy_max_retries(),
            seed: config.seed(),
        }
    }

    pub fn rng(&self) -> rand::rngs::StdRng {
        use rand::SeedableRng;
        match self.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        }
    }

    pub fn simulate_work(&self) {
        if !self.work_delay.is_zero() {
            std::thread::sleep(self.work_delay);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DemoStatus {
    Completed,
    Failed {
        error: String,
        severity: ErrorSeverity,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoResult {
    pub pattern: PatternKind,
    pub variant: Variant,
    pub title: String,
    pub duration: Duration,
    pub lines_written: usize,
    pub status: DemoStatus,
}

impl DemoResult {
    pub fn is_success(&self) -> bool {
        self.status == DemoStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_kind_parses_slugs_and_names() {
        assert_eq!(
            "chain-of-responsibility".parse::<PatternKind>().unwrap(),
            PatternKind::ChainOfResponsibility
        );
        assert_eq!(
            "Template Method".parse::<PatternKind>().unwrap(),
            PatternKind::TemplateMethod
        );
        assert_eq!("FLYWEIGHT".parse::<PatternKind>().unwrap(), PatternKind::Flyweight);
        assert!("monad".parse::<PatternKind>().is_err());
    }

    #[test]
    fn test_every_slug_round_trips() {
        for kind in PatternKind::ALL {
            assert_eq!(kind.slug().parse::<PatternKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_families() {
        assert_eq!(PatternKind::Singleton.family(), PatternFamily::Creational);
        assert_eq!(PatternKind::Proxy.family(), PatternFamily::Structural);
        assert_eq!(PatternKind::Visitor.family(), PatternFamily::Behavioral);
        let creational = PatternKind::ALL
            .iter()
            .filter(|k| k.family() == PatternFamily::Creational)
            .count();
        assert_eq!(creational, 5);
    }

    #[test]
    fn test_variant_aliases() {
        assert_eq!("classic".parse::<Variant>().unwrap(), Variant::Textbook);
        assert_eq!("V2".parse::<Variant>().unwrap(), Variant::Illustrative);
        assert!("v3".parse::<Variant>().is_err());
    }

    #[test]
    fn test_seeded_settings_are_reproducible() {
        use rand::Rng;
        let settings = DemoSettings {
            seed: Some(7),
            ..DemoSettings::default()
        };
        let a: u32 = settings.rng().gen();
        let b: u32 = settings.rng().gen();
        assert_eq!(a, b);
    }
}
