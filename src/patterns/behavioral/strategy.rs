use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::domain::ports::Demo;
use crate::utils::error::{PatternError, Result};
use std::io::Write;

pub trait Strategy {
    fn do_algorithm(&self, data: Vec<String>) -> Vec<String>;
}

pub struct NormalSort;

impl Strategy for NormalSort {
    fn do_algorithm(&self, mut data: Vec<String>) -> Vec<String> {
        data.sort();
        data
    }
}

pub struct ReverseSort;

impl Strategy for ReverseSort {
    fn do_algorithm(&self, mut data: Vec<String>) -> Vec<String> {
        data.sort_by(|a, b| b.cmp(a));
        data
    }
}

#[derive(Default)]
pub struct Context {
    strategy: Option<Box<dyn Strategy>>,
}

impl Context {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.strategy = Some(strategy);
    }

    pub fn do_some_business_logic(&self, out: &mut dyn Write) -> Result<Vec<String>> {
        let strategy = self
            .strategy
            .as_ref()
            .ok_or_else(|| PatternError::MissingPart {
                product: "strategy context".to_string(),
                part: "strategy".to_string(),
            })?;

        writeln!(
            out,
            "Context: Sorting data using the strategy (not sure how it'll do it)"
        )?;
        let data = ["a", "b", "c", "d", "e"].map(String::from).to_vec();
        let result = strategy.do_algorithm(data);
        writeln!(out, "{}", result.join(","))?;
        Ok(result)
    }
}

pub struct StrategyDemo;

impl Demo for StrategyDemo {
    fn pattern(&self) -> PatternKind {
        PatternKind::Strategy
    }

    fn variant(&self) -> Variant {
        Variant::Textbook
    }

    fn title(&self) -> &str {
        "Normal and reverse sorting"
    }

    fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
        let mut context = Context::default();

        writeln!(out, "Client: Strategy is set to normal sorting.")?;
        context.set_strategy(Box::new(NormalSort));
        context.do_some_business_logic(out)?;

        writeln!(out)?;

        writeln!(out, "Client: Strategy is set to reverse sorting.")?;
        context.set_strategy(Box::new(ReverseSort));
        context.do_some_business_logic(out)?;
        Ok(())
    }
}

/// Picking clothes for the weather.
pub mod wardrobe {
    use super::*;

    pub trait WearingStrategy {
        fn clothes(&self) -> &'static str;
        fn accessories(&self) -> &'static str;
    }

    pub struct SunshineWearingStrategy;

    impl WearingStrategy for SunshineWearingStrategy {
        fn clothes(&self) -> &'static str {
            "T-Shirt"
        }

        fn accessories(&self) -> &'static str {
            "sunglasses"
        }
    }

    pub struct RainWearingStrategy;

    impl WearingStrategy for RainWearingStrategy {
        fn clothes(&self) -> &'static str {
            "Coat"
        }

        fn accessories(&self) -> &'static str {
            "umbrella"
        }
    }

    pub struct Myself {
        wearing_strategy: Box<dyn WearingStrategy>,
    }

    impl Default for Myself {
        fn default() -> Self {
            Self {
                wearing_strategy: Box::new(SunshineWearingStrategy),
            }
        }
    }

    impl Myself {
        pub fn change_strategy(&mut self, wearing_strategy: Box<dyn WearingStrategy>) {
            self.wearing_strategy = wearing_strategy;
        }

        pub fn outfit(&self) -> String {
            format!(
                "Today I wore {} and took {}",
                self.wearing_strategy.clothes(),
                self.wearing_strategy.accessories()
            )
        }

        pub fn go_outside(&self, out: &mut dyn Write) -> Result<()> {
            writeln!(out, "{}", self.outfit())?;
            Ok(())
        }
    }

    pub struct WardrobeDemo;

    impl Demo for WardrobeDemo {
        fn pattern(&self) -> PatternKind {
            PatternKind::Strategy
        }

        fn variant(&self) -> Variant {
            Variant::Illustrative
        }

        fn title(&self) -> &str {
            "Dressing for the weather"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            let mut me = Myself::default();
            writeln!(out, "Client: The sun is shining.")?;
            me.go_outside(out)?;

            writeln!(out, "Client: It started raining.")?;
            me.change_strategy(Box::new(RainWearingStrategy));
            me.go_outside(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::wardrobe::*;
    use super::*;

    #[test]
    fn test_strategies_sort_both_ways() {
        let mut sink = Vec::new();
        let mut context = Context::new(Box::new(NormalSort));
        assert_eq!(
            context.do_some_business_logic(&mut sink).unwrap(),
            vec!["a", "b", "c", "d", "e"]
        );

        context.set_strategy(Box::new(ReverseSort));
        assert_eq!(
            context.do_some_business_logic(&mut sink).unwrap(),
            vec!["e", "d", "c", "b", "a"]
        );
    }

    #[test]
    fn test_missing_strategy_is_an_error() {
        let mut sink = Vec::new();
        let context = Context::default();
        assert!(matches!(
            context.do_some_business_logic(&mut sink),
            Err(PatternError::MissingPart { .. })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_wardrobe_switches_outfit() {
        let mut me = Myself::default();
        assert_eq!(me.outfit(), "Today I wore T-Shirt and took sunglasses");
        me.change_strategy(Box::new(RainWearingStrategy));
        assert_eq!(me.outfit(), "Today I wore Coat and took umbrella");
    }
}
