use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "design-patterns")]
#[command(about = "Runs the design pattern demos and narrates them on stdout")]
pub struct CliConfig {
    /// Patterns to run, e.g. `proxy,chain-of-responsibility` (default: all)
    #[arg(long, value_delimiter = ',')]
    pub patterns: Vec<String>,

    /// Variants to run: textbook, illustrative (default: both)
    #[arg(long, value_delimiter = ',')]
    pub variants: Vec<String>,

    #[arg(long, help = "List the available demos and exit")]
    pub list: bool,

    #[arg(long, default_value = "10", help = "Simulated work per step in milliseconds")]
    pub work_delay_ms: u64,

    #[arg(long, default_value = "3")]
    pub proxy_max_retries: u32,

    #[arg(long, help = "Seed for the random parts of the narrative")]
    pub seed: Option<u64>,

    #[arg(long, help = "Stop at the first failing demo")]
    pub fail_fast: bool,

    #[arg(long, help = "Log CPU and memory usage after each demo")]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn variants(&self) -> &[String] {
        &self.variants
    }

    fn work_delay_ms(&self) -> u64 {
        self.work_delay_ms
    }

    fn proxy_max_retries(&self) -> u32 {
        self.proxy_max_retries
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn fail_fast(&self) -> bool {
        self.fail_fast
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_range(
            "work_delay_ms",
            self.work_delay_ms,
            0,
            crate::config::toml_config::MAX_WORK_DELAY_MS,
        )?;
        validate_positive_number("proxy_max_retries", self.proxy_max_retries as usize, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["design-patterns"]);
        assert!(config.patterns().is_empty());
        assert_eq!(config.work_delay_ms(), 10);
        assert_eq!(config.proxy_max_retries(), 3);
        assert_eq!(config.seed(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_comma_separated_lists() {
        let config = CliConfig::parse_from([
            "design-patterns",
            "--patterns",
            "proxy,memento",
            "--variants",
            "illustrative",
            "--seed",
            "7",
            "--fail-fast",
        ]);
        assert_eq!(config.patterns(), ["proxy", "memento"]);
        assert_eq!(config.variants(), ["illustrative"]);
        assert_eq!(config.seed(), Some(7));
        assert!(config.fail_fast());
    }

    #[test]
    fn test_validation_rejects_out_of_range_values() {
        let slow = CliConfig::parse_from(["design-patterns", "--work-delay-ms", "60000"]);
        assert!(slow.validate().is_err());

        let no_retries = CliConfig::parse_from(["design-patterns", "--proxy-max-retries", "0"]);
        assert!(no_retries.validate().is_err());
    }
}
