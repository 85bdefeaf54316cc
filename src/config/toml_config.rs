use crate::core::ConfigProvider;
use crate::utils::error::{PatternError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_range,
    validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
pub const MAX_WORK_DELAY_MS: u64 = 10_000;

/// A catalogue file: which demos to run and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: Option<CatalogSection>,
    #[serde(default)]
    pub selection: SelectionSection,
    #[serde(default)]
    pub settings: SettingsSection,
    #[serde(default)]
    pub run: RunSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionSection {
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSection {
    #[serde(default = "default_work_delay_ms")]
    pub work_delay_ms: u64,
    #[serde(default = "default_proxy_max_retries")]
    pub proxy_max_retries: u32,
    pub seed: Option<u64>,
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            work_delay_ms: default_work_delay_ms(),
            proxy_max_retries: default_proxy_max_retries(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSection {
    #[serde(default)]
    pub fail_fast: bool,
    #[serde(default)]
    pub monitor: bool,
    pub log_level: Option<String>,
}

fn default_work_delay_ms() -> u64 {
    10
}

fn default_proxy_max_retries() -> u32 {
    3
}

impl CatalogConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| PatternError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PatternError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn name(&self) -> &str {
        self.catalog.as_ref().map(|c| c.name.as_str()).unwrap_or("unnamed")
    }

    pub fn description(&self) -> Option<&str> {
        self.catalog.as_ref().and_then(|c| c.description.as_deref())
    }

    pub fn version(&self) -> Option<&str> {
        self.catalog.as_ref().and_then(|c| c.version.as_deref())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.run.monitor
    }

    pub fn log_level(&self) -> &str {
        self.run.log_level.as_deref().unwrap_or("info")
    }

    pub fn validate_config(&self) -> Result<()> {
        let catalog = validate_required_field("catalog", &self.catalog)?;
        validate_non_empty_string("catalog.name", &catalog.name)?;

        validate_range(
            "settings.work_delay_ms",
            self.settings.work_delay_ms,
            0,
            MAX_WORK_DELAY_MS,
        )?;
        validate_positive_number(
            "settings.proxy_max_retries",
            self.settings.proxy_max_retries as usize,
            1,
        )?;

        if let Some(level) = &self.run.log_level {
            validate_one_of("run.log_level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}

impl ConfigProvider for CatalogConfig {
    fn patterns(&self) -> &[String] {
        &self.selection.patterns
    }

    fn variants(&self) -> &[String] {
        &self.selection.variants
    }

    fn work_delay_ms(&self) -> u64 {
        self.settings.work_delay_ms
    }

    fn proxy_max_retries(&self) -> u32 {
        self.settings.proxy_max_retries
    }

    fn seed(&self) -> Option<u64> {
        self.settings.seed
    }

    fn fail_fast(&self) -> bool {
        self.run.fail_fast
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_catalog() {
        let toml_content = r#"
[catalog]
name = "structural-tour"
description = "Structural patterns only"
version = "1.0.0"

[selection]
patterns = ["adapter", "proxy"]
variants = ["illustrative"]

[settings]
work_delay_ms = 0
proxy_max_retries = 5
seed = 42

[run]
fail_fast = true
monitor = false
log_level = "debug"
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.name(), "structural-tour");
        assert_eq!(config.version(), Some("1.0.0"));
        assert_eq!(config.patterns(), ["adapter", "proxy"]);
        assert_eq!(config.proxy_max_retries(), 5);
        assert_eq!(config.seed(), Some(42));
        assert!(config.fail_fast());
        assert_eq!(config.log_level(), "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_default_when_missing() {
        let config = CatalogConfig::from_toml_str("[catalog]\nname = \"all\"\n").unwrap();
        assert!(config.patterns().is_empty());
        assert_eq!(config.work_delay_ms(), 10);
        assert_eq!(config.proxy_max_retries(), 3);
        assert!(!config.monitoring_enabled());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CATALOG_TEST_PATTERN", "memento");

        let toml_content = r#"
[catalog]
name = "env"

[selection]
patterns = ["${CATALOG_TEST_PATTERN}", "${CATALOG_TEST_UNSET}"]
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.patterns()[0], "memento");
        assert_eq!(config.patterns()[1], "${CATALOG_TEST_UNSET}");

        std::env::remove_var("CATALOG_TEST_PATTERN");
    }

    #[test]
    fn test_config_validation() {
        let missing_catalog = CatalogConfig::from_toml_str("[run]\nfail_fast = true\n").unwrap();
        assert!(matches!(
            missing_catalog.validate(),
            Err(PatternError::MissingConfigError { .. })
        ));

        let zero_retries = CatalogConfig::from_toml_str(
            "[catalog]\nname = \"x\"\n[settings]\nproxy_max_retries = 0\n",
        )
        .unwrap();
        assert!(zero_retries.validate().is_err());

        let loud = CatalogConfig::from_toml_str("[catalog]\nname = \"x\"\n[run]\nlog_level = \"loud\"\n")
            .unwrap();
        assert!(loud.validate().is_err());

        let blank = CatalogConfig::from_toml_str("[catalog]\nname = \"  \"\n").unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = CatalogConfig::from_toml_str("[catalog\nname = 1").unwrap_err();
        assert!(matches!(err, PatternError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\nname = \"file-test\"\n")
            .unwrap();

        let config = CatalogConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.name(), "file-test");
    }
}
