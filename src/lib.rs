pub mod config;
pub mod core;
pub mod domain;
pub mod patterns;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::CatalogConfig;

pub use core::{Catalog, DemoEngine, DemoSequence};
pub use domain::model::{DemoResult, DemoSettings, DemoStatus, PatternFamily, PatternKind, Variant};
pub use domain::ports::{ConfigProvider, Demo};
pub use utils::error::{PatternError, Result};
