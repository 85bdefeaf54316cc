pub mod catalog;
pub mod engine;
pub mod sequence;

pub use crate::domain::model::{DemoResult, DemoSettings};
pub use crate::domain::ports::{ConfigProvider, Demo};
pub use crate::utils::error::Result;
pub use catalog::Catalog;
pub use engine::DemoEngine;
pub use sequence::DemoSequence;
