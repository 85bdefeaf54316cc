use crate::domain::model::{DemoSettings, PatternKind, Variant};
use crate::utils::error::Result;
use std::io::Write;

/// A runnable pattern demonstration. `run` plays the client: it wires the
/// participants together and narrates into `out`.
pub trait Demo: Send + Sync {
    fn pattern(&self) -> PatternKind;
    fn variant(&self) -> Variant;
    fn title(&self) -> &str;
    fn run(&self, settings: &DemoSettings, out: &mut dyn Write) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn patterns(&self) -> &[String];
    fn variants(&self) -> &[String];
    fn work_delay_ms(&self) -> u64;
    fn proxy_max_retries(&self) -> u32;
    fn seed(&self) -> Option<u64>;
    fn fail_fast(&self) -> bool;
}
