use crate::core::engine::DemoEngine;
use crate::domain::model::{DemoResult, DemoSettings, DemoStatus};
use crate::domain::ports::Demo;
use crate::utils::error::{ErrorSeverity, PatternError, Result};
use crate::utils::monitor::SystemMonitor;
use std::collections::HashMap;
use std::io::Write;

/// Runs a selection of demos in order and collects their results.
pub struct DemoSequence<'c> {
    name: String,
    demos: Vec<&'c dyn Demo>,
    settings: DemoSettings,
    fail_fast: bool,
    monitor: Option<SystemMonitor>,
}

impl<'c> DemoSequence<'c> {
    pub fn new(name: impl Into<String>, settings: DemoSettings) -> Self {
        Self {
            name: name.into(),
            demos: Vec::new(),
            settings,
            fail_fast: false,
            monitor: None,
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = enabled.then(SystemMonitor::new);
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn add_demo(&mut self, demo: &'c dyn Demo) {
        self.demos.push(demo);
    }

    pub fn extend(&mut self, demos: impl IntoIterator<Item = &'c dyn Demo>) {
        self.demos.extend(demos);
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    /// Runs every demo. Failures are recorded and the run continues, unless
    /// fail-fast is set, in which case the first failure ends it.
    pub fn execute(&self, out: &mut dyn Write) -> Result<Vec<DemoResult>> {
        tracing::info!("Running sequence '{}' ({} demos)", self.name, self.demos.len());

        let mut engine = DemoEngine::new(self.settings.clone());
        if let Some(monitor) = &self.monitor {
            monitor.log_stats("Sequence started");
            engine = engine.with_monitor(monitor);
        }

        let mut results = Vec::with_capacity(self.demos.len());
        for demo in &self.demos {
            let result = engine.run(*demo, out)?;

            if let DemoStatus::Failed { error, .. } = &result.status {
                if self.fail_fast {
                    tracing::error!("Stopping sequence '{}' after first failure", self.name);
                    return Err(PatternError::DemoFailed {
                        demo: format!("{} ({})", result.pattern.slug(), result.variant),
                        details: error.clone(),
                    });
                }
                tracing::warn!("Continuing after failed demo {}", result.pattern);
            }
            results.push(result);
        }

        if let Some(monitor) = &self.monitor {
            monitor.log_final_stats();
        }

        Ok(results)
    }

    pub fn get_execution_summary(results: &[DemoResult]) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        let failed: Vec<&DemoResult> = results.iter().filter(|r| !r.is_success()).collect();
        let total_lines: usize = results.iter().map(|r| r.lines_written).sum();
        let total_duration: std::time::Duration = results.iter().map(|r| r.duration).sum();

        summary.insert("total_demos".to_string(), serde_json::Value::from(results.len()));
        summary.insert("failed_demos".to_string(), serde_json::Value::from(failed.len()));
        summary.insert("total_lines".to_string(), serde_json::Value::from(total_lines));
        summary.insert(
            "total_duration_ms".to_string(),
            serde_json::Value::from(total_duration.as_millis() as u64),
        );

        let executed: Vec<serde_json::Value> = results
            .iter()
            .map(|r| serde_json::Value::String(format!("{} ({})", r.pattern.slug(), r.variant)))
            .collect();
        summary.insert("executed_demos".to_string(), serde_json::Value::Array(executed));

        let failures: Vec<serde_json::Value> = failed
            .iter()
            .filter_map(|r| match &r.status {
                DemoStatus::Failed { error, .. } => Some(serde_json::json!({
                    "demo": format!("{} ({})", r.pattern.slug(), r.variant),
                    "error": error,
                })),
                DemoStatus::Completed => None,
            })
            .collect();
        summary.insert("failures".to_string(), serde_json::Value::Array(failures));

        summary
    }

    /// The most severe failure among `results`, if any demo failed.
    pub fn worst_severity(results: &[DemoResult]) -> Option<ErrorSeverity> {
        results
            .iter()
            .filter_map(|r| match r.status {
                DemoStatus::Failed { severity, .. } => Some(severity),
                DemoStatus::Completed => None,
            })
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PatternKind, Variant};

    struct MockDemo {
        pattern: PatternKind,
        error: Option<fn() -> PatternError>,
    }

    impl MockDemo {
        fn ok(pattern: PatternKind) -> Self {
            Self {
                pattern,
                error: None,
            }
        }

        fn failing(pattern: PatternKind, error: fn() -> PatternError) -> Self {
            Self {
                pattern,
                error: Some(error),
            }
        }
    }

    impl Demo for MockDemo {
        fn pattern(&self) -> PatternKind {
            self.pattern
        }

        fn variant(&self) -> Variant {
            Variant::Textbook
        }

        fn title(&self) -> &str {
            "mock"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            writeln!(out, "{} ran", self.pattern)?;
            match self.error {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }
    }

    fn lost() -> PatternError {
        PatternError::ConnectionLost { attempts: 3 }
    }

    #[test]
    fn test_sequence_runs_in_order_and_continues() {
        let a = MockDemo::ok(PatternKind::Adapter);
        let b = MockDemo::failing(PatternKind::Bridge, lost);
        let c = MockDemo::ok(PatternKind::Command);

        let mut sequence = DemoSequence::new("test", DemoSettings::default());
        sequence.extend([&a as &dyn Demo, &b, &c]);

        let mut out = Vec::new();
        let results = sequence.execute(&mut out).unwrap();

        let patterns: Vec<_> = results.iter().map(|r| r.pattern).collect();
        assert_eq!(
            patterns,
            [PatternKind::Adapter, PatternKind::Bridge, PatternKind::Command]
        );
        assert!(!results[1].is_success());
        assert_eq!(
            DemoSequence::worst_severity(&results),
            Some(ErrorSeverity::Medium)
        );
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let a = MockDemo::failing(PatternKind::Adapter, lost);
        let b = MockDemo::ok(PatternKind::Bridge);

        let mut sequence = DemoSequence::new("test", DemoSettings::default()).with_fail_fast(true);
        sequence.add_demo(&a);
        sequence.add_demo(&b);

        let mut out = Vec::new();
        let err = sequence.execute(&mut out).unwrap_err();
        assert!(matches!(err, PatternError::DemoFailed { .. }));
        assert!(!String::from_utf8(out).unwrap().contains("Bridge ran"));
    }

    #[test]
    fn test_execution_summary() {
        let a = MockDemo::ok(PatternKind::Adapter);
        let b = MockDemo::failing(PatternKind::Bridge, lost);

        let mut sequence = DemoSequence::new("test", DemoSettings::default());
        sequence.extend([&a as &dyn Demo, &b]);
        let results = sequence.execute(&mut Vec::new()).unwrap();

        let summary = DemoSequence::get_execution_summary(&results);
        assert_eq!(summary["total_demos"], serde_json::json!(2));
        assert_eq!(summary["failed_demos"], serde_json::json!(1));
        assert_eq!(summary["total_lines"], serde_json::json!(2));
        assert_eq!(
            summary["executed_demos"],
            serde_json::json!(["adapter (textbook)", "bridge (textbook)"])
        );
        assert_eq!(
            summary["failures"][0]["error"],
            serde_json::json!("No connection after 3 attempts")
        );
    }

    #[test]
    fn test_all_successful_has_no_worst_severity() {
        let a = MockDemo::ok(PatternKind::Adapter);
        let mut sequence = DemoSequence::new("test", DemoSettings::default());
        sequence.add_demo(&a);
        let results = sequence.execute(&mut Vec::new()).unwrap();
        assert_eq!(DemoSequence::worst_severity(&results), None);
    }
}
