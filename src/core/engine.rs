use crate::domain::model::{DemoResult, DemoSettings, DemoStatus};
use crate::domain::ports::Demo;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::io::{self, Write};
use std::time::Instant;

/// Passes bytes through and counts the lines written.
pub struct LineCounter<'a> {
    inner: &'a mut dyn Write,
    lines: usize,
}

impl<'a> LineCounter<'a> {
    pub fn new(inner: &'a mut dyn Write) -> Self {
        Self { inner, lines: 0 }
    }

    pub fn lines(&self) -> usize {
        self.lines
    }
}

impl Write for LineCounter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.lines += buf[..written].iter().filter(|b| **b == b'\n').count();
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Runs single demos: prints the heading, times the run and records the
/// outcome.
pub struct DemoEngine<'m> {
    settings: DemoSettings,
    monitor: Option<&'m SystemMonitor>,
}

impl<'m> DemoEngine<'m> {
    pub fn new(settings: DemoSettings) -> Self {
        Self {
            settings,
            monitor: None,
        }
    }

    pub fn with_monitor(mut self, monitor: &'m SystemMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub fn settings(&self) -> &DemoSettings {
        &self.settings
    }

    /// A failing demo is recorded in the returned result; only a failure to
    /// write the heading is an `Err`.
    pub fn run(&self, demo: &dyn Demo, out: &mut dyn Write) -> Result<DemoResult> {
        let span = tracing::info_span!(
            "demo",
            pattern = demo.pattern().slug(),
            variant = demo.variant().slug()
        );
        let _guard = span.enter();

        writeln!(
            out,
            "=== {} ({}): {} ===",
            demo.pattern(),
            demo.variant(),
            demo.title()
        )?;

        let start = Instant::now();
        let mut counter = LineCounter::new(out);
        let outcome = demo.run(&self.settings, &mut counter);
        let lines_written = counter.lines();
        let duration = start.elapsed();

        if let Some(monitor) = self.monitor {
            monitor.log_stats(&format!("After {} ({})", demo.pattern(), demo.variant()));
        }

        let status = match outcome {
            Ok(()) => {
                tracing::debug!("Demo finished in {:?} ({} lines)", duration, lines_written);
                DemoStatus::Completed
            }
            Err(e) => {
                tracing::error!("Demo failed: {}", e);
                writeln!(out, "!!! {}", e.user_friendly_message())?;
                DemoStatus::Failed {
                    error: e.to_string(),
                    severity: e.severity(),
                }
            }
        };
        writeln!(out)?;

        Ok(DemoResult {
            pattern: demo.pattern(),
            variant: demo.variant(),
            title: demo.title().to_string(),
            duration,
            lines_written,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PatternKind, Variant};
    use crate::utils::error::{ErrorSeverity, PatternError};

    struct Scripted {
        fail: bool,
    }

    impl Demo for Scripted {
        fn pattern(&self) -> PatternKind {
            PatternKind::Command
        }

        fn variant(&self) -> Variant {
            Variant::Textbook
        }

        fn title(&self) -> &str {
            "Scripted"
        }

        fn run(&self, _settings: &DemoSettings, out: &mut dyn Write) -> Result<()> {
            writeln!(out, "one")?;
            writeln!(out, "two")?;
            if self.fail {
                return Err(PatternError::EmptyHistory {
                    what: "test".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_line_counter_counts_newlines() {
        let mut sink = Vec::new();
        let mut counter = LineCounter::new(&mut sink);
        write!(counter, "a\nb\nc").unwrap();
        writeln!(counter).unwrap();
        assert_eq!(counter.lines(), 3);
    }

    #[test]
    fn test_successful_run() {
        let mut out = Vec::new();
        let engine = DemoEngine::new(DemoSettings::default());
        let result = engine.run(&Scripted { fail: false }, &mut out).unwrap();

        assert!(result.is_success());
        assert_eq!(result.lines_written, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("=== Command (textbook): Scripted ===\none\ntwo\n"));
    }

    #[test]
    fn test_failed_run_is_recorded() {
        let mut out = Vec::new();
        let engine = DemoEngine::new(DemoSettings::default());
        let result = engine.run(&Scripted { fail: true }, &mut out).unwrap();

        assert!(!result.is_success());
        assert!(matches!(
            result.status,
            DemoStatus::Failed { severity: ErrorSeverity::Low, .. }
        ));
        assert!(String::from_utf8(out).unwrap().contains("!!! The demo stopped"));
    }
}
