//! Process resource sampling around demo runs. Only compiled with real
//! sampling under the `cli` feature; library builds get a no-op.

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// One reading of this process.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy)]
pub struct ResourceSample {
    pub cpu_percent: f32,
    pub resident_mb: u64,
    pub since_start: Duration,
}

#[cfg(feature = "cli")]
struct Tracker {
    system: System,
    samples: usize,
    peak_mb: u64,
}

#[cfg(feature = "cli")]
pub struct SystemMonitor {
    tracker: Mutex<Tracker>,
    pid: Option<Pid>,
    started: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new() -> Self {
        let pid = sysinfo::get_current_pid()
            .map_err(|e| tracing::warn!("Resource sampling unavailable: {}", e))
            .ok();

        Self {
            tracker: Mutex::new(Tracker {
                system: System::new(),
                samples: 0,
                peak_mb: 0,
            }),
            pid,
            started: Instant::now(),
        }
    }

    /// `None` when the process cannot be inspected.
    pub fn sample(&self) -> Option<ResourceSample> {
        let pid = self.pid?;
        let mut tracker = self.tracker.lock().ok()?;

        tracker.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        let process = tracker.system.process(pid)?;
        let sample = ResourceSample {
            cpu_percent: process.cpu_usage(),
            resident_mb: process.memory() / 1024 / 1024,
            since_start: self.started.elapsed(),
        };

        tracker.samples += 1;
        tracker.peak_mb = tracker.peak_mb.max(sample.resident_mb);
        Some(sample)
    }

    pub fn peak_mb(&self) -> u64 {
        self.tracker.lock().map(|t| t.peak_mb).unwrap_or_default()
    }

    pub fn log_stats(&self, label: &str) {
        if let Some(sample) = self.sample() {
            tracing::info!(
                cpu = sample.cpu_percent,
                resident_mb = sample.resident_mb,
                "{} after {:?}",
                label,
                sample.since_start
            );
        }
    }

    pub fn log_final_stats(&self) {
        let samples = self.tracker.lock().map(|t| t.samples).unwrap_or_default();
        tracing::info!(
            "Resources: {} samples over {:?}, peak {}MB",
            samples,
            self.started.elapsed(),
            self.peak_mb()
        );
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new() -> Self {
        Self
    }

    pub fn log_stats(&self, _label: &str) {}

    pub fn log_final_stats(&self) {}
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_peak_never_drops_below_a_sample() {
        let monitor = SystemMonitor::new();
        if let Some(sample) = monitor.sample() {
            assert!(monitor.peak_mb() >= sample.resident_mb);
        }
        monitor.log_final_stats();
    }
}
