use crate::config::SchedulerConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};

type UpdateFn = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Coalesces display-refresh callbacks keyed by name and rate-limits their
/// execution to one flush per `update_interval`.
///
/// The host calls [`BatchScheduler::frame`] once per animation frame; the
/// scheduler flushes at most every `update_interval` (default 50 ms, ~20
/// flushes/second regardless of tick rate). Scheduling under an existing key
/// overwrites the pending callback (last write wins). A callback error is
/// logged and never aborts the rest of the batch. `stop` is cooperative: it
/// stops re-arming and discards pending work without interrupting an
/// in-flight callback.
pub struct BatchScheduler {
    update_interval: Duration,
    pending: HashMap<String, UpdateFn>,
    running: bool,
    last_flush: Option<Instant>,
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

impl BatchScheduler {
    pub fn new(update_interval: Duration) -> Self {
        Self {
            update_interval,
            pending: HashMap::new(),
            running: false,
            last_flush: None,
        }
    }

    pub fn with_config(config: &SchedulerConfig) -> Self {
        Self::new(Duration::from_millis(config.update_interval_ms))
    }

    /// Queues (or replaces) the refresh callback under `key` and marks the
    /// processing loop running.
    pub fn schedule(
        &mut self,
        key: impl Into<String>,
        update: impl FnMut() -> anyhow::Result<()> + 'static,
    ) {
        self.pending.insert(key.into(), Box::new(update));
        self.running = true;
    }

    /// One animation-frame step. Flushes every pending callback once the
    /// update interval has elapsed since the last flush (the first flush is
    /// immediate). Returns whether the host should keep re-arming the next
    /// frame.
    pub fn frame(&mut self, now: Instant) -> bool {
        if !self.running && self.pending.is_empty() {
            return false;
        }

        let due = self
            .last_flush
            .map_or(true, |last| now.duration_since(last) >= self.update_interval);

        if due && !self.pending.is_empty() {
            for (key, mut update) in self.pending.drain() {
                if let Err(error) = update() {
                    tracing::warn!(key = %key, %error, "display update failed");
                }
            }
            self.last_flush = Some(now);
        }

        self.running || !self.pending.is_empty()
    }

    /// Halts scheduling and discards pending work.
    pub fn stop(&mut self) {
        self.running = false;
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }
}
