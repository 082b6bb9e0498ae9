//! Tick counters and logging setup for the analytics layer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counts analytics ticks and emits a structured log line periodically.
pub struct AnalyticsMetrics {
    tick_count: AtomicU64,
    emergent_frames: AtomicU64,
    degraded_frames: AtomicU64,
    start_time: Instant,
}

impl Default for AnalyticsMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            emergent_frames: AtomicU64::new(0),
            degraded_frames: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records one completed analytics tick.
    pub fn record_tick(&self, duration: Duration, particles: usize, emergent: bool) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        if emergent {
            self.emergent_frames.fetch_add(1, Ordering::Relaxed);
        }

        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % 100 == 0 {
            tracing::info!(
                tick = tick,
                particles = particles,
                emergent_frames = self.emergent_frames.load(Ordering::Relaxed),
                duration_us = duration.as_micros() as u64,
                "Analytics tick"
            );
        }
    }

    /// Records an engine operation that degraded to its fallback result.
    pub fn record_degraded(&self) {
        self.degraded_frames.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn emergent_frames(&self) -> u64 {
        self.emergent_frames.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn degraded_frames(&self) -> u64 {
        self.degraded_frames.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ticks_and_emergent_frames() {
        let metrics = AnalyticsMetrics::new();
        metrics.record_tick(Duration::from_micros(120), 50, false);
        metrics.record_tick(Duration::from_micros(130), 50, true);
        assert_eq!(metrics.tick_count(), 2);
        assert_eq!(metrics.emergent_frames(), 1);
    }
}
