use crate::color;
use crate::config::FeedbackConfig;
use chrono::Utc;
use synapsis_data::value::finite_or_zero;
use synapsis_data::{FeedbackEvent, FeedbackStats, History};

/// Window the statistics are computed over.
const STATS_WINDOW: usize = 100;

/// Records audio observations and derives the display hints the render
/// collaborator applies (this engine itself never touches a particle).
pub struct FeedbackMonitor {
    history: History<FeedbackEvent>,
    strength: f64,
}

impl Default for FeedbackMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackMonitor {
    pub fn new() -> Self {
        Self::with_config(&FeedbackConfig {
            history_capacity: 500,
            strength: 0.5,
        })
    }

    pub fn with_config(config: &FeedbackConfig) -> Self {
        Self {
            history: History::new(config.history_capacity),
            strength: config.strength.clamp(0.0, 1.0),
        }
    }

    /// Records one `(frequency, magnitude)` observation against the current
    /// particle count and returns the derived hints.
    pub fn observe(
        &mut self,
        frequency: f64,
        magnitude: f64,
        particle_count: usize,
    ) -> FeedbackEvent {
        let frequency = finite_or_zero(frequency);
        let magnitude = finite_or_zero(magnitude);

        let event = FeedbackEvent {
            timestamp: Utc::now(),
            frequency,
            magnitude,
            energy_pulse: magnitude * self.strength * 1000.0,
            color_shift: color::frequency_color(frequency, color::MAX_AUDIBLE_HZ),
            size_multiplier: 1.0 + magnitude * self.strength,
            affected_particles: particle_count,
        };
        self.history.push(event.clone());
        event
    }

    /// Means over the 100 most recent events plus the observed event rate;
    /// all zeros when the window is empty or spans no time.
    pub fn statistics(&self) -> FeedbackStats {
        let recent = self.history.recent(STATS_WINDOW);
        if recent.is_empty() {
            return FeedbackStats::default();
        }

        let n = recent.len() as f64;
        let span_secs = (recent[recent.len() - 1].timestamp - recent[0].timestamp)
            .num_milliseconds() as f64
            / 1000.0;

        FeedbackStats {
            avg_frequency: recent.iter().map(|e| e.frequency).sum::<f64>() / n,
            avg_magnitude: recent.iter().map(|e| e.magnitude).sum::<f64>() / n,
            avg_energy_pulse: recent.iter().map(|e| e.energy_pulse).sum::<f64>() / n,
            events_per_second: if span_secs > 0.0 { n / span_secs } else { 0.0 },
        }
    }

    pub fn history(&self) -> &History<FeedbackEvent> {
        &self.history
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_yields_zero_stats() {
        let monitor = FeedbackMonitor::new();
        assert_eq!(monitor.statistics(), FeedbackStats::default());
    }

    #[test]
    fn hints_scale_with_strength() {
        let mut monitor = FeedbackMonitor::with_config(&FeedbackConfig {
            history_capacity: 10,
            strength: 0.5,
        });
        let event = monitor.observe(440.0, 0.8, 32);
        assert_eq!(event.energy_pulse, 400.0);
        assert_eq!(event.size_multiplier, 1.4);
        assert_eq!(event.affected_particles, 32);
        assert_ne!(event.color_shift, 0);
    }

    #[test]
    fn non_finite_observation_is_sanitized() {
        let mut monitor = FeedbackMonitor::new();
        let event = monitor.observe(f64::NAN, f64::INFINITY, 1);
        assert_eq!(event.frequency, 0.0);
        assert_eq!(event.magnitude, 0.0);
        assert_eq!(event.energy_pulse, 0.0);
    }
}
