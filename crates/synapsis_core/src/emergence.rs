use crate::config::EmergenceConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use synapsis_data::{EmergenceRecord, History, Particle};

/// Hierarchy detail returned alongside the score: which clusters the particle
/// set fell into and the depth/entropy derived from them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HierarchyInfo {
    pub num_levels: usize,
    pub hierarchy_depth: f64,
    pub level_entropy: f64,
    pub cluster_sizes: Vec<usize>,
}

/// Full per-frame result; the same fields as the appended record plus the
/// hierarchy detail.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmergenceResult {
    pub phi: f64,
    pub hierarchy: HierarchyInfo,
    pub causal_density: f64,
    pub emergence_score: f64,
    pub is_emergent: bool,
}

/// Detects emergent structure in the particle set each frame.
///
/// The score is a weighted combination of an integrated-information proxy
/// (entropy gap between the whole system and its parts), hierarchical
/// clustering depth over the adaptive state, and mean causal strength
/// normalized by the pair count. All inputs pass through the safe-value
/// rules; a degenerate particle set yields the zero/false result rather than
/// an error.
pub struct EmergenceDetector {
    history: History<EmergenceRecord>,
    threshold: f64,
    max_clusters: usize,
}

impl Default for EmergenceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EmergenceDetector {
    pub fn new() -> Self {
        Self::with_config(&EmergenceConfig {
            history_capacity: 500,
            threshold: 0.5,
            max_clusters: 5,
        })
    }

    pub fn with_config(config: &EmergenceConfig) -> Self {
        Self {
            history: History::new(config.history_capacity),
            threshold: config.threshold,
            max_clusters: config.max_clusters.max(1),
        }
    }

    /// Runs the full detection pass, appends one record and returns the
    /// result with hierarchy detail.
    pub fn detect(&mut self, particles: &[Particle]) -> EmergenceResult {
        let phi = self.integrated_information(particles);
        let hierarchy = self.detect_hierarchy(particles);
        let causal_density = causal_density(particles);

        let emergence_score = 0.4 * phi + 0.3 * hierarchy.hierarchy_depth + 0.3 * causal_density;
        let is_emergent = emergence_score > self.threshold;

        self.history.push(EmergenceRecord {
            timestamp: Utc::now(),
            phi,
            hierarchy_depth: hierarchy.hierarchy_depth,
            causal_density,
            emergence_score,
            is_emergent,
        });

        EmergenceResult {
            phi,
            hierarchy,
            causal_density,
            emergence_score,
            is_emergent,
        }
    }

    /// Integrated information Φ: entropy of the whole feature matrix minus
    /// the mean entropy of each particle's own features. Zero below two
    /// particles.
    fn integrated_information(&self, particles: &[Particle]) -> f64 {
        if particles.len() < 2 {
            return 0.0;
        }

        let states: Vec<[f64; 4]> = particles.iter().map(|p| p.adaptive_features()).collect();

        let flat: Vec<f64> = states.iter().flatten().copied().collect();
        let system_entropy = (variance(&flat) + 1.0).ln();

        let part_entropy = states
            .iter()
            .map(|s| (variance(s) + 1.0).ln())
            .sum::<f64>()
            / states.len() as f64;

        (system_entropy - part_entropy).max(0.0)
    }

    /// Partitions particles into at most `max_clusters` clusters by 1-D
    /// nearest-center assignment over `x12` and derives depth/entropy from
    /// the non-empty cluster sizes.
    fn detect_hierarchy(&self, particles: &[Particle]) -> HierarchyInfo {
        let cluster_sizes = self.cluster_by_adaptive_state(particles);
        let num_levels = cluster_sizes.len();
        HierarchyInfo {
            num_levels,
            hierarchy_depth: ((num_levels + 1) as f64).log2(),
            level_entropy: distribution_entropy(&cluster_sizes),
            cluster_sizes,
        }
    }

    /// Non-empty cluster sizes. Centers are evenly spaced between the min
    /// and max observed `x12`; a degenerate distribution (max not greater
    /// than min, which covers the 0- and 1-particle cases) collapses to a
    /// single cluster directly.
    fn cluster_by_adaptive_state(&self, particles: &[Particle]) -> Vec<usize> {
        if particles.is_empty() {
            return Vec::new();
        }

        let values: Vec<f64> = particles
            .iter()
            .map(|p| synapsis_data::value::finite_or_zero(p.x12))
            .collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if self.max_clusters < 2 || max <= min {
            return vec![values.len()];
        }

        let centers: Vec<f64> = (0..self.max_clusters)
            .map(|i| min + (i as f64 / (self.max_clusters - 1) as f64) * (max - min))
            .collect();

        let mut counts = vec![0usize; self.max_clusters];
        for &v in &values {
            let mut nearest = 0;
            let mut best = f64::INFINITY;
            for (i, &c) in centers.iter().enumerate() {
                let d = (v - c).abs();
                if d < best {
                    best = d;
                    nearest = i;
                }
            }
            counts[nearest] += 1;
        }

        counts.retain(|&c| c > 0);
        counts
    }

    pub fn history(&self) -> &History<EmergenceRecord> {
        &self.history
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Mean causal strength (omega) divided by the maximum possible connection
/// count `n(n-1)/2`, floored at 1. Zero below two particles.
fn causal_density(particles: &[Particle]) -> f64 {
    let n = particles.len();
    if n < 2 {
        return 0.0;
    }
    let avg_omega = particles
        .iter()
        .map(|p| synapsis_data::value::finite_or_zero(p.omega))
        .sum::<f64>()
        / n as f64;
    let max_connections = (n * (n - 1) / 2).max(1);
    avg_omega / max_connections as f64
}

/// Population variance; 0 for an empty slice.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Shannon entropy (base 2) of a size distribution normalized by its total;
/// 0 when the total is 0.
fn distribution_entropy(sizes: &[usize]) -> f64 {
    let total: usize = sizes.iter().sum();
    if total == 0 {
        return 0.0;
    }
    sizes
        .iter()
        .filter(|&&s| s > 0)
        .map(|&s| {
            let p = s as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}
