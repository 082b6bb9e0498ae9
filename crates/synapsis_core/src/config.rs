use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmergenceConfig {
    pub history_capacity: usize,
    pub threshold: f64,
    pub max_clusters: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CosmologyConfig {
    pub history_capacity: usize,
    pub spectrum_bins: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenealogyConfig {
    pub event_capacity: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeedbackConfig {
    pub history_capacity: usize,
    /// How strongly audio observations scale the derived display hints (0-1).
    pub strength: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub update_interval_ms: u64,
}

/// All override points the analytics layer exposes to its host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub emergence: EmergenceConfig,
    pub cosmology: CosmologyConfig,
    pub genealogy: GenealogyConfig,
    pub feedback: FeedbackConfig,
    pub scheduler: SchedulerConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            emergence: EmergenceConfig {
                history_capacity: 500,
                threshold: 0.5,
                max_clusters: 5,
            },
            cosmology: CosmologyConfig {
                history_capacity: 1000,
                spectrum_bins: 20,
            },
            genealogy: GenealogyConfig {
                event_capacity: 1000,
            },
            feedback: FeedbackConfig {
                history_capacity: 500,
                strength: 0.5,
            },
            scheduler: SchedulerConfig {
                update_interval_ms: 50,
            },
        }
    }
}

impl AnalyticsConfig {
    /// Loads from a TOML file; a missing or unreadable file yields defaults,
    /// and the default file is written back so the host can edit it.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
            tracing::warn!(path = %path.display(), "config file unreadable, using defaults");
        }
        let default = Self::default();
        if let Ok(serialized) = toml::to_string(&default) {
            let _ = fs::write(path, serialized);
        }
        default
    }
}
