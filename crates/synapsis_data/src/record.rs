use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One emergence-detector frame, appended per invocation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmergenceRecord {
    pub timestamp: DateTime<Utc>,
    pub phi: f64,
    pub hierarchy_depth: f64,
    pub causal_density: f64,
    pub emergence_score: f64,
    pub is_emergent: bool,
}

/// Reference cosmological model the comparator scores against
/// (Planck 2018 parameters).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReferenceCosmology {
    /// Hubble constant (km/s/Mpc)
    pub h0: f64,
    /// Matter density parameter
    pub omega_m: f64,
    /// Dark energy density parameter
    pub omega_lambda: f64,
    /// Amplitude of matter fluctuations
    pub sigma8: f64,
    /// Spectral index
    pub ns: f64,
    /// Age of universe (Gyr)
    pub age_gyr: f64,
    /// CMB temperature (K)
    pub t_cmb: f64,
}

impl Default for ReferenceCosmology {
    fn default() -> Self {
        Self {
            h0: 67.4,
            omega_m: 0.315,
            omega_lambda: 0.685,
            sigma8: 0.811,
            ns: 0.965,
            age_gyr: 13.8,
            t_cmb: 2.725,
        }
    }
}

/// Histogram of pairwise particle distances reinterpreted as
/// wavenumber/power pairs. Empty when fewer than 10 particles were seen.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PowerSpectrum {
    /// Wavenumbers (1 / bin center)
    pub k: Vec<f64>,
    /// Power per bin (pair count)
    pub p: Vec<u64>,
}

impl PowerSpectrum {
    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }

    pub fn total_power(&self) -> u64 {
        self.p.iter().sum()
    }
}

/// Density parameters derived from the particle set this tick.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DerivedCosmology {
    pub omega_m: f64,
    pub omega_lambda: f64,
    pub power_spectrum: PowerSpectrum,
}

/// Absolute deviations from the reference density parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CosmologyDeviation {
    pub omega_m: f64,
    pub omega_lambda: f64,
}

/// One comparator frame: derived parameters, reference, deviations and the
/// toy goodness-of-fit score `1 - mean(deviations)`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ComparisonRecord {
    pub timestamp: DateTime<Utc>,
    pub derived: DerivedCosmology,
    pub reference: ReferenceCosmology,
    pub deviations: CosmologyDeviation,
    pub agreement: f64,
}

/// One replication event, stamped with the child's generation at that moment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReplicationEvent {
    pub timestamp: DateTime<Utc>,
    pub parent_id: Uuid,
    pub child_id: Uuid,
    pub parent_energy: f64,
    pub child_energy: f64,
    pub generation: u32,
}

/// Genealogy forest entry, keyed by particle id in the tracker.
///
/// `generation(child) = generation(parent) + 1`; a root record
/// (`parent = None`) has generation 0.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenealogyRecord {
    pub parent: Option<Uuid>,
    pub children: Vec<Uuid>,
    pub generation: u32,
    pub birth_time: DateTime<Utc>,
}

/// Aggregate genealogy statistics.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenealogyStats {
    pub total_particles: usize,
    pub max_generation: u32,
    pub avg_children: f64,
    pub total_replications: usize,
    pub recent_replications: Vec<ReplicationEvent>,
}

/// One flattened genealogy record in an export document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FamilyNode {
    pub id: Uuid,
    pub parent: Option<Uuid>,
    pub children: Vec<Uuid>,
    pub generation: u32,
    pub birth_time: DateTime<Utc>,
}

/// The full forest plus all events plus statistics, as one serializable,
/// acyclic structure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenealogyExport {
    pub family_tree: Vec<FamilyNode>,
    pub replication_events: Vec<ReplicationEvent>,
    pub statistics: GenealogyStats,
}

/// One recorded audio observation and the display hints derived from it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedbackEvent {
    pub timestamp: DateTime<Utc>,
    pub frequency: f64,
    pub magnitude: f64,
    pub energy_pulse: f64,
    /// Packed 0xRRGGBB hint for the render collaborator.
    pub color_shift: u32,
    pub size_multiplier: f64,
    pub affected_particles: usize,
}

/// Windowed feedback statistics (over the 100 most recent events).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FeedbackStats {
    pub avg_frequency: f64,
    pub avg_magnitude: f64,
    pub avg_energy_pulse: f64,
    pub events_per_second: f64,
}

/// Statistics over one particle's memory vector (finite values only).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MemoryStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Snapshot of the highest-energy particle's memory state.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemorySummary {
    pub id: Uuid,
    pub energy: f64,
    pub x12: f64,
    pub m12: f64,
    /// First 10 memory values normalized from [0, 255] into [0, 1].
    pub levels: Vec<f64>,
    pub stats: MemoryStats,
}
