use crate::error::Result;
use crate::serialization;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use synapsis_core::config::AnalyticsConfig;
use synapsis_core::cosmology::CosmologyComparator;
use synapsis_core::emergence::EmergenceDetector;
use synapsis_core::feedback::FeedbackMonitor;
use synapsis_core::genealogy::GenealogyTracker;
use synapsis_data::value::finite_or_zero;
use synapsis_data::{
    ComparisonRecord, EmergenceRecord, FeedbackEvent, FeedbackStats, GenealogyExport, Particle,
    ReferenceCosmology, Vec3,
};
use uuid::Uuid;

/// How many records of each engine history the export carries.
const HISTORY_SLICE: usize = 100;

/// One particle in the export document: all scalar fields sanitized, plus
/// the generation the genealogy tracker knows for it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ParticleExport {
    pub id: Uuid,
    pub position: Vec3,
    pub velocity: Vec3,
    pub x12: f64,
    pub m12: f64,
    pub ec: f64,
    pub omega: f64,
    pub theta: f64,
    pub generation: u32,
    pub frequency: f64,
    pub mass: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmergenceExport {
    pub history: Vec<EmergenceRecord>,
    pub threshold: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CosmologyExport {
    pub history: Vec<ComparisonRecord>,
    pub reference: ReferenceCosmology,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeedbackExport {
    pub history: Vec<FeedbackEvent>,
    pub statistics: FeedbackStats,
}

/// The full analytics state as one JSON-serializable document: nested
/// mappings, sequences, and scalars only — no cycles.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StateExport {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub particles: Vec<ParticleExport>,
    pub genealogy: GenealogyExport,
    pub emergence: EmergenceExport,
    pub cosmology: CosmologyExport,
    pub feedback: FeedbackExport,
    pub config: AnalyticsConfig,
}

/// Walks every engine history plus the current particle fields into one
/// export document.
pub fn export_state(
    particles: &[Particle],
    detector: &EmergenceDetector,
    comparator: &CosmologyComparator,
    tracker: &GenealogyTracker,
    feedback: &FeedbackMonitor,
    config: &AnalyticsConfig,
) -> StateExport {
    StateExport {
        version: format!("synapsis-{}", env!("CARGO_PKG_VERSION")),
        timestamp: Utc::now(),
        particles: particles
            .iter()
            .map(|p| export_particle(p, tracker))
            .collect(),
        genealogy: tracker.export(),
        emergence: EmergenceExport {
            history: detector.history().recent(HISTORY_SLICE),
            threshold: detector.threshold(),
        },
        cosmology: CosmologyExport {
            history: comparator.history().recent(HISTORY_SLICE),
            reference: comparator.reference().clone(),
        },
        feedback: FeedbackExport {
            history: feedback.history().recent(HISTORY_SLICE),
            statistics: feedback.statistics(),
        },
        config: config.clone(),
    }
}

fn export_particle(p: &Particle, tracker: &GenealogyTracker) -> ParticleExport {
    ParticleExport {
        id: p.id,
        position: Vec3::new(
            finite_or_zero(p.position.x),
            finite_or_zero(p.position.y),
            finite_or_zero(p.position.z),
        ),
        velocity: Vec3::new(
            finite_or_zero(p.velocity.x),
            finite_or_zero(p.velocity.y),
            finite_or_zero(p.velocity.z),
        ),
        x12: finite_or_zero(p.x12),
        m12: finite_or_zero(p.m12),
        ec: finite_or_zero(p.ec),
        omega: finite_or_zero(p.omega),
        theta: finite_or_zero(p.theta),
        generation: tracker.generation(p.id),
        frequency: finite_or_zero(p.frequency),
        mass: finite_or_zero(p.mass),
    }
}

/// Hex-encoded sha256 over the canonical JSON of the export document.
pub fn checksum(state: &StateExport) -> Result<String> {
    let json = serialization::to_json(state)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Genealogy dump as CSV, one line per record, `NULL` parent for roots.
pub fn genealogy_csv(export: &GenealogyExport) -> String {
    let mut csv = String::from("particle_id,parent_id,generation,birth_time,children_count\n");
    for node in &export.family_tree {
        let parent = node
            .parent
            .map_or_else(|| "NULL".to_string(), |p| p.to_string());
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            node.id,
            parent,
            node.generation,
            node.birth_time.to_rfc3339(),
            node.children.len()
        ));
    }
    csv
}
