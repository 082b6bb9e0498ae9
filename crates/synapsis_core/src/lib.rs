//! # Synapsis Core
//!
//! The stateful analytics engines that run inside the simulation's per-frame
//! callback:
//!
//! - Emergence detection (integrated-information gap, hierarchy clustering,
//!   causal density)
//! - Cosmology comparison (pairwise-distance power spectrum, energy-partition
//!   density parameters vs. Planck 2018)
//! - Particle genealogy (birth/replication forest, lineage queries)
//! - Feedback monitoring and the display hints derived from audio observations
//! - Batch scheduling of display refreshes
//!
//! All computation is synchronous and single-threaded; engines read particle
//! snapshots and never mutate them. Every operation degrades to a well-typed
//! zero/empty/`None` result instead of raising — analytics must never
//! interrupt the simulation tick.
//!
//! ## Example
//!
//! ```
//! use synapsis_core::emergence::EmergenceDetector;
//! use synapsis_data::Particle;
//! use uuid::Uuid;
//!
//! let mut detector = EmergenceDetector::new();
//! let particles: Vec<Particle> = (0..4).map(|_| Particle::new(Uuid::new_v4())).collect();
//! let result = detector.detect(&particles);
//! assert!(result.emergence_score.is_finite());
//! ```

/// Frequency-to-color hints for the render collaborator
pub mod color;
/// Runtime configuration (capacities, thresholds, intervals)
pub mod config;
/// Cosmology comparison against reference constants
pub mod cosmology;
/// Psi-term anomaly detection for the display collaborator
pub mod diagnostics;
/// Emergence quantification and hierarchy detection
pub mod emergence;
/// Audio feedback recording and display-hint derivation
pub mod feedback;
/// Particle genealogy forest and lineage queries
pub mod genealogy;
/// Memory-state inspection of the highest-energy particle
pub mod memory;
/// Tick counters and logging setup
pub mod metrics;
/// Coalesced, rate-limited display refreshes
pub mod scheduler;
/// Genealogy forest as a petgraph DAG with DOT rendering
pub mod tree;
/// Batch distance/energy math shared by the engines
pub mod vectorize;
