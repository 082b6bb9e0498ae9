//! Facade over the synapsis workspace: analytics engines for a live particle
//! simulation, plus their data types and export/persistence layer.
//!
//! The engines run synchronously inside the host's per-frame callback; the
//! host owns the particle array and the analytics layer only reads snapshots
//! of it. See the member crates for the details:
//! `synapsis_data` (types), `synapsis_core` (engines), `synapsis_io` (export).

pub mod data {
    pub use synapsis_data::*;
}

pub mod color {
    pub use synapsis_core::color::*;
}
pub mod config {
    pub use synapsis_core::config::*;
}
pub mod cosmology {
    pub use synapsis_core::cosmology::*;
}
pub mod diagnostics {
    pub use synapsis_core::diagnostics::*;
}
pub mod emergence {
    pub use synapsis_core::emergence::*;
}
pub mod feedback {
    pub use synapsis_core::feedback::*;
}
pub mod genealogy {
    pub use synapsis_core::genealogy::*;
}
pub mod memory {
    pub use synapsis_core::memory::*;
}
pub mod metrics {
    pub use synapsis_core::metrics::*;
}
pub mod scheduler {
    pub use synapsis_core::scheduler::*;
}
pub mod tree {
    pub use synapsis_core::tree::*;
}
pub mod vectorize {
    pub use synapsis_core::vectorize::*;
}

pub mod error {
    pub use synapsis_io::error::*;
}
pub mod export {
    pub use synapsis_io::export::*;
}
pub mod persistence {
    pub use synapsis_io::persistence::*;
}
pub mod serialization {
    pub use synapsis_io::serialization::*;
}
