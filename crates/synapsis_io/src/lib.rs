//! # Synapsis IO
//!
//! Export and persistence for the analytics layer: the full-state export
//! document, JSON serialization helpers, versioned save/load with
//! transparent gzip, sha256 checksums, and the genealogy CSV dump.
//!
//! Everything here is a serializer over structures the engines own; the
//! download/transport mechanics belong to the host.

/// Structured error type for all IO operations
pub mod error;
/// Full-state export document and genealogy CSV
pub mod export;
/// Versioned save/load with transparent gzip
pub mod persistence;
/// JSON helpers with structured errors
pub mod serialization;

pub use error::{ExportError, Result};
pub use export::StateExport;
