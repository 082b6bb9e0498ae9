use crate::error::{ExportError, Result};
use crate::export::StateExport;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

const CURRENT_SAVE_VERSION: u32 = 1;

/// Envelope used for saving; holds a reference to avoid cloning the export.
#[derive(Serialize)]
struct SaveStateRef<'a> {
    version: u32,
    state: &'a StateExport,
}

/// Envelope used for loading; owns the export.
#[derive(Deserialize)]
struct SaveState {
    #[allow(dead_code)]
    version: u32,
    state: StateExport,
}

/// Version-only probe so a newer save is rejected before the full parse.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Saves the export document with versioning metadata. A `.gz` path gets
/// gzip compression, anything else pretty-printed JSON.
pub fn save_state(state: &StateExport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let envelope = SaveStateRef {
        version: CURRENT_SAVE_VERSION,
        state,
    };

    if is_gz(path) {
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        let json = serde_json::to_string(&envelope)?;
        encoder.write_all(json.as_bytes())?;
        encoder
            .finish()
            .map_err(|e| ExportError::compression(e.to_string()))?;
    } else {
        let json = serde_json::to_string_pretty(&envelope)?;
        std::fs::write(path, json)?;
    }
    Ok(())
}

/// Loads an export document, handling gzip transparently and rejecting save
/// files written by a newer version.
pub fn load_state(path: impl AsRef<Path>) -> Result<StateExport> {
    let path = path.as_ref();
    let content = read_maybe_gz(path)?;

    let probe: VersionProbe = serde_json::from_str(&content)?;
    if probe.version > CURRENT_SAVE_VERSION {
        return Err(ExportError::UnsupportedVersion {
            found: probe.version,
            supported: CURRENT_SAVE_VERSION,
        });
    }

    let envelope: SaveState = serde_json::from_str(&content)?;
    Ok(envelope.state)
}

fn is_gz(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Reads a file as gzip when possible, falling back to plain text.
fn read_maybe_gz(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut decoded = String::new();
    if decoder.read_to_string(&mut decoded).is_ok() {
        return Ok(decoded);
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_state;
    use synapsis_core::config::AnalyticsConfig;
    use synapsis_core::cosmology::CosmologyComparator;
    use synapsis_core::emergence::EmergenceDetector;
    use synapsis_core::feedback::FeedbackMonitor;
    use synapsis_core::genealogy::GenealogyTracker;

    fn empty_export() -> StateExport {
        export_state(
            &[],
            &EmergenceDetector::new(),
            &CosmologyComparator::new(),
            &GenealogyTracker::new(),
            &FeedbackMonitor::new(),
            &AnalyticsConfig::default(),
        )
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("synapsis_{}_{}", std::process::id(), name))
    }

    #[test]
    fn save_load_round_trip() {
        let path = temp_path("roundtrip.json");
        let state = empty_export();
        save_state(&state, &path).unwrap();
        let loaded = load_state(&path).unwrap();
        assert_eq!(loaded.version, state.version);
        assert_eq!(loaded.timestamp, state.timestamp);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn gzip_round_trip() {
        let path = temp_path("roundtrip.json.gz");
        let state = empty_export();
        save_state(&state, &path).unwrap();
        let loaded = load_state(&path).unwrap();
        assert_eq!(loaded.version, state.version);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn future_version_is_rejected() {
        let path = temp_path("future.json");
        std::fs::write(&path, r#"{"version": 99, "state": null}"#).unwrap();
        let result = load_state(&path);
        assert!(matches!(
            result,
            Err(ExportError::UnsupportedVersion { found: 99, .. })
        ));
        let _ = std::fs::remove_file(&path);
    }
}
