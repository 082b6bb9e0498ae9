use synapsis_data::value::{finite_or_zero, safe_normalize};
use synapsis_data::{MemoryStats, MemorySummary, Particle};

/// How many memory levels the summary carries.
const MAX_LEVELS: usize = 10;

/// Summarizes the memory state of the particle with the highest valid
/// energy; `None` when no particle has a finite positive energy.
pub fn inspect(particles: &[Particle]) -> Option<MemorySummary> {
    let top = particles
        .iter()
        .filter(|p| p.valid_energy().is_some())
        .max_by(|a, b| a.ec.total_cmp(&b.ec))?;

    let levels: Vec<f64> = top
        .memory
        .iter()
        .take(MAX_LEVELS)
        .map(|&v| safe_normalize(v, 0.0, 255.0, 0.0, 1.0))
        .collect();

    Some(MemorySummary {
        id: top.id,
        energy: top.ec,
        x12: finite_or_zero(top.x12),
        m12: finite_or_zero(top.m12),
        levels,
        stats: memory_stats(&top.memory),
    })
}

/// Mean/std/min/max over the finite values of a memory vector; all zeros
/// when none are finite.
pub fn memory_stats(memory: &[f64]) -> MemoryStats {
    let valid: Vec<f64> = memory.iter().copied().filter(|v| v.is_finite()).collect();
    if valid.is_empty() {
        return MemoryStats::default();
    }

    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let variance = valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    MemoryStats {
        mean,
        std: variance.sqrt(),
        min: valid.iter().copied().fold(f64::INFINITY, f64::min),
        max: valid.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}
