use crate::config::CosmologyConfig;
use crate::vectorize;
use chrono::Utc;
use synapsis_data::value::finite_or_zero;
use synapsis_data::{
    ComparisonRecord, CosmologyDeviation, DerivedCosmology, History, Particle, PowerSpectrum,
    ReferenceCosmology,
};

/// Minimum particle count for a meaningful pairwise-distance spectrum.
const MIN_SPECTRUM_PARTICLES: usize = 10;

/// Compares coarse statistics of the particle distribution against a fixed
/// reference cosmological model.
///
/// `compare` fails closed: when the particle set is empty or a derived ratio
/// is non-finite it returns `None` and appends nothing, so callers can tell
/// "no update this tick" apart from a genuine zero-agreement frame.
pub struct CosmologyComparator {
    reference: ReferenceCosmology,
    history: History<ComparisonRecord>,
    spectrum_bins: usize,
}

impl Default for CosmologyComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl CosmologyComparator {
    pub fn new() -> Self {
        Self::with_config(&CosmologyConfig {
            history_capacity: 1000,
            spectrum_bins: 20,
        })
    }

    pub fn with_config(config: &CosmologyConfig) -> Self {
        Self {
            reference: ReferenceCosmology::default(),
            history: History::new(config.history_capacity),
            spectrum_bins: config.spectrum_bins.max(1),
        }
    }

    /// Histogram of pairwise distances as wavenumber/power pairs.
    ///
    /// Requires at least 10 particles; non-finite and non-positive distances
    /// are discarded; bins are equal-width and half-open `[bin_min, bin_max)`
    /// between the min and max observed distance, and only bins with a
    /// positive center are emitted.
    pub fn power_spectrum(&self, particles: &[Particle], num_bins: usize) -> PowerSpectrum {
        if particles.len() < MIN_SPECTRUM_PARTICLES || num_bins == 0 {
            return PowerSpectrum::default();
        }

        let distances: Vec<f64> = vectorize::pair_distances(particles)
            .into_iter()
            .filter(|d| d.is_finite() && *d > 0.0)
            .collect();
        if distances.is_empty() {
            return PowerSpectrum::default();
        }

        let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let max = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_size = (max - min) / num_bins as f64;

        let mut spectrum = PowerSpectrum::default();
        for i in 0..num_bins {
            let bin_min = min + i as f64 * bin_size;
            let bin_max = bin_min + bin_size;
            let center = (bin_min + bin_max) / 2.0;
            if center <= 0.0 {
                continue;
            }
            let count = distances.iter().filter(|&&d| d >= bin_min && d < bin_max).count();
            spectrum.k.push(1.0 / center);
            spectrum.p.push(count as u64);
        }
        spectrum
    }

    /// Derives density parameters from the energy partition, scores them
    /// against the reference, appends and returns the comparison record.
    pub fn compare(&mut self, particles: &[Particle]) -> Option<ComparisonRecord> {
        if particles.is_empty() {
            tracing::debug!("cosmology comparison skipped: no particles");
            return None;
        }

        let total_energy: f64 = particles.iter().map(|p| finite_or_zero(p.ec)).sum();
        let kinetic_energy: f64 = particles.iter().map(|p| p.kinetic_energy()).sum();
        let potential_energy = total_energy - kinetic_energy;

        let omega_m = kinetic_energy / total_energy.max(1.0);
        let omega_lambda = potential_energy / total_energy.max(1.0);
        if !omega_m.is_finite() || !omega_lambda.is_finite() {
            tracing::warn!("cosmology comparison skipped: non-finite density ratio");
            return None;
        }

        let deviations = CosmologyDeviation {
            omega_m: (omega_m - self.reference.omega_m).abs(),
            omega_lambda: (omega_lambda - self.reference.omega_lambda).abs(),
        };
        let agreement = 1.0 - (deviations.omega_m + deviations.omega_lambda) / 2.0;

        let record = ComparisonRecord {
            timestamp: Utc::now(),
            derived: DerivedCosmology {
                omega_m,
                omega_lambda,
                power_spectrum: self.power_spectrum(particles, self.spectrum_bins),
            },
            reference: self.reference.clone(),
            deviations,
            agreement,
        };

        self.history.push(record.clone());
        Some(record)
    }

    pub fn history(&self) -> &History<ComparisonRecord> {
        &self.history
    }

    pub fn reference(&self) -> &ReferenceCosmology {
        &self.reference
    }
}
