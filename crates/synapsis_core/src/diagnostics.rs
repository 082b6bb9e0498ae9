//! Anomaly detection over the ψ-panel terms the simulation computes.
//!
//! The display collaborator renders the returned warnings; this module only
//! decides what counts as anomalous.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Magnitude past which a term is flagged even when finite.
const EXTREME_MAGNITUDE: f64 = 1e15;

/// The named terms of one ψ evaluation plus the normalized total.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PsiTerms {
    pub energy: f64,
    pub lambda: f64,
    pub velocity_integral: f64,
    pub x12_integral: f64,
    pub omega: f64,
    pub potential: f64,
    pub total: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum AnomalyKind {
    NonFinite,
    ExtremeMagnitude(f64),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PsiAnomaly {
    pub term: &'static str,
    pub kind: AnomalyKind,
}

impl fmt::Display for PsiAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AnomalyKind::NonFinite => write!(f, "{}: NaN or Infinity", self.term),
            AnomalyKind::ExtremeMagnitude(v) => {
                write!(f, "{}: extremely large ({v:.2e})", self.term)
            }
        }
    }
}

/// Flags every non-finite term, any term with magnitude past 1e15, and a
/// non-finite total.
pub fn detect_anomalies(terms: &PsiTerms) -> Vec<PsiAnomaly> {
    let named = [
        ("energy", terms.energy),
        ("lambda", terms.lambda),
        ("velocity_integral", terms.velocity_integral),
        ("x12_integral", terms.x12_integral),
        ("omega", terms.omega),
        ("potential", terms.potential),
    ];

    let mut anomalies = Vec::new();
    for (term, value) in named {
        if !value.is_finite() {
            anomalies.push(PsiAnomaly {
                term,
                kind: AnomalyKind::NonFinite,
            });
        } else if value.abs() > EXTREME_MAGNITUDE {
            anomalies.push(PsiAnomaly {
                term,
                kind: AnomalyKind::ExtremeMagnitude(value),
            });
        }
    }

    if !terms.total.is_finite() {
        anomalies.push(PsiAnomaly {
            term: "total",
            kind: AnomalyKind::NonFinite,
        });
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_terms_produce_no_anomalies() {
        assert!(detect_anomalies(&PsiTerms::default()).is_empty());
    }

    #[test]
    fn flags_nan_and_extremes() {
        let terms = PsiTerms {
            energy: f64::NAN,
            lambda: 2e15,
            total: f64::INFINITY,
            ..PsiTerms::default()
        };
        let anomalies = detect_anomalies(&terms);
        assert_eq!(anomalies.len(), 3);
        assert_eq!(anomalies[0].term, "energy");
        assert!(matches!(anomalies[1].kind, AnomalyKind::ExtremeMagnitude(_)));
        assert_eq!(anomalies[2].term, "total");
    }
}
