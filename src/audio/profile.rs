use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Ordered set of harmonic partials: frequency ratios of a fundamental and
/// their index-aligned amplitude weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonicProfile {
    ratios: Vec<f32>,
    weights: Vec<f32>,
}

impl HarmonicProfile {
    pub fn new(ratios: Vec<f32>, weights: Vec<f32>) -> Result<Self, SynthError> {
        if ratios.len() != weights.len() {
            return Err(SynthError::ProfileLengthMismatch {
                ratios: ratios.len(),
                weights: weights.len(),
            });
        }
        if ratios.is_empty() {
            return Err(SynthError::EmptyProfile);
        }
        if let Some(&ratio) = ratios.iter().find(|r| **r <= 0.0) {
            return Err(SynthError::InvalidRatio(ratio));
        }
        Ok(Self { ratios, weights })
    }

    /// A bare fundamental: one partial at ratio 1, weight 1.
    pub fn fundamental_only() -> Self {
        Self {
            ratios: vec![1.0],
            weights: vec![1.0],
        }
    }

    pub fn partials(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.ratios
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}
