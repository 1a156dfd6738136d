use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::audio::HarmonicProfile;
use crate::error::SynthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthConfig {
    pub sample_rate: u32,
    /// Samples per rendered chunk.
    pub chunk_size: usize,
    /// Seconds
    pub attack: f32,
    /// Seconds
    pub release: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            chunk_size: 512,
            attack: 0.1,
            release: 0.6,
        }
    }
}

impl SynthConfig {
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate);
        }
        if self.chunk_size == 0 {
            return Err(SynthError::InvalidChunkSize);
        }
        if self.attack < 0.0 {
            return Err(SynthError::NegativeDuration {
                stage: "attack",
                seconds: self.attack,
            });
        }
        if self.release < 0.0 {
            return Err(SynthError::NegativeDuration {
                stage: "release",
                seconds: self.release,
            });
        }
        Ok(())
    }

    pub fn chunk_duration(&self) -> f64 {
        self.chunk_size as f64 / self.sample_rate as f64
    }
}

/// An instrument description as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub name: String,
    pub harmonics: Vec<f32>,
    pub amps: Vec<f32>,
    /// Seconds
    pub attack: f32,
    /// Seconds
    pub release: f32,
}

impl InstrumentSpec {
    /// Demo instrument: golden-ratio partials with reciprocal weights.
    pub fn golden(partials: usize) -> Self {
        const PHI: f32 = 1.618_034;
        let harmonics: Vec<f32> = (0..partials).map(|k| PHI.powi(k as i32)).collect();
        let amps = harmonics.iter().map(|h| 1.0 / h).collect();
        Self {
            name: "Golden".to_string(),
            harmonics,
            amps,
            attack: 0.1,
            release: 0.6,
        }
    }

    pub fn load(path: &Path) -> Result<Self, SynthError> {
        let ron_string = fs::read_to_string(path)?;
        let spec: InstrumentSpec = ron::from_str(&ron_string)?;
        Ok(spec)
    }

    pub fn save(&self, path: &Path) -> Result<(), SynthError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, ron_string)?;
        Ok(())
    }

    pub fn profile(&self) -> Result<HarmonicProfile, SynthError> {
        HarmonicProfile::new(self.harmonics.clone(), self.amps.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SynthConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_sample_rate_rejected() {
        let config = SynthConfig {
            sample_rate: 0,
            ..SynthConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SynthError::InvalidSampleRate)
        ));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let config = SynthConfig {
            chunk_size: 0,
            ..SynthConfig::default()
        };
        assert!(matches!(config.validate(), Err(SynthError::InvalidChunkSize)));
    }

    #[test]
    fn negative_durations_rejected_zero_allowed() {
        let negative = SynthConfig {
            release: -0.5,
            ..SynthConfig::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(SynthError::NegativeDuration { stage: "release", .. })
        ));

        let instant = SynthConfig {
            attack: 0.0,
            release: 0.0,
            ..SynthConfig::default()
        };
        assert!(instant.validate().is_ok());
    }

    #[test]
    fn golden_spec_has_reciprocal_amps() {
        let spec = InstrumentSpec::golden(8);
        assert_eq!(spec.harmonics.len(), 8);
        assert_eq!(spec.amps.len(), 8);
        assert!((spec.harmonics[0] - 1.0).abs() < 1e-6);
        for (h, a) in spec.harmonics.iter().zip(&spec.amps) {
            assert!((h * a - 1.0).abs() < 1e-4, "amp should be 1/harmonic");
        }
        assert!(spec.profile().is_ok());
    }

    #[test]
    fn spec_round_trips_through_ron() {
        let spec = InstrumentSpec::golden(4);
        let encoded = ron::ser::to_string_pretty(&spec, ron::ser::PrettyConfig::default()).unwrap();
        let decoded: InstrumentSpec = ron::from_str(&encoded).unwrap();
        assert_eq!(decoded.name, spec.name);
        assert_eq!(decoded.harmonics, spec.harmonics);
        assert_eq!(decoded.amps, spec.amps);
    }
}
