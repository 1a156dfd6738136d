use crate::config::SynthConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoicePhase {
    Attacking,
    Releasing,
}

/// One sounding note: fixed fundamental, envelope level, lifecycle phase.
#[derive(Debug, Clone)]
pub struct Voice {
    /// Hz
    pub fundamental: f32,
    /// 0.0 -> 1.0, updated once per chunk.
    pub amplitude: f32,
    pub phase: VoicePhase,
}

impl Voice {
    pub fn attack(fundamental: f32) -> Self {
        Self {
            fundamental,
            amplitude: 0.0,
            phase: VoicePhase::Attacking,
        }
    }

    /// Flips the voice into its release phase. Amplitude and fundamental
    /// carry over unchanged so the transition is click-free.
    pub fn start_release(&mut self) {
        self.phase = VoicePhase::Releasing;
    }
}

/// Per-chunk envelope increments derived from the configured durations.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeRates {
    pub attack: f32,
    pub release: f32,
}

impl EnvelopeRates {
    pub fn from_config(config: &SynthConfig) -> Self {
        Self {
            attack: envelope_step(config.attack, config.sample_rate, config.chunk_size),
            release: envelope_step(config.release, config.sample_rate, config.chunk_size),
        }
    }
}

/// Envelope change per chunk for a stage of `duration` seconds. A duration
/// that rounds to zero samples yields a non-finite step, meaning the stage
/// completes instantly.
pub fn envelope_step(duration: f32, sample_rate: u32, chunk_size: usize) -> f32 {
    let stage_samples = duration * sample_rate as f32;
    if stage_samples <= 0.0 {
        return f32::INFINITY;
    }
    chunk_size as f32 / stage_samples
}

/// Advances the voice's envelope by one chunk and returns the level at chunk
/// start and chunk end. Attacking voices ramp toward 1 and hold there,
/// releasing voices ramp toward 0. A non-finite step snaps straight to the
/// target level with a flat ramp.
pub fn advance_envelope(voice: &mut Voice, rates: &EnvelopeRates) -> (f32, f32) {
    match voice.phase {
        VoicePhase::Attacking => {
            if !rates.attack.is_finite() {
                voice.amplitude = 1.0;
                return (1.0, 1.0);
            }
            let start = voice.amplitude;
            voice.amplitude = (start + rates.attack).min(1.0);
            (start, voice.amplitude)
        }
        VoicePhase::Releasing => {
            if !rates.release.is_finite() {
                voice.amplitude = 0.0;
                return (0.0, 0.0);
            }
            let start = voice.amplitude;
            voice.amplitude = (start - rates.release).max(0.0);
            (start, voice.amplitude)
        }
    }
}

/// Multiplies a chunk by the linear envelope ramp from `start` to `end`,
/// endpoint excluded, so consecutive chunks chain into one piecewise-linear
/// envelope with breakpoints at chunk boundaries.
pub fn apply_ramp(chunk: &mut [f32], start: f32, end: f32) {
    let slope = (end - start) / chunk.len() as f32;
    for (i, sample) in chunk.iter_mut().enumerate() {
        *sample *= start + slope * i as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(attack: f32, release: f32) -> EnvelopeRates {
        EnvelopeRates::from_config(&SynthConfig {
            attack,
            release,
            ..SynthConfig::default()
        })
    }

    #[test]
    fn attack_ramps_and_clamps_at_one() {
        let r = rates(0.1, 0.6);
        let mut voice = Voice::attack(440.0);

        let mut ticks = 0;
        while voice.amplitude < 1.0 {
            let (start, end) = advance_envelope(&mut voice, &r);
            assert!(start >= 0.0 && start <= 1.0);
            assert!(end >= start && end <= 1.0);
            ticks += 1;
            assert!(ticks < 1000, "attack never completed");
        }

        // ceil(attack_samples / chunk_size) chunks to reach full level
        let config = SynthConfig::default();
        let expected =
            (config.attack * config.sample_rate as f32 / config.chunk_size as f32).ceil() as usize;
        assert_eq!(ticks, expected);

        // Holding past full level stays flat at 1.
        let (start, end) = advance_envelope(&mut voice, &r);
        assert_eq!((start, end), (1.0, 1.0));
    }

    #[test]
    fn release_ramps_and_clamps_at_zero() {
        let r = rates(0.1, 0.6);
        let mut voice = Voice::attack(440.0);
        voice.amplitude = 0.05;
        voice.start_release();

        let (start, end) = advance_envelope(&mut voice, &r);
        assert_eq!(start, 0.05);
        assert_eq!(end, 0.0, "step past zero clamps");
        assert_eq!(voice.amplitude, 0.0);
    }

    #[test]
    fn release_continues_from_current_amplitude() {
        let r = rates(0.1, 0.6);
        let mut voice = Voice::attack(440.0);
        advance_envelope(&mut voice, &r);
        advance_envelope(&mut voice, &r);

        let before = voice.amplitude;
        voice.start_release();
        assert_eq!(voice.amplitude, before, "no jump at the transition");
        assert_eq!(voice.phase, VoicePhase::Releasing);

        let (start, _) = advance_envelope(&mut voice, &r);
        assert_eq!(start, before);
    }

    #[test]
    fn release_rate_uses_release_duration() {
        let r = rates(0.1, 0.2);
        let config = SynthConfig::default();
        let attack_expected = config.chunk_size as f32 / (0.1 * config.sample_rate as f32);
        let release_expected = config.chunk_size as f32 / (0.2 * config.sample_rate as f32);
        assert!((r.attack - attack_expected).abs() < 1e-6);
        assert!((r.release - release_expected).abs() < 1e-6);
        assert!(r.attack != r.release);
    }

    #[test]
    fn zero_duration_snaps_to_target() {
        let r = rates(0.0, 0.0);
        let mut voice = Voice::attack(440.0);

        let (start, end) = advance_envelope(&mut voice, &r);
        assert_eq!((start, end), (1.0, 1.0), "instant attack is flat at 1");
        assert_eq!(voice.amplitude, 1.0);

        voice.start_release();
        let (start, end) = advance_envelope(&mut voice, &r);
        assert_eq!((start, end), (0.0, 0.0), "instant release is flat at 0");
    }

    #[test]
    fn ramp_interpolates_endpoint_excluded() {
        let mut chunk = vec![1.0_f32; 4];
        apply_ramp(&mut chunk, 0.0, 1.0);
        assert_eq!(chunk, vec![0.0, 0.25, 0.5, 0.75]);

        let mut flat = vec![0.5_f32; 4];
        apply_ramp(&mut flat, 1.0, 1.0);
        assert_eq!(flat, vec![0.5; 4]);
    }
}
