use std::f64::consts::TAU;

use super::HarmonicProfile;

/// Offset ceiling before the accumulated time snaps back to zero, bounding
/// floating-point error growth over long sessions.
const TIME_WRAP: f64 = 360.0;

/// The continuous time base threaded through every rendered chunk. Sample
/// times are `steps[i] + offset`; advancing the offset by exactly one chunk
/// duration per tick keeps a sustained tone phase-continuous across chunk
/// boundaries.
#[derive(Debug, Clone)]
pub struct TimeBase {
    steps: Vec<f64>,
    chunk_duration: f64,
    offset: f64,
}

impl TimeBase {
    pub fn new(sample_rate: u32, chunk_size: usize) -> Self {
        let steps = (0..chunk_size)
            .map(|i| i as f64 / sample_rate as f64)
            .collect();
        Self {
            steps,
            chunk_duration: chunk_size as f64 / sample_rate as f64,
            offset: 0.0,
        }
    }

    pub fn advance(&mut self) {
        self.offset += self.chunk_duration;
        if self.offset > TIME_WRAP {
            self.offset = 0.0;
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

/// Fills `out` with one chunk of the raw, unenveloped waveform for a voice:
/// the weighted sum of sine partials evaluated at the continuous time base.
pub fn render_voice(
    out: &mut [f32],
    fundamental: f32,
    profile: &HarmonicProfile,
    time: &TimeBase,
) {
    out.fill(0.0);
    for (ratio, weight) in profile.partials() {
        let omega = TAU * fundamental as f64 * ratio as f64;
        let weight = weight as f64;
        for (sample, step) in out.iter_mut().zip(&time.steps) {
            *sample += (weight * (omega * (step + time.offset)).sin()) as f32;
        }
    }
}
