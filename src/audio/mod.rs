mod profile;
mod registry;
mod renderer;
mod voice;

pub use profile::HarmonicProfile;
pub use registry::VoiceRegistry;
pub use renderer::{render_voice, TimeBase};
pub use voice::{advance_envelope, apply_ramp, envelope_step, EnvelopeRates, Voice, VoicePhase};
