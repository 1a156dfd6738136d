pub mod audio;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod input;
pub mod keymap;

pub use audio::{HarmonicProfile, Voice, VoicePhase, VoiceRegistry};
pub use config::{InstrumentSpec, SynthConfig};
pub use controls::Controls;
pub use engine::{spawn_synth, Synth, SynthHandle};
pub use error::SynthError;
