use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::audio::{Voice, VoiceRegistry};
use crate::keymap::{key_to_action, KeyAction};

/// The input collaborator's handle into the engine: translates key events
/// into registry mutations. The octave multiplier lives here because it is
/// only ever read at key-down time; existing voices keep the fundamental
/// they were created with.
pub struct Controls {
    registry: Arc<Mutex<VoiceRegistry>>,
    octave: f32,
}

impl Controls {
    pub fn new(registry: Arc<Mutex<VoiceRegistry>>) -> Self {
        Self {
            registry,
            octave: 1.0,
        }
    }

    /// A fresh press. The caller is expected to suppress terminal
    /// auto-repeat; a duplicate press simply restarts the attack.
    pub fn key_down(&mut self, key: char) {
        match key_to_action(key) {
            Some(KeyAction::Note(base)) => {
                let fundamental = self.octave * base;
                debug!(key = %key, fundamental, "key down");
                self.registry.lock().press(key, Voice::attack(fundamental));
            }
            Some(KeyAction::OctaveDown) => {
                self.octave /= 2.0;
                debug!(octave = self.octave, "octave down");
            }
            Some(KeyAction::OctaveUp) => {
                self.octave *= 2.0;
                debug!(octave = self.octave, "octave up");
            }
            None => {}
        }
    }

    pub fn key_up(&mut self, key: char) {
        self.registry.lock().release(key);
    }

    pub fn octave(&self) -> f32 {
        self.octave
    }
}
