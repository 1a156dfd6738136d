use std::collections::HashMap;

use super::Voice;

/// The two keyed voice collections the input side writes and the render
/// loop consumes. A key maps to at most one attacking voice; a key-up moves
/// the voice into `releasing`, where it fades until the envelope engine
/// retires it.
#[derive(Debug, Default)]
pub struct VoiceRegistry {
    pub attacking: HashMap<char, Voice>,
    pub releasing: HashMap<char, Voice>,
}

impl VoiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh attacking voice for `key`, restarting the attack if
    /// the key was already sounding.
    pub fn press(&mut self, key: char, voice: Voice) {
        self.attacking.insert(key, voice);
    }

    /// Moves the voice for `key` into the releasing map, keeping its current
    /// amplitude and fundamental. A key with no attacking voice is a no-op;
    /// release events for control keys or never-pressed keys arrive
    /// routinely from a shared input source.
    pub fn release(&mut self, key: char) {
        if let Some(mut voice) = self.attacking.remove(&key) {
            voice.start_release();
            self.releasing.insert(key, voice);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.attacking.is_empty() && self.releasing.is_empty()
    }

    pub fn voice_count(&self) -> usize {
        self.attacking.len() + self.releasing.len()
    }
}
