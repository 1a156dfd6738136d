#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Base frequency in Hz, before the octave multiplier.
    Note(f32),
    OctaveDown,
    OctaveUp,
}

/// Fixed one-octave chromatic layout starting at middle C, white keys on the
/// home row and accidentals on the row above. Keys outside the layout map to
/// nothing.
pub fn key_to_action(key: char) -> Option<KeyAction> {
    let action = match key {
        'z' => KeyAction::OctaveDown,
        'x' => KeyAction::OctaveUp,
        'a' => KeyAction::Note(261.63),
        'w' => KeyAction::Note(277.18),
        's' => KeyAction::Note(293.66),
        'e' => KeyAction::Note(311.13),
        'd' => KeyAction::Note(329.63),
        'f' => KeyAction::Note(349.23),
        't' => KeyAction::Note(369.99),
        'g' => KeyAction::Note(392.00),
        'y' => KeyAction::Note(415.30),
        'h' => KeyAction::Note(440.00),
        'u' => KeyAction::Note(466.16),
        'j' => KeyAction::Note(493.88),
        'k' => KeyAction::Note(523.25),
        'o' => KeyAction::Note(554.37),
        'l' => KeyAction::Note(587.33),
        'p' => KeyAction::Note(622.25),
        'ñ' => KeyAction::Note(659.25),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_row_hits_the_chromatic_scale() {
        assert_eq!(key_to_action('a'), Some(KeyAction::Note(261.63)));
        assert_eq!(key_to_action('h'), Some(KeyAction::Note(440.00)));
        assert_eq!(key_to_action('k'), Some(KeyAction::Note(523.25)));
        assert_eq!(key_to_action('ñ'), Some(KeyAction::Note(659.25)));
    }

    #[test]
    fn octave_controls_are_not_notes() {
        assert_eq!(key_to_action('z'), Some(KeyAction::OctaveDown));
        assert_eq!(key_to_action('x'), Some(KeyAction::OctaveUp));
    }

    #[test]
    fn unmapped_keys_return_none() {
        assert_eq!(key_to_action('q'), None);
        assert_eq!(key_to_action('1'), None);
        assert_eq!(key_to_action(' '), None);
    }

    #[test]
    fn mapped_notes_ascend() {
        let keys = [
            'a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j', 'k', 'o', 'l', 'p', 'ñ',
        ];
        let mut last = 0.0;
        for key in keys {
            match key_to_action(key) {
                Some(KeyAction::Note(freq)) => {
                    assert!(freq > last, "{key} out of order");
                    last = freq;
                }
                other => panic!("{key} should be a note, got {other:?}"),
            }
        }
    }
}
