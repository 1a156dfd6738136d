use std::io::stdout;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::warn;

use crate::controls::Controls;
use crate::error::SynthError;

/// Runs the blocking keyboard loop, feeding press/release events into the
/// engine until Esc or Ctrl-C. The terminal is switched into raw mode with
/// event-type reporting so key releases are delivered; both are restored on
/// the way out.
pub fn run_keyboard(controls: &mut Controls) -> Result<(), SynthError> {
    terminal::enable_raw_mode()?;

    let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    } else {
        warn!("terminal does not report key releases; notes will not stop on key-up");
    }

    let result = listen(controls);

    if enhanced {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = terminal::disable_raw_mode();
    result
}

fn listen(controls: &mut Controls) -> Result<(), SynthError> {
    loop {
        match event::read()? {
            Event::Key(KeyEvent {
                code: KeyCode::Esc, ..
            }) => return Ok(()),
            Event::Key(key)
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(());
            }
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                kind,
                ..
            }) => match kind {
                KeyEventKind::Press => controls.key_down(c),
                KeyEventKind::Release => controls.key_up(c),
                // Terminal auto-repeat while a key is held; the attack
                // must not restart.
                KeyEventKind::Repeat => {}
            },
            _ => {}
        }
    }
}
