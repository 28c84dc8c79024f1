//! Decoding crossterm events into the editor's key vocabulary.
//!
//! Named keys carry canonical upper-case names (`UP`, `BACKSPACE`,
//! `CTRL_C`, ...) matching the registry's key space; printable input
//! without modifiers comes through as `Char`. Key releases, repeats of
//! release events, resize notifications and unmapped control chords are
//! swallowed (`None`).

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One decoded key press from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// A named/control key, canonical upper-case.
    Named(String),
    /// A literal printable character.
    Char(char),
}

impl KeyInput {
    pub fn named(name: &str) -> Self {
        KeyInput::Named(name.to_ascii_uppercase())
    }
}

/// Decode a terminal event into a key input, if it maps to one.
pub fn decode(event: &Event) -> Option<KeyInput> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind == KeyEventKind::Release {
        return None;
    }
    decode_key(key)
}

fn decode_key(key: &KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyInput::named("CTRL_C")),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up => Some(KeyInput::named("UP")),
        KeyCode::Down => Some(KeyInput::named("DOWN")),
        KeyCode::Left => Some(KeyInput::named("LEFT")),
        KeyCode::Right => Some(KeyInput::named("RIGHT")),
        KeyCode::Enter => Some(KeyInput::named("ENTER")),
        KeyCode::Backspace => Some(KeyInput::named("BACKSPACE")),
        KeyCode::Delete => Some(KeyInput::named("DELETE")),
        KeyCode::Esc => Some(KeyInput::named("ESCAPE")),
        KeyCode::Tab => Some(KeyInput::named("TAB")),
        KeyCode::Home => Some(KeyInput::named("HOME")),
        KeyCode::End => Some(KeyInput::named("END")),
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn arrows_decode_to_canonical_names() {
        assert_eq!(
            decode(&press(KeyCode::Up, KeyModifiers::NONE)),
            Some(KeyInput::Named("UP".into()))
        );
        assert_eq!(
            decode(&press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(KeyInput::Named("BACKSPACE".into()))
        );
    }

    #[test]
    fn ctrl_c_decodes_as_interrupt_name() {
        assert_eq!(
            decode(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyInput::Named("CTRL_C".into()))
        );
    }

    #[test]
    fn other_control_chords_are_swallowed() {
        assert_eq!(decode(&press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn printable_chars_pass_through() {
        assert_eq!(
            decode(&press(KeyCode::Char('ä'), KeyModifiers::NONE)),
            Some(KeyInput::Char('ä'))
        );
    }

    #[test]
    fn releases_and_resizes_are_swallowed() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(decode(&release), None);
        assert_eq!(decode(&Event::Resize(80, 24)), None);
    }
}
