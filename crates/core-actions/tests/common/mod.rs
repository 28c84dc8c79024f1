#![allow(dead_code)] // Shared across test binaries; each uses a subset of helpers.

use core_actions::{insert_literal, register_defaults};
use core_keymap::{HandlerOutcome, KeyHandlerRegistry};
use core_state::EditorState;
use core_terminal::CaptureBackend;

pub const COLS: u16 = 80;
pub const ROWS: u16 = 24;

pub fn session(lines: &[&str]) -> (EditorState, CaptureBackend) {
    session_sized(lines, ROWS)
}

/// A session with a custom terminal height, for scrolling scenarios.
pub fn session_sized(lines: &[&str], rows: u16) -> (EditorState, CaptureBackend) {
    let mut state = EditorState::new();
    state.set_contents(lines.iter().map(|s| s.to_string()).collect());
    (state, CaptureBackend::new(COLS, rows))
}

pub fn default_registry() -> KeyHandlerRegistry {
    let mut registry = KeyHandlerRegistry::new();
    register_defaults(&mut registry);
    registry
}

pub fn press(
    registry: &KeyHandlerRegistry,
    name: &str,
    state: &mut EditorState,
    term: &mut CaptureBackend,
) -> Option<HandlerOutcome> {
    registry.dispatch(name, state, term).unwrap()
}

pub fn type_chars(state: &mut EditorState, term: &mut CaptureBackend, text: &str) {
    for ch in text.chars() {
        insert_literal(state, term, ch).unwrap();
    }
}
