//! Key handlers and the default binding set.
//!
//! Handlers are plain functions over `(EditorState, TerminalBackend)`;
//! `register_defaults` wires them into a `KeyHandlerRegistry` with explicit
//! `add` calls at setup. Mode-independent bindings cover every mode; the
//! insert-scoped ones take precedence while editing. Literal characters do
//! not go through the registry at all — the key loop routes them to
//! `insert_literal` or `command_literal` depending on the current mode.

use anyhow::Result;
use core_keymap::{HandlerOutcome, KeyHandlerRegistry};
use core_state::{EditorState, Mode};
use core_terminal::{TerminalBackend, TextStyle};
use tracing::debug;

pub mod edit;
pub mod mode;
pub mod motion;

/// Interrupt (Ctrl-C): leave the key loop cleanly in any mode.
pub fn interrupt(
    _state: &mut EditorState,
    _term: &mut dyn TerminalBackend,
) -> Result<HandlerOutcome> {
    debug!(target: "keymap.dispatch", "interrupt");
    Ok(HandlerOutcome::Quit)
}

/// Literal character input in insert mode: insert at the cursor column,
/// repaint only the affected line, reposition. Outside insert mode this is
/// a failure cue (the loop should not route chars here, but a registered
/// handler may).
pub fn insert_literal(
    state: &mut EditorState,
    term: &mut dyn TerminalBackend,
    ch: char,
) -> Result<()> {
    if state.mode != Mode::Insert {
        term.beep()?;
        return term.flush();
    }
    state.insert_char(ch);
    core_render::draw_line(state, term, state.y as u16)?;
    core_render::position_cursor(state, term)
}

/// Literal character input in command mode. The mode is otherwise a stub;
/// `i` returns to insert, `w` writes the buffer, `q` quits, anything else
/// is echoed in a debug alert.
pub fn command_literal(
    state: &mut EditorState,
    term: &mut dyn TerminalBackend,
    ch: char,
) -> Result<HandlerOutcome> {
    match ch {
        'i' => {
            core_render::set_mode(state, term, Mode::Insert)?;
        }
        'w' => match state.save() {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let lines = state.line_count();
                core_render::show_alert(
                    state,
                    term,
                    &format!("\"{name}\" {lines}L written"),
                    TextStyle::Success,
                )?;
            }
            Err(err) => {
                core_render::show_alert(state, term, &format!("{err}"), TextStyle::Alert)?;
            }
        },
        'q' => return Ok(HandlerOutcome::Quit),
        other => {
            core_render::show_alert(state, term, &format!("'{other}'"), TextStyle::Alert)?;
        }
    }
    Ok(HandlerOutcome::Continue)
}

/// Populate the registry with the default bindings.
pub fn register_defaults(registry: &mut KeyHandlerRegistry) {
    registry.add("CTRL_C", None, interrupt);

    // Cursor keys work the same in every mode.
    registry.add("UP", None, motion::up);
    registry.add("DOWN", None, motion::down);
    registry.add("LEFT", None, motion::left);
    registry.add("RIGHT", None, motion::right);

    // Buffer mutation is insert-only; outside insert these keys degrade to
    // plain motions.
    registry.add("BACKSPACE", Some(Mode::Insert), edit::backspace);
    registry.add("BACKSPACE", None, motion::left);
    registry.add("DELETE", Some(Mode::Insert), edit::delete);
    registry.add("DELETE", None, motion::right);
    registry.add("ENTER", Some(Mode::Insert), edit::enter);
    registry.add("ENTER", None, motion::down);

    registry.add("ESCAPE", Some(Mode::Insert), mode::escape_to_command);
}
