//! Mode transition handlers.
//!
//! Escape leaves insert mode; the way back is the command-mode `i` literal
//! (see `command_literal` in the crate root). Transitions repaint the mode
//! tag on the status row.

use anyhow::Result;
use core_keymap::HandlerOutcome;
use core_state::{EditorState, Mode};
use core_terminal::TerminalBackend;

pub fn escape_to_command(
    state: &mut EditorState,
    term: &mut dyn TerminalBackend,
) -> Result<HandlerOutcome> {
    core_render::set_mode(state, term, Mode::Command)?;
    Ok(HandlerOutcome::Continue)
}
