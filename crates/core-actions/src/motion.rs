//! Cursor movement handlers.
//!
//! Movement never mutates the buffer. Edges of the buffer refuse with a
//! beep instead of an error; vertical moves at the viewport boundary scroll
//! by one row and repaint the text area. Every successful move funnels
//! through `position_cursor`, which clamps the column to the target line
//! and services lazy alert expiry.

use anyhow::Result;
use core_keymap::HandlerOutcome;
use core_state::EditorState;
use core_terminal::{TerminalBackend, TextStyle};

pub fn up(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<HandlerOutcome> {
    if state.y == 0 {
        if state.y_offset > 0 {
            state.y_offset -= 1;
            core_render::draw_lines_from(state, term, 0)?;
            core_render::position_cursor(state, term)?;
            return Ok(HandlerOutcome::Continue);
        }
        term.beep()?;
        term.flush()?;
        return Ok(HandlerOutcome::Continue);
    }
    state.y -= 1;
    core_render::position_cursor(state, term)?;
    Ok(HandlerOutcome::Continue)
}

pub fn down(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<HandlerOutcome> {
    let max_row = core_render::max_text_row(term)? as usize;
    if state.y >= max_row {
        // At the last visible row: scroll instead of moving.
        if !state.has_more_lines() {
            term.beep()?;
            term.flush()?;
            return Ok(HandlerOutcome::Continue);
        }
        state.y_offset += 1;
        core_render::draw_lines_from(state, term, 0)?;
        core_render::position_cursor(state, term)?;
        return Ok(HandlerOutcome::Continue);
    }
    if state.has_more_lines() {
        state.y += 1;
        core_render::position_cursor(state, term)?;
    } else {
        // Lines are never created implicitly.
        term.beep()?;
        core_render::show_alert(state, term, "use RETURN to add lines", TextStyle::Alert)?;
    }
    Ok(HandlerOutcome::Continue)
}

pub fn left(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<HandlerOutcome> {
    if state.x == 0 {
        term.beep()?;
        term.flush()?;
        return Ok(HandlerOutcome::Continue);
    }
    state.x -= 1;
    core_render::position_cursor(state, term)?;
    Ok(HandlerOutcome::Continue)
}

pub fn right(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<HandlerOutcome> {
    state.clamp_x();
    if state.x >= state.current_line_len() {
        term.beep()?;
        term.flush()?;
        return Ok(HandlerOutcome::Continue);
    }
    state.x += 1;
    core_render::position_cursor(state, term)?;
    Ok(HandlerOutcome::Continue)
}
