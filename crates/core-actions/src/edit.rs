//! Insert-mode edit handlers: backspace, delete, enter.
//!
//! Line joins and splits round-trip: enter at
//! column `c` splits a line into lengths `c` and `L - c`, and a backspace
//! at the split point merges them back verbatim.

use anyhow::Result;
use core_keymap::HandlerOutcome;
use core_state::EditorState;
use core_terminal::TerminalBackend;

/// Backspace: delete left of the cursor, or at column 0 merge the current
/// line into the line above, cursor at the join point. At buffer start the
/// key refuses with a beep.
pub fn backspace(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<HandlerOutcome> {
    if state.delete_back() {
        core_render::draw_line(state, term, state.y as u16)?;
        core_render::position_cursor(state, term)?;
        return Ok(HandlerOutcome::Continue);
    }
    if state.line_index() == 0 {
        term.beep()?;
        term.flush()?;
        return Ok(HandlerOutcome::Continue);
    }
    // Column 0 on a non-first line: move up to the join target, which may
    // sit just above the viewport.
    if state.y == 0 {
        state.y_offset -= 1;
    } else {
        state.y -= 1;
    }
    let idx = state.line_index();
    if let Some(join_col) = state.join_with_next(idx) {
        state.x = join_col;
    }
    core_render::draw_lines_from(state, term, state.y as u16)?;
    core_render::position_cursor(state, term)?;
    Ok(HandlerOutcome::Continue)
}

/// Delete: remove under the cursor, or at end of line merge the next line
/// upward without moving the cursor. At buffer end the key refuses with a
/// beep.
pub fn delete(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<HandlerOutcome> {
    if state.delete_forward() {
        core_render::draw_line(state, term, state.y as u16)?;
        core_render::position_cursor(state, term)?;
        return Ok(HandlerOutcome::Continue);
    }
    if !state.has_more_lines() {
        term.beep()?;
        term.flush()?;
        return Ok(HandlerOutcome::Continue);
    }
    let idx = state.line_index();
    state.join_with_next(idx);
    core_render::draw_lines_from(state, term, state.y as u16)?;
    core_render::position_cursor(state, term)?;
    Ok(HandlerOutcome::Continue)
}

/// Enter: split the current line at the cursor column and advance to the
/// start of the new line, scrolling the viewport when the cursor sat on
/// the last visible text row.
pub fn enter(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<HandlerOutcome> {
    let max_row = core_render::max_text_row(term)? as usize;
    state.split_line();
    if state.y >= max_row {
        state.y_offset += 1;
        core_render::draw_lines_from(state, term, 0)?;
    } else {
        state.y += 1;
        core_render::draw_lines_from(state, term, state.y as u16 - 1)?;
    }
    core_render::position_cursor(state, term)?;
    Ok(HandlerOutcome::Continue)
}
