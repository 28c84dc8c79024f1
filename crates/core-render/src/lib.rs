//! Drawing: numbered buffer lines, the mode tag, and the alert channel.
//!
//! The screen layout is fixed: text rows occupy `0..=rows - 2`, the last
//! terminal row is the status row with the dim mode tag at column 0 and
//! transient alerts at `ALERT_COLUMN`. Redraw is per-line; handlers repaint
//! only what they touched (`draw_line` for a single edit, `draw_lines_from`
//! after joins, splits and scrolls).
//!
//! Alert expiry is lazy: `position_cursor` is the single funnel every
//! cursor-affecting operation goes through, and it revokes an expired
//! message before moving the cursor. The idle poll tick in the key loop
//! calls `revoke_expired_alert` directly so messages also clear while the
//! user is not typing.

use anyhow::Result;
use core_state::{ALERT_COLUMN, EditorState, GUTTER_WIDTH, Mode};
use core_terminal::{TerminalBackend, TextStyle};
use tracing::trace;

/// Index of the last terminal row usable for buffer text.
pub fn max_text_row(term: &dyn TerminalBackend) -> Result<u16> {
    let (_, rows) = term.dimensions()?;
    Ok(rows.saturating_sub(2))
}

fn status_row(term: &dyn TerminalBackend) -> Result<u16> {
    let (_, rows) = term.dimensions()?;
    Ok(rows.saturating_sub(1))
}

/// Repaint one visible row: dim 1-based line number gutter, line text,
/// clear to end of line.
pub fn draw_line(state: &EditorState, term: &mut dyn TerminalBackend, row: u16) -> Result<()> {
    let idx = row as usize + state.y_offset;
    term.move_to(row, 0)?;
    term.print_styled(&format!("{:3} | ", idx + 1), TextStyle::Dim)?;
    term.print(&state.lines[idx])?;
    term.clear_to_eol()?;
    Ok(())
}

/// Repaint every text row from `from_row` down; rows past the buffer end
/// are blanked.
pub fn draw_lines_from(
    state: &EditorState,
    term: &mut dyn TerminalBackend,
    from_row: u16,
) -> Result<()> {
    let last = max_text_row(term)?;
    trace!(target: "render", from = from_row, to = last, "draw_lines");
    for row in from_row..=last {
        if row as usize + state.y_offset >= state.line_count() {
            term.move_to(row, 0)?;
            term.clear_to_eol()?;
        } else {
            draw_line(state, term, row)?;
        }
    }
    Ok(())
}

/// Move the terminal cursor to the editor cursor, clamping the column and
/// revoking an expired alert first.
pub fn position_cursor(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<()> {
    revoke_expired_alert(state, term)?;
    restore_cursor(state, term)?;
    term.flush()
}

/// Cursor repositioning without the expiry check. Only for `position_cursor`
/// and the alert paint/blank paths, which must not recurse into revocation.
fn restore_cursor(state: &mut EditorState, term: &mut dyn TerminalBackend) -> Result<()> {
    state.clamp_x();
    term.move_to(state.y as u16, state.x as u16 + GUTTER_WIDTH)
}

/// Switch the editor mode and repaint the bottom-left mode tag.
pub fn set_mode(state: &mut EditorState, term: &mut dyn TerminalBackend, mode: Mode) -> Result<()> {
    state.mode = mode;
    let row = status_row(term)?;
    term.move_to(row, 0)?;
    term.print_styled(&format!("-- {} --    ", mode.label()), TextStyle::Dim)?;
    position_cursor(state, term)
}

/// Paint a transient message on the status row, right-padded to fully
/// overwrite whatever was there, then restore the cursor and arm the
/// expiry clock.
pub fn show_alert(
    state: &mut EditorState,
    term: &mut dyn TerminalBackend,
    message: &str,
    style: TextStyle,
) -> Result<()> {
    let padded = state.alert.padded(message);
    let row = status_row(term)?;
    term.move_to(row, ALERT_COLUMN)?;
    term.print_styled(&padded, style)?;
    restore_cursor(state, term)?;
    state.alert.arm(padded.chars().count());
    term.flush()
}

/// Blank the alert area if the displayed message has outlived its timeout.
pub fn revoke_expired_alert(
    state: &mut EditorState,
    term: &mut dyn TerminalBackend,
) -> Result<()> {
    if !state.alert.expired() {
        return Ok(());
    }
    let width = state.alert.clear();
    let row = status_row(term)?;
    term.move_to(row, ALERT_COLUMN)?;
    term.print(&" ".repeat(width))?;
    restore_cursor(state, term)?;
    term.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_terminal::testing::{CaptureBackend, Recorded};
    use std::time::Duration;

    fn state_with(lines: &[&str]) -> EditorState {
        let mut st = EditorState::new();
        st.set_contents(lines.iter().map(|s| s.to_string()).collect());
        st
    }

    #[test]
    fn gutter_shows_one_based_buffer_index() {
        let st = state_with(&["alpha", "beta"]);
        let mut term = CaptureBackend::new(80, 24);
        draw_line(&st, &mut term, 1).unwrap();
        assert_eq!(
            term.ops[1],
            Recorded::Styled("  2 | ".into(), TextStyle::Dim)
        );
        assert_eq!(term.ops[2], Recorded::Print("beta".into()));
        assert_eq!(term.ops[3], Recorded::ClearToEol);
    }

    #[test]
    fn gutter_respects_scroll_offset() {
        let mut st = state_with(&["a", "b", "c", "d"]);
        st.y_offset = 2;
        let mut term = CaptureBackend::new(80, 24);
        draw_line(&st, &mut term, 0).unwrap();
        assert_eq!(
            term.ops[1],
            Recorded::Styled("  3 | ".into(), TextStyle::Dim)
        );
    }

    #[test]
    fn rows_past_buffer_end_are_blanked() {
        let st = state_with(&["only"]);
        let mut term = CaptureBackend::new(80, 5);
        draw_lines_from(&st, &mut term, 0).unwrap();
        // rows 1..=3 hold no buffer line: move + clear only
        let clears = term
            .ops
            .iter()
            .filter(|op| matches!(op, Recorded::ClearToEol))
            .count();
        assert_eq!(clears, 4);
        assert!(term.printed().contains("only"));
        assert!(!term.printed().contains("  2 |"));
    }

    #[test]
    fn cursor_lands_after_the_gutter() {
        let mut st = state_with(&["hello"]);
        st.x = 3;
        st.y = 0;
        let mut term = CaptureBackend::new(80, 24);
        position_cursor(&mut st, &mut term).unwrap();
        assert_eq!(term.cursor(), Some((0, 3 + GUTTER_WIDTH)));
    }

    #[test]
    fn position_cursor_clamps_the_column() {
        let mut st = state_with(&["ab"]);
        st.x = 10;
        let mut term = CaptureBackend::new(80, 24);
        position_cursor(&mut st, &mut term).unwrap();
        assert_eq!(st.x, 2);
        assert_eq!(term.cursor(), Some((0, 2 + GUTTER_WIDTH)));
    }

    #[test]
    fn mode_tag_is_painted_dim_on_the_status_row() {
        let mut st = state_with(&[""]);
        let mut term = CaptureBackend::new(80, 10);
        set_mode(&mut st, &mut term, Mode::Command).unwrap();
        assert_eq!(st.mode, Mode::Command);
        assert_eq!(term.ops[0], Recorded::MoveTo { row: 9, col: 0 });
        assert_eq!(
            term.ops[1],
            Recorded::Styled("-- COMMAND --    ".into(), TextStyle::Dim)
        );
    }

    #[test]
    fn shorter_alert_overwrites_longer_predecessor() {
        let mut st = state_with(&[""]);
        let mut term = CaptureBackend::new(80, 24);
        show_alert(&mut st, &mut term, "a long first message", TextStyle::Alert).unwrap();
        term.clear_ops();
        show_alert(&mut st, &mut term, "ok", TextStyle::Success).unwrap();
        let Recorded::Styled(text, TextStyle::Success) = &term.ops[1] else {
            panic!("expected styled alert, got {:?}", term.ops[1]);
        };
        assert_eq!(text.chars().count(), "a long first message".chars().count());
        assert!(text.starts_with("ok "));
    }

    #[test]
    fn alert_paint_restores_the_cursor() {
        let mut st = state_with(&["text"]);
        st.x = 2;
        let mut term = CaptureBackend::new(80, 24);
        show_alert(&mut st, &mut term, "note", TextStyle::Alert).unwrap();
        assert_eq!(term.cursor(), Some((0, 2 + GUTTER_WIDTH)));
    }

    #[test]
    fn expired_alert_is_blanked_on_reposition() {
        let mut st = state_with(&[""]);
        st.alert = core_state::AlertState::new(Duration::from_millis(0));
        let mut term = CaptureBackend::new(80, 24);
        show_alert(&mut st, &mut term, "gone", TextStyle::Alert).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        term.clear_ops();
        position_cursor(&mut st, &mut term).unwrap();
        assert_eq!(term.ops[0], Recorded::MoveTo { row: 23, col: ALERT_COLUMN });
        assert_eq!(term.ops[1], Recorded::Print("    ".into()));
        assert!(!st.alert.is_armed());
    }

    #[test]
    fn unexpired_alert_stays_put() {
        let mut st = state_with(&[""]);
        let mut term = CaptureBackend::new(80, 24);
        show_alert(&mut st, &mut term, "fresh", TextStyle::Alert).unwrap();
        term.clear_ops();
        position_cursor(&mut st, &mut term).unwrap();
        assert!(
            !term
                .ops
                .iter()
                .any(|op| matches!(op, Recorded::Print(s) if s.trim().is_empty() && !s.is_empty()))
        );
        assert!(st.alert.is_armed());
    }
}
