//! Editor state: line buffer, cursor, mode, and the transient alert clock.
//!
//! This crate is deliberately terminal-free. Everything here is plain state
//! mutation so the edit primitives and their invariants can be exercised
//! without a backend:
//! * `lines` is never empty; an "empty" buffer is a single `""` line.
//! * `y + y_offset` always names a valid line index.
//! * `x` is a char column in `0..=len(current line)`, re-clamped by
//!   `clamp_x` whenever the cursor is repositioned.
//!
//! Viewport movement (`y` / `y_offset` adjustments that need the terminal
//! height) lives with the key handlers in `core-actions`; this crate only
//! stores the fields and mutates the buffer.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Width of the `999 | ` line-number gutter in terminal columns.
pub const GUTTER_WIDTH: u16 = 6;

/// Fixed column on the status row where alert messages are painted.
pub const ALERT_COLUMN: u16 = 20;

/// Editor mode. A closed set from the start; the mode governs which
/// registered handlers are eligible to fire for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Insert,
    Command,
}

impl Mode {
    /// Label shown in the bottom-left mode tag.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}

/// Expiry clock for the transient status-row message.
///
/// There is no background timer: the holder arms the clock when a message
/// is shown and callers check `expired` lazily (on cursor repositioning and
/// on idle poll ticks). `width` remembers the display width of the last
/// message so a shorter follow-up can be right-padded to fully overwrite it.
#[derive(Debug, Clone)]
pub struct AlertState {
    shown_at: Option<Instant>,
    width: usize,
    timeout: Duration,
}

impl AlertState {
    pub fn new(timeout: Duration) -> Self {
        Self {
            shown_at: None,
            width: 0,
            timeout,
        }
    }

    /// Pad `message` with trailing spaces to at least the width of the
    /// previously shown message so no stale characters survive.
    pub fn padded(&self, message: &str) -> String {
        let mut out = message.to_string();
        let len = message.chars().count();
        if len < self.width {
            out.extend(std::iter::repeat_n(' ', self.width - len));
        }
        out
    }

    /// Record that a message of `width` chars is now on screen.
    pub fn arm(&mut self, width: usize) {
        self.shown_at = Some(Instant::now());
        self.width = self.width.max(width);
    }

    pub fn is_armed(&self) -> bool {
        self.shown_at.is_some()
    }

    pub fn expired(&self) -> bool {
        self.shown_at
            .map(|t| t.elapsed() > self.timeout)
            .unwrap_or(false)
    }

    /// Disarm the clock, returning the width of the area to blank.
    pub fn clear(&mut self) -> usize {
        self.shown_at = None;
        std::mem::take(&mut self.width)
    }
}

impl Default for AlertState {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

/// The whole editable state of one editor session.
#[derive(Debug)]
pub struct EditorState {
    /// Buffer lines, 0-indexed storage, 1-indexed gutter display. Never empty.
    pub lines: Vec<String>,
    /// Cursor column as a char offset into the current line.
    pub x: usize,
    /// Cursor row relative to the visible text area.
    pub y: usize,
    /// Vertical scroll: `y + y_offset` is the buffer line index.
    pub y_offset: usize,
    pub mode: Mode,
    /// File the buffer was loaded from (write target for `save`).
    pub path: Option<PathBuf>,
    pub dirty: bool,
    pub alert: AlertState,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            x: 0,
            y: 0,
            y_offset: 0,
            mode: Mode::Insert,
            path: None,
            dirty: false,
            alert: AlertState::default(),
        }
    }

    /// Replace the buffer contents, restoring the never-empty invariant.
    pub fn set_contents(&mut self, lines: Vec<String>) {
        self.lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        self.x = 0;
        self.y = 0;
        self.y_offset = 0;
        self.dirty = false;
    }

    /// Buffer index of the cursor line.
    pub fn line_index(&self) -> usize {
        self.y + self.y_offset
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn current_line(&self) -> &str {
        &self.lines[self.line_index()]
    }

    /// Char length of the cursor line (columns are char offsets).
    pub fn current_line_len(&self) -> usize {
        self.current_line().chars().count()
    }

    /// True when at least one buffer line exists below the cursor line.
    pub fn has_more_lines(&self) -> bool {
        self.line_index() + 1 < self.line_count()
    }

    /// Clamp the cursor column to the current line length.
    pub fn clamp_x(&mut self) {
        let len = self.current_line_len();
        if self.x > len {
            self.x = len;
        }
    }

    fn byte_at(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    /// Insert a literal character at the cursor column and advance by one.
    pub fn insert_char(&mut self, ch: char) {
        let idx = self.line_index();
        let byte = Self::byte_at(&self.lines[idx], self.x);
        self.lines[idx].insert(byte, ch);
        self.x += 1;
        self.dirty = true;
        trace!(target: "edit", line = idx, col = self.x, "insert_char");
    }

    /// Remove the character before the cursor. Returns false at column 0
    /// (the caller decides whether that becomes a line join or a beep).
    pub fn delete_back(&mut self) -> bool {
        if self.x == 0 {
            return false;
        }
        let idx = self.line_index();
        let byte = Self::byte_at(&self.lines[idx], self.x - 1);
        self.lines[idx].remove(byte);
        self.x -= 1;
        self.dirty = true;
        trace!(target: "edit", line = idx, col = self.x, "delete_back");
        true
    }

    /// Remove the character under the cursor. Returns false at end of line.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.line_index();
        if self.x >= self.lines[idx].chars().count() {
            return false;
        }
        let byte = Self::byte_at(&self.lines[idx], self.x);
        self.lines[idx].remove(byte);
        self.dirty = true;
        trace!(target: "edit", line = idx, col = self.x, "delete_forward");
        true
    }

    /// Split the current line at the cursor column. The suffix becomes the
    /// next buffer line and the column resets to 0; advancing the row is
    /// the caller's job (it may have to scroll instead).
    pub fn split_line(&mut self) {
        let idx = self.line_index();
        let byte = Self::byte_at(&self.lines[idx], self.x);
        let rest = self.lines[idx].split_off(byte);
        self.lines.insert(idx + 1, rest);
        self.x = 0;
        self.dirty = true;
        debug!(target: "edit", line = idx, "split_line");
    }

    /// Append line `idx + 1` onto line `idx`, removing it. Returns the char
    /// length of line `idx` before the join (the join column), or `None`
    /// when there is no next line.
    pub fn join_with_next(&mut self, idx: usize) -> Option<usize> {
        if idx + 1 >= self.lines.len() {
            return None;
        }
        let col = self.lines[idx].chars().count();
        let next = self.lines.remove(idx + 1);
        self.lines[idx].push_str(&next);
        self.dirty = true;
        debug!(target: "edit", line = idx, join_col = col, "join_lines");
        Some(col)
    }

    /// Write the buffer back to its path, newline-terminated lines verbatim.
    pub fn save(&mut self) -> Result<PathBuf> {
        let Some(path) = self.path.clone() else {
            bail!("no file name");
        };
        let mut contents = self.lines.join("\n");
        contents.push('\n');
        fs::write(&path, contents)
            .with_context(|| format!("write {}", path.display()))?;
        self.dirty = false;
        debug!(target: "edit", path = %path.display(), lines = self.lines.len(), "save");
        Ok(path)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a file into buffer lines, trailing newlines stripped. An empty file
/// yields a single empty line.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("open {}", path.display()))?;
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    Ok(if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    })
}
