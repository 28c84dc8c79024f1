//! In-memory terminal backend for tests.
//!
//! Records every draw primitive in order and serves key input from a
//! scripted queue, so render and handler behavior can be asserted without a
//! real terminal.

use crate::{KeyInput, TerminalBackend, TextStyle};
use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    MoveTo { row: u16, col: u16 },
    Print(String),
    Styled(String, TextStyle),
    ClearToEol,
    Beep,
    Flush,
}

/// A `TerminalBackend` that draws into a log instead of a screen.
pub struct CaptureBackend {
    pub cols: u16,
    pub rows: u16,
    pub ops: Vec<Recorded>,
    pub keys: VecDeque<KeyInput>,
}

impl CaptureBackend {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            ops: Vec::new(),
            keys: VecDeque::new(),
        }
    }

    pub fn queue_key(&mut self, key: KeyInput) {
        self.keys.push_back(key);
    }

    /// All printed text (plain and styled) concatenated in draw order.
    pub fn printed(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Recorded::Print(s) | Recorded::Styled(s, _) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn beeps(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Recorded::Beep))
            .count()
    }

    /// The last cursor position that was set, if any.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.ops.iter().rev().find_map(|op| match op {
            Recorded::MoveTo { row, col } => Some((*row, *col)),
            _ => None,
        })
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl TerminalBackend for CaptureBackend {
    fn enter(&mut self) -> Result<()> {
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        Ok(())
    }

    fn dimensions(&self) -> Result<(u16, u16)> {
        Ok((self.cols, self.rows))
    }

    fn move_to(&mut self, row: u16, col: u16) -> Result<()> {
        self.ops.push(Recorded::MoveTo { row, col });
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.ops.push(Recorded::Print(text.to_string()));
        Ok(())
    }

    fn print_styled(&mut self, text: &str, style: TextStyle) -> Result<()> {
        self.ops.push(Recorded::Styled(text.to_string(), style));
        Ok(())
    }

    fn clear_to_eol(&mut self) -> Result<()> {
        self.ops.push(Recorded::ClearToEol);
        Ok(())
    }

    fn beep(&mut self) -> Result<()> {
        self.ops.push(Recorded::Beep);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.ops.push(Recorded::Flush);
        Ok(())
    }

    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<KeyInput>> {
        Ok(self.keys.pop_front())
    }
}
