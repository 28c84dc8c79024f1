//! Terminal backend abstraction and crossterm implementation.
//!
//! The editor core never touches a terminal handle directly: everything it
//! needs is expressed through `TerminalBackend` (cursor positioning, a timed
//! key read, clear-to-eol, styled text, an audible cue). The crossterm
//! implementation lives here together with a `TerminalGuard` RAII wrapper so
//! raw mode and the alternate screen are restored even when the caller
//! early-returns or panics. `CaptureBackend` provides the same surface as an
//! in-memory recorder for tests.

use anyhow::Result;
use crossterm::{
    cursor::{MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode, size,
    },
};
use std::io::{Write, stdout};
use std::time::Duration;

pub mod key;
pub mod testing;
pub use key::KeyInput;
pub use testing::CaptureBackend;

/// Text styling classes resolved to theme colors by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Dim,
    Bold,
    Alert,
    Success,
}

/// Foreground colors for the four `TextStyle` classes.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub dim: Color,
    pub bold: Color,
    pub alert: Color,
    pub success: Color,
}

impl Theme {
    /// Build a theme from `#rrggbb` strings, keeping the default for any
    /// value that does not parse.
    pub fn from_hex(dim: &str, bold: &str, alert: &str, success: &str) -> Self {
        let defaults = Self::default();
        Self {
            dim: parse_hex(dim).unwrap_or(defaults.dim),
            bold: parse_hex(bold).unwrap_or(defaults.bold),
            alert: parse_hex(alert).unwrap_or(defaults.alert),
            success: parse_hex(success).unwrap_or(defaults.success),
        }
    }

    pub fn color_for(&self, style: TextStyle) -> Color {
        match style {
            TextStyle::Dim => self.dim,
            TextStyle::Bold => self.bold,
            TextStyle::Alert => self.alert,
            TextStyle::Success => self.success,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            dim: Color::Rgb {
                r: 0x88,
                g: 0x88,
                b: 0x88,
            },
            bold: Color::Rgb {
                r: 0x55,
                g: 0xff,
                b: 0xff,
            },
            alert: Color::Rgb {
                r: 0x88,
                g: 0x00,
                b: 0x00,
            },
            success: Color::Rgb {
                r: 0x00,
                g: 0x88,
                b: 0x00,
            },
        }
    }
}

/// Parse a `#rrggbb` color string.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb { r, g, b })
}

/// The abstract terminal the editor core draws through.
pub trait TerminalBackend {
    /// Enter raw mode and the alternate screen. Idempotent.
    fn enter(&mut self) -> Result<()>;
    /// Restore cooked mode and the main screen. Idempotent.
    fn leave(&mut self) -> Result<()>;
    /// Terminal dimensions as `(cols, rows)`.
    fn dimensions(&self) -> Result<(u16, u16)>;
    /// Move the cursor to `(row, col)`, 0-based.
    fn move_to(&mut self, row: u16, col: u16) -> Result<()>;
    fn print(&mut self, text: &str) -> Result<()>;
    fn print_styled(&mut self, text: &str, style: TextStyle) -> Result<()>;
    fn clear_to_eol(&mut self) -> Result<()>;
    /// Audible failure cue (terminal bell).
    fn beep(&mut self) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    /// Timed non-blocking key read. `None` when the timeout elapses or the
    /// pending event is not a decodable key press.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyInput>>;
}

pub struct CrosstermBackend {
    entered: bool,
    theme: Theme,
}

/// RAII guard ensuring terminal state restoration even if the caller
/// early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl CrosstermBackend {
    pub fn new(theme: Theme) -> Self {
        Self {
            entered: false,
            theme,
        }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalGuard<'_> {
    /// The guarded backend as the abstract drawing surface.
    pub fn term(&mut self) -> &mut dyn TerminalBackend {
        self.backend
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Show)?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn dimensions(&self) -> Result<(u16, u16)> {
        Ok(size()?)
    }

    fn move_to(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(stdout(), MoveTo(col, row))?;
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        queue!(stdout(), Print(text))?;
        Ok(())
    }

    fn print_styled(&mut self, text: &str, style: TextStyle) -> Result<()> {
        queue!(
            stdout(),
            SetForegroundColor(self.theme.color_for(style)),
            Print(text),
            ResetColor
        )?;
        Ok(())
    }

    fn clear_to_eol(&mut self) -> Result<()> {
        queue!(stdout(), Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    fn beep(&mut self) -> Result<()> {
        queue!(stdout(), Print("\u{7}"))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        stdout().flush()?;
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyInput>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        let event = crossterm::event::read()?;
        Ok(key::decode(&event))
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}
