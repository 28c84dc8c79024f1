//! Key-handler registry: (key name, optional mode) -> handler dispatch.
//!
//! Resolution is deterministic and side-effect free in the registry itself:
//! a mode-specific handler wins over a mode-independent one registered
//! under the same name, and a miss is not an error (the key loop decides
//! whether the input falls through to literal-character handling). The
//! registry is populated once during setup by explicit `add` calls and is
//! read-only during the key loop; it is an instance passed by reference,
//! not process-global state.

use anyhow::Result;
use core_state::{EditorState, Mode};
use core_terminal::TerminalBackend;
use std::collections::HashMap;
use tracing::{debug, trace};

/// What a handler tells the key loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    Continue,
    /// Clean-exit signal (interrupt / quit command).
    Quit,
}

/// A key handler: mutates editor state and draws through the backend.
pub type KeyHandler = fn(&mut EditorState, &mut dyn TerminalBackend) -> Result<HandlerOutcome>;

/// One registered binding, exposed for the `--debug` table dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub mode: Option<Mode>,
}

#[derive(Default)]
pub struct KeyHandlerRegistry {
    handlers: HashMap<String, HashMap<Option<Mode>, KeyHandler>>,
}

impl KeyHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `name`, optionally scoped to one mode. Names
    /// are canonicalized to upper-case; a second registration for the same
    /// `(name, mode)` silently replaces the first.
    pub fn add(&mut self, name: &str, mode: Option<Mode>, handler: KeyHandler) {
        let key = name.to_ascii_uppercase();
        trace!(target: "keymap.register", name = key.as_str(), mode = ?mode, "add");
        self.handlers.entry(key).or_default().insert(mode, handler);
    }

    /// Look up and run the handler for `name`: mode-specific first, then the
    /// mode-independent fallback. `Ok(None)` means no handler exists.
    pub fn dispatch(
        &self,
        name: &str,
        state: &mut EditorState,
        term: &mut dyn TerminalBackend,
    ) -> Result<Option<HandlerOutcome>> {
        let key = name.to_ascii_uppercase();
        let Some(by_mode) = self.handlers.get(&key) else {
            debug!(target: "keymap.dispatch", name = key.as_str(), "no_handler");
            return Ok(None);
        };
        if let Some(handler) = by_mode.get(&Some(state.mode)) {
            debug!(target: "keymap.dispatch", name = key.as_str(), mode = ?state.mode, "mode_handler");
            return handler(state, term).map(Some);
        }
        if let Some(handler) = by_mode.get(&None) {
            debug!(target: "keymap.dispatch", name = key.as_str(), "global_handler");
            return handler(state, term).map(Some);
        }
        debug!(target: "keymap.dispatch", name = key.as_str(), mode = ?state.mode, "no_handler_for_mode");
        Ok(None)
    }

    /// All bindings sorted by name, mode-independent entry first per name.
    pub fn bindings(&self) -> Vec<Binding<'_>> {
        let mut out: Vec<Binding<'_>> = self
            .handlers
            .iter()
            .flat_map(|(name, by_mode)| {
                by_mode.keys().map(|mode| Binding {
                    name: name.as_str(),
                    mode: *mode,
                })
            })
            .collect();
        out.sort_by_key(|b| (b.name.to_string(), b.mode.map(|m| m.label())));
        out
    }

    pub fn len(&self) -> usize {
        self.handlers.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
