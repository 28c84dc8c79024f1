mod common;

use common::{default_registry, press, session};
use core_actions::command_literal;
use core_keymap::HandlerOutcome;
use core_state::{Mode, read_lines};

#[test]
fn escape_enters_command_mode_and_i_returns() {
    let reg = default_registry();
    let (mut state, mut term) = session(&["text"]);
    press(&reg, "ESCAPE", &mut state, &mut term);
    assert_eq!(state.mode, Mode::Command);
    assert!(term.printed().contains("-- COMMAND --"));

    let out = command_literal(&mut state, &mut term, 'i').unwrap();
    assert_eq!(out, HandlerOutcome::Continue);
    assert_eq!(state.mode, Mode::Insert);
    assert!(term.printed().contains("-- INSERT --"));
}

#[test]
fn w_writes_the_buffer_to_its_path() {
    let (mut state, mut term) = session(&["one", "two"]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    state.path = Some(path.clone());
    state.mode = Mode::Command;
    state.dirty = true;

    let out = command_literal(&mut state, &mut term, 'w').unwrap();
    assert_eq!(out, HandlerOutcome::Continue);
    assert!(!state.dirty);
    assert_eq!(
        read_lines(&path).unwrap(),
        vec!["one".to_string(), "two".to_string()]
    );
    assert!(term.printed().contains("\"note.txt\" 2L written"));
}

#[test]
fn w_without_a_path_reports_instead_of_failing() {
    let (mut state, mut term) = session(&["text"]);
    state.mode = Mode::Command;
    let out = command_literal(&mut state, &mut term, 'w').unwrap();
    assert_eq!(out, HandlerOutcome::Continue);
    assert!(term.printed().contains("no file name"));
}

#[test]
fn q_quits() {
    let (mut state, mut term) = session(&[""]);
    state.mode = Mode::Command;
    let out = command_literal(&mut state, &mut term, 'q').unwrap();
    assert_eq!(out, HandlerOutcome::Quit);
}

#[test]
fn unknown_command_chars_are_echoed_not_inserted() {
    let (mut state, mut term) = session(&["keep"]);
    state.mode = Mode::Command;
    let out = command_literal(&mut state, &mut term, 'z').unwrap();
    assert_eq!(out, HandlerOutcome::Continue);
    assert_eq!(state.current_line(), "keep");
    assert!(term.printed().contains("'z'"));
}
