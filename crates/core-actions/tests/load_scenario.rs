mod common;

use common::{default_registry, press, session};
use core_state::GUTTER_WIDTH;

// End-to-end: load ["ab", "cd"], move to the end of
// "cd", press Enter -> ["ab", "cd", ""] with the cursor at the start of
// the new empty line.
#[test]
fn enter_at_end_of_loaded_file_appends_an_empty_line() {
    let reg = default_registry();
    let (mut state, mut term) = session(&["ab", "cd"]);
    press(&reg, "DOWN", &mut state, &mut term);
    press(&reg, "RIGHT", &mut state, &mut term);
    press(&reg, "RIGHT", &mut state, &mut term);
    assert_eq!((state.y, state.x), (1, 2));

    press(&reg, "ENTER", &mut state, &mut term);
    assert_eq!(
        state.lines,
        vec!["ab".to_string(), "cd".to_string(), "".to_string()]
    );
    assert_eq!((state.y, state.x), (2, 0));
    assert_eq!(term.cursor(), Some((2, GUTTER_WIDTH)));
}

#[test]
fn delete_at_end_of_line_joins_upward_without_moving() {
    let reg = default_registry();
    let (mut state, mut term) = session(&["ab", "cd"]);
    state.x = 2;
    press(&reg, "DELETE", &mut state, &mut term);
    assert_eq!(state.lines, vec!["abcd".to_string()]);
    assert_eq!((state.y, state.x), (0, 2));
}

#[test]
fn backspace_at_buffer_start_is_a_cued_no_op() {
    let reg = default_registry();
    let (mut state, mut term) = session(&["ab", "cd"]);
    press(&reg, "BACKSPACE", &mut state, &mut term);
    assert_eq!(state.lines, vec!["ab".to_string(), "cd".to_string()]);
    assert_eq!((state.y, state.x), (0, 0));
    assert_eq!(term.beeps(), 1);
}

#[test]
fn delete_at_buffer_end_is_a_cued_no_op() {
    let reg = default_registry();
    let (mut state, mut term) = session(&["ab"]);
    state.x = 2;
    press(&reg, "DELETE", &mut state, &mut term);
    assert_eq!(state.lines, vec!["ab".to_string()]);
    assert_eq!(term.beeps(), 1);
}
