//! Tests for the Writer state machine

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};

use hntree::application::{control, Writer};
use hntree::domain::Dir4::{self, *};
use hntree::domain::{EnumTree, EnumTreeBuilder, HuffmanBuilder, PathTreeBuilder};
use hntree::util::testing;

// U D  "h"      D U  "<shift>"
// U L  "i"      D D  "<caps>"
// U R  "<enter>" D L  "<bksp>"
// L    "a"      D R  "<sym>"
// R    "<meta>"
#[fixture]
fn tree() -> EnumTree<Dir4> {
    testing::init_test_setup();
    PathTreeBuilder::new()
        .path("h", vec![Up, Down])
        .path("i", vec![Up, Left])
        .path("<enter>", vec![Up, Right])
        .path("<shift>", vec![Down, Up])
        .path("<caps>", vec![Down, Down])
        .path("<bksp>", vec![Down, Left])
        .path("<sym>", vec![Down, Right])
        .path("a", vec![Left])
        .path("<meta>", vec![Right])
        .build()
        .unwrap()
}

const H: [Dir4; 2] = [Up, Down];
const I: [Dir4; 2] = [Up, Left];
const ENTER: [Dir4; 2] = [Up, Right];
const SHIFT: [Dir4; 2] = [Down, Up];
const CAPS: [Dir4; 2] = [Down, Down];
const BKSP: [Dir4; 2] = [Down, Left];
const SYM: [Dir4; 2] = [Down, Right];

// ============================================================
// Basic typing
// ============================================================

#[rstest]
fn given_hi_enter_sequence_when_walking_then_line_moves_to_history(tree: EnumTree<Dir4>) {
    // Arrange
    let mut writer = Writer::new(tree);

    // Act
    let emitted: Vec<Option<char>> = [Up, Down, Up, Left, Up, Right]
        .into_iter()
        .map(|d| writer.walk(d))
        .collect();

    // Assert
    assert_eq!(
        emitted,
        vec![None, Some('h'), None, Some('i'), None, Some('\n')]
    );
    assert_eq!(writer.line(), "");
    assert_eq!(writer.history_list(), vec!["hi"]);
    assert_eq!(writer.history(0), Some("hi"));
}

#[rstest]
fn given_partial_entry_when_walking_then_nothing_emitted(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    assert_eq!(writer.walk(Up), None);

    assert!(writer.is_mid_entry());
    assert_eq!(writer.line(), "");
}

#[rstest]
fn given_missing_child_mid_entry_when_walking_then_entry_continues(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);
    writer.walk(Down);

    assert_eq!(writer.walk(Down), Some(control::CAPS));
    writer.walk(Up);
    // no Up child below Up: input ignored, entry still open
    assert_eq!(writer.walk(Up), None);
    assert!(writer.is_mid_entry());
    assert_eq!(writer.walk(Down), Some('H'));
}

#[rstest]
fn given_completed_symbol_when_walking_then_tree_rewinds(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    writer.type_path(&H);

    assert!(!writer.is_mid_entry());
    assert_eq!(writer.walk(Left), Some('a'));
}

// ============================================================
// Shift and caps
// ============================================================

#[rstest]
fn given_shift_when_typing_then_only_next_char_uppercase(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    assert_eq!(writer.type_path(&SHIFT), control::SHIFT.to_string());
    assert!(writer.is_shift());
    assert!(writer.next_is_capitalized());

    assert_eq!(writer.type_path(&H), "H");
    assert!(!writer.is_shift());

    writer.type_path(&I);
    assert_eq!(writer.line(), "Hi");
}

#[rstest]
fn given_caps_when_typing_then_uppercase_until_toggled_off(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    writer.type_path(&CAPS);
    writer.type_path(&H);
    writer.type_path(&I);
    writer.type_path(&CAPS);
    writer.type_path(&H);

    assert!(!writer.is_caps());
    assert_eq!(writer.line(), "HIh");
}

#[rstest]
fn given_caps_and_shift_when_typing_then_shift_stays_armed(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);
    writer.set_caps(true);
    writer.type_path(&SHIFT);

    writer.type_path(&H);
    assert!(writer.is_shift());

    writer.set_caps(false);
    writer.type_path(&I);
    assert!(!writer.is_shift());
    assert_eq!(writer.line(), "HI");
}

#[rstest]
fn given_shift_twice_when_typing_then_toggled_off(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    writer.type_path(&SHIFT);
    writer.type_path(&SHIFT);
    writer.type_path(&H);

    assert_eq!(writer.line(), "h");
}

// ============================================================
// Backspace
// ============================================================

#[rstest]
fn given_two_chars_when_backspacing_then_last_removed(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);
    writer.type_path(&H);
    writer.type_path(&I);

    let emitted = writer.type_path(&BKSP);

    assert_eq!(emitted, control::BACKSPACE.to_string());
    assert_eq!(writer.line(), "h");
}

#[rstest]
fn given_single_char_when_backspacing_then_floor_of_one_kept(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);
    writer.type_path(&H);

    writer.type_path(&BKSP);

    assert_eq!(writer.line().chars().count(), 1);
    assert_eq!(writer.line(), "h");
}

#[rstest]
fn given_empty_line_when_backspacing_then_noop(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    assert_eq!(writer.type_path(&BKSP), control::BACKSPACE.to_string());

    assert_eq!(writer.line(), "");
}

// ============================================================
// Other actions
// ============================================================

#[rstest]
fn given_sym_when_walking_then_control_char_and_no_state_change(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    assert_eq!(writer.type_path(&SYM), control::SYM.to_string());

    assert_eq!(writer.line(), "");
    assert!(!writer.is_caps());
    assert!(!writer.is_shift());
}

#[rstest]
fn given_unknown_token_when_walking_then_null_char(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    assert_eq!(writer.walk(Right), Some(control::NULL));

    assert_eq!(writer.line(), "");
    assert_eq!(writer.recent(0), Some("<meta>"));
    // session continues
    assert_eq!(writer.walk(Left), Some('a'));
}

// ============================================================
// History
// ============================================================

#[rstest]
fn given_full_history_when_entering_then_oldest_evicted(tree: EnumTree<Dir4>) {
    let mut writer = Writer::with_capacity(tree, 2);

    for _ in 0..3 {
        writer.walk(Left);
        writer.type_path(&ENTER);
    }
    writer.type_path(&H);
    writer.type_path(&ENTER);

    assert_eq!(writer.history_list(), vec!["a", "h"]);
    assert_eq!(writer.history(0), Some("h"));
    assert_eq!(writer.history(1), Some("a"));
    assert_eq!(writer.history(2), None);
}

#[rstest]
fn given_line_callback_when_entering_then_invoked_with_line(tree: EnumTree<Dir4>) {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    let mut writer = Writer::new(tree);
    writer.on_line(move |line| sink.borrow_mut().push(line.to_string()));

    writer.type_path(&[H, I, ENTER, ENTER].concat());

    assert_eq!(*lines.borrow(), vec!["hi".to_string(), String::new()]);
}

#[rstest]
fn given_emitted_keys_when_reading_recent_then_newest_first(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);

    writer.type_path(&[SHIFT, H, ENTER].concat());

    assert_eq!(writer.recent(0), Some("<enter>"));
    assert_eq!(writer.recent(1), Some("h"));
    assert_eq!(writer.recent(2), Some("<shift>"));
}

// ============================================================
// Entry control
// ============================================================

#[rstest]
fn given_mid_entry_when_stepping_back_then_other_branch_reachable(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);
    writer.walk(Up);

    writer.step_back();

    assert!(!writer.is_mid_entry());
    assert_eq!(writer.walk(Left), Some('a'));
}

#[rstest]
fn given_mid_entry_when_cancelling_then_back_at_root(tree: EnumTree<Dir4>) {
    let mut writer = Writer::new(tree);
    writer.walk(Down);

    writer.cancel();

    assert!(!writer.is_mid_entry());
    assert_eq!(writer.subtree_contents().len(), 4);
}

#[test]
fn given_root_only_tree_when_walking_then_nothing_emitted() {
    let tree = HuffmanBuilder::<Dir4>::new(Vec::<String>::new())
        .build()
        .unwrap();
    let mut writer = Writer::new(tree);

    assert_eq!(writer.type_path(&[Up, Down, Left, Right]), "");
    assert_eq!(writer.line(), "");
}

// ============================================================
// Generated layout
// ============================================================

#[test]
fn given_default_huffman_tree_when_typing_hello_then_line_and_history() {
    // Arrange
    testing::init_test_setup();
    let tree = HuffmanBuilder::<Dir4>::default_keys().build().unwrap();
    let mut input = Vec::new();
    for key in ["<shift>", "h", "e", "l", "l", "o", "<enter>"] {
        input.extend(tree.path_of(key).unwrap());
    }
    let mut writer = Writer::new(tree);

    // Act
    let emitted = writer.type_path(&input);

    // Assert
    assert_eq!(emitted, "\u{10}Hello\n");
    assert_eq!(writer.history(0), Some("Hello"));
    assert_eq!(writer.line(), "");
}

#[test]
fn given_builder_when_creating_writer_then_capacity_applied() {
    let writer =
        Writer::from_builder(&HuffmanBuilder::<Dir4>::new(["a", "b"]), 5).unwrap();

    assert_eq!(writer.capacity(), 5);
    assert_eq!(writer.tree().leaf_count(), 2);
}
