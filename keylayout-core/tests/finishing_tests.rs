mod common;

use common::*;
use keylayout_core::{CapslockPolicy, CompiledKeyboard, KeyMapSet, KeyResult, Modifiers, ShiftState};
use pretty_assertions::assert_eq;

fn selectors(compiled: &CompiledKeyboard) -> Vec<Vec<String>> {
    compiled
        .keymaps()
        .iter()
        .map(|map| map.selectors().to_vec())
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_default_keyboard_selectors() {
    let compiled = compile(CapslockPolicy::Plain, &[]);
    assert_eq!(
        selectors(&compiled),
        vec![
            strings(&["anyOption?", "command anyOption? anyShift? caps?"]),
            strings(&["anyShift anyOption? caps?"]),
            strings(&["caps anyOption?"]),
            strings(&["control anyOption? command? anyShift? caps?"]),
        ]
    );

    let indices: Vec<Option<usize>> = compiled.keymaps().iter().map(|m| m.index()).collect();
    assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3)]);
}

#[test]
fn test_option_layer_selectors() {
    let compiled = compile(CapslockPolicy::Plain, &["å O-a"]);
    assert_eq!(
        selectors(&compiled),
        vec![
            strings(&["", "command anyShift? caps?"]),
            strings(&["anyShift caps?"]),
            strings(&["caps"]),
            strings(&["anyOption caps?", "anyOption command anyShift? caps?"]),
            strings(&["anyOption anyShift caps?"]),
            strings(&["control anyOption? command? anyShift? caps?"]),
        ]
    );
}

#[test]
fn test_control_shift_variants_selectors() {
    let compiled = compile(CapslockPolicy::Plain, &["Z C-A"]);
    let control: Vec<Vec<String>> = selectors(&compiled).split_off(3);
    assert_eq!(
        control,
        vec![
            strings(&["control anyOption? caps?", "control command anyOption? anyShift? caps?"]),
            strings(&["control anyShift anyOption? caps?"]),
        ]
    );
    assert_eq!(compiled.keymaps()[4].index(), Some(4));
}

#[test]
fn test_identical_control_variants_collapse() {
    let compiled = compile(CapslockPolicy::Plain, &["[SOH] C-A"]);
    let control = compiled.control_keymaps();
    assert!(!control.plain().is_distinguished());
    assert_eq!(control.maps().len(), 1);
    assert_eq!(compiled.keymaps().len(), 4);
}

#[test]
fn test_base_variants_never_collapse() {
    let compiled = compile(CapslockPolicy::Plain, &["x S", "y s"]);
    assert!(compiled.base_keymaps().plain().is_distinguished());
}

#[test]
fn test_backup_is_immutable() {
    let compiled = compile(CapslockPolicy::Plain, &["ß s", "á ´ a", "å O-a"]);
    let backup = compiled.base_keymaps().backup().unwrap();

    assert_eq!(backup.shiftless().result(code(1)), &output("s"));
    assert_eq!(backup.shiftless().result(code(0)), &output("a"));
    assert_eq!(backup.shiftless().result(code(20)), &output("´"));
    assert!(backup.shiftless().selectors().is_empty());
}

#[test]
fn test_clean_keyboard_with_capslock_disabled() {
    let compiled = compile(CapslockPolicy::Disables, &[]);
    assert_eq!(
        selectors(&compiled),
        vec![
            strings(&["anyOption? caps?", "command anyOption? caps? anyShift?"]),
            strings(&["anyShift anyOption? caps?"]),
            strings(&["control anyOption? caps? command? anyShift?"]),
        ]
    );
}

// Capslock disabling a modified layout re-emits the unmodified layout under `caps`
#[test]
fn test_dirty_keyboard_with_capslock_disabled_emits_backup() {
    let compiled = compile(CapslockPolicy::Disables, &["á ´ a"]);
    assert_eq!(
        selectors(&compiled),
        vec![
            strings(&["anyOption?", "command anyOption? anyShift?"]),
            strings(&["anyShift anyOption?"]),
            strings(&["caps anyOption?", "caps command anyOption? anyShift?"]),
            strings(&["caps anyShift anyOption?"]),
            strings(&["control anyOption? caps? command? anyShift?"]),
        ]
    );

    let maps = compiled.keymaps();
    assert_eq!(maps[0].result(code(20)), &action("´"));
    assert_eq!(maps[2].result(code(20)), &output("´"));
    let indices: Vec<Option<usize>> = maps.iter().map(|m| m.index()).collect();
    assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn test_dirty_control_set_with_capslock_disabled() {
    let compiled = compile(CapslockPolicy::Disables, &["x C-a"]);
    let control = compiled.control_keymaps();
    assert!(control.is_dirty());

    let maps = control.maps();
    assert_eq!(maps.len(), 2);
    assert_eq!(maps[0].selectors(), ["control anyOption? command? anyShift?"]);
    assert_eq!(maps[1].selectors(), ["caps control anyOption? command? anyShift?"]);
    assert_eq!(maps[1].result(code(0)), &KeyResult::Output("\u{1}".into()));
}

#[test]
fn test_reads_leave_sets_clean() {
    let mut set = KeyMapSet::new(true, true);
    set.make_backup();
    set.result(Modifiers::OPTION, ShiftState::Shifty, code(0)).unwrap();
    assert!(!set.is_dirty());
}
