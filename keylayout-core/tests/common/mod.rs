use keylayout_core::{
    BaseRow, CapslockPolicy, CompiledKeyboard, KeyCode, KeyMapSet, KeyResult, Keyboard, MappingRow,
    Modifiers, ShiftState, SourceLocation,
};

/// Shorthand for a key code known to be in range
pub fn code(n: u64) -> KeyCode {
    KeyCode::new(n).unwrap()
}

pub fn output(text: &str) -> KeyResult {
    KeyResult::Output(text.to_string())
}

#[allow(dead_code)]
pub fn action(name: &str) -> KeyResult {
    KeyResult::Action(name.to_string())
}

/// Builds base rows from `(code, shiftless, shifty, capslock)` tuples
pub fn base_rows(rows: &[(u64, &str, &str, &str)]) -> Vec<BaseRow> {
    rows.iter()
        .enumerate()
        .map(|(idx, (n, shiftless, shifty, capslock))| BaseRow {
            location: SourceLocation::new("test.base", idx + 1),
            code: code(*n),
            shiftless: shiftless.to_string(),
            shifty: shifty.to_string(),
            capslock: Some(capslock.to_string()),
        })
        .collect()
}

/// Builds mapping rows from whitespace-separated `output key...` lines
pub fn mapping_rows(lines: &[&str]) -> Vec<MappingRow> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let mut words = line.split_whitespace().map(String::from);
            let output = words.next().unwrap_or_default();
            MappingRow {
                location: SourceLocation::new("test.map", idx + 1),
                output,
                keys: words.collect(),
            }
        })
        .collect()
}

/// A handful of keys laid out like the start of a US keyboard
#[allow(dead_code)]
pub fn sample_encoding() -> Vec<BaseRow> {
    base_rows(&[
        (0, "a", "A", "A"),
        (1, "s", "S", "S"),
        (10, "§", "±", "§"),
        (14, "e", "E", "E"),
        (20, "´", "¨", "´"),
        (31, "o", "O", "O"),
        (49, "[SPC]", "[SPC]", "[SPC]"),
    ])
}

/// A keyboard with the sample encoding loaded
#[allow(dead_code)]
pub fn sample_keyboard(policy: CapslockPolicy) -> Keyboard {
    let mut keyboard = Keyboard::new(policy);
    keyboard.load_base_encoding(&sample_encoding()).unwrap();
    keyboard
}

/// Loads `lines` on top of the sample encoding and finishes the keyboard
#[allow(dead_code)]
pub fn compile(policy: CapslockPolicy, lines: &[&str]) -> CompiledKeyboard {
    let mut keyboard = sample_keyboard(policy);
    keyboard.load_mappings(&mapping_rows(lines)).unwrap();
    keyboard.finish()
}

/// Reads one slot of a finished keymap set
#[allow(dead_code)]
pub fn slot(set: &KeyMapSet, mods: Modifiers, shift_state: ShiftState, n: u64) -> KeyResult {
    let subset = if mods.has_option() {
        set.option().expect("option keymaps")
    } else {
        set.plain()
    };
    let map = match (shift_state, subset.shifted()) {
        (ShiftState::Shiftless, _) | (_, keylayout_core::ShiftedMaps::Undistinguished) => subset.shiftless(),
        (ShiftState::Shifty, keylayout_core::ShiftedMaps::Distinguished { shifty, .. }) => shifty,
        (ShiftState::Capslock, keylayout_core::ShiftedMaps::Distinguished { capslock, .. }) => {
            capslock.as_ref().expect("capslock keymap")
        }
    };
    map.result(code(n)).clone()
}

/// State path from its action-name components
#[allow(dead_code)]
pub fn path(components: &[&str]) -> keylayout_core::StatePath {
    let mut state = keylayout_core::State::None;
    for component in components {
        state = keylayout_core::State::Path(state.advance(component));
    }
    match state {
        keylayout_core::State::Path(path) => path,
        keylayout_core::State::None => panic!("empty state path"),
    }
}
