//! Modifier masks, shift states and key codes

use super::errors::{LayoutError, Result};
use std::fmt;
use std::ops::BitOr;

/// Number of key codes addressable by a layout
pub const KEY_CODE_COUNT: usize = 128;

/// Modifiers a key in a sequence may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const OPTION: Modifiers = Modifiers(1 << 0);
    pub const CONTROL: Modifiers = Modifiers(1 << 1);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn has_option(self) -> bool {
        self.contains(Modifiers::OPTION)
    }

    pub fn has_control(self) -> bool {
        self.contains(Modifiers::CONTROL)
    }

    /// Prefix used when naming actions, e.g. `C-O-` for control+option
    pub fn action_prefix(self) -> &'static str {
        match (self.has_control(), self.has_option()) {
            (false, false) => "",
            (false, true) => "O-",
            (true, false) => "C-",
            (true, true) => "C-O-",
        }
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

/// Column of the base encoding a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShiftState {
    Shiftless,
    Shifty,
    Capslock,
}

impl ShiftState {
    pub const ALL: [ShiftState; 3] = [ShiftState::Shiftless, ShiftState::Shifty, ShiftState::Capslock];
}

/// What the capslock key does for a keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapslockPolicy {
    /// Capslock selects the capslock column
    #[default]
    Plain,
    /// Like `Plain`, and the system may use capslock to switch input methods
    SwitchesInputMode,
    /// Capslock is ignored; the capslock column is never read
    Disables,
}

impl CapslockPolicy {
    pub fn disables(self) -> bool {
        self == CapslockPolicy::Disables
    }
}

/// A physical key code, always below `KEY_CODE_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(u8);

impl KeyCode {
    pub fn new(code: u64) -> Result<Self> {
        if code >= KEY_CODE_COUNT as u64 {
            return Err(LayoutError::KeyCodeTooHigh(code));
        }
        Ok(KeyCode(code as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
