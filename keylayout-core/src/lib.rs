pub mod types;
pub mod charset;
pub mod trie;
pub mod literal;
pub mod keymap;
pub mod sequence;
pub mod keyboard;

pub use types::*;

// Re-export commonly used types
pub use keyboard::{CompiledKeyboard, Keyboard};
pub use keymap::{KeyMap, KeyMapSet, KeyMapSubset, KeyResult, ShiftedMaps};
pub use literal::{Literal, LiteralId, LiteralRegistry, Point};
pub use sequence::{Action, ActionTable, Key, State, StatePath, Subaction};
pub use trie::PrefixTrie;
