//! Keymap model: per-modifier, per-shift-state tables of key results

pub mod map;
pub mod set;
pub mod subset;

pub use map::{KeyMap, KeyResult};
pub use set::KeyMapSet;
pub use subset::{KeyMapSubset, ShiftedMaps};
