//! Multi-keystroke sequences: dead keys, actions and terminators

pub mod action;
pub mod compiler;

pub use action::{Action, ActionTable, State, StatePath, Subaction};
pub use compiler::{parse_keys, Key, SequenceCompiler};
