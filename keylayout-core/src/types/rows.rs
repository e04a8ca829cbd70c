//! Tokenized input rows handed to the keyboard compiler

use super::modifiers::KeyCode;
use std::fmt;

/// Where a row came from, used as error context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, line {}", self.file, self.line)
    }
}

/// One line of a base encoding: `code shiftless shifty capslock`
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRow {
    pub location: SourceLocation,
    pub code: KeyCode,
    pub shiftless: String,
    pub shifty: String,
    /// Absent only when the row stops after the shifty column
    pub capslock: Option<String>,
}

/// One line of a mapping file: `output key-token...`
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRow {
    pub location: SourceLocation,
    pub output: String,
    pub keys: Vec<String>,
}
