//! Builtin data files and data-file lookup

use keylayout_core::{LayoutError, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

pub const ANSI_QWERTY: &str = include_str!("data/ansi.qwerty");
pub const ANSI_DVORAK: &str = include_str!("data/ansi.dvorak");

/// Option-layer mappings of the standard US layout
pub const OSXOPT: &str = include_str!("data/osxopt");

/// Builtin data file called `name`
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "ansi.qwerty" => Some(ANSI_QWERTY),
        "ansi.dvorak" => Some(ANSI_DVORAK),
        "osxopt" => Some(OSXOPT),
        _ => None,
    }
}

/// Loads a data file, preferring a file relative to `base_dir` over a builtin
pub fn load(name: &str, base_dir: &Path) -> Result<Cow<'static, str>> {
    let path = base_dir.join(name);
    if path.is_file() {
        log::debug!("Reading data file {}", path.display());
        let text = fs::read_to_string(&path)
            .map_err(|e| LayoutError::io(format!("Could not read {}", path.display()), e))?;
        return Ok(Cow::Owned(text));
    }

    match builtin(name) {
        Some(text) => {
            log::debug!("Using builtin data file {}", name);
            Ok(Cow::Borrowed(text))
        }
        None => Err(LayoutError::UnknownDataFile(name.to_string())),
    }
}
