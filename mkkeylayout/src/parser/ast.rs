use keylayout_core::CapslockPolicy;
use std::path::PathBuf;

/// Bundle identifier prefix used when no `baseurl` is configured
pub const DEFAULT_BASE_URL: &str = "org.chinjir.keyboardlayout";

/// Base encoding used when a keyboard does not name one
pub const DEFAULT_BASE_ENCODING: &str = "ansi.qwerty";

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq)]
pub struct BundleConfig {
    pub name: String,
    /// `baseurl` with the `.keyboardlayout` suffix applied
    pub base_url: String,
    pub identifier: String,
    pub version: String,
    pub keyboards: Vec<KeyboardConfig>,
}

impl BundleConfig {
    pub fn directory_name(&self) -> String {
        format!("{}.bundle", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardConfig {
    pub name: String,
    pub identifier: String,
    pub language: String,
    pub base_encoding: String,
    pub osxopt: bool,
    pub datafiles: Vec<String>,
    pub capslock_policy: CapslockPolicy,
    /// Source of the `.icns` file, as written in the configuration
    pub icons: Option<PathBuf>,
}

impl KeyboardConfig {
    pub fn keylayout_file_name(&self) -> String {
        format!("{}.keylayout", self.name)
    }

    pub fn icons_file_name(&self) -> String {
        format!("{}.icns", self.name)
    }
}

/// `base.name`, with whitespace removed from `name` and ASCII letters lowercased
pub fn make_identifier(base: &str, name: &str) -> String {
    let suffix: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("{}.{}", base, suffix)
}
