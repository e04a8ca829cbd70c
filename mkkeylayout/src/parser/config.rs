//! Bundle configuration files
//!
//! ```text
//! # settings before the first section describe the bundle
//! name = Burmese
//! baseurl = org.example
//!
//! [keyboard]
//! name = Burmese Phonetic
//! datafile = phonetic.map
//! osxopt = true
//! ```

use super::ast::*;
use crate::lexer::{ConfigToken, Lexer, Setting};
use keylayout_core::{CapslockPolicy, LayoutError, Result, ResultExt, SourceLocation};
use std::path::PathBuf;

pub fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LayoutError::InvalidBoolean(value.to_string())),
    }
}

pub fn parse_capslock_policy(value: &str) -> Result<CapslockPolicy> {
    match value {
        "plain" => Ok(CapslockPolicy::Plain),
        "switch-im" => Ok(CapslockPolicy::SwitchesInputMode),
        "disable" => Ok(CapslockPolicy::Disables),
        _ => Err(LayoutError::UnknownCapslockPolicy(value.to_string())),
    }
}

/// Settings seen before the first `[keyboard]` section
#[derive(Debug, Default)]
struct BundleSection {
    name: Option<String>,
    base_url: Option<String>,
    version: Option<String>,
}

impl BundleSection {
    fn set(&mut self, setting: Setting) -> Result<()> {
        let Setting { key, value } = setting;
        match key.as_str() {
            "name" => self.name = Some(value),
            "baseurl" => self.base_url = Some(value),
            "version" => self.version = Some(value),
            _ => return Err(LayoutError::UnknownBundleKey(key)),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<BundleConfig> {
        let name = self.name.take().ok_or(LayoutError::BundleWithoutName)?;
        let base_url = match self.base_url.take() {
            Some(url) => format!("{}.keyboardlayout", url),
            None => DEFAULT_BASE_URL.to_string(),
        };
        let identifier = make_identifier(&base_url, &name);

        Ok(BundleConfig {
            name,
            base_url,
            identifier,
            version: self.version.take().unwrap_or_default(),
            keyboards: Vec::new(),
        })
    }
}

#[derive(Debug, Default)]
struct KeyboardSection {
    name: Option<String>,
    language: Option<String>,
    base_encoding: Option<String>,
    osxopt: bool,
    datafiles: Vec<String>,
    capslock_policy: CapslockPolicy,
    icons: Option<PathBuf>,
}

impl KeyboardSection {
    fn set(&mut self, setting: Setting) -> Result<()> {
        let Setting { key, value } = setting;
        match key.as_str() {
            "name" => self.name = Some(value),
            "language" => self.language = Some(value),
            "base-encoding" => self.base_encoding = Some(value),
            "osxopt" => self.osxopt = parse_bool(&value)?,
            "datafile" => self.datafiles.push(value),
            "capslock-policy" => self.capslock_policy = parse_capslock_policy(&value)?,
            "icons" => self.icons = Some(PathBuf::from(value)),
            _ => return Err(LayoutError::UnknownKeyboardKey(key)),
        }
        Ok(())
    }

    fn finish(self, bundle: &BundleConfig) -> Result<KeyboardConfig> {
        let name = self.name.unwrap_or_else(|| bundle.name.clone());
        if bundle.keyboards.iter().any(|kb| kb.name == name) {
            return Err(LayoutError::DuplicateKeyboard(name));
        }
        if self.datafiles.is_empty() {
            return Err(LayoutError::NoDatafile(name));
        }

        // "Burmese Phonetic" in bundle "Burmese" becomes <bundle id>.phonetic
        let suffix = match name.strip_prefix(bundle.name.as_str()) {
            Some(rest) if !rest.is_empty() => rest,
            _ => name.as_str(),
        };
        let identifier = make_identifier(&bundle.identifier, suffix);

        Ok(KeyboardConfig {
            identifier,
            language: self.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            base_encoding: self
                .base_encoding
                .unwrap_or_else(|| DEFAULT_BASE_ENCODING.to_string()),
            osxopt: self.osxopt,
            datafiles: self.datafiles,
            capslock_policy: self.capslock_policy,
            icons: self.icons,
            name,
        })
    }
}

struct ConfigParser<'a> {
    lexer: Lexer<'a, ConfigToken>,
    source: &'a str,
    bundle: BundleSection,
    /// Set once the first `[keyboard]` header closes the bundle section
    config: Option<BundleConfig>,
    keyboard: Option<KeyboardSection>,
}

impl<'a> ConfigParser<'a> {
    fn new(source: &'a str, input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            source,
            bundle: BundleSection::default(),
            config: None,
            keyboard: None,
        }
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.source, self.lexer.current_line())
    }

    fn parse(mut self) -> Result<BundleConfig> {
        loop {
            let token = self.lexer.next_token().context(self.location())?;
            match token {
                None => break,
                Some(ConfigToken::Newline) | Some(ConfigToken::Comment) => {}
                Some(ConfigToken::Section(name)) => self.start_section(name).context(self.location())?,
                Some(ConfigToken::Assignment(setting)) => {
                    let result = match self.keyboard.as_mut() {
                        Some(keyboard) => keyboard.set(setting),
                        None => self.bundle.set(setting),
                    };
                    result.context(self.location())?;
                }
            }
        }

        let location = self.location();
        match (self.config, self.keyboard) {
            (Some(mut config), Some(keyboard)) => {
                let keyboard = keyboard.finish(&config).context(location)?;
                config.keyboards.push(keyboard);
                Ok(config)
            }
            _ => Err(LayoutError::NoKeyboards(self.source.to_string())),
        }
    }

    fn start_section(&mut self, name: String) -> Result<()> {
        if name != "keyboard" {
            return Err(LayoutError::UnknownSection(name));
        }

        let mut config = match self.config.take() {
            Some(config) => config,
            None => self.bundle.finish()?,
        };
        if let Some(keyboard) = self.keyboard.take() {
            let keyboard = keyboard.finish(&config)?;
            log::trace!("Configured keyboard {} ({})", keyboard.name, keyboard.identifier);
            config.keyboards.push(keyboard);
        }

        self.config = Some(config);
        self.keyboard = Some(KeyboardSection::default());
        Ok(())
    }
}

/// Parses a configuration file; `source` names it in error messages
pub fn parse_config(source: &str, input: &str) -> Result<BundleConfig> {
    let config = ConfigParser::new(source, input).parse()?;
    log::debug!(
        "Bundle {} ({}) with {} keyboards",
        config.name,
        config.identifier,
        config.keyboards.len()
    );
    Ok(config)
}
