use keylayout_core::LayoutError;
use logos::Logos;

/// Tokens marking the end of a line, so [`super::Lexer`] can count lines
pub trait LineToken {
    fn is_newline(&self) -> bool;

    /// Error for input no token pattern matches
    fn invalid(text: &str) -> LayoutError;
}

/// Tokens of base-encoding and mapping files
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum DataToken {
    // Whitespace other than newline (skipped)
    #[regex(r"[ \t\r\x0B\x0C]+", logos::skip)]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"[^ \t\r\n\x0B\x0C]+", |lex| lex.slice().to_string())]
    Word(String),
}

impl LineToken for DataToken {
    fn is_newline(&self) -> bool {
        matches!(self, DataToken::Newline)
    }

    fn invalid(text: &str) -> LayoutError {
        LayoutError::BadDelimiter(text.to_string())
    }
}

/// A `key = value` line of the configuration file, both sides trimmed
#[derive(Debug, PartialEq, Clone)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

impl Setting {
    fn parse(line: &str) -> Option<Setting> {
        let (key, value) = line.split_once('=')?;
        Some(Setting {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Tokens of the bundle configuration file
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum ConfigToken {
    // Comments and whitespace (skipped)
    #[regex(r"#[^\n]*", logos::skip)]
    #[regex(r"[ \t\r\x0B\x0C]+", logos::skip)]
    Comment,

    #[token("\n")]
    Newline,

    // [name]
    #[regex(r"\[[^\]\n]*\]", |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].trim().to_string()
    })]
    Section(String),

    // key = value, where the value runs to the end of the line
    #[regex(r"[^ \t\r\n\x0B\x0C#\[=][^=\n]*=[^\n]*", |lex| Setting::parse(lex.slice()))]
    Assignment(Setting),
}

impl LineToken for ConfigToken {
    fn is_newline(&self) -> bool {
        matches!(self, ConfigToken::Newline)
    }

    fn invalid(_text: &str) -> LayoutError {
        LayoutError::MissingEquals
    }
}
