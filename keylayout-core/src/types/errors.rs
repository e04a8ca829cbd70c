use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code used for every failure that is not backed by an OS error number.
pub const GENERIC_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum LayoutError {
    // Syntax errors in data and configuration files
    #[error("Missing numerical code")]
    MissingCode,

    #[error("Bad delimiter (expected space): `{0}'")]
    BadDelimiter(String),

    #[error("Key code too high: {0} (max is 127)")]
    KeyCodeTooHigh(u64),

    #[error("Unexpected end of line")]
    UnexpectedEndOfLine,

    #[error("Unexpected end of file")]
    UnexpectedEndOfFile,

    #[error("Truncated key list")]
    TruncatedKeyList,

    #[error("Missing `='")]
    MissingEquals,

    // Semantic errors
    #[error("Unknown character name `{0}'")]
    UnknownCharacterName(String),

    #[error("Unknown character `{0}'")]
    UnknownCharacter(String),

    #[error("Duplicate literal `{0}'")]
    DuplicateLiteral(String),

    #[error("Unknown configuration section `{0}' (expected `keyboard')")]
    UnknownSection(String),

    #[error("Unknown bundle configuration key `{0}'")]
    UnknownBundleKey(String),

    #[error("Unknown keyboard configuration key `{0}'")]
    UnknownKeyboardKey(String),

    #[error("Expected a boolean, `true' or `false', found `{0}'")]
    InvalidBoolean(String),

    #[error("Unknown capslock policy `{0}', expected `plain', `switch-im' or `disable'")]
    UnknownCapslockPolicy(String),

    #[error("Bundle configured without a name")]
    BundleWithoutName,

    #[error("Duplicate keylayout file name `{0}'")]
    DuplicateKeyboard(String),

    #[error("No datafile configured for {0} keyboard")]
    NoDatafile(String),

    #[error("No keyboards configured: {0}")]
    NoKeyboards(String),

    #[error("Unknown file: {0}")]
    UnknownDataFile(String),

    #[error("{} already exists", .0.display())]
    BundleExists(PathBuf),

    // Keymap invariants
    #[error("Shift state requested before the backup keymap was taken")]
    MissingBackup,

    #[error("Capslock keymap requested but capslock disables the layout")]
    CapslockDisabled,

    #[error("Capslock keymap requested but capslock is not active for this layout")]
    CapslockInactive,

    #[error("Key `{0}' has no single-press output to start a sequence from")]
    MissingBaseOutput(String),

    // System errors
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}: {context}")]
    Context {
        #[source]
        source: Box<LayoutError>,
        context: String,
    },
}

impl LayoutError {
    /// Wraps an IO error with a description of what was being attempted
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        LayoutError::Io {
            context: context.into(),
            source,
        }
    }

    /// Appends `context` to the message, e.g. `Unknown character `x': osxopt, line 3`
    pub fn context(self, context: impl fmt::Display) -> Self {
        LayoutError::Context {
            source: Box::new(self),
            context: context.to_string(),
        }
    }

    /// The error without any accumulated context
    pub fn root(&self) -> &LayoutError {
        match self {
            LayoutError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Process exit code: the OS error number for file-system failures, otherwise 1
    pub fn exit_code(&self) -> i32 {
        match self.root() {
            LayoutError::Io { source, .. } => source
                .raw_os_error()
                .filter(|code| *code != 0)
                .unwrap_or(GENERIC_EXIT_CODE),
            _ => GENERIC_EXIT_CODE,
        }
    }
}

/// Attaches context to the error side of a `Result`
pub trait ResultExt<T> {
    fn context<C: fmt::Display>(self, context: C) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|e| e.context(context))
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
