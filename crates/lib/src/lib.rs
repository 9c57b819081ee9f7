//!
//! Proptree: insertion-ordered hierarchical property maps.
//! This library handles configuration data made of key/value pairs stored in
//! files with an INI-like syntax, for example:
//!
//! ```text
//! uno.name=Device Uno
//! uno.upload.tool=flasher
//! uno.upload.protocol=serial
//! uno.upload.speed=115200
//! duo.name=Device Duo
//! duo.upload.tool=flasher
//! duo.upload.speed=57600
//! ```
//!
//! ## Core Concepts
//!
//! * **Maps (`map::Map`)**: The central data structure, a key/value mapping that
//!   remembers the insertion order of its keys. Keys use `.` as a hierarchy
//!   separator, interpreted on demand; a key may simultaneously hold a value and
//!   act as the prefix of deeper keys.
//! * **Hierarchical extraction**: `Map::sub_tree`, `Map::first_level_of` and the
//!   `extract_sub_index_*` family carve sub-maps and numbered series out of the
//!   flat key space.
//! * **Placeholder expansion**: `Map::expand_props_in_string` resolves `{key}`
//!   markers against the map itself, recursively up to a fixed pass limit, so
//!   maps can describe command-line recipes in terms of their own entries.
//! * **Parsing (`parse::Parser`)**: Turns raw INI-like text into a `Map`,
//!   including platform-conditional key suffixes and legacy encoding fallback.
//! * **Tokenizing (`tokenize::split_quoted`)**: Splits expanded recipe strings
//!   into argument vectors while honoring quoted substrings.

pub mod map;
pub mod parse;
pub mod tokenize;

/// Re-export the `Map` struct for easier access.
pub use map::Map;

/// Result type used throughout the proptree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the proptree library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structured parse errors from the parse module
    #[error(transparent)]
    Parse(parse::ParseError),

    /// Structured tokenizer errors from the tokenize module
    #[error(transparent)]
    Tokenize(tokenize::UnterminatedQuote),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Parse(_) => "parse",
            Error::Tokenize(_) => "tokenize",
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this error was raised by a malformed property line.
    pub fn is_malformed_line(&self) -> bool {
        match self {
            Error::Parse(parse_err) => parse_err.is_malformed_line(),
            _ => false,
        }
    }

    /// Check if this error was raised by an unclosed quote while tokenizing.
    pub fn is_unterminated_quote(&self) -> bool {
        matches!(self, Error::Tokenize(_))
    }
}
