//! Parsing of INI-like property text into a [`Map`].
//!
//! The line format is deliberately small: empty lines and `#` comments are
//! ignored, everything else must be `key=value`. Keys carrying a
//! platform-conditional suffix (`key.macosx=...`) collapse onto the plain key
//! when the suffix matches the parser's platform, letting one file serve
//! several platforms.
//!
//! A [`Parser`] carries the platform suffix as explicit configuration, so
//! independent inputs parse deterministically and in parallel without shared
//! state:
//!
//! ```
//! # use proptree::parse::Parser;
//! let parser = Parser::new().with_platform_suffix("linux");
//! let map = parser.parse_lines([
//!     "# device definitions",
//!     "uno.name=Device Uno",
//!     "uno.upload.speed.linux=115200",
//!     "uno.upload.speed.windows=57600",
//! ])?;
//!
//! assert_eq!(map.get("uno.upload.speed"), Some("115200"));
//! assert_eq!(map.get("uno.upload.speed.windows"), Some("57600"));
//! # Ok::<(), proptree::parse::ParseError>(())
//! ```
//!
//! Parsing is all-or-nothing: the first malformed line aborts the whole batch
//! with its 0-based index, and no partial map is returned.

mod errors;

pub use errors::ParseError;

use std::path::Path;

use tracing::trace;

use crate::Map;

/// Line parser for INI-like property text.
///
/// Holds the platform-suffix marker used to collapse platform-conditional
/// keys. [`Parser::new`] derives the suffix from the current platform;
/// [`Parser::with_platform_suffix`] pins it explicitly, which also makes
/// parsing reproducible across hosts.
#[derive(Debug, Clone)]
pub struct Parser {
    platform_suffix: String,
}

impl Parser {
    /// Creates a parser with the current platform's suffix (`macosx` on
    /// macOS, the OS name otherwise).
    pub fn new() -> Self {
        Self {
            platform_suffix: default_platform_suffix().to_string(),
        }
    }

    /// Replaces the platform suffix used to collapse platform-conditional
    /// keys.
    pub fn with_platform_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.platform_suffix = suffix.into();
        self
    }

    /// The platform suffix this parser strips from keys.
    pub fn platform_suffix(&self) -> &str {
        &self.platform_suffix
    }

    /// Parses an ordered sequence of lines into a map.
    ///
    /// Insertion order follows line order; a duplicate key overwrites the
    /// earlier value and advances to the duplicate's position. The first line
    /// that is neither ignorable nor `key=value` aborts the batch with
    /// [`ParseError::MalformedLine`].
    pub fn parse_lines<I>(&self, lines: I) -> Result<Map, ParseError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut map = Map::new();
        for (number, line) in lines.into_iter().enumerate() {
            self.parse_line(&mut map, number, line.as_ref())?;
        }
        Ok(map)
    }

    /// Parses raw bytes into a map.
    ///
    /// Valid UTF-8 is taken as-is; anything else is assumed to be a legacy
    /// single-byte encoding and transcoded byte-for-byte (Latin-1). `\r\n`
    /// and bare `\r` line endings are normalized to `\n` before splitting.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Map, ParseError> {
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => latin1_to_string(bytes),
        };
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.parse_lines(text.split('\n'))
    }

    /// Reads and parses a properties file.
    pub fn load(&self, path: impl AsRef<Path>) -> crate::Result<Map> {
        let bytes = std::fs::read(path)?;
        Ok(self.parse_bytes(&bytes)?)
    }

    /// Like [`Parser::load`], except that a missing file yields an empty map
    /// instead of an error.
    pub fn safe_load(&self, path: impl AsRef<Path>) -> crate::Result<Map> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Map::new());
        }
        self.load(path)
    }

    fn parse_line(&self, map: &mut Map, number: usize, line: &str) -> Result<(), ParseError> {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ParseError::MalformedLine { line: number });
        };
        let mut key = key.trim();
        let value = value.trim();

        let suffix = format!(".{}", self.platform_suffix);
        if let Some(stripped) = key.strip_suffix(suffix.as_str()) {
            key = stripped;
        }

        trace!(key, value, "parsed property line");
        map.set(key, value);
        Ok(())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses lines with a default [`Parser`].
pub fn parse_lines<I>(lines: I) -> Result<Map, ParseError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Parser::new().parse_lines(lines)
}

/// Parses raw bytes with a default [`Parser`].
pub fn parse_bytes(bytes: &[u8]) -> Result<Map, ParseError> {
    Parser::new().parse_bytes(bytes)
}

/// Reads and parses a properties file with a default [`Parser`].
pub fn load(path: impl AsRef<Path>) -> crate::Result<Map> {
    Parser::new().load(path)
}

/// Like [`load`], except that a missing file yields an empty map.
pub fn safe_load(path: impl AsRef<Path>) -> crate::Result<Map> {
    Parser::new().safe_load(path)
}

fn default_platform_suffix() -> &'static str {
    match std::env::consts::OS {
        "macos" => "macosx",
        os => os,
    }
}

/// Decodes a legacy single-byte buffer: each byte becomes the Unicode code
/// point of equal value.
fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
