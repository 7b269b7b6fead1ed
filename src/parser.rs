//! Unified parser trait for transcript dialects.
//!
//! Every input file is handled by exactly one [`Parser`], selected by
//! [`Dialect`] (see [`detect`](crate::detect::detect) for how the dialect of a
//! file is chosen).
//!
//! # Example
//!
//! ```rust
//! use rpglog::import::ImportLog;
//! use rpglog::parser::{Dialect, create_parser};
//!
//! let parser = create_parser(Dialect::PlainText);
//! let mut log = ImportLog::disabled();
//! let doc = parser.parse_str("Hello\n\nWorld\n", &mut log).unwrap();
//! assert_eq!(doc.len(), 2);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Result;
use crate::import::ImportLog;

/// Supported transcript dialects.
///
/// Each dialect names a parsing strategy:
/// - [`Campfire`](Dialect::Campfire) - structural: whole-document HTML walked by role
/// - [`OpenRpg`](Dialect::OpenRpg) - line-oriented legacy markup, one rule match per line
/// - [`PlainText`](Dialect::PlainText) - one paragraph per non-blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Campfire web chat HTML transcript
    Campfire,

    /// OpenRPG HTML-ish log lines (three generations)
    #[serde(alias = "orpg")]
    OpenRpg,

    /// Plain text
    #[serde(alias = "text")]
    PlainText,
}

impl Dialect {
    /// Returns the short identifier of this dialect.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Campfire => "campfire",
            Dialect::OpenRpg => "openrpg",
            Dialect::PlainText => "plaintext",
        }
    }

    /// Returns all dialects.
    pub fn all() -> &'static [Dialect] {
        &[Dialect::Campfire, Dialect::OpenRpg, Dialect::PlainText]
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Campfire => write!(f, "Campfire transcript"),
            Dialect::OpenRpg => write!(f, "OpenRPG log"),
            Dialect::PlainText => write!(f, "plain text"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "campfire" => Ok(Dialect::Campfire),
            "openrpg" | "orpg" => Ok(Dialect::OpenRpg),
            "plaintext" | "text" | "txt" => Ok(Dialect::PlainText),
            _ => Err(format!(
                "Unknown dialect: '{}'. Expected one of: campfire, openrpg, plaintext",
                s
            )),
        }
    }
}

/// Trait implemented by every dialect parser.
///
/// Parsers never fail on content: lines or rows they cannot make sense of are
/// dropped and recorded in the [`ImportLog`]. Errors only come from reading
/// the file.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the dialect this parser handles.
    fn dialect(&self) -> Dialect;

    /// Parses transcript content held in memory.
    fn parse_str(&self, content: &str, log: &mut ImportLog) -> Result<Document>;

    /// Parses a transcript file.
    ///
    /// Legacy logs are not always valid UTF-8; invalid sequences are replaced
    /// rather than failing the whole file.
    fn parse(&self, path: &Path, log: &mut ImportLog) -> Result<Document> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        self.parse_str(&content, log)
    }
}

/// Creates a parser for the specified dialect.
///
/// # Example
///
/// ```rust
/// use rpglog::parser::{Dialect, create_parser};
///
/// let parser = create_parser(Dialect::OpenRpg);
/// assert_eq!(parser.name(), "OpenRPG");
/// ```
pub fn create_parser(dialect: Dialect) -> Box<dyn Parser> {
    match dialect {
        Dialect::Campfire => Box::new(crate::parsers::CampfireParser::new()),
        Dialect::OpenRpg => Box::new(crate::parsers::OpenRpgParser::new()),
        Dialect::PlainText => Box::new(crate::parsers::PlainTextParser::new()),
    }
}
