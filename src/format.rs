//! Export format types.
//!
//! These types don't depend on the CLI framework, so library users can pick a
//! format from configuration files or their own argument parsing.
//!
//! # Example
//!
//! ```rust
//! use rpglog::format::{BookFormat, OutputFormat};
//! use std::str::FromStr;
//!
//! let format = OutputFormat::from_str("mobi").unwrap();
//! assert_eq!(format.book_format(), Some(BookFormat::Mobi));
//! assert!(!format.writes_directory());
//! ```

use serde::{Deserialize, Serialize};

/// Export format for canonical documents.
///
/// - [`Text`](OutputFormat::Text) - one plain `.txt` file per document, markup stripped
/// - [`Html`](OutputFormat::Html) - one templated page per document plus `index.html`
/// - [`Epub`](OutputFormat::Epub) / [`Mobi`](OutputFormat::Mobi) - all documents as one e-book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,

    /// Linked HTML pages
    Html,

    /// Single epub book
    Epub,

    /// Single mobi book
    Mobi,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use rpglog::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Text.extension(), "txt");
    /// assert_eq!(OutputFormat::Epub.extension(), "epub");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Html => "html",
            OutputFormat::Epub => "epub",
            OutputFormat::Mobi => "mobi",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "html", "epub", "mobi"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Text,
            OutputFormat::Html,
            OutputFormat::Epub,
            OutputFormat::Mobi,
        ]
    }

    /// Returns `true` if the export target is a directory of files rather
    /// than a single file.
    pub fn writes_directory(&self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Html)
    }

    /// Returns the book format for e-book outputs.
    pub fn book_format(&self) -> Option<BookFormat> {
        match self {
            OutputFormat::Epub => Some(BookFormat::Epub),
            OutputFormat::Mobi => Some(BookFormat::Mobi),
            OutputFormat::Text | OutputFormat::Html => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Html => write!(f, "HTML"),
            OutputFormat::Epub => write!(f, "EPUB"),
            OutputFormat::Mobi => write!(f, "MOBI"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "epub" => Ok(OutputFormat::Epub),
            "mobi" => Ok(OutputFormat::Mobi),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// E-book container produced by the book exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
    /// Packaged directly from the intermediate HTML
    Epub,

    /// Converted from an intermediate epub
    Mobi,
}

impl BookFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            BookFormat::Epub => "epub",
            BookFormat::Mobi => "mobi",
        }
    }
}

impl From<BookFormat> for OutputFormat {
    fn from(format: BookFormat) -> Self {
        match format {
            BookFormat::Epub => OutputFormat::Epub,
            BookFormat::Mobi => OutputFormat::Mobi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("txt").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("HTML").unwrap(), OutputFormat::Html);
        assert_eq!(OutputFormat::from_str("epub").unwrap(), OutputFormat::Epub);
        assert_eq!(OutputFormat::from_str("mobi").unwrap(), OutputFormat::Mobi);
        assert!(OutputFormat::from_str("pdf").is_err());
    }

    #[test]
    fn test_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_format_extension() {
        for format in OutputFormat::all() {
            assert_eq!(
                OutputFormat::from_str(format.extension()).unwrap(),
                *format
            );
        }
    }

    #[test]
    fn test_book_format() {
        assert_eq!(OutputFormat::Text.book_format(), None);
        assert_eq!(OutputFormat::Html.book_format(), None);
        assert_eq!(OutputFormat::Epub.book_format(), Some(BookFormat::Epub));
        assert_eq!(OutputFormat::from(BookFormat::Mobi), OutputFormat::Mobi);
        assert_eq!(BookFormat::Mobi.extension(), "mobi");
    }

    #[test]
    fn test_writes_directory() {
        assert!(OutputFormat::Text.writes_directory());
        assert!(OutputFormat::Html.writes_directory());
        assert!(!OutputFormat::Epub.writes_directory());
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Html).unwrap();
        assert_eq!(json, "\"html\"");
        let parsed: OutputFormat = serde_json::from_str("\"mobi\"").unwrap();
        assert_eq!(parsed, OutputFormat::Mobi);
    }
}
