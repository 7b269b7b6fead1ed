//! Unified error types for rpglog.
//!
//! A single [`RpglogError`] enum covers every failure in the library, so that
//! callers can tell configuration problems (reported before any file is
//! touched) apart from per-file I/O failures and from corrupted canonical
//! documents.
//!
//! Unrecognized transcript lines are *not* errors: the importer drops them and
//! records them in the per-file log.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for rpglog operations.
///
/// # Example
///
/// ```rust
/// use rpglog::error::Result;
/// use rpglog::Document;
///
/// fn load() -> Result<Document> {
///     Document::from_json("[]")
/// }
/// # assert!(load().unwrap().is_empty());
/// ```
pub type Result<T> = std::result::Result<T, RpglogError>;

/// The error type for all rpglog operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RpglogError {
    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A canonical document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A path given to an import or export run is unusable.
    ///
    /// This happens when:
    /// - The input directory doesn't exist or isn't a directory
    /// - The output path exists but is not a directory
    #[error("Configuration error for {}: {message}", path.display())]
    Config {
        /// The offending path
        path: PathBuf,
        /// Description of what's wrong
        message: String,
    },

    /// A canonical document contains an entry whose `type` tag is not
    /// `text`, `statement` or `emote`.
    ///
    /// The entry model is closed, so this means the JSON was corrupted or was
    /// written by an incompatible version.
    #[error("No handler for entry type '{entry_type}' (entry #{index}){}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    UnknownEntryType {
        /// The unrecognized tag
        entry_type: String,
        /// Position of the entry in the document
        index: usize,
        /// The document file, if known
        path: Option<PathBuf>,
    },

    /// Navigation links were requested for an empty document list.
    #[error("Cannot build navigation links for an empty document list")]
    EmptyNavigation,

    /// A line template could not be loaded.
    #[error("Template error in {}: {message}", path.display())]
    Template {
        /// The template file
        path: PathBuf,
        /// Description of what's wrong
        message: String,
    },

    /// The external e-book converter failed.
    #[error("Converter '{command}' failed: {message}")]
    Converter {
        /// The command line that was run
        command: String,
        /// Exit status or spawn failure
        message: String,
    },

    /// A failure while processing a single file, tagged with its path.
    #[error("{}: {source}", path.display())]
    File {
        /// The file being processed
        path: PathBuf,
        /// The underlying error
        #[source]
        source: Box<RpglogError>,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl RpglogError {
    /// Creates a configuration error for a path that must be a directory.
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        RpglogError::Config {
            path: path.into(),
            message: "exists but is not a directory".to_string(),
        }
    }

    /// Creates a configuration error for a missing input directory.
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        RpglogError::Config {
            path: path.into(),
            message: "input directory does not exist".to_string(),
        }
    }

    /// Creates an unknown entry type error.
    pub fn unknown_entry_type(entry_type: impl Into<String>, index: usize) -> Self {
        RpglogError::UnknownEntryType {
            entry_type: entry_type.into(),
            index,
            path: None,
        }
    }

    /// Creates a converter error.
    pub fn converter(command: impl Into<String>, message: impl Into<String>) -> Self {
        RpglogError::Converter {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a template error.
    pub fn template(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RpglogError::Template {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attaches the file being processed to this error.
    ///
    /// Unknown entry type errors record the path in place; everything else is
    /// wrapped in [`RpglogError::File`].
    #[must_use]
    pub fn in_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            RpglogError::UnknownEntryType {
                entry_type, index, ..
            } => RpglogError::UnknownEntryType {
                entry_type,
                index,
                path: Some(file.into()),
            },
            RpglogError::File { .. } => self,
            other => RpglogError::File {
                path: file.into(),
                source: Box::new(other),
            },
        }
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, RpglogError::Config { .. })
    }

    /// Returns `true` if this is an IO error, directly or for a specific file.
    pub fn is_io(&self) -> bool {
        match self {
            RpglogError::Io(_) => true,
            RpglogError::File { source, .. } => source.is_io(),
            _ => false,
        }
    }

    /// Returns `true` if this is an unknown entry type error.
    pub fn is_unknown_entry_type(&self) -> bool {
        matches!(self, RpglogError::UnknownEntryType { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = RpglogError::from(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_not_a_directory_display() {
        let err = RpglogError::not_a_directory("/tmp/out.json");
        assert!(err.is_config());
        assert!(err.to_string().contains("/tmp/out.json"));
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_unknown_entry_type_display() {
        let err = RpglogError::unknown_entry_type("whisper", 3);
        let display = err.to_string();
        assert!(display.contains("whisper"));
        assert!(display.contains("#3"));
        assert!(!display.contains(" in "));
    }

    #[test]
    fn test_in_file_keeps_entry_type_variant() {
        let err = RpglogError::unknown_entry_type("whisper", 0).in_file("logs/a.json");
        assert!(err.is_unknown_entry_type());
        assert!(err.to_string().contains("logs/a.json"));
    }

    #[test]
    fn test_in_file_wraps_io() {
        let err = RpglogError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            .in_file("logs/a.html");
        assert!(matches!(err, RpglogError::File { .. }));
        assert!(err.is_io());
        assert!(err.to_string().starts_with("logs/a.html"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let err = RpglogError::from(io::Error::other("boom")).in_file("x.txt");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_converter_display() {
        let err = RpglogError::converter("ebook-convert a b", "exit status: 1");
        assert!(err.to_string().contains("ebook-convert a b"));
        assert!(err.to_string().contains("exit status: 1"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: RpglogError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_empty_navigation_display() {
        assert!(RpglogError::EmptyNavigation.to_string().contains("empty"));
    }
}
