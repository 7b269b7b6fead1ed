//! Configuration types for import and export runs.
//!
//! Plain builder structs without any CLI framework dependency:
//!
//! - [`ImportConfig`] - JSON layout and per-file import logs
//! - [`ExportConfig`] - HTML template overrides
//! - [`BookConfig`] - e-book title and external converter commands
//!
//! # Example
//!
//! ```rust
//! use rpglog::config::{ImportConfig, BookConfig};
//!
//! let import = ImportConfig::new()
//!     .with_log_dir("logs")
//!     .with_pretty(true);
//!
//! let book = BookConfig::new()
//!     .with_title("The Long Campaign")
//!     .with_epub_command("pandoc {input} -o {output}");
//! # assert!(import.pretty);
//! # assert_eq!(book.title.as_deref(), Some("The Long Campaign"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default command used to package the intermediate HTML as epub.
pub const DEFAULT_EPUB_COMMAND: &str = "ebook-convert {input} {output}";

/// Default command used to convert an epub into mobi.
pub const DEFAULT_MOBI_COMMAND: &str = "ebook-convert {input} {output}";

/// Configuration for importing transcripts into canonical JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Directory for per-file import logs (default: none, tracing only)
    pub log_dir: Option<PathBuf>,

    /// Pretty-print the JSON documents (default: false)
    pub pretty: bool,
}

impl ImportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one `<stem>.log` per input file into `dir`.
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Enables or disables pretty-printed JSON.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Configuration for HTML export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory holding `log_template.html` / `index_template.html` /
    /// `book_template.html` overrides (default: built-in templates)
    pub template_dir: Option<PathBuf>,
}

impl ExportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up template overrides in `dir`.
    #[must_use]
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Returns the override path for `file_name`, if a template directory is
    /// configured.
    pub fn template_path(&self, file_name: &str) -> Option<PathBuf> {
        self.template_dir.as_deref().map(|dir| dir.join(file_name))
    }
}

/// Configuration for e-book export.
///
/// Converter commands are split like a shell would split them; the
/// placeholders `{input}` and `{output}` are replaced by the source and
/// target paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookConfig {
    /// Book title (default: the output file stem)
    pub title: Option<String>,

    /// Command turning the intermediate HTML into an epub
    pub epub_command: String,

    /// Command turning the epub into a mobi
    pub mobi_command: String,

    /// HTML rendering options shared with the HTML exporter
    pub export: ExportConfig,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: None,
            epub_command: DEFAULT_EPUB_COMMAND.to_string(),
            mobi_command: DEFAULT_MOBI_COMMAND.to_string(),
            export: ExportConfig::default(),
        }
    }
}

impl BookConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the book title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the epub packaging command.
    #[must_use]
    pub fn with_epub_command(mut self, command: impl Into<String>) -> Self {
        self.epub_command = command.into();
        self
    }

    /// Sets the epub to mobi conversion command.
    #[must_use]
    pub fn with_mobi_command(mut self, command: impl Into<String>) -> Self {
        self.mobi_command = command.into();
        self
    }

    /// Sets the HTML rendering options.
    #[must_use]
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Returns the configured title, or the stem of `output`.
    pub fn title_for(&self, output: &Path) -> String {
        self.title.clone().unwrap_or_else(|| {
            output
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Log".to_string())
        })
    }
}
