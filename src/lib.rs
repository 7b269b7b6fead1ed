//! # rpglog
//!
//! A Rust library for normalizing role-playing chat transcripts into one
//! canonical JSON model and rendering that model for reading.
//!
//! ## Overview
//!
//! Three historical transcript dialects are understood:
//! - **OpenRPG** — HTML-ish logs, one message per line, three generations of markup
//! - **Campfire** — whole-document HTML transcripts with author/body roles
//! - **Plain text** — one paragraph per line
//!
//! Every dialect is converted into a [`Document`]: an ordered list of
//! [`Entry`] values (`text`, `statement` or `emote`). Exporters then render
//! documents as plain text, linked HTML pages with an index, or a single
//! epub/mobi book.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rpglog::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     // Transcripts -> canonical JSON
//!     let report = Importer::new(ImportConfig::new().with_log_dir("logs"))
//!         .import_directory(Path::new("transcripts"), Path::new("json"))?;
//!     println!("{} entries imported", report.total_entries());
//!
//!     // Canonical JSON -> linked HTML pages
//!     HtmlExporter::new().export_directory(Path::new("json"), Path::new("html"))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing a Single Line
//!
//! ```rust
//! use rpglog::{Entry, parsing::parse_line};
//!
//! let line = "[Tuesday, 07:15 2021] : <B>(42) Alan</B>: <font color='#800040'>Hello there.</font><br>";
//! assert_eq!(parse_line(line), Some(Entry::statement("Alan", "Hello there.")));
//! ```
//!
//! ## Module Structure
//!
//! - [`entry`] / [`document`] — the canonical model and its JSON form
//! - [`detect`] — dialect detection by extension and content sniffing
//! - [`parser`] — the [`Parser`](parser::Parser) trait, [`Dialect`](parser::Dialect), [`create_parser`](parser::create_parser)
//! - [`parsers`] — [`OpenRpgParser`](parsers::OpenRpgParser), [`CampfireParser`](parsers::CampfireParser), [`PlainTextParser`](parsers::PlainTextParser)
//! - [`parsing`] — line rules and tag stripping
//! - [`import`] — directory import with per-file logs
//! - [`export`] — text, HTML and e-book exporters, templates, navigation links
//! - [`config`] — import/export configuration builders
//! - [`format`] — export format enum
//! - [`error`] — unified error type ([`RpglogError`], [`Result`])
//! - [`prelude`] — convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod detect;
pub mod document;
pub mod entry;
pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use document::Document;
pub use entry::{Entry, EntryKind};
pub use error::{Result, RpglogError};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use rpglog::prelude::*;
/// ```
pub mod prelude {
    // Canonical model
    pub use crate::{Document, Entry, EntryKind};

    // Error types
    pub use crate::error::{Result, RpglogError};

    // Import
    pub use crate::detect::detect;
    pub use crate::import::{FileSummary, ImportLog, ImportReport, Importer};
    pub use crate::parser::{Dialect, Parser, create_parser};

    // Export
    #[cfg(feature = "ebook")]
    pub use crate::export::{BookExporter, CommandConverter, Converter};
    pub use crate::export::{Exporter, HtmlExporter, TextExporter, collect_documents, links};

    // Configuration
    pub use crate::config::{BookConfig, ExportConfig, ImportConfig};
    pub use crate::format::{BookFormat, OutputFormat};
}
