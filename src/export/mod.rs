//! Exporters: canonical JSON documents in, readable artifacts out.
//!
//! | Exporter | Output | Markup |
//! |----------|--------|--------|
//! | [`TextExporter`] | one `.txt` per document | stripped |
//! | [`HtmlExporter`] | one linked `.html` per document + `index.html` | kept |
//! | [`BookExporter`] | one `.epub` / `.mobi` for all documents | kept |
//!
//! All of them share the per-entry dispatch of the [`Exporter`] trait and
//! read their input through [`collect_documents`], so a corrupted document
//! stops the export before anything is written.

#[cfg(feature = "ebook")]
pub mod book;
pub mod html;
pub mod links;
pub mod template;
pub mod text;

#[cfg(feature = "ebook")]
pub use book::{BookExporter, CommandConverter, Converter};
pub use html::HtmlExporter;
pub use links::{Link, links};
pub use template::Template;
pub use text::TextExporter;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::Document;
use crate::entry::Entry;
use crate::error::Result;

/// Renders canonical entries into one output line each.
///
/// Implementors provide one renderer per entry type; [`output_entry`]
/// dispatches on the type tag. The entry model is closed, so every entry that
/// made it through [`Document::from_json`] has a renderer.
///
/// [`output_entry`]: Exporter::output_entry
pub trait Exporter {
    /// Renders a narration paragraph.
    fn render_text(&self, content: &str) -> String;

    /// Renders a line spoken by `player`.
    fn render_statement(&self, player: &str, content: &str) -> String;

    /// Renders an action description.
    fn render_emote(&self, content: &str) -> String;

    /// Renders one entry with the renderer for its type.
    fn output_entry(&self, entry: &Entry) -> String {
        match entry {
            Entry::Text { content } => self.render_text(content),
            Entry::Statement { player, content } => self.render_statement(player, content),
            Entry::Emote { content } => self.render_emote(content),
        }
    }

    /// Renders every entry of a document, in order.
    fn render_entries(&self, document: &Document) -> Vec<String> {
        document.iter().map(|entry| self.output_entry(entry)).collect()
    }
}

/// A canonical document read from an input directory.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// The JSON file it was read from
    pub path: PathBuf,
    /// File name without the `.json` extension
    pub stem: String,
    /// The parsed document
    pub document: Document,
}

impl SourceDocument {
    /// Returns the output file name for this document with extension `ext`.
    pub fn output_name(&self, ext: &str) -> String {
        format!("{}.{}", self.stem, ext)
    }
}

/// Reads every `*.json` document of `input_dir`, sorted by file name.
///
/// Fails on the first unreadable document, so callers never write partial
/// output from a corrupted input set.
pub fn collect_documents(input_dir: &Path) -> Result<Vec<SourceDocument>> {
    crate::import::check_input_dir(input_dir)?;

    let mut paths = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let document = Document::read(&path)?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            debug!("Read {} ({} entries)", path.display(), document.len());
            Ok(SourceDocument {
                path,
                stem,
                document,
            })
        })
        .collect()
}
