//! Plain text export.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{Exporter, collect_documents};
use crate::document::Document;
use crate::error::{Result, RpglogError};
use crate::format::OutputFormat;
use crate::import::prepare_dir;
use crate::parsing::strip_tags;

/// Line separator of generated text files.
pub const LINE_SEPARATOR: &str = "\n";

/// Writes documents as UTF-8 text with all markup stripped.
///
/// ```
/// use rpglog::export::TextExporter;
/// use rpglog::{Document, Entry};
///
/// let doc = Document::from(vec![
///     Entry::statement("Alan", "<i>Hi</i>"),
///     Entry::emote("Alan waves."),
/// ]);
/// assert_eq!(TextExporter::new().render_document(&doc), "Alan: Hi\nAlan waves.\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl TextExporter {
    /// Creates a text exporter.
    pub fn new() -> Self {
        Self
    }

    /// Renders a whole document; the result always ends with a newline.
    pub fn render_document(&self, document: &Document) -> String {
        let mut text = self.render_entries(document).join(LINE_SEPARATOR);
        text.push_str(LINE_SEPARATOR);
        text
    }

    /// Exports every document of `input_dir` as `<stem>.txt` into
    /// `output_dir` and returns the written paths.
    pub fn export_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let documents = collect_documents(input_dir)?;
        prepare_dir(output_dir)?;

        let mut written = Vec::with_capacity(documents.len());
        for source in &documents {
            let path = output_dir.join(source.output_name(OutputFormat::Text.extension()));
            fs::write(&path, self.render_document(&source.document))
                .map_err(|e| RpglogError::from(e).in_file(&path))?;
            written.push(path);
        }

        info!(
            "Exported {} text files to {}",
            written.len(),
            output_dir.display()
        );
        Ok(written)
    }
}

impl Exporter for TextExporter {
    fn render_text(&self, content: &str) -> String {
        strip_tags(content)
    }

    fn render_statement(&self, player: &str, content: &str) -> String {
        format!("{}: {}", player, strip_tags(content))
    }

    fn render_emote(&self, content: &str) -> String {
        strip_tags(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entry;
    use tempfile::tempdir;

    #[test]
    fn test_statement_line() {
        let doc = Document::from_json(r#"[{"type":"statement","player":"Alan","content":"Hi"}]"#)
            .unwrap();
        assert_eq!(TextExporter::new().render_document(&doc), "Alan: Hi\n");
    }

    #[test]
    fn test_empty_document_is_single_newline() {
        assert_eq!(TextExporter::new().render_document(&Document::new()), "\n");
    }

    #[test]
    fn test_markup_stripped_and_entities_decoded() {
        let doc = Document::from(vec![Entry::text("<b>Fish</b> &amp; chips")]);
        assert_eq!(TextExporter::new().render_document(&doc), "Fish & chips\n");
    }

    #[test]
    fn test_export_directory() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(
            input.path().join("one.json"),
            r#"[{"type":"text","content":"Night falls."},{"type":"emote","content":"Bea yawns."}]"#,
        )
        .unwrap();
        fs::write(input.path().join("two.json"), "[]").unwrap();

        let out_dir = output.path().join("text");
        let written = TextExporter::new()
            .export_directory(input.path(), &out_dir)
            .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(out_dir.join("one.txt")).unwrap(),
            "Night falls.\nBea yawns.\n"
        );
        assert_eq!(fs::read_to_string(out_dir.join("two.txt")).unwrap(), "\n");
    }

    #[test]
    fn test_corrupted_document_writes_nothing() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(input.path().join("a.json"), "[]").unwrap();
        fs::write(
            input.path().join("b.json"),
            r#"[{"type":"ooc","content":"brb"}]"#,
        )
        .unwrap();

        let out_dir = output.path().join("text");
        let err = TextExporter::new()
            .export_directory(input.path(), &out_dir)
            .unwrap_err();
        assert!(err.is_unknown_entry_type());
        assert!(!out_dir.exists());
    }
}
