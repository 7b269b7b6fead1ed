//! Plain text transcript parser.

use crate::document::Document;
use crate::entry::Entry;
use crate::error::Result;
use crate::import::ImportLog;
use crate::parser::{Dialect, Parser};

/// Parser for `.txt` transcripts.
///
/// Every non-blank line becomes one [`Entry::Text`] paragraph, trimmed.
/// Paragraphs are not joined across lines.
pub struct PlainTextParser;

impl PlainTextParser {
    /// Creates a new plain text parser.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PlainTextParser {
    fn name(&self) -> &'static str {
        "Plain text"
    }

    fn dialect(&self) -> Dialect {
        Dialect::PlainText
    }

    fn parse_str(&self, content: &str, log: &mut ImportLog) -> Result<Document> {
        let doc: Document = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Entry::text)
            .collect();
        log.record(&format!("Split plain text into {} paragraphs", doc.len()));
        Ok(doc)
    }
}
