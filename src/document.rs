//! Canonical documents and their JSON persistence.
//!
//! A [`Document`] is the ordered list of entries recovered from one input
//! file. It is the interchange format between the import and export stages and
//! is persisted as a plain JSON array:
//!
//! ```json
//! [
//!   {"type": "statement", "player": "Alan", "content": "Hello there."},
//!   {"type": "emote", "content": "Alan waves."}
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryKind};
use crate::error::{Result, RpglogError};

/// An ordered, immutable sequence of entries.
///
/// Order is transcript order and survives import, JSON persistence and
/// export unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    entries: Vec<Entry>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entries in transcript order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the document holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in transcript order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Serializes the document as a JSON array.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parses a document from a JSON array.
    ///
    /// Every object's `type` tag is checked against [`EntryKind`] before the
    /// entry is decoded, so a foreign tag is reported as
    /// [`RpglogError::UnknownEntryType`] rather than a generic JSON error.
    ///
    /// ```
    /// use rpglog::Document;
    ///
    /// let err = Document::from_json(r#"[{"type": "whisper", "content": "psst"}]"#).unwrap_err();
    /// assert!(err.is_unknown_entry_type());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(raw.len());

        for (index, value) in raw.into_iter().enumerate() {
            let tag = value
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default();
            if tag.parse::<EntryKind>().is_err() {
                return Err(RpglogError::unknown_entry_type(tag, index));
            }
            entries.push(serde_json::from_value(value)?);
        }

        Ok(Self { entries })
    }

    /// Reads a document from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        fs::read_to_string(path)
            .map_err(RpglogError::from)
            .and_then(|json| Self::from_json(&json))
            .map_err(|e| e.in_file(path))
    }

    /// Writes the document to a JSON file, replacing any existing file.
    pub fn write(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl From<Vec<Entry>> for Document {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<Entry> for Document {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
