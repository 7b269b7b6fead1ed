//! Canonical log entry type shared by every dialect.
//!
//! All importers convert their native line formats into [`Entry`], and all
//! exporters consume it. The set of entry kinds is closed: a JSON object with
//! any other `type` tag is rejected when a document is read (see
//! [`Document::from_json`](crate::Document::from_json)).
//!
//! # Examples
//!
//! ```
//! use rpglog::Entry;
//!
//! let entry = Entry::statement("Alan", "Hello there.");
//! assert_eq!(entry.player(), Some("Alan"));
//! assert_eq!(entry.content(), "Hello there.");
//!
//! let json = serde_json::to_string(&entry)?;
//! assert_eq!(json, r#"{"type":"statement","player":"Alan","content":"Hello there."}"#);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// One canonical transcript record.
///
/// `content` may still carry inline markup such as `<i>` or `<b>`; turning it
/// into plain text is left to the exporters.
///
/// | Variant | JSON `type` | Fields |
/// |---------|-------------|--------|
/// | [`Text`](Entry::Text) | `"text"` | `content` |
/// | [`Statement`](Entry::Statement) | `"statement"` | `player`, `content` |
/// | [`Emote`](Entry::Emote) | `"emote"` | `content` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    /// A bare paragraph with no speaker.
    Text {
        /// Paragraph content.
        content: String,
    },

    /// An utterance attributed to a player.
    Statement {
        /// Name of the speaking player. Never empty.
        player: String,
        /// What was said.
        content: String,
    },

    /// A third-person action line.
    ///
    /// Any speaker id embedded in the original line has already been removed.
    Emote {
        /// The action text.
        content: String,
    },
}

impl Entry {
    /// Creates a [`Entry::Text`].
    pub fn text(content: impl Into<String>) -> Self {
        Entry::Text {
            content: content.into(),
        }
    }

    /// Creates a [`Entry::Statement`].
    pub fn statement(player: impl Into<String>, content: impl Into<String>) -> Self {
        Entry::Statement {
            player: player.into(),
            content: content.into(),
        }
    }

    /// Creates a [`Entry::Emote`].
    pub fn emote(content: impl Into<String>) -> Self {
        Entry::Emote {
            content: content.into(),
        }
    }

    /// Returns the kind tag of this entry.
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Text { .. } => EntryKind::Text,
            Entry::Statement { .. } => EntryKind::Statement,
            Entry::Emote { .. } => EntryKind::Emote,
        }
    }

    /// Returns the (possibly markup-bearing) content.
    pub fn content(&self) -> &str {
        match self {
            Entry::Text { content } | Entry::Statement { content, .. } | Entry::Emote { content } => {
                content
            }
        }
    }

    /// Returns the speaking player, for statements.
    pub fn player(&self) -> Option<&str> {
        match self {
            Entry::Statement { player, .. } => Some(player),
            Entry::Text { .. } | Entry::Emote { .. } => None,
        }
    }
}

/// The closed set of entry type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// `"text"`
    Text,
    /// `"statement"`
    Statement,
    /// `"emote"`
    Emote,
}

impl EntryKind {
    /// Returns the JSON tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Text => "text",
            EntryKind::Statement => "statement",
            EntryKind::Emote => "emote",
        }
    }

    /// Returns all entry kinds.
    pub fn all() -> &'static [EntryKind] {
        &[EntryKind::Text, EntryKind::Statement, EntryKind::Emote]
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown entry type: '{}'", s))
    }
}
