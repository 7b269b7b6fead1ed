//! OpenRPG log parser.
//!
//! OpenRPG logs are line-oriented: every line is matched against the ordered
//! rule table in [`crate::parsing::rules`]. Lines no rule accepts (page
//! headers, separators, system notices) are dropped.

use crate::document::Document;
use crate::error::Result;
use crate::import::ImportLog;
use crate::parser::{Dialect, Parser};
use crate::parsing::{LineOutcome, LineParser};

/// Parser for OpenRPG HTML-ish logs.
///
/// # Example
///
/// ```rust
/// use rpglog::import::ImportLog;
/// use rpglog::parser::Parser;
/// use rpglog::parsers::OpenRpgParser;
///
/// let parser = OpenRpgParser::new();
/// let log = "<html><body>\n<p><b>Alan</b>: Hi.</p>\n<p>** Alan waves. **</p>\n</body></html>";
/// let doc = parser.parse_str(log, &mut ImportLog::disabled())?;
/// assert_eq!(doc.len(), 2);
/// # Ok::<(), rpglog::RpglogError>(())
/// ```
pub struct OpenRpgParser {
    lines: LineParser,
}

impl OpenRpgParser {
    /// Creates a new parser with the full rule table compiled.
    pub fn new() -> Self {
        Self {
            lines: LineParser::new(),
        }
    }
}

impl Default for OpenRpgParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for OpenRpgParser {
    fn name(&self) -> &'static str {
        "OpenRPG"
    }

    fn dialect(&self) -> Dialect {
        Dialect::OpenRpg
    }

    fn parse_str(&self, content: &str, log: &mut ImportLog) -> Result<Document> {
        let mut entries = Vec::new();

        for raw in content.lines() {
            match self.lines.classify(raw) {
                LineOutcome::Parsed { rule, entry } => {
                    log.record(&format!("Parsing as {}: {}", rule, raw.trim()));
                    entries.push(entry);
                }
                LineOutcome::Rejected { rule } => {
                    log.skip(&format!(
                        "Matched {} but could not extract it, skipping: {}",
                        rule,
                        raw.trim()
                    ));
                }
                LineOutcome::Unrecognized => {
                    if !raw.trim().is_empty() {
                        log.skip(&format!("Skipping unrecognized line: {}", raw.trim()));
                    }
                }
            }
        }

        Ok(Document::from(entries))
    }
}
