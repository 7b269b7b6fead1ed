//! Campfire transcript parser.
//!
//! Campfire transcripts are whole HTML documents rather than one message per
//! line, so this parser walks the parsed tree instead of matching lines:
//!
//! ```html
//! <tr class="text_message message user_17" id="message_901">
//!   <td class="person"><span class="author">Alan</span></td>
//!   <td class="body"><div class="body">Hello there.</div></td>
//! </tr>
//! ```
//!
//! Each message row yields one [`Entry::Statement`](crate::Entry::Statement)
//! with the author span as player and the body div as content. Date
//! rows and other row kinds (enter/leave notices, uploads) are ignored.

use regex::Regex;
use scraper::{Html, Selector};

use crate::document::Document;
use crate::entry::Entry;
use crate::error::Result;
use crate::import::ImportLog;
use crate::parser::{Dialect, Parser};
use crate::parsing::markup::{inner_of, selector};

/// Class attribute prefix of message rows.
const MESSAGE_ROW_CLASS: &str = r"^text_message.+";

/// Parser for Campfire HTML transcripts.
pub struct CampfireParser {
    row_class: Regex,
    rows: Selector,
    author: Selector,
    body: Selector,
}

impl CampfireParser {
    /// Creates a new Campfire parser.
    pub fn new() -> Self {
        Self {
            row_class: Regex::new(MESSAGE_ROW_CLASS).unwrap(),
            rows: selector("tr[class]"),
            author: selector("span.author"),
            body: selector("div.body"),
        }
    }
}

impl Default for CampfireParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for CampfireParser {
    fn name(&self) -> &'static str {
        "Campfire"
    }

    fn dialect(&self) -> Dialect {
        Dialect::Campfire
    }

    fn parse_str(&self, content: &str, log: &mut ImportLog) -> Result<Document> {
        let html = Html::parse_document(content);
        let mut entries = Vec::new();

        let message_rows = html.select(&self.rows).filter(|row| {
            row.value()
                .attr("class")
                .is_some_and(|class| self.row_class.is_match(class))
        });

        for (index, row) in message_rows.enumerate() {
            let author = inner_of(row, &self.author).filter(|a| !a.is_empty());
            let body = inner_of(row, &self.body);

            match (author, body) {
                (Some(player), Some(content)) => {
                    log.record(&format!("Parsing message row #{} from {}", index, player));
                    entries.push(Entry::statement(player, content));
                }
                _ => {
                    log.skip(&format!(
                        "Skipping message row #{}: missing author or body",
                        index
                    ));
                }
            }
        }

        Ok(Document::from(entries))
    }
}
