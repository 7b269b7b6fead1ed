//! Ordered dialect rules for OpenRPG log lines.
//!
//! OpenRPG wrote its logs as one HTML-ish snippet per line, and the snippet
//! format changed twice over the client's lifetime. Each generation is a
//! [`Rule`]: a recognition pattern plus an extractor that projects speaker and
//! body out of the parsed fragment.
//!
//! Supported lines (timestamps like `[Tuesday, 07:15 2021] : ` are optional):
//! - v1 statement: `<B>(123) Alan</B>: <font color='#800040'>Example.</font><br>`
//! - v2 statement: `<B>Alan</B>: <font color='#800040'>Example.</font><br>`
//! - v3 statement: `<p><b>Alan</b>: Example.</p>`
//! - v1 emote: `<font color='#800040'>** (123) Alan waves. **</font><br>`
//! - v2 emote: `<font color='#800040'>** Alan waves. **</font><br>`
//! - v3 emote: `<p>** Alan waves. **</p>`

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::markup::{first, fragment, selector};
use crate::entry::Entry;

/// Leading timestamp written by OpenRPG.
pub const TIMESTAMP_PATTERN: &str = r"^\[.+\d{4}\] : ";

/// One historical OpenRPG line format.
///
/// [`Rule::all`] returns the rules in matching priority: earlier, more
/// specific formats first. The first rule whose pattern matches a line owns
/// it, even if its extractor then rejects the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Bold speaker with a numeric player id, followed by a colored font span.
    StatementV1,
    /// Bold speaker without id, followed by a colored font span.
    StatementV2,
    /// Paragraph-wrapped statement, no font span.
    StatementV3,
    /// Colored font emote carrying a numeric player id.
    EmoteV1,
    /// Colored font emote.
    EmoteV2,
    /// Paragraph-wrapped emote.
    EmoteV3,
}

impl Rule {
    /// Returns all rules in priority order.
    pub fn all() -> &'static [Rule] {
        &[
            Rule::StatementV1,
            Rule::StatementV2,
            Rule::StatementV3,
            Rule::EmoteV1,
            Rule::EmoteV2,
            Rule::EmoteV3,
        ]
    }

    /// Returns the recognition pattern for this rule.
    pub fn pattern(self) -> &'static str {
        match self {
            Rule::StatementV1 => r"^<[Bb]>\(\d+\) (.+)</[Bb]>: <font",
            Rule::StatementV2 => r"^<[Bb]>(.+)</[Bb]>: <font",
            Rule::StatementV3 => r"^<p><b>(.+)</b>: ",
            Rule::EmoteV1 => r"^<font color='#\d{6}'>\*{2} \(\d+\) ",
            Rule::EmoteV2 => r"^<font color='#\d{6}'>\*{2}",
            Rule::EmoteV3 => r"^<p>\*{2} ",
        }
    }

    /// Returns a short human-readable name, e.g. `"v1 statement"`.
    pub fn name(self) -> &'static str {
        match self {
            Rule::StatementV1 => "v1 statement",
            Rule::StatementV2 => "v2 statement",
            Rule::StatementV3 => "v3 statement",
            Rule::EmoteV1 => "v1 emote",
            Rule::EmoteV2 => "v2 emote",
            Rule::EmoteV3 => "v3 emote",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened to one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// A rule matched and produced an entry.
    Parsed {
        /// The winning rule
        rule: Rule,
        /// The extracted entry
        entry: Entry,
    },
    /// A rule matched, but the line lacked the structure its extractor needs.
    Rejected {
        /// The winning rule
        rule: Rule,
    },
    /// No rule matched.
    Unrecognized,
}

impl LineOutcome {
    /// Returns the entry, if one was produced.
    pub fn into_entry(self) -> Option<Entry> {
        match self {
            LineOutcome::Parsed { entry, .. } => Some(entry),
            LineOutcome::Rejected { .. } | LineOutcome::Unrecognized => None,
        }
    }
}

/// Compiled rule table plus the selectors the extractors need.
///
/// Build one per import run and reuse it for every line.
pub struct LineParser {
    timestamp: Regex,
    rules: Vec<(Rule, Regex)>,
    player_id: Regex,
    emote_with_id: Regex,
    emote_body: Regex,
    bold: Selector,
    font: Selector,
    paragraph: Selector,
}

impl LineParser {
    /// Compiles the rule table.
    pub fn new() -> Self {
        Self {
            timestamp: Regex::new(TIMESTAMP_PATTERN).unwrap(),
            rules: Rule::all()
                .iter()
                .map(|&rule| (rule, Regex::new(rule.pattern()).unwrap()))
                .collect(),
            player_id: Regex::new(r"^\(\d+\) ").unwrap(),
            emote_with_id: Regex::new(r"^\*{2} \(\d+\) (.+) \*{2}").unwrap(),
            emote_body: Regex::new(r"^\*{2} (.+) \*{2}").unwrap(),
            bold: selector("b"),
            font: selector("font"),
            paragraph: selector("p"),
        }
    }

    /// Removes a leading OpenRPG timestamp, if present.
    ///
    /// ```
    /// use rpglog::parsing::LineParser;
    ///
    /// let parser = LineParser::new();
    /// assert_eq!(parser.strip_timestamp("[Tue, 07:15 2021] : <p>x</p>"), "<p>x</p>");
    /// assert_eq!(parser.strip_timestamp("<p>x</p>"), "<p>x</p>");
    /// ```
    pub fn strip_timestamp<'a>(&self, line: &'a str) -> &'a str {
        match self.timestamp.find(line) {
            Some(m) => &line[m.end()..],
            None => line,
        }
    }

    /// Trims a raw line and strips its timestamp.
    pub fn prepare<'a>(&self, raw: &'a str) -> &'a str {
        self.strip_timestamp(raw.trim()).trim()
    }

    /// Returns the first rule whose pattern matches `line`.
    ///
    /// `line` is expected to be [`prepare`](Self::prepare)d already.
    pub fn recognize(&self, line: &str) -> Option<Rule> {
        self.rules
            .iter()
            .find(|(_, regex)| regex.is_match(line))
            .map(|(rule, _)| *rule)
    }

    /// Classifies one raw line.
    pub fn classify(&self, raw: &str) -> LineOutcome {
        let line = self.prepare(raw);
        match self.recognize(line) {
            Some(rule) => match self.extract(rule, line) {
                Some(entry) => LineOutcome::Parsed { rule, entry },
                None => LineOutcome::Rejected { rule },
            },
            None => LineOutcome::Unrecognized,
        }
    }

    /// Parses one raw line into an entry, or `None` if no rule applies.
    ///
    /// ```
    /// use rpglog::Entry;
    /// use rpglog::parsing::LineParser;
    ///
    /// let parser = LineParser::new();
    /// let line = "[Tuesday, 07:15 2021] : <B>(42) Alan</B>: <font color='#800040'>Hello there.</font><br>";
    /// assert_eq!(parser.parse_line(line), Some(Entry::statement("Alan", "Hello there.")));
    /// assert_eq!(parser.parse_line("<hr>"), None);
    /// ```
    pub fn parse_line(&self, raw: &str) -> Option<Entry> {
        self.classify(raw).into_entry()
    }

    /// Runs the extractor of `rule` on an already prepared line.
    pub fn extract(&self, rule: Rule, line: &str) -> Option<Entry> {
        match rule {
            Rule::StatementV1 => self.font_statement(line, true),
            Rule::StatementV2 => self.font_statement(line, false),
            Rule::StatementV3 => self.paragraph_statement(line),
            Rule::EmoteV1 => self.emote(line, &self.font, &self.emote_with_id),
            Rule::EmoteV2 => self.emote(line, &self.font, &self.emote_body),
            Rule::EmoteV3 => self.emote(line, &self.paragraph, &self.emote_body),
        }
    }

    /// `<B>(id) Name</B>: <font ...>Body</font>`
    fn font_statement(&self, line: &str, has_id: bool) -> Option<Entry> {
        let html = fragment(line);
        let name = first(&html, &self.bold)?.inner_html();
        let player = if has_id {
            self.player_id.replace(&name, "").into_owned()
        } else {
            name
        };
        let content = first(&html, &self.font)?.inner_html();
        statement(&player, &content)
    }

    /// `<p><b>Name</b>: Body</p>`
    ///
    /// The `<b>` node is detached from the tree so the paragraph's remaining
    /// markup is exactly the body.
    fn paragraph_statement(&self, line: &str) -> Option<Entry> {
        let mut html = fragment(line);
        let (paragraph_id, bold_id, player) = {
            let paragraph = first(&html, &self.paragraph)?;
            let bold = paragraph.select(&self.bold).next()?;
            (paragraph.id(), bold.id(), bold.inner_html())
        };

        html.tree.get_mut(bold_id)?.detach();
        let paragraph = html.tree.get(paragraph_id).and_then(ElementRef::wrap)?;
        let body = paragraph.inner_html();
        let content = body.strip_prefix(": ").unwrap_or(&body);
        statement(&player, content)
    }

    /// `<font ...>** Body **</font>` or `<p>** Body **</p>`
    fn emote(&self, line: &str, container: &Selector, body: &Regex) -> Option<Entry> {
        let html = fragment(line);
        let inner = first(&html, container)?.inner_html();
        let content = body.captures(&inner)?.get(1)?.as_str();
        Some(Entry::emote(content))
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a statement, refusing an empty speaker.
fn statement(player: &str, content: &str) -> Option<Entry> {
    let player = player.trim();
    if player.is_empty() {
        return None;
    }
    Some(Entry::statement(player, content.trim()))
}

/// Parses one raw line with a freshly compiled [`LineParser`].
///
/// Convenient for one-off calls; loops should hold on to a `LineParser`.
pub fn parse_line(raw: &str) -> Option<Entry> {
    LineParser::new().parse_line(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> LineParser {
        LineParser::new()
    }

    #[test]
    fn test_statement_v1_with_timestamp() {
        let line = "[Tuesday, 07:15 2021] : <B>(42) Alan</B>: <font color='#800040'>Hello there.</font><br>";
        assert_eq!(
            parser().parse_line(line),
            Some(Entry::statement("Alan", "Hello there."))
        );
    }

    #[test]
    fn test_statement_v1_wins_over_v2() {
        let p = parser();
        let line = "<B>(7) Bea Smith</B>: <font color='#000080'>Hi.</font><br>";
        // Both patterns match; the earlier rule owns the line.
        assert!(Regex::new(Rule::StatementV2.pattern()).unwrap().is_match(line));
        assert_eq!(p.recognize(line), Some(Rule::StatementV1));
        assert_eq!(p.parse_line(line), Some(Entry::statement("Bea Smith", "Hi.")));
    }

    #[test]
    fn test_statement_v2() {
        let line = "<B>Alan</B>: <font color='#800040'>Example sentence.</font><br>";
        let outcome = parser().classify(line);
        assert_eq!(
            outcome,
            LineOutcome::Parsed {
                rule: Rule::StatementV2,
                entry: Entry::statement("Alan", "Example sentence."),
            }
        );
    }

    #[test]
    fn test_statement_keeps_inline_markup() {
        let line = "<B>Alan</B>: <font color='#800040'>I <i>mean</i> it.</font><br>";
        assert_eq!(
            parser().parse_line(line),
            Some(Entry::statement("Alan", "I <i>mean</i> it."))
        );
    }

    #[test]
    fn test_statement_v3() {
        let line = "<p><b>Alan</b>: Example sentence.</p>";
        assert_eq!(
            parser().classify(line),
            LineOutcome::Parsed {
                rule: Rule::StatementV3,
                entry: Entry::statement("Alan", "Example sentence."),
            }
        );
    }

    #[test]
    fn test_statement_v3_body_with_markup() {
        let line = "<p><b>Cy</b>: Run, <i>now</i>!</p>";
        assert_eq!(
            parser().parse_line(line),
            Some(Entry::statement("Cy", "Run, <i>now</i>!"))
        );
    }

    #[test]
    fn test_emote_v1_discards_id() {
        let line = "<font color='#800040'>** (42) Alan waves. **</font><br>";
        assert_eq!(
            parser().classify(line),
            LineOutcome::Parsed {
                rule: Rule::EmoteV1,
                entry: Entry::emote("Alan waves."),
            }
        );
    }

    #[test]
    fn test_emote_v2() {
        let line = "[Mon, 21:00 2008] : <font color='#123456'>** Alan waves. **</font><br>";
        assert_eq!(parser().parse_line(line), Some(Entry::emote("Alan waves.")));
    }

    #[test]
    fn test_emote_v3() {
        let line = "<p>** Alan waves. **</p>";
        assert_eq!(
            parser().classify(line),
            LineOutcome::Parsed {
                rule: Rule::EmoteV3,
                entry: Entry::emote("Alan waves."),
            }
        );
    }

    #[test]
    fn test_emote_without_closing_stars_is_rejected() {
        let line = "<font color='#123456'>**broken</font>";
        assert_eq!(
            parser().classify(line),
            LineOutcome::Rejected {
                rule: Rule::EmoteV2
            }
        );
    }

    #[test]
    fn test_unrecognized_lines() {
        let p = parser();
        for line in ["", "<hr>", "plain words", "<html><body>", "[noon 2020] : "] {
            assert_eq!(p.classify(line), LineOutcome::Unrecognized, "line: {line:?}");
        }
    }

    #[test]
    fn test_hex_color_with_letters_is_not_an_emote() {
        // The legacy pattern only accepts decimal digits in the color.
        let line = "<font color='#80ff40'>** Alan waves. **</font>";
        assert_eq!(parser().recognize(line), None);
    }

    #[test]
    fn test_strip_timestamp_requires_trailing_separator() {
        let p = parser();
        assert_eq!(p.strip_timestamp("[07:15 2021] <p>x</p>"), "[07:15 2021] <p>x</p>");
        assert_eq!(p.prepare("  [07:15 2021] :  <p>x</p>  "), "<p>x</p>");
    }

    #[test]
    fn test_rule_metadata() {
        assert_eq!(Rule::all().len(), 6);
        assert_eq!(Rule::all()[0], Rule::StatementV1);
        assert_eq!(Rule::StatementV2.to_string(), "v2 statement");
    }

    #[test]
    fn test_free_parse_line() {
        assert_eq!(
            parse_line("<p>** Alan sits. **</p>"),
            Some(Entry::emote("Alan sits."))
        );
    }
}
