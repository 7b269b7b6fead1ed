//! Line-based `{{ key }}` templates.
//!
//! A template is read line by line, lines without a token
//! are copied verbatim, and every `{{ key }}` token on a line is replaced by
//! its value. Missing keys and `None` values become the empty string.
//!
//! ```
//! use rpglog::export::template::Template;
//!
//! let template = Template::new("<title>{{ title }}</title>\n<a href=\"{{ next }}\">Next</a>\n");
//! let page = template.render(&[("title", Some("Session 1")), ("next", None)]);
//! assert_eq!(page, "<title>Session 1</title>\n<a href=\"\">Next</a>\n");
//! ```

use std::fs;
use std::path::Path;

use regex::{Captures, Regex};

use crate::config::ExportConfig;
use crate::error::{Result, RpglogError};

/// Token syntax: `{{ key }}`, whitespace inside the braces optional.
pub const TOKEN_PATTERN: &str = r"\{\{\s*(\w+)\s*\}\}";

/// Built-in page template for one exported log.
pub const LOG_TEMPLATE: &str = include_str!("../../templates/log_template.html");

/// Built-in index page template.
pub const INDEX_TEMPLATE: &str = include_str!("../../templates/index_template.html");

/// Built-in intermediate document template for e-books.
pub const BOOK_TEMPLATE: &str = include_str!("../../templates/book_template.html");

/// Override file name for [`LOG_TEMPLATE`].
pub const LOG_TEMPLATE_FILE: &str = "log_template.html";
/// Override file name for [`INDEX_TEMPLATE`].
pub const INDEX_TEMPLATE_FILE: &str = "index_template.html";
/// Override file name for [`BOOK_TEMPLATE`].
pub const BOOK_TEMPLATE_FILE: &str = "book_template.html";

/// A loaded template.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    token: Regex,
}

impl Template {
    /// Creates a template from its source text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            token: Regex::new(TOKEN_PATTERN).unwrap(),
        }
    }

    /// Reads a template file.
    pub fn load(path: &Path) -> Result<Self> {
        fs::read_to_string(path)
            .map(Self::new)
            .map_err(|e| RpglogError::template(path, e.to_string()))
    }

    /// Returns the override from the configured template directory if it
    /// exists, the built-in template otherwise.
    pub fn resolve(config: &ExportConfig, file_name: &str, builtin: &str) -> Result<Self> {
        match config.template_path(file_name) {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::new(builtin)),
        }
    }

    /// Returns the template source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders the template with the given values.
    pub fn render(&self, values: &[(&str, Option<&str>)]) -> String {
        let lookup = |key: &str| {
            values
                .iter()
                .find(|(k, _)| *k == key)
                .and_then(|(_, v)| *v)
                .unwrap_or("")
        };

        let mut output = String::with_capacity(self.source.len());
        for line in self.source.split_inclusive('\n') {
            if self.token.is_match(line) {
                let rendered = self
                    .token
                    .replace_all(line, |caps: &Captures| lookup(&caps[1]).to_string());
                output.push_str(&rendered);
            } else {
                output.push_str(line);
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lines_without_tokens_verbatim() {
        let source = "<p>{ not a token }</p>\n\n  indented\n";
        assert_eq!(Template::new(source).render(&[]), source);
    }

    #[test]
    fn test_every_token_on_a_line_replaced() {
        let template = Template::new("{{ a }}-{{b}}-{{  a  }}");
        assert_eq!(
            template.render(&[("a", Some("x")), ("b", Some("y"))]),
            "x-y-x"
        );
    }

    #[test]
    fn test_missing_and_none_collapse() {
        let template = Template::new("[{{ previous }}][{{ unknown }}]\n");
        assert_eq!(template.render(&[("previous", None)]), "[][]\n");
    }

    #[test]
    fn test_multiline_value() {
        let template = Template::new("<div>\n{{ content }}\n</div>\n");
        let page = template.render(&[("content", Some("<p>a</p>\n<p>b</p>"))]);
        assert_eq!(page, "<div>\n<p>a</p>\n<p>b</p>\n</div>\n");
    }

    #[test]
    fn test_builtin_templates_have_tokens() {
        for key in ["title", "previous", "next", "content"] {
            assert!(LOG_TEMPLATE.contains(&format!("{{{{ {} }}}}", key)));
        }
        assert!(INDEX_TEMPLATE.contains("{{ content }}"));
        assert!(BOOK_TEMPLATE.contains("{{ content }}"));
    }

    #[test]
    fn test_resolve_prefers_override() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(LOG_TEMPLATE_FILE), "custom {{ title }}").unwrap();
        let config = ExportConfig::new().with_template_dir(dir.path());

        let log = Template::resolve(&config, LOG_TEMPLATE_FILE, LOG_TEMPLATE).unwrap();
        assert_eq!(log.render(&[("title", Some("T"))]), "custom T");

        let index = Template::resolve(&config, INDEX_TEMPLATE_FILE, INDEX_TEMPLATE).unwrap();
        assert_eq!(index.source(), INDEX_TEMPLATE);
    }

    #[test]
    fn test_load_missing_is_template_error() {
        let err = Template::load(Path::new("/nonexistent/log_template.html")).unwrap_err();
        assert!(matches!(err, RpglogError::Template { .. }));
    }
}
