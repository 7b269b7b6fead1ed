//! HTML export with previous/next navigation and an index page.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::links::links;
use super::template::{
    INDEX_TEMPLATE, INDEX_TEMPLATE_FILE, LOG_TEMPLATE, LOG_TEMPLATE_FILE, Template,
};
use super::text::LINE_SEPARATOR;
use super::{Exporter, collect_documents};
use crate::config::ExportConfig;
use crate::document::Document;
use crate::error::{Result, RpglogError};
use crate::format::OutputFormat;
use crate::import::prepare_dir;

/// File name of the generated index page.
pub const INDEX_FILE: &str = "index.html";

/// Writes one templated HTML page per document plus an index page.
///
/// Entry content is inserted as is; inline markup captured at import time is
/// kept.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    log_template: Template,
    index_template: Template,
}

impl HtmlExporter {
    /// Creates an exporter with the built-in templates.
    pub fn new() -> Self {
        Self {
            log_template: Template::new(LOG_TEMPLATE),
            index_template: Template::new(INDEX_TEMPLATE),
        }
    }

    /// Creates an exporter, loading template overrides from the configured
    /// template directory.
    pub fn with_config(config: &ExportConfig) -> Result<Self> {
        Ok(Self {
            log_template: Template::resolve(config, LOG_TEMPLATE_FILE, LOG_TEMPLATE)?,
            index_template: Template::resolve(config, INDEX_TEMPLATE_FILE, INDEX_TEMPLATE)?,
        })
    }

    /// Renders the entries of a document as HTML lines joined by newlines.
    pub fn render_content(&self, document: &Document) -> String {
        self.render_entries(document).join(LINE_SEPARATOR)
    }

    /// Renders one page.
    pub fn render_page(
        &self,
        title: &str,
        document: &Document,
        previous: Option<&str>,
        next: Option<&str>,
    ) -> String {
        let content = self.render_content(document);
        self.log_template.render(&[
            ("title", Some(title)),
            ("previous", previous),
            ("next", next),
            ("content", Some(content.as_str())),
        ])
    }

    /// Renders the index page linking to `pages`, in order.
    pub fn render_index<S: AsRef<str>>(&self, pages: &[S]) -> String {
        let content = pages
            .iter()
            .map(|page| index_link(page.as_ref()))
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR);
        self.index_template.render(&[("content", Some(content.as_str()))])
    }

    /// Exports every document of `input_dir` into `output_dir` and returns
    /// the written pages, index last.
    ///
    /// An input directory without documents is an error, since there is
    /// nothing to link. So is a document whose page would take the name of
    /// the index page.
    pub fn export_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let documents = collect_documents(input_dir)?;
        if let Some(clash) = documents.iter().find(|source| {
            source
                .output_name(OutputFormat::Html.extension())
                .eq_ignore_ascii_case(INDEX_FILE)
        }) {
            return Err(RpglogError::Config {
                path: clash.path.clone(),
                message: format!("its page would be overwritten by {}", INDEX_FILE),
            });
        }
        let pages: Vec<String> = documents
            .iter()
            .map(|source| source.output_name(OutputFormat::Html.extension()))
            .collect();
        let navigation = links(&pages)?;
        prepare_dir(output_dir)?;

        let mut written = Vec::with_capacity(pages.len() + 1);
        for (source, link) in documents.iter().zip(&navigation) {
            let page = self.render_page(
                &source.stem,
                &source.document,
                link.previous.map(String::as_str),
                link.next.map(String::as_str),
            );
            written.push(write_page(&output_dir.join(link.current), &page)?);
        }

        let index = self.render_index(&pages);
        written.push(write_page(&output_dir.join(INDEX_FILE), &index)?);

        info!(
            "Exported {} HTML pages to {}",
            pages.len(),
            output_dir.display()
        );
        Ok(written)
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for HtmlExporter {
    fn render_text(&self, content: &str) -> String {
        format!("<p>{}</p>", content)
    }

    fn render_statement(&self, player: &str, content: &str) -> String {
        format!("<p><span class=\"player\">{}</span>: {}</p>", player, content)
    }

    fn render_emote(&self, content: &str) -> String {
        format!("<p class=\"emote\">{}</p>", content)
    }
}

/// Index entry for one page; the link text drops the extension.
fn index_link(file_name: &str) -> String {
    let text = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);
    format!("<li><a href=\"{}\">{}</a></li>", file_name, text)
}

fn write_page(path: &Path, page: &str) -> Result<PathBuf> {
    fs::write(path, page).map_err(|e| RpglogError::from(e).in_file(path))?;
    Ok(path.to_path_buf())
}
