//! E-book export through an external converter.
//!
//! All documents are rendered with the HTML entry renderers into a single
//! intermediate page (one chapter heading per document), which a
//! [`Converter`] then packages:
//!
//! - epub: intermediate HTML -> epub
//! - mobi: intermediate HTML -> epub -> mobi, the epub is removed afterwards
//!
//! Intermediate files live in a temporary directory that is deleted when the
//! export returns, on success and on failure.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use shlex::Shlex;
use tracing::{debug, info};

use super::template::{BOOK_TEMPLATE, BOOK_TEMPLATE_FILE, Template};
use super::text::LINE_SEPARATOR;
use super::{HtmlExporter, SourceDocument, collect_documents};
use crate::config::BookConfig;
use crate::error::{Result, RpglogError};
use crate::format::BookFormat;

/// Packages one file into another (HTML into epub, epub into mobi).
pub trait Converter {
    /// Converts `input` into `output`.
    fn convert(&self, input: &Path, output: &Path) -> Result<()>;
}

impl<F> Converter for F
where
    F: Fn(&Path, &Path) -> Result<()>,
{
    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        self(input, output)
    }
}

/// Runs an external program built from a command template.
///
/// The template is split like a shell command line; `{input}` and `{output}`
/// are replaced in every argument.
///
/// ```
/// use rpglog::export::CommandConverter;
/// use std::path::Path;
///
/// let converter = CommandConverter::new("ebook-convert {input} {output} --title 'My Log'");
/// let args = converter.arguments(Path::new("book.html"), Path::new("book.epub")).unwrap();
/// assert_eq!(args, ["ebook-convert", "book.html", "book.epub", "--title", "My Log"]);
/// ```
#[derive(Debug, Clone)]
pub struct CommandConverter {
    template: String,
}

impl CommandConverter {
    /// Creates a converter from a command template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Returns the command template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the program and arguments for converting `input` into `output`.
    pub fn arguments(&self, input: &Path, output: &Path) -> Result<Vec<String>> {
        let mut parts: Vec<String> = Shlex::new(&self.template).collect();
        if parts.is_empty() {
            return Err(RpglogError::converter(
                &self.template,
                "empty command template",
            ));
        }

        let input_s = input.to_string_lossy();
        let output_s = output.to_string_lossy();
        for part in &mut parts {
            *part = part
                .replace("{input}", &input_s)
                .replace("{output}", &output_s);
        }
        Ok(parts)
    }
}

impl Converter for CommandConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let parts = self.arguments(input, output)?;
        let command_line = parts.join(" ");
        debug!("Running converter: {}", command_line);

        let result = Command::new(&parts[0])
            .args(&parts[1..])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| RpglogError::converter(&command_line, e.to_string()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let message = match stderr.trim() {
                "" => result.status.to_string(),
                detail => format!("{}: {}", result.status, detail),
            };
            return Err(RpglogError::converter(command_line, message));
        }
        if !output.exists() {
            return Err(RpglogError::converter(
                command_line,
                format!("no output written to {}", output.display()),
            ));
        }
        Ok(())
    }
}

/// Builds a single e-book from a directory of documents.
pub struct BookExporter {
    format: BookFormat,
    config: BookConfig,
    template: Template,
    html: HtmlExporter,
    epub: Box<dyn Converter>,
    mobi: Box<dyn Converter>,
}

impl BookExporter {
    /// Creates an exporter using the converter commands of `config`.
    pub fn new(format: BookFormat, config: &BookConfig) -> Result<Self> {
        Ok(Self {
            format,
            config: config.clone(),
            template: Template::resolve(&config.export, BOOK_TEMPLATE_FILE, BOOK_TEMPLATE)?,
            html: HtmlExporter::new(),
            epub: Box::new(CommandConverter::new(&config.epub_command)),
            mobi: Box::new(CommandConverter::new(&config.mobi_command)),
        })
    }

    /// Replaces both converters.
    #[must_use]
    pub fn with_converters(
        mut self,
        epub: impl Converter + 'static,
        mobi: impl Converter + 'static,
    ) -> Self {
        self.epub = Box::new(epub);
        self.mobi = Box::new(mobi);
        self
    }

    /// Returns the book format.
    pub fn format(&self) -> BookFormat {
        self.format
    }

    /// Renders the intermediate HTML document.
    pub fn render_book(&self, title: &str, documents: &[SourceDocument]) -> String {
        let content = documents
            .iter()
            .map(|source| {
                format!(
                    "<h1 class=\"chapter\">{}</h1>{}{}",
                    source.stem,
                    LINE_SEPARATOR,
                    self.html.render_content(&source.document)
                )
            })
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR);

        self.template
            .render(&[("title", Some(title)), ("content", Some(content.as_str()))])
    }

    /// Exports every document of `input_dir` into the book file `output`.
    pub fn export_book(&self, input_dir: &Path, output: &Path) -> Result<PathBuf> {
        let documents = collect_documents(input_dir)?;
        prepare_output_file(output)?;

        let stem = output
            .file_stem()
            .unwrap_or_else(|| OsStr::new("book"))
            .to_string_lossy()
            .into_owned();
        let title = self.config.title_for(output);

        let workdir = tempfile::tempdir()?;
        let html_path = workdir.path().join(format!("{}.html", stem));
        fs::write(&html_path, self.render_book(&title, &documents))?;

        match self.format {
            BookFormat::Epub => self.epub.convert(&html_path, output)?,
            BookFormat::Mobi => {
                let epub_path = workdir.path().join(format!("{}.epub", stem));
                self.epub.convert(&html_path, &epub_path)?;
                self.mobi.convert(&epub_path, output)?;
                fs::remove_file(&epub_path)?;
            }
        }

        info!(
            "Exported {} documents to {} ({})",
            documents.len(),
            output.display(),
            self.format.extension()
        );
        Ok(output.to_path_buf())
    }
}

/// Refuses directories as book targets and creates missing parents.
fn prepare_output_file(output: &Path) -> Result<()> {
    if output.is_dir() {
        return Err(RpglogError::Config {
            path: output.to_path_buf(),
            message: "is a directory, expected a book file path".to_string(),
        });
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::import::prepare_dir(parent)?;
    }
    Ok(())
}
