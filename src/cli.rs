//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Cli`] - top-level arguments and the [`Command`] to run
//! - [`ImportArgs`] / [`ExportArgs`] - per-subcommand arguments
//! - [`ExportFormat`] - `-f` values, convertible to [`crate::format::OutputFormat`]
//!
//! ```rust
//! use clap::Parser;
//! use rpglog::cli::{Cli, Command};
//!
//! let cli = Cli::parse_from(["rpglog", "export", "-i", "json", "-o", "html", "-f", "html"]);
//! assert!(matches!(cli.command, Command::Export(_)));
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{
    BookConfig, DEFAULT_EPUB_COMMAND, DEFAULT_MOBI_COMMAND, ExportConfig, ImportConfig,
};

/// Convert role-playing chat transcripts into canonical JSON, and canonical
/// JSON into text, linked HTML pages or e-books.
#[derive(Parser, Debug, Clone)]
#[command(name = "rpglog")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    rpglog import transcripts/ json/
    rpglog import transcripts/ json/ --log-dir logs/ --pretty
    rpglog export -i json/ -o text/
    rpglog export -i json/ -o html/ -f html --templates templates/
    rpglog export -i json/ -o books/campaign.epub -f epub --title \"The Campaign\"
    rpglog export -i json/ -o books/campaign.mobi -f mobi

ENVIRONMENT:
    RPGLOG_LOG    tracing filter, e.g. RPGLOG_LOG=rpglog=debug")]
pub struct Cli {
    /// Show per-line parsing decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert every *.html / *.txt transcript of a directory into JSON
    Import(ImportArgs),

    /// Render a directory of JSON documents as text, HTML or an e-book
    Export(ExportArgs),
}

/// Arguments of `rpglog import`.
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Directory holding the transcripts
    pub input_dir: PathBuf,

    /// Directory receiving one JSON document per transcript
    pub output_dir: PathBuf,

    /// Write one <name>.log per transcript into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Pretty-print the JSON documents
    #[arg(long)]
    pub pretty: bool,
}

impl ImportArgs {
    /// Builds the library configuration from these arguments.
    pub fn to_config(&self) -> ImportConfig {
        let mut config = ImportConfig::new().with_pretty(self.pretty);
        if let Some(dir) = &self.log_dir {
            config = config.with_log_dir(dir);
        }
        config
    }
}

/// Arguments of `rpglog export`.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Directory holding the JSON documents
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// Output directory, or the book file for epub and mobi
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ExportFormat,

    /// Directory with log_template.html / index_template.html / book_template.html overrides
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Book title (defaults to the output file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Command packaging HTML as epub
    #[arg(long, value_name = "CMD", default_value = DEFAULT_EPUB_COMMAND)]
    pub epub_command: String,

    /// Command converting epub into mobi
    #[arg(long, value_name = "CMD", default_value = DEFAULT_MOBI_COMMAND)]
    pub mobi_command: String,
}

impl ExportArgs {
    /// Builds the HTML rendering configuration.
    pub fn to_export_config(&self) -> ExportConfig {
        match &self.templates {
            Some(dir) => ExportConfig::new().with_template_dir(dir),
            None => ExportConfig::new(),
        }
    }

    /// Builds the e-book configuration.
    pub fn to_book_config(&self) -> BookConfig {
        let mut config = BookConfig::new()
            .with_epub_command(&self.epub_command)
            .with_mobi_command(&self.mobi_command)
            .with_export(self.to_export_config());
        if let Some(title) = &self.title {
            config = config.with_title(title);
        }
        config
    }
}

/// Export formats accepted by `-f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain text, markup stripped (default)
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Linked HTML pages plus index.html
    Html,

    /// One epub book
    Epub,

    /// One mobi book
    Mobi,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<ExportFormat> for crate::format::OutputFormat {
    fn from(format: ExportFormat) -> crate::format::OutputFormat {
        match format {
            ExportFormat::Text => crate::format::OutputFormat::Text,
            ExportFormat::Html => crate::format::OutputFormat::Html,
            ExportFormat::Epub => crate::format::OutputFormat::Epub,
            ExportFormat::Mobi => crate::format::OutputFormat::Mobi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;

    #[test]
    fn test_import_args() {
        let cli = Cli::try_parse_from([
            "rpglog", "import", "in", "out", "--log-dir", "logs", "--pretty",
        ])
        .unwrap();
        let Command::Import(args) = cli.command else {
            panic!("expected import");
        };
        let config = args.to_config();
        assert!(config.pretty);
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["rpglog", "export", "-i", "json", "-o", "text"]).unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.format, ExportFormat::Text);
        let book = args.to_book_config();
        assert_eq!(book.epub_command, DEFAULT_EPUB_COMMAND);
        assert!(book.title.is_none());
        assert!(book.export.template_dir.is_none());
    }

    #[test]
    fn test_export_book_options() {
        let cli = Cli::try_parse_from([
            "rpglog",
            "export",
            "-i",
            "json",
            "-o",
            "book.epub",
            "-f",
            "epub",
            "--title",
            "Saga",
            "--epub-command",
            "pandoc {input} -o {output}",
            "--templates",
            "tpl",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        let book = args.to_book_config();
        assert_eq!(book.title.as_deref(), Some("Saga"));
        assert_eq!(book.epub_command, "pandoc {input} -o {output}");
        assert_eq!(book.export.template_dir, Some(PathBuf::from("tpl")));
    }

    #[test]
    fn test_missing_paths_rejected() {
        assert!(Cli::try_parse_from(["rpglog", "export", "-i", "json"]).is_err());
        assert!(Cli::try_parse_from(["rpglog", "import", "in"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(OutputFormat::from(ExportFormat::Mobi), OutputFormat::Mobi);
        assert_eq!(ExportFormat::Html.to_string(), "HTML");
    }
}
