//! # rpglog CLI
//!
//! Command-line interface for the rpglog library.

use std::process;

use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rpglog::RpglogError;
use rpglog::cli::{Cli, Command, ExportArgs, ImportArgs};
use rpglog::export::{HtmlExporter, TextExporter};
use rpglog::format::OutputFormat;
use rpglog::import::Importer;

fn main() {
    let cli = <Cli as ClapParser>::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Import(args) => run_import(args),
        Command::Export(args) => run_export(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// Installs the stderr subscriber; `RPGLOG_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let filter = std::env::var("RPGLOG_LOG").unwrap_or_else(|_| {
        if verbose {
            "rpglog=debug".to_string()
        } else {
            "rpglog=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
}

/// Returns `Ok(false)` when some files failed but the run completed.
fn run_import(args: &ImportArgs) -> Result<bool, RpglogError> {
    let importer = Importer::new(args.to_config());
    let report = importer.import_directory(&args.input_dir, &args.output_dir)?;

    println!(
        "Imported {} files ({} entries) into {}",
        report.imported.len(),
        report.total_entries(),
        args.output_dir.display()
    );

    for (path, e) in &report.failed {
        eprintln!("error: {}: {}", path.display(), e);
    }
    Ok(report.is_clean())
}

fn run_export(args: &ExportArgs) -> Result<bool, RpglogError> {
    let format: OutputFormat = args.format.into();
    info!(
        "Exporting {} as {} to {}",
        args.input.display(),
        format,
        args.output.display()
    );

    if format.writes_directory() {
        let written = if format == OutputFormat::Html {
            HtmlExporter::with_config(&args.to_export_config())?
                .export_directory(&args.input, &args.output)?
        } else {
            TextExporter::new().export_directory(&args.input, &args.output)?
        };
        println!("Wrote {} files to {}", written.len(), args.output.display());
    } else if let Some(book) = format.book_format() {
        export_book(args, book)?;
    }

    Ok(true)
}

#[cfg(feature = "ebook")]
fn export_book(args: &ExportArgs, book: rpglog::format::BookFormat) -> Result<(), RpglogError> {
    let exporter = rpglog::export::BookExporter::new(book, &args.to_book_config())?;
    let path = exporter.export_book(&args.input, &args.output)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(not(feature = "ebook"))]
fn export_book(args: &ExportArgs, book: rpglog::format::BookFormat) -> Result<(), RpglogError> {
    let _ = args;
    Err(RpglogError::converter(
        book.extension(),
        "e-book export requires the 'ebook' feature to be enabled",
    ))
}
