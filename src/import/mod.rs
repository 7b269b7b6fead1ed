//! Directory import: transcripts in, canonical JSON documents out.
//!
//! Every `*.html` / `*.txt` file of the input directory is detected, parsed
//! by its dialect parser and written as `<stem>.json` into the output
//! directory. Files are handled one at a time in name order; a failing file is
//! reported and skipped without affecting its siblings.
//!
//! # Example
//!
//! ```no_run
//! use rpglog::config::ImportConfig;
//! use rpglog::import::Importer;
//!
//! let importer = Importer::new(ImportConfig::new().with_log_dir("logs"));
//! let report = importer.import_directory("transcripts".as_ref(), "json".as_ref())?;
//! println!("{} entries from {} files", report.total_entries(), report.imported.len());
//! # Ok::<(), rpglog::RpglogError>(())
//! ```

mod log;

pub use log::ImportLog;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::detect::detect;
use crate::error::{Result, RpglogError};
use crate::parser::{Dialect, create_parser};

/// File names picked up by [`Importer::import_directory`].
pub const INPUT_FILE_PATTERN: &str = r"\.(html|txt)$";

/// Outcome of importing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// The transcript that was read
    pub input: PathBuf,
    /// The JSON document that was written
    pub output: PathBuf,
    /// The detected dialect
    pub dialect: Dialect,
    /// Number of entries in the document
    pub entries: usize,
    /// Number of lines or rows that were dropped
    pub dropped: usize,
}

/// Outcome of a directory import.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Files converted successfully, in processing order
    pub imported: Vec<FileSummary>,
    /// Files that failed, with the error that stopped them
    pub failed: Vec<(PathBuf, RpglogError)>,
}

impl ImportReport {
    /// Total number of entries across all imported files.
    pub fn total_entries(&self) -> usize {
        self.imported.iter().map(|s| s.entries).sum()
    }

    /// Returns `true` if no file failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts transcript files into canonical JSON documents.
pub struct Importer {
    config: ImportConfig,
    input_files: Regex,
}

impl Importer {
    /// Creates an importer with the given configuration.
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            input_files: Regex::new(INPUT_FILE_PATTERN).unwrap(),
        }
    }

    /// Returns the configuration of this importer.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Imports every transcript of `input_dir` into `output_dir`.
    ///
    /// Returns an error only for configuration problems, which are reported
    /// before any file is touched. Failures of individual files end up in
    /// [`ImportReport::failed`].
    pub fn import_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<ImportReport> {
        check_input_dir(input_dir)?;
        prepare_dir(output_dir)?;
        if let Some(log_dir) = &self.config.log_dir {
            prepare_dir(log_dir)?;
        }

        let inputs = self.list_inputs(input_dir)?;
        info!(
            "Importing {} files from {}",
            inputs.len(),
            input_dir.display()
        );

        let mut report = ImportReport::default();
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        for input in inputs {
            let output = output_dir.join(json_name(&input));
            if let Some(first) = claimed.get(&output) {
                let e = RpglogError::Config {
                    path: input.clone(),
                    message: format!(
                        "output {} was already written from {}",
                        output.display(),
                        first.display()
                    ),
                };
                warn!("Failed to import {}: {}", input.display(), e);
                report.failed.push((input, e));
                continue;
            }
            claimed.insert(output.clone(), input.clone());

            match self.import_file(&input, &output) {
                Ok(summary) => report.imported.push(summary),
                Err(e) => {
                    warn!("Failed to import {}: {}", input.display(), e);
                    report.failed.push((input, e));
                }
            }
        }

        Ok(report)
    }

    /// Imports a single transcript file into `output`.
    pub fn import_file(&self, input: &Path, output: &Path) -> Result<FileSummary> {
        self.convert(input, output).map_err(|e| e.in_file(input))
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<FileSummary> {
        let mut log = match &self.config.log_dir {
            Some(dir) => ImportLog::create(&dir.join(log_name(input)))?,
            None => ImportLog::disabled(),
        };
        log.record(&format!("Processing file {}", input.display()));

        let dialect = detect(input)?;
        let parser = create_parser(dialect);
        log.record(&format!("Converting as {}", dialect));

        let document = parser.parse(input, &mut log)?;
        document.write(output, self.config.pretty)?;

        let dropped = log.dropped();
        log.finish()?;

        info!(
            "Imported {} ({}): {} entries, {} dropped",
            input.display(),
            parser.name(),
            document.len(),
            dropped
        );

        Ok(FileSummary {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            dialect,
            entries: document.len(),
            dropped,
        })
    }

    /// Lists the transcript files of `dir`, sorted by name.
    fn list_inputs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let selected = path.is_file()
                && path
                    .file_name()
                    .is_some_and(|name| self.input_files.is_match(&name.to_string_lossy()));
            if selected {
                inputs.push(path);
            }
        }
        inputs.sort();
        Ok(inputs)
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

/// Rejects input paths that are missing or not directories.
pub(crate) fn check_input_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(RpglogError::missing_input(dir));
    }
    if !dir.is_dir() {
        return Err(RpglogError::not_a_directory(dir));
    }
    Ok(())
}

/// Creates `dir` if needed, refusing paths that exist as something else.
pub(crate) fn prepare_dir(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(RpglogError::not_a_directory(dir));
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

fn json_name(input: &Path) -> PathBuf {
    input.with_extension("json").file_name().map_or_else(
        || PathBuf::from("document.json"),
        PathBuf::from,
    )
}

fn log_name(input: &Path) -> PathBuf {
    input.with_extension("log").file_name().map_or_else(
        || PathBuf::from("import.log"),
        PathBuf::from,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, Entry};
    use tempfile::tempdir;

    const OPENRPG_LINE: &str = "[Tuesday, 07:15 2021] : <B>(42) Alan</B>: <font color='#800040'>Hello there.</font><br>";

    #[test]
    fn test_import_directory_writes_one_json_per_input() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(input.path().join("b.txt"), "Hello\n\nWorld\n").unwrap();
        fs::write(input.path().join("a.html"), format!("{}\n<hr>\n", OPENRPG_LINE)).unwrap();
        fs::write(input.path().join("notes.md"), "ignored").unwrap();

        let report = Importer::default()
            .import_directory(input.path(), output.path())
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(report.imported.len(), 2);
        assert_eq!(report.imported[0].dialect, Dialect::OpenRpg);
        assert_eq!(report.imported[0].dropped, 1);
        assert_eq!(report.imported[1].dialect, Dialect::PlainText);
        assert_eq!(report.total_entries(), 3);

        let a = Document::read(&output.path().join("a.json")).unwrap();
        assert_eq!(a.entries(), &[Entry::statement("Alan", "Hello there.")]);
        assert!(!output.path().join("notes.json").exists());
    }

    #[test]
    fn test_output_dir_created() {
        let input = tempdir().unwrap();
        let root = tempdir().unwrap();
        let output = root.path().join("nested/out");
        fs::write(input.path().join("x.txt"), "Line").unwrap();

        Importer::default()
            .import_directory(input.path(), &output)
            .unwrap();
        assert!(output.join("x.json").exists());
    }

    #[test]
    fn test_missing_input_is_config_error() {
        let output = tempdir().unwrap();
        let err = Importer::default()
            .import_directory(Path::new("/nonexistent/input"), output.path())
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_output_file_is_config_error() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("x.txt"), "Line").unwrap();
        let blocker = input.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = Importer::default()
            .import_directory(input.path(), &blocker)
            .unwrap_err();
        assert!(err.is_config());
        assert!(!input.path().join("x.json").exists());
    }

    #[test]
    fn test_log_dir_gets_one_log_per_file() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let logs = tempdir().unwrap();
        fs::write(input.path().join("game.html"), format!("{}\n<hr>\n", OPENRPG_LINE)).unwrap();

        let importer = Importer::new(ImportConfig::new().with_log_dir(logs.path()));
        importer.import_directory(input.path(), output.path()).unwrap();

        let log = fs::read_to_string(logs.path().join("game.log")).unwrap();
        assert!(log.starts_with("Processing file"));
        assert!(log.contains("Converting as OpenRPG log"));
        assert!(log.contains("Parsing as v1 statement"));
        assert!(log.contains("Skipping unrecognized line: <hr>"));
    }

    #[test]
    fn test_failed_file_does_not_stop_siblings() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(input.path().join("a.txt"), "First").unwrap();
        fs::write(input.path().join("b.txt"), "Second").unwrap();
        fs::write(input.path().join("c.txt"), "Third").unwrap();
        // b.json cannot be written over a directory.
        fs::create_dir(output.path().join("b.json")).unwrap();

        let report = Importer::default()
            .import_directory(input.path(), output.path())
            .unwrap();

        assert!(!report.is_clean());
        assert_eq!(report.imported.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("b.txt"));
        assert!(report.failed[0].1.to_string().contains("b.txt"));
    }

    #[test]
    fn test_same_stem_keeps_first_output() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(input.path().join("a.html"), OPENRPG_LINE).unwrap();
        fs::write(input.path().join("a.txt"), "Plain notes").unwrap();

        let report = Importer::default()
            .import_directory(input.path(), output.path())
            .unwrap();

        assert_eq!(report.imported.len(), 1);
        assert_eq!(report.imported[0].dialect, Dialect::OpenRpg);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("a.txt"));
        assert!(report.failed[0].1.is_config());
        assert!(report.failed[0].1.to_string().contains("a.html"));

        let json = fs::read_to_string(output.path().join("a.json")).unwrap();
        assert!(json.contains("Alan"));
        assert!(!json.contains("Plain notes"));
    }

    #[test]
    fn test_import_file_pretty() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("x.txt");
        let output = dir.path().join("x.json");
        fs::write(&input, "Hi").unwrap();

        let summary = Importer::new(ImportConfig::new().with_pretty(true))
            .import_file(&input, &output)
            .unwrap();
        assert_eq!(summary.entries, 1);
        assert!(fs::read_to_string(&output).unwrap().contains('\n'));
    }
}
