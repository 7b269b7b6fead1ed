//! Per-file import log.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

/// A log handle scoped to the import of one input file.
///
/// The importer creates one `ImportLog` per file and passes it explicitly to
/// the parser. The underlying file is flushed and closed when the handle is
/// dropped, so no handle outlives the file it describes.
///
/// Every record is also emitted as a `tracing` debug event; a disabled log
/// only skips the file.
///
/// # Example
///
/// ```
/// use rpglog::import::ImportLog;
///
/// let mut log = ImportLog::disabled();
/// log.record("Skipping unrecognized line: <hr>");
/// assert!(!log.is_enabled());
/// ```
#[derive(Debug, Default)]
pub struct ImportLog {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    dropped: usize,
}

impl ImportLog {
    /// Creates a log that only emits tracing events.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Creates (or truncates) a log file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path: Some(path.to_path_buf()),
            dropped: 0,
        })
    }

    /// Returns the log file path, if file logging is enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns `true` if records are written to a file.
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Appends one line to the log.
    ///
    /// A write failure disables the file for the rest of this import and is
    /// reported once; it never aborts the import itself.
    pub fn record(&mut self, message: &str) {
        debug!("{}", message);

        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", message) {
            warn!(
                "Disabling import log {}: {}",
                self.path.as_deref().unwrap_or(Path::new("?")).display(),
                e
            );
            self.writer = None;
        }
    }

    /// Records a dropped line or row.
    pub fn skip(&mut self, message: &str) {
        self.dropped += 1;
        self.record(message);
    }

    /// Returns the number of records made with [`skip`](Self::skip).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Flushes and closes the log file.
    pub fn finish(mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disabled_log_accepts_records() {
        let mut log = ImportLog::disabled();
        log.record("anything");
        assert!(log.path().is_none());
        log.finish().unwrap();
    }

    #[test]
    fn test_records_written_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.log");

        let mut log = ImportLog::create(&path).unwrap();
        assert!(log.is_enabled());
        log.record("first");
        log.record("second");
        log.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_skip_counts_dropped() {
        let mut log = ImportLog::disabled();
        log.record("Parsing as v1 statement: x");
        log.skip("Skipping unrecognized line: <hr>");
        log.skip("Skipping unrecognized line: <br>");
        assert_eq!(log.dropped(), 2);
    }

    #[test]
    fn test_drop_flushes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dropped.log");
        {
            let mut log = ImportLog::create(&path).unwrap();
            log.record("kept");
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept\n");
    }
}
