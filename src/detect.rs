//! Dialect detection by extension and content sniffing.
//!
//! Rules, in order:
//! 1. a `.txt` file is plain text;
//! 2. a file whose first [`DETECT_LINE_LIMIT`] lines contain the Campfire
//!    `<title>` marker is a Campfire transcript;
//! 3. anything else is treated as an OpenRPG log.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::error::Result;
use crate::parser::Dialect;

/// Maximum number of lines read when sniffing a file.
pub const DETECT_LINE_LIMIT: usize = 10;

/// Title marker written at the top of every Campfire transcript.
pub const CAMPFIRE_MARKER: &str = r"^\s*<title>Campfire";

/// Detects the dialect of a transcript file.
///
/// Never reads more than [`DETECT_LINE_LIMIT`] lines; shorter files are fine.
/// Plain text files are recognized by extension alone and not opened.
pub fn detect(path: &Path) -> Result<Dialect> {
    if is_plain_text(path) {
        return Ok(Dialect::PlainText);
    }

    let reader = BufReader::new(File::open(path)?);
    let mut head = Vec::with_capacity(DETECT_LINE_LIMIT);
    for line in reader.split(b'\n').take(DETECT_LINE_LIMIT) {
        head.push(String::from_utf8_lossy(&line?).into_owned());
    }

    Ok(detect_lines(path, &head))
}

/// Detects the dialect from a file name and its leading lines.
///
/// Only the first [`DETECT_LINE_LIMIT`] entries of `lines` are inspected.
///
/// ```
/// use std::path::Path;
/// use rpglog::detect::detect_lines;
/// use rpglog::parser::Dialect;
///
/// let head = ["<html>", "  <title>Campfire: Tavern</title>"];
/// assert_eq!(detect_lines(Path::new("tavern.html"), &head), Dialect::Campfire);
/// assert_eq!(detect_lines(Path::new("notes.txt"), &head), Dialect::PlainText);
/// assert_eq!(detect_lines(Path::new("game.html"), &["<B>Alan</B>: hi"]), Dialect::OpenRpg);
/// ```
pub fn detect_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Dialect {
    if is_plain_text(path) {
        return Dialect::PlainText;
    }

    let marker = Regex::new(CAMPFIRE_MARKER).unwrap();
    if lines
        .iter()
        .take(DETECT_LINE_LIMIT)
        .any(|line| marker.is_match(line.as_ref()))
    {
        Dialect::Campfire
    } else {
        Dialect::OpenRpg
    }
}

fn is_plain_text(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}
