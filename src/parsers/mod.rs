//! Transcript parsers, one per dialect.
//!
//! Each parser implements the [`Parser`](crate::parser::Parser) trait.
//!
//! # Available Parsers
//!
//! - [`OpenRpgParser`] - line-oriented OpenRPG logs (three generations)
//! - [`CampfireParser`] - structural Campfire HTML transcripts
//! - [`PlainTextParser`] - plain `.txt` transcripts

mod campfire;
mod openrpg;
mod plain;

pub use campfire::CampfireParser;
pub use openrpg::OpenRpgParser;
pub use plain::PlainTextParser;
