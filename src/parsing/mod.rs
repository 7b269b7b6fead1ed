//! Shared parsing utilities.
//!
//! - [`rules`] - the ordered OpenRPG dialect rules and [`LineParser`]
//! - [`markup`] - tag stripping and fragment helpers over `scraper`'s tree

pub mod markup;
pub mod rules;

// Re-export commonly used items
pub use markup::strip_tags;
pub use rules::{LineOutcome, LineParser, Rule, TIMESTAMP_PATTERN, parse_line};
