//! HTML parsing adapter
//!
//! Parses raw page bytes with html5ever into its reference DOM and converts
//! that into the owned, tagged tree the core works on.

mod parser;

pub use parser::{parse_document, parse_str};
