//! sitewatch - watch selected parts of web pages and mail inline diffs
//!
//! Each configured job fetches a page, keeps one element (or the whole
//! document), normalizes it into a canonical form and compares that form
//! with the snapshot from the previous run. Changes are rendered as inline
//! HTML diffs and delivered to the job's recipients.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod output;
pub mod paths;
pub mod runner;
