//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `html/` - html5ever parsing into the tagged tree
//! - `http/` - blocking HTTP fetcher
//! - `file/` - snapshot files with atomic replacement
//! - `mail/` - MIME rendering, Gmail API and outbox transports

pub mod file;
pub mod html;
pub mod http;
pub mod mail;
