//! Core domain logic for sitewatch
//!
//! This module contains pure logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (tree, rules, jobs, reports)
//! - `services/` - Selection, normalization, diffing, detection, notification
//! - `ports/` - Trait definitions for external dependencies
//! - `error` - Error taxonomy shared by all layers

pub mod error;
pub mod models;
pub mod ports;
pub mod services;
