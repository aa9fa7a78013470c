//! Business logic services
//!
//! Pure logic over the domain models. Services receive data (and port trait
//! objects where they must persist or deliver) and return results.
//!
//! - [`selector`] - Locate the watched element
//! - [`normalizer`] - Prune and clean the tree
//! - [`serializer`] - Canonical pretty-printed form
//! - [`diff`] - Inline HTML diff
//! - [`detector`] - Compare with the stored snapshot
//! - [`notifier`] - Deliver change reports

pub mod detector;
pub mod diff;
pub mod normalizer;
pub mod notifier;
pub mod selector;
pub mod serializer;

pub use detector::{ChangeDetector, Detection};
pub use diff::html_diff;
pub use normalizer::{NormalizeStats, normalize};
pub use notifier::{Delivery, notify};
pub use selector::{select_one, working_document};
pub use serializer::to_pretty_html;
