//! Domain models for sitewatch
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Document`] / [`Node`] - the tagged HTML tree
//! - [`Selector`], [`DropRule`], [`RenameRule`] - what to keep and how to clean it
//! - [`Job`] - one watched page
//! - [`ChangeReport`] - a detected change, ready for notification

mod job;
mod node;
mod rules;

pub use job::{ChangeKind, ChangeReport, FirstRunPolicy, Job, MailMessage};
pub use node::{Attribute, Document, Element, Node, NodePath};
pub use rules::{
    AttributeConstraint, DropRule, NormalizeRules, RenameRule, Selector, attribute_matches,
};
