//! Selection and normalization rules
//!
//! A job locates one element with a [`Selector`], then prunes it with
//! [`DropRule`]s, relabels tags with [`RenameRule`]s and strips attributes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Attributes whose value is a whitespace-separated token list
const MULTI_VALUED: &[&str] = &["class", "rel", "rev", "accept-charset", "headers", "accesskey"];

/// Identifies the single element a job watches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// Tag name to look for
    pub tag: String,
    /// Attributes the element must carry, with their values
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Selector {
    /// Create a selector for `tag` with no attribute constraints
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute constraint
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{value}\"")?;
        }
        write!(f, ">")
    }
}

/// Whether an attribute value satisfies a wanted value
///
/// Token-list attributes such as `class` match on any single token as well as
/// on the whole value.
#[must_use]
pub fn attribute_matches(name: &str, actual: &str, wanted: &str) -> bool {
    if actual == wanted {
        return true;
    }
    MULTI_VALUED.contains(&name) && actual.split_ascii_whitespace().any(|token| token == wanted)
}

/// One attribute allow-list of a [`DropRule`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeConstraint {
    /// Attribute that must be present
    pub attribute: String,
    /// Values that let the element survive; empty means none do
    #[serde(default)]
    pub allowed: BTreeSet<String>,
}

impl AttributeConstraint {
    /// Create a constraint from an attribute name and its allowed values
    #[must_use]
    pub fn new<I, S>(attribute: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attribute: attribute.to_string(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the attribute value is on the allow-list
    #[must_use]
    pub fn admits(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.allowed.contains(v))
    }
}

/// Removal policy for one tag name
///
/// Removal is the default: an element with the rule's tag survives only when
/// the rule has constraints and every one of them admits the element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRule {
    /// Tag name the rule applies to
    pub tag: String,
    /// Allow-lists, all of which must admit an element for it to be kept
    #[serde(default)]
    pub constraints: Vec<AttributeConstraint>,
}

impl DropRule {
    /// Rule that removes every element with `tag`
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            constraints: Vec::new(),
        }
    }

    /// Builder-style constraint append
    #[must_use]
    pub fn keep_if<I, S>(mut self, attribute: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.push(AttributeConstraint::new(attribute, allowed));
        self
    }

    /// Whether an element with this rule's tag and the given attribute lookup
    /// is removed
    pub fn drops<'a>(&self, attr: impl Fn(&str) -> Option<&'a str>) -> bool {
        self.constraints.is_empty()
            || self.constraints.iter().any(|c| !c.admits(attr(&c.attribute)))
    }
}

/// Tag relabeling that keeps attributes and children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    /// Tag to relabel
    pub from: String,
    /// New tag name
    pub to: String,
}

impl RenameRule {
    /// Create a rename rule
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The complete rule set the normalizer applies to one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeRules {
    /// Subtree removal rules, applied in order
    pub drop: Vec<DropRule>,
    /// Tag relabeling rules, applied in order after dropping
    pub rename: Vec<RenameRule>,
    /// Attribute names removed from every remaining element
    pub strip_attributes: Vec<String>,
    /// Prefix for relative `href` values
    pub base_url: Option<String>,
    /// Source URL to link at the end of the document
    pub link_to_original: Option<String>,
}
