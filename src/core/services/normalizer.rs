//! Tree normalizer - reduces a working document to its canonical shape
//!
//! Passes run in a fixed order, each one relying on the previous:
//!
//! 1. drop rules remove unwanted subtrees
//! 2. rename rules relabel tags
//! 3. comments are removed
//! 4. configured attributes are stripped and relative links are prefixed
//! 5. optionally, a link to the source page is appended
//!
//! Structural passes first collect the [`NodePath`]s to edit and only then
//! apply the edits, so no traversal ever observes a tree it is mutating.
//! Drop and rename rules apply below the document roots; the roots themselves
//! are never removed or relabeled.

use crate::core::models::{
    Document, DropRule, Element, Node, NodePath, NormalizeRules, RenameRule,
};

/// Visible text of the appended source link
pub const ANNOTATION_TEXT: &str = "Link to original website";

/// Links starting with this prefix are already absolute
const SECURE_SCHEME: &str = "https://";

/// Counters describing what a normalization changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Subtrees removed by drop rules
    pub dropped: usize,
    /// Elements relabeled by rename rules
    pub renamed: usize,
    /// Comments removed
    pub comments: usize,
    /// Attributes removed
    pub attributes: usize,
    /// `href` values rewritten
    pub links: usize,
    /// Whether the source link was appended
    pub annotated: bool,
}

/// Apply every pass of `rules` to `doc`
pub fn normalize(doc: &mut Document, rules: &NormalizeRules) -> NormalizeStats {
    let mut stats = NormalizeStats::default();

    for rule in &rules.drop {
        let paths = drop_paths(doc, rule);
        stats.dropped += doc.remove_all(paths);
    }

    for rule in &rules.rename {
        stats.renamed += rename(doc, rule);
    }

    let comments = comment_paths(doc);
    stats.comments = doc.remove_all(comments);

    for node in &mut doc.children {
        strip_attributes(node, rules, &mut stats);
    }

    if let Some(url) = &rules.link_to_original {
        stats.annotated = annotate(doc, url);
    }

    stats
}

/// Paths of every element below the roots that `rule` removes
///
/// A removed element is not descended into; a kept element with the rule's
/// tag is, so nested elements sharing the tag are judged on their own.
#[must_use]
pub fn drop_paths(doc: &Document, rule: &DropRule) -> Vec<NodePath> {
    let mut out = Vec::new();
    for (idx, node) in doc.children.iter().enumerate() {
        if let Node::Element(root) = node {
            let mut path = vec![idx];
            collect_drops(&root.children, rule, &mut path, &mut out);
        }
    }
    out
}

fn collect_drops(
    children: &[Node],
    rule: &DropRule,
    path: &mut NodePath,
    out: &mut Vec<NodePath>,
) {
    for (idx, child) in children.iter().enumerate() {
        let Node::Element(el) = child else { continue };
        path.push(idx);
        if el.tag == rule.tag && rule.drops(|name| el.attr(name)) {
            out.push(path.clone());
        } else {
            collect_drops(&el.children, rule, path, out);
        }
        path.pop();
    }
}

fn rename(doc: &mut Document, rule: &RenameRule) -> usize {
    let mut paths = Vec::new();
    for (idx, node) in doc.children.iter().enumerate() {
        if let Node::Element(root) = node {
            let mut path = vec![idx];
            collect_tagged(&root.children, &rule.from, &mut path, &mut paths);
        }
    }
    let mut renamed = 0;
    for path in paths {
        if let Some(Node::Element(el)) = doc.node_mut(&path) {
            el.tag.clone_from(&rule.to);
            renamed += 1;
        }
    }
    renamed
}

fn collect_tagged(children: &[Node], tag: &str, path: &mut NodePath, out: &mut Vec<NodePath>) {
    for (idx, child) in children.iter().enumerate() {
        let Node::Element(el) = child else { continue };
        path.push(idx);
        if el.tag == tag {
            out.push(path.clone());
        }
        collect_tagged(&el.children, tag, path, out);
        path.pop();
    }
}

fn comment_paths(doc: &Document) -> Vec<NodePath> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    collect_comments(&doc.children, &mut path, &mut out);
    out
}

fn collect_comments(children: &[Node], path: &mut NodePath, out: &mut Vec<NodePath>) {
    for (idx, child) in children.iter().enumerate() {
        path.push(idx);
        match child {
            Node::Comment(_) => out.push(path.clone()),
            Node::Element(el) => collect_comments(&el.children, path, out),
            Node::Text(_) => {},
        }
        path.pop();
    }
}

fn strip_attributes(node: &mut Node, rules: &NormalizeRules, stats: &mut NormalizeStats) {
    let Node::Element(el) = node else { return };

    for name in &rules.strip_attributes {
        if el.remove_attr(name).is_some() {
            stats.attributes += 1;
        }
    }

    if let Some(base) = &rules.base_url {
        let fixed = el.attr("href").and_then(|href| absolutize(href, base));
        if let Some(fixed) = fixed {
            el.set_attr("href", &fixed);
            stats.links += 1;
        }
    }

    for child in &mut el.children {
        strip_attributes(child, rules, stats);
    }
}

/// `base + href` unless `href` already starts with `base` or is an https URL
///
/// Plain concatenation: a relative path without a leading slash yields a
/// malformed URL.
#[must_use]
pub fn absolutize(href: &str, base: &str) -> Option<String> {
    if href.starts_with(base) || href.starts_with(SECURE_SCHEME) {
        None
    } else {
        Some(format!("{base}{href}"))
    }
}

/// Two line breaks and a link to `url`
#[must_use]
pub fn annotation(url: &str) -> [Node; 3] {
    [
        Node::Element(Element::new("br")),
        Node::Element(Element::new("br")),
        Node::Element(
            Element::new("a").with_attr("href", url).with_child(Node::text(ANNOTATION_TEXT)),
        ),
    ]
}

/// Append the source link unless it is already there
///
/// A whole page gets it at the end of `<body>`, where a parser would move it
/// anyway; a selected subtree gets it after the roots.
fn annotate(doc: &mut Document, url: &str) -> bool {
    let nodes = annotation(url);
    match body_path(doc) {
        Some(path) => match doc.node_mut(&path) {
            Some(Node::Element(body)) => append_once(&mut body.children, nodes),
            _ => false,
        },
        None => append_once(&mut doc.children, nodes),
    }
}

fn append_once(children: &mut Vec<Node>, nodes: [Node; 3]) -> bool {
    if children.ends_with(&nodes) {
        return false;
    }
    children.extend(nodes);
    true
}

/// Path of `<body>` when a root is `<html>`
fn body_path(doc: &Document) -> Option<NodePath> {
    doc.children.iter().enumerate().find_map(|(idx, node)| {
        let html = node.as_element().filter(|el| el.tag == "html")?;
        html.children
            .iter()
            .position(|child| child.as_element().is_some_and(|el| el.tag == "body"))
            .map(|body| vec![idx, body])
    })
}
