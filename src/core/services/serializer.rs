//! Canonical serializer
//!
//! Pretty-prints a [`Document`] one node per line with one space of
//! indentation per level. Output depends only on the tree, so equal trees
//! always serialize to equal bytes.
//!
//! Text handling: adjacent text nodes are coalesced, ASCII whitespace runs
//! collapse to a single space and the result is trimmed. Re-parsing the
//! output therefore yields the same tree again.

use crate::core::models::{Document, Element, Node};

/// Elements that never have content
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text the parser does not entity-decode
const RAW_TEXT_ELEMENTS: &[&str] =
    &["script", "style", "xmp", "iframe", "noembed", "noframes", "noscript"];

const INDENT: &str = " ";

/// Serialize `doc` to its canonical pretty-printed form
#[must_use]
pub fn to_pretty_html(doc: &Document) -> String {
    let mut out = String::new();
    write_nodes(&doc.children, 0, false, &mut out);
    out
}

fn write_nodes(nodes: &[Node], depth: usize, raw: bool, out: &mut String) {
    let mut text = String::new();
    for node in nodes {
        match node {
            Node::Text(t) => text.push_str(t),
            Node::Element(el) => {
                flush_text(&mut text, depth, raw, out);
                write_element(el, depth, out);
            },
            Node::Comment(c) => {
                flush_text(&mut text, depth, raw, out);
                indent(depth, out);
                out.push_str("<!--");
                out.push_str(c);
                out.push_str("-->\n");
            },
        }
    }
    flush_text(&mut text, depth, raw, out);
}

fn flush_text(text: &mut String, depth: usize, raw: bool, out: &mut String) {
    let collapsed = text.split_ascii_whitespace().collect::<Vec<_>>().join(" ");
    text.clear();
    if collapsed.is_empty() {
        return;
    }
    indent(depth, out);
    if raw {
        out.push_str(&collapsed);
    } else {
        escape_text(&collapsed, out);
    }
    out.push('\n');
}

fn write_element(el: &Element, depth: usize, out: &mut String) {
    indent(depth, out);
    out.push('<');
    out.push_str(&el.tag);
    for attr in &el.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape_attr(&attr.value, out);
        out.push('"');
    }

    if el.children.is_empty() {
        if VOID_ELEMENTS.contains(&el.tag.as_str()) {
            out.push_str("/>\n");
        } else {
            out.push_str("></");
            out.push_str(&el.tag);
            out.push_str(">\n");
        }
        return;
    }

    out.push_str(">\n");
    let raw = RAW_TEXT_ELEMENTS.contains(&el.tag.as_str());
    write_nodes(&el.children, depth + 1, raw, out);
    indent(depth, out);
    out.push_str("</");
    out.push_str(&el.tag);
    out.push_str(">\n");
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
