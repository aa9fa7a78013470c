//! html5ever → tagged tree conversion

use html5ever::tendril::TendrilSink;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::error::JobError;
use crate::core::models::{Attribute, Document, Element, Node};

/// Parse raw bytes (decoded as UTF-8, lossily) into a [`Document`]
///
/// Doctypes and processing instructions are discarded, as is text that is
/// only whitespace. Malformed markup is repaired by the HTML5 algorithm.
pub fn parse_document(bytes: &[u8]) -> Result<Document, JobError> {
    let dom = html5ever::parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut &bytes[..])
        .map_err(|e| JobError::Parse(e.to_string()))?;

    let mut doc = Document::default();
    for child in dom.document.children.borrow().iter() {
        if let Some(node) = convert(child) {
            doc.children.push(node);
        }
    }
    debug!("parsed {} bytes into {} top-level node(s)", bytes.len(), doc.children.len());
    Ok(doc)
}

/// Parse an in-memory string
pub fn parse_str(html: &str) -> Result<Document, JobError> {
    parse_document(html.as_bytes())
}

fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let mut el = Element::new(name.local.to_string());
            el.attributes = attrs
                .borrow()
                .iter()
                .map(|attr| Attribute::new(attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            el.children = handle.children.borrow().iter().filter_map(convert).collect();
            Some(Node::Element(el))
        },
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            (!text.trim().is_empty()).then_some(Node::Text(text))
        },
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        NodeData::Document | NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {
            None
        },
    }
}
