//! Tree selector - locates the watched element
//!
//! Pure query over the tagged tree; nothing is mutated.

use crate::core::error::SelectionError;
use crate::core::models::{Document, Element, Node, Selector, attribute_matches};

/// Whether `el` satisfies the selector's tag and every attribute constraint
#[must_use]
pub fn matches(el: &Element, selector: &Selector) -> bool {
    el.tag == selector.tag
        && selector.attributes.iter().all(|(name, wanted)| {
            el.attr(name).is_some_and(|actual| attribute_matches(name, actual, wanted))
        })
}

/// Every element matching `selector`, in document order
#[must_use]
pub fn find_all<'a>(doc: &'a Document, selector: &Selector) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect(&doc.children, selector, &mut found);
    found
}

fn collect<'a>(nodes: &'a [Node], selector: &Selector, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(el) = node {
            if matches(el, selector) {
                found.push(el);
            }
            collect(&el.children, selector, found);
        }
    }
}

/// The single element matching `selector`
///
/// Zero or several matches are a [`SelectionError`].
pub fn select_one<'a>(
    doc: &'a Document,
    selector: &Selector,
) -> Result<&'a Element, SelectionError> {
    match find_all(doc, selector).as_slice() {
        [only] => Ok(*only),
        other => Err(SelectionError {
            selector: selector.to_string(),
            found: other.len(),
        }),
    }
}

/// Working document for a job: the whole page, or the selected element alone
pub fn working_document(
    doc: Document,
    selector: &Selector,
    whole_document: bool,
) -> Result<Document, SelectionError> {
    if whole_document {
        return Ok(doc);
    }
    let root = select_one(&doc, selector)?.clone();
    Ok(Document::from_element(root))
}
