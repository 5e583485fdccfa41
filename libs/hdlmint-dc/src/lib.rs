//! Dublin Core identifier editing for handle reconciliation.
//!
//! A handle-bearing object advertises its canonical handle URL through a
//! `dc:identifier` element in its Dublin Core datastream. This crate owns the
//! three edits the reconciler needs:
//!
//! - replace a stale handle identifier in place, preserving sibling order
//! - append a handle identifier when none exists
//! - remove identifiers that exactly match a retracted handle URL
//!
//! The document is parsed into a tree, edited structurally, and re-serialized
//! with pretty-printing. Whitespace-only text nodes are dropped at parse time
//! so repeated edit/serialize cycles are byte-stable.
//!
//! ## Example
//!
//! ```rust
//! use hdlmint_dc::DublinCore;
//!
//! let xml = br#"<oai_dc:dc
//!     xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/"
//!     xmlns:dc="http://purl.org/dc/elements/1.1/">
//!   <dc:title>An example object</dc:title>
//! </oai_dc:dc>"#;
//!
//! let mut doc = DublinCore::parse(xml).unwrap();
//! assert!(doc.ensure_identifier("http://hdl.handle.net/1234/demo:1"));
//! // A second pass finds the identifier already current and changes nothing.
//! assert!(!doc.ensure_identifier("http://hdl.handle.net/1234/demo:1"));
//! let serialized = doc.to_bytes().unwrap();
//! assert!(String::from_utf8(serialized).unwrap().contains("hdl.handle.net"));
//! ```

mod error;

pub use error::{DcError, Result};

use tracing::debug;
use xmltree::{Element, EmitterConfig, XMLNode};

/// Base URL of the global handle resolver; a `dc:identifier` starting with
/// this is treated as the object's handle identifier.
pub const HANDLE_RESOLVER_BASE: &str = "http://hdl.handle.net";

/// Namespace of the `oai_dc:dc` document root.
pub const OAI_DC_NS: &str = "http://www.openarchives.org/OAI/2.0/oai_dc/";

/// Namespace of the Dublin Core elements (`dc:identifier` and friends).
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// A parsed Dublin Core document, edited through structural tree operations.
///
/// Matching is namespace-aware: only `identifier` elements resolved into the
/// [`DC_NS`] namespace are considered, regardless of the prefix the document
/// bound them to. Edits operate on the direct children of the document root;
/// DC datastreams are flat.
#[derive(Debug, Clone)]
pub struct DublinCore {
    root: Element,
}

impl DublinCore {
    /// Parse DC datastream content.
    ///
    /// Whitespace-only text nodes are stripped so that a document which has
    /// already been pretty-printed round-trips without accumulating
    /// indentation.
    ///
    /// # Errors
    ///
    /// Returns `DcError::Parse` if the content is not well-formed XML.
    pub fn parse(content: &[u8]) -> Result<Self> {
        let mut root = Element::parse(content)?;
        strip_formatting(&mut root);
        Ok(Self { root })
    }

    /// Text of every `dc:identifier` element, in document order.
    pub fn identifiers(&self) -> Vec<String> {
        self.root
            .children
            .iter()
            .filter_map(XMLNode::as_element)
            .filter(|element| is_dc_identifier(element))
            .filter_map(|element| element.get_text().map(|text| text.into_owned()))
            .collect()
    }

    /// Make `handle_url` the document's handle identifier.
    ///
    /// The first `dc:identifier` whose text starts with
    /// [`HANDLE_RESOLVER_BASE`] is inspected: if it already equals
    /// `handle_url` the document is left untouched, otherwise it is replaced
    /// in place so sibling order is preserved. Scanning stops at that first
    /// match; a duplicate left behind by an earlier writer is repaired one
    /// invocation at a time. When no handle identifier exists at all, a new
    /// one is appended as the root's last child.
    ///
    /// Returns `true` if the document was modified and needs to be persisted.
    pub fn ensure_identifier(&mut self, handle_url: &str) -> bool {
        let existing = self.root.children.iter().position(|node| {
            node.as_element().is_some_and(|element| {
                is_dc_identifier(element)
                    && element
                        .get_text()
                        .is_some_and(|text| text.starts_with(HANDLE_RESOLVER_BASE))
            })
        });

        match existing {
            Some(index) => {
                let current = self.root.children[index]
                    .as_element()
                    .and_then(|element| element.get_text())
                    .map(|text| text.into_owned())
                    .unwrap_or_default();
                if current == handle_url {
                    return false;
                }
                debug!(stale = %current, replacement = %handle_url, "replacing stale handle identifier");
                self.root.children[index] = XMLNode::Element(identifier_element(handle_url));
                true
            }
            None => {
                debug!(identifier = %handle_url, "appending handle identifier");
                self.root
                    .children
                    .push(XMLNode::Element(identifier_element(handle_url)));
                true
            }
        }
    }

    /// Remove every `dc:identifier` whose text exactly equals `handle_url`.
    ///
    /// Returns `true` if at least one node was removed and the document needs
    /// to be persisted.
    pub fn remove_identifier(&mut self, handle_url: &str) -> bool {
        let before = self.root.children.len();
        self.root.children.retain(|node| {
            !node.as_element().is_some_and(|element| {
                is_dc_identifier(element)
                    && element.get_text().is_some_and(|text| text == handle_url)
            })
        });
        let removed = self.root.children.len() != before;
        if removed {
            debug!(identifier = %handle_url, "removed handle identifier");
        }
        removed
    }

    /// Serialize the document with pretty-printed output.
    ///
    /// # Errors
    ///
    /// Returns `DcError::Serialize` if the tree cannot be written.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let config = EmitterConfig::new()
            .perform_indent(true)
            .write_document_declaration(true);
        let mut out = Vec::new();
        self.root.write_with_config(&mut out, config)?;
        Ok(out)
    }
}

fn is_dc_identifier(element: &Element) -> bool {
    element.name == "identifier" && element.namespace.as_deref() == Some(DC_NS)
}

fn identifier_element(handle_url: &str) -> Element {
    let mut element = Element::new("identifier");
    element.prefix = Some("dc".to_string());
    element.namespace = Some(DC_NS.to_string());
    element
        .children
        .push(XMLNode::Text(handle_url.to_string()));
    element
}

fn strip_formatting(element: &mut Element) {
    element.children.retain(|node| match node {
        XMLNode::Text(text) => !text.trim().is_empty(),
        _ => true,
    });
    for node in &mut element.children {
        if let XMLNode::Element(child) = node {
            strip_formatting(child);
        }
    }
}
