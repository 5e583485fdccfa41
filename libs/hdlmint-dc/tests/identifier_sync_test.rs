//! Fixture tests for Dublin Core identifier editing
//!
//! These tests verify that:
//! 1. A handle identifier is appended when the document has none
//! 2. A stale handle identifier is replaced in place, preserving order
//! 3. An already-current identifier produces no modification at all
//! 4. Repeated edits are idempotent and byte-stable
//! 5. Retraction removes exactly the nodes equal to the handle URL

use hdlmint_dc::{DublinCore, DcError, HANDLE_RESOLVER_BASE};

const HANDLE_URL: &str = "http://hdl.handle.net/1234.5678/obj:1";
const STALE_HANDLE_URL: &str = "http://hdl.handle.net/1234.5678/obj:superseded";

const DC_WITHOUT_HANDLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>Basket weaving field notes</dc:title>
  <dc:identifier>obj:1</dc:identifier>
  <dc:description>Notes collected during the 2009 survey.</dc:description>
</oai_dc:dc>"#;

const DC_WITH_STALE_HANDLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:title>Basket weaving field notes</dc:title>
  <dc:identifier>http://hdl.handle.net/1234.5678/obj:superseded</dc:identifier>
  <dc:description>Notes collected during the 2009 survey.</dc:description>
</oai_dc:dc>"#;

const DC_WITH_DUPLICATE_HANDLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:identifier>http://hdl.handle.net/1234.5678/obj:superseded</dc:identifier>
  <dc:identifier>http://hdl.handle.net/1234.5678/obj:also-superseded</dc:identifier>
</oai_dc:dc>"#;

fn handle_identifiers(doc: &DublinCore) -> Vec<String> {
    doc.identifiers()
        .into_iter()
        .filter(|text| text.starts_with(HANDLE_RESOLVER_BASE))
        .collect()
}

#[test]
fn appends_identifier_when_document_has_none() {
    let mut doc = DublinCore::parse(DC_WITHOUT_HANDLE.as_bytes()).expect("fixture parses");

    assert!(doc.ensure_identifier(HANDLE_URL));

    let reparsed = DublinCore::parse(&doc.to_bytes().unwrap()).unwrap();
    assert_eq!(handle_identifiers(&reparsed), vec![HANDLE_URL.to_string()]);
    // The local identifier is untouched and the handle lands last.
    assert_eq!(
        reparsed.identifiers(),
        vec!["obj:1".to_string(), HANDLE_URL.to_string()]
    );
}

#[test]
fn replaces_stale_identifier_in_place() {
    let mut doc = DublinCore::parse(DC_WITH_STALE_HANDLE.as_bytes()).expect("fixture parses");

    assert!(doc.ensure_identifier(HANDLE_URL));

    let reparsed = DublinCore::parse(&doc.to_bytes().unwrap()).unwrap();
    assert_eq!(handle_identifiers(&reparsed), vec![HANDLE_URL.to_string()]);
    // Replacement happened in place: still exactly one identifier, between
    // title and description rather than appended at the end.
    let serialized = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
    let identifier_at = serialized.find(HANDLE_URL).unwrap();
    let description_at = serialized.find("dc:description").unwrap();
    assert!(identifier_at < description_at);
}

#[test]
fn current_identifier_is_left_untouched() {
    let mut doc = DublinCore::parse(DC_WITH_STALE_HANDLE.as_bytes()).unwrap();
    doc.ensure_identifier(HANDLE_URL);
    let settled = doc.to_bytes().unwrap();

    let mut doc = DublinCore::parse(&settled).unwrap();
    assert!(!doc.ensure_identifier(HANDLE_URL));
    assert_eq!(doc.to_bytes().unwrap(), settled);
}

#[test]
fn repeated_serialization_is_byte_stable() {
    let mut doc = DublinCore::parse(DC_WITHOUT_HANDLE.as_bytes()).unwrap();
    doc.ensure_identifier(HANDLE_URL);
    let first = doc.to_bytes().unwrap();

    let second = DublinCore::parse(&first).unwrap().to_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn only_first_of_duplicate_identifiers_is_repaired() {
    let mut doc = DublinCore::parse(DC_WITH_DUPLICATE_HANDLES.as_bytes()).unwrap();

    assert!(doc.ensure_identifier(HANDLE_URL));

    let identifiers = doc.identifiers();
    assert_eq!(identifiers[0], HANDLE_URL);
    // The second duplicate is out of scope for a single pass.
    assert_eq!(
        identifiers[1],
        "http://hdl.handle.net/1234.5678/obj:also-superseded"
    );
}

#[test]
fn removes_identifier_matching_retracted_handle() {
    let mut doc = DublinCore::parse(DC_WITH_STALE_HANDLE.as_bytes()).unwrap();

    assert!(doc.remove_identifier(STALE_HANDLE_URL));

    let reparsed = DublinCore::parse(&doc.to_bytes().unwrap()).unwrap();
    assert!(handle_identifiers(&reparsed).is_empty());
    // Everything else survives.
    assert!(String::from_utf8(doc.to_bytes().unwrap())
        .unwrap()
        .contains("Basket weaving field notes"));
}

#[test]
fn remove_takes_every_exact_duplicate() {
    let duplicated = r#"<oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:identifier>http://hdl.handle.net/1234.5678/obj:1</dc:identifier>
  <dc:identifier>http://hdl.handle.net/1234.5678/obj:1</dc:identifier>
</oai_dc:dc>"#;
    let mut doc = DublinCore::parse(duplicated.as_bytes()).unwrap();

    assert!(doc.remove_identifier(HANDLE_URL));

    assert!(doc.identifiers().is_empty());
}

#[test]
fn remove_is_a_noop_without_a_match() {
    let mut doc = DublinCore::parse(DC_WITHOUT_HANDLE.as_bytes()).unwrap();

    assert!(!doc.remove_identifier(HANDLE_URL));

    assert_eq!(doc.identifiers(), vec!["obj:1".to_string()]);
}

#[test]
fn non_dc_identifiers_are_not_matched() {
    let foreign = r#"<oai_dc:dc xmlns:oai_dc="http://www.openarchives.org/OAI/2.0/oai_dc/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:other="http://example.com/other">
  <other:identifier>http://hdl.handle.net/1234.5678/obj:1</other:identifier>
</oai_dc:dc>"#;
    let mut doc = DublinCore::parse(foreign.as_bytes()).unwrap();

    // The foreign-namespace node neither satisfies the lookup...
    assert!(doc.ensure_identifier(HANDLE_URL));
    // ...nor the retraction match.
    assert!(doc.remove_identifier(HANDLE_URL));
    assert!(!doc.remove_identifier(HANDLE_URL));
}

#[test]
fn malformed_content_is_rejected() {
    let result = DublinCore::parse(b"not xml at all");
    assert!(matches!(result, Err(DcError::Parse(_))));
}
