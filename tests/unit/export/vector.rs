use super::*;

const HEAD: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="32" height="32" viewBox="0 0 32 32" fill="none" xmlns="http://www.w3.org/2000/svg">
  <!-- face -->
  <circle cx="16" cy="16" r="15" fill="#fc0"/>
  <g id="shine"><path d="M4 4h2"/></g>
</svg>"##;

const EYES: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><rect x="10" y="12" width="2" height="3" fill="#000"/></svg>"##;

const ROOT: &str = r#"<svg width="32" height="32" viewBox="0 0 32 32" fill="none" xmlns="http://www.w3.org/2000/svg">"#;

#[test]
fn single_document_keeps_exactly_its_children() {
    let merged = merge_svg_documents(&[HEAD], 32).unwrap();
    assert_eq!(
        merged,
        format!(
            r##"{ROOT}<circle cx="16" cy="16" r="15" fill="#fc0"/><g id="shine"><path d="M4 4h2"/></g></svg>"##
        )
    );
}

#[test]
fn children_concatenate_in_input_order() {
    let merged = merge_svg_documents(&[HEAD, EYES], 32).unwrap();
    let circle = merged.find("<circle").unwrap();
    let rect = merged.find("<rect").unwrap();
    assert!(circle < rect);
    assert!(merged.ends_with(r##"<rect x="10" y="12" width="2" height="3" fill="#000"/></svg>"##));
    assert_eq!(merged.matches("<svg").count(), 1);
}

#[test]
fn merged_document_parses_as_svg() {
    let merged = merge_svg_documents(&[HEAD, EYES], 32).unwrap();
    let tree = usvg::Tree::from_str(&merged, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 32.0);
}

#[test]
fn no_documents_gives_empty_root() {
    let merged = merge_svg_documents::<&str>(&[], 32).unwrap();
    assert_eq!(merged, format!("{ROOT}</svg>"));
}

#[test]
fn rejects_non_svg_and_malformed_inputs() {
    assert!(merge_svg_documents(&["<html><p/></html>"], 32).is_err());
    assert!(merge_svg_documents(&["<svg><g></svg>"], 32).is_err());
    assert!(merge_svg_documents(&["just text"], 32).is_err());
}

#[test]
fn self_closing_root_contributes_nothing() {
    let merged = merge_svg_documents(&[r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#], 16).unwrap();
    assert!(merged.contains(r#"viewBox="0 0 16 16""#));
    assert!(merged.ends_with("\"></svg>"));
}

const LINKED: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 32 32"><defs><rect id="r" width="8" height="8" fill="#f00"/></defs><use xlink:href="#r" x="4"/></svg>"##;

#[test]
fn prefixed_namespaces_move_to_merged_root() {
    let merged = merge_svg_documents(&[HEAD, LINKED, LINKED], 32).unwrap();
    assert_eq!(
        merged.matches(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#).count(),
        1
    );
    assert!(merged.starts_with(r#"<svg width="32" height="32" viewBox="0 0 32 32" fill="none" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="#));
    assert!(merged.contains(r##"<use xlink:href="#r" x="4"/>"##));

    let tree = usvg::Tree::from_str(&merged, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 32.0);
}

#[test]
fn conflicting_prefix_bindings_are_rejected() {
    let other = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="urn:not-xlink"><g/></svg>"#;
    let err = merge_svg_documents(&[LINKED, other], 32).unwrap_err();
    assert!(err.to_string().starts_with("export error:"));
    assert!(err.to_string().contains("xlink"));
}
