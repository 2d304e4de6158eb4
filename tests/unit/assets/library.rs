use super::*;
use crate::assets::source::MemoryAssetSource;

const SVG: &[u8] =
    br##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect width="8" height="8" fill="#f00"/></svg>"##;

#[test]
fn none_slot_prepended_except_for_head() {
    let src = MemoryAssetSource::new()
        .with(Category::Head, "a.svg", SVG)
        .with(Category::Eyes, "a.svg", SVG)
        .with(Category::Eyes, "b.svg", SVG);
    let lib = AssetLibrary::load(&src);

    assert_eq!(lib.list(Category::Head).len(), 1);
    assert!(!lib.list(Category::Head).get(0).unwrap().is_none_slot());

    for c in &Category::ALL[1..] {
        let first = lib.list(*c).get(0).unwrap();
        assert!(first.is_none_slot());
        assert!(first.layer.is_none());
    }
    assert_eq!(lib.list(Category::Eyes).len(), 3);
    assert_eq!(lib.list(Category::Mouth).len(), 1);
}

#[test]
fn order_is_lexicographic_by_name() {
    let src = MemoryAssetSource::new()
        .with(Category::Mouth, "smile.svg", SVG)
        .with(Category::Mouth, "frown.svg", SVG)
        .with(Category::Mouth, "grin.svg", SVG);
    let lib = AssetLibrary::load(&src);
    let names: Vec<_> = lib
        .list(Category::Mouth)
        .variants()
        .iter()
        .filter_map(|v| v.asset.as_ref().map(|a| a.file_name().to_string()))
        .collect();
    assert_eq!(names, ["frown.svg", "grin.svg", "smile.svg"]);
}

#[test]
fn broken_assets_are_dropped_not_fatal() {
    let src = MemoryAssetSource::new()
        .with(Category::Head, "good.svg", SVG)
        .with(Category::Head, "bad.svg", b"<svg".to_vec())
        .with(Category::Eyes, "bad.png", b"nope".to_vec());
    let lib = AssetLibrary::load(&src);

    assert_eq!(lib.list(Category::Head).len(), 1);
    assert_eq!(lib.list(Category::Eyes).len(), 1);
    assert_eq!(lib.dropped().len(), 2);
    assert_eq!(lib.lens().0, [1, 1, 1, 1, 1]);
}

#[test]
fn empty_source_leaves_head_empty() {
    let lib = AssetLibrary::load(&MemoryAssetSource::new());
    assert!(lib.list(Category::Head).is_empty());
    assert!(lib.variant(Category::Head, 0).is_none());
    assert!(lib.variant(Category::Detail, 0).unwrap().is_none_slot());
}
