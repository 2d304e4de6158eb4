use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        EmojiError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(EmojiError::asset("x").to_string().contains("asset error:"));
    assert!(EmojiError::render("x").to_string().contains("render error:"));
    assert!(EmojiError::export("x").to_string().contains("export error:"));
    assert!(
        EmojiError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = EmojiError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
