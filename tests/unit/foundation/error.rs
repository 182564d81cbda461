use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TransformimeError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        TransformimeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        TransformimeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TransformimeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
