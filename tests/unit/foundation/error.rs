use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MolduraError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MolduraError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        MolduraError::no_base_image("x")
            .to_string()
            .contains("no base image:")
    );
    assert!(
        MolduraError::overlay_not_ready("x")
            .to_string()
            .contains("overlay not ready:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MolduraError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
