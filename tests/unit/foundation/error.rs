use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KineoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(KineoError::render("x").to_string().contains("render error:"));
    assert!(KineoError::export("x").to_string().contains("export error:"));
    assert!(
        KineoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = KineoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
