use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DoodleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(DoodleError::render("x").to_string().contains("render error:"));
    assert!(
        DoodleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DoodleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: DoodleError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, DoodleError::Serde(_)));
}
