use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SatmarkError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        SatmarkError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        SatmarkError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        SatmarkError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn is_config_only_matches_config() {
    assert!(SatmarkError::config("rows").is_config());
    assert!(!SatmarkError::invalid_argument("t").is_config());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SatmarkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
