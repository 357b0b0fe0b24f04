use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CoachMarksError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CoachMarksError::Serde("x".to_owned())
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        CoachMarksError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CoachMarksError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: CoachMarksError = serde_json::from_str::<u32>("{").unwrap_err().into();
    assert!(matches!(err, CoachMarksError::Serde(_)));
}
