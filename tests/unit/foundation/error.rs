use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StoryreelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StoryreelError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        StoryreelError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        StoryreelError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        StoryreelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StoryreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
    let err: StoryreelError = parse.unwrap_err().into();
    assert!(matches!(err, StoryreelError::Serde(_)));
}
