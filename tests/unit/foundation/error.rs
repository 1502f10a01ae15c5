use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlocksError::unknown_operator("^")
            .to_string()
            .contains("unknown operator kind: ^")
    );
    assert!(
        BlocksError::unknown_function("sin")
            .to_string()
            .contains("unknown function kind: sin")
    );
    assert!(
        BlocksError::unknown_value("null")
            .to_string()
            .contains("unknown value kind:")
    );
    assert!(BlocksError::config("x").to_string().contains("config error:"));
    assert!(
        BlocksError::from(ParseError::new(3, "boom"))
            .to_string()
            .starts_with("parse error:")
    );
}

#[test]
fn only_missing_owner_is_recoverable() {
    assert!(BlocksError::MissingOwnerExpression(PlacedId(7)).is_recoverable());
    assert!(!BlocksError::unknown_operator("%").is_recoverable());
    assert!(!BlocksError::from(ParseError::new(0, "x")).is_recoverable());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BlocksError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
