use super::*;

#[test]
fn default_order_is_valid() {
    let cfg = PrecedenceConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.order.first().map(String::as_str), Some("application/javascript"));
    assert_eq!(cfg.order.last().map(String::as_str), Some("text/plain"));
}

#[test]
fn parses_order_from_json() {
    let cfg = PrecedenceConfig::from_json_str(r#"{"order": ["text/plain", "text/html"]}"#).unwrap();
    assert_eq!(cfg.order, vec!["text/plain", "text/html"]);
}

#[test]
fn malformed_json_is_a_validation_error() {
    for s in ["{", r#"{"order": "text/plain"}"#, r#"{"order": [], "extra": 1}"#] {
        let err = PrecedenceConfig::from_json_str(s).unwrap_err();
        assert!(matches!(err, TransformimeError::Validation(_)), "{s}");
    }
}

#[test]
fn bad_entries_are_configuration_errors() {
    for s in [
        r#"{"order": ["text/plain", "text/plain"]}"#,
        r#"{"order": ["plain"]}"#,
    ] {
        let err = PrecedenceConfig::from_json_str(s).unwrap_err();
        assert!(matches!(err, TransformimeError::Configuration(_)), "{s}");
    }
}

#[test]
fn missing_file_reports_path() {
    let err = PrecedenceConfig::from_path(Path::new("definitely/missing/order.json")).unwrap_err();
    assert!(matches!(err, TransformimeError::Other(_)));
    assert!(format!("{err:#}").contains("order.json"));
}
