use super::*;

#[test]
fn empty_object_uses_defaults() {
    let s = ReelSettings::from_json_str("{}").unwrap();
    assert_eq!(s, ReelSettings::default());
    assert_eq!(s.fps.as_f64(), 30.0);
}

#[test]
fn partial_override() {
    let s = ReelSettings::from_json_str(r#"{"fps":{"num":60,"den":1}}"#).unwrap();
    assert_eq!(s.fps.num, 60);
    assert_eq!(s.time_scale, 1.0);
}

#[test]
fn rejects_bad_values() {
    assert!(matches!(
        ReelSettings::from_json_str(r#"{"time_scale":0}"#),
        Err(ReelError::Validation(_))
    ));
    assert!(ReelSettings::from_json_str(r#"{"fps":{"num":30,"den":0}}"#).is_err());
    assert!(matches!(
        ReelSettings::from_json_str(r#"{"speed":2}"#),
        Err(ReelError::Serde(_))
    ));
}

#[test]
fn missing_file_is_reported() {
    let err = ReelSettings::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
}
