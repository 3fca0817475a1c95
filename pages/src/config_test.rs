use super::*;

use std::io::Write;

#[test]
fn from_json_flattens_scalars_to_strings() {
    let map = ConfigMap::from_json(
        r#"{"server_ip": "127.0.0.1", "server_port": 5000, "k": "10", "quiet": true}"#,
    )
    .expect("parse");

    assert_eq!(map.get("server_ip"), Some("127.0.0.1"));
    assert_eq!(map.get("server_port"), Some("5000"));
    assert_eq!(map.get("k"), Some("10"));
    assert_eq!(map.get("quiet"), Some("true"));
}

#[test]
fn from_json_skips_nested_values() {
    let map = ConfigMap::from_json(r#"{"k": 5, "clients": [1, 2], "extra": {"a": 1}, "none": null}"#)
        .expect("parse");

    assert_eq!(map.get("k"), Some("5"));
    assert_eq!(map.get("clients"), None);
    assert_eq!(map.get("extra"), None);
    assert_eq!(map.get("none"), None);
}

#[test]
fn from_json_rejects_non_object() {
    assert!(ConfigMap::from_json("[1, 2, 3]").is_err());
    assert!(ConfigMap::from_json("server_ip: x").is_err());
}

#[test]
fn parse_reads_typed_values() {
    let map: ConfigMap = [("server_port", "5000"), ("p", " 3 ")].into_iter().collect();
    assert_eq!(map.parse::<u16>("server_port").expect("port"), 5000);
    assert_eq!(map.parse::<usize>("p").expect("p"), 3);
}

#[test]
fn parse_reports_missing_key() {
    let map = ConfigMap::default();
    let err = map.parse::<u16>("server_port").expect_err("missing");
    assert!(matches!(err, ConfigError::MissingKey(ref key) if key == "server_port"));
}

#[test]
fn parse_reports_invalid_value() {
    let map: ConfigMap = [("server_port", "http")].into_iter().collect();
    let err = map.parse::<u16>("server_port").expect_err("invalid");
    assert!(err.to_string().contains("server_port"));
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn parse_or_falls_back_only_when_absent() {
    let map: ConfigMap = [("k", "abc")].into_iter().collect();
    assert_eq!(map.parse_or::<usize>("p", 0).expect("default"), 0);
    assert!(map.parse_or::<usize>("k", 5).is_err());
}

#[test]
fn set_overrides_loaded_value() {
    let mut map: ConfigMap = [("k", "5")].into_iter().collect();
    map.set("k", "7");
    assert_eq!(map.get("k"), Some("7"));
}

#[test]
fn load_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, r#"{{"server_ip": "0.0.0.0", "server_port": "9000"}}"#).expect("write");

    let map = ConfigMap::load(file.path()).expect("load");
    assert_eq!(map.get("server_ip"), Some("0.0.0.0"));
    assert_eq!(map.get("server_port"), Some("9000"));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = ConfigMap::load(dir.path().join("absent.json")).expect_err("missing");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn load_reports_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "not json").expect("write");

    let err = ConfigMap::load(file.path()).expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse { .. }));
}
