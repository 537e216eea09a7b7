use ext_fs::{ConfigStore, Error, NormalizedPath};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Sample {
    extensions_dir: String,
    disabled_extensions: Vec<String>,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("extensions.toml");
    fs::write(
        &path,
        "extensions_dir = \"ext\"\ndisabled_extensions = [\"foo\"]\n",
    )
    .unwrap();

    let loaded: Sample = ConfigStore::new().load(&NormalizedPath::new(&path)).unwrap();
    assert_eq!(
        loaded,
        Sample {
            extensions_dir: "ext".into(),
            disabled_extensions: vec!["foo".into()],
        }
    );
}

#[test]
fn test_save_then_load_yaml() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("extensions.yaml"));
    let value = Sample {
        extensions_dir: "plugins".into(),
        disabled_extensions: vec![],
    };

    let store = ConfigStore::new();
    store.save(&path, &value).unwrap();
    let loaded: Sample = store.load(&path).unwrap();

    assert_eq!(loaded, value);
}

#[test]
fn test_load_or_default_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("extensions.toml"));

    let loaded: Sample = ConfigStore::new().load_or_default(&path).unwrap();
    assert_eq!(loaded, Sample::default());
}

#[test]
fn test_parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("extensions.toml");
    fs::write(&path, "extensions_dir = [").unwrap();

    let err = ConfigStore::new()
        .load::<Sample>(&NormalizedPath::new(&path))
        .unwrap_err();
    match err {
        Error::ConfigParse { format, .. } => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("extensions.ini");
    fs::write(&path, "").unwrap();

    let err = ConfigStore::new()
        .load::<Sample>(&NormalizedPath::new(&path))
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
}
