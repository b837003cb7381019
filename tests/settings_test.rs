//! Loading format settings from disk

use std::fs;

use score_engine::models::PitchLanguage;
use score_engine::renderers::lilypond::ConfigError;
use score_engine::renderers::{DocumentTemplate, FormatSettings};
use tempfile::TempDir;

#[test]
fn test_load_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("format.yaml");
    fs::write(
        &path,
        "language: english\ntemplate: standard\ntitle: Nocturne\nindent: 2\n",
    )
    .unwrap();

    let settings = FormatSettings::load(&path).unwrap();
    assert_eq!(settings.language, PitchLanguage::English);
    assert_eq!(settings.template, DocumentTemplate::Standard);
    assert_eq!(settings.title.as_deref(), Some("Nocturne"));
    assert_eq!(settings.indent, 2);
    assert_eq!(settings.composer, None);
}

#[test]
fn test_load_json_file_with_uppercase_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("format.JSON");
    fs::write(&path, r#"{"lilypond_version": "2.25.10", "language": "deutsch"}"#).unwrap();

    let settings = FormatSettings::load(&path).unwrap();
    assert_eq!(settings.lilypond_version, "2.25.10");
    assert_eq!(settings.language, PitchLanguage::Deutsch);
    assert_eq!(settings.template, DocumentTemplate::Minimal);
}

#[test]
fn test_saved_yaml_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.yml");
    let settings = FormatSettings {
        composer: Some("Satie".to_string()),
        language: PitchLanguage::Italiano,
        ..FormatSettings::default()
    };
    fs::write(&path, settings.to_yaml_string().unwrap()).unwrap();

    assert_eq!(FormatSettings::load(&path).unwrap(), settings);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("format.toml");
    fs::write(&path, "indent = 2\n").unwrap();

    match FormatSettings::load(&path) {
        Err(ConfigError::UnsupportedExtension(ext)) => assert_eq!(ext, "toml"),
        other => panic!("expected unsupported extension, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = FormatSettings::load(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"indent": "wide"}"#).unwrap();

    assert!(matches!(
        FormatSettings::load(&path),
        Err(ConfigError::Json(_))
    ));
}
