//! Integration tests for configuration loading and validation.

use flavy::config::{load_config, load_config_or_default, Config};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn full_tools_section_is_loaded() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("flavy.toml");
    fs::write(
        &path,
        r#"
[tools]
ffmpeg_path = "/usr/local/bin/ffmpeg"
ffprobe_path = "/usr/local/bin/ffprobe"
timeout_secs = 15
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.tools.ffmpeg_path, PathBuf::from("/usr/local/bin/ffmpeg"));
    assert_eq!(config.tools.ffprobe_path, PathBuf::from("/usr/local/bin/ffprobe"));
    assert_eq!(config.tools.timeout, Duration::from_secs(15));
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("flavy.toml");
    fs::write(&path, "[tools]\nffmpeg_path = \"/opt/ffmpeg\"\n").unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.tools.ffmpeg_path, PathBuf::from("/opt/ffmpeg"));
    assert_eq!(config.tools.ffprobe_path, PathBuf::from("ffprobe"));
    assert_eq!(config.tools.timeout, Duration::from_secs(60));
}

#[test]
fn empty_file_is_the_default_config() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("flavy.toml");
    fs::write(&path, "").unwrap();

    assert_eq!(load_config(&path).unwrap(), Config::default());
}

#[test]
fn explicit_path_wins_over_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("custom.toml");
    fs::write(&path, "[tools]\ntimeout_secs = 5\n").unwrap();

    let config = load_config_or_default(Some(&path)).unwrap();
    assert_eq!(config.tools.timeout, Duration::from_secs(5));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let temp = tempdir().unwrap();
    let err = load_config_or_default(Some(&temp.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn malformed_toml_is_an_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("flavy.toml");
    fs::write(&path, "[tools\nffmpeg_path = ").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn zero_timeout_is_rejected() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("flavy.toml");
    fs::write(&path, "[tools]\ntimeout_secs = 0\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn empty_engine_path_is_rejected() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("flavy.toml");
    fs::write(&path, "[tools]\nffmpeg_path = \"\"\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("ffmpeg_path"));
}
