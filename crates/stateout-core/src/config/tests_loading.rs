//! Loading-focused tests for configuration
//!
//! File layering, parsing and environment overrides.

use std::{collections::HashMap, fs, path::PathBuf};

use tempfile::TempDir;

use crate::{
    config::{load_config_with, load_toml_file, ColorChoice, Config, ConfigFile},
    error::ConfigError,
    Error,
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    env_from(&[])
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_no_config_files_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config_with(
        Some(&dir.path().join("missing-global.toml")),
        &dir.path().join("missing-project.toml"),
        no_env(),
    )
    .unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.color, ColorChoice::Auto);
}

#[test]
fn test_project_overrides_global() {
    let dir = TempDir::new().unwrap();
    let global = write(&dir, "global.toml", "color = \"always\"\ncolumns = 120\n");
    let project = write(&dir, "project.toml", "columns = 60\n");

    let config = load_config_with(Some(&global), &project, no_env()).unwrap();
    assert_eq!(config.color, ColorChoice::Always);
    assert_eq!(config.columns, Some(60));
}

#[test]
fn test_env_overrides_files() {
    let dir = TempDir::new().unwrap();
    let project = write(
        &dir,
        "project.toml",
        "compact_warnings = false\nstate = \"a.tfstate\"\n",
    );
    let env = env_from(&[
        ("STATEOUT_COMPACT_WARNINGS", "1"),
        ("STATEOUT_STATE", "b.tfstate"),
        ("STATEOUT_COLOR", "Always"),
    ]);

    let config = load_config_with(None, &project, env).unwrap();
    assert!(config.compact_warnings);
    assert_eq!(config.state_path, Some(PathBuf::from("b.tfstate")));
    assert_eq!(config.color, ColorChoice::Always);
}

#[test]
fn test_no_color_wins() {
    let config = Config::default()
        .apply_env(env_from(&[("STATEOUT_COLOR", "always"), ("NO_COLOR", "")]))
        .unwrap();
    assert_eq!(config.color, ColorChoice::Never);
}

#[test]
fn test_invalid_env_values() {
    for (key, value) in [
        ("STATEOUT_COLOR", "sometimes"),
        ("STATEOUT_COMPACT_WARNINGS", "maybe"),
        ("STATEOUT_COLUMNS", "wide"),
        ("STATEOUT_STATE", ""),
    ] {
        let result = Config::default().apply_env(env_from(&[(key, value)]));
        assert!(
            matches!(
                result,
                Err(Error::Config(ConfigError::InvalidValue { ref key, .. })) if key.starts_with("STATEOUT_")
            ),
            "{key}={value:?} should be rejected"
        );
    }
}

#[test]
fn test_zero_columns_rejected() {
    let dir = TempDir::new().unwrap();
    let project = write(&dir, "project.toml", "columns = 0\n");
    let result = load_config_with(None, &project, no_env());
    assert!(result.is_err());
}

#[test]
fn test_unknown_key_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "colour = \"never\"\n");
    let err = load_toml_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse { .. })));
    assert!(err.to_string().contains("colour"));
}

#[test]
fn test_malformed_toml_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.toml", "color = \n invalid toml [[[");
    let err = load_toml_file(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse"));
}

#[test]
fn test_directory_is_not_a_config_file() {
    let dir = TempDir::new().unwrap();
    let err = load_toml_file(dir.path()).unwrap_err();
    assert!(err.to_string().contains("directory"));
}

#[test]
fn test_full_file_parses() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "config.toml",
        "color = \"never\"\ncompact_warnings = true\ncolumns = 100\nstate = \"s.tfstate\"\n",
    );
    assert_eq!(
        load_toml_file(&path).unwrap(),
        ConfigFile {
            color: Some(ColorChoice::Never),
            compact_warnings: Some(true),
            columns: Some(100),
            state: Some(PathBuf::from("s.tfstate")),
        }
    );
}

#[test]
fn test_color_choice_resolve() {
    assert!(ColorChoice::Auto.resolve(true));
    assert!(!ColorChoice::Auto.resolve(false));
    assert!(ColorChoice::Always.resolve(false));
    assert!(!ColorChoice::Never.resolve(true));
}
