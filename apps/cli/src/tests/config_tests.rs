use super::*;

use std::{
    env,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(tag: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("faceauth_config_{tag}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("faceauth.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_yields_defaults() {
    let settings =
        load_settings_with_env(Path::new("/nonexistent/faceauth.toml"), no_env).expect("load");
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn file_overrides_default_api_url() {
    let path = temp_config("file", "api_url = \"http://192.168.8.101:8000/api\"\n");
    let settings = load_settings_with_env(&path, no_env).expect("load");
    assert_eq!(settings.api_url, "http://192.168.8.101:8000/api");
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn environment_wins_over_file() {
    let path = temp_config("env", "api_url = \"http://from-file/api\"\n");
    let settings = load_settings_with_env(&path, |key| match key {
        "FACEAUTH_API_URL" => Some("http://from-env/api".to_string()),
        _ => None,
    })
    .expect("load");
    assert_eq!(settings.api_url, "http://from-env/api");

    let settings = load_settings_with_env(&path, |key| match key {
        "FACEAUTH_API_URL" => Some("http://from-env/api".to_string()),
        "APP__API_URL" => Some("http://from-app-env/api".to_string()),
        _ => None,
    })
    .expect("load");
    assert_eq!(settings.api_url, "http://from-app-env/api");
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_file_is_an_error() {
    let path = temp_config("malformed", "api_url = [");
    let err = load_settings_with_env(&path, no_env).expect_err("must fail");
    assert!(err.to_string().contains("failed to parse config"), "{err}");
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
