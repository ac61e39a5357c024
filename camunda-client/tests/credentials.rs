use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use tempfile::TempDir;

use camunda_client::credentials::find_credentials;
use camunda_client::{
    AccessCredentials, CredentialError, OsSystem, RawCredentials, System,
    UsernamePasswordCredentials,
};

#[derive(Default)]
struct FakeSystem {
    env: BTreeMap<String, String>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl FakeSystem {
    fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    fn with_file(mut self, name: &str, contents: &[u8]) -> Self {
        self.files.insert(PathBuf::from(name), contents.to_vec());
        self
    }
}

impl System for FakeSystem {
    fn get_environment_variable(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

/// A file that claims to exist but cannot be read.
struct UnreadableFile;

impl System for UnreadableFile {
    fn get_environment_variable(&self, _name: &str) -> Option<String> {
        None
    }

    fn is_file(&self, _path: &Path) -> bool {
        true
    }

    fn read_file(&self, _path: &Path) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }
}

#[test]
fn explicit_credentials_win_over_environment_and_file() {
    let system = FakeSystem::default()
        .with_env("CAMUNDA_REST", "env:env")
        .with_file("camunda_rest", b"file:file");

    let creds =
        UsernamePasswordCredentials::username_password(&system, Some("demo"), Some("secret"))
            .unwrap();
    assert_eq!(creds.username(), Some("demo"));
    assert_eq!(creds.password(), Some("secret"));
}

#[test]
fn environment_wins_over_file() {
    let system = FakeSystem::default()
        .with_env("CAMUNDA_REST", "  env-user : env-pass \n")
        .with_file("camunda_rest", b"file:file");

    let creds = UsernamePasswordCredentials::username_password(&system, None, None).unwrap();
    assert_eq!(creds.username(), Some("env-user"));
    assert_eq!(creds.password(), Some("env-pass"));
}

#[test]
fn file_is_used_when_environment_is_unset() {
    let system = FakeSystem::default().with_file("camunda_rest", b"file-user:file-pass\n");

    let creds = UsernamePasswordCredentials::username_password(&system, None, None).unwrap();
    assert_eq!(creds.username(), Some("file-user"));
    assert_eq!(creds.password(), Some("file-pass"));
}

#[test]
fn nothing_found_resolves_to_absent() {
    let creds =
        UsernamePasswordCredentials::username_password(&FakeSystem::default(), None, None).unwrap();
    assert!(!creds.is_resolved());
    assert_eq!(creds.username(), None);
    assert_eq!(creds.password(), None);
}

#[test]
fn unprocessable_value_resolves_to_absent() {
    let system = FakeSystem::default().with_env("CAMUNDA_REST", "no-colon-here");
    let creds = UsernamePasswordCredentials::username_password(&system, None, None).unwrap();
    assert!(creds.credentials().is_none());
}

#[test]
fn unreadable_or_non_utf8_file_resolves_to_absent() {
    let creds = UsernamePasswordCredentials::username_password(&UnreadableFile, None, None).unwrap();
    assert!(!creds.is_resolved());

    let system = FakeSystem::default().with_file("camunda_rest", &[0xff, 0xfe, b':', b'x']);
    let creds = UsernamePasswordCredentials::username_password(&system, None, None).unwrap();
    assert!(!creds.is_resolved());
}

#[test]
fn partial_username_password_is_rejected() {
    let system = FakeSystem::default();
    let err = UsernamePasswordCredentials::username_password(&system, Some("demo"), None)
        .unwrap_err();
    assert!(matches!(err, CredentialError::PartialUsernamePassword));

    let err = UsernamePasswordCredentials::username_password(&system, None, Some("secret"))
        .unwrap_err();
    assert!(matches!(err, CredentialError::PartialUsernamePassword));
}

#[test]
fn raw_credentials_use_key_case_conventions() {
    let system = FakeSystem::default()
        .with_env("API_TOKEN", " token-from-env ")
        .with_file("other_token", b"token-from-file");

    let env = AccessCredentials::from_environment(RawCredentials::new("Api_Token"), &system);
    assert_eq!(env.credentials().map(|s| s.expose_secret()), Some("token-from-env"));

    let file = AccessCredentials::from_environment(RawCredentials::new("OTHER_TOKEN"), &system);
    assert_eq!(file.credentials().map(|s| s.expose_secret()), Some("token-from-file"));
}

#[test]
fn find_credentials_trims_raw_text() {
    let system = FakeSystem::default().with_file("camunda_rest", b"\n  demo:demo  \n");
    assert_eq!(find_credentials("camunda_rest", &system), Some("demo:demo".to_string()));
}

#[test]
fn debug_output_never_shows_secrets() {
    let system = FakeSystem::default().with_env("CAMUNDA_REST", "demo:hunter2");
    let creds = UsernamePasswordCredentials::username_password(&system, None, None).unwrap();
    let rendered = format!("{creds:?}");
    assert!(rendered.contains("camunda_rest"));
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn os_system_reads_credentials_file_by_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("camunda_rest");
    std::fs::write(&path, "demo:demo\n").unwrap();

    let system = OsSystem;
    assert!(system.is_file(&path));
    let raw = String::from_utf8(system.read_file(&path).unwrap()).unwrap();
    assert_eq!(raw.trim(), "demo:demo");
}
