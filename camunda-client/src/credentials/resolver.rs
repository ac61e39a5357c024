use std::fmt;
use std::path::Path;

use secrecy::SecretString;

use crate::credentials::CredentialError;
use crate::system::System;

/// A kind of credential and how its raw text is interpreted.
pub trait CredentialSource: Send + Sync {
    type Credentials: Send + Sync;

    /// Environment variable name (uppercased) and file name (lowercased) to look under.
    fn key(&self) -> &str;

    fn process_credentials(&self, raw: String) -> Result<Self::Credentials, CredentialError>;
}

/// Credentials resolved once, at construction, from the first source that has them:
/// an explicit value, the `KEY` environment variable, then a `key` file in the working directory.
///
/// Resolution never fails. Anything that goes wrong is logged and leaves the credentials absent.
pub struct AccessCredentials<S: CredentialSource> {
    source: S,
    credentials: Option<S::Credentials>,
}

impl<S: CredentialSource> AccessCredentials<S> {
    pub fn resolve(source: S, explicit: Option<S::Credentials>, system: &dyn System) -> Self {
        let credentials = match explicit {
            Some(credentials) => Some(credentials),
            None => find_credentials(source.key(), system).and_then(|raw| {
                source
                    .process_credentials(raw)
                    .map_err(|e| {
                        tracing::warn!(key = source.key(), error = %e, "failed to process credentials");
                    })
                    .ok()
            }),
        };
        Self {
            source,
            credentials,
        }
    }

    pub fn from_environment(source: S, system: &dyn System) -> Self {
        Self::resolve(source, None, system)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn credentials(&self) -> Option<&S::Credentials> {
        self.credentials.as_ref()
    }

    pub fn into_credentials(self) -> Option<S::Credentials> {
        self.credentials
    }

    pub fn is_resolved(&self) -> bool {
        self.credentials.is_some()
    }
}

impl<S: CredentialSource> fmt::Debug for AccessCredentials<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessCredentials")
            .field("key", &self.source.key())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Looks up the raw, trimmed credential text for `key`. Never fails.
pub fn find_credentials(key: &str, system: &dyn System) -> Option<String> {
    if let Some(value) = system.get_environment_variable(&key.to_uppercase()) {
        tracing::debug!(key, "environment variable set, reading credentials");
        return Some(value.trim().to_string());
    }

    let file_name = key.to_lowercase();
    let path = Path::new(&file_name);
    if system.is_file(path) {
        tracing::debug!(key, file = %file_name, "credentials file exists, reading credentials");
        match system.read_file(path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => return Some(text.trim().to_string()),
                Err(_) => tracing::warn!(file = %file_name, "credentials file is not valid UTF-8, skipping"),
            },
            Err(e) => tracing::warn!(file = %file_name, error = %e, "credentials file unreadable, skipping"),
        }
    }

    tracing::warn!(key, "no credentials found");
    None
}

/// Passes the raw credential text through unchanged.
#[derive(Debug, Clone)]
pub struct RawCredentials {
    key: String,
}

impl RawCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl CredentialSource for RawCredentials {
    type Credentials = SecretString;

    fn key(&self) -> &str {
        &self.key
    }

    fn process_credentials(&self, raw: String) -> Result<Self::Credentials, CredentialError> {
        Ok(SecretString::from(raw))
    }
}
