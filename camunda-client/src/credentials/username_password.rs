use secrecy::{ExposeSecret, SecretString};

use crate::credentials::{AccessCredentials, CredentialError, CredentialSource};
use crate::system::System;

pub const CAMUNDA_REST_KEY: &str = "camunda_rest";

/// Basic-auth credentials stored as `username:password`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsernamePassword;

#[derive(Debug)]
pub struct UsernamePasswordPair {
    pub username: String,
    pub password: SecretString,
}

impl UsernamePasswordPair {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl CredentialSource for UsernamePassword {
    type Credentials = UsernamePasswordPair;

    fn key(&self) -> &str {
        CAMUNDA_REST_KEY
    }

    fn process_credentials(&self, raw: String) -> Result<Self::Credentials, CredentialError> {
        let (username, password) = raw
            .split_once(':')
            .ok_or_else(|| CredentialError::malformed(CAMUNDA_REST_KEY, "expected `username:password`"))?;
        Ok(UsernamePasswordPair::new(username.trim(), password.trim()))
    }
}

pub type UsernamePasswordCredentials = AccessCredentials<UsernamePassword>;

impl AccessCredentials<UsernamePassword> {
    /// Explicit `user` and `password` win over the environment; they must come together.
    pub fn username_password(
        system: &dyn System,
        user: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialError> {
        let explicit = match (user, password) {
            (Some(user), Some(password)) => Some(UsernamePasswordPair::new(user, password)),
            (None, None) => None,
            _ => return Err(CredentialError::PartialUsernamePassword),
        };
        Ok(Self::resolve(UsernamePassword, explicit, system))
    }

    pub fn username(&self) -> Option<&str> {
        self.credentials().map(|c| c.username.as_str())
    }

    pub fn password(&self) -> Option<&str> {
        self.credentials().map(UsernamePasswordPair::expose_password)
    }
}
