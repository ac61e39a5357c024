#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("username and password must be supplied together or not at all")]
    PartialUsernamePassword,
    #[error("malformed {key} credentials: {reason}")]
    Malformed { key: String, reason: String },
}

impl CredentialError {
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
