//! Layered credential resolution.

mod error;
mod resolver;
mod username_password;

pub use error::CredentialError;
pub use resolver::{find_credentials, AccessCredentials, CredentialSource, RawCredentials};
pub use username_password::{
    UsernamePassword, UsernamePasswordCredentials, UsernamePasswordPair, CAMUNDA_REST_KEY,
};
