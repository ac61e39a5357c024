#![forbid(unsafe_code)]

//! Dispatches `camunda-core` endpoints against a Camunda REST root.

pub mod config;
pub mod connector;
pub mod credentials;
pub mod http;
pub mod sanitize;
pub mod system;

pub use crate::config::{ConfigError, ConnectorConfig};
pub use crate::connector::{
    Camunda, CamundaError, ExceptionReport, Output, ANTI_HIJACKING_PREFIX, ENGINE_REST_PATH,
};
pub use crate::credentials::{
    AccessCredentials, CredentialError, CredentialSource, RawCredentials, UsernamePassword,
    UsernamePasswordCredentials, UsernamePasswordPair,
};
pub use crate::http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
pub use crate::system::{OsSystem, System};
