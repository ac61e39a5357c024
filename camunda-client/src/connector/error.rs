use camunda_core::{EndpointError, EntityError, InputError};

use crate::http::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum CamundaError {
    /// HTTP 400, with the server's exception message and type.
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        api_type: Option<String>,
    },
    /// HTTP 404, with the server's exception message and type.
    #[error("resource not found: {message}")]
    ResourceNotFound {
        message: String,
        api_type: Option<String>,
    },
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Entity(#[from] EntityError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl CamundaError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(HttpError::Timeout))
    }

    /// HTTP status behind the failure, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::ResourceNotFound { .. } => Some(404),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Exception type reported by the engine, e.g. `InvalidRequestException`.
    pub fn api_type(&self) -> Option<&str> {
        match self {
            Self::BadRequest { api_type, .. } | Self::ResourceNotFound { api_type, .. } => {
                api_type.as_deref()
            }
            _ => None,
        }
    }
}
