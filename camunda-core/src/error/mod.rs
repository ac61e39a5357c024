use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Error)]
#[error("payload failed schema validation ({violations_len} violations): {summary}")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
    summary: String,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        let summary = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            violations,
            violations_len,
            summary,
        }
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![Violation::new(path, message)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Failure to turn a wire payload into an entity, or an entity back into wire text.
///
/// `Malformed` means the payload could not be parsed into a structured value at all;
/// `Invalid` means it parsed but does not conform to the entity's schema.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("malformed {entity} payload: {source}")]
    Malformed {
        entity: &'static str,
        raw: String,
        #[source]
        source: ParseError,
    },
    #[error("invalid {entity}: {source}")]
    Invalid {
        entity: &'static str,
        raw: String,
        #[source]
        source: ValidationError,
    },
    #[error("failed to encode {entity}: {message}")]
    Encode {
        entity: &'static str,
        message: String,
    },
}

impl EntityError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    /// The offending wire payload, when the failure happened on the decode path.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Malformed { raw, .. } | Self::Invalid { raw, .. } => Some(raw),
            Self::Encode { .. } => None,
        }
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Invalid { source, .. } => &source.violations,
            _ => &[],
        }
    }
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("cannot attach parameters: endpoint declares no parameter type")]
    NoParameterType,
    #[error("parameters are required but were not supplied for endpoint {uri}")]
    ParametersRequired { uri: String },
    #[error("parameters must encode to a mapping, got {kind}")]
    ParametersNotAMapping { kind: &'static str },
    #[error(transparent)]
    Parameters(#[from] EntityError),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("unknown form option {0}")]
    UnknownOption(String),
    #[error(transparent)]
    Encode(#[from] EntityError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);
