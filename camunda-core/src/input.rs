//! Outbound request payloads.

use std::collections::BTreeMap;

use crate::entity::{Decoded, Entity};
use crate::error::InputError;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Bytes {
        content: Vec<u8>,
        content_type: String,
    },
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }

    pub fn content_type(&self) -> Option<&str> {
        match self {
            RequestBody::Bytes { content_type, .. } => Some(content_type),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content: Vec<u8>,
    pub content_type: String,
    pub headers: BTreeMap<String, String>,
}

/// Anything that can be sent as the body of a request.
pub trait RequestInput: Send + Sync {
    fn to_request_body(&self) -> Result<RequestBody, InputError>;
}

impl<E: Entity> RequestInput for Decoded<E> {
    fn to_request_body(&self) -> Result<RequestBody, InputError> {
        Ok(RequestBody::Bytes {
            content: self.encode()?.into_bytes(),
            content_type: E::decoder().content_type().to_string(),
        })
    }
}

/// Content type and extra part headers for one named form option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOption {
    pub content_type: String,
    pub headers: BTreeMap<String, String>,
}

impl FormOption {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl Default for FormOption {
    fn default() -> Self {
        Self::new(TEXT_PLAIN)
    }
}

/// The options a multipart endpoint accepts, keyed by their hyphenated form name.
pub trait FormSchema {
    fn options_by_name() -> &'static BTreeMap<&'static str, FormOption>;
}

/// A multipart body made of named files plus named string options.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartFormInput {
    parts: BTreeMap<String, FormPart>,
}

impl MultipartFormInput {
    /// Builds the form for schema `F`.
    ///
    /// Files become octet-stream parts without a file name. Option names have `_` replaced by
    /// `-` and must appear in `F::options_by_name()`; an option sharing a file's name replaces it.
    pub fn new<F, I, N, C, O, K, V>(files: I, options: O) -> Result<Self, InputError>
    where
        F: FormSchema,
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<Vec<u8>>,
        O: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut parts = BTreeMap::new();
        for (name, content) in files {
            let name = name.into();
            parts.insert(
                name.clone(),
                FormPart {
                    name,
                    file_name: None,
                    content: content.into(),
                    content_type: OCTET_STREAM.to_string(),
                    headers: BTreeMap::new(),
                },
            );
        }

        let table = F::options_by_name();
        for (key, value) in options {
            let name = key.as_ref().replace('_', "-");
            let Some(option) = table.get(name.as_str()) else {
                return Err(InputError::UnknownOption(name));
            };
            parts.insert(
                name.clone(),
                FormPart {
                    name,
                    file_name: None,
                    content: value.into().into_bytes(),
                    content_type: option.content_type.clone(),
                    headers: option.headers.clone(),
                },
            );
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> impl Iterator<Item = &FormPart> {
        self.parts.values()
    }

    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.get(name)
    }
}

impl RequestInput for MultipartFormInput {
    fn to_request_body(&self) -> Result<RequestBody, InputError> {
        Ok(RequestBody::Multipart(self.parts.values().cloned().collect()))
    }
}
