#![forbid(unsafe_code)]

//! Typed building blocks for the Camunda REST API: schema-validated entities, endpoint
//! descriptors and request bodies. Dispatching lives in `camunda-client`.

pub mod endpoint;
pub mod entity;
pub mod error;
pub mod format;
pub mod input;
pub mod schema;

pub use crate::endpoint::{
    render_query, ConnectEndpoint, DeleteEndpoint, Endpoint, EndpointBase, GetEndpoint,
    HeadEndpoint, HttpMethod, MethodKind, NoContent, NoParameters, OptionsEndpoint,
    ParameterType, PostEndpoint, PutEndpoint, RequestId, ResponseType, DEFAULT_TIMEOUT,
};
pub use crate::entity::{Decoded, Entity, RawInput};
pub use crate::error::{
    EndpointError, EntityError, InputError, ParseError, UnknownMethod, ValidationError, Violation,
};
pub use crate::format::timestamp::Timestamp;
pub use crate::format::WireFormat;
pub use crate::input::{
    FormOption, FormPart, FormSchema, MultipartFormInput, RequestBody, RequestInput,
};
pub use crate::schema::{Schema, BOOL, IDENTIFIER, NUMBER, TEXT, TIMESTAMP};
