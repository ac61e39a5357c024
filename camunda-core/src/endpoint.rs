//! Endpoint descriptors.
//!
//! A concrete endpoint is a small struct embedding an [`EndpointBase`] (named engine, attached
//! parameters, request identity) and implementing [`Endpoint`] with its URI, parameter type and
//! response type. The HTTP method comes from the base's method marker, so `GetEndpoint`,
//! `PostEndpoint` and friends fix the method while everything else stays per-endpoint.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::time::Duration;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::entity::{Decoded, Entity};
use crate::error::{EndpointError, EntityError, UnknownMethod};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Connect,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "CONNECT" => Ok(HttpMethod::Connect),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

pub trait MethodKind: Send + Sync + 'static {
    const METHOD: HttpMethod;
}

macro_rules! method_kind {
    ($($name:ident => $method:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl MethodKind for $name {
                const METHOD: HttpMethod = HttpMethod::$method;
            }
        )*
    };
}

method_kind! {
    Get => Get,
    Post => Post,
    Put => Put,
    Delete => Delete,
    Head => Head,
    Options => Options,
    Connect => Connect,
}

/// Opaque identity of one endpoint instance.
///
/// Generated fresh for every [`EndpointBase`]; never copied between instances, so equal field
/// values on two endpoints still give two different identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State shared by every endpoint: method marker, named engine, attached parameters, identity.
#[derive(Debug)]
pub struct EndpointBase<M> {
    id: RequestId,
    engine_name: Option<String>,
    parameters: Option<Map<String, Value>>,
    _method: PhantomData<fn() -> M>,
}

pub type GetEndpoint = EndpointBase<Get>;
pub type PostEndpoint = EndpointBase<Post>;
pub type PutEndpoint = EndpointBase<Put>;
pub type DeleteEndpoint = EndpointBase<Delete>;
pub type HeadEndpoint = EndpointBase<Head>;
pub type OptionsEndpoint = EndpointBase<Options>;
pub type ConnectEndpoint = EndpointBase<Connect>;

impl<M: MethodKind> EndpointBase<M> {
    pub fn new() -> Self {
        Self {
            id: RequestId::new(),
            engine_name: None,
            parameters: None,
            _method: PhantomData,
        }
    }

    pub fn method(&self) -> HttpMethod {
        M::METHOD
    }

    pub fn request_id(&self) -> RequestId {
        self.id
    }

    pub fn engine_name(&self) -> Option<&str> {
        self.engine_name.as_deref()
    }

    pub fn set_engine_name(&mut self, engine_name: Option<String>) {
        self.engine_name = engine_name;
    }

    pub fn parameters(&self) -> Option<&Map<String, Value>> {
        self.parameters.as_ref()
    }

    fn attach(&mut self, parameters: Map<String, Value>) {
        self.parameters = Some(parameters);
    }
}

impl<M: MethodKind> Default for EndpointBase<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declared parameter type of an endpoint.
pub trait ParameterType {
    /// Validates keyword-style fields and returns their wire mapping.
    fn validate_parameters(fields: Value) -> Result<Map<String, Value>, EndpointError>;
}

impl<E: Entity> ParameterType for E {
    fn validate_parameters(fields: Value) -> Result<Map<String, Value>, EndpointError> {
        let parameters = E::build(fields)?;
        match parameters.entity().to_value()? {
            Value::Object(map) => Ok(map),
            other => Err(EndpointError::ParametersNotAMapping {
                kind: value_kind(&other),
            }),
        }
    }
}

/// Marker for endpoints that take no query parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParameters;

impl ParameterType for NoParameters {
    fn validate_parameters(_fields: Value) -> Result<Map<String, Value>, EndpointError> {
        Err(EndpointError::NoParameterType)
    }
}

/// Declared response type of an endpoint.
pub trait ResponseType {
    type Output: Send + Sync + 'static;

    /// Decodes a successful response body; `None` for side-effect-only endpoints.
    fn decode_response(body: &str) -> Result<Option<Self::Output>, EntityError>;
}

impl<E: Entity> ResponseType for E {
    type Output = Decoded<E>;

    fn decode_response(body: &str) -> Result<Option<Self::Output>, EntityError> {
        E::construct(body).map(Some)
    }
}

/// Marker for endpoints whose response body is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ResponseType for NoContent {
    type Output = ();

    fn decode_response(_body: &str) -> Result<Option<Self::Output>, EntityError> {
        Ok(None)
    }
}

pub trait Endpoint: Send + Sync {
    type Method: MethodKind;
    type Parameters: ParameterType;
    type Response: ResponseType;

    /// Resource URI relative to the REST root, with a leading slash.
    fn uri(&self) -> String;

    fn base(&self) -> &EndpointBase<Self::Method>;

    fn base_mut(&mut self) -> &mut EndpointBase<Self::Method>;

    fn method(&self) -> HttpMethod {
        <Self::Method as MethodKind>::METHOD
    }

    fn request_id(&self) -> RequestId {
        self.base().request_id()
    }

    fn engine_name(&self) -> Option<&str> {
        self.base().engine_name()
    }

    /// Routes the request to a named process engine instead of the default one.
    fn on_engine(mut self, engine_name: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_engine_name(Some(engine_name.into()));
        self
    }

    fn engine_uri(&self) -> String {
        match self.engine_name() {
            Some(name) => format!("/engine/{name}{}", self.uri()),
            None => self.uri(),
        }
    }

    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    fn parameters_required(&self) -> bool {
        false
    }

    /// Validates `fields` against the declared parameter type and attaches them.
    fn with_parameters(mut self, fields: Value) -> Result<Self, EndpointError>
    where
        Self: Sized,
    {
        let parameters = Self::Parameters::validate_parameters(fields)?;
        self.base_mut().attach(parameters);
        Ok(self)
    }

    /// Query-string view of the attached parameters.
    fn params(&self) -> Result<Option<Vec<(String, String)>>, EndpointError> {
        match self.base().parameters() {
            None if self.parameters_required() => Err(EndpointError::ParametersRequired {
                uri: self.uri(),
            }),
            None => Ok(None),
            Some(parameters) => Ok(Some(render_query(parameters))),
        }
    }
}

/// Renders a wire mapping as query pairs.
///
/// Nulls are dropped, arrays repeat their key once per element and scalars use their JSON
/// text (strings unquoted). Enumerations already carry their wire value after serialization.
pub fn render_query(parameters: &Map<String, Value>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (key, value) in parameters {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(s) = render_scalar(item) {
                        out.push((key.clone(), s));
                    }
                }
            }
            other => {
                if let Some(s) = render_scalar(other) {
                    out.push((key.clone(), s));
                }
            }
        }
    }
    out
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
