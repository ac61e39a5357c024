//! Schema-validated entities.
//!
//! An [`Entity`] is a typed struct whose wire representation is checked against a declared
//! [`Schema`] before serde turns it into the struct. Construction either fully succeeds,
//! yielding a [`Decoded`] instance, or fails with [`EntityError::Malformed`] (the payload could
//! not be parsed) or [`EntityError::Invalid`] (it parsed but does not conform).
//!
//! ```rust,ignore
//! #[derive(Debug, serde::Serialize, serde::Deserialize)]
//! struct Example { example_id: f64, name: String, email: Option<String> }
//!
//! impl Entity for Example {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
//!             Schema::object()
//!                 .required("example_id", NUMBER)
//!                 .required("name", TEXT)
//!                 .optional("email", TEXT)
//!                 .into()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! Example::construct("this is not json");                       // Malformed
//! Example::build(json!({ "example_id": "nope", "name": "x" }));  // Invalid
//! let e = Example::build(json!({ "example_id": 123, "name": "john" }))?;
//! assert!(e.email.is_none());
//! ```

use std::any::type_name;
use std::fmt;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{EntityError, ValidationError};
use crate::format::WireFormat;
use crate::schema::Schema;

/// The original wire value an entity was constructed from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Text(String),
    Structured(Value),
}

impl RawInput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawInput::Text(s) => Some(s),
            RawInput::Structured(_) => None,
        }
    }

    fn diagnostic(&self) -> String {
        match self {
            RawInput::Text(s) | RawInput::Structured(Value::String(s)) => s.clone(),
            RawInput::Structured(v) => v.to_string(),
        }
    }
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Text(value.to_string())
    }
}

impl From<String> for RawInput {
    fn from(value: String) -> Self {
        RawInput::Text(value)
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        RawInput::Structured(value)
    }
}

pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static Schema;

    fn decoder() -> WireFormat {
        WireFormat::Json
    }

    fn name() -> &'static str {
        let full = type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Decode path: wire text (or an already structured value) to a validated entity.
    ///
    /// A structured string is still wire text and goes through [`Entity::decoder`].
    fn construct(raw: impl Into<RawInput>) -> Result<Decoded<Self>, EntityError> {
        let raw = raw.into();
        let value = match &raw {
            RawInput::Text(text) | RawInput::Structured(Value::String(text)) => {
                Self::decoder().decode(text).map_err(|source| {
                    tracing::warn!(
                        entity = Self::name(),
                        error = %source,
                        raw = %text,
                        "failed to decode payload"
                    );
                    EntityError::Malformed {
                        entity: Self::name(),
                        raw: text.clone(),
                        source,
                    }
                })?
            }
            RawInput::Structured(v) => v.clone(),
        };

        let entity = validate_into::<Self>(&value).map_err(|source| {
            let raw = raw.diagnostic();
            tracing::warn!(
                entity = Self::name(),
                error = %source,
                raw = %raw,
                "payload failed entity schema validation"
            );
            EntityError::Invalid {
                entity: Self::name(),
                raw,
                source,
            }
        })?;

        Ok(Decoded {
            raw,
            fields: value,
            entity,
        })
    }

    /// Build path: keyword-style fields taken directly as the structured value.
    fn build(fields: Value) -> Result<Decoded<Self>, EntityError> {
        Self::construct(RawInput::Structured(fields))
    }

    /// Validates a nested structured value and returns the bare typed entity.
    fn from_value(value: Value) -> Result<Self, EntityError> {
        validate_into::<Self>(&value).map_err(|source| EntityError::Invalid {
            entity: Self::name(),
            raw: value.to_string(),
            source,
        })
    }

    /// Serializes the typed entity; `None` fields the schema would reject as null are left out.
    fn to_value(&self) -> Result<Value, EntityError> {
        let mut value = serde_json::to_value(self).map_err(|e| EntityError::Encode {
            entity: Self::name(),
            message: e.to_string(),
        })?;
        Self::schema().prune_nulls(&mut value);
        Ok(value)
    }

    /// Encode path: renders the entity as wire text in its own format.
    fn encode(&self) -> Result<String, EntityError> {
        encode_as::<Self>(&self.to_value()?)
    }
}

fn encode_as<E: Entity>(value: &Value) -> Result<String, EntityError> {
    E::decoder()
        .encode(value)
        .map_err(|e| EntityError::Encode {
            entity: E::name(),
            message: e.to_string(),
        })
}

fn validate_into<E: Entity>(value: &Value) -> Result<E, ValidationError> {
    E::schema().validate(value)?;
    serde_json::from_value::<E>(value.clone()).map_err(|e| ValidationError::single("$", e.to_string()))
}

/// A live, fully validated entity together with the wire data it came from.
///
/// Dereferences to the typed entity, so every schema field is available as a plain field.
#[derive(Debug, Clone)]
pub struct Decoded<E> {
    raw: RawInput,
    fields: Value,
    entity: E,
}

impl<E: Entity> Decoded<E> {
    pub fn raw(&self) -> &RawInput {
        &self.raw
    }

    /// The validated field mapping (or list, for list entities).
    pub fn fields(&self) -> &Value {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.as_object().and_then(|m| m.get(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields
            .as_object()
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        match &self.fields {
            Value::Object(m) => m.len(),
            Value::Array(a) => a.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn into_inner(self) -> E {
        self.entity
    }

    /// Renders the validated field mapping back into wire text.
    pub fn encode(&self) -> Result<String, EntityError> {
        encode_as::<E>(&self.fields)
    }
}

impl<E> Deref for Decoded<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.entity
    }
}

impl<E> fmt::Display for Decoded<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields)
    }
}
