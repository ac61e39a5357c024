//! Declarative payload schemas.
//!
//! A [`Schema`] is an immutable validator tree applied to a decoded `serde_json::Value` before
//! it is turned into a typed entity. Validation collects every violation (with its JSON path)
//! rather than stopping at the first one.

use std::fmt;

use serde_json::Value;

use crate::entity::Entity;
use crate::error::{ValidationError, Violation};
use crate::format::timestamp;

/// Any JSON number (integer or float). Booleans are rejected.
pub const NUMBER: Schema = Schema::Number;
/// Any JSON string.
pub const TEXT: Schema = Schema::Text;
/// A Camunda identifier: a string or null.
pub const IDENTIFIER: Schema = Schema::Identifier;
/// A date-time string.
pub const TIMESTAMP: Schema = Schema::Timestamp;
pub const BOOL: Schema = Schema::Bool;

#[derive(Debug, Clone)]
pub enum Schema {
    Any,
    Number,
    Text,
    Identifier,
    Bool,
    Timestamp,
    Null,
    Literal(Value),
    AnyOf(Vec<Schema>),
    List(Box<Schema>),
    Object(ObjectSchema),
    Entity(EntityRef),
}

/// Reference to another entity's schema, used for nested values.
#[derive(Clone, Copy)]
pub struct EntityRef {
    name: fn() -> &'static str,
    schema: fn() -> &'static Schema,
}

impl EntityRef {
    pub fn of<E: Entity>() -> Self {
        Self {
            name: E::name,
            schema: E::schema,
        }
    }

    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    pub fn schema(&self) -> &'static Schema {
        (self.schema)()
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityRef").field(&self.name()).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraKeys {
    #[default]
    Forbid,
    Allow,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<Field>,
    extra: ExtraKeys,
}

impl ObjectSchema {
    pub fn required(mut self, name: &'static str, schema: Schema) -> Self {
        self.fields.push(Field {
            name,
            schema,
            required: true,
        });
        self
    }

    pub fn optional(mut self, name: &'static str, schema: Schema) -> Self {
        self.fields.push(Field {
            name,
            schema,
            required: false,
        });
        self
    }

    /// Accept keys that are not declared (they are kept but not validated).
    pub fn allow_extra(mut self) -> Self {
        self.extra = ExtraKeys::Allow;
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn extra_keys(&self) -> ExtraKeys {
        self.extra
    }

    fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(value: ObjectSchema) -> Self {
        Schema::Object(value)
    }
}

impl Schema {
    pub fn object() -> ObjectSchema {
        ObjectSchema::default()
    }

    pub fn list(item: Schema) -> Self {
        Schema::List(Box::new(item))
    }

    pub fn any_of(alternatives: impl IntoIterator<Item = Schema>) -> Self {
        Schema::AnyOf(alternatives.into_iter().collect())
    }

    /// Exactly one of the given wire values (enumerations).
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Schema::AnyOf(values.into_iter().map(|v| Schema::Literal(v.into())).collect())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Schema::Literal(value.into())
    }

    pub fn nullable(inner: Schema) -> Self {
        Schema::AnyOf(vec![inner, Schema::Null])
    }

    pub fn entity<E: Entity>() -> Self {
        Schema::Entity(EntityRef::of::<E>())
    }

    /// Declared top-level field names, when this is a mapping schema.
    pub fn field_names(&self) -> Vec<&'static str> {
        match self.resolved() {
            Schema::Object(obj) => obj.fields.iter().map(|f| f.name).collect(),
            _ => Vec::new(),
        }
    }

    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let mut v = SchemaValidator::new();
        v.check("$", self, value);
        v.finish()
    }

    pub fn accepts(&self, value: &Value) -> bool {
        let mut v = SchemaValidator::new();
        v.check("$", self, value);
        v.violations.is_empty()
    }

    /// Removes `null` at optional keys whose schema rejects null, recursing into nested
    /// mappings, lists and entities. Serialized `None` fields then validate again.
    pub fn prune_nulls(&self, value: &mut Value) {
        match (self, value) {
            (Schema::Object(obj), Value::Object(map)) => {
                for field in &obj.fields {
                    let absent = match map.get_mut(field.name) {
                        None => false,
                        Some(Value::Null) => {
                            !field.required && !field.schema.accepts(&Value::Null)
                        }
                        Some(v) => {
                            field.schema.prune_nulls(v);
                            false
                        }
                    };
                    if absent {
                        map.remove(field.name);
                    }
                }
            }
            (Schema::List(item), Value::Array(items)) => {
                for v in items {
                    item.prune_nulls(v);
                }
            }
            (Schema::Entity(r), value) => r.schema().prune_nulls(value),
            _ => {}
        }
    }

    fn resolved(&self) -> &Schema {
        match self {
            Schema::Entity(r) => r.schema().resolved(),
            other => other,
        }
    }

    fn describe(&self) -> String {
        match self {
            Schema::Any => "any value".to_string(),
            Schema::Number => "a number".to_string(),
            Schema::Text => "text".to_string(),
            Schema::Identifier => "text or null".to_string(),
            Schema::Bool => "a boolean".to_string(),
            Schema::Timestamp => "a timestamp".to_string(),
            Schema::Null => "null".to_string(),
            Schema::Literal(v) => v.to_string(),
            Schema::AnyOf(alts) => {
                let parts = alts.iter().map(Schema::describe).collect::<Vec<_>>();
                format!("one of [{}]", parts.join(", "))
            }
            Schema::List(item) => format!("a list of {}", item.describe()),
            Schema::Object(_) => "a mapping".to_string(),
            Schema::Entity(r) => r.name().to_string(),
        }
    }
}

struct SchemaValidator {
    violations: Vec<Violation>,
}

impl SchemaValidator {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    fn expect(&mut self, path: &str, ok: bool, schema: &Schema) {
        if !ok {
            self.push(path, format!("expected {}", schema.describe()));
        }
    }

    fn check(&mut self, path: &str, schema: &Schema, value: &Value) {
        match schema {
            Schema::Any => {}
            Schema::Number => self.expect(path, value.is_number(), schema),
            Schema::Text => self.expect(path, value.is_string(), schema),
            Schema::Identifier => {
                self.expect(path, value.is_string() || value.is_null(), schema)
            }
            Schema::Bool => self.expect(path, value.is_boolean(), schema),
            Schema::Null => self.expect(path, value.is_null(), schema),
            Schema::Timestamp => match value.as_str() {
                Some(s) if timestamp::parse(s).is_some() => {}
                Some(s) => self.push(path, format!("`{s}` is not a valid timestamp")),
                None => self.push(path, "expected a timestamp string"),
            },
            Schema::Literal(expected) => self.expect(path, value == expected, schema),
            Schema::AnyOf(alts) => {
                let ok = alts.iter().any(|alt| alt.accepts(value));
                self.expect(path, ok, schema);
            }
            Schema::List(item) => match value.as_array() {
                Some(items) => {
                    for (i, v) in items.iter().enumerate() {
                        self.check(&format!("{path}[{i}]"), item, v);
                    }
                }
                None => self.push(path, format!("expected {}", schema.describe())),
            },
            Schema::Object(obj) => self.check_object(path, obj, value),
            Schema::Entity(r) => self.check(path, r.schema(), value),
        }
    }

    fn check_object(&mut self, path: &str, obj: &ObjectSchema, value: &Value) {
        let Some(map) = value.as_object() else {
            self.push(path, "expected a mapping");
            return;
        };

        for field in &obj.fields {
            let child = format!("{path}.{}", field.name);
            match map.get(field.name) {
                Some(v) => self.check(&child, &field.schema, v),
                None if field.required => self.push(child, "required key not provided"),
                None => {}
            }
        }

        if obj.extra == ExtraKeys::Forbid {
            for key in map.keys() {
                if obj.field(key).is_none() {
                    self.push(format!("{path}.{key}"), "extra keys not allowed");
                }
            }
        }
    }
}
