pub mod timestamp;

use serde_json::Value;

use crate::error::ParseError;

/// Text encoding used on the wire for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    #[default]
    Json,
    Yaml,
}

impl WireFormat {
    pub fn decode(self, input: &str) -> Result<Value, ParseError> {
        match self {
            WireFormat::Json => Ok(serde_json::from_str::<Value>(input)?),
            WireFormat::Yaml => Ok(serde_yaml::from_str::<Value>(input)?),
        }
    }

    pub fn encode(self, value: &Value) -> Result<String, ParseError> {
        match self {
            WireFormat::Json => Ok(serde_json::to_string(value)?),
            WireFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            WireFormat::Json => "application/json",
            WireFormat::Yaml => "application/yaml",
        }
    }
}
