use std::collections::BTreeMap;

use camunda_core::{ParseError, WireFormat};
use serde::Deserialize;

use crate::sanitize::SensitiveHeadersConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectorConfig {
    /// Server root; the REST API is mounted under `/engine-rest` beneath it.
    pub base_url: String,
    /// Sent on every request unless the endpoint overrides the same header.
    pub default_headers: BTreeMap<String, String>,
    pub user_agent: String,
    #[serde(skip)]
    pub sensitive_headers: SensitiveHeadersConfig,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_headers: BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            user_agent: concat!("camunda-client/", env!("CARGO_PKG_VERSION")).to_string(),
            sensitive_headers: SensitiveHeadersConfig::default(),
        }
    }
}

impl ConnectorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads a config document; keys left out keep their defaults.
    pub fn from_str(text: &str, format: WireFormat) -> Result<Self, ConfigError> {
        let value = format.decode(text)?;
        let config = serde_json::from_value::<Self>(value).map_err(ParseError::from)?;
        Ok(config)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_engine_with_json_content_type() {
        let config = ConnectorConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(
            config.default_headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn yaml_overrides_only_given_keys() {
        let config = ConnectorConfig::from_str(
            "baseUrl: https://camunda.example.com\ndefaultHeaders:\n  X-Team: billing\n",
            WireFormat::Yaml,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://camunda.example.com");
        assert_eq!(config.default_headers.len(), 1);
        assert!(config.user_agent.starts_with("camunda-client/"));
    }

    #[test]
    fn json_config_is_accepted() {
        let config =
            ConnectorConfig::from_str(r#"{"userAgent": "billing/1.0"}"#, WireFormat::Json).unwrap();
        assert_eq!(config.user_agent, "billing/1.0");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let err = ConnectorConfig::from_str("{", WireFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
