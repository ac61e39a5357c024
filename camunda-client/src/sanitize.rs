use std::collections::BTreeMap;

const REDACTED: &str = "<redacted>";

/// Header names that never reach a log line verbatim.
#[derive(Debug, Clone)]
pub struct SensitiveHeadersConfig {
    /// Matched case-insensitively.
    pub always_redact: Vec<String>,
}

impl Default for SensitiveHeadersConfig {
    fn default() -> Self {
        Self {
            always_redact: vec![
                "authorization".to_string(),
                "proxy-authorization".to_string(),
                "cookie".to_string(),
                "set-cookie".to_string(),
            ],
        }
    }
}

impl SensitiveHeadersConfig {
    pub fn is_sensitive(&self, name: &str) -> bool {
        self.always_redact
            .iter()
            .any(|h| h.eq_ignore_ascii_case(name))
    }
}

pub fn sanitize_headers(
    headers: &BTreeMap<String, String>,
    sensitive: &SensitiveHeadersConfig,
) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            let v = if sensitive.is_sensitive(k) {
                REDACTED.to_string()
            } else {
                v.clone()
            };
            (k.clone(), v)
        })
        .collect()
}
