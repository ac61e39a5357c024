//! The `Camunda` connector: turns endpoint descriptors into HTTP exchanges.

mod cache;
mod error;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use camunda_core::{Endpoint, Entity, RequestBody, RequestInput, ResponseType, Schema, IDENTIFIER};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ConnectorConfig;
use crate::credentials::{UsernamePasswordCredentials, UsernamePasswordPair};
use crate::http::{HttpClient, HttpRequestParts, ReqwestHttpClient};
use crate::sanitize::sanitize_headers;

use self::cache::ResponseCache;
pub use self::error::CamundaError;

pub const ENGINE_REST_PATH: &str = "/engine-rest";
/// Guard some Camunda deployments put in front of JSON bodies.
pub const ANTI_HIJACKING_PREFIX: &str = ")]}'\n";

const CONTENT_TYPE: &str = "Content-Type";

/// Decoded response type of an endpoint.
pub type Output<E> = <<E as Endpoint>::Response as ResponseType>::Output;

/// Error body the engine sends with 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionReport {
    #[serde(rename = "type", default)]
    pub api_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Entity for ExceptionReport {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .optional("type", IDENTIFIER)
                .optional("message", IDENTIFIER)
                .allow_extra()
                .into()
        });
        &SCHEMA
    }
}

/// Client for one Camunda REST root.
pub struct Camunda<C = ReqwestHttpClient> {
    config: ConnectorConfig,
    rest_root: String,
    auth: Option<Arc<UsernamePasswordPair>>,
    http: C,
    cache: ResponseCache,
}

impl Camunda<ReqwestHttpClient> {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Option<UsernamePasswordCredentials>,
    ) -> Result<Self, CamundaError> {
        Self::from_config(ConnectorConfig::new(base_url), credentials)
    }

    pub fn from_config(
        config: ConnectorConfig,
        credentials: Option<UsernamePasswordCredentials>,
    ) -> Result<Self, CamundaError> {
        let http = ReqwestHttpClient::new(&config.user_agent)?;
        Self::with_http_client(config, credentials, http)
    }
}

impl<C: HttpClient> Camunda<C> {
    pub fn with_http_client(
        config: ConnectorConfig,
        credentials: Option<UsernamePasswordCredentials>,
        http: C,
    ) -> Result<Self, CamundaError> {
        let rest_root = format!("{}{ENGINE_REST_PATH}", config.base_url.trim_end_matches('/'));
        Url::parse(&rest_root).map_err(|source| CamundaError::InvalidUrl {
            url: rest_root.clone(),
            source,
        })?;

        let auth = credentials
            .and_then(UsernamePasswordCredentials::into_credentials)
            .map(Arc::new);

        Ok(Self {
            config,
            rest_root,
            auth,
            http,
            cache: ResponseCache::default(),
        })
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `base_url` with `/engine-rest` appended.
    pub fn rest_root(&self) -> &str {
        &self.rest_root
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn http_client(&self) -> &C {
        &self.http
    }

    /// Sends `endpoint` and decodes the response into its declared type.
    ///
    /// With `use_cache`, a response already decoded for this very endpoint instance is returned
    /// without a network call, and a fresh one is remembered. Endpoints without a response type
    /// yield `None`.
    pub async fn dispatch<E: Endpoint>(
        &self,
        endpoint: &E,
        payload: Option<&dyn RequestInput>,
        use_cache: bool,
    ) -> Result<Option<Arc<Output<E>>>, CamundaError> {
        let id = endpoint.request_id();
        if use_cache {
            if let Some(hit) = self.cache.get::<Output<E>>(id).await {
                tracing::debug!(request_id = %id, uri = %endpoint.uri(), "serving cached response");
                return Ok(Some(hit));
            }
        }

        let url = self.request_url(endpoint)?;
        let body = match payload {
            Some(input) => input.to_request_body()?,
            None => RequestBody::Empty,
        };
        let headers = compose_headers(&self.config.default_headers, endpoint.headers(), &body);

        tracing::debug!(
            method = %endpoint.method(),
            url = %url,
            headers = ?sanitize_headers(&headers, &self.config.sensitive_headers),
            basic_auth = self.auth.is_some(),
            "sending request to Camunda endpoint"
        );

        let req = HttpRequestParts {
            method: endpoint.method(),
            url,
            headers,
            body,
            basic_auth: self.auth.clone(),
        };
        let resp = self
            .http
            .send(req, endpoint.timeout())
            .await
            .inspect_err(|e| tracing::warn!(uri = %endpoint.engine_uri(), error = %e, "request failed"))?;

        let text = resp.text();
        if !resp.is_success() {
            let err = classify(resp.status, &text);
            tracing::debug!(uri = %endpoint.engine_uri(), status = resp.status, error = %err, "request rejected");
            return Err(err);
        }

        let cleaned = text.strip_prefix(ANTI_HIJACKING_PREFIX).unwrap_or(&text);
        let Some(decoded) = <E::Response as ResponseType>::decode_response(cleaned)? else {
            return Ok(None);
        };

        let decoded = Arc::new(decoded);
        if use_cache {
            self.cache.insert(id, Arc::clone(&decoded)).await;
        }
        Ok(Some(decoded))
    }

    pub async fn cached_len(&self) -> usize {
        self.cache.len().await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    fn request_url<E: Endpoint>(&self, endpoint: &E) -> Result<Url, CamundaError> {
        let raw = format!("{}{}", self.rest_root, endpoint.engine_uri());
        let mut url = Url::parse(&raw).map_err(|source| CamundaError::InvalidUrl { url: raw, source })?;
        if let Some(params) = endpoint.params()? {
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(params);
            }
        }
        Ok(url)
    }
}

impl<C> fmt::Debug for Camunda<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camunda")
            .field("rest_root", &self.rest_root)
            .field("authenticated", &self.auth.is_some())
            .finish_non_exhaustive()
    }
}

/// Maps a non-2xx response: 400 and 404 to typed failures, anything else to `UnexpectedStatus`.
fn classify(status: u16, body: &str) -> CamundaError {
    match status {
        400 | 404 => {
            let (message, api_type) = match ExceptionReport::construct(body) {
                Ok(report) => {
                    let report = report.into_inner();
                    (report.message.unwrap_or_default(), report.api_type)
                }
                Err(_) => (body.to_string(), None),
            };
            if status == 400 {
                CamundaError::BadRequest { message, api_type }
            } else {
                CamundaError::ResourceNotFound { message, api_type }
            }
        }
        _ => CamundaError::UnexpectedStatus {
            status,
            body: body.to_string(),
        },
    }
}

/// Connector defaults overlaid with endpoint headers, names compared case-insensitively.
/// Multipart bodies lose `Content-Type` so the transport can add the boundary; other bodies
/// fall back to their own content type when none is set.
fn compose_headers(
    defaults: &BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
    body: &RequestBody,
) -> BTreeMap<String, String> {
    let mut headers = defaults.clone();
    for (name, value) in overrides {
        headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        headers.insert(name, value);
    }

    if body.is_multipart() {
        headers.retain(|k, _| !k.eq_ignore_ascii_case(CONTENT_TYPE));
    } else if let Some(content_type) = body.content_type() {
        if !headers.keys().any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE)) {
            headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> BTreeMap<String, String> {
        ConnectorConfig::default().default_headers
    }

    #[test]
    fn endpoint_headers_override_defaults_case_insensitively() {
        let overrides = BTreeMap::from([("content-type".to_string(), "text/xml".to_string())]);
        let headers = compose_headers(&defaults(), overrides, &RequestBody::Empty);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("content-type").map(String::as_str), Some("text/xml"));
    }

    #[test]
    fn multipart_drops_content_type() {
        let headers = compose_headers(&defaults(), BTreeMap::new(), &RequestBody::Multipart(vec![]));
        assert!(headers.is_empty());
    }

    #[test]
    fn body_content_type_fills_gap() {
        let body = RequestBody::Bytes {
            content: b"{}".to_vec(),
            content_type: "application/json".to_string(),
        };
        let headers = compose_headers(&BTreeMap::new(), BTreeMap::new(), &body);
        assert_eq!(headers.get("Content-Type").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn classify_reads_exception_report() {
        let err = classify(404, r#"{"type":"RestException","message":"no such deployment"}"#);
        assert!(matches!(err, CamundaError::ResourceNotFound { ref message, .. } if message == "no such deployment"));
        assert_eq!(err.api_type(), Some("RestException"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn classify_falls_back_to_raw_body() {
        let err = classify(400, "<html>bad gateway</html>");
        assert!(matches!(err, CamundaError::BadRequest { ref message, api_type: None } if message == "<html>bad gateway</html>"));
    }

    #[test]
    fn classify_flags_other_statuses_as_unexpected() {
        assert!(matches!(classify(500, "boom"), CamundaError::UnexpectedStatus { status: 500, .. }));
        assert!(matches!(classify(302, ""), CamundaError::UnexpectedStatus { status: 302, .. }));
    }
}
