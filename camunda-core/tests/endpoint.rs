use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use camunda_core::{
    Endpoint, EndpointBase, EndpointError, Entity, GetEndpoint, HttpMethod, NoContent,
    NoParameters, PostEndpoint, ResponseType, Schema, BOOL, NUMBER, TEXT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    name_like: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    without_tenant_id: Option<bool>,
}

impl Entity for ListParameters {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .optional("nameLike", TEXT)
                .optional("sortOrder", Schema::one_of(["asc", "desc"]))
                .optional("maxResults", NUMBER)
                .optional("withoutTenantId", BOOL)
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Thing {
    id: String,
}

impl Entity for Thing {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::object().required("id", TEXT).into());
        &SCHEMA
    }
}

#[derive(Debug, Default)]
struct GetThings {
    base: GetEndpoint,
}

impl Endpoint for GetThings {
    type Method = camunda_core::endpoint::Get;
    type Parameters = ListParameters;
    type Response = Thing;

    fn uri(&self) -> String {
        "/thing".to_string()
    }

    fn base(&self) -> &GetEndpoint {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GetEndpoint {
        &mut self.base
    }
}

#[derive(Debug)]
struct CheckThing {
    base: GetEndpoint,
}

impl Endpoint for CheckThing {
    type Method = camunda_core::endpoint::Get;
    type Parameters = ListParameters;
    type Response = Thing;

    fn uri(&self) -> String {
        "/thing/check".to_string()
    }

    fn base(&self) -> &GetEndpoint {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GetEndpoint {
        &mut self.base
    }

    fn parameters_required(&self) -> bool {
        true
    }
}

#[derive(Debug)]
struct TouchThing {
    id: String,
    base: PostEndpoint,
}

impl Endpoint for TouchThing {
    type Method = camunda_core::endpoint::Post;
    type Parameters = NoParameters;
    type Response = NoContent;

    fn uri(&self) -> String {
        format!("/thing/{}/touch", self.id)
    }

    fn base(&self) -> &PostEndpoint {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PostEndpoint {
        &mut self.base
    }

    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("Content-Type".to_string(), "text/plain".to_string())])
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(30)
    }
}

fn touch(id: &str) -> TouchThing {
    TouchThing {
        id: id.to_string(),
        base: EndpointBase::new(),
    }
}

#[test]
fn engine_uri_is_plain_without_named_engine() {
    let endpoint = GetThings::default();
    assert_eq!(endpoint.engine_uri(), "/thing");
    assert_eq!(endpoint.method(), HttpMethod::Get);
}

#[test]
fn named_engine_prefixes_uri() {
    let endpoint = touch("t1").on_engine("secondary");
    assert_eq!(endpoint.engine_name(), Some("secondary"));
    assert_eq!(endpoint.engine_uri(), "/engine/secondary/thing/t1/touch");
    assert_eq!(endpoint.method(), HttpMethod::Post);
}

#[test]
fn defaults_and_overrides() {
    let get = GetThings::default();
    assert_eq!(get.timeout(), Duration::from_secs(10));
    assert!(get.headers().is_empty());

    let post = touch("t1");
    assert_eq!(post.timeout(), Duration::from_secs(30));
    assert_eq!(post.headers().get("Content-Type").map(String::as_str), Some("text/plain"));
}

#[test]
fn attaching_parameters_without_parameter_type_fails() {
    let err = touch("t1").with_parameters(json!({ "x": 1 })).unwrap_err();
    assert!(matches!(err, EndpointError::NoParameterType));
}

#[test]
fn attaching_parameters_validates_them() {
    let err = GetThings::default()
        .with_parameters(json!({ "sortOrder": "sideways" }))
        .unwrap_err();
    match err {
        EndpointError::Parameters(inner) => assert!(inner.is_invalid()),
        other => panic!("expected Parameters, got {other:?}"),
    }
}

#[test]
fn params_are_none_when_nothing_attached() {
    assert_eq!(GetThings::default().params().unwrap(), None);
}

#[test]
fn params_render_enum_wire_values() {
    let endpoint = GetThings::default()
        .with_parameters(json!({
            "nameLike": "invoice%",
            "sortOrder": "desc",
            "maxResults": 25,
            "withoutTenantId": false
        }))
        .unwrap();
    let mut params = endpoint.params().unwrap().unwrap();
    params.sort();
    assert_eq!(
        params,
        vec![
            ("maxResults".to_string(), "25".to_string()),
            ("nameLike".to_string(), "invoice%".to_string()),
            ("sortOrder".to_string(), "desc".to_string()),
            ("withoutTenantId".to_string(), "false".to_string()),
        ]
    );
}

#[test]
fn required_parameters_must_be_attached() {
    let endpoint = CheckThing {
        base: EndpointBase::new(),
    };
    let err = endpoint.params().unwrap_err();
    assert!(matches!(err, EndpointError::ParametersRequired { ref uri } if uri == "/thing/check"));

    let endpoint = endpoint
        .with_parameters(json!({ "nameLike": "x" }))
        .unwrap();
    assert_eq!(endpoint.params().unwrap().unwrap().len(), 1);
}

#[test]
fn identity_survives_parameters_and_differs_between_instances() {
    let a = GetThings::default();
    let id = a.request_id();
    let a = a.with_parameters(json!({ "maxResults": 1 })).unwrap();
    assert_eq!(a.request_id(), id);

    let b = GetThings::default()
        .with_parameters(json!({ "maxResults": 1 }))
        .unwrap();
    assert_ne!(a.request_id(), b.request_id());
}

#[test]
fn response_types_decode_or_discard() {
    let decoded = <Thing as ResponseType>::decode_response(r#"{"id":"t1"}"#)
        .unwrap()
        .unwrap();
    assert_eq!(decoded.id, "t1");
    assert!(<NoContent as ResponseType>::decode_response("anything")
        .unwrap()
        .is_none());
}
