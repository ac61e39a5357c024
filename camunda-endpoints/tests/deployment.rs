mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;

use camunda_client::CamundaError;
use camunda_core::{Endpoint, Entity, HttpMethod, InputError, RequestBody};
use camunda_endpoints::deployment::{
    CreateDeployment, DeleteDeployment, DeploymentSortBy, GetDeployment, GetDeploymentCount,
    GetDeploymentResource, GetDeploymentResources, GetDeployments, NewDeploymentRequest, Redeploy,
    RedeployRequest,
};
use camunda_endpoints::SortOrder;

use common::{camunda, query, Recorder};

const INVOICE: &str = r#"{
    "id": "d1",
    "name": "invoice",
    "source": "cockpit",
    "deploymentTime": "2020-01-01T00:00:00.000+0000",
    "tenantId": null,
    "links": [{"method": "GET", "href": "/deployment/d1", "rel": "self"}]
}"#;

#[test]
fn uris_follow_the_resource_layout() {
    assert_eq!(GetDeployments::new().uri(), "/deployment");
    assert_eq!(GetDeploymentCount::new().uri(), "/deployment/count");
    assert_eq!(GetDeployment::new("d1").uri(), "/deployment/d1");
    assert_eq!(CreateDeployment::new().uri(), "/deployment/create");
    assert_eq!(Redeploy::new("d1").uri(), "/deployment/d1/redeploy");
    assert_eq!(GetDeploymentResources::new("d1").uri(), "/deployment/d1/resources");
    assert_eq!(
        GetDeploymentResource::new("d1", "r7").uri(),
        "/deployment/d1/resources/r7"
    );
    assert_eq!(
        GetDeployment::new("d1").on_engine("billing").engine_uri(),
        "/engine/billing/deployment/d1"
    );
    assert_eq!(CreateDeployment::new().method(), HttpMethod::Post);
    assert_eq!(DeleteDeployment::new("d1").method(), HttpMethod::Delete);
}

#[tokio::test]
async fn fetches_a_deployment_behind_the_hijacking_prefix() {
    let recorder = Arc::new(Recorder::default().respond(
        200,
        ")]}'\n{\"id\":\"d1\",\"name\":\"dep\",\"source\":\"x\",\"deploymentTime\":\"2020-01-01T00:00:00Z\"}",
    ));
    let camunda = camunda(&recorder);

    let deployment = camunda
        .dispatch(&GetDeployment::new("d1"), None, false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(deployment.id.as_deref(), Some("d1"));
    assert_eq!(deployment.name.as_deref(), Some("dep"));
    assert_eq!(
        deployment.deployment_time,
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        recorder.last().url.as_str(),
        "http://localhost:8080/engine-rest/deployment/d1"
    );
}

#[tokio::test]
async fn list_parameters_render_as_query() {
    let recorder = Arc::new(Recorder::default().respond(200, &format!("[{INVOICE}]")));
    let camunda = camunda(&recorder);

    let endpoint = GetDeployments::new()
        .with_parameters(json!({
            "nameLike": "inv%",
            "after": "2020-01-01T00:00:00Z",
            "sortBy": "deploymentTime",
            "sortOrder": "desc",
            "maxResults": 10
        }))
        .unwrap();
    let list = camunda.dispatch(&endpoint, None, false).await.unwrap().unwrap();

    assert_eq!(list.iter().count(), 1);
    let first = list.iter().next().unwrap();
    assert_eq!(first.links.as_ref().map(Vec::len), Some(1));
    assert_eq!(first.tenant_id, None);

    let mut pairs = query(&recorder.last());
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("after".to_string(), "2020-01-01T00:00:00.000+0000".to_string()),
            ("maxResults".to_string(), "10".to_string()),
            ("nameLike".to_string(), "inv%".to_string()),
            ("sortBy".to_string(), "deploymentTime".to_string()),
            ("sortOrder".to_string(), "desc".to_string()),
        ]
    );
}

#[test]
fn list_parameters_reject_unknown_sort_keys() {
    assert!(GetDeployments::new()
        .with_parameters(json!({"sortBy": "created"}))
        .is_err());
    assert!(GetDeployments::new()
        .with_parameters(json!({"withoutSource": false}))
        .is_err());
    assert!(GetDeploymentCount::new()
        .with_parameters(json!({"tenantIdIn": "a,b", "withoutTenantId": true}))
        .is_ok());
}

#[test]
fn typed_sort_values_serialize_to_wire_names() {
    assert_eq!(
        serde_json::to_value(DeploymentSortBy::TenantId).unwrap(),
        json!("tenantId")
    );
    assert_eq!(serde_json::to_value(SortOrder::Ascending).unwrap(), json!("asc"));
}

#[tokio::test]
async fn create_sends_a_multipart_form_and_keeps_extra_keys() {
    let recorder = Arc::new(Recorder::default().respond(
        200,
        r#"{
            "id": "d2",
            "name": "invoice",
            "source": null,
            "deploymentTime": "2021-06-30T12:00:00.000+0200",
            "deployedProcessDefinitions": {"invoice:1:abc": {"key": "invoice"}}
        }"#,
    ));
    let camunda = camunda(&recorder);

    let form = NewDeploymentRequest::form(
        [("invoice.bpmn", b"<definitions/>".to_vec())],
        [("deployment_name", "invoice"), ("enable-duplicate-filtering", "true")],
    )
    .unwrap();
    let created = camunda
        .dispatch(&CreateDeployment::new(), Some(&form), false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.id.as_deref(), Some("d2"));
    assert!(created.get("deployedProcessDefinitions").is_some());

    let req = recorder.last();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.header("content-type"), None);
    let RequestBody::Multipart(parts) = &req.body else {
        panic!("expected a multipart body, got {:?}", req.body);
    };
    let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["deployment-name", "enable-duplicate-filtering", "invoice.bpmn"]
    );
    assert_eq!(parts[0].content_type, "text/plain");
    assert_eq!(parts[2].content_type, "application/octet-stream");
    assert_eq!(parts[2].content, b"<definitions/>");
}

#[test]
fn deployment_form_rejects_unknown_options() {
    let err = NewDeploymentRequest::form(
        Vec::<(String, Vec<u8>)>::new(),
        [("deploy_everything", "yes")],
    )
    .unwrap_err();
    assert!(matches!(err, InputError::UnknownOption(name) if name == "deploy-everything"));
}

#[tokio::test]
async fn redeploy_posts_a_json_body() {
    let recorder = Arc::new(Recorder::default().respond(200, INVOICE));
    let camunda = camunda(&recorder);

    let payload = RedeployRequest::build(json!({"resourceNames": ["invoice.bpmn"]})).unwrap();
    camunda
        .dispatch(&Redeploy::new("d1"), Some(&payload), false)
        .await
        .unwrap();

    let req = recorder.last();
    assert_eq!(req.url.path(), "/engine-rest/deployment/d1/redeploy");
    let RequestBody::Bytes { content, content_type } = &req.body else {
        panic!("expected a byte body");
    };
    assert_eq!(content_type, "application/json");
    let sent: serde_json::Value = serde_json::from_slice(content).unwrap();
    assert_eq!(sent, json!({"resourceNames": ["invoice.bpmn"]}));
}

#[tokio::test]
async fn resources_and_count_decode() {
    let recorder = Arc::new(
        Recorder::default()
            .respond(
                200,
                r#"[{"id": "r1", "name": "invoice.bpmn", "deploymentId": "d1"},
                    {"id": "r2", "name": "review.dmn", "deploymentId": "d1"}]"#,
            )
            .respond(200, r#"{"count": 4}"#),
    );
    let camunda = camunda(&recorder);

    let resources = camunda
        .dispatch(&GetDeploymentResources::new("d1"), None, false)
        .await
        .unwrap()
        .unwrap();
    let names: Vec<_> = resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["invoice.bpmn", "review.dmn"]);

    let count = camunda
        .dispatch(&GetDeploymentCount::new(), None, false)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(count.count, 4);
}

#[tokio::test]
async fn delete_passes_cascade_and_returns_nothing() {
    let recorder = Arc::new(Recorder::default().respond(204, ""));
    let camunda = camunda(&recorder);

    let endpoint = DeleteDeployment::new("d1")
        .with_parameters(json!({"cascade": true}))
        .unwrap();
    let out = camunda.dispatch(&endpoint, None, false).await.unwrap();

    assert!(out.is_none());
    let req = recorder.last();
    assert_eq!(req.method, HttpMethod::Delete);
    assert_eq!(query(&req), vec![("cascade".to_string(), "true".to_string())]);
}

#[tokio::test]
async fn missing_deployment_is_not_found() {
    let recorder = Arc::new(Recorder::default().respond(
        404,
        r#"{"type": "InvalidRequestException", "message": "Deployment with id 'nope' does not exist"}"#,
    ));
    let camunda = camunda(&recorder);

    let err = camunda
        .dispatch(&GetDeployment::new("nope"), None, false)
        .await
        .unwrap_err();

    assert!(matches!(err, CamundaError::ResourceNotFound { .. }));
    assert_eq!(err.api_type(), Some("InvalidRequestException"));
}
