//! Deployment resource: `/deployment`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use camunda_core::endpoint::{Delete, Get, Post};
use camunda_core::format::timestamp;
use camunda_core::{
    DeleteEndpoint, Endpoint, EndpointBase, Entity, FormOption, FormSchema, GetEndpoint,
    InputError, MultipartFormInput, NoContent, NoParameters, PostEndpoint, Schema, Timestamp, BOOL,
    IDENTIFIER, NUMBER, TEXT, TIMESTAMP,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{ContentType, Count, Link, SortOrder, WireEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeploymentSortBy {
    Id,
    Name,
    DeploymentTime,
    TenantId,
}

impl WireEnum for DeploymentSortBy {
    const ALL: &'static [Self] = &[
        DeploymentSortBy::Id,
        DeploymentSortBy::Name,
        DeploymentSortBy::DeploymentTime,
        DeploymentSortBy::TenantId,
    ];

    fn wire_value(self) -> Value {
        match self {
            DeploymentSortBy::Id => "id".into(),
            DeploymentSortBy::Name => "name".into(),
            DeploymentSortBy::DeploymentTime => "deploymentTime".into(),
            DeploymentSortBy::TenantId => "tenantId".into(),
        }
    }
}

/// Query parameters of `GET /deployment` and `GET /deployment/count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentListParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_like: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub without_source: Option<bool>,
    /// Comma-separated tenant ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub without_tenant_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_deployments_without_tenant_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub after: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub before: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<DeploymentSortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_result: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
}

impl Entity for DeploymentListParameters {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .optional("id", TEXT)
                .optional("name", TEXT)
                .optional("nameLike", TEXT)
                .optional("source", TEXT)
                .optional("withoutSource", Schema::literal(true))
                .optional("tenantIdIn", TEXT)
                .optional("withoutTenantId", Schema::literal(true))
                .optional("includeDeploymentsWithoutTenantId", Schema::literal(true))
                .optional("after", TIMESTAMP)
                .optional("before", TIMESTAMP)
                .optional("sortBy", DeploymentSortBy::schema())
                .optional("sortOrder", SortOrder::schema())
                .optional("firstResult", NUMBER)
                .optional("maxResults", NUMBER)
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: Option<String>,
    pub name: Option<String>,
    pub source: Option<String>,
    #[serde(with = "timestamp")]
    pub deployment_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl Entity for Deployment {
    // `POST /deployment/create` adds the deployed definitions, so undeclared keys pass through.
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .required("id", IDENTIFIER)
                .required("name", IDENTIFIER)
                .required("source", IDENTIFIER)
                .required("deploymentTime", TIMESTAMP)
                .optional("tenantId", IDENTIFIER)
                .optional("links", Schema::list(Schema::entity::<Link>()))
                .allow_extra()
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentList(pub Vec<Deployment>);

impl Entity for DeploymentList {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::list(Schema::entity::<Deployment>()));
        &SCHEMA
    }
}

impl DeploymentList {
    pub fn iter(&self) -> std::slice::Iter<'_, Deployment> {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResource {
    pub id: Option<String>,
    pub name: String,
    pub deployment_id: Option<String>,
}

impl Entity for DeploymentResource {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .required("id", IDENTIFIER)
                .required("name", TEXT)
                .required("deploymentId", IDENTIFIER)
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResourceList(pub Vec<DeploymentResource>);

impl Entity for DeploymentResourceList {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::list(Schema::entity::<DeploymentResource>()));
        &SCHEMA
    }
}

impl DeploymentResourceList {
    pub fn iter(&self) -> std::slice::Iter<'_, DeploymentResource> {
        self.0.iter()
    }
}

/// Body of `POST /deployment/{id}/redeploy`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeployRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Entity for RedeployRequest {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .optional("resourceIds", Schema::list(TEXT))
                .optional("resourceNames", Schema::list(TEXT))
                .optional("source", TEXT)
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentDeletionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_custom_listeners: Option<bool>,
}

impl Entity for DeploymentDeletionParameters {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .optional("cascade", BOOL)
                .optional("skipCustomListeners", BOOL)
                .into()
        });
        &SCHEMA
    }
}

/// Multipart form of `POST /deployment/create`.
///
/// Files are the deployment's resources; options are `deployment-name`,
/// `enable-duplicate-filtering`, `deploy-changed-only`, `deployment-source` and `tenant-id`
/// (underscored spellings work too).
#[derive(Debug, Clone, Copy, Default)]
pub struct NewDeploymentRequest;

impl FormSchema for NewDeploymentRequest {
    fn options_by_name() -> &'static BTreeMap<&'static str, FormOption> {
        static OPTIONS: LazyLock<BTreeMap<&'static str, FormOption>> = LazyLock::new(|| {
            [
                "deployment-name",
                "enable-duplicate-filtering",
                "deploy-changed-only",
                "deployment-source",
                "tenant-id",
            ]
            .into_iter()
            .map(|name| (name, FormOption::new(ContentType::Plain.as_str())))
            .collect()
        });
        &OPTIONS
    }
}

impl NewDeploymentRequest {
    pub fn form<I, N, C, O, K, V>(files: I, options: O) -> Result<MultipartFormInput, InputError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<Vec<u8>>,
        O: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        MultipartFormInput::new::<Self, I, N, C, O, K, V>(files, options)
    }
}

#[derive(Debug, Default)]
pub struct GetDeployments {
    base: GetEndpoint,
}

impl GetDeployments {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Endpoint for GetDeployments {
    type Method = Get;
    type Parameters = DeploymentListParameters;
    type Response = DeploymentList;

    fn uri(&self) -> String {
        "/deployment".to_string()
    }

    delegate_base!(Get);
}

#[derive(Debug, Default)]
pub struct GetDeploymentCount {
    base: GetEndpoint,
}

impl GetDeploymentCount {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Endpoint for GetDeploymentCount {
    type Method = Get;
    type Parameters = DeploymentListParameters;
    type Response = Count;

    fn uri(&self) -> String {
        "/deployment/count".to_string()
    }

    delegate_base!(Get);
}

#[derive(Debug)]
pub struct GetDeployment {
    deployment_id: String,
    base: GetEndpoint,
}

impl GetDeployment {
    pub fn new(deployment_id: impl Into<String>) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            base: EndpointBase::new(),
        }
    }
}

impl Endpoint for GetDeployment {
    type Method = Get;
    type Parameters = NoParameters;
    type Response = Deployment;

    fn uri(&self) -> String {
        format!("/deployment/{}", self.deployment_id)
    }

    delegate_base!(Get);
}

/// Send with a [`NewDeploymentRequest::form`] payload.
#[derive(Debug, Default)]
pub struct CreateDeployment {
    base: PostEndpoint,
}

impl CreateDeployment {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Endpoint for CreateDeployment {
    type Method = Post;
    type Parameters = NoParameters;
    type Response = Deployment;

    fn uri(&self) -> String {
        "/deployment/create".to_string()
    }

    delegate_base!(Post);
}

/// Send with a [`RedeployRequest`] payload.
#[derive(Debug)]
pub struct Redeploy {
    deployment_id: String,
    base: PostEndpoint,
}

impl Redeploy {
    pub fn new(deployment_id: impl Into<String>) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            base: EndpointBase::new(),
        }
    }
}

impl Endpoint for Redeploy {
    type Method = Post;
    type Parameters = NoParameters;
    type Response = Deployment;

    fn uri(&self) -> String {
        format!("/deployment/{}/redeploy", self.deployment_id)
    }

    delegate_base!(Post);
}

#[derive(Debug)]
pub struct GetDeploymentResources {
    deployment_id: String,
    base: GetEndpoint,
}

impl GetDeploymentResources {
    pub fn new(deployment_id: impl Into<String>) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            base: EndpointBase::new(),
        }
    }
}

impl Endpoint for GetDeploymentResources {
    type Method = Get;
    type Parameters = NoParameters;
    type Response = DeploymentResourceList;

    fn uri(&self) -> String {
        format!("/deployment/{}/resources", self.deployment_id)
    }

    delegate_base!(Get);
}

#[derive(Debug)]
pub struct GetDeploymentResource {
    deployment_id: String,
    resource_id: String,
    base: GetEndpoint,
}

impl GetDeploymentResource {
    pub fn new(deployment_id: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            resource_id: resource_id.into(),
            base: EndpointBase::new(),
        }
    }
}

impl Endpoint for GetDeploymentResource {
    type Method = Get;
    type Parameters = NoParameters;
    type Response = DeploymentResource;

    fn uri(&self) -> String {
        format!(
            "/deployment/{}/resources/{}",
            self.deployment_id, self.resource_id
        )
    }

    delegate_base!(Get);
}

#[derive(Debug)]
pub struct DeleteDeployment {
    deployment_id: String,
    base: DeleteEndpoint,
}

impl DeleteDeployment {
    pub fn new(deployment_id: impl Into<String>) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            base: EndpointBase::new(),
        }
    }
}

impl Endpoint for DeleteDeployment {
    type Method = Delete;
    type Parameters = DeploymentDeletionParameters;
    type Response = NoContent;

    fn uri(&self) -> String {
        format!("/deployment/{}", self.deployment_id)
    }

    delegate_base!(Delete);
}
