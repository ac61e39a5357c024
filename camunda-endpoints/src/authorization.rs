//! Authorization resource: `/authorization`.

use std::sync::LazyLock;

use camunda_core::endpoint::{Delete, Get, Post, Put};
use camunda_core::{
    DeleteEndpoint, Endpoint, EndpointBase, Entity, GetEndpoint, NoContent, NoParameters,
    PostEndpoint, PutEndpoint, Schema, BOOL, IDENTIFIER, NUMBER, TEXT,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Count, Link, ResourceType, SortOrder, UnknownId, WireEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AuthorizationType {
    Global,
    Grant,
    Revoke,
}

impl AuthorizationType {
    pub fn id(self) -> u8 {
        match self {
            AuthorizationType::Global => 0,
            AuthorizationType::Grant => 1,
            AuthorizationType::Revoke => 2,
        }
    }
}

impl From<AuthorizationType> for u8 {
    fn from(value: AuthorizationType) -> Self {
        value.id()
    }
}

impl TryFrom<u8> for AuthorizationType {
    type Error = UnknownId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AuthorizationType::Global),
            1 => Ok(AuthorizationType::Grant),
            2 => Ok(AuthorizationType::Revoke),
            _ => Err(UnknownId {
                kind: "authorization type",
                value,
            }),
        }
    }
}

impl WireEnum for AuthorizationType {
    const ALL: &'static [Self] = &[
        AuthorizationType::Global,
        AuthorizationType::Grant,
        AuthorizationType::Revoke,
    ];

    fn wire_value(self) -> Value {
        self.id().into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationSortBy {
    ResourceType,
    ResourceId,
}

impl WireEnum for AuthorizationSortBy {
    const ALL: &'static [Self] = &[AuthorizationSortBy::ResourceType, AuthorizationSortBy::ResourceId];

    fn wire_value(self) -> Value {
        match self {
            AuthorizationSortBy::ResourceType => "resourceType".into(),
            AuthorizationSortBy::ResourceId => "resourceId".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub id: String,
    #[serde(rename = "type")]
    pub authorization_type: AuthorizationType,
    pub permissions: Vec<String>,
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub resource_type: ResourceType,
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl Entity for Authorization {
    // Newer engines add `removalTime` and `rootProcessInstanceId`.
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .required("id", TEXT)
                .required("type", AuthorizationType::schema())
                .required("permissions", Schema::list(TEXT))
                .required("userId", IDENTIFIER)
                .required("groupId", IDENTIFIER)
                .required("resourceType", ResourceType::schema())
                .required("resourceId", IDENTIFIER)
                .optional("links", Schema::list(Schema::entity::<Link>()))
                .allow_extra()
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationList(pub Vec<Authorization>);

impl Entity for AuthorizationList {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::list(Schema::entity::<Authorization>()));
        &SCHEMA
    }
}

impl AuthorizationList {
    pub fn iter(&self) -> std::slice::Iter<'_, Authorization> {
        self.0.iter()
    }
}

/// Query parameters of `GET /authorization`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationListParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub authorization_type: Option<AuthorizationType>,
    /// Comma-separated user ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id_in: Option<String>,
    /// Comma-separated group ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<AuthorizationSortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_result: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
}

impl Entity for AuthorizationListParameters {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            filter_fields()
                .optional("sortBy", AuthorizationSortBy::schema())
                .optional("sortOrder", SortOrder::schema())
                .optional("firstResult", NUMBER)
                .optional("maxResults", NUMBER)
                .into()
        });
        &SCHEMA
    }
}

/// Query parameters of `GET /authorization/count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCountParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub authorization_type: Option<AuthorizationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl Entity for AuthorizationCountParameters {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| filter_fields().into());
        &SCHEMA
    }
}

fn filter_fields() -> camunda_core::schema::ObjectSchema {
    Schema::object()
        .optional("id", TEXT)
        .optional("type", AuthorizationType::schema())
        .optional("userIdIn", TEXT)
        .optional("groupIdIn", TEXT)
        .optional("resourceType", ResourceType::schema())
        .optional("resourceId", TEXT)
}

/// Query parameters of `GET /authorization/check`; everything but `resourceId` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCheckParameters {
    pub permission_name: String,
    pub permission_value: String,
    pub resource_name: String,
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl Entity for AuthorizationCheckParameters {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .required("permissionName", TEXT)
                .required("permissionValue", TEXT)
                .required("resourceName", TEXT)
                .required("resourceType", ResourceType::schema())
                .optional("resourceId", TEXT)
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCheckResult {
    pub permission_name: String,
    pub resource_name: String,
    pub resource_id: Option<String>,
    pub is_authorized: bool,
}

impl Entity for AuthorizationCheckResult {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .required("permissionName", TEXT)
                .required("resourceName", TEXT)
                .required("resourceId", IDENTIFIER)
                .required("isAuthorized", BOOL)
                .into()
        });
        &SCHEMA
    }
}

/// Body of `POST /authorization/create` and `PUT /authorization/{id}`.
///
/// `type` is required on create and refused on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthorizationRequest {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub authorization_type: Option<AuthorizationType>,
    pub permissions: Vec<String>,
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub resource_type: ResourceType,
    pub resource_id: Option<String>,
}

impl Entity for NewAuthorizationRequest {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .optional("type", AuthorizationType::schema())
                .required("permissions", Schema::list(TEXT))
                .required("userId", IDENTIFIER)
                .required("groupId", IDENTIFIER)
                .required("resourceType", ResourceType::schema())
                .required("resourceId", IDENTIFIER)
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Default)]
pub struct GetAuthorizations {
    base: GetEndpoint,
}

impl GetAuthorizations {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Endpoint for GetAuthorizations {
    type Method = Get;
    type Parameters = AuthorizationListParameters;
    type Response = AuthorizationList;

    fn uri(&self) -> String {
        "/authorization".to_string()
    }

    delegate_base!(Get);
}

#[derive(Debug, Default)]
pub struct GetAuthorizationCount {
    base: GetEndpoint,
}

impl GetAuthorizationCount {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Endpoint for GetAuthorizationCount {
    type Method = Get;
    type Parameters = AuthorizationCountParameters;
    type Response = Count;

    fn uri(&self) -> String {
        "/authorization/count".to_string()
    }

    delegate_base!(Get);
}

#[derive(Debug)]
pub struct GetAuthorization {
    authorization_id: String,
    base: GetEndpoint,
}

impl GetAuthorization {
    pub fn new(authorization_id: impl Into<String>) -> Self {
        Self {
            authorization_id: authorization_id.into(),
            base: EndpointBase::new(),
        }
    }
}

impl Endpoint for GetAuthorization {
    type Method = Get;
    type Parameters = NoParameters;
    type Response = Authorization;

    fn uri(&self) -> String {
        format!("/authorization/{}", self.authorization_id)
    }

    delegate_base!(Get);
}

/// Cannot be dispatched until [`AuthorizationCheckParameters`] are attached.
#[derive(Debug, Default)]
pub struct CheckAuthorization {
    base: GetEndpoint,
}

impl CheckAuthorization {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Endpoint for CheckAuthorization {
    type Method = Get;
    type Parameters = AuthorizationCheckParameters;
    type Response = AuthorizationCheckResult;

    fn uri(&self) -> String {
        "/authorization/check".to_string()
    }

    fn parameters_required(&self) -> bool {
        true
    }

    delegate_base!(Get);
}

/// Send with a [`NewAuthorizationRequest`] payload.
#[derive(Debug, Default)]
pub struct CreateAuthorization {
    base: PostEndpoint,
}

impl CreateAuthorization {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Endpoint for CreateAuthorization {
    type Method = Post;
    type Parameters = NoParameters;
    type Response = Authorization;

    fn uri(&self) -> String {
        "/authorization/create".to_string()
    }

    delegate_base!(Post);
}

/// Send with a [`NewAuthorizationRequest`] payload that has no `type`.
#[derive(Debug)]
pub struct UpdateAuthorization {
    authorization_id: String,
    base: PutEndpoint,
}

impl UpdateAuthorization {
    pub fn new(authorization_id: impl Into<String>) -> Self {
        Self {
            authorization_id: authorization_id.into(),
            base: EndpointBase::new(),
        }
    }
}

impl Endpoint for UpdateAuthorization {
    type Method = Put;
    type Parameters = NoParameters;
    type Response = NoContent;

    fn uri(&self) -> String {
        format!("/authorization/{}", self.authorization_id)
    }

    delegate_base!(Put);
}

#[derive(Debug)]
pub struct DeleteAuthorization {
    authorization_id: String,
    base: DeleteEndpoint,
}

impl DeleteAuthorization {
    pub fn new(authorization_id: impl Into<String>) -> Self {
        Self {
            authorization_id: authorization_id.into(),
            base: EndpointBase::new(),
        }
    }
}

impl Endpoint for DeleteAuthorization {
    type Method = Delete;
    type Parameters = NoParameters;
    type Response = NoContent;

    fn uri(&self) -> String {
        format!("/authorization/{}", self.authorization_id)
    }

    delegate_base!(Delete);
}
