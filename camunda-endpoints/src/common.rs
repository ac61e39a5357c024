//! Types shared across resources.

use std::sync::LazyLock;

use camunda_core::{Entity, Schema, NUMBER, TEXT};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An enumeration whose wire form is a fixed set of JSON values.
pub trait WireEnum: Copy + 'static {
    const ALL: &'static [Self];

    fn wire_value(self) -> Value;

    /// Accepts exactly the wire values of [`Self::ALL`].
    fn schema() -> Schema {
        Schema::one_of(Self::ALL.iter().map(|v| v.wire_value()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} id {value}")]
pub struct UnknownId {
    pub kind: &'static str,
    pub value: u8,
}

/// Response of every `/count` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub count: u64,
}

impl Entity for Count {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::object().required("count", NUMBER).into());
        &SCHEMA
    }
}

/// Hypermedia link attached to some resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub method: String,
    pub href: String,
    pub rel: String,
}

impl Entity for Link {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::object()
                .required("method", TEXT)
                .required("href", TEXT)
                .required("rel", TEXT)
                .into()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    OctetStream,
    Plain,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::OctetStream => "application/octet-stream",
            ContentType::Plain => "text/plain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl WireEnum for SortOrder {
    const ALL: &'static [Self] = &[SortOrder::Ascending, SortOrder::Descending];

    fn wire_value(self) -> Value {
        match self {
            SortOrder::Ascending => "asc".into(),
            SortOrder::Descending => "desc".into(),
        }
    }
}

/// Integer ids of the engine's authorization resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ResourceType {
    Application,
    User,
    Group,
    GroupMembership,
    Authorization,
    Filter,
    ProcessDefinition,
    Task,
    ProcessInstance,
    Deployment,
    DecisionDefinition,
    Tenant,
    TenantMembership,
    Batch,
    DecisionRequirementsDefinition,
}

impl ResourceType {
    pub fn id(self) -> u8 {
        match self {
            ResourceType::Application => 0,
            ResourceType::User => 1,
            ResourceType::Group => 2,
            ResourceType::GroupMembership => 3,
            ResourceType::Authorization => 4,
            ResourceType::Filter => 5,
            ResourceType::ProcessDefinition => 6,
            ResourceType::Task => 7,
            ResourceType::ProcessInstance => 8,
            ResourceType::Deployment => 9,
            ResourceType::DecisionDefinition => 10,
            ResourceType::Tenant => 11,
            ResourceType::TenantMembership => 12,
            ResourceType::Batch => 13,
            ResourceType::DecisionRequirementsDefinition => 14,
        }
    }
}

impl From<ResourceType> for u8 {
    fn from(value: ResourceType) -> Self {
        value.id()
    }
}

impl TryFrom<u8> for ResourceType {
    type Error = UnknownId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.id() == value)
            .ok_or(UnknownId {
                kind: "resource type",
                value,
            })
    }
}

impl WireEnum for ResourceType {
    const ALL: &'static [Self] = &[
        ResourceType::Application,
        ResourceType::User,
        ResourceType::Group,
        ResourceType::GroupMembership,
        ResourceType::Authorization,
        ResourceType::Filter,
        ResourceType::ProcessDefinition,
        ResourceType::Task,
        ResourceType::ProcessInstance,
        ResourceType::Deployment,
        ResourceType::DecisionDefinition,
        ResourceType::Tenant,
        ResourceType::TenantMembership,
        ResourceType::Batch,
        ResourceType::DecisionRequirementsDefinition,
    ];

    fn wire_value(self) -> Value {
        self.id().into()
    }
}
