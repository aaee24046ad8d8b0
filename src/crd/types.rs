//! Supporting types for the Beacon CRD

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Deployment strategy for a Beacon instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum DeploymentStrategy {
    /// Single pod running collector, query and storage together
    #[default]
    AllInOne,
    /// Separately scaled collector and query deployments
    Production,
}

impl std::fmt::Display for DeploymentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllInOne => write!(f, "allinone"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Storage backend type for collected telemetry
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum StorageType {
    /// In-memory storage, data lost on restart
    #[default]
    Memory,
    /// Elasticsearch cluster
    Elasticsearch,
    /// Cassandra cluster
    Cassandra,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Elasticsearch => write!(f, "elasticsearch"),
            Self::Cassandra => write!(f, "cassandra"),
        }
    }
}

/// Storage backend configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    /// The storage backend type
    #[serde(rename = "type", default)]
    pub type_: StorageType,

    /// Backend-specific options, passed through as collector flags.
    ///
    /// Option keys follow the current release's flag names; the upgrade
    /// engine rewrites keys deprecated by newer versions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

/// Collector deployment configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectorSpec {
    /// Number of collector replicas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Collector options, passed through as flags
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

/// Lifecycle phase of a Beacon instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum BeaconPhase {
    /// Instance accepted, deployment not yet rolled out
    #[default]
    Pending,
    /// Deployment rolled out and serving
    Running,
    /// Reconciliation failed, see status message
    Failed,
}

impl std::fmt::Display for BeaconPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Running => write!(f, "Running"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
