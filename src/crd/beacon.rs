//! Beacon Custom Resource Definition
//!
//! The Beacon CRD represents one managed telemetry collector deployment.
//! Its `status.version` tag records the configuration-schema version the
//! instance was last migrated to; the upgrade engine advances it through
//! the known version chain.

use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{BeaconPhase, CollectorSpec, DeploymentStrategy, StorageSpec};
use super::LABEL_OPERATED_BY;

/// Specification for a Beacon instance
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "beacon.dev",
    version = "v1alpha1",
    kind = "Beacon",
    plural = "beacons",
    shortname = "bcn",
    status = "BeaconStatus",
    derive = "PartialEq",
    namespaced,
    printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Version","type":"string","jsonPath":".status.version"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct BeaconSpec {
    /// Deployment strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DeploymentStrategy>,

    /// Collector image override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Storage backend configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageSpec>,

    /// Collector deployment configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector: Option<CollectorSpec>,
}

/// Status for a Beacon instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BeaconStatus {
    /// Configuration-schema version this instance was last migrated to.
    ///
    /// Empty for instances created before versioning was introduced.
    #[serde(default)]
    pub version: String,

    /// Current lifecycle phase
    #[serde(default)]
    pub phase: BeaconPhase,

    /// Human-readable message about current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Beacon {
    /// The operator identity recorded in the ownership label, if any
    pub fn operated_by(&self) -> Option<&str> {
        self.labels().get(LABEL_OPERATED_BY).map(String::as_str)
    }

    /// The version tag this instance currently carries (empty when the
    /// status block is absent or the instance predates versioning)
    pub fn current_version(&self) -> &str {
        self.status.as_ref().map(|s| s.version.as_str()).unwrap_or("")
    }

    /// Stamp the version tag, creating the status block if needed
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.status.get_or_insert_with(BeaconStatus::default).version = version.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled_beacon(owner: &str) -> Beacon {
        let mut beacon = Beacon::new("trace-store", BeaconSpec::default());
        beacon
            .metadata
            .labels
            .get_or_insert_with(Default::default)
            .insert(LABEL_OPERATED_BY.to_string(), owner.to_string());
        beacon
    }

    #[test]
    fn test_operated_by_reads_ownership_label() {
        let beacon = labeled_beacon("operator-a");
        assert_eq!(beacon.operated_by(), Some("operator-a"));

        let unlabeled = Beacon::new("orphan", BeaconSpec::default());
        assert_eq!(unlabeled.operated_by(), None);
    }

    #[test]
    fn test_current_version_defaults_to_empty() {
        let beacon = Beacon::new("fresh", BeaconSpec::default());
        assert_eq!(beacon.current_version(), "");
    }

    #[test]
    fn test_set_version_creates_status_block() {
        let mut beacon = Beacon::new("fresh", BeaconSpec::default());
        beacon.set_version("1.1.0");
        assert_eq!(beacon.current_version(), "1.1.0");
        assert_eq!(beacon.status.as_ref().unwrap().phase, BeaconPhase::Pending);
    }
}
