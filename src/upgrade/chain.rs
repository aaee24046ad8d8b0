//! The shipped upgrade chain
//!
//! Each release that changes configuration conventions appends one step
//! here. A step's transform only rewrites what that release deprecated;
//! the engine stamps the version tag itself.
//!
//! The chain starts at the empty version: instances created before
//! versioning was introduced carry no tag and enter the chain at its head.
//! The head step's transform never runs (a transform targets current to
//! next), it only anchors those instances.

use crate::crd::Beacon;
use crate::Error;

use super::registry::{VersionRegistry, VersionStep};

/// Build the registry of all versions this operator knows how to reach.
pub fn default_registry() -> VersionRegistry {
    VersionRegistry::new(vec![
        VersionStep::new("", no_changes),
        VersionStep::new("1.0.0", no_changes),
        VersionStep::new("1.1.0", upgrade_to_1_1_0),
        VersionStep::new("1.2.0", upgrade_to_1_2_0),
    ])
}

/// Version introduced no configuration changes; only the tag advances.
fn no_changes(beacon: Beacon) -> Result<Beacon, Error> {
    Ok(beacon)
}

/// 1.1.0 renamed the Elasticsearch URL option from `es.url` to
/// `es.server-urls` (it now accepts a comma-separated list).
fn upgrade_to_1_1_0(mut beacon: Beacon) -> Result<Beacon, Error> {
    if let Some(storage) = beacon.spec.storage.as_mut() {
        if let Some(url) = storage.options.remove("es.url") {
            storage.options.insert("es.server-urls".to_string(), url);
        }
    }
    Ok(beacon)
}

/// 1.2.0 replaced the single `collector.port` flag with per-protocol
/// host-port flags; the old value maps to the gRPC endpoint.
fn upgrade_to_1_2_0(mut beacon: Beacon) -> Result<Beacon, Error> {
    if let Some(collector) = beacon.spec.collector.as_mut() {
        if let Some(port) = collector.options.remove("collector.port") {
            collector
                .options
                .insert("collector.grpc.host-port".to_string(), format!(":{port}"));
        }
    }
    Ok(beacon)
}
