//! Single-instance upgrader
//!
//! Walks one Beacon forward through the version chain: look up where the
//! instance sits, then apply every later step in order, stamping the version
//! tag after each successful transform. The walk stops at the first failing
//! transform and hands back the partially upgraded resource, so the caller
//! decides what to do with the progress already made.
//!
//! Instances whose version tag is not in the chain are left untouched:
//! an unknown version is not assumed to be older than the chain, it may
//! simply not be tracked by this operator generation.

use kube::ResourceExt;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::crd::Beacon;
use crate::Error as OperatorError;

use super::registry::VersionRegistry;

/// Result of a successful chain walk
#[derive(Debug)]
pub struct UpgradeOutcome {
    /// The resource, migrated to the latest version the chain reaches
    pub resource: Beacon,
    /// True when at least one transform was applied.
    ///
    /// The fleet reconciler persists on this flag; an untouched resource is
    /// never written back.
    pub changed: bool,
}

/// A transform in the chain rejected the resource.
///
/// Steps before the failing one already took effect: `resource` carries the
/// version tag of the last successful step. Steps after the failing one were
/// never invoked.
#[derive(Debug, Error)]
#[error("upgrade to version {target} failed: {source}")]
pub struct UpgradeFailure {
    /// The partially upgraded resource, valid as of the last successful step
    pub resource: Beacon,
    /// The version whose transform failed
    pub target: String,
    /// The underlying transform error
    #[source]
    pub source: OperatorError,
}

/// Bring one Beacon instance to the latest version the registry knows.
///
/// Transforms are applied strictly in chain order, never skipped, never
/// reordered. No I/O happens here; persisting the result is the caller's
/// decision.
#[instrument(skip(registry, beacon), fields(
    name = %beacon.name_any(),
    namespace = %beacon.namespace().unwrap_or_default(),
))]
pub fn upgrade(
    registry: &VersionRegistry,
    beacon: Beacon,
) -> Result<UpgradeOutcome, UpgradeFailure> {
    let current = beacon.current_version().to_string();

    let Some(steps) = registry.steps_after(&current) else {
        debug!(version = %current, "version not in upgrade chain, treating as current");
        return Ok(UpgradeOutcome {
            resource: beacon,
            changed: false,
        });
    };

    let mut resource = beacon;
    let mut changed = false;

    for step in steps {
        match step.apply(resource.clone()) {
            Ok(mut upgraded) => {
                upgraded.set_version(step.version());
                resource = upgraded;
                changed = true;
            }
            Err(source) => {
                warn!(
                    from = %resource.current_version(),
                    to = %step.version(),
                    error = %source,
                    "failed to upgrade managed instance"
                );
                return Err(UpgradeFailure {
                    resource,
                    target: step.version().to_string(),
                    source,
                });
            }
        }
    }

    Ok(UpgradeOutcome { resource, changed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{BeaconSpec, BeaconStatus, CollectorSpec};
    use crate::upgrade::registry::VersionStep;

    fn beacon_at(version: &str) -> Beacon {
        let mut beacon = Beacon::new(
            "trace-store",
            BeaconSpec {
                collector: Some(CollectorSpec::default()),
                ..Default::default()
            },
        );
        beacon.metadata.namespace = Some("observability".to_string());
        if !version.is_empty() {
            beacon.status = Some(BeaconStatus {
                version: version.to_string(),
                ..Default::default()
            });
        }
        beacon
    }

    fn passthrough(beacon: Beacon) -> Result<Beacon, OperatorError> {
        Ok(beacon)
    }

    /// Transforms leave a marker option so tests can observe which steps ran
    /// and in what order.
    fn mark(mut beacon: Beacon, marker: &str) -> Beacon {
        let collector = beacon.spec.collector.get_or_insert_with(Default::default);
        let order = collector.options.len();
        collector
            .options
            .insert(marker.to_string(), order.to_string());
        beacon
    }

    fn mark_a(beacon: Beacon) -> Result<Beacon, OperatorError> {
        Ok(mark(beacon, "step-a"))
    }

    fn mark_b(beacon: Beacon) -> Result<Beacon, OperatorError> {
        Ok(mark(beacon, "step-b"))
    }

    fn boom(_beacon: Beacon) -> Result<Beacon, OperatorError> {
        Err(OperatorError::upgrade("transform rejected resource"))
    }

    fn marker(beacon: &Beacon, name: &str) -> Option<String> {
        beacon
            .spec
            .collector
            .as_ref()
            .and_then(|c| c.options.get(name).cloned())
    }

    #[test]
    fn test_unknown_version_is_left_untouched() {
        let registry = VersionRegistry::new(vec![
            VersionStep::new("1.0.0", passthrough),
            VersionStep::new("1.1.0", mark_a),
        ]);
        let beacon = beacon_at("0.8.2");

        let outcome = upgrade(&registry, beacon.clone()).unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.resource, beacon);
    }

    #[test]
    fn test_latest_version_is_left_untouched() {
        let registry = VersionRegistry::new(vec![
            VersionStep::new("1.0.0", passthrough),
            VersionStep::new("1.1.0", mark_a),
        ]);
        let beacon = beacon_at("1.1.0");

        let outcome = upgrade(&registry, beacon.clone()).unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.resource.current_version(), "1.1.0");
        assert_eq!(outcome.resource, beacon);
    }

    #[test]
    fn test_transforms_apply_in_chain_order() {
        let registry = VersionRegistry::new(vec![
            VersionStep::new("1.0.0", passthrough),
            VersionStep::new("1.1.0", mark_a),
            VersionStep::new("1.2.0", mark_b),
        ]);

        let outcome = upgrade(&registry, beacon_at("1.0.0")).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.resource.current_version(), "1.2.0");
        // marker values record insertion order: a before b
        assert_eq!(marker(&outcome.resource, "step-a").as_deref(), Some("0"));
        assert_eq!(marker(&outcome.resource, "step-b").as_deref(), Some("1"));
    }

    #[test]
    fn test_pre_versioning_instance_walks_the_whole_chain() {
        let registry = VersionRegistry::new(vec![
            VersionStep::new("", passthrough),
            VersionStep::new("1.0.0", mark_a),
        ]);

        let outcome = upgrade(&registry, beacon_at("")).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.resource.current_version(), "1.0.0");
        assert!(marker(&outcome.resource, "step-a").is_some());
    }

    #[test]
    fn test_failure_keeps_progress_and_stops_the_walk() {
        let registry = VersionRegistry::new(vec![
            VersionStep::new("1.0.0", passthrough),
            VersionStep::new("1.1.0", mark_a),
            VersionStep::new("1.2.0", boom),
            VersionStep::new("1.3.0", mark_b),
        ]);

        let failure = upgrade(&registry, beacon_at("1.0.0")).unwrap_err();
        assert_eq!(failure.target, "1.2.0");
        // the 1.1.0 step took effect...
        assert_eq!(failure.resource.current_version(), "1.1.0");
        assert!(marker(&failure.resource, "step-a").is_some());
        // ...and the step after the failing one was never invoked
        assert!(marker(&failure.resource, "step-b").is_none());
        assert!(matches!(failure.source, OperatorError::Upgrade(_)));
    }

    #[test]
    fn test_failure_on_first_step_returns_original_resource() {
        let registry = VersionRegistry::new(vec![
            VersionStep::new("1.0.0", passthrough),
            VersionStep::new("1.1.0", boom),
        ]);
        let beacon = beacon_at("1.0.0");

        let failure = upgrade(&registry, beacon.clone()).unwrap_err();
        assert_eq!(failure.resource, beacon);
        assert_eq!(failure.target, "1.1.0");
    }
}
