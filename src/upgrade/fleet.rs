//! Fleet reconciler
//!
//! One pass over every managed instance owned by this operator identity:
//! list candidates, re-check ownership per item, upgrade, and persist the
//! result when anything changed. Failures are isolated per instance; only a
//! failure of the listing phase itself aborts the pass. A broken instance
//! must never hold the rest of the fleet hostage.

use std::sync::Arc;

use kube::{Client, ResourceExt};
use tracing::{debug, error, info, instrument};

use crate::config::OperatorConfig;
use crate::crd::Beacon;
use crate::Error;

use super::instance;
use super::lister;
use super::registry::VersionRegistry;
use super::store::{BeaconStore, KubeBeaconStore};

/// Per-instance result of one reconciliation pass.
///
/// Transient: tallied for the end-of-pass summary, never persisted. The
/// source of truth for "is this instance current" is always the version tag
/// read fresh on the next pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Already at the latest known version (or unknown version), untouched
    Unchanged,
    /// Upgraded and persisted
    Updated,
    /// Ownership label does not match this operator, skipped
    Skipped,
    /// Upgrade or persist failed; logged, not retried this pass
    Failed,
}

/// Shared state for fleet reconciliation passes.
///
/// Holds the store, the immutable version registry, and the operator
/// configuration; shared read-only across passes.
pub struct Context {
    /// Beacon list/update access (trait object for testability)
    pub store: Arc<dyn BeaconStore>,
    /// The version chain, built once at startup
    pub registry: Arc<VersionRegistry>,
    /// Operator identity and permission configuration
    pub config: OperatorConfig,
}

impl Context {
    /// Create a context backed by the real Kubernetes API
    pub fn new(client: Client, registry: Arc<VersionRegistry>, config: OperatorConfig) -> Self {
        Self {
            store: Arc::new(KubeBeaconStore::new(client)),
            registry,
            config,
        }
    }

    /// Create a context with a custom store, for unit tests
    #[cfg(test)]
    pub fn for_testing(
        store: Arc<dyn BeaconStore>,
        registry: Arc<VersionRegistry>,
        config: OperatorConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }
}

/// Find all Beacon instances owned by this operator identity and upgrade
/// them, if necessary.
///
/// Returns an error only when the listing phase fails; per-instance upgrade
/// and persist failures are logged and the pass continues with the next
/// candidate.
#[instrument(skip(ctx), fields(identity = %ctx.config.identity))]
pub async fn reconcile_fleet(ctx: &Context) -> Result<(), Error> {
    let candidates = lister::list_owned(ctx.store.as_ref(), &ctx.config).await?;

    let (mut updated, mut unchanged, mut skipped, mut failed) = (0u32, 0u32, 0u32, 0u32);
    for beacon in candidates {
        match reconcile_one(ctx, beacon).await {
            Outcome::Updated => updated += 1,
            Outcome::Unchanged => unchanged += 1,
            Outcome::Skipped => skipped += 1,
            Outcome::Failed => failed += 1,
        }
    }

    info!(updated, unchanged, skipped, failed, "fleet upgrade pass complete");
    Ok(())
}

/// Upgrade a single candidate and persist the result when it changed.
async fn reconcile_one(ctx: &Context, beacon: Beacon) -> Outcome {
    let name = beacon.name_any();
    let namespace = beacon.namespace().unwrap_or_default();

    // The lister already filters on the ownership label, but a list
    // implementation is not required to filter precisely (test doubles in
    // particular may not), so double-check before mutating anything.
    let owner = beacon.operated_by();
    if owner != Some(ctx.config.identity.as_str()) {
        debug!(
            name = %name,
            namespace = %namespace,
            owner_identity = owner.unwrap_or(""),
            "skipping upgrade, not the owner of this instance"
        );
        return Outcome::Skipped;
    }

    let outcome = match instance::upgrade(&ctx.registry, beacon) {
        Ok(outcome) => outcome,
        // Already logged with the failing target version; partial progress
        // is not persisted.
        Err(_) => return Outcome::Failed,
    };

    if !outcome.changed {
        return Outcome::Unchanged;
    }

    match ctx.store.update(&outcome.resource).await {
        Ok(()) => Outcome::Updated,
        Err(err) => {
            error!(
                name = %name,
                namespace = %namespace,
                error = %err,
                "failed to store the upgraded instance"
            );
            Outcome::Failed
        }
    }
}
