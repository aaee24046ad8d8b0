//! Version-migration engine for the managed Beacon fleet
//!
//! Every operator release knows a fixed, totally ordered chain of
//! configuration versions. On each pass the fleet reconciler discovers the
//! instances owned by this operator identity and walks each one forward
//! through the chain to the latest version, isolating per-instance failures
//! so the fleet always converges.
//!
//! - [`registry`](VersionRegistry) - the immutable version chain
//! - [`default_registry`] - the chain shipped with this release
//! - [`upgrade`] - single-instance chain walk
//! - [`list_owned`] - ownership-scoped discovery with permission fallback
//! - [`reconcile_fleet`] - one full pass over the fleet

mod chain;
mod fleet;
mod instance;
mod lister;
mod registry;
mod store;

pub use chain::default_registry;
pub use fleet::{reconcile_fleet, Context, Outcome};
pub use instance::{upgrade, UpgradeFailure, UpgradeOutcome};
pub use lister::list_owned;
pub use registry::{UpgradeFn, VersionRegistry, VersionStep};
pub use store::{BeaconStore, KubeBeaconStore, ListScope};
