//! Custom Resource Definition for managed Beacon instances
//!
//! A Beacon is a managed telemetry collector deployment. The operator that
//! created an instance tags it with the ownership label so concurrent
//! operator installations never touch each other's fleet.

mod beacon;
mod types;

pub use beacon::{Beacon, BeaconSpec, BeaconStatus};
pub use types::{BeaconPhase, CollectorSpec, DeploymentStrategy, StorageSpec, StorageType};

/// Label naming the operator identity that owns a Beacon instance.
///
/// Set when the instance is first reconciled; an instance whose label does
/// not match the running operator's identity is never mutated by it.
pub const LABEL_OPERATED_BY: &str = "beacon.dev/operated-by";
