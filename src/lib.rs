//! Beacon - Kubernetes operator for managed telemetry collector deployments
//!
//! A Beacon instance is a long-lived custom resource whose schema and
//! configuration conventions evolve between operator releases. This crate
//! contains the operator's version-migration engine: on every pass it
//! discovers the Beacon instances owned by this operator identity and walks
//! each one forward through the known version chain, one step at a time,
//! until it reaches the latest version.
//!
//! The fleet converges even when individual instances are broken: a failed
//! upgrade or persist affects only that instance and is reported through
//! logs, never propagated to the rest of the pass.
//!
//! # Modules
//!
//! - [`crd`] - The Beacon Custom Resource Definition
//! - [`upgrade`] - Version registry, per-instance upgrader, and fleet reconciler
//! - [`config`] - Operator identity and permission configuration
//! - [`error`] - Error types for the operator

#![deny(missing_docs)]

pub mod config;
pub mod crd;
pub mod error;
pub mod upgrade;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
