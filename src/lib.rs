//! Asteroid water haul economics.
//!
//! Orbital propagation, transfer costing and the rocket equation live in the `haul_*` crates,
//! re-exported here. This crate adds the daily simulation engine and scenario assembly on top so
//! that the CLI and tests share one entry point.

pub mod scenario;
pub mod simulation;

pub use haul_config as config;
pub use haul_core::{constants, units, vector};
pub use haul_export as export;
pub use haul_impulsive as impulsive;
pub use haul_orbits as orbits;
pub use haul_propulsion as propulsion;
pub use haul_transfer as transfer;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
