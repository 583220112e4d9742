//! Transfer façade crate: per-mode delta-V and time-of-flight between heliocentric positions.

pub mod capture;
pub mod cost;
pub mod mode;

pub use facade::*;
pub use haul_impulsive as impulsive;

mod facade;
