//! Propulsion solver and hauler vehicle mass properties.

pub mod rocket;
pub mod vehicle;

pub use rocket::{delta_v_km_s, propellant_by_bisection, propellant_mass_for};
pub use vehicle::{Hauler, HaulerClass, PowerSource, PropulsionUnit, VehicleError};
