//! Impulsive transfer utilities: classical transfer approximations between circular orbits.

pub mod transfers;

pub use transfers::{HohmannResult, hohmann};
