//! Destination catalog entries and their per-day snapshots.

use haul_core::vector::Vector3;
use haul_orbits::{OrbitError, OrbitalElements};
use haul_transfer::{CaptureTarget, TransferCosts};

use super::SimulationError;
use super::price::PriceCurve;

/// Immutable catalog entry for a place that buys water.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    name: String,
    elements: OrbitalElements,
    capture: Option<CaptureTarget>,
    price: PriceCurve,
    cycler_establishment_delta_v_km_s: Option<f64>,
}

impl Destination {
    pub fn new(
        name: impl Into<String>,
        elements: OrbitalElements,
        capture: Option<CaptureTarget>,
        price: PriceCurve,
        cycler_establishment_delta_v_km_s: Option<f64>,
    ) -> Result<Self, SimulationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SimulationError::InvalidDestination {
                name,
                reason: "name must not be empty",
            });
        }
        if !price.is_finite() {
            return Err(SimulationError::InvalidDestination {
                name,
                reason: "price curve parameters must be finite",
            });
        }
        if let Some(dv) = cycler_establishment_delta_v_km_s {
            if !dv.is_finite() || dv < 0.0 {
                return Err(SimulationError::InvalidDestination {
                    name,
                    reason: "cycler establishment delta-V must be a non-negative number",
                });
            }
        }
        Ok(Self {
            name,
            elements,
            capture,
            price,
            cycler_establishment_delta_v_km_s,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn capture(&self) -> Option<CaptureTarget> {
        self.capture
    }

    pub fn price_curve(&self) -> &PriceCurve {
        &self.price
    }

    pub fn cycler_establishment_delta_v_km_s(&self) -> Option<f64> {
        self.cycler_establishment_delta_v_km_s
    }

    /// Heliocentric position on `day`, propagated over the destination's own period.
    pub fn position_au(&self, day: f64) -> Result<Vector3, OrbitError> {
        haul_orbits::position(&self.elements, day, self.elements.period_days())
    }
}

/// Price, position and transfer costs of one destination on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationSnapshot {
    pub name: String,
    pub price_per_kg: f64,
    pub position_au: Vector3,
    pub costs: TransferCosts,
}
