//! The mining asteroid: orbit, production rate and stockpile.

use haul_orbits::{OrbitError, OrbitalElements, StateVector};

use super::SimulationError;

#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidState {
    name: String,
    elements: OrbitalElements,
    daily_mined_kg: f64,
    state: StateVector,
    stored_kg: f64,
}

impl AsteroidState {
    /// Place the asteroid at its epoch position with `stored_kg` already stockpiled.
    pub fn new(
        name: impl Into<String>,
        elements: OrbitalElements,
        cycle_days: f64,
        daily_mined_kg: f64,
        stored_kg: f64,
    ) -> Result<Self, SimulationError> {
        if !daily_mined_kg.is_finite() || daily_mined_kg < 0.0 {
            return Err(SimulationError::InvalidQuantity {
                what: "daily mined mass",
                value: daily_mined_kg,
            });
        }
        if !stored_kg.is_finite() || stored_kg < 0.0 {
            return Err(SimulationError::InvalidQuantity {
                what: "stored mass",
                value: stored_kg,
            });
        }
        let state = haul_orbits::state(&elements, 0.0, cycle_days)?;
        Ok(Self {
            name: name.into(),
            elements,
            daily_mined_kg,
            state,
            stored_kg,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn daily_mined_kg(&self) -> f64 {
        self.daily_mined_kg
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn stored_kg(&self) -> f64 {
        self.stored_kg
    }

    /// Same asteroid propagated to `day` of a cycle lasting `total_days`.
    pub(crate) fn at_day(&self, day: f64, total_days: f64) -> Result<Self, OrbitError> {
        Ok(Self {
            state: haul_orbits::state(&self.elements, day, total_days)?,
            ..self.clone()
        })
    }

    pub(crate) fn with_stored(self, stored_kg: f64) -> Self {
        Self {
            stored_kg: stored_kg.max(0.0),
            ..self
        }
    }
}
