//! Hauler vehicles assembled from a chassis class, propulsion units and power sources.

use thiserror::Error;

use crate::rocket::{delta_v_km_s, propellant_by_bisection, propellant_mass_for};

/// Relative tolerance under which two effective specific impulses are treated as equal.
const ISP_MATCH_TOLERANCE: f64 = 1e-9;

/// Configuration errors raised while assembling a hauler.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VehicleError {
    #[error("propulsion requires {required_kw} kW but power sources supply only {available_kw} kW")]
    InsufficientPower { required_kw: f64, available_kw: f64 },
    #[error("{count} x '{name}' installed, at most {max} allowed per vehicle")]
    TooManyUnits { name: String, count: u32, max: u32 },
    #[error("vehicle has no propulsion units installed")]
    NoPropulsion,
    #[error("component '{name}' is invalid: {reason}")]
    InvalidComponent { name: String, reason: &'static str },
}

/// Chassis class: structural dry mass and cargo capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct HaulerClass {
    pub name: String,
    pub dry_mass_kg: f64,
    pub cargo_capacity_kg: f64,
}

/// A water-propellant engine type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropulsionUnit {
    pub name: String,
    pub isp_s: f64,
    /// Fraction of the nominal specific impulse actually realised, in (0, 1].
    pub efficiency: f64,
    pub mass_kg: f64,
    pub power_kw: f64,
    pub max_per_vehicle: u32,
}

impl PropulsionUnit {
    /// Specific impulse after conversion losses (s).
    pub fn effective_isp_s(&self) -> f64 {
        self.isp_s * self.efficiency
    }
}

/// An on-board power supply.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSource {
    pub name: String,
    pub mass_kg: f64,
    pub power_kw: f64,
}

/// A validated hauler. Mass properties are fixed at construction.
#[derive(Debug, Clone)]
pub struct Hauler {
    name: String,
    class: HaulerClass,
    engines: Vec<(PropulsionUnit, u32)>,
    power: Vec<(PowerSource, u32)>,
    dry_mass_kg: f64,
    specific_impulse_s: f64,
    uniform_isp: bool,
}

impl Hauler {
    /// Assemble a hauler, rejecting power deficits and over-installed engine types.
    ///
    /// Entries with a zero count are ignored. Engine order is preserved and determines the burn
    /// sequence used by [`Hauler::delta_v_from_burning`].
    pub fn new(
        name: impl Into<String>,
        class: HaulerClass,
        engines: Vec<(PropulsionUnit, u32)>,
        power: Vec<(PowerSource, u32)>,
    ) -> Result<Self, VehicleError> {
        let engines: Vec<_> = engines.into_iter().filter(|(_, n)| *n > 0).collect();
        let power: Vec<_> = power.into_iter().filter(|(_, n)| *n > 0).collect();

        if !positive(class.dry_mass_kg) {
            return Err(VehicleError::InvalidComponent {
                name: class.name,
                reason: "dry mass must be positive",
            });
        }
        if !positive(class.cargo_capacity_kg) {
            return Err(VehicleError::InvalidComponent {
                name: class.name,
                reason: "cargo capacity must be positive",
            });
        }
        if engines.is_empty() {
            return Err(VehicleError::NoPropulsion);
        }
        for (unit, count) in &engines {
            if !positive(unit.isp_s) {
                return Err(VehicleError::InvalidComponent {
                    name: unit.name.clone(),
                    reason: "specific impulse must be positive",
                });
            }
            if !positive(unit.efficiency) || unit.efficiency > 1.0 {
                return Err(VehicleError::InvalidComponent {
                    name: unit.name.clone(),
                    reason: "efficiency must lie in (0, 1]",
                });
            }
            if *count > unit.max_per_vehicle {
                return Err(VehicleError::TooManyUnits {
                    name: unit.name.clone(),
                    count: *count,
                    max: unit.max_per_vehicle,
                });
            }
        }

        let required_kw: f64 = engines.iter().map(|(u, n)| u.power_kw * f64::from(*n)).sum();
        let available_kw: f64 = power.iter().map(|(p, n)| p.power_kw * f64::from(*n)).sum();
        if required_kw > available_kw {
            return Err(VehicleError::InsufficientPower {
                required_kw,
                available_kw,
            });
        }

        let dry_mass_kg = class.dry_mass_kg
            + engines.iter().map(|(u, n)| u.mass_kg * f64::from(*n)).sum::<f64>()
            + power.iter().map(|(p, n)| p.mass_kg * f64::from(*n)).sum::<f64>();

        let total_units: f64 = engines.iter().map(|(_, n)| f64::from(*n)).sum();
        let specific_impulse_s = engines
            .iter()
            .map(|(u, n)| u.effective_isp_s() * f64::from(*n))
            .sum::<f64>()
            / total_units;
        let uniform_isp = engines.iter().all(|(u, _)| {
            (u.effective_isp_s() - specific_impulse_s).abs()
                <= ISP_MATCH_TOLERANCE * specific_impulse_s
        });

        Ok(Self {
            name: name.into(),
            class,
            engines,
            power,
            dry_mass_kg,
            specific_impulse_s,
            uniform_isp,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &HaulerClass {
        &self.class
    }

    pub fn engines(&self) -> &[(PropulsionUnit, u32)] {
        &self.engines
    }

    pub fn power_sources(&self) -> &[(PowerSource, u32)] {
        &self.power
    }

    /// Chassis plus installed engines and power sources (kg).
    pub fn dry_mass_kg(&self) -> f64 {
        self.dry_mass_kg
    }

    /// Count-weighted mean of the engines' effective specific impulse (s).
    pub fn specific_impulse_s(&self) -> f64 {
        self.specific_impulse_s
    }

    pub fn cargo_capacity_kg(&self) -> f64 {
        self.class.cargo_capacity_kg
    }

    pub fn required_power_kw(&self) -> f64 {
        self.engines
            .iter()
            .map(|(u, n)| u.power_kw * f64::from(*n))
            .sum()
    }

    pub fn available_power_kw(&self) -> f64 {
        self.power.iter().map(|(p, n)| p.power_kw * f64::from(*n)).sum()
    }

    /// Delta-V (km/s) from burning `propellant_kg` down to the dry mass.
    ///
    /// The load is split between engine types by unit count and each share is burned in turn,
    /// so a single engine type reduces to the plain rocket equation.
    pub fn delta_v_from_burning(&self, propellant_kg: f64) -> f64 {
        if propellant_kg.is_nan() || propellant_kg <= 0.0 {
            return 0.0;
        }
        if self.uniform_isp {
            return delta_v_km_s(propellant_kg, self.dry_mass_kg, self.specific_impulse_s);
        }

        let total_units: f64 = self.engines.iter().map(|(_, n)| f64::from(*n)).sum();
        let mut remaining = propellant_kg;
        let mut delta_v = 0.0;
        for (unit, count) in &self.engines {
            let share = propellant_kg * f64::from(*count) / total_units;
            let mass_after = self.dry_mass_kg + (remaining - share).max(0.0);
            delta_v += delta_v_km_s(share, mass_after, unit.effective_isp_s());
            remaining -= share;
        }
        delta_v
    }

    /// Delta-V (km/s) available when the full cargo capacity is loaded as propellant.
    pub fn max_delta_v_km_s(&self) -> f64 {
        self.delta_v_from_burning(self.class.cargo_capacity_kg)
    }

    /// Propellant (kg) needed to reach `delta_v_km_s`, or `f64::INFINITY` when that would take
    /// more than the cargo capacity.
    pub fn propellant_for_delta_v(&self, delta_v_km_s: f64) -> f64 {
        if !delta_v_km_s.is_finite() {
            return f64::INFINITY;
        }
        if delta_v_km_s <= 0.0 {
            return 0.0;
        }
        if self.uniform_isp {
            let propellant =
                propellant_mass_for(delta_v_km_s, self.dry_mass_kg, self.specific_impulse_s);
            return if propellant <= self.class.cargo_capacity_kg {
                propellant
            } else {
                f64::INFINITY
            };
        }
        propellant_by_bisection(delta_v_km_s, self.class.cargo_capacity_kg, |kg| {
            self.delta_v_from_burning(kg)
        })
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
