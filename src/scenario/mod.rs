//! Scenario assembly: resolve configuration records into a runnable simulation.
//!
//! A catalog root holds `destinations/` (TOML per destination, or a YAML list at
//! `destinations.yaml`), `components.yaml` and `vehicles/`.

use std::path::{Path, PathBuf};

use haul_config::{
    CaptureConfig, ComponentsConfig, ConfigError, DestinationConfig, OrbitConfig, PriceConfig,
    SimulationConfig, VehicleConfig, load_components, load_destinations, load_simulation,
    load_vehicle_configs,
};
use haul_orbits::{OrbitError, OrbitalElements};
use haul_propulsion::{Hauler, HaulerClass, PowerSource, PropulsionUnit, VehicleError};
use haul_transfer::{CaptureTarget, TransferError, TransferModel};
use thiserror::Error;

use crate::simulation::{
    AsteroidState, Destination, PriceCurve, SimulationContext, SimulationError, SimulationState,
};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid orbit for '{name}': {source}")]
    Orbit { name: String, source: OrbitError },
    #[error(transparent)]
    Vehicle(#[from] VehicleError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("vehicle '{0}' not found in catalog")]
    UnknownVehicle(String),
    #[error("vehicle '{vehicle}' uses unknown hauler class '{class}'")]
    UnknownClass { vehicle: String, class: String },
    #[error("vehicle '{vehicle}' uses unknown component '{component}'")]
    UnknownComponent { vehicle: String, component: String },
}

/// Everything needed to start a run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub context: SimulationContext,
    pub state: SimulationState,
    /// Length of the asteroid's cycle in days.
    pub cycle_days: f64,
    pub seed: Option<u64>,
    pub days: Option<u32>,
}

impl Scenario {
    /// Days to simulate: the configured count, or one full cycle.
    pub fn run_length(&self) -> u32 {
        self.days
            .unwrap_or_else(|| self.cycle_days.ceil().max(0.0) as u32)
    }
}

/// Load the settings file and the catalog under `catalog_root`.
pub fn load_scenario<P, Q>(simulation_path: P, catalog_root: Q) -> Result<Scenario, ScenarioError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let settings = load_simulation(simulation_path)?;
    build_scenario(&settings, catalog_root)
}

/// Assemble a scenario from already-loaded settings.
pub fn build_scenario<Q: AsRef<Path>>(
    settings: &SimulationConfig,
    catalog_root: Q,
) -> Result<Scenario, ScenarioError> {
    let root = catalog_root.as_ref();

    let destinations = load_destinations(destinations_path(root))?
        .iter()
        .map(Destination::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let components = load_components(root.join("components.yaml"))?;
    let vehicles = load_vehicle_configs(root.join("vehicles"))?;
    let hauler = select_hauler(&vehicles, &components, &settings.vehicle)?;

    let transfer = TransferModel::new(settings.difficulty_scale, settings.aerobraking)?;
    let context = SimulationContext::new(destinations, hauler, transfer)?;

    let asteroid_cfg = &settings.asteroid;
    let asteroid = AsteroidState::new(
        asteroid_cfg.name.clone(),
        elements_from(&asteroid_cfg.name, &asteroid_cfg.orbit)?,
        asteroid_cfg.cycle_days,
        asteroid_cfg.daily_mined_kg,
        asteroid_cfg.initial_stock_kg,
    )?;

    Ok(Scenario {
        context,
        state: SimulationState::new(asteroid),
        cycle_days: asteroid_cfg.cycle_days,
        seed: settings.seed,
        days: settings.days,
    })
}

/// Build the named vehicle from its build sheet and the component tables.
pub fn select_hauler(
    vehicles: &[VehicleConfig],
    components: &ComponentsConfig,
    name: &str,
) -> Result<Hauler, ScenarioError> {
    let sheet = vehicles
        .iter()
        .find(|v| v.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ScenarioError::UnknownVehicle(name.to_string()))?;
    hauler_from_config(sheet, components)
}

/// Resolve component names in a build sheet and validate the resulting hauler.
pub fn hauler_from_config(
    sheet: &VehicleConfig,
    components: &ComponentsConfig,
) -> Result<Hauler, ScenarioError> {
    let class = components
        .hauler_classes
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(&sheet.class))
        .map(|c| HaulerClass {
            name: c.name.clone(),
            dry_mass_kg: c.dry_mass_kg,
            cargo_capacity_kg: c.cargo_capacity_kg,
        })
        .ok_or_else(|| ScenarioError::UnknownClass {
            vehicle: sheet.name.clone(),
            class: sheet.class.clone(),
        })?;

    let unknown = |component: &str| ScenarioError::UnknownComponent {
        vehicle: sheet.name.clone(),
        component: component.to_string(),
    };

    let mut engines = Vec::with_capacity(sheet.engines.len());
    for (component, count) in &sheet.engines {
        let unit = components
            .propulsion_units
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(component))
            .ok_or_else(|| unknown(component))?;
        engines.push((
            PropulsionUnit {
                name: unit.name.clone(),
                isp_s: unit.isp_s,
                efficiency: unit.efficiency,
                mass_kg: unit.mass_kg,
                power_kw: unit.power_kw,
                max_per_vehicle: unit.max_per_vehicle,
            },
            *count,
        ));
    }

    let mut power = Vec::with_capacity(sheet.power.len());
    for (component, count) in &sheet.power {
        let source = components
            .power_sources
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(component))
            .ok_or_else(|| unknown(component))?;
        power.push((
            PowerSource {
                name: source.name.clone(),
                mass_kg: source.mass_kg,
                power_kw: source.power_kw,
            },
            *count,
        ));
    }

    Ok(Hauler::new(sheet.name.clone(), class, engines, power)?)
}

impl From<&PriceConfig> for PriceCurve {
    fn from(value: &PriceConfig) -> Self {
        match *value {
            PriceConfig::Flat { base, spread } => PriceCurve::Flat { base, spread },
            PriceConfig::Perihelion {
                base,
                weight,
                spread,
            } => PriceCurve::Perihelion {
                base,
                weight,
                spread,
            },
            PriceConfig::Aphelion {
                base,
                weight,
                spread,
            } => PriceCurve::Aphelion {
                base,
                weight,
                spread,
            },
        }
    }
}

impl TryFrom<&DestinationConfig> for Destination {
    type Error = ScenarioError;

    fn try_from(value: &DestinationConfig) -> Result<Self, Self::Error> {
        let capture = value.capture.map(|c| match c {
            CaptureConfig::LowOrbit => CaptureTarget::LowOrbit,
            CaptureConfig::LagrangePoint => CaptureTarget::LagrangePoint,
        });
        Ok(Destination::new(
            value.name.clone(),
            elements_from(&value.name, &value.orbit)?,
            capture,
            PriceCurve::from(&value.price),
            value.cycler_establishment_delta_v_km_s,
        )?)
    }
}

fn elements_from(name: &str, orbit: &OrbitConfig) -> Result<OrbitalElements, ScenarioError> {
    OrbitalElements::new(
        orbit.semi_major_axis_au,
        orbit.eccentricity,
        orbit.inclination_deg,
        orbit.argument_of_perihelion_deg,
        orbit.ascending_node_deg,
        orbit.mean_anomaly_deg,
    )
    .map_err(|source| ScenarioError::Orbit {
        name: name.to_string(),
        source,
    })
}

fn destinations_path(root: &Path) -> PathBuf {
    let yaml = root.join("destinations.yaml");
    if yaml.is_file() {
        yaml
    } else {
        root.join("destinations")
    }
}
