//! Configuration models and loaders for the asteroid haul workspace.
//!
//! Catalogs are either a directory of TOML records (one per file, loaded in file-name order) or
//! a single YAML list. Settings documents are a single TOML or YAML file.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Keplerian elements as written in catalogs. Angles are in degrees.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OrbitConfig {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub argument_of_perihelion_deg: f64,
    #[serde(default)]
    pub ascending_node_deg: f64,
    #[serde(default)]
    pub mean_anomaly_deg: f64,
}

/// Earth-relative capture requirement of a destination.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaptureConfig {
    LowOrbit,
    LagrangePoint,
}

/// Price curve of a destination, in currency units per kg.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum PriceConfig {
    /// `base + draw·spread`
    #[serde(rename = "flat")]
    Flat { base: f64, spread: f64 },
    /// `base + w·weight + draw·spread`, dearer while the asteroid is near perihelion.
    #[serde(rename = "perihelion")]
    Perihelion { base: f64, weight: f64, spread: f64 },
    /// `base + (1 − w)·weight + draw·spread`, dearer as the asteroid recedes.
    #[serde(rename = "aphelion")]
    Aphelion { base: f64, weight: f64, spread: f64 },
}

/// Destination catalog entry.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DestinationConfig {
    pub name: String,
    pub orbit: OrbitConfig,
    #[serde(default)]
    pub capture: Option<CaptureConfig>,
    pub price: PriceConfig,
    #[serde(default)]
    pub cycler_establishment_delta_v_km_s: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HaulerClassConfig {
    pub name: String,
    pub dry_mass_kg: f64,
    pub cargo_capacity_kg: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PropulsionUnitConfig {
    pub name: String,
    pub isp_s: f64,
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
    pub mass_kg: f64,
    pub power_kw: f64,
    pub max_per_vehicle: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PowerSourceConfig {
    pub name: String,
    pub mass_kg: f64,
    pub power_kw: f64,
}

/// Component tables that vehicles are assembled from.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ComponentsConfig {
    pub hauler_classes: Vec<HaulerClassConfig>,
    pub propulsion_units: Vec<PropulsionUnitConfig>,
    #[serde(default)]
    pub power_sources: Vec<PowerSourceConfig>,
}

/// Vehicle build sheet: a class plus component counts keyed by component name.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VehicleConfig {
    pub name: String,
    pub class: String,
    #[serde(default)]
    pub engines: BTreeMap<String, u32>,
    #[serde(default)]
    pub power: BTreeMap<String, u32>,
}

/// Mining asteroid and its production cycle.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AsteroidConfig {
    pub name: String,
    pub orbit: OrbitConfig,
    pub cycle_days: f64,
    pub daily_mined_kg: f64,
    #[serde(default)]
    pub initial_stock_kg: f64,
}

/// Run settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationConfig {
    pub asteroid: AsteroidConfig,
    pub vehicle: String,
    #[serde(default = "default_difficulty_scale")]
    pub difficulty_scale: f64,
    #[serde(default = "default_aerobraking")]
    pub aerobraking: bool,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub days: Option<u32>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no records found in {0}")]
    Empty(PathBuf),
}

/// Load the destination catalog. Catalog order is file-name order (or list order for YAML).
pub fn load_destinations<P: AsRef<Path>>(path: P) -> Result<Vec<DestinationConfig>, ConfigError> {
    let path = path.as_ref();
    let destinations: Vec<DestinationConfig> = load_records(path)?;
    if destinations.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    Ok(destinations)
}

/// Load hauler classes, propulsion units and power sources.
pub fn load_components<P: AsRef<Path>>(path: P) -> Result<ComponentsConfig, ConfigError> {
    load_document(path)
}

/// Load vehicle build sheets.
pub fn load_vehicle_configs<P: AsRef<Path>>(path: P) -> Result<Vec<VehicleConfig>, ConfigError> {
    load_records(path)
}

/// Load the simulation settings.
pub fn load_simulation<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, ConfigError> {
    load_document(path)
}

fn default_efficiency() -> f64 {
    1.0
}

fn default_difficulty_scale() -> f64 {
    0.3
}

fn default_aerobraking() -> bool {
    true
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn load_document<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();

    let mut records = Vec::with_capacity(entries.len());
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        records.push(toml::from_str(&contents)?);
    }
    Ok(records)
}
