//! Daily simulation engine.
//!
//! Each tick propagates the asteroid and every destination, quotes a price, prices the three
//! transfer modes, asks the hauler how much of the cargo it burns on the way, ranks the resulting
//! options and then either ships or stockpiles the day's water.

pub mod asteroid;
pub mod destination;
pub mod price;
pub mod shipment;

use haul_core::vector::Vector3;
use haul_orbits::OrbitError;
use haul_propulsion::Hauler;
use haul_transfer::{TransferMode, TransferModel};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use asteroid::AsteroidState;
pub use destination::{Destination, DestinationSnapshot};
pub use price::{PriceCurve, perihelion_weight};
pub use shipment::{ShipmentOption, UNPROFITABLE, rank};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("orbit propagation failed: {0}")]
    Orbit(#[from] OrbitError),
    #[error("destination '{name}' is invalid: {reason}")]
    InvalidDestination { name: String, reason: &'static str },
    #[error("{what} must be a non-negative number, got {value}")]
    InvalidQuantity { what: &'static str, value: f64 },
    #[error("simulation needs at least one destination")]
    NoDestinations,
}

/// Everything that stays fixed for a run.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    destinations: Vec<Destination>,
    hauler: Hauler,
    transfer: TransferModel,
}

impl SimulationContext {
    pub fn new(
        destinations: Vec<Destination>,
        hauler: Hauler,
        transfer: TransferModel,
    ) -> Result<Self, SimulationError> {
        if destinations.is_empty() {
            return Err(SimulationError::NoDestinations);
        }
        Ok(Self {
            destinations,
            hauler,
            transfer,
        })
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn hauler(&self) -> &Hauler {
        &self.hauler
    }

    pub fn transfer(&self) -> &TransferModel {
        &self.transfer
    }
}

/// Mutable part of a run, replaced wholesale on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub asteroid: AsteroidState,
}

impl SimulationState {
    pub fn new(asteroid: AsteroidState) -> Self {
        Self { asteroid }
    }
}

/// What happened to the stockpile at the end of a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InventoryDecision {
    /// Some Efficient or Fast option was profitable; the shippable mass left the stockpile.
    Shipped { shipped_kg: f64 },
    /// Nothing was profitable; the day's production was added to the stockpile.
    Stockpiled { added_kg: f64 },
}

impl InventoryDecision {
    pub fn label(&self) -> &'static str {
        match self {
            InventoryDecision::Shipped { .. } => "shipped",
            InventoryDecision::Stockpiled { .. } => "stockpiled",
        }
    }
}

/// Outcome of one simulated day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub day: u32,
    pub asteroid_position_au: Vector3,
    pub perihelion_weight: f64,
    pub available_kg: f64,
    pub shippable_kg: f64,
    /// Catalog order.
    pub snapshots: Vec<DestinationSnapshot>,
    pub efficient: Vec<ShipmentOption>,
    pub fast: Vec<ShipmentOption>,
    pub cycler: Vec<ShipmentOption>,
    pub decision: InventoryDecision,
    pub stored_after_kg: f64,
}

impl DayReport {
    /// Ranked options of one mode.
    pub fn options(&self, mode: TransferMode) -> &[ShipmentOption] {
        match mode {
            TransferMode::Efficient => &self.efficient,
            TransferMode::Fast => &self.fast,
            TransferMode::Cycler => &self.cycler,
        }
    }
}

/// Run one day. `total_days` is the length of the asteroid's cycle in days.
///
/// Draws exactly one random number per destination, in catalog order.
pub fn advance_day<R>(
    context: &SimulationContext,
    state: &SimulationState,
    day: u32,
    total_days: f64,
    rng: &mut R,
) -> Result<(SimulationState, DayReport), SimulationError>
where
    R: Rng + ?Sized,
{
    let day_f = f64::from(day);
    let asteroid = state.asteroid.at_day(day_f, total_days)?;
    let origin = asteroid.state().position_au;
    let weight = perihelion_weight(day_f, total_days);

    let hauler = context.hauler();
    let available_kg = asteroid.stored_kg() + asteroid.daily_mined_kg();
    let shippable_kg = available_kg.min(hauler.cargo_capacity_kg());

    let count = context.destinations.len();
    let mut snapshots = Vec::with_capacity(count);
    let mut efficient = Vec::with_capacity(count);
    let mut fast = Vec::with_capacity(count);
    let mut cycler = Vec::with_capacity(count);

    for destination in &context.destinations {
        let draw: f64 = rng.gen_range(0.0..1.0);
        let price_per_kg = destination.price_curve().price(weight, draw);
        let position_au = destination.position_au(day_f)?;
        let costs = context
            .transfer
            .all_modes(&origin, &position_au, destination.capture());

        debug!(
            day,
            destination = destination.name(),
            price_per_kg,
            efficient_dv = costs.efficient.delta_v_km_s,
            fast_dv = costs.fast.delta_v_km_s,
            cycler_dv = costs.cycler.delta_v_km_s,
            "destination refreshed"
        );

        for mode in TransferMode::ALL {
            let cost = costs.get(mode);
            let option = ShipmentOption::evaluate(
                destination.name(),
                mode,
                price_per_kg,
                shippable_kg,
                hauler.propellant_for_delta_v(cost.delta_v_km_s),
                cost,
            );
            match mode {
                TransferMode::Efficient => efficient.push(option),
                TransferMode::Fast => fast.push(option),
                TransferMode::Cycler => cycler.push(option),
            }
        }

        let unreachable = [&efficient, &fast, &cycler]
            .iter()
            .all(|options| options.last().is_some_and(|o| !o.is_reachable()));
        if unreachable {
            warn!(
                day,
                destination = destination.name(),
                "destination unreachable in every mode"
            );
        }

        snapshots.push(DestinationSnapshot {
            name: destination.name().to_string(),
            price_per_kg,
            position_au,
            costs,
        });
    }

    rank(&mut efficient, TransferMode::Efficient);
    rank(&mut fast, TransferMode::Fast);
    rank(&mut cycler, TransferMode::Cycler);

    let any_profitable = efficient
        .iter()
        .chain(fast.iter())
        .any(ShipmentOption::is_profitable);
    let (decision, stored_after_kg) = if any_profitable {
        (
            InventoryDecision::Shipped {
                shipped_kg: shippable_kg,
            },
            (asteroid.stored_kg() - shippable_kg).max(0.0),
        )
    } else {
        (
            InventoryDecision::Stockpiled {
                added_kg: asteroid.daily_mined_kg(),
            },
            asteroid.stored_kg() + asteroid.daily_mined_kg(),
        )
    };

    info!(
        day,
        decision = decision.label(),
        shippable_kg,
        stored_kg = stored_after_kg,
        best_efficient = efficient.first().map(|o| o.destination.as_str()),
        "day complete"
    );

    let asteroid_position_au = asteroid.state().position_au;
    let next = SimulationState {
        asteroid: asteroid.with_stored(stored_after_kg),
    };
    let report = DayReport {
        day,
        asteroid_position_au,
        perihelion_weight: weight,
        available_kg,
        shippable_kg,
        snapshots,
        efficient,
        fast,
        cycler,
        decision,
        stored_after_kg,
    };
    Ok((next, report))
}

/// One-time cost of setting up a cycler route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstablishmentCost {
    pub delta_v_km_s: f64,
    /// `f64::INFINITY` when the hauler cannot reach the delta-V within its cargo capacity.
    pub propellant_kg: f64,
}

/// Cycler establishment cost for `destination` flown by `hauler`, if a cycler route exists.
pub fn establishment_cost(destination: &Destination, hauler: &Hauler) -> Option<EstablishmentCost> {
    destination
        .cycler_establishment_delta_v_km_s()
        .map(|delta_v_km_s| EstablishmentCost {
            delta_v_km_s,
            propellant_kg: hauler.propellant_for_delta_v(delta_v_km_s),
        })
}

/// Iterator over days `1..=last_day`, threading state from one day to the next.
pub struct Simulation<R> {
    context: SimulationContext,
    state: SimulationState,
    day: u32,
    total_days: f64,
    last_day: u32,
    rng: R,
    failed: bool,
}

impl<R: Rng> Simulation<R> {
    /// Simulate `last_day` days of a cycle lasting `total_days`.
    pub fn new(
        context: SimulationContext,
        state: SimulationState,
        total_days: f64,
        last_day: u32,
        rng: R,
    ) -> Self {
        Self {
            context,
            state,
            day: 0,
            total_days,
            last_day,
            rng,
            failed: false,
        }
    }

    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Last day processed, 0 before the first tick.
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_finished(&self) -> bool {
        self.failed || self.day >= self.last_day
    }
}

impl<R: Rng> Iterator for Simulation<R> {
    type Item = Result<DayReport, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }
        let day = self.day + 1;
        match advance_day(
            &self.context,
            &self.state,
            day,
            self.total_days,
            &mut self.rng,
        ) {
            Ok((state, report)) => {
                self.state = state;
                self.day = day;
                Some(Ok(report))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
