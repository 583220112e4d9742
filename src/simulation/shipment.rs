//! Shipment options and their per-mode ranking.

use haul_transfer::{TransferCost, TransferMode};

/// Profit reported for an option that delivers nothing.
pub const UNPROFITABLE: f64 = -1.0;

/// One way of sending today's cargo to one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentOption {
    pub destination: String,
    pub mode: TransferMode,
    pub price_per_kg: f64,
    pub shipped_kg: f64,
    pub propellant_kg: f64,
    pub delivered_kg: f64,
    pub profit: f64,
    pub delta_v_km_s: f64,
    pub time_of_flight_days: f64,
}

impl ShipmentOption {
    /// Build an option, burning `propellant_kg` of the shipped water on the way.
    ///
    /// An infinite propellant requirement delivers nothing and earns [`UNPROFITABLE`].
    pub fn evaluate(
        destination: impl Into<String>,
        mode: TransferMode,
        price_per_kg: f64,
        shipped_kg: f64,
        propellant_kg: f64,
        cost: TransferCost,
    ) -> Self {
        let delivered_kg = (shipped_kg - propellant_kg).max(0.0);
        let profit = if delivered_kg > 0.0 {
            delivered_kg * price_per_kg
        } else {
            UNPROFITABLE
        };
        Self {
            destination: destination.into(),
            mode,
            price_per_kg,
            shipped_kg,
            propellant_kg,
            delivered_kg,
            profit,
            delta_v_km_s: cost.delta_v_km_s,
            time_of_flight_days: cost.time_of_flight_days,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.profit > 0.0
    }

    pub fn is_reachable(&self) -> bool {
        self.propellant_kg.is_finite()
    }
}

/// Order options for display: Fast by ascending time of flight, the others by descending
/// profit. The sort is stable, so ties keep catalog order.
pub fn rank(options: &mut [ShipmentOption], mode: TransferMode) {
    match mode {
        TransferMode::Fast => {
            options.sort_by(|a, b| a.time_of_flight_days.total_cmp(&b.time_of_flight_days))
        }
        TransferMode::Efficient | TransferMode::Cycler => {
            options.sort_by(|a, b| b.profit.total_cmp(&a.profit))
        }
    }
}
