//! Per-mode delta-V and time-of-flight between two heliocentric positions.
//!
//! Heliocentric arithmetic runs in AU and AU/yr with the Sun's parameter from `haul_core`;
//! results are reported in km/s and days.

use haul_core::constants::MU_SUN_AU3_YR2;
use haul_core::time::years_to_days;
use haul_core::units::au_per_year_to_km_s;
use haul_core::vector::{self, Vector3};
use haul_impulsive::hohmann;
use thiserror::Error;

use crate::capture::{CaptureTarget, capture_delta_v};
use crate::mode::TransferMode;

/// Slack applied to the idealised Efficient delta-V.
pub const DEFAULT_DIFFICULTY_SCALE: f64 = 0.3;
pub const FAST_DELTA_V_FACTOR: f64 = 1.5;
pub const FAST_TIME_FACTOR: f64 = 0.7;
/// Surcharge on the capture term for the steeper Fast entry.
pub const FAST_CAPTURE_SURCHARGE: f64 = 1.2;
pub const CYCLER_DELTA_V_FACTOR: f64 = 0.3;
pub const CYCLER_TIME_FACTOR: f64 = 0.8;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransferError {
    #[error("difficulty scale must be a positive finite number, got {0}")]
    InvalidDifficulty(f64),
}

/// Delta-V and duration of one transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferCost {
    pub delta_v_km_s: f64,
    pub time_of_flight_days: f64,
}

impl TransferCost {
    fn unreachable() -> Self {
        Self {
            delta_v_km_s: f64::INFINITY,
            time_of_flight_days: f64::INFINITY,
        }
    }
}

/// Costs for every mode between the same pair of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferCosts {
    pub efficient: TransferCost,
    pub fast: TransferCost,
    pub cycler: TransferCost,
}

impl TransferCosts {
    pub fn get(&self, mode: TransferMode) -> TransferCost {
        match mode {
            TransferMode::Efficient => self.efficient,
            TransferMode::Fast => self.fast,
            TransferMode::Cycler => self.cycler,
        }
    }
}

/// Transfer cost model parameterised by difficulty scale and aerobraking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferModel {
    difficulty_scale: f64,
    aerobraking: bool,
}

impl Default for TransferModel {
    fn default() -> Self {
        Self {
            difficulty_scale: DEFAULT_DIFFICULTY_SCALE,
            aerobraking: true,
        }
    }
}

impl TransferModel {
    pub fn new(difficulty_scale: f64, aerobraking: bool) -> Result<Self, TransferError> {
        if !difficulty_scale.is_finite() || difficulty_scale <= 0.0 {
            return Err(TransferError::InvalidDifficulty(difficulty_scale));
        }
        Ok(Self {
            difficulty_scale,
            aerobraking,
        })
    }

    pub fn difficulty_scale(&self) -> f64 {
        self.difficulty_scale
    }

    pub fn aerobraking(&self) -> bool {
        self.aerobraking
    }

    /// Efficient heliocentric transfer, without any planetary capture.
    ///
    /// Hohmann between the two radii plus a plane-change penalty of `v1·sin(θ/4)`, where θ is
    /// the angle between the position vectors, scaled by the difficulty factor.
    pub fn heliocentric(&self, from: &Vector3, to: &Vector3) -> TransferCost {
        let r1 = vector::norm(from);
        let r2 = vector::norm(to);
        let Some(transfer) = hohmann(r1, r2, MU_SUN_AU3_YR2) else {
            return TransferCost::unreachable();
        };

        let theta = vector::angle_between(from, to);
        let plane_change = transfer.departure_speed * (theta / 4.0).sin();
        let delta_v_au_yr = (transfer.dv_total + plane_change) * self.difficulty_scale;

        TransferCost {
            delta_v_km_s: au_per_year_to_km_s(delta_v_au_yr),
            time_of_flight_days: years_to_days(transfer.time_of_flight),
        }
    }

    /// Cost of shipping from `from` to `to` in `mode`, capturing at `capture` if given.
    pub fn costs(
        &self,
        from: &Vector3,
        to: &Vector3,
        mode: TransferMode,
        capture: Option<CaptureTarget>,
    ) -> TransferCost {
        self.all_modes(from, to, capture).get(mode)
    }

    /// Costs of all three modes, sharing one heliocentric solution.
    pub fn all_modes(
        &self,
        from: &Vector3,
        to: &Vector3,
        capture: Option<CaptureTarget>,
    ) -> TransferCosts {
        let base = self.heliocentric(from, to);
        let capture_dv = capture
            .map(|target| capture_delta_v(base.delta_v_km_s, target, self.aerobraking))
            .unwrap_or(0.0);

        TransferCosts {
            efficient: TransferCost {
                delta_v_km_s: base.delta_v_km_s + capture_dv,
                time_of_flight_days: base.time_of_flight_days,
            },
            fast: TransferCost {
                delta_v_km_s: base.delta_v_km_s * FAST_DELTA_V_FACTOR
                    + capture_dv * FAST_CAPTURE_SURCHARGE,
                time_of_flight_days: base.time_of_flight_days * FAST_TIME_FACTOR,
            },
            cycler: TransferCost {
                delta_v_km_s: base.delta_v_km_s * CYCLER_DELTA_V_FACTOR,
                time_of_flight_days: base.time_of_flight_days * CYCLER_TIME_FACTOR,
            },
        }
    }
}
