//! Two-body Keplerian propagation: orbital elements to heliocentric position and velocity.
//!
//! Positions are in AU in the heliocentric ecliptic frame, velocities in AU/yr. The Kepler solver
//! runs a capped Newton-Raphson iteration (tolerance 1e-8, at most 10 steps), which is an accepted
//! approximation for eccentricities not close to 1.

use std::f64::consts::TAU;

use haul_core::constants::{DAYS_PER_YEAR, MU_SUN_AU3_YR2};
use haul_core::vector::{self, Vector3};
use thiserror::Error;

const KEPLER_TOLERANCE: f64 = 1e-8;
const KEPLER_MAX_ITERATIONS: usize = 10;

/// Errors raised when building elements or propagating them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitError {
    #[error("orbit length must be a positive number of days, got {0}")]
    InvalidOrbitLength(f64),
    #[error("semi-major axis must be positive, got {0} AU")]
    InvalidSemiMajorAxis(f64),
    #[error("eccentricity must lie in [0, 1), got {0}")]
    InvalidEccentricity(f64),
    #[error("orbital element '{0}' is not finite")]
    NonFinite(&'static str),
}

/// Classical orbital elements of a heliocentric body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    semi_major_axis_au: f64,
    eccentricity: f64,
    inclination_deg: f64,
    argument_of_perihelion_deg: f64,
    ascending_node_deg: f64,
    mean_anomaly_epoch_deg: f64,
}

impl OrbitalElements {
    /// Validate and build a set of elements. Angles are in degrees.
    pub fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination_deg: f64,
        argument_of_perihelion_deg: f64,
        ascending_node_deg: f64,
        mean_anomaly_epoch_deg: f64,
    ) -> Result<Self, OrbitError> {
        for (name, value) in [
            ("semi_major_axis", semi_major_axis_au),
            ("eccentricity", eccentricity),
            ("inclination", inclination_deg),
            ("argument_of_perihelion", argument_of_perihelion_deg),
            ("ascending_node", ascending_node_deg),
            ("mean_anomaly_epoch", mean_anomaly_epoch_deg),
        ] {
            if !value.is_finite() {
                return Err(OrbitError::NonFinite(name));
            }
        }
        if semi_major_axis_au <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis(semi_major_axis_au));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::InvalidEccentricity(eccentricity));
        }
        Ok(Self {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
            argument_of_perihelion_deg,
            ascending_node_deg,
            mean_anomaly_epoch_deg,
        })
    }

    /// Circular, ecliptic orbit of radius `semi_major_axis_au` starting on the +x axis.
    pub fn circular(semi_major_axis_au: f64) -> Result<Self, OrbitError> {
        Self::new(semi_major_axis_au, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn semi_major_axis_au(&self) -> f64 {
        self.semi_major_axis_au
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    pub fn argument_of_perihelion_deg(&self) -> f64 {
        self.argument_of_perihelion_deg
    }

    pub fn ascending_node_deg(&self) -> f64 {
        self.ascending_node_deg
    }

    pub fn mean_anomaly_epoch_deg(&self) -> f64 {
        self.mean_anomaly_epoch_deg
    }

    /// Closest approach to the Sun (AU).
    pub fn perihelion_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the Sun (AU).
    pub fn aphelion_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 + self.eccentricity)
    }

    /// Sidereal period from Kepler's third law (days).
    pub fn period_days(&self) -> f64 {
        TAU * (self.semi_major_axis_au.powi(3) / MU_SUN_AU3_YR2).sqrt() * DAYS_PER_YEAR
    }
}

/// Heliocentric position (AU) and velocity (AU/yr).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_au: Vector3,
    pub velocity_au_yr: Vector3,
}

impl StateVector {
    /// Distance from the Sun (AU).
    pub fn distance_au(&self) -> f64 {
        vector::norm(&self.position_au)
    }
}

/// Solve Kepler's equation `E - e sin E = M` for the eccentric anomaly (radians).
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut eccentric_anomaly = mean_anomaly;
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly)
            / (1.0 - eccentricity * eccentric_anomaly.cos());
        eccentric_anomaly -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    eccentric_anomaly
}

/// True anomaly (radians) for an eccentric anomaly.
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    ((1.0 - eccentricity * eccentricity).sqrt() * sin_e).atan2(cos_e - eccentricity)
}

/// Mean anomaly (radians) reached after `day_in_orbit` days of an orbit lasting
/// `total_days_in_orbit` days.
pub fn mean_anomaly(
    elements: &OrbitalElements,
    day_in_orbit: f64,
    total_days_in_orbit: f64,
) -> Result<f64, OrbitError> {
    if !total_days_in_orbit.is_finite() || total_days_in_orbit <= 0.0 {
        return Err(OrbitError::InvalidOrbitLength(total_days_in_orbit));
    }
    let mean_motion = TAU / total_days_in_orbit;
    Ok(elements.mean_anomaly_epoch_deg.to_radians() + mean_motion * day_in_orbit)
}

/// State vector at an explicit mean anomaly (radians).
pub fn state_at_mean_anomaly(elements: &OrbitalElements, mean_anomaly: f64) -> StateVector {
    let e = elements.eccentricity;
    let a = elements.semi_major_axis_au;

    let nu = true_anomaly(solve_kepler(mean_anomaly, e), e);
    let (sin_nu, cos_nu) = nu.sin_cos();
    let p = a * (1.0 - e * e);
    let radius = p / (1.0 + e * cos_nu);

    let planar_position = [radius * cos_nu, radius * sin_nu];

    // Radial and transverse speeds from vis-viva, expressed in the perifocal frame.
    let h_factor = (MU_SUN_AU3_YR2 / p).sqrt();
    let radial = h_factor * e * sin_nu;
    let transverse = h_factor * (1.0 + e * cos_nu);
    let planar_velocity = [
        radial * cos_nu - transverse * sin_nu,
        radial * sin_nu + transverse * cos_nu,
    ];

    let rotation = perifocal_rotation(elements);
    StateVector {
        position_au: rotate(&rotation, planar_position),
        velocity_au_yr: rotate(&rotation, planar_velocity),
    }
}

/// Full state of the body on `day_in_orbit` for an orbit lasting `total_days_in_orbit` days.
pub fn state(
    elements: &OrbitalElements,
    day_in_orbit: f64,
    total_days_in_orbit: f64,
) -> Result<StateVector, OrbitError> {
    let m = mean_anomaly(elements, day_in_orbit, total_days_in_orbit)?;
    Ok(state_at_mean_anomaly(elements, m))
}

/// Heliocentric position (AU) on `day_in_orbit`.
pub fn position(
    elements: &OrbitalElements,
    day_in_orbit: f64,
    total_days_in_orbit: f64,
) -> Result<Vector3, OrbitError> {
    state(elements, day_in_orbit, total_days_in_orbit).map(|s| s.position_au)
}

/// Circular orbital speed at radius `r` for gravitational parameter `mu`.
#[inline]
pub fn circular_speed(mu: f64, r: f64) -> f64 {
    (mu / r).sqrt()
}

/// Vis-viva speed at radius `r` on an orbit of semi-major axis `a`.
#[inline]
pub fn vis_viva_speed(mu: f64, r: f64, a: f64) -> f64 {
    (mu * (2.0 / r - 1.0 / a)).sqrt()
}

/// Columns of the perifocal-to-ecliptic rotation: argument of perihelion, inclination, node.
fn perifocal_rotation(elements: &OrbitalElements) -> [[f64; 3]; 2] {
    let (sin_w, cos_w) = elements.argument_of_perihelion_deg.to_radians().sin_cos();
    let (sin_i, cos_i) = elements.inclination_deg.to_radians().sin_cos();
    let (sin_o, cos_o) = elements.ascending_node_deg.to_radians().sin_cos();

    [
        [
            cos_w * cos_o - sin_w * cos_i * sin_o,
            cos_w * sin_o + sin_w * cos_i * cos_o,
            sin_w * sin_i,
        ],
        [
            -(sin_w * cos_o + cos_w * cos_i * sin_o),
            cos_w * cos_i * cos_o - sin_w * sin_o,
            cos_w * sin_i,
        ],
    ]
}

fn rotate(rotation: &[[f64; 3]; 2], planar: [f64; 2]) -> Vector3 {
    let [p, q] = rotation;
    [
        planar[0] * p[0] + planar[1] * q[0],
        planar[0] * p[1] + planar[1] * q[1],
        planar[0] * p[2] + planar[1] * q[2],
    ]
}
