//! Earth-relative capture for destinations orbiting the Earth.

use haul_core::constants::MU_EARTH_KM3_S2;
use haul_orbits::circular_speed;

/// Largest delta-V (km/s) that aerobraking can remove from a capture.
pub const AEROBRAKING_LIMIT_KM_S: f64 = 7.0;

/// Where in Earth's neighbourhood a shipment must end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTarget {
    /// Low Earth orbit, 6,578 km from Earth's centre.
    LowOrbit,
    /// Earth-Moon Lagrange point, approximated at 60,000 km.
    LagrangePoint,
}

impl CaptureTarget {
    /// Orbital radius of the target (km).
    pub fn radius_km(&self) -> f64 {
        match self {
            CaptureTarget::LowOrbit => 6_578.0,
            CaptureTarget::LagrangePoint => 60_000.0,
        }
    }
}

/// Capture delta-V (km/s) for an arrival with hyperbolic excess `v_infinity_km_s`.
///
/// The cost is the excess speed plus the circular speed at the target radius; aerobraking
/// sheds up to [`AEROBRAKING_LIMIT_KM_S`] of it.
pub fn capture_delta_v(v_infinity_km_s: f64, target: CaptureTarget, aerobraking: bool) -> f64 {
    let capture = v_infinity_km_s + circular_speed(MU_EARTH_KM3_S2, target.radius_km());
    if aerobraking {
        (capture - AEROBRAKING_LIMIT_KM_S).max(0.0)
    } else {
        capture
    }
}
