//! Analytic estimators for impulsive transfers in the coplanar, circular limit.
//!
//! Results are expressed in whatever units the gravitational parameter implies: with
//! `mu` in AU³/yr² speeds come back in AU/yr and times in years.

use std::f64::consts::PI;

use haul_orbits::{circular_speed, vis_viva_speed};

/// Result for a Hohmann transfer between circular, coplanar orbits of radii r1 and r2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannResult {
    pub departure_speed: f64, // circular speed at r1
    pub arrival_speed: f64,   // circular speed at r2
    pub dv1: f64,             // signed: negative for inward (retro) burn
    pub dv2: f64,             // signed: negative for retro capture when arriving inward
    pub dv_total: f64,        // |dv1| + |dv2|
    pub semi_major_axis: f64,
    pub time_of_flight: f64,
}

/// Compute the classical Hohmann transfer between two circular coplanar orbits.
///
/// Returns `None` when either radius or `mu` is not a positive finite number.
pub fn hohmann(r1: f64, r2: f64, mu: f64) -> Option<HohmannResult> {
    if ![r1, r2, mu].iter().all(|v| v.is_finite() && *v > 0.0) {
        return None;
    }

    let v1 = circular_speed(mu, r1);
    let v2 = circular_speed(mu, r2);
    let a_t = 0.5 * (r1 + r2);
    let tof = PI * (a_t.powi(3) / mu).sqrt();

    // Transfer periapsis speed (at r1) and apoapsis speed (at r2)
    let v_t1 = vis_viva_speed(mu, r1, a_t);
    let v_t2 = vis_viva_speed(mu, r2, a_t);

    let dv1 = v_t1 - v1;
    let dv2 = v2 - v_t2;

    Some(HohmannResult {
        departure_speed: v1,
        arrival_speed: v2,
        dv1,
        dv2,
        dv_total: dv1.abs() + dv2.abs(),
        semi_major_axis: a_t,
        time_of_flight: tof,
    })
}
