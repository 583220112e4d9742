//! Tsiolkovsky rocket equation, forward and inverse.
//!
//! Masses are in kilograms, specific impulse in seconds and delta-V in km/s. The inverse never
//! fails: a delta-V that cannot be reached is reported as `f64::INFINITY` propellant.

use haul_core::constants::G0;
use haul_core::units::kms_to_ms;

/// Width of the final bisection bracket (kg).
pub const BISECTION_TOLERANCE_KG: f64 = 1e-4;
/// Iteration cap shared by the bracket search and the bisection proper.
pub const BISECTION_MAX_ITERATIONS: usize = 200;

/// Delta-V (km/s) obtained by burning `propellant_kg` down to `dry_mass_kg`.
pub fn delta_v_km_s(propellant_kg: f64, dry_mass_kg: f64, isp_s: f64) -> f64 {
    if propellant_kg <= 0.0 || dry_mass_kg <= 0.0 {
        return 0.0;
    }
    isp_s * G0 * ((propellant_kg + dry_mass_kg) / dry_mass_kg).ln() / 1000.0
}

/// Propellant (kg) needed to give `dry_mass_kg` a delta-V of `delta_v_km_s`.
pub fn propellant_mass_for(delta_v_km_s: f64, dry_mass_kg: f64, isp_s: f64) -> f64 {
    if delta_v_km_s.is_nan() || isp_s <= 0.0 {
        return f64::INFINITY;
    }
    if delta_v_km_s <= 0.0 {
        return 0.0;
    }
    let exhaust_velocity = isp_s * G0;
    dry_mass_kg * ((kms_to_ms(delta_v_km_s) / exhaust_velocity).exp() - 1.0)
}

/// Invert a monotone `forward` (propellant kg -> delta-V km/s) by bisection.
///
/// `reference_max_kg` is the largest propellant load considered practical: if burning it still
/// falls short of the target, the target is unreachable. Otherwise the upper bound grows by
/// doubling from 1 kg and the bracket is halved until narrower than
/// [`BISECTION_TOLERANCE_KG`]. Exhausting [`BISECTION_MAX_ITERATIONS`] yields `f64::INFINITY`.
pub fn propellant_by_bisection<F>(target_km_s: f64, reference_max_kg: f64, forward: F) -> f64
where
    F: Fn(f64) -> f64,
{
    if !target_km_s.is_finite() {
        return f64::INFINITY;
    }
    if target_km_s <= 0.0 {
        return 0.0;
    }
    let reachable = forward(reference_max_kg);
    if reachable.is_nan() || reachable < target_km_s {
        return f64::INFINITY;
    }

    let mut iterations = 0;
    let mut upper = 1.0_f64;
    while forward(upper) < target_km_s {
        upper *= 2.0;
        iterations += 1;
        if iterations >= BISECTION_MAX_ITERATIONS {
            return f64::INFINITY;
        }
    }

    let mut lower = 0.0_f64;
    while upper - lower > BISECTION_TOLERANCE_KG {
        if iterations >= BISECTION_MAX_ITERATIONS {
            return f64::INFINITY;
        }
        let mid = 0.5 * (lower + upper);
        if forward(mid) < target_km_s {
            lower = mid;
        } else {
            upper = mid;
        }
        iterations += 1;
    }
    0.5 * (lower + upper)
}
