use std::f64::consts::PI;

use asteroid_haul::orbits::{
    OrbitError, OrbitalElements, circular_speed, position, state, state_at_mean_anomaly,
};
use asteroid_haul::vector::{distance, norm};

fn wilson_harrington() -> OrbitalElements {
    OrbitalElements::new(2.6249, 0.63175, 2.7992, 95.441, 266.77, 356.37).expect("valid elements")
}

#[test]
fn perihelion_and_aphelion_radii_match_elements() {
    let elements = wilson_harrington();
    let a = elements.semi_major_axis_au();
    let e = elements.eccentricity();

    let at_perihelion = state_at_mean_anomaly(&elements, 0.0);
    assert!(
        (at_perihelion.distance_au() - a * (1.0 - e)).abs() < 1e-9,
        "r_p = {}",
        at_perihelion.distance_au()
    );

    let at_aphelion = state_at_mean_anomaly(&elements, PI);
    assert!(
        (at_aphelion.distance_au() - a * (1.0 + e)).abs() < 1e-9,
        "r_a = {}",
        at_aphelion.distance_au()
    );
    assert!((elements.perihelion_au() - a * (1.0 - e)).abs() < 1e-12);
    assert!((elements.aphelion_au() - a * (1.0 + e)).abs() < 1e-12);
}

#[test]
fn full_period_returns_to_start() {
    let elements = wilson_harrington();
    let total = 1537.0;
    let start = position(&elements, 0.0, total).unwrap();
    let end = position(&elements, total, total).unwrap();
    assert!(distance(&start, &end) < 0.01, "drift = {}", distance(&start, &end));

    let mars = OrbitalElements::new(1.52, 0.0934, 1.85, 286.502, 49.558, 0.0).unwrap();
    let period = mars.period_days();
    let start = position(&mars, 0.0, period).unwrap();
    let end = position(&mars, period, period).unwrap();
    assert!(distance(&start, &end) < 0.01);
}

#[test]
fn zero_length_orbit_is_rejected() {
    let elements = wilson_harrington();
    assert_eq!(
        position(&elements, 1.0, 0.0),
        Err(OrbitError::InvalidOrbitLength(0.0))
    );
    assert!(state(&elements, 1.0, -10.0).is_err());
    assert!(state(&elements, 1.0, f64::NAN).is_err());
}

#[test]
fn invalid_elements_are_rejected() {
    assert_eq!(
        OrbitalElements::new(1.0, 1.2, 0.0, 0.0, 0.0, 0.0),
        Err(OrbitError::InvalidEccentricity(1.2))
    );
    assert_eq!(
        OrbitalElements::circular(0.0),
        Err(OrbitError::InvalidSemiMajorAxis(0.0))
    );
    assert!(matches!(
        OrbitalElements::new(1.0, 0.1, f64::NAN, 0.0, 0.0, 0.0),
        Err(OrbitError::NonFinite("inclination"))
    ));
}

#[test]
fn circular_orbit_moves_at_circular_speed() {
    let elements = OrbitalElements::circular(1.0).unwrap();
    let s = state(&elements, 100.0, elements.period_days()).unwrap();
    assert!((s.distance_au() - 1.0).abs() < 1e-12);
    let expected = circular_speed(asteroid_haul::constants::MU_SUN_AU3_YR2, 1.0);
    assert!((norm(&s.velocity_au_yr) - expected).abs() < 1e-9);
    assert!((elements.period_days() - 365.25).abs() < 0.01);
}

#[test]
fn inclined_orbit_leaves_the_ecliptic() {
    let elements = OrbitalElements::new(1.0, 0.0, 30.0, 0.0, 0.0, 90.0).unwrap();
    let p = state_at_mean_anomaly(&elements, elements.mean_anomaly_epoch_deg().to_radians());
    assert!((p.position_au[2] - 0.5).abs() < 1e-9, "z = {}", p.position_au[2]);
}
