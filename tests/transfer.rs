use asteroid_haul::constants::MU_EARTH_KM3_S2;
use asteroid_haul::transfer::{
    CYCLER_DELTA_V_FACTOR, CaptureTarget, TransferError, TransferMode, TransferModel,
    capture_delta_v,
};

fn model() -> TransferModel {
    TransferModel::default()
}

#[test]
fn coincident_positions_cost_nothing() {
    let p = [1.2, -0.4, 0.05];
    let cost = model().costs(&p, &p, TransferMode::Efficient, None);
    assert!(cost.delta_v_km_s.abs() < 1e-9, "dv = {}", cost.delta_v_km_s);
    assert!(cost.time_of_flight_days > 0.0);
}

#[test]
fn nearly_coincident_positions_still_rank_fast_above_efficient() {
    let costs = model().all_modes(&[1.0, 0.0, 0.0], &[1.0, 1e-9, 0.0], None);
    assert!(costs.efficient.delta_v_km_s > 0.0);
    assert!(
        costs.fast.delta_v_km_s > costs.efficient.delta_v_km_s,
        "fast {} <= efficient {}",
        costs.fast.delta_v_km_s,
        costs.efficient.delta_v_km_s
    );
}

#[test]
fn fast_costs_more_and_arrives_sooner() {
    let pairs = [
        ([2.6, 0.0, 0.0], [-1.0, 0.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.9877, 0.1, 0.02], [1.52, -0.3, 0.0]),
        ([3.0, 1.0, 0.2], [0.39, 0.0, -0.01]),
    ];
    for (from, to) in pairs {
        for capture in [None, Some(CaptureTarget::LowOrbit), Some(CaptureTarget::LagrangePoint)] {
            let costs = model().all_modes(&from, &to, capture);
            assert!(
                costs.fast.delta_v_km_s > costs.efficient.delta_v_km_s,
                "fast {} <= efficient {}",
                costs.fast.delta_v_km_s,
                costs.efficient.delta_v_km_s
            );
            assert!(costs.fast.time_of_flight_days < costs.efficient.time_of_flight_days);
            assert!(costs.cycler.delta_v_km_s < costs.efficient.delta_v_km_s);
        }
    }
}

#[test]
fn plane_change_penalty_applies_at_equal_radii() {
    let costs = model().all_modes(&[1.0, 0.0, 0.0], &[-1.0, 0.0, 0.0], None);
    // Hohmann part vanishes, leaving v1·sin(π/4) scaled by difficulty.
    let v1_km_s = asteroid_haul::units::au_per_year_to_km_s(
        (asteroid_haul::constants::MU_SUN_AU3_YR2 / 1.0).sqrt(),
    );
    let expected = v1_km_s * (std::f64::consts::FRAC_PI_4).sin() * 0.3;
    assert!((costs.efficient.delta_v_km_s - expected).abs() < 1e-9);
}

#[test]
fn capture_adds_to_efficient_and_surcharges_fast() {
    let from = [2.0, 0.5, 0.0];
    let to = [1.0, 0.2, 0.0];
    let base = model().heliocentric(&from, &to);
    let costs = model().all_modes(&from, &to, Some(CaptureTarget::LowOrbit));
    let capture = capture_delta_v(base.delta_v_km_s, CaptureTarget::LowOrbit, true);

    assert!((costs.efficient.delta_v_km_s - (base.delta_v_km_s + capture)).abs() < 1e-9);
    assert!((costs.fast.delta_v_km_s - (1.5 * base.delta_v_km_s + 1.2 * capture)).abs() < 1e-9);
    assert!(
        (costs.cycler.delta_v_km_s - CYCLER_DELTA_V_FACTOR * base.delta_v_km_s).abs() < 1e-9,
        "cycler never pays capture"
    );
    assert!((costs.cycler.time_of_flight_days - 0.8 * base.time_of_flight_days).abs() < 1e-9);
    assert!((costs.fast.time_of_flight_days - 0.7 * base.time_of_flight_days).abs() < 1e-9);
}

#[test]
fn aerobraking_discount_is_capped_and_floored() {
    let leo_circular = (MU_EARTH_KM3_S2 / 6_578.0).sqrt();
    let raw = capture_delta_v(3.0, CaptureTarget::LowOrbit, false);
    assert!((raw - (3.0 + leo_circular)).abs() < 1e-9);
    let braked = capture_delta_v(3.0, CaptureTarget::LowOrbit, true);
    assert!((raw - braked - 7.0).abs() < 1e-9);

    // Slow arrival at the Lagrange point: the discount exceeds the cost.
    assert_eq!(capture_delta_v(0.5, CaptureTarget::LagrangePoint, true), 0.0);
}

#[test]
fn disabling_aerobraking_raises_capture_costs() {
    let from = [2.6, 0.0, 0.0];
    let to = [1.0, 0.1, 0.0];
    let with = model().all_modes(&from, &to, Some(CaptureTarget::LowOrbit));
    let without = TransferModel::new(0.3, false)
        .unwrap()
        .all_modes(&from, &to, Some(CaptureTarget::LowOrbit));
    assert!(without.efficient.delta_v_km_s > with.efficient.delta_v_km_s);
    assert_eq!(without.cycler, with.cycler);
}

#[test]
fn difficulty_scales_heliocentric_cost_linearly() {
    let from = [2.6, 0.0, 0.0];
    let to = [1.52, 0.4, 0.0];
    let light = TransferModel::new(0.3, true).unwrap().heliocentric(&from, &to);
    let heavy = TransferModel::new(0.6, true).unwrap().heliocentric(&from, &to);
    assert!((heavy.delta_v_km_s - 2.0 * light.delta_v_km_s).abs() < 1e-9);
    assert_eq!(heavy.time_of_flight_days, light.time_of_flight_days);
}

#[test]
fn invalid_difficulty_is_rejected() {
    assert_eq!(
        TransferModel::new(0.0, true),
        Err(TransferError::InvalidDifficulty(0.0))
    );
    assert!(TransferModel::new(-0.3, true).is_err());
    assert!(TransferModel::new(f64::INFINITY, false).is_err());
}

#[test]
fn body_at_the_sun_is_unreachable() {
    let cost = model().costs(&[0.0; 3], &[1.0, 0.0, 0.0], TransferMode::Fast, None);
    assert!(cost.delta_v_km_s.is_infinite());
}
