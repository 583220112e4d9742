use std::collections::HashSet;

use asteroid_haul::orbits::OrbitalElements;
use asteroid_haul::propulsion::{Hauler, HaulerClass, PowerSource, PropulsionUnit};
use asteroid_haul::scenario::{Scenario, load_scenario};
use asteroid_haul::simulation::{
    AsteroidState, Destination, InventoryDecision, PriceCurve, Simulation, SimulationContext,
    SimulationError, SimulationState, advance_day, establishment_cost, perihelion_weight,
};
use asteroid_haul::transfer::{TransferMode, TransferModel};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn shipped_scenario() -> Scenario {
    load_scenario("configs/simulation.toml", "configs").expect("shipped scenario")
}

fn small_hauler() -> Hauler {
    Hauler::new(
        "small_thermal",
        HaulerClass {
            name: "small".into(),
            dry_mass_kg: 2_000.0,
            cargo_capacity_kg: 20_000.0,
        },
        vec![(
            PropulsionUnit {
                name: "thermal".into(),
                isp_s: 400.0,
                efficiency: 0.85,
                mass_kg: 250.0,
                power_kw: 5.0,
                max_per_vehicle: 2,
            },
            1,
        )],
        vec![(
            PowerSource {
                name: "solar".into(),
                mass_kg: 50.0,
                power_kw: 1.0,
            },
            5,
        )],
    )
    .unwrap()
}

fn worthless_market() -> (SimulationContext, SimulationState) {
    let nowhere = Destination::new(
        "Nowhere",
        OrbitalElements::circular(1.0).unwrap(),
        None,
        PriceCurve::Flat {
            base: 0.0,
            spread: 0.0,
        },
        None,
    )
    .unwrap();
    let context =
        SimulationContext::new(vec![nowhere], small_hauler(), TransferModel::default()).unwrap();
    let asteroid = AsteroidState::new(
        "Rock",
        OrbitalElements::circular(1.2).unwrap(),
        480.0,
        5_000.0,
        0.0,
    )
    .unwrap();
    (context, SimulationState::new(asteroid))
}

#[test]
fn day_one_ranks_every_destination_once_per_mode() {
    let scenario = shipped_scenario();
    assert_eq!(scenario.state.asteroid.stored_kg(), 0.0);
    let count = scenario.context.destinations().len();
    let mut rng = StdRng::seed_from_u64(7);

    let (next, report) = advance_day(
        &scenario.context,
        &scenario.state,
        1,
        scenario.cycle_days,
        &mut rng,
    )
    .expect("day 1");

    for mode in TransferMode::ALL {
        let options = report.options(mode);
        assert_eq!(options.len(), count, "{} ranking", mode);
        let names: HashSet<_> = options.iter().map(|o| o.destination.as_str()).collect();
        assert_eq!(names.len(), count);
        for option in options {
            assert!(option.delivered_kg >= 0.0);
            assert_eq!(option.profit == -1.0, option.delivered_kg == 0.0);
        }
    }

    let fast = report.options(TransferMode::Fast);
    assert!(fast
        .windows(2)
        .all(|w| w[0].time_of_flight_days <= w[1].time_of_flight_days));
    let efficient = report.options(TransferMode::Efficient);
    assert!(efficient.windows(2).all(|w| w[0].profit >= w[1].profit));

    let any_profitable = report
        .options(TransferMode::Efficient)
        .iter()
        .chain(report.options(TransferMode::Fast))
        .any(|o| o.profit > 0.0);
    match report.decision {
        InventoryDecision::Shipped { shipped_kg } => {
            assert!(any_profitable);
            assert_eq!(shipped_kg, report.shippable_kg);
            assert_eq!(next.asteroid.stored_kg(), 0.0);
        }
        InventoryDecision::Stockpiled { added_kg } => {
            assert!(!any_profitable);
            assert_eq!(added_kg, 5_000.0);
            assert_eq!(next.asteroid.stored_kg(), 5_000.0);
        }
    }
    assert_eq!(report.available_kg, 5_000.0);
    assert_eq!(report.snapshots.len(), count);
    assert_eq!(report.snapshots[0].name, "Mercury");
}

#[test]
fn same_seed_reproduces_the_same_days() {
    let run = |seed| {
        let scenario = shipped_scenario();
        Simulation::new(
            scenario.context,
            scenario.state,
            scenario.cycle_days,
            5,
            StdRng::seed_from_u64(seed),
        )
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
    };
    assert_eq!(run(11), run(11));
    let prices = |reports: &[asteroid_haul::simulation::DayReport]| {
        reports[0].snapshots.iter().map(|s| s.price_per_kg).collect::<Vec<_>>()
    };
    assert_ne!(prices(&run(11)), prices(&run(12)));
}

#[test]
fn nothing_profitable_accumulates_the_stockpile() {
    let (context, state) = worthless_market();
    let reports: Vec<_> = Simulation::new(context, state, 480.0, 3, StdRng::seed_from_u64(1))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(reports.len(), 3);
    let stored: Vec<_> = reports.iter().map(|r| r.stored_after_kg).collect();
    assert_eq!(stored, [5_000.0, 10_000.0, 15_000.0]);
    assert!(reports
        .iter()
        .all(|r| matches!(r.decision, InventoryDecision::Stockpiled { .. })));
    assert_eq!(reports[2].available_kg, 15_000.0);
}

#[test]
fn shipping_debits_the_stockpile_without_going_negative() {
    let scenario = shipped_scenario();
    let asteroid = AsteroidState::new(
        "Wilson-Harrington",
        *scenario.state.asteroid.elements(),
        scenario.cycle_days,
        5_000.0,
        30_000.0,
    )
    .unwrap();
    let state = SimulationState::new(asteroid);
    let mut rng = StdRng::seed_from_u64(3);
    let (next, report) =
        advance_day(&scenario.context, &state, 1, scenario.cycle_days, &mut rng).unwrap();

    // Shippable is capped by the 20 t hold.
    assert_eq!(report.shippable_kg, 20_000.0);
    if let InventoryDecision::Shipped { .. } = report.decision {
        assert_eq!(next.asteroid.stored_kg(), 10_000.0);
    } else {
        assert_eq!(next.asteroid.stored_kg(), 35_000.0);
    }
}

#[test]
fn simulation_stops_after_the_last_day() {
    let (context, state) = worthless_market();
    let mut simulation = Simulation::new(context, state, 480.0, 2, StdRng::seed_from_u64(5));
    assert_eq!(simulation.next().unwrap().unwrap().day, 1);
    assert_eq!(simulation.next().unwrap().unwrap().day, 2);
    assert!(simulation.next().is_none());
    assert!(simulation.is_finished());
    assert_eq!(simulation.day(), 2);
}

#[test]
fn simulation_exposes_the_state_carried_between_days() {
    let (context, state) = worthless_market();
    let destinations = context.destinations().len();
    let mut simulation = Simulation::new(context, state, 480.0, 3, StdRng::seed_from_u64(9));
    assert_eq!(simulation.context().destinations().len(), destinations);

    let last = simulation
        .by_ref()
        .map(|report| report.unwrap())
        .last()
        .unwrap();
    assert_eq!(last.day, 3);
    assert_eq!(simulation.state().asteroid.stored_kg(), last.stored_after_kg);
}

#[test]
fn zero_length_cycle_is_a_domain_error() {
    let (context, state) = worthless_market();
    let mut rng = StdRng::seed_from_u64(1);
    let err = advance_day(&context, &state, 1, 0.0, &mut rng).unwrap_err();
    assert!(matches!(err, SimulationError::Orbit(_)));
}

#[test]
fn perihelion_weight_is_clamped() {
    assert_eq!(perihelion_weight(0.0, 100.0), 1.0);
    assert_eq!(perihelion_weight(50.0, 100.0), 0.5);
    assert_eq!(perihelion_weight(150.0, 100.0), 0.0);
}

#[test]
fn establishment_cost_uses_the_hauler() {
    let scenario = shipped_scenario();
    let hauler = scenario.context.hauler();
    let find = |name: &str| {
        scenario
            .context
            .destinations()
            .iter()
            .find(|d| d.name() == name)
            .unwrap()
    };

    let mars = establishment_cost(find("Mars"), hauler).unwrap();
    assert_eq!(mars.delta_v_km_s, 7.0);
    assert!(mars.propellant_kg.is_finite());
    assert!((hauler.delta_v_from_burning(mars.propellant_kg) - 7.0).abs() < 1e-6);

    let mercury = establishment_cost(find("Mercury"), hauler).unwrap();
    assert!(mercury.propellant_kg.is_infinite());

    let (context, _) = worthless_market();
    assert!(establishment_cost(&context.destinations()[0], hauler).is_none());
}

#[test]
fn invalid_destinations_are_rejected() {
    let elements = OrbitalElements::circular(1.0).unwrap();
    let flat = PriceCurve::Flat {
        base: 5.0,
        spread: 1.0,
    };
    assert!(Destination::new("", elements, None, flat, None).is_err());
    assert!(Destination::new("X", elements, None, flat, Some(-2.0)).is_err());
    assert!(
        Destination::new(
            "X",
            elements,
            None,
            PriceCurve::Flat {
                base: f64::NAN,
                spread: 1.0
            },
            None
        )
        .is_err()
    );
    assert!(matches!(
        SimulationContext::new(vec![], small_hauler(), TransferModel::default()),
        Err(SimulationError::NoDestinations)
    ));
}

#[test]
fn price_curves_follow_the_perihelion_weight() {
    let near = PriceCurve::Perihelion {
        base: 8.0,
        weight: 2.0,
        spread: 1.0,
    };
    let far = PriceCurve::Aphelion {
        base: 6.0,
        weight: 2.0,
        spread: 1.0,
    };
    assert_eq!(near.price(1.0, 0.5), 10.5);
    assert_eq!(near.price(0.0, 0.5), 8.5);
    assert_eq!(far.price(1.0, 0.0), 6.0);
    assert_eq!(far.price(0.0, 1.0), 9.0);
    assert_eq!(near.range(), (8.0, 11.0));
}
