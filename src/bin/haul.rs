use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use asteroid_haul::config::load_simulation;
use asteroid_haul::export::summary::{BestOption, RunSummary, write_summary};
use asteroid_haul::export::{ledger, writer_for_path};
use asteroid_haul::scenario::build_scenario;
use asteroid_haul::simulation::{
    DayReport, InventoryDecision, ShipmentOption, Simulation, SimulationContext,
    establishment_cost,
};
use asteroid_haul::transfer::TransferMode;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Daily water-hauling economics for a mining asteroid"
)]
struct Cli {
    /// Simulation settings (TOML or YAML)
    #[arg(long, default_value = "configs/simulation.toml")]
    scenario: PathBuf,

    /// Catalog root holding destinations/, components.yaml and vehicles/
    #[arg(long, default_value = "configs")]
    catalog: PathBuf,

    /// Number of days to simulate (defaults to settings, then one asteroid cycle)
    #[arg(long)]
    days: Option<u32>,

    /// RNG seed for price draws (defaults to settings, then entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the aerobraking discount on Earth captures
    #[arg(long, default_value_t = false)]
    no_aerobraking: bool,

    /// Override the difficulty scale applied to efficient transfers
    #[arg(long)]
    difficulty: Option<f64>,

    /// Write every ranked option to this CSV ledger (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON run summary to this path (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Options shown per mode in the daily tables
    #[arg(long, default_value_t = 3)]
    top: usize,

    /// Suppress the daily tables
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = load_simulation(&cli.scenario)
        .with_context(|| format!("loading settings from {}", cli.scenario.display()))?;
    if cli.no_aerobraking {
        settings.aerobraking = false;
    }
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty_scale = difficulty;
    }
    let scenario = build_scenario(&settings, &cli.catalog)
        .with_context(|| format!("building scenario from {}", cli.catalog.display()))?;

    let days = cli.days.unwrap_or_else(|| scenario.run_length());
    let seed = cli.seed.or(scenario.seed);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if !cli.quiet {
        print_overview(&scenario.context, &settings.asteroid.name);
    }

    let mut ledger_out = match &cli.csv {
        Some(path) => {
            let mut writer = writer_for_path(path)
                .with_context(|| format!("opening ledger {}", path.display()))?;
            ledger::write_header(&mut *writer)?;
            Some(writer)
        }
        None => None,
    };

    let mut simulation = Simulation::new(
        scenario.context,
        scenario.state,
        scenario.cycle_days,
        days,
        rng,
    );
    let mut summary = RunSummary {
        asteroid: settings.asteroid.name.clone(),
        vehicle: simulation.context().hauler().name().to_string(),
        seed,
        days_simulated: 0,
        shipped_days: 0,
        stockpiled_days: 0,
        final_stockpile_kg: simulation.state().asteroid.stored_kg(),
        best_by_mode: TransferMode::ALL
            .iter()
            .map(|mode| (mode.name().to_string(), None))
            .collect::<BTreeMap<_, _>>(),
    };

    for report in simulation.by_ref() {
        let report = report?;
        if !cli.quiet {
            print_day(&report, cli.top);
        }
        if let Some(writer) = ledger_out.as_mut() {
            write_ledger_rows(&mut **writer, &report)?;
        }
        record_day(&mut summary, &report);
    }
    summary.final_stockpile_kg = simulation.state().asteroid.stored_kg();

    if let Some(mut writer) = ledger_out {
        writer.flush()?;
    }
    if let Some(path) = &cli.json {
        let mut writer = writer_for_path(path)
            .with_context(|| format!("opening summary {}", path.display()))?;
        write_summary(&mut *writer, &summary)?;
        writer.flush()?;
    }
    if !cli.quiet {
        println!(
            "Simulated {} days: shipped on {}, stockpiled on {}; final stockpile {:.0} kg",
            summary.days_simulated,
            summary.shipped_days,
            summary.stockpiled_days,
            summary.final_stockpile_kg
        );
    }

    Ok(())
}

fn print_overview(context: &SimulationContext, asteroid: &str) {
    let hauler = context.hauler();
    println!("=== Asteroid {} ===", asteroid);
    println!(
        "Vehicle        : {} ({}), dry {:.0} kg, cargo {:.0} kg, Isp {:.1} s, power {:.0}/{:.0} kW",
        hauler.name(),
        hauler.class().name,
        hauler.dry_mass_kg(),
        hauler.cargo_capacity_kg(),
        hauler.specific_impulse_s(),
        hauler.required_power_kw(),
        hauler.available_power_kw()
    );
    let engines: Vec<String> = hauler
        .engines()
        .iter()
        .map(|(unit, count)| format!("{} x{}", unit.name, count))
        .collect();
    let power: Vec<String> = hauler
        .power_sources()
        .iter()
        .map(|(source, count)| format!("{} x{}", source.name, count))
        .collect();
    println!(
        "Fit            : engines [{}], power [{}]",
        engines.join(", "),
        power.join(", ")
    );
    println!(
        "Max Δv         : {:.3} km/s (full cargo as propellant)",
        hauler.max_delta_v_km_s()
    );
    println!();
    println!("=== Cycler establishment ===");
    println!(
        "{:<22} {:>12} {:>16} {:>16}",
        "Destination", "Δv km/s", "Propellant kg", "Price range"
    );
    for destination in context.destinations() {
        let (low, high) = destination.price_curve().range();
        match establishment_cost(destination, hauler) {
            Some(cost) => println!(
                "{:<22} {:>12.3} {:>16} {:>7.2}-{:<8.2}",
                destination.name(),
                cost.delta_v_km_s,
                format_mass(cost.propellant_kg),
                low,
                high
            ),
            None => println!(
                "{:<22} {:>12} {:>16} {:>7.2}-{:<8.2}",
                destination.name(),
                "-",
                "-",
                low,
                high
            ),
        }
    }
    println!();
}

fn print_day(report: &DayReport, top: usize) {
    println!(
        "=== Day {} === available {:.0} kg, shippable {:.0} kg, r = {:.3} AU",
        report.day,
        report.available_kg,
        report.shippable_kg,
        asteroid_haul::vector::norm(&report.asteroid_position_au)
    );
    for mode in TransferMode::ALL {
        println!("-- {} --", mode);
        println!(
            "{:<22} {:>8} {:>10} {:>14} {:>14} {:>14} {:>10}",
            "Destination", "$/kg", "Δv km/s", "Propellant kg", "Delivered kg", "Profit", "Days"
        );
        for option in report.options(mode).iter().take(top) {
            print_option(option);
        }
    }
    match report.decision {
        InventoryDecision::Shipped { shipped_kg } => println!(
            "Shipped {:.0} kg; stockpile now {:.0} kg",
            shipped_kg, report.stored_after_kg
        ),
        InventoryDecision::Stockpiled { added_kg } => println!(
            "Nothing profitable; stockpiled {:.0} kg, stockpile now {:.0} kg",
            added_kg, report.stored_after_kg
        ),
    }
    println!();
}

fn print_option(option: &ShipmentOption) {
    println!(
        "{:<22} {:>8.2} {:>10.3} {:>14} {:>14.0} {:>14.0} {:>10.1}",
        option.destination,
        option.price_per_kg,
        option.delta_v_km_s,
        format_mass(option.propellant_kg),
        option.delivered_kg,
        option.profit,
        option.time_of_flight_days
    );
}

fn format_mass(kg: f64) -> String {
    if kg.is_finite() {
        format!("{:.0}", kg)
    } else {
        "unreachable".to_string()
    }
}

fn write_ledger_rows(writer: &mut dyn Write, report: &DayReport) -> std::io::Result<()> {
    for mode in TransferMode::ALL {
        for (rank, option) in report.options(mode).iter().enumerate() {
            ledger::Record {
                day: report.day,
                mode: mode.name(),
                rank: rank + 1,
                destination: &option.destination,
                price_per_kg: option.price_per_kg,
                shipped_kg: option.shipped_kg,
                propellant_kg: option.propellant_kg,
                delivered_kg: option.delivered_kg,
                profit: option.profit,
                delta_v_km_s: option.delta_v_km_s,
                time_of_flight_days: option.time_of_flight_days,
                decision: report.decision.label(),
                stored_kg: report.stored_after_kg,
            }
            .write_to(writer)?;
        }
    }
    Ok(())
}

fn record_day(summary: &mut RunSummary, report: &DayReport) {
    summary.days_simulated += 1;
    match report.decision {
        InventoryDecision::Shipped { .. } => summary.shipped_days += 1,
        InventoryDecision::Stockpiled { .. } => summary.stockpiled_days += 1,
    }
    for mode in TransferMode::ALL {
        let best = report
            .options(mode)
            .iter()
            .max_by(|a, b| a.profit.total_cmp(&b.profit));
        if let Some(best) = best {
            summary.offer(
                mode.name(),
                BestOption {
                    day: report.day,
                    destination: best.destination.clone(),
                    profit: best.profit,
                    delivered_kg: best.delivered_kg,
                },
            );
        }
    }
}
