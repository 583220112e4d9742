//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod ledger {
    use std::io::{self, Write};

    pub const HEADER: &str = "day,mode,rank,destination,price_per_kg,shipped_kg,propellant_kg,delivered_kg,profit,delta_v_km_s,time_of_flight_days,decision,stored_kg";

    /// Write the ledger CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One ranked shipment option on one day.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub day: u32,
        pub mode: &'a str,
        pub rank: usize,
        pub destination: &'a str,
        pub price_per_kg: f64,
        pub shipped_kg: f64,
        pub propellant_kg: f64,
        pub delivered_kg: f64,
        pub profit: f64,
        pub delta_v_km_s: f64,
        pub time_of_flight_days: f64,
        pub decision: &'a str,
        pub stored_kg: f64,
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{},{},{:.4},{:.3},{:.3},{:.3},{:.3},{:.6},{:.3},{},{:.3}",
                self.day,
                self.mode,
                self.rank,
                escape(self.destination),
                self.price_per_kg,
                self.shipped_kg,
                self.propellant_kg,
                self.delivered_kg,
                self.profit,
                self.delta_v_km_s,
                self.time_of_flight_days,
                self.decision,
                self.stored_kg,
            )
        }
    }

    fn escape(field: &str) -> String {
        if field.contains([',', '"', '\n']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

pub mod summary {
    use std::collections::BTreeMap;
    use std::io::{self, Write};

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Most profitable option seen for one mode over the whole run.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct BestOption {
        pub day: u32,
        pub destination: String,
        pub profit: f64,
        pub delivered_kg: f64,
    }

    /// Envelope of a simulation run.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct RunSummary {
        pub asteroid: String,
        pub vehicle: String,
        pub seed: Option<u64>,
        pub days_simulated: u32,
        pub shipped_days: u32,
        pub stockpiled_days: u32,
        pub final_stockpile_kg: f64,
        /// Keyed by mode name; `None` when no option of that mode was ever profitable.
        pub best_by_mode: BTreeMap<String, Option<BestOption>>,
    }

    impl RunSummary {
        /// Keep `candidate` if it beats the current best for `mode`.
        pub fn offer(&mut self, mode: &str, candidate: BestOption) {
            let slot = self.best_by_mode.entry(mode.to_string()).or_insert(None);
            if candidate.profit <= 0.0 {
                return;
            }
            if slot.as_ref().is_none_or(|best| candidate.profit > best.profit) {
                *slot = Some(candidate);
            }
        }
    }

    /// Write the summary as pretty JSON followed by a newline.
    pub fn write_summary(writer: &mut dyn Write, summary: &RunSummary) -> io::Result<()> {
        to_writer_pretty(&mut *writer, summary)?;
        writeln!(writer)
    }
}
