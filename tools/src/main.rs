//! fleet-runner: headless simulation runner for fleetsim.
//!
//! Usage:
//!   fleet-runner --assets-dir ./assets --out-dir ./out
//!   fleet-runner --days 1095 --start-date 2022-01-01 --config-dir ./data

use anyhow::Result;
use chrono::NaiveDate;
use fleetsim_core::{
    csv_header, loader::load_asset_folder, record::DailyRecord, Horizon, RunSummary, SimConfig,
    SimulationDriver,
};
use std::env;
use std::fs;
use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let days = parse_arg(&args, "--days", 365 * 3u32);
    let assets_dir = str_arg(&args, "--assets-dir").unwrap_or("./assets");
    let out_dir = str_arg(&args, "--out-dir").unwrap_or(".");
    let config_dir = str_arg(&args, "--config-dir");
    let start_date = str_arg(&args, "--start-date")
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| Horizon::default().start_date);

    println!("fleetsim — fleet-runner");
    println!("  days:       {days}");
    println!("  start:      {start_date}");
    println!("  assets_dir: {assets_dir}");
    println!("  out_dir:    {out_dir}");
    println!();

    let config = match config_dir {
        Some(dir) => SimConfig::load(dir)?,
        None => SimConfig::default(),
    };
    let horizon = Horizon { start_date, days };
    let driver = SimulationDriver::new(config, horizon)?;

    fs::create_dir_all(out_dir)?;

    let mut summaries: Vec<RunSummary> = Vec::new();

    // Each subfolder of assets_dir holds one asset's exported JSON
    // files (possibly several assets' files mixed together).
    for entry in fs::read_dir(assets_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let folder = path.display().to_string();
        println!("--- Processing data for folder: {folder} ---");

        let assets = load_asset_folder(&folder)?;
        if assets.is_empty() {
            log::warn!("No usable asset records in '{folder}'.");
            continue;
        }

        for asset in &assets {
            println!("Simulating data for tractor: {}", asset.tractor_id);
            let run = driver.run_asset(asset)?;

            let out_path =
                format!("{out_dir}/simulated_telemetry_{}.csv", asset.tractor_id);
            write_csv(&out_path, driver.config(), &run.records)?;
            println!(
                "Simulated telemetry for {} saved to: {out_path}",
                asset.tractor_id
            );

            summaries.push(run.summary);
        }
    }

    print_summary(&summaries);
    Ok(())
}

fn write_csv(path: &str, config: &SimConfig, records: &[DailyRecord]) -> Result<()> {
    let mut file = fs::File::create(path)?;
    writeln!(file, "{}", csv_header(config))?;
    for record in records {
        writeln!(file, "{}", record.csv_row())?;
    }
    Ok(())
}

fn print_summary(summaries: &[RunSummary]) {
    println!();
    println!("--- Overall Simulation Summary Across All Tractors ---");
    let mut total_failures = 0usize;
    let mut total_records = 0usize;
    for summary in summaries {
        total_failures += summary.simulated_failures;
        total_records += summary.total_records;
        println!(
            "Tractor ID: {}, Model: {}, Total Records: {}, Simulated Failures: {}",
            summary.asset_id, summary.model, summary.total_records, summary.simulated_failures
        );
    }
    println!();
    println!("Total Simulated Failures Across All Tractors: {total_failures}");
    println!("Total Daily Records Generated: {total_records}");
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
