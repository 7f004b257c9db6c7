extern crate thermal_network_metrics;

use anyhow::Context;
use clap::Parser;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thermal_network_metrics::assets::asset_valuation;
use thermal_network_metrics::core::units::watts_to_kilowatts;
use thermal_network_metrics::output::write_time_series_csv;
use thermal_network_metrics::store::{HourlyDataset, LoadOptions, Session};
use thermal_network_metrics::MissingFieldPolicy;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct TnmArgs {
    /// Hourly heat pump comparison results CSV
    input_file: String,
    /// Hour of the simulated year to report on
    #[arg(long, default_value_t = 1)]
    hour: u32,
    /// Fail the load on missing or non-numeric fields instead of defaulting them to zero
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Print the selected hour's snapshot as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = TnmArgs::parse();

    let input_file = args.input_file.as_str();
    let input_file_ext = Path::new(input_file).extension().and_then(OsStr::to_str);
    let input_file_stem = match input_file_ext {
        Some(ext) => &input_file[..(input_file.len() - ext.len() - 1)],
        None => input_file,
    };
    let output_file_time_series = format!("{input_file_stem}_time_series.csv");

    let options = LoadOptions {
        missing_fields: if args.strict {
            MissingFieldPolicy::Fail
        } else {
            MissingFieldPolicy::DefaultZero
        },
    };
    let dataset = HourlyDataset::load_with_options(
        BufReader::new(File::open(Path::new(input_file))?),
        options,
    )?;

    let mut session = Session::new(&dataset);
    session.set_current_hour(args.hour);
    let snapshot = session
        .current_hour_data()
        .with_context(|| format!("hour {} is not present in the dataset", args.hour))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        let metrics = &snapshot.system_metrics;
        println!(
            "hour {} of {} ({} buildings, outdoor {:.1} degC)",
            snapshot.hour,
            dataset.len(),
            dataset.roster().len(),
            snapshot.outdoor_temp.celsius
        );
        println!(
            "network electric: {:.1} kW   standalone electric: {:.1} kW   savings: {:.1} kW",
            watts_to_kilowatts(metrics.total_geo_electric),
            watts_to_kilowatts(metrics.total_air_electric),
            watts_to_kilowatts(metrics.total_energy_savings),
        );
        println!(
            "heating load: {:.1} kW   cooling load: {:.1} kW",
            watts_to_kilowatts(metrics.heating_load),
            watts_to_kilowatts(metrics.cooling_load),
        );
        println!(
            "network COP {:.2} vs standalone COP {:.2} ({:+.1}% efficiency gain)",
            metrics.avg_geo_cop, metrics.avg_air_cop, metrics.system_efficiency_gain,
        );
        println!();
        for asset in asset_valuation() {
            println!(
                "{}: {:.0} kW capacity at {:.0}% utilization, network value ${:.0}",
                asset.name,
                watts_to_kilowatts(asset.capacity_w),
                asset.utilization_percent,
                asset.network_value,
            );
        }
    }

    println!("writing out to {output_file_time_series}");
    write_time_series_csv(
        BufWriter::new(File::create(&output_file_time_series)?),
        &dataset,
    )?;

    Ok(())
}
