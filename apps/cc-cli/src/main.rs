use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use cc_app::{AppError, AppResult, project_service, query, replay_service};
use cc_core::raw_to_real;
use cc_psychro::{AirState, DEW_POINT_SENTINEL, PlausibleRange};

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(about = "Chamber climate controller - site validation and scenario replay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a site file and trial-compile every chamber
    Validate {
        /// Path to the site YAML (or JSON) file
        site_path: PathBuf,
    },
    /// List chambers in a site
    Chambers {
        /// Path to the site YAML (or JSON) file
        site_path: PathBuf,
    },
    /// Replay a scenario through one chamber's controller
    Replay {
        /// Path to the site YAML (or JSON) file
        site_path: PathBuf,
        /// Chamber ID to replay
        chamber_id: String,
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Output CSV file path (optional, prints a summary only if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print moist-air properties for a temperature/RH pair
    Psychro {
        /// Temperature in °C
        #[arg(long, allow_hyphen_values = true)]
        temp: f64,
        /// Relative humidity in %
        #[arg(long)]
        rh: f64,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { site_path } => cmd_validate(&site_path),
        Commands::Chambers { site_path } => cmd_chambers(&site_path),
        Commands::Replay {
            site_path,
            chamber_id,
            scenario_path,
            output,
        } => cmd_replay(&site_path, &chamber_id, &scenario_path, output.as_deref()),
        Commands::Psychro { temp, rh } => cmd_psychro(temp, rh),
    }
}

fn cmd_validate(site_path: &Path) -> AppResult<()> {
    println!("Validating site: {}", site_path.display());
    let site = project_service::load_site(site_path)?;
    project_service::validate_site(&site)?;
    println!("✓ Site is valid ({} chambers)", site.chambers.len());
    Ok(())
}

fn cmd_chambers(site_path: &Path) -> AppResult<()> {
    let site = project_service::load_site(site_path)?;
    let chambers = project_service::list_chambers(&site);

    if chambers.is_empty() {
        println!("No chambers found in site");
    } else {
        println!("Chambers in {}:", site.name);
        for chamber in chambers {
            let target = chamber
                .default_target
                .map(|(t, rh)| format!("{t:.1} °C / {rh:.1} %RH"))
                .unwrap_or_else(|| "no default target".to_string());
            let humidifier = if chamber.humidifier_installed {
                ", humidifier"
            } else {
                ""
            };
            println!(
                "  {} - {} ({}, tick {} s{})",
                chamber.id, chamber.name, target, chamber.tick_interval_s, humidifier
            );
        }
    }
    Ok(())
}

fn cmd_replay(
    site_path: &Path,
    chamber_id: &str,
    scenario_path: &Path,
    output: Option<&Path>,
) -> AppResult<()> {
    let site = project_service::load_site(site_path)?;
    let chamber = project_service::get_chamber(&site, chamber_id)?;
    let scenario = project_service::load_scenario(scenario_path)?;

    println!(
        "Replaying '{}' through chamber: {}",
        scenario.name, chamber.id
    );
    let records = replay_service::run_scenario(chamber, &scenario)?;
    let summary = query::get_replay_summary(&records)?;

    println!(
        "✓ Replayed {} ticks ({} s to {} s)",
        summary.tick_count, summary.time_range.0, summary.time_range.1
    );
    println!(
        "  Supply target: {:.1} to {:.1} °C",
        raw_to_real(summary.supply_target_range.0),
        raw_to_real(summary.supply_target_range.1)
    );
    println!(
        "  Humidity: {} humid ticks, {} dry ticks",
        summary.humid_ticks, summary.dry_ticks
    );
    if summary.fallback_ticks > 0 {
        println!("  Sensor fallback: {} ticks", summary.fallback_ticks);
    }
    println!("  Relay switch events: {}", summary.relay_switches);
    println!("  Relay on-ticks:");
    for (name, on) in &summary.relay_on_ticks {
        println!("    {:<24} {}", name, on);
    }

    if let Some(path) = output {
        let csv = query::records_to_csv(&records);
        tracing::debug!(path = %path.display(), bytes = csv.len(), "writing replay CSV");
        std::fs::write(path, csv).map_err(|e| AppError::ProjectFileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!("✓ Exported {} records to {}", records.len(), path.display());
    }

    Ok(())
}

fn cmd_psychro(temp: f64, rh: f64) -> AppResult<()> {
    PlausibleRange::default()
        .check(temp, rh)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let air = AirState::new(temp, rh);
    println!("Air at {:.1} °C / {:.1} %RH:", temp, rh);
    println!(
        "  Saturation vapor pressure: {:.3} hPa",
        cc_psychro::saturation_vapor_pressure(temp)
    );
    println!("  Absolute humidity:         {:.3} g/m³", air.absolute_humidity());
    let dew_point = air.dew_point();
    if dew_point == DEW_POINT_SENTINEL {
        println!("  Dew point:                 undefined (RH ≤ 0)");
    } else {
        println!("  Dew point:                 {:.2} °C", dew_point);
    }
    let chamber_band = cc_controls::HumidityBand::CHAMBER;
    println!(
        "  Chamber deadzone:          {:.3} to {:.3} g/m³",
        air.absolute_humidity() - chamber_band.deadzone,
        air.absolute_humidity() + chamber_band.deadzone
    );
    Ok(())
}
