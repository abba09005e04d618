use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use impactor::{
    collector::{Collector, FeedSource},
    config::{Config, ConfigLoader, PredictorConfig},
    display::{render_report, rule},
    ledger::PredictionLog,
    population::PopulationCenterIndex,
    prompt::{PartialParameters, PromptOutcome, Prompter},
    report::ImpactReportBuilder,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Meteor impact predictor and NEO feed collector")]
struct Cli {
    /// Path to a YAML config file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict the consequences of one impact; prompts for missing values
    Predict(PredictArgs),
    /// Fetch NEO, Fireball and CAD feeds and write a scored CSV
    Collect(CollectArgs),
    /// List the population centers used for exposure lookups
    Centers,
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Meteor diameter in meters
    #[arg(long)]
    diameter: Option<f64>,

    /// Velocity in km/s
    #[arg(long)]
    velocity: Option<f64>,

    /// Distance from Earth in km
    #[arg(long)]
    distance: Option<f64>,

    /// Impact latitude (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Impact longitude (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Impact angle in degrees, (0, 90]
    #[arg(long)]
    angle: Option<f64>,

    /// Bulk density in kg/m3
    #[arg(long)]
    density: Option<f64>,

    /// Prediction log file (overrides config)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Do not append to the prediction log
    #[arg(long)]
    no_log: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CollectArgs {
    /// Output CSV (overrides config)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write discarded rows and their reasons to this CSV
    #[arg(long)]
    discarded: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::new(".").load_or_default(cli.config.as_deref())?;
    init_logging(&config.logging.level);

    match cli.command {
        Command::Predict(args) => run_predict(&config, args),
        Command::Collect(args) => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(run_collect(&config, args))
        }
        Command::Centers => run_centers(&config),
    }
}

fn init_logging(level: &str) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.parse_filters(level),
    };
    builder.init();
}

fn load_centers(predictor: &PredictorConfig) -> Result<PopulationCenterIndex> {
    let index = match &predictor.centers_path {
        Some(path) => PopulationCenterIndex::from_yaml(path)?,
        None => PopulationCenterIndex::world_cities(),
    };
    log::debug!("Loaded {} population centers", index.len());
    Ok(index)
}

fn run_predict(config: &Config, args: PredictArgs) -> Result<()> {
    let centers = load_centers(&config.predictor)?;
    let builder = ImpactReportBuilder::new(&centers);
    let log = (!args.no_log).then(|| {
        PredictionLog::new(
            args.log
                .clone()
                .unwrap_or_else(|| config.predictor.log_path.clone()),
        )
    });

    let preset = PartialParameters {
        diameter_m: args.diameter,
        velocity_km_s: args.velocity,
        distance_km: args.distance,
        latitude: args.lat,
        longitude: args.lon,
    };
    let angle = args.angle.unwrap_or(config.predictor.impact_angle_deg);
    let density = args.density.unwrap_or(config.predictor.bulk_density_kg_m3);
    let interactive = !preset.is_complete();

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    loop {
        if interactive {
            let out = prompter.output();
            writeln!(out, "\n{}", rule())?;
            writeln!(out, "METEOR IMPACT PREDICTOR")?;
            writeln!(out, "{}", rule())?;
            writeln!(out, "\nEnter meteor parameters to predict impact consequences:\n")?;
        }

        match prompter.collect(preset, angle, density)? {
            PromptOutcome::EndOfInput => break,
            PromptOutcome::NotANumber(answer) => {
                log::debug!("rejected non-numeric answer {answer:?}");
                writeln!(
                    prompter.output(),
                    "ERROR: Invalid input. Please enter numeric values."
                )?;
            }
            PromptOutcome::Parameters(params) => match builder.build(&params) {
                Ok(report) => {
                    let out = prompter.output();
                    if args.json {
                        serde_json::to_writer_pretty(&mut *out, &report)?;
                        writeln!(out)?;
                    } else {
                        render_report(out, &report)?;
                    }
                    if let Some(log) = &log {
                        log.record(&report).with_context(|| {
                            format!("Failed to append to {}", log.path().display())
                        })?;
                        if !args.json {
                            writeln!(out, "Prediction saved to {}\n", log.path().display())?;
                        }
                    }
                }
                Err(err) if interactive => {
                    writeln!(prompter.output(), "ERROR: {err}")?;
                }
                Err(err) => return Err(err.into()),
            },
        }

        if !interactive || !prompter.another_round()? {
            break;
        }
    }

    if interactive {
        let out = prompter.output();
        writeln!(out, "\nThank you for using Meteor Impact Predictor!")?;
        writeln!(out, "Stay safe and keep watching the skies!\n")?;
    }
    Ok(())
}

async fn run_collect(config: &Config, args: CollectArgs) -> Result<()> {
    let mut settings = config.collector.clone();
    if let Some(output) = args.output {
        settings.output_path = output;
    }

    let collector = Collector::new(&settings).context("Failed to build HTTP client")?;
    let report = collector.collect(Utc::now().date_naive()).await;

    for source in [FeedSource::Neo, FeedSource::Fireball, FeedSource::Cad] {
        log::info!("{source} objects fetched: {}", report.count(source));
    }
    if !report.failures.is_empty() {
        log::warn!("{} feed requests failed", report.failures.len());
    }

    report
        .write_csv(&settings.output_path)
        .with_context(|| format!("Failed to write {}", settings.output_path.display()))?;
    if let Some(path) = &args.discarded {
        report
            .write_discarded_csv(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!(
        "CSV saved: {} ({} records, {} discarded)",
        settings.output_path.display(),
        report.records.len(),
        report.discarded.len()
    );
    Ok(())
}

fn run_centers(config: &Config) -> Result<()> {
    let centers = load_centers(&config.predictor)?;
    let mut out = io::stdout().lock();
    for center in centers.centers() {
        writeln!(
            out,
            "{:<30} {:>9.4} {:>10.4} {:>12}",
            center.name, center.latitude, center.longitude, center.population
        )?;
    }
    Ok(())
}
