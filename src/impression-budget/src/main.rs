//! Impression Budget: estimate an advertising budget from historical CPM.
//!
//! Loads the campaign CSV once, then answers budget and option queries
//! against the cached dataset.

mod render;

use std::process::ExitCode;

use budget_cache::DatasetStore;
use budget_core::config::AppConfig;
use budget_core::{Dataset, PlannerError, Selection};
use budget_estimator::BudgetEstimator;
use budget_ingest::SourceLocator;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::render::Options;

#[derive(Parser, Debug)]
#[command(name = "impression-budget")]
#[command(about = "Estimate an advertising budget from historical campaign CPM")]
#[command(version)]
struct Cli {
    /// Campaign CSV location (repeatable; overrides config, tried in order)
    #[arg(
        long = "data",
        global = true,
        env = "IMPRESSION_BUDGET__DATA__PATHS",
        value_delimiter = ','
    )]
    data: Vec<String>,

    /// Minimum country impressions before a country CPM is trusted (overrides config)
    #[arg(long, global = true, env = "IMPRESSION_BUDGET__ESTIMATOR__IMPRESSION_THRESHOLD")]
    threshold: Option<u64>,

    /// Keep only rows with these campaign statuses (repeatable; default keeps all)
    #[arg(long = "status", global = true)]
    statuses: Vec<String>,

    /// Emit logs as JSON
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate total and daily budget for a target impression volume
    Estimate(EstimateArgs),
    /// List selectable platforms, campaign types and countries
    Options(OptionsArgs),
}

#[derive(Args, Debug)]
struct EstimateArgs {
    #[arg(long)]
    platform: String,

    #[arg(long)]
    campaign_type: String,

    /// Country to estimate for; omit or pass "Overall" for all markets
    #[arg(long)]
    country: Option<String>,

    /// Target impressions (defaults to config)
    #[arg(long)]
    target_impressions: Option<u64>,

    /// Flight length in days (defaults to config)
    #[arg(long)]
    flight_days: Option<u32>,

    #[arg(long, default_value = "EUR")]
    currency: String,
}

#[derive(Args, Debug)]
struct OptionsArgs {
    #[arg(long)]
    platform: Option<String>,

    #[arg(long, requires = "platform")]
    campaign_type: Option<String>,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "impression_budget=info,budget_ingest=info,budget_cache=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if !cli.data.is_empty() {
        config.data.paths = cli.data.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.estimator.impression_threshold = threshold;
    }

    info!(
        paths = ?config.data.paths,
        impression_threshold = config.estimator.impression_threshold,
        "Configuration loaded"
    );

    let path = SourceLocator::new(&config.data.paths).locate()?;
    let store = DatasetStore::open(path)?;

    let mut dataset = store.dataset();
    if !cli.statuses.is_empty() {
        let statuses: Vec<&str> = cli.statuses.iter().map(String::as_str).collect();
        dataset = dataset.retain_statuses(&statuses);
        info!(statuses = ?cli.statuses, rows = dataset.len(), "Status filter applied");
    }

    match cli.command {
        Command::Estimate(args) => run_estimate(&config, &dataset, args, cli.json),
        Command::Options(args) => run_options(&dataset, args, cli.json),
    }
}

fn run_estimate(
    config: &AppConfig,
    dataset: &Dataset,
    args: EstimateArgs,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let estimator = BudgetEstimator::from_config(&config.estimator);
    let selection = Selection::new(args.platform, args.campaign_type, args.country.as_deref());
    let target = args
        .target_impressions
        .unwrap_or(config.estimator.default_target_impressions);
    let flight_days = args
        .flight_days
        .unwrap_or(config.estimator.default_flight_days);

    match estimator.estimate(dataset, &selection, target, flight_days) {
        Ok(estimate) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                print!("{}", render::estimate_text(&estimate, &args.currency));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if !e.is_fatal() => advisory(&e),
        Err(e) => Err(e.into()),
    }
}

fn run_options(dataset: &Dataset, args: OptionsArgs, json: bool) -> anyhow::Result<ExitCode> {
    let mut options = Options {
        platforms: dataset.platforms(),
        ..Options::default()
    };
    if let Some(platform) = &args.platform {
        options.campaign_types = Some(dataset.campaign_types(platform));
        if let Some(campaign_type) = &args.campaign_type {
            options.countries = Some(dataset.countries(platform, campaign_type));
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print!("{}", render::options_text(&options));
    }
    Ok(ExitCode::SUCCESS)
}

/// Per-selection problems are reported without failing the session.
fn advisory(err: &PlannerError) -> anyhow::Result<ExitCode> {
    let message = match err {
        PlannerError::EmptySegment { .. } => {
            "No data for the selected Platform × Campaign type.".to_string()
        }
        PlannerError::UndefinedCpm { .. } => "Unable to compute CPM for this segment.".to_string(),
        other => other.to_string(),
    };
    warn!(error = %err, "Estimate not available");
    eprintln!("warning: {message}");
    Ok(ExitCode::from(2))
}
