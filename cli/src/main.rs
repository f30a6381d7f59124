use std::io;

use agent::{load_sdk_config, run_report, Ec2Provider, ElastiCacheProvider, ReportOptions};
use anyhow::Result;
use clap::Parser;
use colored::*;
use common::{Config, EventFilter, LookbackWindow, DEFAULT_CONFIG_PATH};
use log::info;

/// Report scheduled EC2 instance events and recent ElastiCache events.
#[derive(Parser, Debug)]
#[command(name = "aws-events", version)]
struct Args {
    /// The number of minutes worth of events to retrieve [default: 1440]
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u32).range(..=i32::MAX as i64)
    )]
    duration: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config_path = Config::configured_path();
    let config = Config::load_or_default(config_path.as_deref())?;
    info!("Config loaded from {}", config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));

    let lookback = match args.duration {
        Some(minutes) => LookbackWindow::from_minutes(minutes),
        None => config.lookback(),
    };
    let options = ReportOptions {
        filter: EventFilter::maintenance(),
        lookback,
        name_errors: config.report.name_errors,
    };

    let sdk_config = load_sdk_config(&config.aws.region).await;
    let ec2 = Ec2Provider::new(&sdk_config);
    let elasticache = ElastiCacheProvider::new(&sdk_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_report(&ec2, &elasticache, &options, &mut out).await?;
    Ok(())
}
