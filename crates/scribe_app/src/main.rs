//! stage-scribe binary entry point.

mod platform;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use platform::{LogDestination, RunOptions};

/// Stage Scribe - transcribe handwriting from staged images with a hosted model
#[derive(Parser, Debug)]
#[command(name = "stage-scribe")]
#[command(version, about = "Browse a Snowflake stage and extract text from its images")]
struct Args {
    /// RON config file (defaults to ./stage_scribe.ron when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8501
    #[arg(short, long)]
    bind: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    log: LogDestination,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,
}

impl From<&Args> for RunOptions {
    fn from(args: &Args) -> Self {
        RunOptions {
            config_path: args.config.clone(),
            bind: args.bind.clone(),
            log_destination: args.log,
            log_level: if args.debug {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    platform::run_app(RunOptions::from(&args)).await
}
