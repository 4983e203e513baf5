/*
[INPUT]:  CLI arguments, optional YAML configuration file, environment credentials
[OUTPUT]: JSON on stdout (response envelope, stream messages or generated keys)
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bpx_cli::{CliConfig, Command, commands};

#[derive(Parser, Debug)]
#[command(name = "bpx", version, about = "Backpack exchange API command line client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = load_config(args.config_path.as_ref())?;
    config.apply_env_overrides();

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level(config.debug).to_string());
    init_tracing(&log_level)?;

    info!(
        http_url = %config.client_config().http_url,
        signed = config.credentials().is_some(),
        "starting bpx"
    );

    let client = config.build_client()?;

    match &args.command {
        Command::Stream { streams, count } => {
            let stream = commands::stream(&client, streams, *count, |message| {
                println!("{}", serde_json::to_string(message)?);
                Ok(())
            });
            tokio::select! {
                received = stream => {
                    let received = received?;
                    info!(received, "stream finished");
                }
                signal = tokio::signal::ctrl_c() => {
                    if let Err(err) = signal {
                        warn!(error = %err, "failed to install SIGINT handler");
                    }
                    info!("received SIGINT");
                }
            }
        }
        command => {
            let output = commands::run(command, &client).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("render output")?
            );
        }
    }

    Ok(())
}

fn default_log_level(debug: bool) -> &'static str {
    if debug { "debug" } else { "warn" }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let path_str = path.to_str().context("config path must be valid utf-8")?;
    CliConfig::from_file(path_str).context("load config")
}
