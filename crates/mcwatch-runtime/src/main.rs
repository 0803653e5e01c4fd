//! mcwatch: follows a Minecraft server log and posts joins, leaves,
//! deaths and server lifecycle messages to a chat webhook.

use clap::Parser;

mod cli;
mod config;
mod engine;

/// Filter used by `--verbose` when no env override is present.
const VERBOSE_FILTER: &str =
    "info,mcwatch=debug,mcwatch_core=debug,mcwatch_source_log=debug,mcwatch_notify=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let filter = std::env::var("MCWATCH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| {
            if args.verbose {
                VERBOSE_FILTER.to_string()
            } else {
                "info".to_string()
            }
        });
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = config::RuntimeConfig::from_cli(args)?;
    tracing::info!("mcwatch starting");
    engine::run(config).await
}
