//! CLI definition using clap derive.

use std::path::PathBuf;

use clap::Parser;

/// Where the server writes its log unless told otherwise.
pub const DEFAULT_LOG_FILE: &str = "/home/minecraft/mc/logs/latest.log";

#[derive(Debug, Parser)]
#[command(
    name = "mcwatch",
    about = "Follow a Minecraft server log and post player activity to a chat webhook",
    version
)]
pub struct Cli {
    /// Server log file to follow
    #[arg(long, env = "MCWATCH_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Chat webhook endpoint (required unless --dry-run)
    #[arg(long, env = "MCWATCH_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Debug logging, including every raw log line read
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print notifications to stdout instead of posting them
    #[arg(long)]
    pub dry_run: bool,

    /// Sleep between polls when the log has no new data, in milliseconds
    #[arg(long, default_value_t = 250, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_ms: u64,

    /// Per-request webhook timeout, in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// TOML file with extra death patterns (`patterns = ["..."]`)
    #[arg(long, env = "MCWATCH_DEATH_PATTERNS")]
    pub death_patterns: Option<PathBuf>,

    /// Read the log from the beginning instead of attaching at the end
    #[arg(long)]
    pub from_start: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "mcwatch",
            "--log-file",
            "/tmp/latest.log",
            "--webhook-url",
            "https://chat.example/hook",
            "-v",
            "--poll-interval-ms",
            "100",
        ])
        .expect("test");
        assert_eq!(cli.log_file, PathBuf::from("/tmp/latest.log"));
        assert_eq!(cli.webhook_url.as_deref(), Some("https://chat.example/hook"));
        assert!(cli.verbose);
        assert!(!cli.dry_run);
        assert_eq!(cli.poll_interval_ms, 100);
        assert_eq!(cli.timeout_secs, 10);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(Cli::try_parse_from(["mcwatch", "--dry-run", "--poll-interval-ms", "0"]).is_err());
    }
}
