//! Runtime configuration resolved from the command line.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use mcwatch_core::DeathPatternSet;

use crate::cli::Cli;

/// How notifications leave the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Webhook { url: String, timeout: Duration },
    DryRun,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_file: PathBuf,
    pub delivery: Delivery,
    pub poll_interval: Duration,
    pub death_patterns: Option<PathBuf>,
    pub from_start: bool,
}

impl RuntimeConfig {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let delivery = if cli.dry_run {
            Delivery::DryRun
        } else {
            match cli.webhook_url {
                Some(url) if !url.trim().is_empty() => Delivery::Webhook {
                    url: url.trim().to_owned(),
                    timeout: Duration::from_secs(cli.timeout_secs),
                },
                _ => bail!("--webhook-url (or MCWATCH_WEBHOOK_URL) is required unless --dry-run is set"),
            }
        };

        Ok(Self {
            log_file: cli.log_file,
            delivery,
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
            death_patterns: cli.death_patterns,
            from_start: cli.from_start,
        })
    }

    /// Built-in death catalogue plus the optional extra pattern file.
    pub fn load_death_patterns(&self) -> anyhow::Result<DeathPatternSet> {
        let builtin = DeathPatternSet::builtin();
        match &self.death_patterns {
            Some(path) => builtin
                .with_extra_file(path)
                .with_context(|| format!("loading death patterns from {}", path.display())),
            None => Ok(builtin),
        }
    }
}
