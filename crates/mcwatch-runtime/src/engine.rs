//! Engine loop: wires log source → classifier/tracker → notifier.
//! One line is fully processed, notifications included, before the next
//! line is read, so events reach the tracker in strict log order.

use anyhow::Context;
use mcwatch_core::SessionTracker;
use mcwatch_notify::{Notifier, StdoutNotifier, WebhookNotifier};
use mcwatch_source_log::{LineSource, LogFileWatcher, LogTail, SourceError};
use tracing::{debug, error, info, warn};

use crate::config::{Delivery, RuntimeConfig};

/// Strip, classify and apply a single raw line.
pub fn process_line(line: &str, tracker: &mut SessionTracker) -> Vec<String> {
    debug!(line, "log line");
    tracker.handle_line(line)
}

/// Run until the source fails. Delivery failures are logged and skipped;
/// the tracker state never depends on them.
pub async fn run_engine<S, N>(
    source: &mut S,
    notifier: &N,
    tracker: &mut SessionTracker,
) -> Result<(), SourceError>
where
    S: LineSource,
    N: Notifier,
{
    loop {
        let line = source.next_line().await?;
        for message in process_line(&line, tracker) {
            match notifier.send(&message).await {
                Ok(()) => info!(message = %message, "notification sent"),
                Err(e) => warn!(message = %message, error = %e, "notification delivery failed"),
            }
        }
    }
}

/// Open the log, build the notifier, and run until a shutdown signal or a
/// fatal source error.
pub async fn run(config: RuntimeConfig) -> anyhow::Result<()> {
    let deaths = config.load_death_patterns()?;
    let death_pattern_count = deaths.len();
    let mut tracker = SessionTracker::new(deaths);

    let watcher = if config.from_start {
        LogFileWatcher::new_from_start(config.log_file.clone())
    } else {
        LogFileWatcher::new(config.log_file.clone())
    }
    .context("cannot attach to server log")?;
    let mut source = LogTail::from_watcher(watcher, config.poll_interval);

    info!(
        path = %source.watcher().path().display(),
        death_patterns = death_pattern_count,
        dry_run = matches!(config.delivery, Delivery::DryRun),
        "following server log"
    );

    match &config.delivery {
        Delivery::Webhook { url, timeout } => {
            let notifier = WebhookNotifier::new(url.clone(), *timeout)
                .context("cannot build webhook client")?;
            serve(&mut source, &notifier, &mut tracker).await
        }
        Delivery::DryRun => serve(&mut source, &StdoutNotifier, &mut tracker).await,
    }
}

async fn serve<S, N>(source: &mut S, notifier: &N, tracker: &mut SessionTracker) -> anyhow::Result<()>
where
    S: LineSource,
    N: Notifier,
{
    tokio::select! {
        result = run_engine(source, notifier, tracker) => {
            if let Err(e) = result {
                error!(error = %e, "log source failed, stopping");
                return Err(e.into());
            }
            Ok(())
        }
        signal = shutdown_signal() => {
            signal.context("cannot listen for shutdown signals")?;
            info!("mcwatch stopped");
            Ok(())
        }
    }
}

/// Resolves on ctrl-c or SIGTERM.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("received ctrl-c, shutting down");
            }
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("received ctrl-c, shutting down");
        Ok(())
    }
}
