//! Line-at-a-time async source over a followed log file.

use std::collections::VecDeque;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SourceError;
use crate::watcher::LogFileWatcher;

/// A stream of decoded log lines that waits for new data instead of ending.
pub trait LineSource {
    /// Next line, without its line ending. An error means the source can
    /// no longer make progress.
    fn next_line(&mut self) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Polls a [`LogFileWatcher`] and hands out lines one at a time, sleeping
/// `poll_interval` whenever the file has nothing new.
#[derive(Debug)]
pub struct LogTail {
    watcher: LogFileWatcher,
    pending: VecDeque<String>,
    poll_interval: Duration,
}

impl LogTail {
    /// Attach at end of file.
    pub fn open(path: PathBuf, poll_interval: Duration) -> Result<Self, SourceError> {
        Ok(Self::from_watcher(LogFileWatcher::new(path)?, poll_interval))
    }

    pub fn from_watcher(watcher: LogFileWatcher, poll_interval: Duration) -> Self {
        Self {
            watcher,
            pending: VecDeque::new(),
            poll_interval,
        }
    }

    pub fn watcher(&self) -> &LogFileWatcher {
        &self.watcher
    }
}

impl LineSource for LogTail {
    async fn next_line(&mut self) -> Result<String, SourceError> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Ok(line);
            }
            let lines = self.watcher.poll_new_lines()?;
            if lines.is_empty() {
                tokio::time::sleep(self.poll_interval).await;
            } else {
                self.pending.extend(lines);
            }
        }
    }
}
