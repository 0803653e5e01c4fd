//! mcwatch-source-log: follows the server's append-only log file.
//! Tracks a seek position, buffers partial lines, and survives rotation
//! and truncation. No classification happens here, pure IO boundary.

pub mod error;
pub mod source;
pub mod watcher;

pub use error::SourceError;
pub use source::{LineSource, LogTail};
pub use watcher::LogFileWatcher;
