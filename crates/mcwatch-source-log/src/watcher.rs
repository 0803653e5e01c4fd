//! Seek-position follower for a single log file.
//!
//! Tracks the read offset, buffers partial lines, and detects rotation via
//! inode changes and truncation via the file shrinking under the offset.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::SourceError;

/// Follower for one append-only log file.
#[derive(Debug)]
pub struct LogFileWatcher {
    path: PathBuf,
    /// Current byte offset into the file.
    seek_pos: u64,
    /// Inode number (for rotation detection). Zero when unknown.
    inode: u64,
    /// Bytes of a line not yet terminated at the last poll.
    incomplete: Vec<u8>,
}

impl LogFileWatcher {
    /// Attach at the current end of file; existing content is never replayed.
    pub fn new(path: PathBuf) -> Result<Self, SourceError> {
        let (size, inode) = file_metadata(&path).map_err(|source| SourceError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            seek_pos: size,
            inode,
            incomplete: Vec::new(),
        })
    }

    /// Attach at byte 0 and read the whole file on the first poll.
    pub fn new_from_start(path: PathBuf) -> Result<Self, SourceError> {
        let mut watcher = Self::new(path)?;
        watcher.seek_pos = 0;
        Ok(watcher)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn position(&self) -> u64 {
        self.seek_pos
    }

    /// Complete lines appended since the last poll, without the line ending.
    ///
    /// A missing file (rotation in progress) yields no lines; any other IO
    /// failure is returned.
    pub fn poll_new_lines(&mut self) -> Result<Vec<String>, SourceError> {
        match file_metadata(&self.path) {
            Ok((size, inode)) => {
                if self.inode != 0 && inode != self.inode {
                    info!(path = %self.path.display(), "log file rotated, reading from start");
                    self.reset();
                } else if size < self.seek_pos {
                    info!(path = %self.path.display(), "log file truncated, reading from start");
                    self.reset();
                }
                self.inode = inode;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "log file missing, waiting for it to reappear");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.read_error(source)),
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SourceError::Open {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut reader = BufReader::new(file);
        reader
            .seek(SeekFrom::Start(self.seek_pos))
            .map_err(|e| self.read_error(e))?;

        let mut lines = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| self.read_error(e))?;
            if n == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                let mut line = std::mem::take(&mut self.incomplete);
                line.extend_from_slice(&buf);
                trim_line_ending(&mut line);
                if !line.is_empty() {
                    lines.push(String::from_utf8_lossy(&line).into_owned());
                }
            } else {
                // Partial line at EOF, buffer for next poll
                self.incomplete.extend_from_slice(&buf);
            }
        }

        self.seek_pos = reader.stream_position().map_err(|e| self.read_error(e))?;

        Ok(lines)
    }

    fn reset(&mut self) {
        self.seek_pos = 0;
        self.incomplete.clear();
    }

    fn read_error(&self, source: io::Error) -> SourceError {
        SourceError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

fn trim_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}

/// File size and inode.
fn file_metadata(path: &Path) -> io::Result<(u64, u64)> {
    let meta = fs::metadata(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok((meta.len(), meta.ino()))
    }
    #[cfg(not(unix))]
    {
        Ok((meta.len(), 0))
    }
}
