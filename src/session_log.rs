//! Optional plain-text session log.
//!
//! Enabled with `--log-dir`. Each run writes to its own
//! `pairview-<hex>.log` file; the random suffix keeps concurrent sessions
//! from clobbering each other. Write failures are swallowed after the file
//! is open: the log must never take the viewer down.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::Rng;

/// Session log sink; a disabled log ignores every entry.
#[derive(Debug)]
pub struct SessionLog {
    sink: Option<(File, PathBuf)>,
    started: Instant,
}

impl SessionLog {
    /// A log that records nothing.
    pub fn disabled() -> Self {
        Self {
            sink: None,
            started: Instant::now(),
        }
    }

    /// Creates a new log file in `dir`, creating the directory if needed.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let suffix: u32 = rand::rng().random();
        let path = dir.join(format!("pairview-{:08x}.log", suffix));
        let file = File::create(&path)?;
        Ok(Self {
            sink: Some((file, path)),
            started: Instant::now(),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|(_, path)| path.as_path())
    }

    /// Appends one line, prefixed with the seconds elapsed since start.
    pub fn record(&mut self, event: &str, detail: &str) {
        if let Some((file, _)) = self.sink.as_mut() {
            let elapsed = self.started.elapsed().as_secs_f64();
            let _ = writeln!(file, "[{:>9.3}s] {:<8} {}", elapsed, event, detail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_log_has_no_path() {
        let mut log = SessionLog::disabled();
        log.record("submit", "ignored");
        assert!(log.path().is_none());
    }

    #[test]
    fn test_log_file_receives_entries() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = SessionLog::create_in(&dir.path().join("logs")).unwrap();
        log.record("submit", "length=3 mismatches=1");
        log.record("copy", "ARN");

        let path = log.path().unwrap().to_path_buf();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("pairview-"));
        assert!(name.ends_with(".log"));

        drop(log);
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("length=3 mismatches=1"));
        assert!(content.lines().nth(1).unwrap().contains("copy"));
    }
}
