//! Persisted history of completed password checks.

use crate::config::{project_dirs, HistoryCfg};
use crate::error::{PassprobeError, PassprobeResult};
use chrono::Local;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the history file location.
pub const HISTORY_PATH_ENV: &str = "PASSPROBE_HISTORY_PATH";

const HISTORY_FILE_NAME: &str = "history.json";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One completed check, as it is persisted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub password: String,
    pub score: u8,
    pub time: String,
}

impl HistoryEntry {
    /// Build an entry stamped with the current local wall-clock time.
    pub fn now(password: impl Into<String>, score: u8) -> Self {
        Self {
            password: password.into(),
            score,
            time: Local::now().format(TIME_FORMAT).to_string(),
        }
    }
}

/// JSON-file backed store of recent checks, bounded at write time.
///
/// Entries are kept oldest-first on disk; every append drops the oldest
/// entries beyond `capacity` before persisting, so the file never grows
/// past the configured bound.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Open the store described by `cfg`, reading any existing file. A file
    /// that cannot be parsed is treated as empty rather than fatal.
    pub fn open(cfg: &HistoryCfg) -> Self {
        let path = resolve_path(cfg);
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        "history file {} is unreadable ({err}); starting fresh",
                        path.display()
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            path,
            capacity: cfg.capacity.max(1),
            entries,
        }
    }

    /// Store rooted at an explicit path, bypassing resolution.
    pub fn at_path(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let cfg = HistoryCfg {
            capacity,
            path: Some(path.into()),
        };
        Self::open(&cfg)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append one entry and persist. Oldest entries beyond capacity are
    /// dropped before the write.
    pub fn append(&mut self, entry: HistoryEntry) -> PassprobeResult<()> {
        self.entries.push(entry);
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        self.persist()
    }

    /// Up to `n` entries, most recent first.
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.entries.iter().rev().take(n).cloned().collect()
    }

    fn persist(&self) -> PassprobeResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let rendered = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| PassprobeError::History(err.to_string()))?;
        fs::write(&self.path, rendered)?;
        Ok(())
    }
}

/// Effective history file location: explicit config path, then the
/// `PASSPROBE_HISTORY_PATH` environment variable, then the per-user data
/// directory.
fn resolve_path(cfg: &HistoryCfg) -> PathBuf {
    if let Some(path) = &cfg.path {
        return path.clone();
    }
    if let Ok(path) = std::env::var(HISTORY_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().join(HISTORY_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(HISTORY_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(password: &str, score: u8, time: &str) -> HistoryEntry {
        HistoryEntry {
            password: password.into(),
            score,
            time: time.into(),
        }
    }

    #[test]
    fn append_persists_and_reloads() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        let mut store = HistoryStore::at_path(&path, 50);
        store
            .append(entry("hunter2", 10, "2026-08-30 09:00:00"))
            .expect("append");
        store
            .append(entry("correct horse", 90, "2026-08-30 09:01:00"))
            .expect("append");

        let reloaded = HistoryStore::at_path(&path, 50);
        assert_eq!(reloaded.len(), 2);
        let recent = reloaded.recent(5);
        assert_eq!(recent[0].password, "correct horse");
        assert_eq!(recent[0].score, 90);
        assert_eq!(recent[1].password, "hunter2");
    }

    #[test]
    fn recent_returns_newest_first_and_limits() {
        let dir = tempdir().expect("tempdir");
        let mut store = HistoryStore::at_path(dir.path().join("history.json"), 50);
        for i in 0..8u8 {
            store
                .append(entry(&format!("pw{i}"), i * 10, "2026-08-30 09:00:00"))
                .expect("append");
        }
        let recent = store.recent(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].password, "pw7");
        assert_eq!(recent[4].password, "pw3");
    }

    #[test]
    fn capacity_is_enforced_at_write_time() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        let mut store = HistoryStore::at_path(&path, 3);
        for i in 0..6u8 {
            store
                .append(entry(&format!("pw{i}"), i, "2026-08-30 09:00:00"))
                .expect("append");
        }
        assert_eq!(store.len(), 3);

        // The bound holds on disk too, not just in memory.
        let reloaded = HistoryStore::at_path(&path, 3);
        let recent = reloaded.recent(10);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].password, "pw5");
        assert_eq!(recent[2].password, "pw3");
    }

    #[test]
    fn corrupt_file_starts_fresh() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").expect("write");
        let mut store = HistoryStore::at_path(&path, 50);
        assert!(store.is_empty());
        store
            .append(entry("fresh", 42, "2026-08-30 09:00:00"))
            .expect("append");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn entry_timestamps_use_wall_clock_format() {
        let entry = HistoryEntry::now("abc", 55);
        // 2026-08-30 09:00:00
        assert_eq!(entry.time.len(), 19);
        assert_eq!(&entry.time[4..5], "-");
        assert_eq!(&entry.time[10..11], " ");
        assert_eq!(&entry.time[13..14], ":");
    }
}
