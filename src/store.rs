// src/store.rs
//! Persisted dedup state: CIK → first-notified timestamp, kept as a small
//! human-editable JSON file so operators can back-fill or recover by hand.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// In-memory view of the dedup map. A CIK appears at most once; once
/// recorded it is never overwritten, so `record` on a known key is a no-op.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disclosures {
    entries: BTreeMap<String, String>,
}

impl Disclosures {
    pub fn contains(&self, cik: &str) -> bool {
        self.entries.contains_key(cik)
    }

    pub fn record(&mut self, cik: &str, notified_at: &str) {
        self.entries
            .entry(cik.to_string())
            .or_insert_with(|| notified_at.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct DisclosureStore {
    path: PathBuf,
}

impl DisclosureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty map; anything unreadable or corrupt is a
    /// hard error. Treating corrupt state as empty would re-notify every
    /// known registrant on the next match.
    pub fn load(&self) -> Result<Disclosures, MonitorError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                MonitorError::storage(&self.path, format!("corrupt dedup state: {e}"))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Disclosures::default()),
            Err(e) => Err(MonitorError::storage(&self.path, e)),
        }
    }

    /// Write-to-temp-then-rename so a crash mid-write never leaves a
    /// half-written file behind. BTreeMap keys serialize sorted, so
    /// `save(load())` is byte-stable.
    pub fn save(&self, disclosures: &Disclosures) -> Result<(), MonitorError> {
        let raw = serde_json::to_string_pretty(disclosures)
            .map_err(|e| MonitorError::storage(&self.path, e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, format!("{raw}\n")).map_err(|e| MonitorError::storage(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| MonitorError::storage(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DisclosureStore::new(dir.path().join("disclosures.json"));
        let d = store.load().expect("load");
        assert!(d.is_empty());
    }

    #[test]
    fn record_is_insert_once() {
        let mut d = Disclosures::default();
        d.record("0001112223", "2024-02-13T21:10:00+00:00");
        d.record("0001112223", "2099-01-01T00:00:00+00:00");
        assert_eq!(d.len(), 1);
        assert!(d.contains("0001112223"));
        assert!(!d.contains("0009999999"));
    }

    #[test]
    fn save_load_round_trip_is_byte_stable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DisclosureStore::new(dir.path().join("disclosures.json"));

        let mut d = Disclosures::default();
        d.record("0001112223", "2024-02-13T21:10:00+00:00");
        d.record("0000320193", "2024-02-14T09:00:00+00:00");
        store.save(&d).expect("save");

        let first = fs::read(store.path()).expect("read");
        let loaded = store.load().expect("load");
        assert_eq!(loaded, d);
        store.save(&loaded).expect("save again");
        let second = fs::read(store.path()).expect("read again");
        assert_eq!(first, second);
    }

    #[test]
    fn corrupt_state_is_an_error_not_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("disclosures.json");
        fs::write(&path, "{ definitely not json").expect("write");
        let store = DisclosureStore::new(&path);
        let err = store.load().expect_err("corrupt state must surface");
        assert!(matches!(err, MonitorError::Storage { .. }));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DisclosureStore::new(dir.path().join("disclosures.json"));
        store.save(&Disclosures::default()).expect("save");
        let names: Vec<String> = fs::read_dir(dir.path())
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["disclosures.json".to_string()]);
    }
}
