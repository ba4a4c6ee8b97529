//! JSON-file backed metric store
//!
//! Keeps the whole key/value map in memory and writes it back on every
//! change. Writes go to a sibling temp file first and are renamed into
//! place, so a crash mid-write leaves the previous file intact.

use super::{MetricStore, StoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key/value store persisted as a flat JSON object of strings
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = Self::load(&path)?;
        tracing::debug!("Opened metric store {:?} with {} keys", path, entries.len());
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoreResult<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        // Values may have been written as bare JSON numbers by hand.
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)?;
        Ok(raw
            .into_iter()
            .map(|(k, v)| {
                let value = match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, value)
            })
            .collect())
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl MetricStore for FileStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.read()?.keys().cloned().collect())
    }

    fn reload(&self) -> StoreResult<()> {
        let fresh = Self::load(&self.path)?;
        *self.entries.write()? = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("metrics.json")).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("metrics.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set_raw("thismonth_earnings", "185000").unwrap();
            store.set_raw("thismonth_leads", "76").unwrap();
            store.remove("thismonth_leads").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.get_raw("thismonth_earnings").unwrap().as_deref(),
            Some("185000")
        );
        assert_eq!(store.get_raw("thismonth_leads").unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_accepts_bare_numbers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        std::fs::write(&path, r#"{"alltime_bookings": 1234, "alltime_earnings": "2547890"}"#)
            .unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_raw("alltime_bookings").unwrap().as_deref(), Some("1234"));
        assert_eq!(
            store.get_raw("alltime_earnings").unwrap().as_deref(),
            Some("2547890")
        );
    }

    #[test]
    fn test_reload_sees_external_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metrics.json");

        let reader = FileStore::open(&path).unwrap();
        let writer = FileStore::open(&path).unwrap();
        writer.set_raw("current_leads", "12").unwrap();

        assert_eq!(reader.get_raw("current_leads").unwrap(), None);
        reader.reload().unwrap();
        assert_eq!(reader.get_raw("current_leads").unwrap().as_deref(), Some("12"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
