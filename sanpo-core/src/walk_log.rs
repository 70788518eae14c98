//! Persistent walk history.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::LOG_DATE_FORMAT;
use crate::error::WalkError;

/// One finished walk as persisted in the key-value store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkLogEntry {
    /// Finish time formatted `YYYY/MM/DD HH:MM`.
    pub date: String,
    pub mood: String,
    pub distance_km: f64,
    pub duration_minutes: u64,
}

impl WalkLogEntry {
    #[must_use]
    pub fn new(finished_at: NaiveDateTime, mood: &str, distance_km: f64, duration_minutes: u64) -> Self {
        Self {
            date: finished_at.format(LOG_DATE_FORMAT).to_string(),
            mood: mood.to_string(),
            distance_km,
            duration_minutes,
        }
    }
}

/// String key-value persistence, e.g. browser `localStorage`.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Appends entries to, and reads them back from, a single store key.
#[derive(Debug, Clone)]
pub struct LogRecorder<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LogRecorder<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Every stored entry in append order. A missing key is an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::Storage`] if the store fails or the stored value
    /// does not decode.
    pub fn load_all(&self) -> Result<Vec<WalkLogEntry>, WalkError> {
        let Some(raw) = self.store.get_item(&self.key).map_err(WalkError::storage)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(WalkError::storage)
    }

    /// Read-modify-write append of one entry.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::Storage`] if the existing log cannot be read or
    /// the updated log cannot be written. Unreadable history is never
    /// overwritten.
    pub fn append_log(&self, entry: WalkLogEntry) -> Result<(), WalkError> {
        let mut logs = self.load_all()?;
        logs.push(entry);
        let raw = serde_json::to_string(&logs).map_err(WalkError::storage)?;
        self.store.set_item(&self.key, &raw).map_err(WalkError::storage)?;
        log::debug!("walk log now holds {} entries", logs.len());
        Ok(())
    }

    /// Up to `n` most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Same as [`LogRecorder::load_all`].
    pub fn list_recent(&self, n: usize) -> Result<Vec<WalkLogEntry>, WalkError> {
        let logs = self.load_all()?;
        Ok(logs.into_iter().rev().take(n).collect())
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::NaiveDate;

    fn entry(minute: u32, mood: &str) -> WalkLogEntry {
        let at = NaiveDate::from_ymd_opt(2024, 5, 3)
            .unwrap()
            .and_hms_opt(7, minute, 0)
            .unwrap();
        WalkLogEntry::new(at, mood, 2.5, u64::from(minute))
    }

    #[test]
    fn entries_serialize_camel_case() {
        let json = serde_json::to_value(entry(5, "city")).unwrap();
        assert_eq!(json["date"], "2024/05/03 07:05");
        assert_eq!(json["distanceKm"], 2.5);
        assert_eq!(json["durationMinutes"], 5);
        assert!(json.get("distance_km").is_none());
    }

    #[test]
    fn missing_key_reads_empty() {
        let recorder = LogRecorder::new(MemoryStore::default(), "walkLogs");
        assert!(recorder.load_all().unwrap().is_empty());
        assert!(recorder.list_recent(5).unwrap().is_empty());
    }

    #[test]
    fn recent_entries_are_newest_first() {
        let recorder = LogRecorder::new(MemoryStore::default(), "walkLogs");
        for minute in 0..7 {
            recorder.append_log(entry(minute, "relax")).unwrap();
        }
        let recent = recorder.list_recent(5).unwrap();
        let minutes: Vec<u64> = recent.iter().map(|e| e.duration_minutes).collect();
        assert_eq!(minutes, [6, 5, 4, 3, 2]);
        assert_eq!(recorder.load_all().unwrap().len(), 7);
        assert_eq!(recorder.list_recent(5).unwrap(), recent);
    }

    #[test]
    fn append_then_latest_is_the_entry() {
        let recorder = LogRecorder::new(MemoryStore::default(), "walkLogs");
        recorder.append_log(entry(1, "city")).unwrap();
        let fresh = entry(2, "adventure");
        recorder.append_log(fresh.clone()).unwrap();
        assert_eq!(recorder.list_recent(1).unwrap(), vec![fresh]);
    }

    #[test]
    fn corrupt_history_is_not_overwritten() {
        let store = MemoryStore::default();
        store.set_item("walkLogs", "{not json").unwrap();
        let recorder = LogRecorder::new(store, "walkLogs");
        assert!(matches!(
            recorder.append_log(entry(1, "city")),
            Err(WalkError::Storage(_))
        ));
        assert_eq!(
            recorder.store().get_item("walkLogs").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn reads_history_written_by_other_clients() {
        let store = MemoryStore::default();
        store
            .set_item(
                "walkLogs",
                r#"[{"date":"2024/01/02 03:04","mood":"relax","distanceKm":3,"durationMinutes":41}]"#,
            )
            .unwrap();
        let recorder = LogRecorder::new(store, "walkLogs");
        let logs = recorder.load_all().unwrap();
        assert_eq!(logs[0].duration_minutes, 41);
        assert!((logs[0].distance_km - 3.0).abs() < f64::EPSILON);
    }
}
