//! Cache storage trait and SQLite implementation.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;

use super::traits::{CacheKind, CachedRecord};

/// Trait for cache storage backends.
///
/// Corrupt or missing records surface as `None`; a bad row must never take
/// the caller down.
pub trait CacheStorage: Send + Sync {
  /// Load the record for a kind, if one exists and parses.
  fn load<T: DeserializeOwned>(&self, kind: CacheKind) -> Result<Option<CachedRecord<T>>>;

  /// Overwrite the record for a kind unconditionally.
  fn save<T: Serialize>(&self, kind: CacheKind, record: &CachedRecord<T>) -> Result<()>;
}

/// SQLite-based cache storage.
pub struct SqliteStorage {
  conn: Mutex<Connection>,
}

/// Schema for the cache table. One row per record kind, last value wins.
const CACHE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS weather_cache (
    kind TEXT PRIMARY KEY,
    data BLOB NOT NULL,
    fetched_at INTEGER NOT NULL
);
"#;

impl SqliteStorage {
  /// Open the cache database at the default location.
  pub fn open() -> Result<Self> {
    Self::open_at(&Self::default_path()?)
  }

  /// Open the cache database at an explicit path.
  pub fn open_at(path: &Path) -> Result<Self> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create cache directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open cache database at {}: {}", path.display(), e))?;

    conn
      .execute_batch(CACHE_SCHEMA)
      .map_err(|e| eyre!("Failed to run cache migrations: {}", e))?;

    Ok(Self {
      conn: Mutex::new(conn),
    })
  }

  /// Get the default database path.
  fn default_path() -> Result<std::path::PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("windsock").join("cache.db"))
  }
}

impl CacheStorage for SqliteStorage {
  fn load<T: DeserializeOwned>(&self, kind: CacheKind) -> Result<Option<CachedRecord<T>>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let row: Option<(Vec<u8>, i64)> = conn
      .query_row(
        "SELECT data, fetched_at FROM weather_cache WHERE kind = ?",
        params![kind.key()],
        |row| Ok((row.get(0)?, row.get(1)?)),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read cache record: {}", e))?;

    let Some((data, fetched_at)) = row else {
      return Ok(None);
    };

    match serde_json::from_slice(&data) {
      Ok(payload) => Ok(Some(CachedRecord::new(payload, fetched_at))),
      Err(e) => {
        // Unparsable rows are treated as a cache miss
        warn!(kind = kind.key(), error = %e, "Discarding corrupt cache record");
        Ok(None)
      }
    }
  }

  fn save<T: Serialize>(&self, kind: CacheKind, record: &CachedRecord<T>) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let data = serde_json::to_vec(&record.data)
      .map_err(|e| eyre!("Failed to serialize cache record: {}", e))?;

    conn
      .execute(
        "INSERT OR REPLACE INTO weather_cache (kind, data, fetched_at) VALUES (?, ?, ?)",
        params![kind.key(), data, record.fetched_at],
      )
      .map_err(|e| eyre!("Failed to store cache record: {}", e))?;

    Ok(())
  }
}

/// In-memory storage backend used by the policy tests.
#[cfg(test)]
pub struct MemoryStorage {
  records: Mutex<std::collections::HashMap<&'static str, (serde_json::Value, i64)>>,
}

#[cfg(test)]
impl MemoryStorage {
  pub fn new() -> Self {
    Self {
      records: Mutex::new(std::collections::HashMap::new()),
    }
  }

  /// Number of records currently held, across kinds.
  pub fn len(&self) -> usize {
    self.records.lock().expect("lock").len()
  }
}

#[cfg(test)]
impl CacheStorage for MemoryStorage {
  fn load<T: DeserializeOwned>(&self, kind: CacheKind) -> Result<Option<CachedRecord<T>>> {
    let records = self.records.lock().expect("lock");
    Ok(records.get(kind.key()).and_then(|(value, fetched_at)| {
      serde_json::from_value(value.clone())
        .ok()
        .map(|data| CachedRecord::new(data, *fetched_at))
    }))
  }

  fn save<T: Serialize>(&self, kind: CacheKind, record: &CachedRecord<T>) -> Result<()> {
    let value = serde_json::to_value(&record.data)?;
    self
      .records
      .lock()
      .expect("lock")
      .insert(kind.key(), (value, record.fetched_at));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;

  #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
  struct Sample {
    value: f64,
  }

  fn temp_storage() -> (tempfile::TempDir, SqliteStorage) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = SqliteStorage::open_at(&dir.path().join("cache.db")).expect("open");
    (dir, storage)
  }

  #[test]
  fn missing_record_loads_as_none() {
    let (_dir, storage) = temp_storage();
    let loaded: Option<CachedRecord<Sample>> =
      storage.load(CacheKind::CurrentConditions).expect("load");
    assert!(loaded.is_none());
  }

  #[test]
  fn save_then_load_round_trips() {
    let (_dir, storage) = temp_storage();
    let record = CachedRecord::new(Sample { value: 11.2 }, 1_700_000_000_000);

    storage
      .save(CacheKind::CurrentConditions, &record)
      .expect("save");
    let loaded: CachedRecord<Sample> = storage
      .load(CacheKind::CurrentConditions)
      .expect("load")
      .expect("present");

    assert_eq!(loaded.data, record.data);
    assert_eq!(loaded.fetched_at, record.fetched_at);
  }

  #[test]
  fn save_overwrites_in_place() {
    let (_dir, storage) = temp_storage();
    storage
      .save(
        CacheKind::CurrentConditions,
        &CachedRecord::new(Sample { value: 1.0 }, 100),
      )
      .expect("save");
    storage
      .save(
        CacheKind::CurrentConditions,
        &CachedRecord::new(Sample { value: 2.0 }, 200),
      )
      .expect("save");

    let loaded: CachedRecord<Sample> = storage
      .load(CacheKind::CurrentConditions)
      .expect("load")
      .expect("present");
    assert_eq!(loaded.data.value, 2.0);
    assert_eq!(loaded.fetched_at, 200);
  }

  #[test]
  fn kinds_do_not_collide() {
    let (_dir, storage) = temp_storage();
    storage
      .save(
        CacheKind::CurrentConditions,
        &CachedRecord::new(Sample { value: 1.0 }, 100),
      )
      .expect("save");

    let other: Option<CachedRecord<Sample>> =
      storage.load(CacheKind::HourlyForecast).expect("load");
    assert!(other.is_none());
  }

  #[test]
  fn corrupt_record_loads_as_none() {
    let (_dir, storage) = temp_storage();
    {
      let conn = storage.conn.lock().expect("lock");
      conn
        .execute(
          "INSERT INTO weather_cache (kind, data, fetched_at) VALUES (?, ?, ?)",
          params![CacheKind::CurrentConditions.key(), b"not json".to_vec(), 100],
        )
        .expect("insert");
    }

    let loaded: Option<CachedRecord<Sample>> =
      storage.load(CacheKind::CurrentConditions).expect("load");
    assert!(loaded.is_none());
  }
}
