use log::debug;
use std::path::Path;

use super::{error::StoreError, store::PrefStore};

/// Preference storage persisted to disk with `sled`.
///
/// Every write is flushed before returning so a crash right after a check
/// does not lose the last-check timestamp.
pub struct MainStore {
    db: sled::Db,
}

impl MainStore {
    /// Opens (or creates) the store at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the directory cannot be created or the
    /// database cannot be opened.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(db_path)?;
        debug!("Preference store opened at {:?}", db_path);
        Ok(Self { db })
    }
}

impl PrefStore for MainStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.db.get(key)? {
            Some(bytes) => Ok(Some(String::from_utf8(bytes.to_vec())?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.db.insert(key, value.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.db.remove(key)?;
        self.db.flush()?;
        Ok(())
    }
}
