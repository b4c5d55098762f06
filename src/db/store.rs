use log::error;

use super::error::StoreError;

/// String-keyed, string-valued preference storage.
///
/// Implementations must make a successful `set` visible to the next `get`,
/// including across process restarts for persistent stores.
pub trait PrefStore: Send + Sync {
    /// Reads the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Inserts or replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Retrieves a configuration value, returning `default` when the key is
    /// missing or the store cannot be read.
    fn get_config(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default.to_string(),
            Err(e) => {
                error!("Failed to read config for key '{}': {}", key, e);
                default.to_string()
            }
        }
    }

    /// Writes a configuration value. Failures are logged, not returned.
    fn set_config(&self, key: &str, value: &str) {
        if let Err(e) = self.set(key, value) {
            error!("Failed to set config for key '{}': {}", key, e);
        }
    }

    /// Deletes a configuration value. Failures are logged, not returned.
    fn delete_config(&self, key: &str) {
        if let Err(e) = self.delete(key) {
            error!("Failed to delete config for key '{}': {}", key, e);
        }
    }
}
