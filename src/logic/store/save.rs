use std::path::Path;

use super::{MixStore, StoreError};

impl MixStore {
    /// The listing as pretty-printed JSON, in mix order.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.items).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Write the listing to a file on disk.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        std::fs::write(path, self.to_json()?).map_err(|e| StoreError::Io(e.to_string()))
    }
}
