use std::collections::HashSet;
use std::path::Path;

use super::{new_id, MixItem, MixStore, StoreError};
use crate::{debug_info, debug_warn};

impl MixStore {
    /// Parse a JSON listing of `{id, text, selected}` records.
    ///
    /// Texts are trimmed, blank texts are skipped and only the first of each
    /// duplicate text is kept, so a hand-edited listing cannot break the
    /// uniqueness of the mix. Missing or blank ids are regenerated.
    pub fn from_json(input: &str) -> Result<MixStore, StoreError> {
        let records: Vec<MixItem> =
            serde_json::from_str(input).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(records.len());
        for mut record in records {
            let text = record.text.trim();
            if text.is_empty() {
                continue;
            }
            if !seen.insert(text.to_string()) {
                debug_warn!("store", "dropping duplicate listing entry: {}", text);
                continue;
            }
            record.text = text.to_string();
            if record.id.trim().is_empty() {
                record.id = new_id();
            }
            items.push(record);
        }

        debug_info!("store", "loaded {} item(s)", items.len());
        Ok(MixStore { items })
    }

    /// Read a listing written by [`MixStore::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MixStore, StoreError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| StoreError::Io(e.to_string()))?;
        Self::from_json(&content)
    }
}
