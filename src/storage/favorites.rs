//! The favorites set: ordered, unique by drink id, persisted as a JSON array
//! of full records under [`FAVORITES_KEY`].

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError, StorageResult, FAVORITES_KEY};
use crate::catalog::record::DrinkRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    records: Vec<DrinkRecord>,
}

impl Favorites {
    /// Load the persisted set. A missing key is an empty set; so is a blob
    /// that no longer parses, which is logged and left for the next write to
    /// replace. Duplicate ids keep their first occurrence.
    pub fn load(store: &dyn KeyValueStore) -> StorageResult<Self> {
        let Some(raw) = store.get(FAVORITES_KEY)? else {
            return Ok(Self::default());
        };

        let records: Vec<DrinkRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Persisted favorites are unreadable, starting empty");
                return Ok(Self::default());
            }
        };

        let mut favorites = Self::default();
        for record in records {
            if !favorites.insert(record) {
                debug!("Dropped duplicate favorite while loading");
            }
        }
        Ok(favorites)
    }

    /// Write the full set, replacing whatever was stored before.
    pub fn persist(&self, store: &dyn KeyValueStore) -> StorageResult<()> {
        let encoded = serde_json::to_string(&self.records).map_err(|source| StorageError::Encode {
            key: FAVORITES_KEY.to_string(),
            source,
        })?;
        store.set(FAVORITES_KEY, &encoded)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&DrinkRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[DrinkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append `record` unless its id is already present.
    pub fn insert(&mut self, record: DrinkRecord) -> bool {
        if self.contains(&record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Remove by id, returning the former position and record.
    pub fn remove(&mut self, id: &str) -> Option<(usize, DrinkRecord)> {
        let index = self.position(id)?;
        Some((index, self.records.remove(index)))
    }

    /// Put a removed record back where it was.
    pub fn restore(&mut self, index: usize, record: DrinkRecord) {
        if !self.contains(&record.id) {
            let index = index.min(self.records.len());
            self.records.insert(index, record);
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}
