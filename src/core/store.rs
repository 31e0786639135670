//! Generic entity store - durable collection CRUD
//!
//! One store per entity type, each backed by a single JSON record (an ordered
//! array of entities) under a fixed storage key. The in-memory collection is
//! the source of truth for the session: every mutation is applied in memory
//! first and then written through; a failed write surfaces as
//! `StoreError::Persist` but never rolls the mutation back.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Errors from the durable layer
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error for record '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize record '{key}': {message}")]
    Serialize { key: String, message: String },
}

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The in-memory mutation was applied but could not be written through.
    /// Durability is at risk for the session; the caller should warn, not abort.
    #[error("Persistence failed (in-memory state kept): {0}")]
    Persist(#[from] PersistError),
}

/// Durable record access, keyed by a fixed storage identifier per collection
pub trait StorageBackend {
    /// Read the record, `Ok(None)` when it does not exist yet
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write (create or replace) the record
    fn write(&self, key: &str, contents: &str) -> Result<(), PersistError>;
}

/// Production backend: one `<key>.json` file per collection under a data dir
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(|e| PersistError::Io {
            key: key.to_string(),
            source: e,
        })
    }

    fn write(&self, key: &str, contents: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir).map_err(|e| PersistError::Io {
            key: key.to_string(),
            source: e,
        })?;
        fs::write(self.record_path(key), contents).map_err(|e| PersistError::Io {
            key: key.to_string(),
            source: e,
        })
    }
}

/// A type-homogeneous entity collection with write-through persistence
pub struct Store<T: Entity> {
    items: Vec<T>,
    backend: Box<dyn StorageBackend>,
    load_warning: Option<String>,
}

impl<T: Entity> Store<T> {
    /// Open the store, reading the persisted collection.
    ///
    /// An absent record means a fresh collection. A malformed or unreadable
    /// record also yields an empty collection, with the problem reported via
    /// `load_warning()` rather than an error - opening never fails.
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let mut load_warning = None;
        let items = match backend.read(T::STORE_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(contents)) => match serde_json::from_str::<Vec<T>>(&contents) {
                Ok(items) => items,
                Err(e) => {
                    load_warning = Some(format!(
                        "Record '{}' is malformed, starting empty: {e}",
                        T::STORE_KEY
                    ));
                    Vec::new()
                }
            },
            Err(e) => {
                load_warning = Some(format!("Could not read record '{}': {e}", T::STORE_KEY));
                Vec::new()
            }
        };
        Self {
            items,
            backend,
            load_warning,
        }
    }

    /// Open a store backed by `<dir>/<key>.json` files
    pub fn open_dir(dir: impl AsRef<Path>) -> Self {
        Self::open(Box::new(JsonFileBackend::new(dir.as_ref())))
    }

    /// Warning from the last `open`, if the persisted record was unusable
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Add an entity; new entities sort first
    pub fn add(&mut self, entity: T) -> Result<(), StoreError> {
        self.items.insert(0, entity);
        self.persist()
    }

    /// Replace the entity with a matching id; silent no-op when absent
    pub fn update(&mut self, entity: T) -> Result<(), StoreError> {
        let Some(slot) = self.items.iter_mut().find(|e| e.id() == entity.id()) else {
            return Ok(());
        };
        *slot = entity;
        self.persist()
    }

    /// Remove the entity with the given id; returns whether anything was removed
    pub fn remove(&mut self, id: &EntityId) -> Result<bool, StoreError> {
        let before = self.items.len();
        self.items.retain(|e| e.id() != id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Look up an entity by id
    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Iterate over the collection in store order (newest first)
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serialize the collection as it would be persisted (used by backup export)
    pub fn snapshot(&self) -> Result<serde_json::Value, PersistError> {
        serde_json::to_value(&self.items).map_err(|e| PersistError::Serialize {
            key: T::STORE_KEY.to_string(),
            message: e.to_string(),
        })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string_pretty(&self.items).map_err(|e| PersistError::Serialize {
                key: T::STORE_KEY.to_string(),
                message: e.to_string(),
            })?;
        self.backend.write(T::STORE_KEY, &contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::vehicle::{Vehicle, VehicleType};
    use tempfile::tempdir;

    fn sample(number: &str) -> Vehicle {
        Vehicle::new(number, "Driver", "Route", 100.0, VehicleType::Personal)
    }

    #[test]
    fn test_open_missing_record_is_empty_without_warning() {
        let tmp = tempdir().unwrap();
        let store: Store<Vehicle> = Store::open_dir(tmp.path());
        assert!(store.is_empty());
        assert!(store.load_warning().is_none());
    }

    #[test]
    fn test_open_malformed_record_is_empty_with_warning() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("vehicles.json"), "{not json").unwrap();
        let store: Store<Vehicle> = Store::open_dir(tmp.path());
        assert!(store.is_empty());
        assert!(store.load_warning().unwrap().contains("vehicles"));
    }

    #[test]
    fn test_open_non_array_record_is_empty_with_warning() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("vehicles.json"), "{\"a\": 1}").unwrap();
        let store: Store<Vehicle> = Store::open_dir(tmp.path());
        assert!(store.is_empty());
        assert!(store.load_warning().is_some());
    }

    #[test]
    fn test_add_persists_and_new_entities_sort_first() {
        let tmp = tempdir().unwrap();
        {
            let mut store: Store<Vehicle> = Store::open_dir(tmp.path());
            store.add(sample("MH12AA0001")).unwrap();
            store.add(sample("MH12AA0002")).unwrap();
        }
        let reopened: Store<Vehicle> = Store::open_dir(tmp.path());
        assert_eq!(reopened.len(), 2);
        let numbers: Vec<_> = reopened.iter().map(|v| v.vehicle_number.as_str()).collect();
        assert_eq!(numbers, vec!["MH12AA0002", "MH12AA0001"]);
    }

    #[test]
    fn test_roundtrip_preserves_field_values() {
        let tmp = tempdir().unwrap();
        let vehicle = sample("MH12AA0001");
        let id = vehicle.id.clone();
        {
            let mut store: Store<Vehicle> = Store::open_dir(tmp.path());
            store.add(vehicle).unwrap();
        }
        let reopened: Store<Vehicle> = Store::open_dir(tmp.path());
        let loaded = reopened.get(&id).unwrap();
        assert_eq!(loaded.driver_name, "Driver");
        assert_eq!(loaded.route_price, 100.0);
    }

    #[test]
    fn test_update_replaces_by_id() {
        let tmp = tempdir().unwrap();
        let mut store: Store<Vehicle> = Store::open_dir(tmp.path());
        let mut vehicle = sample("MH12AA0001");
        let id = vehicle.id.clone();
        store.add(vehicle.clone()).unwrap();

        vehicle.route_price = 250.0;
        store.update(vehicle).unwrap();
        assert_eq!(store.get(&id).unwrap().route_price, 250.0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_unknown_id_is_silent_noop() {
        let tmp = tempdir().unwrap();
        let mut store: Store<Vehicle> = Store::open_dir(tmp.path());
        store.add(sample("MH12AA0001")).unwrap();
        store.update(sample("MH12AA0099")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.iter().next().unwrap().vehicle_number, "MH12AA0001");
    }

    #[test]
    fn test_remove_reports_outcome() {
        let tmp = tempdir().unwrap();
        let mut store: Store<Vehicle> = Store::open_dir(tmp.path());
        let vehicle = sample("MH12AA0001");
        let id = vehicle.id.clone();
        store.add(vehicle).unwrap();

        assert!(store.remove(&id).unwrap());
        assert!(!store.remove(&id).unwrap());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        struct FailingBackend;
        impl StorageBackend for FailingBackend {
            fn read(&self, _key: &str) -> Result<Option<String>, PersistError> {
                Ok(None)
            }
            fn write(&self, key: &str, _contents: &str) -> Result<(), PersistError> {
                Err(PersistError::Io {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                })
            }
        }

        let mut store: Store<Vehicle> = Store::open(Box::new(FailingBackend));
        let vehicle = sample("MH12AA0001");
        let id = vehicle.id.clone();
        let result = store.add(vehicle);
        assert!(matches!(result, Err(StoreError::Persist(_))));
        // The mutation stands; memory is authoritative for the session
        assert!(store.get(&id).is_some());
    }
}
