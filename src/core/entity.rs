//! Entity trait - common interface for all entity types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityId;

/// Common trait for all FDT entities
pub trait Entity: Serialize + DeserializeOwned {
    /// The entity type prefix (e.g., "WB", "MF")
    const PREFIX: &'static str;

    /// Fixed storage identifier for the entity's collection (e.g., "waybills")
    const STORE_KEY: &'static str;

    /// Get the entity's unique ID
    fn id(&self) -> &EntityId;

    /// Get a short human-facing label (waybill number, manifest number, ...)
    fn label(&self) -> &str;

    /// Get the entity's status, for display
    fn status(&self) -> &str;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;
}
