//! Inventory item entity type - a pre-issued, not-yet-used waybill number
//!
//! Partners receive blocks of waybill numbers ahead of time. Booking a waybill
//! consumes exactly one unused item; a consumed number is never reissued.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// An InventoryItem entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier
    pub id: EntityId,

    /// The reserved waybill number
    pub waybill_number: String,

    /// Partner this number is issued to
    pub partner_code: String,

    /// Whether the number has been consumed by a booking
    #[serde(default)]
    pub is_used: bool,

    /// Issuance timestamp
    pub created: DateTime<Utc>,
}

impl Entity for InventoryItem {
    const PREFIX: &'static str = "INV";
    const STORE_KEY: &'static str = "inventory";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.waybill_number
    }

    fn status(&self) -> &str {
        if self.is_used {
            "used"
        } else {
            "available"
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl InventoryItem {
    /// Issue a new unused number to a partner
    pub fn new(waybill_number: impl Into<String>, partner_code: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Inv),
            waybill_number: waybill_number.into(),
            partner_code: partner_code.into(),
            is_used: false,
            created: Utc::now(),
        }
    }
}
