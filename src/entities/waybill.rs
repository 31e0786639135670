//! Waybill entity type - a single shipment's tracking document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::validate::ValidationError;

/// Operational status of a waybill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WaybillStatus {
    #[default]
    Booked,
    InTransit,
    AtHub,
    OutForDelivery,
    Delivered,
}

impl std::fmt::Display for WaybillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaybillStatus::Booked => write!(f, "booked"),
            WaybillStatus::InTransit => write!(f, "in_transit"),
            WaybillStatus::AtHub => write!(f, "at_hub"),
            WaybillStatus::OutForDelivery => write!(f, "out_for_delivery"),
            WaybillStatus::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for WaybillStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(WaybillStatus::Booked),
            "in_transit" => Ok(WaybillStatus::InTransit),
            "at_hub" => Ok(WaybillStatus::AtHub),
            "out_for_delivery" => Ok(WaybillStatus::OutForDelivery),
            "delivered" => Ok(WaybillStatus::Delivered),
            other => Err(format!("unknown waybill status: {other}")),
        }
    }
}

/// A Waybill entity
///
/// The `waybill_number` is the human-facing tracking code. It must come from
/// the partner's issued inventory pool (see `core::links::book_waybill`) -
/// constructors here take it as given and do not touch the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waybill {
    /// Unique identifier
    pub id: EntityId,

    /// Pre-issued tracking number, unique within the partner's pool
    pub waybill_number: String,

    /// Origin city
    pub sender_city: String,

    /// Destination city
    pub receiver_city: String,

    /// Sending company (weak reference)
    pub sender_company: EntityId,

    /// Receiving company (weak reference)
    pub receiver_company: EntityId,

    /// Operational status
    #[serde(default)]
    pub status: WaybillStatus,

    /// Partner (booking office or hub) that created this waybill
    pub partner_code: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Waybill {
    const PREFIX: &'static str = "WB";
    const STORE_KEY: &'static str = "waybills";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.waybill_number
    }

    fn status(&self) -> &str {
        match self.status {
            WaybillStatus::Booked => "booked",
            WaybillStatus::InTransit => "in_transit",
            WaybillStatus::AtHub => "at_hub",
            WaybillStatus::OutForDelivery => "out_for_delivery",
            WaybillStatus::Delivered => "delivered",
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Waybill {
    /// Create a new booked waybill with the given pre-issued number
    pub fn new(
        waybill_number: impl Into<String>,
        sender_city: impl Into<String>,
        receiver_city: impl Into<String>,
        sender_company: EntityId,
        receiver_company: EntityId,
        partner_code: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Wb),
            waybill_number: waybill_number.into(),
            sender_city: sender_city.into(),
            receiver_city: receiver_city.into(),
            sender_company,
            receiver_company,
            status: WaybillStatus::default(),
            partner_code: partner_code.into(),
            created: Utc::now(),
        }
    }

    /// Check schema constraints
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_min("waybill_number", &self.waybill_number, 1)?;
        ValidationError::require_min("sender_city", &self.sender_city, 2)?;
        ValidationError::require_min("receiver_city", &self.receiver_city, 2)?;
        ValidationError::require_min("partner_code", &self.partner_code, 1)?;
        Ok(())
    }
}
