//! Manifest entity type - a batch of waybills grouped for one vehicle trip
//!
//! A manifest holds weak references to its waybills (`waybill_ids`); it does
//! not own them. Resolution happens at read time and tolerates dangling ids
//! (see `core::links`). Status transitions go through `core::lifecycle`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// Manifest lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ManifestStatus {
    #[default]
    Draft,
    Dispatched,
    Received,
    ShortReceived,
}

impl std::fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestStatus::Draft => write!(f, "draft"),
            ManifestStatus::Dispatched => write!(f, "dispatched"),
            ManifestStatus::Received => write!(f, "received"),
            ManifestStatus::ShortReceived => write!(f, "short_received"),
        }
    }
}

/// Where a manifest was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ManifestOrigin {
    #[default]
    Booking,
    Hub,
}

impl std::fmt::Display for ManifestOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestOrigin::Booking => write!(f, "booking"),
            ManifestOrigin::Hub => write!(f, "hub"),
        }
    }
}

/// A Manifest entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Unique identifier
    pub id: EntityId,

    /// Human-facing manifest number
    pub manifest_no: String,

    /// Trip date
    pub date: NaiveDate,

    /// Vehicle registration number; required before dispatch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_no: Option<String>,

    /// Driver name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,

    /// Driver phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_phone: Option<String>,

    /// Ordered waybill references, duplicate-free (weak, resolved at read time)
    #[serde(default)]
    pub waybill_ids: Vec<EntityId>,

    /// Lifecycle status
    #[serde(default)]
    pub status: ManifestStatus,

    /// Where this manifest originates
    #[serde(default)]
    pub origin: ManifestOrigin,

    /// Partner that created the manifest
    pub creator_partner_code: String,

    /// Waybills scanned/verified at receipt; always a subset of `waybill_ids`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verified_box_ids: Vec<EntityId>,

    /// Destination city -> pallet number, attached at dispatch
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pallet_assignments: BTreeMap<String, u32>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Manifest {
    const PREFIX: &'static str = "MF";
    const STORE_KEY: &'static str = "manifests";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.manifest_no
    }

    fn status(&self) -> &str {
        match self.status {
            ManifestStatus::Draft => "draft",
            ManifestStatus::Dispatched => "dispatched",
            ManifestStatus::Received => "received",
            ManifestStatus::ShortReceived => "short_received",
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Manifest {
    /// Create a new draft manifest
    pub fn new(
        manifest_no: impl Into<String>,
        date: NaiveDate,
        origin: ManifestOrigin,
        creator_partner_code: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Mf),
            manifest_no: manifest_no.into(),
            date,
            vehicle_no: None,
            driver_name: None,
            driver_phone: None,
            waybill_ids: Vec::new(),
            status: ManifestStatus::default(),
            origin,
            creator_partner_code: creator_partner_code.into(),
            verified_box_ids: Vec::new(),
            pallet_assignments: BTreeMap::new(),
            created: Utc::now(),
        }
    }

    /// Attach a waybill reference; returns false if already present.
    /// Status rules live in `core::lifecycle` - workflow code goes through
    /// `LifecycleEngine::attach_waybill`.
    pub fn add_waybill(&mut self, id: EntityId) -> bool {
        if self.waybill_ids.contains(&id) {
            return false;
        }
        self.waybill_ids.push(id);
        true
    }

    /// Whether the given waybill id is on this manifest
    pub fn contains_waybill(&self, id: &EntityId) -> bool {
        self.waybill_ids.contains(id)
    }

    /// Waybill ids on the manifest that were not verified at receipt
    pub fn missing_box_ids(&self) -> Vec<&EntityId> {
        self.waybill_ids
            .iter()
            .filter(|id| !self.verified_box_ids.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Manifest {
        Manifest::new(
            "MF-0042",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            ManifestOrigin::Booking,
            "BKG01",
        )
    }

    #[test]
    fn test_manifest_starts_draft_and_empty() {
        let mf = sample();
        assert_eq!(mf.status, ManifestStatus::Draft);
        assert!(mf.waybill_ids.is_empty());
        assert!(mf.verified_box_ids.is_empty());
        assert!(mf.pallet_assignments.is_empty());
    }

    #[test]
    fn test_add_waybill_rejects_duplicates() {
        let mut mf = sample();
        let wb = EntityId::new(EntityPrefix::Wb);
        assert!(mf.add_waybill(wb.clone()));
        assert!(!mf.add_waybill(wb.clone()));
        assert_eq!(mf.waybill_ids.len(), 1);
        assert!(mf.contains_waybill(&wb));
    }

    #[test]
    fn test_missing_box_ids() {
        let mut mf = sample();
        let a = EntityId::new(EntityPrefix::Wb);
        let b = EntityId::new(EntityPrefix::Wb);
        mf.add_waybill(a.clone());
        mf.add_waybill(b.clone());
        mf.verified_box_ids.push(a);
        let missing = mf.missing_box_ids();
        assert_eq!(missing, vec![&b]);
    }

    #[test]
    fn test_manifest_roundtrip() {
        let mut mf = sample();
        mf.vehicle_no = Some("MH12AB1234".to_string());
        mf.add_waybill(EntityId::new(EntityPrefix::Wb));
        mf.pallet_assignments.insert("Mumbai".to_string(), 2);

        let json = serde_json::to_string(&mf).unwrap();
        let parsed: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(mf.id, parsed.id);
        assert_eq!(parsed.vehicle_no.as_deref(), Some("MH12AB1234"));
        assert_eq!(parsed.waybill_ids.len(), 1);
        assert_eq!(parsed.pallet_assignments.get("Mumbai"), Some(&2));
    }
}
