//! Manifest lifecycle - status transitions and their preconditions
//!
//! Draft -> Dispatched -> Received | Short Received. Draft is the only initial
//! state; Received and Short Received are terminal. A transition that violates
//! its precondition is rejected with the manifest unchanged - callers surface
//! the failure and carry on.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::core::identity::EntityId;
use crate::entities::manifest::{Manifest, ManifestStatus};

/// Errors from rejected lifecycle transitions
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ManifestStatus,
        to: ManifestStatus,
    },

    #[error("Cannot dispatch an empty manifest")]
    EmptyManifest,

    #[error("Waybills can only be added to a draft manifest (status is {status})")]
    NotDraft { status: ManifestStatus },

    #[error("Cannot dispatch without a vehicle number")]
    MissingVehicle,

    #[error("Verified box {id} is not on the manifest")]
    UnknownBox { id: EntityId },

    #[error("Short receive requires at least one verified box")]
    NothingVerified,

    #[error("Short receive with every box verified; use a full receive instead")]
    NothingMissing,

    #[error("Pallet assignment references city '{city}' not on the manifest")]
    UnknownPalletCity { city: String },
}

/// State machine over manifest statuses
pub struct LifecycleEngine;

impl LifecycleEngine {
    /// Check if a status transition is legal, ignoring preconditions
    pub fn is_valid_transition(&self, from: ManifestStatus, to: ManifestStatus) -> bool {
        matches!(
            (from, to),
            (ManifestStatus::Draft, ManifestStatus::Dispatched)
                | (ManifestStatus::Dispatched, ManifestStatus::Received)
                | (ManifestStatus::Dispatched, ManifestStatus::ShortReceived)
        )
    }

    /// Get allowed transitions from the current status
    pub fn allowed_transitions(&self, current: ManifestStatus) -> Vec<ManifestStatus> {
        match current {
            ManifestStatus::Draft => vec![ManifestStatus::Dispatched],
            ManifestStatus::Dispatched => {
                vec![ManifestStatus::Received, ManifestStatus::ShortReceived]
            }
            ManifestStatus::Received | ManifestStatus::ShortReceived => vec![],
        }
    }

    /// Attach a waybill reference to a draft manifest; returns false on a
    /// duplicate. Dispatched and terminal manifests are sealed - mutating the
    /// box list after dispatch would desync verified and pallet state.
    pub fn attach_waybill(
        &self,
        manifest: &mut Manifest,
        id: EntityId,
    ) -> Result<bool, LifecycleError> {
        if manifest.status != ManifestStatus::Draft {
            return Err(LifecycleError::NotDraft {
                status: manifest.status,
            });
        }
        Ok(manifest.add_waybill(id))
    }

    /// Draft -> Dispatched.
    ///
    /// Requires at least one waybill and a vehicle number. Pallet assignments
    /// computed for the trip may be attached here; their keys must be drawn
    /// from the given destination city list.
    pub fn dispatch(
        &self,
        manifest: &mut Manifest,
        pallet_assignments: Option<BTreeMap<String, u32>>,
        cities: &[String],
    ) -> Result<(), LifecycleError> {
        self.check(manifest.status, ManifestStatus::Dispatched)?;
        if manifest.waybill_ids.is_empty() {
            return Err(LifecycleError::EmptyManifest);
        }
        if manifest.vehicle_no.as_deref().map_or(true, str::is_empty) {
            return Err(LifecycleError::MissingVehicle);
        }
        if let Some(assignments) = &pallet_assignments {
            for city in assignments.keys() {
                if !cities.contains(city) {
                    return Err(LifecycleError::UnknownPalletCity { city: city.clone() });
                }
            }
        }

        manifest.status = ManifestStatus::Dispatched;
        if let Some(assignments) = pallet_assignments {
            manifest.pallet_assignments = assignments;
        }
        Ok(())
    }

    /// Dispatched -> Received: every waybill on the manifest is verified
    pub fn receive(&self, manifest: &mut Manifest) -> Result<(), LifecycleError> {
        self.check(manifest.status, ManifestStatus::Received)?;
        manifest.verified_box_ids = manifest.waybill_ids.clone();
        manifest.status = ManifestStatus::Received;
        Ok(())
    }

    /// Dispatched -> Short Received: the verified ids must be a non-empty
    /// strict subset of the manifest's waybills. The unverified remainder is
    /// reportable via `Manifest::missing_box_ids` but is not auto-resolved.
    pub fn short_receive(
        &self,
        manifest: &mut Manifest,
        verified: Vec<EntityId>,
    ) -> Result<(), LifecycleError> {
        self.check(manifest.status, ManifestStatus::ShortReceived)?;

        let verified: BTreeSet<EntityId> = verified.into_iter().collect();
        if verified.is_empty() {
            return Err(LifecycleError::NothingVerified);
        }
        for id in &verified {
            if !manifest.contains_waybill(id) {
                return Err(LifecycleError::UnknownBox { id: id.clone() });
            }
        }
        if verified.len() == manifest.waybill_ids.len() {
            return Err(LifecycleError::NothingMissing);
        }

        // Keep manifest order; never drop an id that was already verified
        let mut all: Vec<EntityId> = manifest.verified_box_ids.clone();
        for id in manifest.waybill_ids.iter() {
            if verified.contains(id) && !all.contains(id) {
                all.push(id.clone());
            }
        }
        manifest.verified_box_ids = all;
        manifest.status = ManifestStatus::ShortReceived;
        Ok(())
    }

    fn check(&self, from: ManifestStatus, to: ManifestStatus) -> Result<(), LifecycleError> {
        if !self.is_valid_transition(from, to) {
            return Err(LifecycleError::InvalidTransition { from, to });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;
    use crate::entities::manifest::ManifestOrigin;
    use chrono::NaiveDate;

    fn engine() -> LifecycleEngine {
        LifecycleEngine
    }

    fn draft_manifest(boxes: usize) -> Manifest {
        let mut mf = Manifest::new(
            "MF-1",
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            ManifestOrigin::Booking,
            "BKG01",
        );
        mf.vehicle_no = Some("MH12AB1234".to_string());
        for _ in 0..boxes {
            mf.add_waybill(EntityId::new(EntityPrefix::Wb));
        }
        mf
    }

    #[test]
    fn test_valid_transitions() {
        let engine = engine();
        assert!(engine.is_valid_transition(ManifestStatus::Draft, ManifestStatus::Dispatched));
        assert!(engine.is_valid_transition(ManifestStatus::Dispatched, ManifestStatus::Received));
        assert!(
            engine.is_valid_transition(ManifestStatus::Dispatched, ManifestStatus::ShortReceived)
        );

        assert!(!engine.is_valid_transition(ManifestStatus::Draft, ManifestStatus::Received));
        assert!(!engine.is_valid_transition(ManifestStatus::Received, ManifestStatus::Draft));
        assert!(
            !engine.is_valid_transition(ManifestStatus::ShortReceived, ManifestStatus::Received)
        );
    }

    #[test]
    fn test_allowed_transitions() {
        let engine = engine();
        assert_eq!(
            engine.allowed_transitions(ManifestStatus::Draft),
            vec![ManifestStatus::Dispatched]
        );
        assert_eq!(
            engine.allowed_transitions(ManifestStatus::Dispatched),
            vec![ManifestStatus::Received, ManifestStatus::ShortReceived]
        );
        assert!(engine
            .allowed_transitions(ManifestStatus::Received)
            .is_empty());
    }

    #[test]
    fn test_attach_waybill_on_draft() {
        let engine = engine();
        let mut mf = draft_manifest(1);
        let wb = EntityId::new(EntityPrefix::Wb);
        assert!(engine.attach_waybill(&mut mf, wb.clone()).unwrap());
        assert!(!engine.attach_waybill(&mut mf, wb).unwrap());
        assert_eq!(mf.waybill_ids.len(), 2);
    }

    #[test]
    fn test_attach_waybill_after_dispatch_is_rejected() {
        let engine = engine();
        let mut mf = draft_manifest(2);
        engine.dispatch(&mut mf, None, &[]).unwrap();
        let err = engine
            .attach_waybill(&mut mf, EntityId::new(EntityPrefix::Wb))
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotDraft { .. }));
        assert_eq!(mf.waybill_ids.len(), 2);
    }

    #[test]
    fn test_attach_waybill_after_receive_is_rejected() {
        let engine = engine();
        let mut mf = draft_manifest(2);
        engine.dispatch(&mut mf, None, &[]).unwrap();
        engine.receive(&mut mf).unwrap();

        let err = engine
            .attach_waybill(&mut mf, EntityId::new(EntityPrefix::Wb))
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotDraft { .. }));
        // A received manifest still reports every box verified
        assert_eq!(mf.status, ManifestStatus::Received);
        assert!(mf.missing_box_ids().is_empty());
    }

    #[test]
    fn test_dispatch_requires_waybills() {
        let engine = engine();
        let mut mf = draft_manifest(0);
        let err = engine.dispatch(&mut mf, None, &[]).unwrap_err();
        assert!(matches!(err, LifecycleError::EmptyManifest));
        assert_eq!(mf.status, ManifestStatus::Draft);
    }

    #[test]
    fn test_dispatch_requires_vehicle() {
        let engine = engine();
        let mut mf = draft_manifest(2);
        mf.vehicle_no = None;
        let err = engine.dispatch(&mut mf, None, &[]).unwrap_err();
        assert!(matches!(err, LifecycleError::MissingVehicle));
        assert_eq!(mf.status, ManifestStatus::Draft);
    }

    #[test]
    fn test_dispatch_attaches_pallet_assignments() {
        let engine = engine();
        let mut mf = draft_manifest(2);
        let cities = vec!["Mumbai".to_string(), "Delhi".to_string()];
        let assignments = BTreeMap::from([
            ("Mumbai".to_string(), 1),
            ("Delhi".to_string(), 2),
        ]);
        engine
            .dispatch(&mut mf, Some(assignments), &cities)
            .unwrap();
        assert_eq!(mf.status, ManifestStatus::Dispatched);
        assert_eq!(mf.pallet_assignments.get("Delhi"), Some(&2));
    }

    #[test]
    fn test_dispatch_rejects_unknown_pallet_city() {
        let engine = engine();
        let mut mf = draft_manifest(2);
        let cities = vec!["Mumbai".to_string()];
        let assignments = BTreeMap::from([("Nagpur".to_string(), 1)]);
        let err = engine
            .dispatch(&mut mf, Some(assignments), &cities)
            .unwrap_err();
        assert!(matches!(err, LifecycleError::UnknownPalletCity { .. }));
        assert_eq!(mf.status, ManifestStatus::Draft);
        assert!(mf.pallet_assignments.is_empty());
    }

    #[test]
    fn test_receive_verifies_every_box() {
        let engine = engine();
        let mut mf = draft_manifest(3);
        engine.dispatch(&mut mf, None, &[]).unwrap();
        engine.receive(&mut mf).unwrap();
        assert_eq!(mf.status, ManifestStatus::Received);
        assert_eq!(mf.verified_box_ids, mf.waybill_ids);
        assert!(mf.missing_box_ids().is_empty());
    }

    #[test]
    fn test_receive_from_draft_is_rejected() {
        let engine = engine();
        let mut mf = draft_manifest(3);
        let err = engine.receive(&mut mf).unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
        assert_eq!(mf.status, ManifestStatus::Draft);
        assert!(mf.verified_box_ids.is_empty());
    }

    #[test]
    fn test_short_receive_strict_subset() {
        let engine = engine();
        let mut mf = draft_manifest(3);
        engine.dispatch(&mut mf, None, &[]).unwrap();

        let verified = vec![mf.waybill_ids[0].clone(), mf.waybill_ids[2].clone()];
        engine.short_receive(&mut mf, verified).unwrap();
        assert_eq!(mf.status, ManifestStatus::ShortReceived);
        assert_eq!(mf.verified_box_ids.len(), 2);
        assert_eq!(mf.missing_box_ids(), vec![&mf.waybill_ids[1]]);
        // Invariant: verified is always a subset of the manifest's waybills
        assert!(mf
            .verified_box_ids
            .iter()
            .all(|id| mf.waybill_ids.contains(id)));
    }

    #[test]
    fn test_short_receive_rejects_full_set() {
        let engine = engine();
        let mut mf = draft_manifest(2);
        engine.dispatch(&mut mf, None, &[]).unwrap();
        let all = mf.waybill_ids.clone();
        let err = engine.short_receive(&mut mf, all).unwrap_err();
        assert!(matches!(err, LifecycleError::NothingMissing));
        assert_eq!(mf.status, ManifestStatus::Dispatched);
    }

    #[test]
    fn test_short_receive_rejects_foreign_box() {
        let engine = engine();
        let mut mf = draft_manifest(2);
        engine.dispatch(&mut mf, None, &[]).unwrap();
        let err = engine
            .short_receive(&mut mf, vec![EntityId::new(EntityPrefix::Wb)])
            .unwrap_err();
        assert!(matches!(err, LifecycleError::UnknownBox { .. }));
        assert_eq!(mf.status, ManifestStatus::Dispatched);
        assert!(mf.verified_box_ids.is_empty());
    }

    #[test]
    fn test_short_receive_rejects_empty_scan() {
        let engine = engine();
        let mut mf = draft_manifest(2);
        engine.dispatch(&mut mf, None, &[]).unwrap();
        let err = engine.short_receive(&mut mf, vec![]).unwrap_err();
        assert!(matches!(err, LifecycleError::NothingVerified));
        assert_eq!(mf.status, ManifestStatus::Dispatched);
    }
}
