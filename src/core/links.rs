//! Weak-reference resolution and the waybill numbering pool
//!
//! References between entities are advisory: a manifest keeps waybill ids, not
//! waybills, and integrity is checked at read time. A deleted waybill leaves a
//! dangling id behind that resolution silently skips - never an error.

use thiserror::Error;

use crate::core::identity::EntityId;
use crate::core::store::Store;
use crate::core::validate::ValidationError;
use crate::entities::inventory::InventoryItem;
use crate::entities::manifest::Manifest;
use crate::entities::waybill::Waybill;

/// Resolve a manifest's waybill references, skipping dangling ids
pub fn resolve_waybills<'a>(manifest: &Manifest, waybills: &'a Store<Waybill>) -> Vec<&'a Waybill> {
    manifest
        .waybill_ids
        .iter()
        .filter_map(|id| waybills.get(id))
        .collect()
}

/// Unique destination cities of a manifest's resolved waybills,
/// in order of first appearance
pub fn destination_cities(manifest: &Manifest, waybills: &Store<Waybill>) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for waybill in resolve_waybills(manifest, waybills) {
        if !cities.contains(&waybill.receiver_city) {
            cities.push(waybill.receiver_city.clone());
        }
    }
    cities
}

/// Find the next unused number issued to a partner, oldest issue first
pub fn next_unused<'a>(
    inventory: &'a Store<InventoryItem>,
    partner_code: &str,
) -> Option<&'a InventoryItem> {
    // Store order is newest-first; consume from the back of the pool
    inventory
        .iter()
        .filter(|item| !item.is_used && item.partner_code == partner_code)
        .last()
}

/// Count of unused numbers remaining for a partner
pub fn pool_remaining(inventory: &Store<InventoryItem>, partner_code: &str) -> usize {
    inventory
        .iter()
        .filter(|item| !item.is_used && item.partner_code == partner_code)
        .count()
}

/// Errors that abort a booking before any state changes
#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No unused waybill number available for partner '{partner_code}'")]
    PoolExhausted { partner_code: String },
}

/// Input for booking a waybill; the tracking number comes from the pool,
/// never from the caller
#[derive(Debug, Clone)]
pub struct WaybillDraft {
    pub sender_city: String,
    pub receiver_city: String,
    pub sender_company: EntityId,
    pub receiver_company: EntityId,
    pub partner_code: String,
}

/// Result of a successful booking
#[derive(Debug)]
pub struct BookedWaybill {
    pub waybill: Waybill,
    /// Persist problems encountered while writing through; the in-memory
    /// state is already updated and stands
    pub persist_warnings: Vec<String>,
}

/// Book a waybill as a single logical unit: take an unused number from the
/// partner's pool, mark it consumed, and create the waybill.
///
/// Validation and pool lookup happen before any mutation, so a failure leaves
/// both stores untouched. Once mutation starts, persistence problems are
/// reported as warnings, not rollbacks.
pub fn book_waybill(
    draft: WaybillDraft,
    inventory: &mut Store<InventoryItem>,
    waybills: &mut Store<Waybill>,
) -> Result<BookedWaybill, BookingError> {
    let item = next_unused(inventory, &draft.partner_code)
        .cloned()
        .ok_or_else(|| BookingError::PoolExhausted {
            partner_code: draft.partner_code.clone(),
        })?;

    let waybill = Waybill::new(
        item.waybill_number.clone(),
        draft.sender_city,
        draft.receiver_city,
        draft.sender_company,
        draft.receiver_company,
        draft.partner_code,
    );
    waybill.validate()?;

    let mut persist_warnings = Vec::new();

    let mut consumed = item;
    consumed.is_used = true;
    if let Err(e) = inventory.update(consumed) {
        persist_warnings.push(e.to_string());
    }
    if let Err(e) = waybills.add(waybill.clone()) {
        persist_warnings.push(e.to_string());
    }

    Ok(BookedWaybill {
        waybill,
        persist_warnings,
    })
}
