//! Shared lookup helpers for CLI commands
//!
//! Commands accept either a full entity id (`WB-01ABC...`) or the human-facing
//! label (waybill number, manifest number, company code, vehicle number).

use miette::{miette, Result};

use crate::core::identity::EntityId;
use crate::core::store::Store;
use crate::entities::company::Company;
use crate::entities::manifest::Manifest;
use crate::entities::vehicle::Vehicle;
use crate::entities::waybill::Waybill;

/// Find a waybill by id or waybill number
pub fn find_waybill<'a>(store: &'a Store<Waybill>, query: &str) -> Result<&'a Waybill> {
    if let Ok(id) = query.parse::<EntityId>() {
        if let Some(wb) = store.get(&id) {
            return Ok(wb);
        }
    }
    store
        .iter()
        .find(|wb| wb.waybill_number == query)
        .ok_or_else(|| miette!("No waybill matching '{query}'"))
}

/// Find a manifest by id or manifest number
pub fn find_manifest<'a>(store: &'a Store<Manifest>, query: &str) -> Result<&'a Manifest> {
    if let Ok(id) = query.parse::<EntityId>() {
        if let Some(mf) = store.get(&id) {
            return Ok(mf);
        }
    }
    store
        .iter()
        .find(|mf| mf.manifest_no == query)
        .ok_or_else(|| miette!("No manifest matching '{query}'"))
}

/// Find a company by id or company code
pub fn find_company<'a>(store: &'a Store<Company>, query: &str) -> Result<&'a Company> {
    if let Ok(id) = query.parse::<EntityId>() {
        if let Some(cmp) = store.get(&id) {
            return Ok(cmp);
        }
    }
    store
        .iter()
        .find(|cmp| cmp.company_code == query)
        .ok_or_else(|| miette!("No company matching '{query}'"))
}

/// Find a vehicle by id or registration number
pub fn find_vehicle<'a>(store: &'a Store<Vehicle>, query: &str) -> Result<&'a Vehicle> {
    if let Ok(id) = query.parse::<EntityId>() {
        if let Some(veh) = store.get(&id) {
            return Ok(veh);
        }
    }
    store
        .iter()
        .find(|veh| veh.vehicle_number == query)
        .ok_or_else(|| miette!("No vehicle matching '{query}'"))
}
