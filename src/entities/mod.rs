//! Entity types - the logistics data model

pub mod company;
pub mod inventory;
pub mod manifest;
pub mod vehicle;
pub mod waybill;

pub use company::{Company, CompanyContact};
pub use inventory::InventoryItem;
pub use manifest::{Manifest, ManifestOrigin, ManifestStatus};
pub use vehicle::{Vehicle, VehicleType};
pub use waybill::{Waybill, WaybillStatus};
