//! Command implementations

pub mod backup;
pub mod company;
pub mod init;
pub mod inventory;
pub mod lookup;
pub mod manifest;
pub mod vehicle;
pub mod waybill;
