//! FDT: Freight Dispatch Toolkit
//!
//! Tracks shipping documents (waybills) through a logistics pipeline as plain
//! JSON records: booking against a pre-issued numbering pool, consolidation
//! onto vehicle manifests, dispatch with pallet assignments, and receipt.

pub mod cli;
pub mod core;
pub mod entities;
