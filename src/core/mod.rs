//! Core module - data model plumbing, lifecycle and allocation logic

pub mod config;
pub mod entity;
pub mod identity;
pub mod lifecycle;
pub mod links;
pub mod pallet;
pub mod provider;
pub mod store;
pub mod validate;

pub use config::{Config, Project, ProjectError};
pub use entity::Entity;
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use lifecycle::{LifecycleEngine, LifecycleError};
pub use links::{
    book_waybill, destination_cities, next_unused, pool_remaining, resolve_waybills, BookedWaybill,
    BookingError, WaybillDraft,
};
pub use pallet::{
    validate_assignment, DeterministicPolicy, PalletAssignmentPolicy, PalletError, RemotePolicy,
    WithFallback,
};
pub use provider::{AddressSuggestion, BackupClient, CityState, ProviderError, SuggestionClient};
pub use store::{JsonFileBackend, PersistError, StorageBackend, Store, StoreError};
pub use validate::ValidationError;
