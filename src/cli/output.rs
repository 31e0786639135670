//! Console output helpers

use console::style;

use crate::core::entity::Entity;
use crate::core::store::{Store, StoreError};

/// Print a success line
pub fn success(message: impl AsRef<str>) {
    println!("{} {}", style("✓").green().bold(), message.as_ref());
}

/// Print a non-fatal warning line
pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", style("⚠").yellow().bold(), message.as_ref());
}

/// Surface a store load warning, if the persisted record was unusable
pub fn report_load_warning<T: Entity>(store: &Store<T>) {
    if let Some(message) = store.load_warning() {
        warn(message);
    }
}

/// Surface a persist failure as a warning; the in-memory mutation stands
pub fn report_persist(result: Result<(), StoreError>) {
    if let Err(e) = result {
        warn(e.to_string());
    }
}
