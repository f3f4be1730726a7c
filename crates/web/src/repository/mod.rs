//! Persistence contract for entities.
//!
//! Handlers talk to storage only through [`Repository`]. Every operation reports success
//! or failure; "not found" is a successful answer (`None` or `false`), not an error.
//! [`MemoryRepository`] is the bundled implementation.

mod memory;

pub use memory::MemoryRepository;

use thiserror::Error;

use crate::entity::Record;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} with id `{id}` already exists")]
    Duplicate { kind: &'static str, id: String },

    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    pub fn unavailable<S: ToString>(reason: S) -> Self {
        Self::Unavailable { reason: reason.to_string() }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Repository<E: Record>: Send + Sync {
    fn insert(&self, record: E) -> Result<(), StoreError>;

    fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError>;

    /// Returns `false` when no record has the patch's id.
    fn update(&self, patch: E::Patch) -> Result<bool, StoreError>;

    /// Returns `false` when no record has this id.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// All records in insertion order.
    fn get_all(&self) -> Result<Vec<E>, StoreError>;
}
