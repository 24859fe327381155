//! Record store interface for the Payroll Engine.
//!
//! The engine never talks to a database directly. It reaches users,
//! employees and payrolls through the narrow [`RecordStore`] interface,
//! grouped per unit of work by a [`Transaction`] that a [`Datastore`] runs
//! all-or-nothing.
//!
//! # Example
//!
//! ```
//! use payroll_engine::store::{Datastore, MemoryStore, StoreError};
//!
//! let store = MemoryStore::new();
//! let count = store
//!     .transaction(|tx| tx.payrolls().count_where(&|_| true))
//!     .map_err(|e: StoreError| e.to_string())
//!     .unwrap();
//! assert_eq!(count, 0);
//! ```

mod memory;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Employee, Payroll, User};

pub use memory::MemoryStore;

/// Errors raised by a record store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A previous transaction panicked while holding the store.
    #[error("store lock poisoned")]
    Poisoned,

    /// A record with the same id is already stored.
    #[error("{entity} {id} already exists")]
    Duplicate {
        /// The kind of record.
        entity: &'static str,
        /// The conflicting id.
        id: Uuid,
    },

    /// The record to update or delete is not stored.
    #[error("{entity} {id} does not exist")]
    Missing {
        /// The kind of record.
        entity: &'static str,
        /// The id that was not found.
        id: Uuid,
    },

    /// Any other backend failure, passed through opaquely.
    #[error("{0}")]
    Backend(String),
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// A typed record with a stable identifier.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in errors.
    const ENTITY: &'static str;

    /// Returns the record's identifier.
    fn id(&self) -> Uuid;
}

/// Access to the records of one entity type.
pub trait RecordStore<R: Record> {
    /// Stores a new record.
    fn insert(&mut self, record: R) -> StoreResult<R>;

    /// Loads a record by id; `None` when no such record exists.
    fn get(&self, id: Uuid) -> StoreResult<Option<R>>;

    /// Counts the records matching `predicate`.
    fn count_where(&self, predicate: &dyn Fn(&R) -> bool) -> StoreResult<usize>;

    /// Returns every record matching `predicate`, in no particular order.
    fn find_where(&self, predicate: &dyn Fn(&R) -> bool) -> StoreResult<Vec<R>>;

    /// Replaces a stored record that has the same id.
    fn update(&mut self, record: R) -> StoreResult<R>;

    /// Removes a record by id.
    fn delete(&mut self, id: Uuid) -> StoreResult<()>;
}

/// One unit of work over all three entity stores.
pub trait Transaction {
    /// Login accounts.
    fn users(&mut self) -> &mut dyn RecordStore<User>;

    /// Employee records.
    fn employees(&mut self) -> &mut dyn RecordStore<Employee>;

    /// Payroll records.
    fn payrolls(&mut self) -> &mut dyn RecordStore<Payroll>;
}

/// A backend able to run transactions.
pub trait Datastore: Send + Sync {
    /// Runs `f` as one transaction.
    ///
    /// Writes made by `f` become visible only if it returns `Ok`; an `Err`
    /// leaves the store exactly as it was.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, E>,
        E: From<StoreError>;
}
