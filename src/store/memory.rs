//! In-memory record store.
//!
//! Transactions are serialised behind a mutex and run against a working copy
//! of the tables, which replaces the committed tables only on success.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use crate::models::{Employee, Payroll, User};

use super::{Datastore, Record, RecordStore, StoreError, StoreResult, Transaction};

#[derive(Debug, Clone)]
struct Table<R> {
    rows: BTreeMap<Uuid, R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<R: Record> RecordStore<R> for Table<R> {
    fn insert(&mut self, record: R) -> StoreResult<R> {
        let id = record.id();
        if self.rows.contains_key(&id) {
            return Err(StoreError::Duplicate {
                entity: R::ENTITY,
                id,
            });
        }
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<R>> {
        Ok(self.rows.get(&id).cloned())
    }

    fn count_where(&self, predicate: &dyn Fn(&R) -> bool) -> StoreResult<usize> {
        Ok(self.rows.values().filter(|&record| predicate(record)).count())
    }

    fn find_where(&self, predicate: &dyn Fn(&R) -> bool) -> StoreResult<Vec<R>> {
        Ok(self
            .rows
            .values()
            .filter(|&record| predicate(record))
            .cloned()
            .collect())
    }

    fn update(&mut self, record: R) -> StoreResult<R> {
        let id = record.id();
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(StoreError::Missing {
                entity: R::ENTITY,
                id,
            }),
        }
    }

    fn delete(&mut self, id: Uuid) -> StoreResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::Missing {
                entity: R::ENTITY,
                id,
            })
    }
}

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Table<User>,
    employees: Table<Employee>,
    payrolls: Table<Payroll>,
}

impl Transaction for Tables {
    fn users(&mut self) -> &mut dyn RecordStore<User> {
        &mut self.users
    }

    fn employees(&mut self) -> &mut dyn RecordStore<Employee> {
        &mut self.employees
    }

    fn payrolls(&mut self) -> &mut dyn RecordStore<Payroll> {
        &mut self.payrolls
    }
}

/// A [`Datastore`] that keeps every record in process memory.
///
/// Suitable for a single-instance deployment and for tests; nothing is
/// persisted across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Datastore for MemoryStore {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut committed = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        let mut working = committed.clone();

        match f(&mut working) {
            Ok(value) => {
                *committed = working;
                Ok(value)
            }
            Err(err) => {
                debug!("transaction rolled back");
                Err(err)
            }
        }
    }
}
