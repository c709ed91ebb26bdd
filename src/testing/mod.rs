// In-memory stores for router tests.
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::database::models::{Employee, NewEmployee};
use crate::database::{Affected, EmployeeStore, StoreError};

/// Map-backed store with auto-incrementing ids, counting every call it sees.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    rows: Mutex<BTreeMap<i64, Employee>>,
    next_id: Mutex<i64>,
    calls: AtomicUsize,
    mutations: AtomicUsize,
}

impl MemoryEmployeeStore {
    /// Calls to create, list, update and delete.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls that changed a row.
    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn mutated(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn create(&self, employee: &NewEmployee) -> Result<i64, StoreError> {
        self.touch();
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        self.rows.lock().unwrap().insert(id, employee.clone().with_id(id));
        self.mutated();
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        self.touch();
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, id: i64, employee: &NewEmployee) -> Result<Affected, StoreError> {
        self.touch();
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(row) => {
                *row = employee.clone().with_id(id);
                self.mutated();
                Ok(Affected::Rows(1))
            }
            None => Ok(Affected::NotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<Affected, StoreError> {
        self.touch();
        match self.rows.lock().unwrap().remove(&id) {
            Some(_) => {
                self.mutated();
                Ok(Affected::Rows(1))
            }
            None => Ok(Affected::NotFound),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Every call fails as if the database were unreachable.
pub struct FailingStore;

impl FailingStore {
    pub const MESSAGE: &'static str = "connection refused";

    fn fail<T>() -> Result<T, StoreError> {
        Err(StoreError::new(Self::MESSAGE))
    }
}

#[async_trait]
impl EmployeeStore for FailingStore {
    async fn create(&self, _: &NewEmployee) -> Result<i64, StoreError> {
        Self::fail()
    }

    async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        Self::fail()
    }

    async fn update(&self, _: i64, _: &NewEmployee) -> Result<Affected, StoreError> {
        Self::fail()
    }

    async fn delete(&self, _: i64) -> Result<Affected, StoreError> {
        Self::fail()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Self::fail()
    }
}

/// Panics on list, to exercise the catch-all boundary.
pub struct PanickingStore;

#[async_trait]
impl EmployeeStore for PanickingStore {
    async fn create(&self, _: &NewEmployee) -> Result<i64, StoreError> {
        Ok(1)
    }

    async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        panic!("row decoder exploded")
    }

    async fn update(&self, _: i64, _: &NewEmployee) -> Result<Affected, StoreError> {
        Ok(Affected::NotFound)
    }

    async fn delete(&self, _: i64) -> Result<Affected, StoreError> {
        Ok(Affected::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
