use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{Employee, NewEmployee};

/// Failure reported by the backing store. `message` is the driver's own text.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::new(err.to_string())
    }
}

/// Outcome of a statement that targets a single row by id.
///
/// A missing row is an expected result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affected {
    Rows(u64),
    NotFound,
}

impl Affected {
    pub fn from_count(rows: u64) -> Self {
        if rows == 0 {
            Affected::NotFound
        } else {
            Affected::Rows(rows)
        }
    }
}

/// Record gateway over the employee table. Each method issues exactly one
/// statement.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Inserts the record and returns the id assigned by the store.
    async fn create(&self, employee: &NewEmployee) -> Result<i64, StoreError>;

    async fn list(&self) -> Result<Vec<Employee>, StoreError>;

    /// Replaces all five fields of the row with `id`.
    async fn update(&self, id: i64, employee: &NewEmployee) -> Result<Affected, StoreError>;

    async fn delete(&self, id: i64) -> Result<Affected, StoreError>;

    /// Connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
