use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted employee row. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub country: String,
    pub role: String,
    pub years: i64,
}

/// A validated employee payload without an id, as accepted by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub age: i64,
    pub country: String,
    pub role: String,
    pub years: i64,
}

impl NewEmployee {
    pub fn with_id(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            age: self.age,
            country: self.country,
            role: self.role,
            years: self.years,
        }
    }
}
