use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::{Employee, NewEmployee};
use crate::database::store::{Affected, EmployeeStore, StoreError};

/// Statements for one table, rendered once at construction.
///
/// The table name is the only interpolated piece and is checked against
/// `[A-Za-z0-9_]` by config validation; every value is a positional bind.
#[derive(Debug, Clone)]
struct Statements {
    insert: String,
    select_all: String,
    update: String,
    delete: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        let table = quote_identifier(table);
        Self {
            insert: format!(
                "INSERT INTO {} (name, age, country, role, years) VALUES ($1, $2, $3, $4, $5) RETURNING id::BIGINT",
                table
            ),
            select_all: format!(
                "SELECT id::BIGINT AS id, name, age::BIGINT AS age, country, role, years::BIGINT AS years FROM {} ORDER BY id",
                table
            ),
            update: format!(
                "UPDATE {} SET name = $1, age = $2, country = $3, role = $4, years = $5 WHERE id = $6",
                table
            ),
            delete: format!("DELETE FROM {} WHERE id = $1", table),
        }
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Employee gateway backed by a shared Postgres pool.
#[derive(Debug, Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
    sql: Statements,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            sql: Statements::for_table(table),
        }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn create(&self, employee: &NewEmployee) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar::<_, i64>(&self.sql.insert)
            .bind(&employee.name)
            .bind(employee.age)
            .bind(&employee.country)
            .bind(&employee.role)
            .bind(employee.years)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, Employee>(&self.sql.select_all)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, employee: &NewEmployee) -> Result<Affected, StoreError> {
        let result = sqlx::query(&self.sql.update)
            .bind(&employee.name)
            .bind(employee.age)
            .bind(&employee.country)
            .bind(&employee.role)
            .bind(employee.years)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(Affected::from_count(result.rows_affected()))
    }

    async fn delete(&self, id: i64) -> Result<Affected, StoreError> {
        let result = sqlx::query(&self.sql.delete)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(Affected::from_count(result.rows_affected()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
