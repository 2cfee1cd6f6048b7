//! Postgres-backed employee store.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE employees (
//!     id          SERIAL PRIMARY KEY,
//!     name        VARCHAR(50) NOT NULL,
//!     email       TEXT NOT NULL,
//!     department  TEXT NOT NULL,
//!     photo_path  TEXT
//! );
//! ```
//!
//! The `SERIAL` sequence serializes id assignment, so concurrent inserts
//! never receive the same id and a deleted id is never handed out again.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::DirectoryError;
use crate::models::{Department, Employee};

use super::{EmployeeFields, EmployeeStore};

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: i32,
    name: String,
    email: String,
    department: String,
    photo_path: Option<String>,
}

impl EmployeeRow {
    fn into_employee(self) -> Result<Employee, DirectoryError> {
        let department = Department::from_str(&self.department).ok_or_else(|| {
            DirectoryError::StoreUnavailable(format!(
                "row {} carries unknown department '{}'",
                self.id, self.department
            ))
        })?;
        Ok(Employee {
            id: self.id,
            name: self.name,
            email: self.email,
            department,
            photo_path: self.photo_path,
        })
    }
}

fn store_error(err: sqlx::Error) -> DirectoryError {
    DirectoryError::StoreUnavailable(err.to_string())
}

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        PgEmployeeStore { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn get(&self, id: i32) -> Result<Option<Employee>, DirectoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, email, department, photo_path FROM employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(EmployeeRow::into_employee).transpose()
    }

    async fn list(&self) -> Result<Vec<Employee>, DirectoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, email, department, photo_path FROM employees ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(EmployeeRow::into_employee).collect()
    }

    async fn add(&self, fields: EmployeeFields) -> Result<Employee, DirectoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "INSERT INTO employees (name, email, department, photo_path) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, department, photo_path",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(fields.department.as_str())
        .bind(&fields.photo_path)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        row.into_employee()
    }

    async fn update(
        &self,
        id: i32,
        fields: EmployeeFields,
    ) -> Result<Option<Employee>, DirectoryError> {
        // Single statement so a missing id means zero mutation.
        let row = sqlx::query_as::<_, EmployeeRow>(
            "UPDATE employees SET name = $1, email = $2, department = $3, photo_path = $4 \
             WHERE id = $5 \
             RETURNING id, name, email, department, photo_path",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(fields.department.as_str())
        .bind(&fields.photo_path)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(EmployeeRow::into_employee).transpose()
    }

    async fn delete(&self, id: i32) -> Result<Option<Employee>, DirectoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "DELETE FROM employees WHERE id = $1 \
             RETURNING id, name, email, department, photo_path",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(EmployeeRow::into_employee).transpose()
    }
}
