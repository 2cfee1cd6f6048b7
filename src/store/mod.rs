//! Employee record storage behind a single contract with two backends: an
//! in-memory store for tests and development, and Postgres for durability.
//! The backend is picked at construction time and handed to the directory
//! service as a trait object.

use async_trait::async_trait;

use crate::errors::DirectoryError;
use crate::models::{Department, Employee};

pub mod memory;
pub mod pg;

pub use memory::MemoryEmployeeStore;
pub use pg::PgEmployeeStore;

/// The full editable field set, validated upstream. `add` and `update` both
/// take every field; update is a full replace, not a patch.
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub department: Department,
    pub photo_path: Option<String>,
}

/// Storage contract for employee records.
///
/// A missing id is an explicit `None`, never an error; `StoreUnavailable` is
/// reserved for backend faults such as lost connectivity.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Looks up one employee by id.
    async fn get(&self, id: i32) -> Result<Option<Employee>, DirectoryError>;

    /// Returns all employees in a stable order: insertion order for the
    /// in-memory backend, primary-key order for Postgres.
    async fn list(&self) -> Result<Vec<Employee>, DirectoryError>;

    /// Persists a new record and assigns it an id strictly greater than any
    /// previously assigned by this store instance. Ids are never reused.
    async fn add(&self, fields: EmployeeFields) -> Result<Employee, DirectoryError>;

    /// Replaces all editable fields atomically. Returns `None` without
    /// touching anything when the id does not exist.
    async fn update(&self, id: i32, fields: EmployeeFields)
        -> Result<Option<Employee>, DirectoryError>;

    /// Removes the record and returns the removed snapshot so the caller can
    /// release resources it referenced (the photo file, in particular).
    async fn delete(&self, id: i32) -> Result<Option<Employee>, DirectoryError>;
}
