//! Employee directory core: a repository abstraction over employee records,
//! a validation-and-persistence workflow for create/edit, a file-replacement
//! protocol for uploaded photos, and an authentication gate in front of the
//! mutating operations.
//!
//! Transport concerns (routing, multipart parsing, rendering) live outside
//! this crate; it consumes already-decoded drafts and byte buffers.

pub mod auth;
pub mod db;
pub mod directory;
pub mod errors;
pub mod models;
pub mod photos;
pub mod store;
pub mod validation;

pub use auth::{AccessGate, Identity, IdentityProvider, JwtIdentityProvider};
pub use directory::DirectoryService;
pub use errors::{DirectoryError, FieldError};
pub use models::{Department, Employee, EmployeeDraft, PhotoUpload};
pub use photos::{FsPhotoStore, PhotoStore, S3PhotoStore};
pub use store::{EmployeeFields, EmployeeStore, MemoryEmployeeStore, PgEmployeeStore};
