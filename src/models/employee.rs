use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    pub(crate) static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9_.+]+@[A-Za-z0-9]+\.[A-Za-z0-9]+$").unwrap();
}

/// Closed set of departments an employee can belong to. An empty selection on
/// a form is a validation error, never a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Hr,
    It,
    Payroll,
    Marketing,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Hr,
        Department::It,
        Department::Payroll,
        Department::Marketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Hr => "HR",
            Department::It => "IT",
            Department::Payroll => "PAYROLL",
            Department::Marketing => "MARKETING",
        }
    }

    pub fn from_str(s: &str) -> Option<Department> {
        Department::ALL.iter().copied().find(|d| d.as_str() == s)
    }
}

/// A stored employee record, as returned by the store. The `id` is assigned
/// on insert and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub department: Department,
    /// Stored name of the photo file owned by the photo store; `None` means
    /// the employee has no photo.
    pub photo_path: Option<String>,
}

/// Caller-submitted field values for an employee, not yet validated and not
/// yet assigned an id. Create and edit both resubmit every editable field.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployeeDraft {
    #[validate(length(min = 2, max = 50, message = "Name must be 2 to 50 characters"))]
    pub name: String,
    #[validate(regex(path = "EMAIL_RE", message = "Invalid email"))]
    pub email: String,
    #[validate(required(message = "Department is required"))]
    pub department: Option<Department>,
}

/// Raw photo bytes handed over by the transport layer, already decoded from
/// whatever multipart envelope carried them.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}
