pub mod employee;

pub use employee::{Department, Employee, EmployeeDraft, PhotoUpload};
