//! Orchestration of validation, photo replacement, and store mutation.
//!
//! The service owns the cross-cutting invariant that an employee record never
//! references a photo the photo store does not hold: validation fully
//! precedes any durable side effect, and photos are written before the record
//! that points at them.

use std::sync::Arc;

use log::warn;

use crate::errors::{DirectoryError, FieldError};
use crate::models::{Department, Employee, EmployeeDraft, PhotoUpload};
use crate::photos::PhotoStore;
use crate::store::{EmployeeFields, EmployeeStore};
use crate::validation::{validate_draft, validate_photo};

pub struct DirectoryService {
    employees: Arc<dyn EmployeeStore>,
    photos: Arc<dyn PhotoStore>,
}

impl DirectoryService {
    pub fn new(employees: Arc<dyn EmployeeStore>, photos: Arc<dyn PhotoStore>) -> Self {
        DirectoryService { employees, photos }
    }

    /// Runs every draft and photo rule; empty means the submission is clean.
    fn check(draft: &EmployeeDraft, photo: Option<&PhotoUpload>) -> Vec<FieldError> {
        let mut errors = validate_draft(draft);
        if let Some(photo) = photo {
            if let Some(err) = validate_photo(photo) {
                errors.push(err);
            }
        }
        errors
    }

    /// The department a validated draft selected. Validation already rejected
    /// the empty selection, so a `None` here is reported the same way.
    fn department_of(draft: &EmployeeDraft) -> Result<Department, DirectoryError> {
        draft.department.ok_or_else(|| {
            DirectoryError::Validation(vec![FieldError::new(
                "department",
                "Department is required",
            )])
        })
    }

    pub async fn get_employee(&self, id: i32) -> Result<Employee, DirectoryError> {
        self.employees
            .get(id)
            .await?
            .ok_or(DirectoryError::NotFound)
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, DirectoryError> {
        self.employees.list().await
    }

    /// Validates the draft, saves the photo if one was submitted, then adds
    /// the record. A rejected submission touches neither store, so it can
    /// never leave an orphaned photo file behind.
    pub async fn create_employee(
        &self,
        draft: EmployeeDraft,
        photo: Option<PhotoUpload>,
    ) -> Result<Employee, DirectoryError> {
        let errors = Self::check(&draft, photo.as_ref());
        if !errors.is_empty() {
            return Err(DirectoryError::Validation(errors));
        }
        let department = Self::department_of(&draft)?;

        let photo_path = match photo {
            Some(upload) => Some(self.photos.save(&upload.filename, &upload.bytes).await?),
            None => None,
        };

        self.employees
            .add(EmployeeFields {
                name: draft.name,
                email: draft.email,
                department,
                photo_path,
            })
            .await
    }

    /// Full-replace edit. A new photo swaps out the old file through the
    /// photo store's replacement protocol; no photo submitted means the
    /// existing stored name is kept as-is.
    pub async fn update_employee(
        &self,
        id: i32,
        draft: EmployeeDraft,
        photo: Option<PhotoUpload>,
    ) -> Result<Employee, DirectoryError> {
        let existing = match self.employees.get(id).await? {
            Some(employee) => employee,
            None => return Err(DirectoryError::NotFound),
        };

        let errors = Self::check(&draft, photo.as_ref());
        if !errors.is_empty() {
            return Err(DirectoryError::Validation(errors));
        }
        let department = Self::department_of(&draft)?;

        let (photo_path, photo_was_replaced) = match photo {
            Some(upload) => {
                let stored = self
                    .photos
                    .replace(
                        existing.photo_path.as_deref(),
                        &upload.filename,
                        &upload.bytes,
                    )
                    .await?;
                (Some(stored), true)
            }
            None => (existing.photo_path.clone(), false),
        };

        let updated = self
            .employees
            .update(
                id,
                EmployeeFields {
                    name: draft.name,
                    email: draft.email,
                    department,
                    photo_path: photo_path.clone(),
                },
            )
            .await?;

        match updated {
            Some(employee) => Ok(employee),
            None => {
                // The record vanished between lookup and write. Release the
                // freshly stored photo so nothing ends up referencing it.
                if photo_was_replaced {
                    if let Some(stored) = &photo_path {
                        if let Err(err) = self.photos.delete(stored).await {
                            warn!("could not release photo '{}' after lost update: {}", stored, err);
                        }
                    }
                }
                Err(DirectoryError::NotFound)
            }
        }
    }

    /// Removes the record, then best-effort deletes its photo. A failed photo
    /// delete does not roll back the record removal; the leak is logged.
    pub async fn delete_employee(&self, id: i32) -> Result<Employee, DirectoryError> {
        let removed = match self.employees.delete(id).await? {
            Some(employee) => employee,
            None => return Err(DirectoryError::NotFound),
        };
        if let Some(stored) = &removed.photo_path {
            if let Err(err) = self.photos.delete(stored).await {
                warn!("employee {} deleted but photo '{}' leaked: {}", removed.id, stored, err);
            }
        }
        Ok(removed)
    }
}
