use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::DirectoryError;
use crate::models::Employee;

use super::{EmployeeFields, EmployeeStore};

struct Inner {
    employees: Vec<Employee>,
    next_id: i32,
}

/// In-memory employee store. Keeps records in insertion order and assigns ids
/// from a counter that only ever moves forward, so a deleted id is never
/// handed out again.
pub struct MemoryEmployeeStore {
    inner: Mutex<Inner>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        MemoryEmployeeStore {
            inner: Mutex::new(Inner {
                employees: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of records currently held. Handy in tests that assert the store
    /// was left untouched.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn get(&self, id: i32) -> Result<Option<Employee>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.employees.iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Employee>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.employees.clone())
    }

    async fn add(&self, fields: EmployeeFields) -> Result<Employee, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        let employee = Employee {
            id,
            name: fields.name,
            email: fields.email,
            department: fields.department,
            photo_path: fields.photo_path,
        };
        inner.employees.push(employee.clone());
        Ok(employee)
    }

    async fn update(
        &self,
        id: i32,
        fields: EmployeeFields,
    ) -> Result<Option<Employee>, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.employees.iter_mut().find(|e| e.id == id) {
            Some(existing) => {
                existing.name = fields.name;
                existing.email = fields.email;
                existing.department = fields.department;
                existing.photo_path = fields.photo_path;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<Option<Employee>, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.employees.iter().position(|e| e.id == id) {
            Some(index) => Ok(Some(inner.employees.remove(index))),
            None => Ok(None),
        }
    }
}
