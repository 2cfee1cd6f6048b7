//! Authentication checkpoint in front of mutating directory operations.
//!
//! Credential verification itself lives outside the core; the gate only
//! consumes the pass/fail contract of an [`IdentityProvider`]. Reads pass
//! through ungated.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::directory::DirectoryService;
use crate::errors::DirectoryError;
use crate::models::{Employee, EmployeeDraft, PhotoUpload};

/// A verified caller. The subject is whatever the provider vouches for,
/// typically a user id or email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

/// External identity provider contract. Any non-success is a rejection; there
/// are no partial-trust states.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, credentials: &str) -> Option<Identity>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// Identity provider that verifies HS256 bearer tokens. Token issuance and
/// the credential store behind it are someone else's problem; this only
/// checks signatures and expiry.
pub struct JwtIdentityProvider {
    secret: String,
}

impl JwtIdentityProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        JwtIdentityProvider {
            secret: secret.into(),
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        JwtIdentityProvider::new(secret)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn verify(&self, credentials: &str) -> Option<Identity> {
        decode::<Claims>(
            credentials,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .ok()
        .map(|data| Identity {
            subject: data.claims.sub,
        })
    }
}

/// Wraps a [`DirectoryService`] so that every mutating operation runs only
/// for verified callers. The gate is stateless per call; it holds no session
/// state beyond what the provider returns.
pub struct AccessGate {
    service: DirectoryService,
    identity: Arc<dyn IdentityProvider>,
}

impl AccessGate {
    pub fn new(service: DirectoryService, identity: Arc<dyn IdentityProvider>) -> Self {
        AccessGate { service, identity }
    }

    async fn authorize(&self, credentials: &str) -> Result<Identity, DirectoryError> {
        self.identity
            .verify(credentials)
            .await
            .ok_or(DirectoryError::Unauthorized)
    }

    pub async fn get_employee(&self, id: i32) -> Result<Employee, DirectoryError> {
        self.service.get_employee(id).await
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, DirectoryError> {
        self.service.list_employees().await
    }

    pub async fn create_employee(
        &self,
        credentials: &str,
        draft: EmployeeDraft,
        photo: Option<PhotoUpload>,
    ) -> Result<Employee, DirectoryError> {
        self.authorize(credentials).await?;
        self.service.create_employee(draft, photo).await
    }

    pub async fn update_employee(
        &self,
        credentials: &str,
        id: i32,
        draft: EmployeeDraft,
        photo: Option<PhotoUpload>,
    ) -> Result<Employee, DirectoryError> {
        self.authorize(credentials).await?;
        self.service.update_employee(id, draft, photo).await
    }

    pub async fn delete_employee(
        &self,
        credentials: &str,
        id: i32,
    ) -> Result<Employee, DirectoryError> {
        self.authorize(credentials).await?;
        self.service.delete_employee(id).await
    }
}
