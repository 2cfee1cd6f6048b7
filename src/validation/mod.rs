//! Field-level validation applied to drafts before anything touches a store.
//!
//! All violated rules are reported together, in a stable field order, so a
//! form can show every problem at once instead of one per round trip.

use validator::Validate;

use crate::errors::FieldError;
use crate::models::{EmployeeDraft, PhotoUpload};

/// Largest accepted photo upload.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

/// Fields in the order their errors are reported.
const FIELD_ORDER: [&str; 3] = ["name", "email", "department"];

/// Runs every draft rule and returns the violations in field order. An empty
/// vector means the draft is valid. Pure; safe to call concurrently.
pub fn validate_draft(draft: &EmployeeDraft) -> Vec<FieldError> {
    let outcome = match draft.validate() {
        Ok(()) => return Vec::new(),
        Err(errors) => errors,
    };

    let by_field = outcome.field_errors();
    let mut errors = Vec::new();
    for field in FIELD_ORDER {
        if let Some(violations) = by_field.get(field) {
            for violation in violations.iter() {
                let message = violation
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| violation.code.to_string());
                errors.push(FieldError::new(field, message));
            }
        }
    }
    errors
}

/// Checks a submitted photo: only JPEG and PNG content is accepted, sniffed
/// from the bytes rather than trusted from the filename, and uploads are
/// capped at [`MAX_PHOTO_BYTES`].
pub fn validate_photo(photo: &PhotoUpload) -> Option<FieldError> {
    if photo.bytes.len() > MAX_PHOTO_BYTES {
        return Some(FieldError::new(
            "photo",
            format!("Photo exceeds the {} byte limit", MAX_PHOTO_BYTES),
        ));
    }
    match infer::get(&photo.bytes) {
        Some(kind) if matches!(kind.mime_type(), "image/jpeg" | "image/png") => None,
        _ => Some(FieldError::new("photo", "Only JPEG and PNG photos are allowed")),
    }
}
