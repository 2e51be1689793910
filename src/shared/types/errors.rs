use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// Proposed booking window does not have `start < end`.
    #[error("Invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: String, end: String },

    /// An active reservation already overlaps the requested window.
    #[error("Time slot is already booked")]
    SlotUnavailable { space_id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, value: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: value.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}
