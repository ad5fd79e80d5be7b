//! Error types for the NETINV system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetinvError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Duplicate value for {entity}.{field}: {value}")]
    UniquenessViolation {
        entity: String,
        field: String,
        value: String,
    },

    #[error("Tag '{tag}' is already assigned to a {entity}")]
    TagCollision { entity: String, tag: String },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type NetinvResult<T> = Result<T, NetinvError>;
