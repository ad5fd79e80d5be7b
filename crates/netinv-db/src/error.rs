//! Database-specific error types and conversions.

use netinv_core::error::NetinvError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Failed to decode row: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for NetinvError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => NetinvError::NotFound { entity, id },
            other => NetinvError::Database(other.to_string()),
        }
    }
}
