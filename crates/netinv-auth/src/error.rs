//! Authentication error types.

use netinv_core::error::NetinvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl From<AuthError> for NetinvError {
    fn from(err: AuthError) -> Self {
        NetinvError::AuthenticationFailed {
            reason: err.to_string(),
        }
    }
}
