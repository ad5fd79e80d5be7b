//! Directory authentication oracle.

use thiserror::Error;

/// Errors a directory backend can report. These never reach the end
/// user; the login service collapses them into a generic
/// invalid-credentials outcome.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory unreachable: {0}")]
    Unreachable(String),

    #[error("directory protocol error: {0}")]
    Protocol(String),
}

/// Boolean credentials oracle over an external directory service.
///
/// Implementations perform the actual bind against the directory; the
/// login service only consumes the outcome.
pub trait DirectoryAuthenticator: Send + Sync {
    /// `Ok(true)` when the identifier/secret pair binds successfully.
    fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> impl Future<Output = Result<bool, DirectoryError>> + Send;
}
