//! Login service over the directory oracle.

use netinv_core::error::NetinvResult;
use tracing::{debug, info, warn};

use crate::directory::DirectoryAuthenticator;
use crate::error::AuthError;

/// Authentication service.
///
/// Generic over the directory backend so the login flow carries no
/// dependency on the wire transport. A directory outage and a wrong
/// password both surface as the same invalid-credentials failure; the
/// distinction is only logged.
pub struct AuthService<D: DirectoryAuthenticator> {
    directory: D,
}

impl<D: DirectoryAuthenticator> AuthService<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Validate a credentials pair against the directory.
    pub async fn login(&self, identifier: &str, secret: &str) -> NetinvResult<()> {
        // 1. Reject empty credentials before touching the directory.
        if identifier.trim().is_empty() || secret.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 2. Ask the oracle.
        match self.directory.authenticate(identifier, secret).await {
            Ok(true) => {
                info!(identifier, "directory login succeeded");
                Ok(())
            }
            Ok(false) => {
                debug!(identifier, "directory rejected credentials");
                Err(AuthError::InvalidCredentials.into())
            }
            Err(e) => {
                warn!(identifier, error = %e, "directory authentication unavailable");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }
}
