//! NETINV Auth — Directory-backed login gate.
//!
//! The directory service (an LDAP-style catalog) is consumed purely as
//! a boolean credentials oracle behind [`DirectoryAuthenticator`]; the
//! wire transport lives with the web layer.

pub mod config;
pub mod directory;
pub mod error;
pub mod service;

pub use config::DirectoryConfig;
pub use directory::{DirectoryAuthenticator, DirectoryError};
pub use error::AuthError;
pub use service::AuthService;
