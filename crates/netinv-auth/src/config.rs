//! Directory service configuration.
//!
//! Connection parameters come from the environment; nothing
//! operational is compiled into the binary.

/// Configuration for the external directory service.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Directory host name or address.
    pub host: String,
    /// Directory port (global-catalog port by default).
    pub port: u16,
    /// Domain suffix appended to bare account identifiers.
    pub domain: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3268,
            domain: "example.local".into(),
        }
    }
}

impl DirectoryConfig {
    /// Build a config from `NETINV_DIRECTORY_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("NETINV_DIRECTORY_HOST").unwrap_or(defaults.host),
            port: std::env::var("NETINV_DIRECTORY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            domain: std::env::var("NETINV_DIRECTORY_DOMAIN").unwrap_or(defaults.domain),
        }
    }

    /// The fully-qualified bind identifier for a bare account name.
    pub fn bind_identifier(&self, account: &str) -> String {
        format!("{account}@{}", self.domain)
    }
}
