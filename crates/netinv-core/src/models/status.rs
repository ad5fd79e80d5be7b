//! Asset lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an asset. Any state may transition to any other
/// state; transitions are recorded in the status history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Active,
    UnderObservation,
    Burned,
    Decommissioned,
}

impl AssetStatus {
    /// Canonical string form, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::UnderObservation => "UnderObservation",
            Self::Burned => "Burned",
            Self::Decommissioned => "Decommissioned",
        }
    }

    /// Parse the canonical string form, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "underobservation" => Some(Self::UnderObservation),
            "burned" => Some(Self::Burned),
            "decommissioned" => Some(Self::Decommissioned),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
