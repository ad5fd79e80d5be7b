//! Switch domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Known switch hardware models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwitchModel {
    FortiSwitch224E,
    FortiSwitch248E,
}

impl SwitchModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FortiSwitch224E => "FortiSwitch 224E",
            Self::FortiSwitch248E => "FortiSwitch 248E",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fortiswitch 224e" => Some(Self::FortiSwitch224E),
            "fortiswitch 248e" => Some(Self::FortiSwitch248E),
            _ => None,
        }
    }
}

impl std::fmt::Display for SwitchModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A network switch owned by exactly one asset. Cascade-deleted with
/// its owner; independently deletable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Switch {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub model: SwitchModel,
    pub serial: String,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSwitch {
    pub asset_id: Uuid,
    pub model: SwitchModel,
    pub serial: String,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateSwitch {
    pub model: Option<SwitchModel>,
    pub serial: Option<String>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub tag: Option<Option<String>>,
}
