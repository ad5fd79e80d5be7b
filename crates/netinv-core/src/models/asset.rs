//! Asset (firewall appliance) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::AssetStatus;

/// A tracked network appliance record.
///
/// `device_serial` is unique across all assets (case-insensitive),
/// `admin_ip` is unique across all assets, and `device_tag`, when
/// present, is unique across assets *and* switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub region: String,
    pub title: String,
    pub unit_detail: Option<String>,
    pub device_model: String,
    pub device_serial: String,
    pub device_tag: Option<String>,
    pub ospf: Option<String>,
    pub admin_ip: String,
    pub subnet: Option<String>,
    pub dmz_network: Option<String>,
    pub wifi_network: Option<String>,
    pub status: AssetStatus,
    pub admin_group: Option<String>,
    pub admin_name: String,
    pub admin_phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAsset {
    pub region: String,
    pub title: String,
    pub unit_detail: Option<String>,
    pub device_model: String,
    pub device_serial: String,
    pub device_tag: Option<String>,
    pub ospf: Option<String>,
    pub admin_ip: String,
    pub subnet: Option<String>,
    pub dmz_network: Option<String>,
    pub wifi_network: Option<String>,
    /// Defaults to [`AssetStatus::Active`] when not supplied.
    pub status: Option<AssetStatus>,
    pub admin_group: Option<String>,
    pub admin_name: String,
    pub admin_phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateAsset {
    pub region: Option<String>,
    pub title: Option<String>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub unit_detail: Option<Option<String>>,
    pub device_model: Option<String>,
    pub device_serial: Option<String>,
    pub device_tag: Option<Option<String>>,
    pub ospf: Option<Option<String>>,
    pub admin_ip: Option<String>,
    pub subnet: Option<Option<String>>,
    pub dmz_network: Option<Option<String>>,
    pub wifi_network: Option<Option<String>>,
    pub status: Option<AssetStatus>,
    pub admin_group: Option<Option<String>>,
    pub admin_name: Option<String>,
    pub admin_phone: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}
