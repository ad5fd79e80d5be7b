//! Status history domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::AssetStatus;

/// One recorded status transition of an asset.
///
/// Append-only: entries are never updated, and are deleted only by
/// cascade when the owning asset is deleted. The entry written at
/// asset creation has `previous = None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub previous: Option<AssetStatus>,
    pub new: AssetStatus,
    pub changed_at: DateTime<Utc>,
}
