//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in the
//! database crate; services and the import reconciler are generic over
//! these traits.

use uuid::Uuid;

use crate::error::NetinvResult;
use crate::models::{
    asset::{Asset, CreateAsset, UpdateAsset},
    history::StatusHistoryEntry,
    status::AssetStatus,
    switch::{CreateSwitch, Switch, UpdateSwitch},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// Filters for asset searches.
///
/// `q` is matched case-insensitively as a substring over every textual
/// asset field and over the model/serial/tag of each owned switch.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub q: Option<String>,
    pub status: Option<AssetStatus>,
}

pub trait AssetRepository: Send + Sync {
    /// Create an asset and write its initial status-history entry
    /// (`previous = None`).
    fn create(&self, input: CreateAsset) -> impl Future<Output = NetinvResult<Asset>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = NetinvResult<Asset>> + Send;
    /// Case-insensitive serial lookup.
    fn get_by_serial(&self, serial: &str) -> impl Future<Output = NetinvResult<Asset>> + Send;
    fn get_by_admin_ip(&self, ip: &str) -> impl Future<Output = NetinvResult<Asset>> + Send;
    /// Partial update. Refreshes `updated_at`; appends one history
    /// entry when the status actually changes.
    fn update(
        &self,
        id: Uuid,
        input: UpdateAsset,
    ) -> impl Future<Output = NetinvResult<Asset>> + Send;
    /// Dedicated status-change operation; same history semantics as
    /// [`AssetRepository::update`].
    fn change_status(
        &self,
        id: Uuid,
        status: AssetStatus,
    ) -> impl Future<Output = NetinvResult<Asset>> + Send;
    /// Hard delete, cascading owned switches and status history.
    fn delete(&self, id: Uuid) -> impl Future<Output = NetinvResult<()>> + Send;
    /// Filtered search. Results contain no duplicates even when the
    /// query matches through several owned switches.
    fn search(&self, filter: AssetFilter) -> impl Future<Output = NetinvResult<Vec<Asset>>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = NetinvResult<PaginatedResult<Asset>>> + Send;
}

pub trait SwitchRepository: Send + Sync {
    fn create(&self, input: CreateSwitch) -> impl Future<Output = NetinvResult<Switch>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = NetinvResult<Switch>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateSwitch,
    ) -> impl Future<Output = NetinvResult<Switch>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = NetinvResult<()>> + Send;
    fn list_by_asset(
        &self,
        asset_id: Uuid,
    ) -> impl Future<Output = NetinvResult<Vec<Switch>>> + Send;
}

pub trait StatusHistoryRepository: Send + Sync {
    /// Entries for one asset, newest first. Appends happen inside the
    /// asset save paths; there is no independent write operation.
    fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> impl Future<Output = NetinvResult<Vec<StatusHistoryEntry>>> + Send;
}
