//! SurrealDB implementation of [`StatusHistoryRepository`] and the
//! internal append path used by the asset save operations.

use chrono::{DateTime, Utc};
use netinv_core::error::NetinvResult;
use netinv_core::models::history::StatusHistoryEntry;
use netinv_core::models::status::AssetStatus;
use netinv_core::repository::StatusHistoryRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct HistoryRowWithId {
    record_id: String,
    asset_id: String,
    previous_status: Option<String>,
    new_status: String,
    changed_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<AssetStatus, DbError> {
    AssetStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown asset status: {s}")))
}

impl HistoryRowWithId {
    fn try_into_entry(self) -> Result<StatusHistoryEntry, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let asset_id = Uuid::parse_str(&self.asset_id)
            .map_err(|e| DbError::Decode(format!("invalid asset UUID: {e}")))?;
        let previous = match self.previous_status {
            Some(s) => Some(parse_status(&s)?),
            None => None,
        };
        Ok(StatusHistoryEntry {
            id,
            asset_id,
            previous,
            new: parse_status(&self.new_status)?,
            changed_at: self.changed_at,
        })
    }
}

/// Append one transition record. Called from the asset create and
/// update paths only; the timestamp is bound here so consecutive
/// transitions stay strictly ordered.
pub(crate) async fn append<C: Connection>(
    db: &Surreal<C>,
    asset_id: Uuid,
    previous: Option<AssetStatus>,
    new: AssetStatus,
) -> Result<(), DbError> {
    db.query(
        "CREATE type::record('status_history', $id) SET \
         asset_id = $asset_id, previous_status = $previous, \
         new_status = $new, changed_at = $changed_at",
    )
    .bind(("id", Uuid::new_v4().to_string()))
    .bind(("asset_id", asset_id.to_string()))
    .bind(("previous", previous.map(|s| s.as_str().to_string())))
    .bind(("new", new.as_str().to_string()))
    .bind(("changed_at", Utc::now()))
    .await?
    .check()
    .map_err(|e| DbError::Query(e.to_string()))?;

    Ok(())
}

/// SurrealDB implementation of the status history repository.
#[derive(Clone)]
pub struct SurrealStatusHistoryRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealStatusHistoryRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> StatusHistoryRepository for SurrealStatusHistoryRepository<C> {
    async fn list_for_asset(&self, asset_id: Uuid) -> NetinvResult<Vec<StatusHistoryEntry>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM status_history \
                 WHERE asset_id = $asset_id \
                 ORDER BY changed_at DESC",
            )
            .bind(("asset_id", asset_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HistoryRowWithId> = result.take(0).map_err(DbError::from)?;

        let entries = rows
            .into_iter()
            .map(|row| row.try_into_entry())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(entries)
    }
}
