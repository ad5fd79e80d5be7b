//! Advisory uniqueness checks, run before every create/update commit.
//!
//! The tag check is bidirectional: asset-side validation queries switch
//! tags and switch-side validation queries asset tags, so neither
//! entity type can acquire a tag the other already holds. All
//! comparisons are case-insensitive exact matches. The UNIQUE indexes
//! in the schema remain the atomic backstop for the single-table
//! constraints.

use netinv_core::error::{NetinvError, NetinvResult};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
pub(crate) struct IdRow {
    pub(crate) record_id: String,
}

/// Record ids in `query`'s first result set whose lowercased needle
/// matches, minus the excluded record.
async fn matching_ids<C: Connection>(
    db: &Surreal<C>,
    query: &str,
    needle: &str,
    exclude: Option<Uuid>,
) -> Result<Vec<String>, DbError> {
    let mut result = db
        .query(query)
        .bind(("needle", needle.to_lowercase()))
        .await?;
    let rows: Vec<IdRow> = result.take(0)?;
    let excluded = exclude.map(|id| id.to_string());
    Ok(rows
        .into_iter()
        .map(|r| r.record_id)
        .filter(|id| Some(id) != excluded.as_ref())
        .collect())
}

/// Reject an asset serial already used by another asset.
pub(crate) async fn assert_asset_serial_free<C: Connection>(
    db: &Surreal<C>,
    serial: &str,
    exclude: Option<Uuid>,
) -> NetinvResult<()> {
    let hits = matching_ids(
        db,
        "SELECT meta::id(id) AS record_id FROM asset \
         WHERE serial_norm = $needle",
        serial,
        exclude,
    )
    .await
    .map_err(NetinvError::from)?;

    if hits.is_empty() {
        Ok(())
    } else {
        Err(NetinvError::UniquenessViolation {
            entity: "asset".into(),
            field: "device_serial".into(),
            value: serial.into(),
        })
    }
}

/// Reject an admin IP already used by another asset.
pub(crate) async fn assert_admin_ip_free<C: Connection>(
    db: &Surreal<C>,
    ip: &str,
    exclude: Option<Uuid>,
) -> NetinvResult<()> {
    let hits = matching_ids(
        db,
        "SELECT meta::id(id) AS record_id FROM asset \
         WHERE string::lowercase(admin_ip) = $needle",
        ip,
        exclude,
    )
    .await
    .map_err(NetinvError::from)?;

    if hits.is_empty() {
        Ok(())
    } else {
        Err(NetinvError::UniquenessViolation {
            entity: "asset".into(),
            field: "admin_ip".into(),
            value: ip.into(),
        })
    }
}

/// Reject a switch serial already used by another switch.
pub(crate) async fn assert_switch_serial_free<C: Connection>(
    db: &Surreal<C>,
    serial: &str,
    exclude: Option<Uuid>,
) -> NetinvResult<()> {
    let hits = matching_ids(
        db,
        "SELECT meta::id(id) AS record_id FROM switch \
         WHERE serial_norm = $needle",
        serial,
        exclude,
    )
    .await
    .map_err(NetinvError::from)?;

    if hits.is_empty() {
        Ok(())
    } else {
        Err(NetinvError::UniquenessViolation {
            entity: "switch".into(),
            field: "serial".into(),
            value: serial.into(),
        })
    }
}

/// Reject a tag already held by any asset or any switch, other than
/// the excluded records themselves. Callers pass their own id as the
/// exclusion on update.
pub(crate) async fn assert_tag_free<C: Connection>(
    db: &Surreal<C>,
    tag: &str,
    exclude_asset: Option<Uuid>,
    exclude_switch: Option<Uuid>,
) -> NetinvResult<()> {
    let asset_hits = matching_ids(
        db,
        "SELECT meta::id(id) AS record_id FROM asset \
         WHERE string::lowercase(device_tag ?? '') = $needle",
        tag,
        exclude_asset,
    )
    .await
    .map_err(NetinvError::from)?;

    if !asset_hits.is_empty() {
        return Err(NetinvError::TagCollision {
            entity: "asset".into(),
            tag: tag.into(),
        });
    }

    let switch_hits = matching_ids(
        db,
        "SELECT meta::id(id) AS record_id FROM switch \
         WHERE string::lowercase(tag ?? '') = $needle",
        tag,
        exclude_switch,
    )
    .await
    .map_err(NetinvError::from)?;

    if !switch_hits.is_empty() {
        return Err(NetinvError::TagCollision {
            entity: "switch".into(),
            tag: tag.into(),
        });
    }

    Ok(())
}
