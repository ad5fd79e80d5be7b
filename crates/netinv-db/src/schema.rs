//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.
//!
//! Serial values must be unique case-insensitively, so each table
//! carries a `serial_norm` shadow column holding the lowercased serial
//! and the UNIQUE index sits on that column. The repositories write the
//! shadow column on every create/update; together with the UNIQUE index
//! on `admin_ip` this makes the uniqueness constraints atomic at the
//! storage layer while the repository pre-checks stay advisory.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Assets (firewall appliances)
-- =======================================================================
DEFINE TABLE asset SCHEMAFULL;
DEFINE FIELD region ON TABLE asset TYPE string;
DEFINE FIELD title ON TABLE asset TYPE string;
DEFINE FIELD unit_detail ON TABLE asset TYPE option<string>;
DEFINE FIELD device_model ON TABLE asset TYPE string;
DEFINE FIELD device_serial ON TABLE asset TYPE string;
DEFINE FIELD serial_norm ON TABLE asset TYPE string;
DEFINE FIELD device_tag ON TABLE asset TYPE option<string>;
DEFINE FIELD ospf ON TABLE asset TYPE option<string>;
DEFINE FIELD admin_ip ON TABLE asset TYPE string;
DEFINE FIELD subnet ON TABLE asset TYPE option<string>;
DEFINE FIELD dmz_network ON TABLE asset TYPE option<string>;
DEFINE FIELD wifi_network ON TABLE asset TYPE option<string>;
DEFINE FIELD status ON TABLE asset TYPE string \
    ASSERT $value IN ['Active', 'UnderObservation', 'Burned', \
    'Decommissioned'];
DEFINE FIELD admin_group ON TABLE asset TYPE option<string>;
DEFINE FIELD admin_name ON TABLE asset TYPE string;
DEFINE FIELD admin_phone ON TABLE asset TYPE option<string>;
DEFINE FIELD notes ON TABLE asset TYPE option<string>;
DEFINE FIELD created_at ON TABLE asset TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE asset TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_asset_serial ON TABLE asset \
    COLUMNS serial_norm UNIQUE;
DEFINE INDEX idx_asset_admin_ip ON TABLE asset \
    COLUMNS admin_ip UNIQUE;

-- =======================================================================
-- Switches (owned by one asset, cascade-deleted with it)
-- =======================================================================
DEFINE TABLE switch SCHEMAFULL;
DEFINE FIELD asset_id ON TABLE switch TYPE string;
DEFINE FIELD model ON TABLE switch TYPE string \
    ASSERT $value IN ['FortiSwitch 224E', 'FortiSwitch 248E'];
DEFINE FIELD serial ON TABLE switch TYPE string;
DEFINE FIELD serial_norm ON TABLE switch TYPE string;
DEFINE FIELD tag ON TABLE switch TYPE option<string>;
DEFINE INDEX idx_switch_serial ON TABLE switch \
    COLUMNS serial_norm UNIQUE;
DEFINE INDEX idx_switch_asset ON TABLE switch COLUMNS asset_id;

-- =======================================================================
-- Status history (append-only; rows removed only by owner cascade)
-- =======================================================================
DEFINE TABLE status_history SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete FULL;
DEFINE FIELD asset_id ON TABLE status_history TYPE string;
DEFINE FIELD previous_status ON TABLE status_history \
    TYPE option<string>;
DEFINE FIELD new_status ON TABLE status_history TYPE string \
    ASSERT $value IN ['Active', 'UnderObservation', 'Burned', \
    'Decommissioned'];
DEFINE FIELD changed_at ON TABLE status_history TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_history_asset ON TABLE status_history \
    COLUMNS asset_id, changed_at;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
