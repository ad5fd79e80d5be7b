//! SurrealDB implementation of [`SwitchRepository`].
//!
//! Switch serials are unique among switches; tags are checked against
//! both switches and assets before commit (the asset side of the same
//! check lives in the asset repository, so the validation is
//! bidirectional).

use netinv_core::error::NetinvResult;
use netinv_core::models::switch::{CreateSwitch, Switch, SwitchModel, UpdateSwitch};
use netinv_core::repository::SwitchRepository;
use netinv_core::validate;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::blank_to_none;
use crate::repository::uniqueness::{self, IdRow};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct SwitchRow {
    asset_id: String,
    model: String,
    serial: String,
    #[allow(dead_code)]
    serial_norm: String,
    tag: Option<String>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct SwitchRowWithId {
    record_id: String,
    asset_id: String,
    model: String,
    serial: String,
    #[allow(dead_code)]
    serial_norm: String,
    tag: Option<String>,
}

fn parse_model(s: &str) -> Result<SwitchModel, DbError> {
    SwitchModel::parse(s).ok_or_else(|| DbError::Decode(format!("unknown switch model: {s}")))
}

fn parse_asset_id(s: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(s).map_err(|e| DbError::Decode(format!("invalid asset UUID: {e}")))
}

impl SwitchRow {
    fn into_switch(self, id: Uuid) -> Result<Switch, DbError> {
        Ok(Switch {
            id,
            asset_id: parse_asset_id(&self.asset_id)?,
            model: parse_model(&self.model)?,
            serial: self.serial,
            tag: self.tag,
        })
    }
}

impl SwitchRowWithId {
    fn try_into_switch(self) -> Result<Switch, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Switch {
            id,
            asset_id: parse_asset_id(&self.asset_id)?,
            model: parse_model(&self.model)?,
            serial: self.serial,
            tag: self.tag,
        })
    }
}

/// SurrealDB implementation of the switch repository.
#[derive(Clone)]
pub struct SurrealSwitchRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSwitchRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn assert_owner_exists(&self, asset_id: Uuid) -> NetinvResult<()> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id FROM type::record('asset', $id)")
            .bind(("id", asset_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<IdRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "asset".into(),
                id: asset_id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl<C: Connection> SwitchRepository for SurrealSwitchRepository<C> {
    async fn create(&self, input: CreateSwitch) -> NetinvResult<Switch> {
        validate::required("serial", &input.serial)?;
        self.assert_owner_exists(input.asset_id).await?;

        let tag = blank_to_none(input.tag);

        uniqueness::assert_switch_serial_free(&self.db, &input.serial, None).await?;
        if let Some(tag) = &tag {
            uniqueness::assert_tag_free(&self.db, tag, None, None).await?;
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('switch', $id) SET \
                 asset_id = $asset_id, model = $model, \
                 serial = $serial, \
                 serial_norm = string::lowercase($serial), \
                 tag = $tag",
            )
            .bind(("id", id_str.clone()))
            .bind(("asset_id", input.asset_id.to_string()))
            .bind(("model", input.model.as_str().to_string()))
            .bind(("serial", input.serial))
            .bind(("tag", tag))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<SwitchRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "switch".into(),
            id: id_str,
        })?;

        Ok(row.into_switch(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> NetinvResult<Switch> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('switch', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SwitchRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "switch".into(),
            id: id_str,
        })?;

        Ok(row.into_switch(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateSwitch) -> NetinvResult<Switch> {
        // Surface NotFound before any constraint check.
        let current = self.get_by_id(id).await?;

        if let Some(serial) = &input.serial {
            validate::required("serial", serial)?;
            uniqueness::assert_switch_serial_free(&self.db, serial, Some(id)).await?;
        }
        let tag = input.tag.map(blank_to_none);
        if let Some(Some(tag)) = &tag {
            uniqueness::assert_tag_free(&self.db, tag, None, Some(id)).await?;
        }

        let mut sets = Vec::new();
        if input.model.is_some() {
            sets.push("model = $model");
        }
        if input.serial.is_some() {
            sets.push("serial = $serial");
            sets.push("serial_norm = string::lowercase($serial)");
        }
        if tag.is_some() {
            sets.push("tag = $tag");
        }
        if sets.is_empty() {
            return Ok(current);
        }

        let query = format!(
            "UPDATE type::record('switch', $id) SET {}",
            sets.join(", ")
        );

        let id_str = id.to_string();
        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(model) = input.model {
            builder = builder.bind(("model", model.as_str().to_string()));
        }
        if let Some(serial) = input.serial {
            builder = builder.bind(("serial", serial));
        }
        if let Some(tag) = tag {
            builder = builder.bind(("tag", tag));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<SwitchRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "switch".into(),
            id: id_str,
        })?;

        Ok(row.into_switch(id)?)
    }

    async fn delete(&self, id: Uuid) -> NetinvResult<()> {
        self.get_by_id(id).await?;

        self.db
            .query("DELETE type::record('switch', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_by_asset(&self, asset_id: Uuid) -> NetinvResult<Vec<Switch>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM switch \
                 WHERE asset_id = $asset_id ORDER BY serial ASC",
            )
            .bind(("asset_id", asset_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SwitchRowWithId> = result.take(0).map_err(DbError::from)?;

        let switches = rows
            .into_iter()
            .map(|row| row.try_into_switch())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(switches)
    }
}
