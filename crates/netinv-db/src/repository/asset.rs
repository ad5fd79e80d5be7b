//! SurrealDB implementation of [`AssetRepository`].
//!
//! Uniqueness pre-checks run before every commit and produce
//! field-level errors; the schema's UNIQUE indexes enforce the
//! single-table constraints atomically underneath them. Every status
//! change observed by a save appends exactly one history record.

use chrono::{DateTime, Utc};
use netinv_core::error::NetinvResult;
use netinv_core::models::asset::{Asset, CreateAsset, UpdateAsset};
use netinv_core::models::status::AssetStatus;
use netinv_core::repository::{AssetFilter, AssetRepository, PaginatedResult, Pagination};
use netinv_core::validate;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::{blank_to_none, history, uniqueness};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct AssetRow {
    region: String,
    title: String,
    unit_detail: Option<String>,
    device_model: String,
    device_serial: String,
    #[allow(dead_code)]
    serial_norm: String,
    device_tag: Option<String>,
    ospf: Option<String>,
    admin_ip: String,
    subnet: Option<String>,
    dmz_network: Option<String>,
    wifi_network: Option<String>,
    status: String,
    admin_group: Option<String>,
    admin_name: String,
    admin_phone: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AssetRowWithId {
    record_id: String,
    region: String,
    title: String,
    unit_detail: Option<String>,
    device_model: String,
    device_serial: String,
    #[allow(dead_code)]
    serial_norm: String,
    device_tag: Option<String>,
    ospf: Option<String>,
    admin_ip: String,
    subnet: Option<String>,
    dmz_network: Option<String>,
    wifi_network: Option<String>,
    status: String,
    admin_group: Option<String>,
    admin_name: String,
    admin_phone: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<AssetStatus, DbError> {
    AssetStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown asset status: {s}")))
}

impl AssetRow {
    fn into_asset(self, id: Uuid) -> Result<Asset, DbError> {
        Ok(Asset {
            id,
            region: self.region,
            title: self.title,
            unit_detail: self.unit_detail,
            device_model: self.device_model,
            device_serial: self.device_serial,
            device_tag: self.device_tag,
            ospf: self.ospf,
            admin_ip: self.admin_ip,
            subnet: self.subnet,
            dmz_network: self.dmz_network,
            wifi_network: self.wifi_network,
            status: parse_status(&self.status)?,
            admin_group: self.admin_group,
            admin_name: self.admin_name,
            admin_phone: self.admin_phone,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl AssetRowWithId {
    fn try_into_asset(self) -> Result<Asset, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Asset {
            id,
            region: self.region,
            title: self.title,
            unit_detail: self.unit_detail,
            device_model: self.device_model,
            device_serial: self.device_serial,
            device_tag: self.device_tag,
            ospf: self.ospf,
            admin_ip: self.admin_ip,
            subnet: self.subnet,
            dmz_network: self.dmz_network,
            wifi_network: self.wifi_network,
            status: parse_status(&self.status)?,
            admin_group: self.admin_group,
            admin_name: self.admin_name,
            admin_phone: self.admin_phone,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Owner projection for the switch-side leg of a search.
#[derive(Debug, SurrealValue)]
struct SwitchOwnerRow {
    asset_id: String,
}

/// Textual asset columns searched by the `q` filter, as SurrealQL
/// match expressions over the lowercased query.
const SEARCH_CONDITIONS: &[&str] = &[
    "string::contains(string::lowercase(region), $q)",
    "string::contains(string::lowercase(title), $q)",
    "string::contains(string::lowercase(unit_detail ?? ''), $q)",
    "string::contains(string::lowercase(device_model), $q)",
    "string::contains(serial_norm, $q)",
    "string::contains(string::lowercase(device_tag ?? ''), $q)",
    "string::contains(string::lowercase(ospf ?? ''), $q)",
    "string::contains(string::lowercase(admin_ip), $q)",
    "string::contains(string::lowercase(subnet ?? ''), $q)",
    "string::contains(string::lowercase(dmz_network ?? ''), $q)",
    "string::contains(string::lowercase(wifi_network ?? ''), $q)",
    "string::contains(string::lowercase(admin_group ?? ''), $q)",
    "string::contains(string::lowercase(admin_name), $q)",
    "string::contains(string::lowercase(admin_phone ?? ''), $q)",
    "string::contains(string::lowercase(notes ?? ''), $q)",
];

/// SurrealDB implementation of the asset repository.
#[derive(Clone)]
pub struct SurrealAssetRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAssetRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AssetRepository for SurrealAssetRepository<C> {
    async fn create(&self, input: CreateAsset) -> NetinvResult<Asset> {
        validate::create_asset(&input)?;

        let device_tag = blank_to_none(input.device_tag);

        uniqueness::assert_asset_serial_free(&self.db, &input.device_serial, None).await?;
        uniqueness::assert_admin_ip_free(&self.db, &input.admin_ip, None).await?;
        if let Some(tag) = &device_tag {
            uniqueness::assert_tag_free(&self.db, tag, None, None).await?;
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let status = input.status.unwrap_or_default();

        let result = self
            .db
            .query(
                "CREATE type::record('asset', $id) SET \
                 region = $region, title = $title, \
                 unit_detail = $unit_detail, \
                 device_model = $device_model, \
                 device_serial = $device_serial, \
                 serial_norm = string::lowercase($device_serial), \
                 device_tag = $device_tag, ospf = $ospf, \
                 admin_ip = $admin_ip, subnet = $subnet, \
                 dmz_network = $dmz_network, \
                 wifi_network = $wifi_network, status = $status, \
                 admin_group = $admin_group, admin_name = $admin_name, \
                 admin_phone = $admin_phone, notes = $notes",
            )
            .bind(("id", id_str.clone()))
            .bind(("region", input.region))
            .bind(("title", input.title))
            .bind(("unit_detail", blank_to_none(input.unit_detail)))
            .bind(("device_model", input.device_model))
            .bind(("device_serial", input.device_serial))
            .bind(("device_tag", device_tag))
            .bind(("ospf", blank_to_none(input.ospf)))
            .bind(("admin_ip", input.admin_ip))
            .bind(("subnet", blank_to_none(input.subnet)))
            .bind(("dmz_network", blank_to_none(input.dmz_network)))
            .bind(("wifi_network", blank_to_none(input.wifi_network)))
            .bind(("status", status.as_str().to_string()))
            .bind(("admin_group", blank_to_none(input.admin_group)))
            .bind(("admin_name", input.admin_name))
            .bind(("admin_phone", blank_to_none(input.admin_phone)))
            .bind(("notes", blank_to_none(input.notes)))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AssetRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "asset".into(),
            id: id_str,
        })?;
        let asset = row.into_asset(id)?;

        // First history entry: the asset entering the system.
        history::append(&self.db, id, None, status).await?;

        Ok(asset)
    }

    async fn get_by_id(&self, id: Uuid) -> NetinvResult<Asset> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('asset', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AssetRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "asset".into(),
            id: id_str,
        })?;

        Ok(row.into_asset(id)?)
    }

    async fn get_by_serial(&self, serial: &str) -> NetinvResult<Asset> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM asset \
                 WHERE serial_norm = $serial",
            )
            .bind(("serial", serial.to_lowercase()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AssetRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "asset".into(),
            id: format!("device_serial={serial}"),
        })?;

        Ok(row.try_into_asset()?)
    }

    async fn get_by_admin_ip(&self, ip: &str) -> NetinvResult<Asset> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM asset \
                 WHERE admin_ip = $ip",
            )
            .bind(("ip", ip.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AssetRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "asset".into(),
            id: format!("admin_ip={ip}"),
        })?;

        Ok(row.try_into_asset()?)
    }

    async fn update(&self, id: Uuid, input: UpdateAsset) -> NetinvResult<Asset> {
        let current = self.get_by_id(id).await?;

        if let Some(region) = &input.region {
            validate::required("region", region)?;
        }
        if let Some(title) = &input.title {
            validate::required("title", title)?;
        }
        if let Some(model) = &input.device_model {
            validate::required("device_model", model)?;
        }
        if let Some(serial) = &input.device_serial {
            validate::required("device_serial", serial)?;
        }
        if let Some(ip) = &input.admin_ip {
            validate::required("admin_ip", ip)?;
        }
        if let Some(name) = &input.admin_name {
            validate::required("admin_name", name)?;
        }
        let admin_phone = input.admin_phone.map(blank_to_none);
        if let Some(Some(p)) = &admin_phone {
            validate::phone(p)?;
        }

        // Re-validate uniqueness excluding this record's own values.
        if let Some(serial) = &input.device_serial {
            uniqueness::assert_asset_serial_free(&self.db, serial, Some(id)).await?;
        }
        if let Some(ip) = &input.admin_ip {
            uniqueness::assert_admin_ip_free(&self.db, ip, Some(id)).await?;
        }
        let device_tag = input.device_tag.map(blank_to_none);
        if let Some(Some(tag)) = &device_tag {
            uniqueness::assert_tag_free(&self.db, tag, Some(id), None).await?;
        }

        let mut sets = Vec::new();
        if input.region.is_some() {
            sets.push("region = $region");
        }
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.unit_detail.is_some() {
            sets.push("unit_detail = $unit_detail");
        }
        if input.device_model.is_some() {
            sets.push("device_model = $device_model");
        }
        if input.device_serial.is_some() {
            sets.push("device_serial = $device_serial");
            sets.push("serial_norm = string::lowercase($device_serial)");
        }
        if device_tag.is_some() {
            sets.push("device_tag = $device_tag");
        }
        if input.ospf.is_some() {
            sets.push("ospf = $ospf");
        }
        if input.admin_ip.is_some() {
            sets.push("admin_ip = $admin_ip");
        }
        if input.subnet.is_some() {
            sets.push("subnet = $subnet");
        }
        if input.dmz_network.is_some() {
            sets.push("dmz_network = $dmz_network");
        }
        if input.wifi_network.is_some() {
            sets.push("wifi_network = $wifi_network");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.admin_group.is_some() {
            sets.push("admin_group = $admin_group");
        }
        if input.admin_name.is_some() {
            sets.push("admin_name = $admin_name");
        }
        if admin_phone.is_some() {
            sets.push("admin_phone = $admin_phone");
        }
        if input.notes.is_some() {
            sets.push("notes = $notes");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('asset', $id) SET {}",
            sets.join(", ")
        );

        let id_str = id.to_string();
        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(region) = input.region {
            builder = builder.bind(("region", region));
        }
        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(unit_detail) = input.unit_detail {
            builder = builder.bind(("unit_detail", blank_to_none(unit_detail)));
        }
        if let Some(device_model) = input.device_model {
            builder = builder.bind(("device_model", device_model));
        }
        if let Some(device_serial) = input.device_serial {
            builder = builder.bind(("device_serial", device_serial));
        }
        if let Some(device_tag) = device_tag {
            builder = builder.bind(("device_tag", device_tag));
        }
        if let Some(ospf) = input.ospf {
            builder = builder.bind(("ospf", blank_to_none(ospf)));
        }
        if let Some(admin_ip) = input.admin_ip {
            builder = builder.bind(("admin_ip", admin_ip));
        }
        if let Some(subnet) = input.subnet {
            builder = builder.bind(("subnet", blank_to_none(subnet)));
        }
        if let Some(dmz_network) = input.dmz_network {
            builder = builder.bind(("dmz_network", blank_to_none(dmz_network)));
        }
        if let Some(wifi_network) = input.wifi_network {
            builder = builder.bind(("wifi_network", blank_to_none(wifi_network)));
        }
        if let Some(status) = &input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(admin_group) = input.admin_group {
            builder = builder.bind(("admin_group", blank_to_none(admin_group)));
        }
        if let Some(admin_name) = input.admin_name {
            builder = builder.bind(("admin_name", admin_name));
        }
        if let Some(admin_phone) = admin_phone {
            builder = builder.bind(("admin_phone", admin_phone));
        }
        if let Some(notes) = input.notes {
            builder = builder.bind(("notes", blank_to_none(notes)));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AssetRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "asset".into(),
            id: id_str,
        })?;
        let asset = row.into_asset(id)?;

        // Record the transition only when the status actually changed.
        if let Some(new_status) = input.status {
            if new_status != current.status {
                history::append(&self.db, id, Some(current.status), new_status).await?;
            }
        }

        Ok(asset)
    }

    async fn change_status(&self, id: Uuid, status: AssetStatus) -> NetinvResult<Asset> {
        self.update(
            id,
            UpdateAsset {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    async fn delete(&self, id: Uuid) -> NetinvResult<()> {
        // Surface NotFound before touching anything.
        self.get_by_id(id).await?;

        self.db
            .query(
                "DELETE switch WHERE asset_id = $id; \
                 DELETE status_history WHERE asset_id = $id; \
                 DELETE type::record('asset', $id);",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    async fn search(&self, filter: AssetFilter) -> NetinvResult<Vec<Asset>> {
        let q = filter
            .q
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        // First leg: owners of switches matched through the relation.
        let mut switch_owner_ids: Vec<String> = Vec::new();
        if let Some(q) = &q {
            let mut result = self
                .db
                .query(
                    "SELECT asset_id FROM switch WHERE \
                     string::contains(string::lowercase(model), $q) OR \
                     string::contains(serial_norm, $q) OR \
                     string::contains(string::lowercase(tag ?? ''), $q)",
                )
                .bind(("q", q.clone()))
                .await
                .map_err(DbError::from)?;
            let rows: Vec<SwitchOwnerRow> = result.take(0).map_err(DbError::from)?;
            switch_owner_ids = rows.into_iter().map(|r| r.asset_id).collect();
        }

        let mut conditions: Vec<String> = Vec::new();
        if q.is_some() {
            conditions.push(format!(
                "({} OR meta::id(id) IN $switch_ids)",
                SEARCH_CONDITIONS.join(" OR ")
            ));
        }
        if filter.status.is_some() {
            conditions.push("status = $status".into());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        // One row per asset, so matching through several switches
        // cannot produce duplicates.
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM asset{where_clause} \
             ORDER BY region ASC, admin_ip ASC"
        );

        let mut builder = self.db.query(&query);
        if let Some(q) = q {
            builder = builder
                .bind(("q", q))
                .bind(("switch_ids", switch_owner_ids));
        }
        if let Some(status) = filter.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<AssetRowWithId> = result.take(0).map_err(DbError::from)?;

        let assets = rows
            .into_iter()
            .map(|row| row.try_into_asset())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(assets)
    }

    async fn list(&self, pagination: Pagination) -> NetinvResult<PaginatedResult<Asset>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM asset GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM asset \
                 ORDER BY region ASC, admin_ip ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AssetRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_asset())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
