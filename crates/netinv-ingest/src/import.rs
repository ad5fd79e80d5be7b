//! Bulk import reconciliation.
//!
//! Rows come from an external spreadsheet decoder as fixed-position
//! field tuples. Each row is handled independently: a bad row is
//! classified and skipped, never aborting the batch, and nothing rolls
//! back rows already created.

use netinv_core::error::{NetinvError, NetinvResult};
use netinv_core::models::asset::CreateAsset;
use netinv_core::models::status::AssetStatus;
use netinv_core::repository::AssetRepository;
use tracing::debug;

/// Worksheet row number of the first data row (row 1 is the header).
pub const DATA_START_ROW: usize = 2;

/// One decoded worksheet row, in worksheet column order.
#[derive(Debug, Clone, Default)]
pub struct ImportRow {
    pub region: String,
    pub title: String,
    pub unit_detail: String,
    pub device_model: String,
    pub device_serial: String,
    pub device_tag: String,
    pub ospf: String,
    pub admin_ip: String,
    pub subnet: String,
    pub dmz_network: String,
    pub wifi_network: String,
    pub admin_group: String,
    pub admin_name: String,
    pub admin_phone: String,
    pub notes: String,
    pub status: String,
}

impl ImportRow {
    /// Build a row from positional cells; missing trailing cells are
    /// treated as empty.
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            region: cell(0),
            title: cell(1),
            unit_detail: cell(2),
            device_model: cell(3),
            device_serial: cell(4),
            device_tag: cell(5),
            ospf: cell(6),
            admin_ip: cell(7),
            subnet: cell(8),
            dmz_network: cell(9),
            wifi_network: cell(10),
            admin_group: cell(11),
            admin_name: cell(12),
            admin_phone: cell(13),
            notes: cell(14),
            status: cell(15),
        }
    }

    fn opt(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn into_create(self) -> CreateAsset {
        // Unrecognized status text falls back to the default.
        let status = AssetStatus::parse(&self.status).unwrap_or_default();
        CreateAsset {
            region: self.region.trim().to_string(),
            title: self.title.trim().to_string(),
            unit_detail: Self::opt(&self.unit_detail),
            device_model: self.device_model.trim().to_string(),
            device_serial: self.device_serial.trim().to_string(),
            device_tag: Self::opt(&self.device_tag),
            ospf: Self::opt(&self.ospf),
            admin_ip: self.admin_ip.trim().to_string(),
            subnet: Self::opt(&self.subnet),
            dmz_network: Self::opt(&self.dmz_network),
            wifi_network: Self::opt(&self.wifi_network),
            status: Some(status),
            admin_group: Self::opt(&self.admin_group),
            admin_name: self.admin_name.trim().to_string(),
            admin_phone: Self::opt(&self.admin_phone),
            notes: Self::opt(&self.notes),
        }
    }
}

/// Per-batch outcome: one created count plus the worksheet row numbers
/// of every skipped row, for the caller to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: u32,
    pub duplicates: Vec<usize>,
    pub incomplete: Vec<usize>,
}

/// Classify and persist a decoded row sequence.
///
/// Rows missing a serial or admin IP are `incomplete`; rows whose
/// serial or admin IP already exists are `duplicates`; everything else
/// becomes a new asset. Infrastructure failures still propagate —
/// only per-row rejections are absorbed into the report.
pub async fn reconcile<R: AssetRepository>(
    repo: &R,
    rows: impl IntoIterator<Item = ImportRow>,
) -> NetinvResult<ImportReport> {
    let mut report = ImportReport::default();

    for (idx, row) in rows.into_iter().enumerate() {
        let row_no = idx + DATA_START_ROW;

        if row.device_serial.trim().is_empty() || row.admin_ip.trim().is_empty() {
            debug!(row_no, "import row incomplete");
            report.incomplete.push(row_no);
            continue;
        }

        if already_exists(repo, &row).await? {
            debug!(row_no, "import row duplicates an existing asset");
            report.duplicates.push(row_no);
            continue;
        }

        match repo.create(row.into_create()).await {
            Ok(_) => report.created += 1,
            // Lost the race against a same-batch or concurrent writer.
            Err(NetinvError::UniquenessViolation { .. }) | Err(NetinvError::TagCollision { .. }) => {
                debug!(row_no, "import row rejected as duplicate on create");
                report.duplicates.push(row_no);
            }
            Err(NetinvError::Validation { .. }) => {
                debug!(row_no, "import row failed format validation");
                report.incomplete.push(row_no);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

async fn already_exists<R: AssetRepository>(repo: &R, row: &ImportRow) -> NetinvResult<bool> {
    match repo.get_by_admin_ip(row.admin_ip.trim()).await {
        Ok(_) => return Ok(true),
        Err(NetinvError::NotFound { .. }) => {}
        Err(e) => return Err(e),
    }
    match repo.get_by_serial(row.device_serial.trim()).await {
        Ok(_) => Ok(true),
        Err(NetinvError::NotFound { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cells_maps_positions_and_tolerates_short_rows() {
        let cells: Vec<String> = ["Centro", "UR-I"].iter().map(|s| s.to_string()).collect();
        let row = ImportRow::from_cells(&cells);
        assert_eq!(row.region, "Centro");
        assert_eq!(row.title, "UR-I");
        assert_eq!(row.device_serial, "");
        assert_eq!(row.status, "");
    }

    #[test]
    fn into_create_defaults_unknown_status() {
        let row = ImportRow {
            region: "Centro".into(),
            title: "UR-I".into(),
            device_model: "FortiGate 100F".into(),
            device_serial: "FG-1".into(),
            admin_ip: "10.0.0.1".into(),
            admin_name: "Perez".into(),
            status: "???".into(),
            ..Default::default()
        };
        let create = row.into_create();
        assert_eq!(create.status, Some(AssetStatus::Active));
    }

    #[test]
    fn into_create_blanks_become_none() {
        let row = ImportRow {
            region: "Centro".into(),
            title: "UR-I".into(),
            device_model: "FortiGate 100F".into(),
            device_serial: "FG-1".into(),
            device_tag: "   ".into(),
            admin_ip: "10.0.0.1".into(),
            admin_name: "Perez".into(),
            status: "Burned".into(),
            ..Default::default()
        };
        let create = row.into_create();
        assert_eq!(create.device_tag, None);
        assert_eq!(create.status, Some(AssetStatus::Burned));
    }
}
