//! Row builders for the spreadsheet and report sinks.
//!
//! Pure formatting: the sinks (XLSX writer, document renderer) are
//! external collaborators that consume a header row plus data rows.

use chrono::{DateTime, Utc};
use netinv_core::models::asset::Asset;
use netinv_core::models::switch::Switch;

/// Worksheet column headers, in export order.
pub const SHEET_COLUMNS: [&str; 17] = [
    "Region",
    "Title",
    "Unit detail",
    "Device model",
    "Device serial",
    "Device tag",
    "OSPF",
    "Admin IP",
    "Subnet",
    "DMZ network",
    "WiFi network",
    "Admin group",
    "Admin name",
    "Admin phone",
    "Notes",
    "Status",
    "Switches",
];

/// An asset together with its owned switches, as produced by the
/// repository layer for export.
#[derive(Debug, Clone)]
pub struct AssetWithSwitches {
    pub asset: Asset,
    pub switches: Vec<Switch>,
}

/// Flatten owned switches into one cell: `model serial (tag)` per
/// switch, `; `-separated.
fn flatten_switches(switches: &[Switch]) -> String {
    switches
        .iter()
        .map(|s| match &s.tag {
            Some(tag) => format!("{} {} ({})", s.model, s.serial, tag),
            None => format!("{} {}", s.model, s.serial),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn data_row(item: &AssetWithSwitches) -> Vec<String> {
    let a = &item.asset;
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        a.region.clone(),
        a.title.clone(),
        opt(&a.unit_detail),
        a.device_model.clone(),
        a.device_serial.clone(),
        opt(&a.device_tag),
        opt(&a.ospf),
        a.admin_ip.clone(),
        opt(&a.subnet),
        opt(&a.dmz_network),
        opt(&a.wifi_network),
        opt(&a.admin_group),
        a.admin_name.clone(),
        opt(&a.admin_phone),
        opt(&a.notes),
        a.status.to_string(),
        flatten_switches(&item.switches),
    ]
}

/// Header row plus one row per asset, for the spreadsheet sink.
pub fn sheet_rows(items: &[AssetWithSwitches]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(items.len() + 1);
    rows.push(SHEET_COLUMNS.iter().map(|c| c.to_string()).collect());
    rows.extend(items.iter().map(data_row));
    rows
}

/// Input for the report rendering sink: the filtered collection plus
/// the moment it was rendered.
#[derive(Debug, Clone)]
pub struct ReportRows {
    pub rendered_at: DateTime<Utc>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn report_rows(items: &[AssetWithSwitches], rendered_at: DateTime<Utc>) -> ReportRows {
    ReportRows {
        rendered_at,
        header: SHEET_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: items.iter().map(data_row).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use netinv_core::models::status::AssetStatus;
    use netinv_core::models::switch::SwitchModel;
    use uuid::Uuid;

    fn sample() -> AssetWithSwitches {
        let asset_id = Uuid::new_v4();
        AssetWithSwitches {
            asset: Asset {
                id: asset_id,
                region: "Centro".into(),
                title: "UR-I".into(),
                unit_detail: None,
                device_model: "FortiGate 100F".into(),
                device_serial: "FG-1".into(),
                device_tag: Some("T-9".into()),
                ospf: None,
                admin_ip: "10.0.0.1".into(),
                subnet: None,
                dmz_network: None,
                wifi_network: None,
                status: AssetStatus::Active,
                admin_group: None,
                admin_name: "Perez".into(),
                admin_phone: None,
                notes: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            switches: vec![
                Switch {
                    id: Uuid::new_v4(),
                    asset_id,
                    model: SwitchModel::FortiSwitch224E,
                    serial: "SW-1".into(),
                    tag: Some("T-10".into()),
                },
                Switch {
                    id: Uuid::new_v4(),
                    asset_id,
                    model: SwitchModel::FortiSwitch248E,
                    serial: "SW-2".into(),
                    tag: None,
                },
            ],
        }
    }

    #[test]
    fn sheet_rows_start_with_header_and_match_width() {
        let rows = sheet_rows(&[sample()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), SHEET_COLUMNS.len());
        assert_eq!(rows[1].len(), SHEET_COLUMNS.len());
        assert_eq!(rows[0][0], "Region");
    }

    #[test]
    fn switches_column_is_flattened() {
        let rows = sheet_rows(&[sample()]);
        let switches_cell = rows[1].last().unwrap();
        assert_eq!(
            switches_cell,
            "FortiSwitch 224E SW-1 (T-10); FortiSwitch 248E SW-2"
        );
    }

    #[test]
    fn report_rows_carry_timestamp() {
        let rendered_at = Utc::now();
        let report = report_rows(&[sample()], rendered_at);
        assert_eq!(report.rendered_at, rendered_at);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.header.len(), SHEET_COLUMNS.len());
    }

    #[test]
    fn empty_collection_yields_header_only() {
        let rows = sheet_rows(&[]);
        assert_eq!(rows.len(), 1);
    }
}
