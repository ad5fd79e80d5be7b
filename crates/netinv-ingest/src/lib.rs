//! NETINV Ingest — Bulk import reconciliation and spreadsheet/report
//! row building.
//!
//! Spreadsheet decoding and document encoding are external
//! collaborators; this crate works on decoded field tuples and
//! produces encodable row collections.

pub mod export;
pub mod import;

pub use export::{AssetWithSwitches, ReportRows, report_rows, sheet_rows};
pub use import::{ImportReport, ImportRow, reconcile};
