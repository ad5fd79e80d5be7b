//! Integration tests for bulk import reconciliation against an
//! in-memory SurrealDB-backed asset repository.

use netinv_core::repository::{AssetRepository, Pagination};
use netinv_db::repository::SurrealAssetRepository;
use netinv_ingest::{ImportRow, reconcile};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    netinv_db::run_migrations(&db).await.unwrap();
    db
}

fn row(serial: &str, ip: &str) -> ImportRow {
    ImportRow {
        region: "Region I".into(),
        title: "UR-I".into(),
        device_model: "FortiGate 100F".into(),
        device_serial: serial.into(),
        admin_ip: ip.into(),
        admin_name: "Perez, Juan".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn batch_classifies_created_duplicate_and_incomplete() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    // Row 2 complete, row 3 repeats the serial, row 4 lacks one.
    let rows = vec![
        row("X", "1.1.1.1"),
        row("X", "1.1.1.2"),
        row("", "1.1.1.3"),
    ];
    let report = reconcile(&repo, rows).await.unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.duplicates, vec![3]);
    assert_eq!(report.incomplete, vec![4]);

    let page = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].device_serial, "X");
}

#[tokio::test]
async fn pre_existing_assets_count_as_duplicates() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    reconcile(&repo, vec![row("FG-1", "10.0.0.1")]).await.unwrap();

    // Same admin IP under a fresh serial, and vice versa.
    let report = reconcile(
        &repo,
        vec![row("FG-2", "10.0.0.1"), row("fg-1", "10.0.0.2")],
    )
    .await
    .unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.duplicates, vec![2, 3]);
    assert!(report.incomplete.is_empty());
}

#[tokio::test]
async fn bad_rows_never_abort_the_batch() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    let mut bad_phone = row("FG-3", "10.0.0.3");
    bad_phone.admin_phone = "no digits".into();

    let rows = vec![bad_phone, row("FG-4", "10.0.0.4")];
    let report = reconcile(&repo, rows).await.unwrap();

    // The malformed phone row is incomplete; the next row still lands.
    assert_eq!(report.created, 1);
    assert_eq!(report.incomplete, vec![2]);
    assert!(repo.get_by_serial("FG-4").await.is_ok());
}

#[tokio::test]
async fn duplicate_tag_within_batch_is_reported() {
    let db = setup().await;
    let repo = SurrealAssetRepository::new(db);

    let mut first = row("FG-5", "10.0.0.5");
    first.device_tag = "TAG-1".into();
    let mut second = row("FG-6", "10.0.0.6");
    second.device_tag = "tag-1".into();

    let report = reconcile(&repo, vec![first, second]).await.unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.duplicates, vec![3]);
}
