//! Integration tests for the status lifecycle audit trail.

use netinv_core::NetinvError;
use netinv_core::models::asset::{CreateAsset, UpdateAsset};
use netinv_core::models::status::AssetStatus;
use netinv_core::repository::{AssetRepository, StatusHistoryRepository};
use netinv_db::repository::{SurrealAssetRepository, SurrealStatusHistoryRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    netinv_db::run_migrations(&db).await.unwrap();
    db
}

fn asset_input(serial: &str, ip: &str) -> CreateAsset {
    CreateAsset {
        region: "Region I".into(),
        title: "UR-I".into(),
        unit_detail: None,
        device_model: "FortiGate 100F".into(),
        device_serial: serial.into(),
        device_tag: None,
        ospf: None,
        admin_ip: ip.into(),
        subnet: None,
        dmz_network: None,
        wifi_network: None,
        status: None,
        admin_group: None,
        admin_name: "Perez, Juan".into(),
        admin_phone: None,
        notes: None,
    }
}

#[tokio::test]
async fn creation_writes_initial_entry() {
    let db = setup().await;
    let assets = SurrealAssetRepository::new(db.clone());
    let history = SurrealStatusHistoryRepository::new(db);

    let asset = assets.create(asset_input("FG-H1", "10.2.0.1")).await.unwrap();

    let entries = history.list_for_asset(asset.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].asset_id, asset.id);
    assert_eq!(entries[0].previous, None);
    assert_eq!(entries[0].new, AssetStatus::Active);
}

#[tokio::test]
async fn burn_and_restore_appends_two_entries_newest_first() {
    let db = setup().await;
    let assets = SurrealAssetRepository::new(db.clone());
    let history = SurrealStatusHistoryRepository::new(db);

    let asset = assets.create(asset_input("FG-H2", "10.2.1.1")).await.unwrap();

    assets
        .change_status(asset.id, AssetStatus::Burned)
        .await
        .unwrap();
    assets
        .change_status(asset.id, AssetStatus::Active)
        .await
        .unwrap();

    let entries = history.list_for_asset(asset.id).await.unwrap();
    // Initial entry plus the two transitions, newest first.
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].previous, Some(AssetStatus::Burned));
    assert_eq!(entries[0].new, AssetStatus::Active);
    assert_eq!(entries[1].previous, Some(AssetStatus::Active));
    assert_eq!(entries[1].new, AssetStatus::Burned);
    assert_eq!(entries[2].previous, None);

    // A save with an unchanged status appends nothing.
    assets
        .change_status(asset.id, AssetStatus::Active)
        .await
        .unwrap();
    let entries = history.list_for_asset(asset.id).await.unwrap();
    assert_eq!(entries.len(), 3);
}

#[tokio::test]
async fn field_edit_with_status_change_appends_one_entry() {
    let db = setup().await;
    let assets = SurrealAssetRepository::new(db.clone());
    let history = SurrealStatusHistoryRepository::new(db);

    let asset = assets.create(asset_input("FG-H3", "10.2.2.1")).await.unwrap();

    let updated = assets
        .update(
            asset.id,
            UpdateAsset {
                title: Some("UR-III".into()),
                status: Some(AssetStatus::UnderObservation),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, AssetStatus::UnderObservation);

    let entries = history.list_for_asset(asset.id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].previous, Some(AssetStatus::Active));
    assert_eq!(entries[0].new, AssetStatus::UnderObservation);
}

#[tokio::test]
async fn any_status_reaches_any_other() {
    let db = setup().await;
    let assets = SurrealAssetRepository::new(db.clone());
    let history = SurrealStatusHistoryRepository::new(db);

    let asset = assets.create(asset_input("FG-H4", "10.2.3.1")).await.unwrap();

    // No transition graph restriction; walk through every state.
    for status in [
        AssetStatus::Decommissioned,
        AssetStatus::UnderObservation,
        AssetStatus::Burned,
        AssetStatus::Active,
    ] {
        let updated = assets.change_status(asset.id, status).await.unwrap();
        assert_eq!(updated.status, status);
    }

    let entries = history.list_for_asset(asset.id).await.unwrap();
    assert_eq!(entries.len(), 5);
}

#[tokio::test]
async fn deleting_asset_cascades_to_history() {
    let db = setup().await;
    let assets = SurrealAssetRepository::new(db.clone());
    let history = SurrealStatusHistoryRepository::new(db);

    let asset = assets.create(asset_input("FG-H5", "10.2.4.1")).await.unwrap();
    assets
        .change_status(asset.id, AssetStatus::Decommissioned)
        .await
        .unwrap();

    assets.delete(asset.id).await.unwrap();

    assert!(history.list_for_asset(asset.id).await.unwrap().is_empty());
    assert!(matches!(
        assets.get_by_id(asset.id).await,
        Err(NetinvError::NotFound { .. })
    ));
}

#[tokio::test]
async fn created_with_explicit_status_records_it() {
    let db = setup().await;
    let assets = SurrealAssetRepository::new(db.clone());
    let history = SurrealStatusHistoryRepository::new(db);

    let mut input = asset_input("FG-H6", "10.2.5.1");
    input.status = Some(AssetStatus::UnderObservation);
    let asset = assets.create(input).await.unwrap();
    assert_eq!(asset.status, AssetStatus::UnderObservation);

    let entries = history.list_for_asset(asset.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].previous, None);
    assert_eq!(entries[0].new, AssetStatus::UnderObservation);
}
