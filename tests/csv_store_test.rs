use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;
use yard_ledger::domain::model::NewContainer;
use yard_ledger::domain::ports::{TableKind, TableStore};
use yard_ledger::{
    CsvStore, InventoryError, InventoryService, InventoryStore, Location, MovementRequest, Pricing,
};

fn new_container(id: &str, location: &str) -> NewContainer {
    NewContainer {
        id: id.to_string(),
        name: format!("Unit {}", id),
        container_type: "Sanitary".to_string(),
        status: "Available".to_string(),
        location: location.to_string(),
        length_feet: 20.0,
        base_material: "Steel".to_string(),
        nationalized: true,
        ..NewContainer::default()
    }
}

fn at(day: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_save_of_loaded_tables_is_identical() {
    let temp_dir = TempDir::new().unwrap();
    let containers_csv = "\
ID,Name,Type,Status,CurrentLocation,LengthFeet,BaseMaterial,Nationalized,NationalizationDate,NationalizationDoc,ExteriorImage,InteriorImage,Notes
C1,Site office,Office,Available,Yard 1,40.0,Steel,Yes,2024-03-01,https://drive.example/doc.pdf,,,\"Insulated, AC\"
C2,Store,Warehouse,In repair,Farm,20.5,Wood,No,,,,,
C3,,Other,Available,Office,,,,,,,,
";
    let movements_csv = "\
MovementID,ContainerID,Timestamp,Origin,Destination,Responsible,Note
1,C2,2024-01-05 10:11:12,Yard 2,Farm,Ana,
";
    fs::write(temp_dir.path().join("containers.csv"), containers_csv).unwrap();
    fs::write(temp_dir.path().join("movements.csv"), movements_csv).unwrap();

    let store = InventoryStore::new(CsvStore::new(temp_dir.path()));
    let before_containers = store.tables().load(TableKind::Containers).await.unwrap();
    let before_movements = store.tables().load(TableKind::Movements).await.unwrap();

    let containers = store.load_containers().await.unwrap();
    assert_eq!(containers[0].length_feet.as_ref().map(|l| l.value()), Some(40.0));
    assert_eq!(containers[2].length_feet, None);
    assert_eq!(containers[2].nationalized, None);
    store.save_containers(&containers).await.unwrap();
    let movements = store.load_movements().await.unwrap();
    store.save_movements(&movements).await.unwrap();

    assert_eq!(
        store.tables().load(TableKind::Containers).await.unwrap(),
        before_containers
    );
    assert_eq!(
        store.tables().load(TableKind::Movements).await.unwrap(),
        before_movements
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("containers.csv")).unwrap(),
        containers_csv
    );
}

#[tokio::test]
async fn test_movement_ids_are_sequential_across_sessions() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let service = InventoryService::new(CsvStore::new(temp_dir.path()), Pricing::default());
    service
        .create_container(new_container("C1", "Yard 1"))
        .await?;

    service
        .record_movement_at(MovementRequest::new("C1", Location::Yard2), at(2))
        .await?;
    service
        .record_movement_at(MovementRequest::new("C1", Location::Yard3), at(3))
        .await?;

    // a fresh session sees everything the previous one wrote
    let reopened = InventoryService::new(CsvStore::new(temp_dir.path()), Pricing::default());
    let third = reopened
        .record_movement_at(MovementRequest::new("C1", Location::Farm), at(4))
        .await?;

    let movements = reopened.load_movements().await?;
    let ids: Vec<u64> = movements.iter().map(|m| m.movement_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(third.origin, Location::Yard3);

    let containers = reopened.load_containers().await?;
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].current_location, Location::Farm);
    Ok(())
}

#[tokio::test]
async fn test_stale_origin_is_rejected_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let service = InventoryService::new(CsvStore::new(temp_dir.path()), Pricing::default());
    service
        .create_container(new_container("C1", "Farm"))
        .await
        .unwrap();

    let err = service
        .record_movement(MovementRequest::new("C1", Location::Office).expecting_origin(Location::Yard1))
        .await
        .unwrap_err();

    assert!(matches!(err, InventoryError::StaleLocation { .. }));
    assert!(!temp_dir.path().join("movements.csv").exists());
}

#[tokio::test]
async fn test_duplicate_id_rejected_by_service() {
    let temp_dir = TempDir::new().unwrap();
    let service = InventoryService::new(CsvStore::new(temp_dir.path()), Pricing::default());

    service
        .create_container(new_container("C1", "Yard 1"))
        .await
        .unwrap();
    let err = service
        .create_container(new_container("C1", "Yard 2"))
        .await
        .unwrap_err();

    assert!(matches!(err, InventoryError::ValidationError { .. }));
    let containers = service.load_containers().await.unwrap();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].current_location, Location::Yard1);
}

#[tokio::test]
async fn test_malformed_row_is_reported_not_skipped() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("containers.csv"),
        "ID,Type,Status,CurrentLocation\nC1,Office,Available,Yard 1\nC2,Office,Sold,Yard 1\n",
    )
    .unwrap();

    let service = InventoryService::new(CsvStore::new(temp_dir.path()), Pricing::default());
    let err = service.overview().await.unwrap_err();

    match err {
        InventoryError::MalformedRow { table, row, .. } => {
            assert_eq!(table, "containers");
            assert_eq!(row, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
