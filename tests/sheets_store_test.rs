use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use yard_ledger::config::toml_config::SheetsConfig;
use yard_ledger::domain::ports::{TableKind, TableStore};
use yard_ledger::{
    ContainerStatus, InventoryError, InventoryService, InventoryStore, Location, MovementRequest,
    Pricing, SheetsStore,
};

fn sheets_config(api_base: String) -> SheetsConfig {
    SheetsConfig {
        spreadsheet_id: "sheet-123".to_string(),
        access_token: "test-token".to_string(),
        api_base,
        containers_sheet: "containers".to_string(),
        movements_sheet: "movements".to_string(),
        timeout_seconds: 5,
    }
}

fn container_header() -> serde_json::Value {
    json!([
        "ID",
        "Name",
        "Type",
        "Status",
        "CurrentLocation",
        "LengthFeet",
        "BaseMaterial",
        "Nationalized",
        "NationalizationDate",
        "NationalizationDoc",
        "ExteriorImage",
        "InteriorImage",
        "Notes"
    ])
}

#[tokio::test]
async fn test_load_containers_from_sheet() {
    let server = MockServer::start();
    let sheet_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-123/values/containers")
            .header("Authorization", "Bearer test-token");
        then.status(200).json_body(json!({
            "range": "containers!A1:M3",
            "majorDimension": "ROWS",
            "values": [
                container_header(),
                ["C1", "Site office", "Office", "Available", "Yard 1", "40", "Steel", "Yes", "2024-03-01"],
                ["C2", "Store", "Warehouse", "In use", "Farm", "20", "Steel", "No"]
            ]
        }));
    });

    let store = InventoryStore::new(SheetsStore::new(&sheets_config(server.base_url())).unwrap());
    let containers = store.load_containers().await.unwrap();

    sheet_mock.assert();
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].id, "C1");
    assert_eq!(containers[0].nationalized, Some(true));
    assert_eq!(containers[1].nationalized, Some(false));
    assert_eq!(
        containers[0].nationalization_date,
        NaiveDate::from_ymd_opt(2024, 3, 1)
    );
    assert_eq!(containers[1].status, ContainerStatus::InUse);
    assert_eq!(containers[1].current_location, Location::Farm);
    assert_eq!(containers[1].notes, "");
}

#[tokio::test]
async fn test_empty_sheet_loads_as_empty_table() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-123/values/movements");
        then.status(200)
            .json_body(json!({"range": "movements!A1:Z1000", "majorDimension": "ROWS"}));
    });

    let store = InventoryStore::new(SheetsStore::new(&sheets_config(server.base_url())).unwrap());
    let movements = store.load_movements().await.unwrap();

    assert!(movements.is_empty());
}

#[tokio::test]
async fn test_rejected_credentials_surface_as_store_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-123/values/containers");
        then.status(401)
            .json_body(json!({"error": {"code": 401, "message": "Request had invalid authentication credentials."}}));
    });

    let store = InventoryStore::new(SheetsStore::new(&sheets_config(server.base_url())).unwrap());
    let err = store.load_containers().await.unwrap_err();

    match err {
        InventoryError::StoreUnavailable { message } => {
            assert!(message.contains("credentials rejected"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_host_surfaces_as_store_unavailable() {
    let store = SheetsStore::new(&sheets_config("http://127.0.0.1:1".to_string())).unwrap();

    let err = store.load(TableKind::Containers).await.unwrap_err();

    assert!(matches!(err, InventoryError::StoreUnavailable { .. }));
}

#[tokio::test]
async fn test_replace_writes_single_padded_update() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-123/values/movements");
        then.status(200).json_body(json!({
            "values": [["MovementID", "ContainerID"], ["1", "C1"], ["2", "C2"]]
        }));
    });
    let put_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/v4/spreadsheets/sheet-123/values/movements!A1")
            .query_param("valueInputOption", "RAW")
            .header("Authorization", "Bearer test-token")
            .json_body(json!({
                "range": "movements!A1",
                "majorDimension": "ROWS",
                "values": [["MovementID", "ContainerID"], ["", ""], ["", ""]]
            }));
        then.status(200).json_body(json!({"updatedRows": 3}));
    });

    let store = SheetsStore::new(&sheets_config(server.base_url())).unwrap();
    store
        .replace_all(
            TableKind::Movements,
            vec![vec!["MovementID".to_string(), "ContainerID".to_string()]],
        )
        .await
        .unwrap();

    put_mock.assert();
}

#[tokio::test]
async fn test_record_movement_against_legacy_sheet() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-123/values/containers");
        then.status(200).json_body(json!({
            "values": [
                ["ID", "Nombre", "Tipo", "Estado", "UbicacionActual"],
                ["C1", "Oficina", "Oficina", "Disponible", "Patio 1"]
            ]
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/sheet-123/values/movements");
        then.status(200).json_body(json!({"range": "movements!A1:Z1000"}));
    });
    let containers_put = server.mock(|when, then| {
        when.method(PUT)
            .path("/v4/spreadsheets/sheet-123/values/containers!A1")
            .json_body(json!({
                "range": "containers!A1",
                "majorDimension": "ROWS",
                "values": [
                    container_header(),
                    ["C1", "Oficina", "Office", "Available", "Yard 2", "", "", "", "", "", "", "", ""]
                ]
            }));
        then.status(200).json_body(json!({}));
    });
    let movements_put = server.mock(|when, then| {
        when.method(PUT)
            .path("/v4/spreadsheets/sheet-123/values/movements!A1")
            .json_body(json!({
                "range": "movements!A1",
                "majorDimension": "ROWS",
                "values": [
                    ["MovementID", "ContainerID", "Timestamp", "Origin", "Destination", "Responsible", "Note"],
                    ["1", "C1", "2024-01-15 08:00:00", "Yard 1", "Yard 2", "Marta", "crane"]
                ]
            }));
        then.status(200).json_body(json!({}));
    });

    let store = SheetsStore::new(&sheets_config(server.base_url())).unwrap();
    let service = InventoryService::new(store, Pricing::default());
    let now = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    let movement = service
        .record_movement_at(
            MovementRequest::new("C1", Location::Yard2)
                .responsible("Marta")
                .note("crane")
                .expecting_origin(Location::Yard1),
            now,
        )
        .await
        .unwrap();

    assert_eq!(movement.movement_id, 1);
    assert_eq!(movement.origin, Location::Yard1);
    containers_put.assert();
    movements_put.assert();
}
