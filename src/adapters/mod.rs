// Adapters layer: concrete table stores and the typed container/movement view over them.

pub mod csv_store;
pub mod memory;
pub mod rows;
pub mod sheets;

pub use csv_store::CsvStore;
pub use memory::MemoryStore;
pub use sheets::SheetsStore;

use crate::config::toml_config::{StoreBackend, StoreConfig};
use crate::domain::model::{Container, Movement};
use crate::domain::ports::{Grid, TableKind, TableStore};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Typed load/save of the two inventory tables over any `TableStore`.
///
/// Every save is a full replacement of the table with the given snapshot.
pub struct InventoryStore<S: TableStore> {
    tables: S,
}

impl<S: TableStore> InventoryStore<S> {
    pub fn new(tables: S) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &S {
        &self.tables
    }

    pub async fn load_containers(&self) -> Result<Vec<Container>> {
        let grid = self.tables.load(TableKind::Containers).await?;
        rows::containers_from_grid(grid)
    }

    pub async fn save_containers(&self, containers: &[Container]) -> Result<()> {
        self.tables
            .replace_all(TableKind::Containers, rows::containers_to_grid(containers))
            .await
    }

    pub async fn load_movements(&self) -> Result<Vec<Movement>> {
        let grid = self.tables.load(TableKind::Movements).await?;
        rows::movements_from_grid(grid)
    }

    pub async fn save_movements(&self, movements: &[Movement]) -> Result<()> {
        self.tables
            .replace_all(TableKind::Movements, rows::movements_to_grid(movements))
            .await
    }
}

/// The backend selected in the configuration file.
pub enum ConfiguredStore {
    Sheets(SheetsStore),
    Csv(CsvStore),
}

impl ConfiguredStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        match config.backend {
            StoreBackend::Sheets => {
                let sheets = crate::utils::validation::validate_required_field(
                    "store.sheets",
                    &config.sheets,
                )?;
                tracing::info!("Using Google Sheets store ({})", sheets.spreadsheet_id);
                Ok(ConfiguredStore::Sheets(SheetsStore::new(sheets)?))
            }
            StoreBackend::Csv => {
                let csv = crate::utils::validation::validate_required_field("store.csv", &config.csv)?;
                tracing::info!("Using CSV store in {}", csv.directory);
                Ok(ConfiguredStore::Csv(CsvStore::new(&csv.directory)))
            }
        }
    }
}

#[async_trait]
impl TableStore for ConfiguredStore {
    async fn load(&self, table: TableKind) -> Result<Grid> {
        match self {
            ConfiguredStore::Sheets(store) => store.load(table).await,
            ConfiguredStore::Csv(store) => store.load(table).await,
        }
    }

    async fn replace_all(&self, table: TableKind, grid: Grid) -> Result<()> {
        match self {
            ConfiguredStore::Sheets(store) => store.replace_all(table, grid).await,
            ConfiguredStore::Csv(store) => store.replace_all(table, grid).await,
        }
    }
}
