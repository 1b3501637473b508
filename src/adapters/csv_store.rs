use crate::domain::ports::{Grid, TableKind, TableStore};
use crate::utils::error::{InventoryError, Result};
use async_trait::async_trait;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Tables kept as `containers.csv` and `movements.csv` in one directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    base_path: PathBuf,
}

impl CsvStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn table_path(&self, table: TableKind) -> PathBuf {
        self.base_path.join(format!("{}.csv", table.name()))
    }
}

fn read_grid(path: &Path) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

fn write_grid(path: &Path, grid: &Grid) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for row in grid {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[async_trait]
impl TableStore for CsvStore {
    async fn load(&self, table: TableKind) -> Result<Grid> {
        let path = self.table_path(table);
        if !path.exists() {
            tracing::debug!("{} not found, treating '{}' as empty", path.display(), table);
            return Ok(Vec::new());
        }
        let grid = read_grid(&path)?;
        tracing::debug!("Loaded {} rows from {}", grid.len(), path.display());
        Ok(grid)
    }

    async fn replace_all(&self, table: TableKind, grid: Grid) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;

        let path = self.table_path(table);
        let staging = path.with_extension("csv.tmp");
        // rename keeps readers from ever seeing a truncated file
        let written = write_grid(&staging, &grid)
            .and_then(|()| fs::rename(&staging, &path).map_err(InventoryError::from));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&staging) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    tracing::warn!("Could not remove {}: {}", staging.display(), cleanup);
                }
            }
            return Err(e);
        }

        tracing::debug!("Replaced {} with {} rows", path.display(), grid.len());
        Ok(())
    }
}
