use crate::domain::ports::{Grid, TableKind, TableStore};
use crate::utils::error::{InventoryError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    tables: HashMap<TableKind, Grid>,
    unreachable: bool,
    /// Remaining successful writes per table before writes start failing.
    write_budgets: HashMap<TableKind, usize>,
    writes: usize,
}

/// In-process table store. Clones share the same tables.
///
/// Failures can be injected to exercise the error paths of callers.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_table(self, table: TableKind, grid: Grid) -> Self {
        self.state.lock().await.tables.insert(table, grid);
        self
    }

    pub async fn table(&self, table: TableKind) -> Grid {
        let state = self.state.lock().await;
        state.tables.get(&table).cloned().unwrap_or_default()
    }

    /// Number of successful `replace_all` calls so far.
    pub async fn write_count(&self) -> usize {
        self.state.lock().await.writes
    }

    pub async fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().await.unreachable = unreachable;
    }

    pub async fn fail_writes_to(&self, table: TableKind) {
        self.fail_writes_to_after(table, 0).await;
    }

    /// Lets `successes` more writes to `table` through, then rejects the rest.
    pub async fn fail_writes_to_after(&self, table: TableKind, successes: usize) {
        self.state.lock().await.write_budgets.insert(table, successes);
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn load(&self, table: TableKind) -> Result<Grid> {
        let state = self.state.lock().await;
        if state.unreachable {
            return Err(InventoryError::store_unavailable("memory store offline"));
        }
        Ok(state.tables.get(&table).cloned().unwrap_or_default())
    }

    async fn replace_all(&self, table: TableKind, grid: Grid) -> Result<()> {
        let mut state = self.state.lock().await;
        let rejected = state.unreachable
            || match state.write_budgets.get_mut(&table) {
                Some(0) => true,
                Some(remaining) => {
                    *remaining -= 1;
                    false
                }
                None => false,
            };
        if rejected {
            return Err(InventoryError::store_unavailable(format!(
                "write to '{}' rejected",
                table
            )));
        }
        state.tables.insert(table, grid);
        state.writes += 1;
        Ok(())
    }
}
