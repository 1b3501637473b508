use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Raw table contents: header row first, then one row per record.
pub type Grid = Vec<Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Containers,
    Movements,
}

impl TableKind {
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Containers => "containers",
            TableKind::Movements => "movements",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whole-table persistence capability.
///
/// `load` returns an empty grid when the table holds nothing and fails with
/// `StoreUnavailable` when the backing store cannot be reached. `replace_all`
/// swaps the full contents for `grid`; readers must never observe a half-written table.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn load(&self, table: TableKind) -> Result<Grid>;
    async fn replace_all(&self, table: TableKind, grid: Grid) -> Result<()>;
}
