pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{ConfiguredStore, CsvStore, InventoryStore, MemoryStore, SheetsStore};
pub use crate::core::dashboards::Pricing;
pub use crate::core::inventory::InventoryService;
pub use crate::domain::model::{
    Container, ContainerStatus, ContainerType, LengthFeet, Location, Movement, MovementRequest,
    NewContainer,
};
pub use crate::utils::error::{InventoryError, Result};
