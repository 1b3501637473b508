pub mod dashboards;
pub mod inventory;

pub use crate::domain::model::{Container, Movement, MovementRequest, NewContainer};
pub use crate::domain::ports::{Grid, TableKind, TableStore};
pub use crate::utils::error::Result;
