use crate::adapters::InventoryStore;
use crate::core::dashboards::{
    InventoryOverview, MovementHistory, Pricing, RentalSummary, SalesSummary,
};
use crate::domain::model::{Container, Movement, MovementRequest, NewContainer};
use crate::domain::ports::TableStore;
use crate::domain::rules;
use crate::utils::error::{InventoryError, Result};
use chrono::{Local, NaiveDateTime, Timelike};

/// Request-scoped entry point for the presentation layer.
///
/// Holds the store and pricing; every call reloads the snapshots it needs, so
/// there is no cached table state between calls.
pub struct InventoryService<S: TableStore> {
    store: InventoryStore<S>,
    pricing: Pricing,
}

impl<S: TableStore> InventoryService<S> {
    pub fn new(tables: S, pricing: Pricing) -> Self {
        Self {
            store: InventoryStore::new(tables),
            pricing,
        }
    }

    pub fn store(&self) -> &InventoryStore<S> {
        &self.store
    }

    pub async fn load_containers(&self) -> Result<Vec<Container>> {
        self.store.load_containers().await
    }

    pub async fn load_movements(&self) -> Result<Vec<Movement>> {
        self.store.load_movements().await
    }

    pub async fn create_container(&self, candidate: NewContainer) -> Result<Container> {
        let mut containers = self.store.load_containers().await?;
        let created = rules::create_container(candidate, &containers)?;

        containers.push(created.clone());
        self.store.save_containers(&containers).await?;

        tracing::info!("Container {} created at {}", created.id, created.current_location);
        Ok(created)
    }

    pub async fn record_movement(&self, request: MovementRequest) -> Result<Movement> {
        self.record_movement_at(request, now()).await
    }

    /// Moves a container and appends the movement, as one logical write.
    ///
    /// Containers are saved first. If the movements save then fails, the
    /// previous containers snapshot is written back; if that also fails the
    /// tables disagree and `PartialWrite` is returned.
    pub async fn record_movement_at(
        &self,
        request: MovementRequest,
        now: NaiveDateTime,
    ) -> Result<Movement> {
        let containers = self.store.load_containers().await?;
        let mut movements = self.store.load_movements().await?;

        let (updated, movement) = rules::record_movement(&request, &containers, &movements, now)?;

        let mut next_containers = containers.clone();
        rules::replace_container(&mut next_containers, updated);
        self.store.save_containers(&next_containers).await?;

        movements.push(movement.clone());
        if let Err(save_err) = self.store.save_movements(&movements).await {
            tracing::warn!(
                "Saving movement {} failed ({}), restoring container {}",
                movement.movement_id,
                save_err,
                movement.container_id
            );
            if let Err(restore_err) = self.store.save_containers(&containers).await {
                tracing::error!(
                    "Could not restore containers after failed movement save: {}",
                    restore_err
                );
                return Err(InventoryError::PartialWrite {
                    message: format!(
                        "container {} shows {} but movement {} was not recorded ({}; restore failed: {})",
                        movement.container_id,
                        movement.destination,
                        movement.movement_id,
                        save_err,
                        restore_err
                    ),
                });
            }
            return Err(save_err);
        }

        tracing::info!(
            "Movement {}: {} {} -> {}",
            movement.movement_id,
            movement.container_id,
            movement.origin,
            movement.destination
        );
        Ok(movement)
    }

    pub async fn overview(&self) -> Result<InventoryOverview> {
        let containers = self.store.load_containers().await?;
        Ok(InventoryOverview::build(&containers))
    }

    pub async fn sales(&self) -> Result<SalesSummary> {
        let containers = self.store.load_containers().await?;
        Ok(SalesSummary::build(&containers, &self.pricing))
    }

    pub async fn rental(&self) -> Result<RentalSummary> {
        let containers = self.store.load_containers().await?;
        Ok(RentalSummary::build(&containers, &self.pricing))
    }

    pub async fn movement_history(&self) -> Result<MovementHistory> {
        let containers = self.store.load_containers().await?;
        let movements = self.store.load_movements().await?;
        Ok(MovementHistory::build(&containers, movements))
    }
}

fn now() -> NaiveDateTime {
    let local = Local::now().naive_local();
    local.with_nanosecond(0).unwrap_or(local)
}
