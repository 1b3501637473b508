//! View models for the inventory, sales, rental and movement screens.

use crate::domain::model::{Container, ContainerStatus, ContainerType, Location, Movement};
use crate::domain::stats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat per-unit figures used for revenue estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default = "default_sale_price")]
    pub sale_price_per_unit: f64,
    #[serde(default = "default_monthly_rent")]
    pub monthly_rent_per_unit: f64,
}

fn default_sale_price() -> f64 {
    8000.0
}

fn default_monthly_rent() -> f64 {
    500.0
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            sale_price_per_unit: default_sale_price(),
            monthly_rent_per_unit: default_monthly_rent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryOverview {
    pub total: usize,
    pub by_status: BTreeMap<ContainerStatus, usize>,
    pub nationalization_rate: f64,
    pub by_type: BTreeMap<ContainerType, usize>,
    pub by_location: BTreeMap<Location, usize>,
}

impl InventoryOverview {
    pub fn build(containers: &[Container]) -> Self {
        Self {
            total: containers.len(),
            by_status: stats::count_by_status(containers),
            nationalization_rate: stats::nationalization_rate(containers),
            by_type: stats::count_by_type(containers),
            by_location: stats::count_by_location(containers),
        }
    }

    pub fn status_count(&self, status: ContainerStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub sellable: Vec<Container>,
    pub nationalization_rate: f64,
    pub potential_revenue: f64,
}

impl SalesSummary {
    pub fn build(containers: &[Container], pricing: &Pricing) -> Self {
        let sellable: Vec<Container> = stats::rentable_stock(containers)
            .into_iter()
            .cloned()
            .collect();
        let potential_revenue = sellable.len() as f64 * pricing.sale_price_per_unit;

        Self {
            sellable,
            nationalization_rate: stats::nationalization_rate(containers),
            potential_revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalSummary {
    pub rented: Vec<Container>,
    pub occupancy_rate: f64,
    pub estimated_monthly_income: f64,
}

impl RentalSummary {
    pub fn build(containers: &[Container], pricing: &Pricing) -> Self {
        let rented: Vec<Container> = stats::rented_stock(containers)
            .into_iter()
            .cloned()
            .collect();
        let estimated_monthly_income = rented.len() as f64 * pricing.monthly_rent_per_unit;

        Self {
            rented,
            occupancy_rate: stats::occupancy_rate(containers),
            estimated_monthly_income,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementHistory {
    pub movements: Vec<Movement>,
    pub per_month: Vec<(String, usize)>,
    pub by_location: BTreeMap<Location, usize>,
}

impl MovementHistory {
    pub fn build(containers: &[Container], movements: Vec<Movement>) -> Self {
        Self {
            per_month: stats::movements_by_month(&movements),
            by_location: stats::count_by_location(containers),
            movements,
        }
    }
}
