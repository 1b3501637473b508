//! Read-only aggregates over in-memory snapshots.

use crate::domain::model::{Container, ContainerStatus, ContainerType, Location, Movement};
use chrono::Datelike;
use std::collections::BTreeMap;

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn frequencies<K: Ord, I: IntoIterator<Item = K>>(keys: I) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Only statuses that occur are present in the result.
pub fn count_by_status(containers: &[Container]) -> BTreeMap<ContainerStatus, usize> {
    frequencies(containers.iter().map(|c| c.status))
}

pub fn count_by_type(containers: &[Container]) -> BTreeMap<ContainerType, usize> {
    frequencies(containers.iter().map(|c| c.container_type))
}

pub fn count_by_location(containers: &[Container]) -> BTreeMap<Location, usize> {
    frequencies(containers.iter().map(|c| c.current_location))
}

/// Share of nationalized containers in percent; 0 for an empty table.
pub fn nationalization_rate(containers: &[Container]) -> f64 {
    let nationalized = containers.iter().filter(|c| c.is_nationalized()).count();
    percentage(nationalized, containers.len())
}

/// Share of containers currently rented out in percent; 0 for an empty table.
pub fn occupancy_rate(containers: &[Container]) -> f64 {
    percentage(rented_stock(containers).len(), containers.len())
}

/// Movement counts per calendar month (`YYYY-MM`), oldest first.
pub fn movements_by_month(movements: &[Movement]) -> Vec<(String, usize)> {
    frequencies(
        movements
            .iter()
            .map(|m| (m.timestamp.year(), m.timestamp.month())),
    )
    .into_iter()
    .map(|((year, month), count)| (format!("{:04}-{:02}", year, month), count))
    .collect()
}

/// Units that can be sold or rented right now.
pub fn rentable_stock(containers: &[Container]) -> Vec<&Container> {
    containers
        .iter()
        .filter(|c| c.status == ContainerStatus::Available && c.is_nationalized())
        .collect()
}

pub fn rented_stock(containers: &[Container]) -> Vec<&Container> {
    containers
        .iter()
        .filter(|c| c.status == ContainerStatus::InUse)
        .collect()
}
