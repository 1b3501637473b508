//! Invariants for the container and movement tables.
//!
//! Everything here is pure: functions take the current snapshots and return the
//! new rows, leaving persistence to the caller.

use crate::domain::model::{
    Container, ContainerStatus, ContainerType, LengthFeet, Location, Movement, MovementRequest,
    NewContainer,
};
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::validate_optional_link;
use chrono::NaiveDateTime;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn find_container<'a>(containers: &'a [Container], id: &str) -> Option<&'a Container> {
    containers.iter().find(|c| c.id == id)
}

/// Validates a candidate against the existing table and builds the row to append.
pub fn create_container(candidate: NewContainer, existing: &[Container]) -> Result<Container> {
    let id = candidate.id.trim().to_string();
    if id.is_empty() {
        return Err(InventoryError::validation("id", "must not be empty"));
    }
    if find_container(existing, &id).is_some() {
        return Err(InventoryError::validation(
            "id",
            format!("container '{}' already exists", id),
        ));
    }

    let container_type: ContainerType = candidate.container_type.parse()?;
    let status: ContainerStatus = candidate.status.parse()?;
    let current_location: Location = candidate.location.parse()?;

    let length_feet = LengthFeet::new(candidate.length_feet)?;

    let nationalization_doc_link = non_blank(candidate.nationalization_doc_link);
    let exterior_image_link = non_blank(candidate.exterior_image_link);
    let interior_image_link = non_blank(candidate.interior_image_link);
    validate_optional_link("nationalization_doc_link", nationalization_doc_link.as_deref())?;
    validate_optional_link("exterior_image_link", exterior_image_link.as_deref())?;
    validate_optional_link("interior_image_link", interior_image_link.as_deref())?;

    Ok(Container {
        id,
        name: candidate.name.trim().to_string(),
        container_type,
        status,
        current_location,
        length_feet: Some(length_feet),
        base_material: candidate.base_material.trim().to_string(),
        nationalized: Some(candidate.nationalized),
        nationalization_date: candidate.nationalization_date,
        nationalization_doc_link,
        exterior_image_link,
        interior_image_link,
        notes: candidate.notes,
    })
}

/// Computes the moved container and the movement describing the move.
///
/// The origin always comes from the stored row. The new movement id is
/// `movements.len() + 1`, which is only unique while a single writer appends.
///
/// Fails with `ContainerNotFound` for an unknown id, `StaleLocation` when
/// `expected_origin` no longer matches the stored location, and
/// `ValidationError` on `destination` when the container is already there,
/// since such a movement would record no change of location.
pub fn record_movement(
    request: &MovementRequest,
    containers: &[Container],
    movements: &[Movement],
    now: NaiveDateTime,
) -> Result<(Container, Movement)> {
    let current = find_container(containers, &request.container_id).ok_or_else(|| {
        InventoryError::ContainerNotFound {
            id: request.container_id.clone(),
        }
    })?;

    let origin = current.current_location;
    if let Some(expected) = request.expected_origin {
        if expected != origin {
            return Err(InventoryError::StaleLocation {
                container_id: current.id.clone(),
                expected: expected.to_string(),
                actual: origin.to_string(),
            });
        }
    }

    if request.destination == origin {
        return Err(InventoryError::validation(
            "destination",
            format!("container '{}' is already at {}", current.id, origin),
        ));
    }

    let mut updated = current.clone();
    updated.current_location = request.destination;

    let movement = Movement {
        movement_id: movements.len() as u64 + 1,
        container_id: current.id.clone(),
        timestamp: now,
        origin,
        destination: request.destination,
        responsible: request.responsible.trim().to_string(),
        note: request.note.clone(),
    };

    Ok((updated, movement))
}

/// Replaces the row with the same id. Returns false when no row matched.
pub fn replace_container(containers: &mut [Container], updated: Container) -> bool {
    match containers.iter_mut().find(|c| c.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}
