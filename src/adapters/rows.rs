//! Mapping between typed records and the header + rows grid stored in a table.
//!
//! Columns are located by header name, so reordered sheets and the legacy
//! Spanish headers still load. Writes always use the canonical header order.

use crate::domain::model::{Container, LengthFeet, Movement};
use crate::domain::ports::{Grid, TableKind};
use crate::utils::error::{InventoryError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

struct Column {
    header: &'static str,
    aliases: &'static [&'static str],
    required: bool,
}

const fn column(header: &'static str, aliases: &'static [&'static str], required: bool) -> Column {
    Column {
        header,
        aliases,
        required,
    }
}

const CONTAINER_COLUMNS: [Column; 13] = [
    column("ID", &[], true),
    column("Name", &["Nombre"], false),
    column("Type", &["Tipo"], true),
    column("Status", &["Estado"], true),
    column("CurrentLocation", &["UbicacionActual"], true),
    column("LengthFeet", &["Largo"], false),
    column("BaseMaterial", &["MaterialBase"], false),
    column("Nationalized", &["Nacionalizado"], false),
    column("NationalizationDate", &["FechaNacionalizacion"], false),
    column("NationalizationDoc", &["DocumentoNacionalizacion"], false),
    column("ExteriorImage", &["ImagenExterior"], false),
    column("InteriorImage", &["ImagenInterior"], false),
    column("Notes", &["Observaciones"], false),
];

const MOVEMENT_COLUMNS: [Column; 7] = [
    column("MovementID", &["MovimientoID"], true),
    column("ContainerID", &["ContenedorID"], true),
    column("Timestamp", &["FechaMovimiento"], true),
    column("Origin", &["Origen"], true),
    column("Destination", &["Destino"], true),
    column("Responsible", &["Responsable"], false),
    column("Note", &["Observacion"], false),
];

pub fn container_headers() -> Vec<String> {
    CONTAINER_COLUMNS.iter().map(|c| c.header.to_string()).collect()
}

pub fn movement_headers() -> Vec<String> {
    MOVEMENT_COLUMNS.iter().map(|c| c.header.to_string()).collect()
}

/// Position of each known column in the stored header, if present.
struct Layout {
    table: TableKind,
    positions: Vec<Option<usize>>,
}

impl Layout {
    fn resolve(table: TableKind, columns: &[Column], header: &[String]) -> Result<Self> {
        let mut positions = Vec::with_capacity(columns.len());
        for col in columns {
            let position = header.iter().position(|h| {
                let h = h.trim();
                h.eq_ignore_ascii_case(col.header)
                    || col.aliases.iter().any(|a| h.eq_ignore_ascii_case(a))
            });
            if position.is_none() && col.required {
                return Err(InventoryError::MalformedRow {
                    table: table.to_string(),
                    row: 1,
                    message: format!("missing column '{}'", col.header),
                });
            }
            positions.push(position);
        }
        Ok(Self { table, positions })
    }

    fn cell<'a>(&self, row: &'a [String], index: usize) -> &'a str {
        self.positions
            .get(index)
            .copied()
            .flatten()
            .and_then(|p| row.get(p))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    fn malformed(&self, row: usize, message: impl Into<String>) -> InventoryError {
        InventoryError::MalformedRow {
            table: self.table.to_string(),
            row,
            message: message.into(),
        }
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "sí" | "si" | "true" | "y" | "1" => Some(true),
        "no" | "false" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(value).map(|ts| ts.date()))
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

fn split_header(mut grid: Grid) -> Option<(Vec<String>, Grid)> {
    if grid.is_empty() {
        return None;
    }
    let header = grid.remove(0);
    Some((header, grid))
}

pub fn containers_from_grid(grid: Grid) -> Result<Vec<Container>> {
    let Some((header, rows)) = split_header(grid) else {
        return Ok(Vec::new());
    };
    let layout = Layout::resolve(TableKind::Containers, &CONTAINER_COLUMNS, &header)?;

    let mut containers = Vec::with_capacity(rows.len());
    for (offset, row) in rows.iter().enumerate() {
        if is_blank(row) {
            continue;
        }
        // header is sheet row 1
        let row_number = offset + 2;
        let bad = |e: InventoryError| layout.malformed(row_number, e.to_string());

        let id = layout.cell(row, 0);
        if id.is_empty() {
            return Err(layout.malformed(row_number, "empty ID"));
        }
        let length = layout.cell(row, 5);
        let length_feet = if length.is_empty() {
            None
        } else {
            Some(LengthFeet::parse(length).map_err(bad)?)
        };
        let nationalized_cell = layout.cell(row, 7);
        let nationalized = if nationalized_cell.is_empty() {
            None
        } else {
            Some(parse_bool(nationalized_cell).ok_or_else(|| {
                layout.malformed(
                    row_number,
                    format!("invalid nationalized flag '{}'", nationalized_cell),
                )
            })?)
        };
        let date_cell = layout.cell(row, 8);
        let nationalization_date = if date_cell.is_empty() {
            None
        } else {
            Some(parse_date(date_cell).ok_or_else(|| {
                layout.malformed(row_number, format!("invalid date '{}'", date_cell))
            })?)
        };

        containers.push(Container {
            id: id.to_string(),
            name: layout.cell(row, 1).to_string(),
            container_type: layout.cell(row, 2).parse().map_err(bad)?,
            status: layout.cell(row, 3).parse().map_err(bad)?,
            current_location: layout.cell(row, 4).parse().map_err(bad)?,
            length_feet,
            base_material: layout.cell(row, 6).to_string(),
            nationalized,
            nationalization_date,
            nationalization_doc_link: optional(layout.cell(row, 9)),
            exterior_image_link: optional(layout.cell(row, 10)),
            interior_image_link: optional(layout.cell(row, 11)),
            notes: layout.cell(row, 12).to_string(),
        });
    }

    Ok(containers)
}

pub fn containers_to_grid(containers: &[Container]) -> Grid {
    let mut grid = Vec::with_capacity(containers.len() + 1);
    grid.push(container_headers());
    for c in containers {
        grid.push(vec![
            c.id.clone(),
            c.name.clone(),
            c.container_type.label().to_string(),
            c.status.label().to_string(),
            c.current_location.label().to_string(),
            c.length_feet
                .as_ref()
                .map(|l| l.as_str().to_string())
                .unwrap_or_default(),
            c.base_material.clone(),
            match c.nationalized {
                Some(true) => "Yes",
                Some(false) => "No",
                None => "",
            }
            .to_string(),
            c.nationalization_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            c.nationalization_doc_link.clone().unwrap_or_default(),
            c.exterior_image_link.clone().unwrap_or_default(),
            c.interior_image_link.clone().unwrap_or_default(),
            c.notes.clone(),
        ]);
    }
    grid
}

pub fn movements_from_grid(grid: Grid) -> Result<Vec<Movement>> {
    let Some((header, rows)) = split_header(grid) else {
        return Ok(Vec::new());
    };
    let layout = Layout::resolve(TableKind::Movements, &MOVEMENT_COLUMNS, &header)?;

    let mut movements = Vec::with_capacity(rows.len());
    for (offset, row) in rows.iter().enumerate() {
        if is_blank(row) {
            continue;
        }
        let row_number = offset + 2;
        let bad = |e: InventoryError| layout.malformed(row_number, e.to_string());

        let id_cell = layout.cell(row, 0);
        let movement_id = id_cell.parse::<u64>().map_err(|_| {
            layout.malformed(row_number, format!("invalid movement id '{}'", id_cell))
        })?;
        let container_id = layout.cell(row, 1);
        if container_id.is_empty() {
            return Err(layout.malformed(row_number, "empty container ID"));
        }
        let ts_cell = layout.cell(row, 2);
        let timestamp = parse_timestamp(ts_cell).ok_or_else(|| {
            layout.malformed(row_number, format!("invalid timestamp '{}'", ts_cell))
        })?;

        movements.push(Movement {
            movement_id,
            container_id: container_id.to_string(),
            timestamp,
            origin: layout.cell(row, 3).parse().map_err(bad)?,
            destination: layout.cell(row, 4).parse().map_err(bad)?,
            responsible: layout.cell(row, 5).to_string(),
            note: layout.cell(row, 6).to_string(),
        });
    }

    Ok(movements)
}

pub fn movements_to_grid(movements: &[Movement]) -> Grid {
    let mut grid = Vec::with_capacity(movements.len() + 1);
    grid.push(movement_headers());
    for m in movements {
        grid.push(vec![
            m.movement_id.to_string(),
            m.container_id.clone(),
            format_timestamp(&m.timestamp),
            m.origin.label().to_string(),
            m.destination.label().to_string(),
            m.responsible.clone(),
            m.note.clone(),
        ]);
    }
    grid
}
