use crate::utils::error::InventoryError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn normalize_label(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Declares a closed enumeration stored as a human-readable label. Parsing accepts the
/// canonical label, the variant name and the legacy sheet labels, ignoring case and spacing.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn accepts(self, normalized: &str) -> bool {
                match self {
                    $($name::$variant => {
                        normalize_label($label) == normalized
                            || normalize_label(stringify!($variant)) == normalized
                            $(|| normalize_label($alias) == normalized)*
                    }),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = InventoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = normalize_label(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.accepts(&normalized))
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = Self::ALL.iter().map(|v| v.label()).collect();
                        InventoryError::validation(
                            $field,
                            format!("unknown value '{}', expected one of: {}", s, allowed.join(", ")),
                        )
                    })
            }
        }
    };
}

labelled_enum! {
    /// What the unit was fitted out as.
    ContainerType("type") {
        Office => "Office" | "Oficina",
        Warehouse => "Warehouse" | "Bodega",
        Sanitary => "Sanitary" | "Sanitario",
        Mixed => "Mixed" | "Mixto",
        Other => "Other" | "Otro",
    }
}

labelled_enum! {
    ContainerStatus("status") {
        Available => "Available" | "Disponible",
        InUse => "In use" | "En uso",
        InRepair => "In repair" | "En reparación" | "En reparacion",
    }
}

labelled_enum! {
    /// Physical sites a container can stand at.
    Location("location") {
        Yard1 => "Yard 1" | "Patio 1",
        Yard2 => "Yard 2" | "Patio 2",
        Yard3 => "Yard 3" | "Patio 3",
        Farm => "Farm" | "Finca",
        Office => "Office" | "Oficina",
    }
}

fn check_length(value: f64) -> Result<f64, InventoryError> {
    if !value.is_finite() || value < 0.0 {
        return Err(InventoryError::validation(
            "length_feet",
            "must be a non-negative number",
        ));
    }
    Ok(value)
}

/// Length of a unit in feet. Keeps the text it was read from so a stored cell
/// is written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthFeet {
    value: f64,
    text: String,
}

impl LengthFeet {
    pub fn new(value: f64) -> Result<Self, InventoryError> {
        let value = check_length(value)?;
        Ok(Self {
            value,
            text: value.to_string(),
        })
    }

    /// Accepts a decimal comma; rejects negative and non-finite values.
    pub fn parse(text: &str) -> Result<Self, InventoryError> {
        let text = text.trim();
        let value = text.replace(',', ".").parse::<f64>().map_err(|_| {
            InventoryError::validation("length_feet", format!("'{}' is not a number", text))
        })?;
        Ok(Self {
            value: check_length(value)?,
            text: text.to_string(),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for LengthFeet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A physical container unit. `id` is the primary key and never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub container_type: ContainerType,
    pub status: ContainerStatus,
    pub current_location: Location,
    /// `None` when the stored cell is blank.
    pub length_feet: Option<LengthFeet>,
    pub base_material: String,
    /// `None` when the stored cell is blank; counts as not nationalized.
    pub nationalized: Option<bool>,
    pub nationalization_date: Option<NaiveDate>,
    pub nationalization_doc_link: Option<String>,
    pub exterior_image_link: Option<String>,
    pub interior_image_link: Option<String>,
    pub notes: String,
}

impl Container {
    pub fn is_nationalized(&self) -> bool {
        self.nationalized == Some(true)
    }
}

/// Append-only record of a container changing location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub movement_id: u64,
    pub container_id: String,
    pub timestamp: NaiveDateTime,
    pub origin: Location,
    pub destination: Location,
    pub responsible: String,
    pub note: String,
}

/// Unvalidated input for a new container, as collected from a form.
///
/// Enumerated fields are kept as text so that out-of-range values are rejected
/// by validation rather than by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewContainer {
    pub id: String,
    pub name: String,
    pub container_type: String,
    pub status: String,
    pub location: String,
    pub length_feet: f64,
    pub base_material: String,
    pub nationalized: bool,
    pub nationalization_date: Option<NaiveDate>,
    pub nationalization_doc_link: Option<String>,
    pub exterior_image_link: Option<String>,
    pub interior_image_link: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRequest {
    pub container_id: String,
    pub destination: Location,
    pub responsible: String,
    pub note: String,
    /// Location the caller saw when it started the move; checked against the
    /// stored location before anything is written.
    pub expected_origin: Option<Location>,
}

impl MovementRequest {
    pub fn new(container_id: impl Into<String>, destination: Location) -> Self {
        Self {
            container_id: container_id.into(),
            destination,
            responsible: String::new(),
            note: String::new(),
            expected_origin: None,
        }
    }

    pub fn responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = responsible.into();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn expecting_origin(mut self, origin: Location) -> Self {
        self.expected_origin = Some(origin);
        self
    }
}
