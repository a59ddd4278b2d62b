//! Categorical values discovered in a table.

use std::collections::BTreeSet;

use serde::Serialize;
use zonewatch_core::{ObservationTable, SchemaError, WeaponClass};

/// Every weapon class held in any row, including [`WeaponClass::Unknown`]
/// when some item has no class.
pub fn distinct_weapon_classes(
    table: &ObservationTable,
) -> Result<BTreeSet<WeaponClass>, SchemaError> {
    Ok(table
        .inventory()?
        .iter()
        .flat_map(|inventory| inventory.distinct_weapon_classes())
        .collect())
}

pub fn distinct_area_names(table: &ObservationTable) -> Result<BTreeSet<String>, SchemaError> {
    Ok(table.area_name()?.iter().cloned().collect())
}

/// Overview of a processed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    /// Rows inside the boundary, if the table has been classified
    pub rows_in_boundary: Option<usize>,
    pub weapon_classes: BTreeSet<WeaponClass>,
    pub area_names: BTreeSet<String>,
}

impl TableSummary {
    pub fn collect(table: &ObservationTable) -> Result<Self, SchemaError> {
        let rows_in_boundary = table
            .in_boundary()
            .ok()
            .map(|mask| mask.iter().filter(|&&inside| inside).count());
        Ok(Self {
            rows: table.len(),
            rows_in_boundary,
            weapon_classes: distinct_weapon_classes(table)?,
            area_names: distinct_area_names(table)?,
        })
    }
}
