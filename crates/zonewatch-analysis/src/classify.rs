//! Boundary classification of observations.
//!
//! [`classify`] annotates every row of an [`ObservationTable`] with whether
//! the observation lies inside a [`GeometricBoundary`]. The whole coordinate
//! columns are tested in one pass and the result replaces the table's
//! `in_boundary` column, so classifying again with the same boundary yields
//! the same column.

use zonewatch_core::{GeometricBoundary, ObservationTable, SchemaError};

/// Writes the `in_boundary` column and returns the number of rows inside.
///
/// Existing columns and rows are left untouched. Fails if any coordinate
/// column is absent.
pub fn classify(
    table: &mut ObservationTable,
    boundary: &GeometricBoundary,
) -> Result<usize, SchemaError> {
    let mask = boundary.contains_points(table.x()?, table.y()?, table.z()?);
    let inside = mask.iter().filter(|&&flag| flag).count();
    tracing::debug!(rows = mask.len(), inside, "classified observations against boundary");
    table.set_in_boundary(mask);
    Ok(inside)
}
