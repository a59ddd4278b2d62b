//! How often a team enters the classified boundary.
//!
//! A round counts as entered when any observation of the team on the given
//! side in that round lies inside the boundary. Requires the table to have
//! been classified (see [`classify`](crate::classify::classify)).

use std::collections::BTreeMap;

use serde::Serialize;
use zonewatch_core::{Column, ObservationTable, SchemaError, Side};

use crate::AnalysisError;

/// Entered rounds out of all rounds played by a team on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundEntries {
    /// Rounds with at least one observation inside the boundary
    pub entered: usize,
    /// Distinct rounds with any observation
    pub total: usize,
}

impl RoundEntries {
    /// Fraction of rounds entered, `None` when no rounds were played.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        (self.total > 0).then(|| self.entered as f64 / self.total as f64)
    }
}

pub fn entry_rounds(
    table: &ObservationTable,
    team: &str,
    side: Side,
) -> Result<RoundEntries, SchemaError> {
    table.require(&[
        Column::Team,
        Column::Side,
        Column::RoundNum,
        Column::InBoundary,
    ])?;
    let rounds = table.round_num()?;
    let in_boundary = table.in_boundary()?;

    let mut entered_by_round = BTreeMap::<u32, bool>::new();
    for i in table.team_side_rows(team, side)? {
        *entered_by_round.entry(rounds[i]).or_default() |= in_boundary[i];
    }

    let entries = RoundEntries {
        entered: entered_by_round.values().filter(|&&entered| entered).count(),
        total: entered_by_round.len(),
    };
    tracing::debug!(team, %side, entered = entries.entered, total = entries.total, "counted boundary entries");
    Ok(entries)
}

/// Fraction of `team`'s rounds on `side` in which the boundary was entered.
///
/// Fails with [`AnalysisError::NoRounds`] when the team never played on that
/// side.
pub fn entry_frequency(
    table: &ObservationTable,
    team: &str,
    side: Side,
) -> Result<f64, AnalysisError> {
    entry_rounds(table, team, side)?
        .ratio()
        .ok_or_else(|| AnalysisError::NoRounds {
            team: team.to_owned(),
            side,
        })
}
