//! Average first-entry time into a named area.
//!
//! The aggregation runs in fixed stages over the rows of one team, side and
//! area:
//!
//! 1. Parse each filtered row's `"MM:SS"` clock into seconds (the table is not
//!    modified).
//! 2. Keep only clock values at which at least `min_players` distinct players
//!    were observed. Players are counted per clock value across every round of
//!    the filtered rows, not per round.
//! 3. Keep rows whose inventory holds a rifle or SMG.
//! 4. Drop rows recorded after the bomb was planted, since the clock restarts
//!    at the plant.
//! 5. Take the minimum clock per `(round_num, area_name)`: that round's first
//!    qualifying entry.
//!
//! The average of the per-round minimums is reported as [`EntryTime::At`];
//! when no round survives the filters the result is [`EntryTime::NoData`].

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt,
};

use serde::Serialize;
use zonewatch_core::{ClockTime, Column, ObservationTable, Side};
use zonewatch_stats::descriptive;

use crate::AnalysisError;

/// Text shown when no average entry time can be computed.
pub const NO_AVERAGE_TIME: &str = "No average time found";

const REQUIRED_COLUMNS: [Column; 8] = [
    Column::Team,
    Column::Side,
    Column::AreaName,
    Column::ClockTime,
    Column::BombPlanted,
    Column::RoundNum,
    Column::Player,
    Column::Inventory,
];

/// Result of an average entry time query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum EntryTime {
    /// Mean of the per-round first entries, truncated to whole seconds
    At(ClockTime),
    /// No round had a qualifying entry
    NoData,
}

impl fmt::Display for EntryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryTime::At(time) => fmt::Display::fmt(time, f),
            EntryTime::NoData => f.write_str(NO_AVERAGE_TIME),
        }
    }
}

impl EntryTime {
    /// Averages per-round first entries.
    #[must_use]
    pub fn from_samples(samples: &[EntrySample]) -> Self {
        descriptive::mean(
            samples
                .iter()
                .map(|s| f64::from(s.clock_time.as_seconds())),
        )
        .and_then(ClockTime::from_mean_seconds)
        .map_or(EntryTime::NoData, EntryTime::At)
    }
}

/// First qualifying entry of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySample {
    pub round_num: u32,
    pub area_name: String,
    pub clock_time: ClockTime,
}

/// Computes the first qualifying entry of every round, ordered by round.
///
/// Fails if a required column is absent or a filtered row has a malformed
/// clock value. Filter values are not validated: unmatched filters produce
/// no samples.
pub fn entry_time_samples(
    table: &ObservationTable,
    team: &str,
    side: Side,
    area_name: &str,
    min_players: usize,
) -> Result<Vec<EntrySample>, AnalysisError> {
    table.require(&REQUIRED_COLUMNS)?;
    let teams = table.team()?;
    let sides = table.side()?;
    let areas = table.area_name()?;
    let clocks = table.clock_time()?;
    let players = table.player()?;
    let inventories = table.inventory()?;
    let bomb_planted = table.bomb_planted()?;
    let rounds = table.round_num()?;

    let filtered = (0..table.len())
        .filter(|&i| teams[i] == team && sides[i] == side && areas[i] == area_name)
        .map(|i| Ok((i, clocks[i].parse::<ClockTime>()?)))
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    let mut players_at = HashMap::<ClockTime, HashSet<&str>>::new();
    for &(i, clock) in &filtered {
        players_at.entry(clock).or_default().insert(players[i].as_str());
    }
    let crowded = filtered
        .iter()
        .copied()
        .filter(|(_, clock)| players_at[clock].len() >= min_players)
        .collect::<Vec<_>>();

    let armed = crowded
        .iter()
        .copied()
        .filter(|&(i, _)| inventories[i].has_qualifying_weapon())
        .collect::<Vec<_>>();

    let before_plant = armed
        .iter()
        .copied()
        .filter(|&(i, _)| !bomb_planted[i])
        .collect::<Vec<_>>();

    let mut first_entry = BTreeMap::<(u32, &str), ClockTime>::new();
    for &(i, clock) in &before_plant {
        first_entry
            .entry((rounds[i], areas[i].as_str()))
            .and_modify(|min| *min = (*min).min(clock))
            .or_insert(clock);
    }

    tracing::debug!(
        team,
        %side,
        area_name,
        min_players,
        filtered = filtered.len(),
        crowded = crowded.len(),
        armed = armed.len(),
        before_plant = before_plant.len(),
        rounds = first_entry.len(),
        "computed first entry per round"
    );

    Ok(first_entry
        .into_iter()
        .map(|((round_num, area_name), clock_time)| EntrySample {
            round_num,
            area_name: area_name.to_owned(),
            clock_time,
        })
        .collect())
}

/// Average first-entry time of `team` on `side` into `area_name`.
///
/// Only instants with at least `min_players` distinct players count, and only
/// rows whose player carries a rifle or SMG before the bomb is planted.
pub fn average_entry_time(
    table: &ObservationTable,
    team: &str,
    side: Side,
    area_name: &str,
    min_players: usize,
) -> Result<EntryTime, AnalysisError> {
    let samples = entry_time_samples(table, team, side, area_name, min_players)?;
    Ok(EntryTime::from_samples(&samples))
}
