//! Query facade over one recorded match.
//!
//! [`GameStateProcessor`] owns the observation table of one input file. The
//! file's existence is checked at construction; [`process`] loads it, drops
//! incomplete rows and classifies every row against a boundary. After that the
//! table is only read, so queries can run in any order.
//!
//! [`process`]: GameStateProcessor::process

use std::path::{Path, PathBuf};

use zonewatch_core::{GeometricBoundary, LoadError, ObservationTable, RawTable, Side};

use crate::{
    AnalysisError,
    classify::classify,
    entry_frequency::{self, RoundEntries},
    entry_time::{self, EntrySample, EntryTime},
    heatmap::{HeatmapData, MapProjection},
    summary::TableSummary,
};

#[derive(Debug, Clone)]
pub struct GameStateProcessor {
    path: Option<PathBuf>,
    table: Option<ObservationTable>,
}

impl GameStateProcessor {
    /// Creates a processor for the frame data stored at `path`.
    ///
    /// Fails with [`LoadError::MissingFile`] if the file does not exist.
    /// Nothing is read until [`process`](Self::process).
    pub fn new<P>(path: P) -> Result<Self, LoadError>
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        if !path.is_file() {
            return Err(LoadError::MissingFile { path });
        }
        Ok(Self {
            path: Some(path),
            table: None,
        })
    }

    /// Creates a processor over an already cleaned table.
    #[must_use]
    pub fn from_table(table: ObservationTable) -> Self {
        Self {
            path: None,
            table: Some(table),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads and cleans the input (when backed by a file), classifies every
    /// row against `boundary` and summarizes the result.
    pub fn process(
        &mut self,
        boundary: &GeometricBoundary,
    ) -> Result<TableSummary, AnalysisError> {
        if let Some(path) = &self.path {
            let raw = RawTable::from_path(path)?;
            self.table = Some(ObservationTable::clean(raw)?);
        }
        let table = self.table.as_mut().ok_or(AnalysisError::NotProcessed)?;
        classify(table, boundary)?;

        let summary = TableSummary::collect(table)?;
        tracing::info!(
            rows = summary.rows,
            rows_in_boundary = summary.rows_in_boundary,
            weapon_classes = ?summary.weapon_classes,
            area_names = ?summary.area_names,
            "processed observations"
        );
        Ok(summary)
    }

    /// The processed table.
    pub fn table(&self) -> Result<&ObservationTable, AnalysisError> {
        self.table.as_ref().ok_or(AnalysisError::NotProcessed)
    }

    pub fn entry_rounds(&self, team: &str, side: Side) -> Result<RoundEntries, AnalysisError> {
        Ok(entry_frequency::entry_rounds(self.table()?, team, side)?)
    }

    pub fn entry_frequency(&self, team: &str, side: Side) -> Result<f64, AnalysisError> {
        entry_frequency::entry_frequency(self.table()?, team, side)
    }

    pub fn entry_time_samples(
        &self,
        team: &str,
        side: Side,
        area_name: &str,
        min_players: usize,
    ) -> Result<Vec<EntrySample>, AnalysisError> {
        entry_time::entry_time_samples(self.table()?, team, side, area_name, min_players)
    }

    pub fn average_entry_time(
        &self,
        team: &str,
        side: Side,
        area_name: &str,
        min_players: usize,
    ) -> Result<EntryTime, AnalysisError> {
        entry_time::average_entry_time(self.table()?, team, side, area_name, min_players)
    }

    pub fn heatmap_data(
        &self,
        projection: &MapProjection,
        area_name: &str,
        team: &str,
        side: Side,
    ) -> Result<HeatmapData, AnalysisError> {
        Ok(HeatmapData::collect(
            self.table()?,
            projection,
            team,
            side,
            area_name,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_fails_at_construction() {
        let err = GameStateProcessor::new("/nonexistent/zonewatch/frames.json").unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
    }

    #[test]
    fn test_queries_without_table_are_not_processed() {
        let processor = GameStateProcessor {
            path: None,
            table: None,
        };
        assert!(matches!(
            processor.entry_frequency("Team2", Side::T),
            Err(AnalysisError::NotProcessed)
        ));
    }

    #[test]
    fn test_queries_on_table_without_columns_fail() {
        let processor = GameStateProcessor::from_table(ObservationTable::default());
        assert!(matches!(
            processor.entry_frequency("Team2", Side::T),
            Err(AnalysisError::Schema(_))
        ));
    }
}
