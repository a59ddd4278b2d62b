//! Raw columnar input as read from disk.
//!
//! The source file is a JSON object mapping column names to arrays of
//! nullable cells, mirroring the columnar layout of the recorded frame data:
//!
//! ```json
//! {
//!   "round_num": [1, 1, null],
//!   "player": ["Player0", "Player1", "Player2"],
//!   "clock_time": ["01:45", "01:44", "01:44"],
//!   "inventory": [[{"weapon_class": "Rifle"}], [], null]
//! }
//! ```
//!
//! Columns that are not listed stay absent; unrecognized columns are ignored.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Column, Inventory, Side};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("file {} does not exist", path.display())]
    MissingFile {
        path: PathBuf,
    },
    #[display("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[display("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("column {column} has {found} rows, expected {expected}")]
    RaggedColumns {
        column: Column,
        expected: usize,
        found: usize,
    },
}

/// Nullable source columns, each possibly absent.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_num: Option<Vec<Option<u32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<Vec<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Vec<Option<Side>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_name: Option<Vec<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_time: Option<Vec<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bomb_planted: Option<Vec<Option<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<Option<Inventory>>>,
}

fn column_len<T>(values: Option<&Vec<T>>) -> Option<usize> {
    values.map(Vec::len)
}

fn mark_nulls<T>(values: Option<&Vec<Option<T>>>, keep: &mut [bool]) {
    if let Some(values) = values {
        for (keep, value) in keep.iter_mut().zip(values) {
            *keep &= value.is_some();
        }
    }
}

impl RawTable {
    /// Loads a raw table from a JSON file.
    ///
    /// Fails with [`LoadError::MissingFile`] before opening anything when
    /// `path` does not name an existing file.
    pub fn from_path<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoadError::MissingFile {
                path: path.to_owned(),
            });
        }
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let table = Self::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
            path: path.to_owned(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded raw table");
        Ok(table)
    }

    pub fn from_reader<R>(reader: R) -> Result<Self, serde_json::Error>
    where
        R: Read,
    {
        serde_json::from_reader(reader)
    }

    fn column_lens(&self) -> [(Column, Option<usize>); 11] {
        [
            (Column::RoundNum, column_len(self.round_num.as_ref())),
            (Column::Player, column_len(self.player.as_ref())),
            (Column::Team, column_len(self.team.as_ref())),
            (Column::Side, column_len(self.side.as_ref())),
            (Column::AreaName, column_len(self.area_name.as_ref())),
            (Column::X, column_len(self.x.as_ref())),
            (Column::Y, column_len(self.y.as_ref())),
            (Column::Z, column_len(self.z.as_ref())),
            (Column::ClockTime, column_len(self.clock_time.as_ref())),
            (Column::BombPlanted, column_len(self.bomb_planted.as_ref())),
            (Column::Inventory, column_len(self.inventory.as_ref())),
        ]
    }

    /// Row count shared by all present columns.
    ///
    /// A table without any column has no rows.
    pub fn row_count(&self) -> Result<usize, LoadError> {
        let mut expected = None;
        for (column, len) in self.column_lens() {
            let Some(found) = len else { continue };
            match expected {
                None => expected = Some(found),
                Some(expected) if expected != found => {
                    return Err(LoadError::RaggedColumns {
                        column,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(expected.unwrap_or(0))
    }

    /// One flag per row, `false` where any present column holds a null.
    pub(crate) fn complete_rows(&self) -> Vec<bool> {
        let len = self
            .column_lens()
            .into_iter()
            .find_map(|(_, len)| len)
            .unwrap_or(0);
        let mut keep = vec![true; len];
        mark_nulls(self.round_num.as_ref(), &mut keep);
        mark_nulls(self.player.as_ref(), &mut keep);
        mark_nulls(self.team.as_ref(), &mut keep);
        mark_nulls(self.side.as_ref(), &mut keep);
        mark_nulls(self.area_name.as_ref(), &mut keep);
        mark_nulls(self.x.as_ref(), &mut keep);
        mark_nulls(self.y.as_ref(), &mut keep);
        mark_nulls(self.z.as_ref(), &mut keep);
        mark_nulls(self.clock_time.as_ref(), &mut keep);
        mark_nulls(self.bomb_planted.as_ref(), &mut keep);
        mark_nulls(self.inventory.as_ref(), &mut keep);
        keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObservationTable;

    const SAMPLE: &str = r#"{
        "round_num": [1, 1, 2, 2],
        "player": ["Player0", "Player1", null, "Player3"],
        "team": ["Team2", "Team2", "Team2", "Team1"],
        "side": ["T", "T", "T", "CT"],
        "area_name": ["BombsiteB", "TSpawn", "BombsiteB", "BombsiteB"],
        "x": [-2200.0, 10.5, 0.0, 1.0],
        "y": [700.0, 20.0, 0.0, 1.0],
        "z": [300.0, 0.0, 0.0, 1.0],
        "clock_time": ["01:45", "01:44", "01:40", null],
        "bomb_planted": [false, false, false, true],
        "inventory": [[{"weapon_class": "Rifle"}], [], [{"weapon_class": "SMG"}], [{}]],
        "tick": [1, 2, 3, 4]
    }"#;

    #[test]
    fn test_clean_drops_rows_with_nulls() {
        let raw = RawTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(raw.row_count().unwrap(), 4);
        let table = ObservationTable::clean(raw).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.player().unwrap(),
            &["Player0".to_owned(), "Player1".to_owned()]
        );
        assert_eq!(table.clock_time().unwrap().len(), 2);
        assert!(table.inventory().unwrap()[1].is_empty());
    }

    #[test]
    fn test_absent_columns_stay_absent() {
        let raw = RawTable::from_reader(r#"{"team": ["Team2", null], "x": [1.0, 2.0]}"#.as_bytes())
            .unwrap();
        let table = ObservationTable::clean(raw).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.has_column(Column::Team));
        assert!(!table.has_column(Column::Inventory));
        assert!(table.inventory().is_err());
    }

    #[test]
    fn test_ragged_columns_are_rejected() {
        let raw = RawTable::from_reader(r#"{"team": ["Team2"], "x": [1.0, 2.0]}"#.as_bytes())
            .unwrap();
        let err = ObservationTable::clean(raw).unwrap_err();
        assert!(matches!(
            err,
            LoadError::RaggedColumns {
                column: Column::X,
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_empty_object_is_empty_table() {
        let raw = RawTable::from_reader("{}".as_bytes()).unwrap();
        let table = ObservationTable::clean(raw).unwrap();
        assert!(table.is_empty());
        assert!(table.team().is_err());
    }

    #[test]
    fn test_missing_file_is_reported_before_open() {
        let err = RawTable::from_path("/nonexistent/zonewatch/frames.json").unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
        assert!(err.to_string().contains("does not exist"));
    }
}
