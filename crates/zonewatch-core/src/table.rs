//! Column-oriented observation table.
//!
//! [`ObservationTable`] stores per-tick player state column by column. A
//! column the source did not provide stays absent, and reading it fails with
//! [`SchemaError::MissingColumn`]; every present column has exactly
//! [`ObservationTable::len`] values and none of them are null.
//!
//! The derived [`Column::InBoundary`] column is absent until a boundary
//! classification writes it through [`ObservationTable::set_in_boundary`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Inventory, Side, raw::RawTable};

/// Column names of the observation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    RoundNum,
    Player,
    Team,
    Side,
    AreaName,
    X,
    Y,
    Z,
    ClockTime,
    BombPlanted,
    Inventory,
    InBoundary,
}

impl Column {
    /// Columns read from the source data, in source order.
    pub const SOURCE: [Column; 11] = [
        Column::RoundNum,
        Column::Player,
        Column::Team,
        Column::Side,
        Column::AreaName,
        Column::X,
        Column::Y,
        Column::Z,
        Column::ClockTime,
        Column::BombPlanted,
        Column::Inventory,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Column::RoundNum => "round_num",
            Column::Player => "player",
            Column::Team => "team",
            Column::Side => "side",
            Column::AreaName => "area_name",
            Column::X => "x",
            Column::Y => "y",
            Column::Z => "z",
            Column::ClockTime => "clock_time",
            Column::BombPlanted => "bomb_planted",
            Column::Inventory => "inventory",
            Column::InBoundary => "in_boundary",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.name(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("no {column} column found")]
    MissingColumn { column: Column },
}

/// One row of the table with every source column filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub round_num: u32,
    pub player: String,
    pub team: String,
    pub side: Side,
    pub area_name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Round clock as `"MM:SS"` text
    pub clock_time: String,
    pub bomb_planted: bool,
    pub inventory: Inventory,
}

/// Cleaned observations stored column by column.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObservationTable {
    len: usize,
    round_num: Option<Vec<u32>>,
    player: Option<Vec<String>>,
    team: Option<Vec<String>>,
    side: Option<Vec<Side>>,
    area_name: Option<Vec<String>>,
    x: Option<Vec<f64>>,
    y: Option<Vec<f64>>,
    z: Option<Vec<f64>>,
    clock_time: Option<Vec<String>>,
    bomb_planted: Option<Vec<bool>>,
    inventory: Option<Vec<Inventory>>,
    in_boundary: Option<Vec<bool>>,
}

fn present<T>(values: Option<&Vec<T>>, column: Column) -> Result<&[T], SchemaError> {
    values
        .map(Vec::as_slice)
        .ok_or(SchemaError::MissingColumn { column })
}

fn keep_complete<T>(values: Option<Vec<Option<T>>>, keep: &[bool]) -> Option<Vec<T>> {
    values.map(|values| {
        values
            .into_iter()
            .zip(keep)
            .filter_map(|(value, &keep)| if keep { value } else { None })
            .collect()
    })
}

impl FromIterator<Observation> for ObservationTable {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        let mut table = Self {
            round_num: Some(vec![]),
            player: Some(vec![]),
            team: Some(vec![]),
            side: Some(vec![]),
            area_name: Some(vec![]),
            x: Some(vec![]),
            y: Some(vec![]),
            z: Some(vec![]),
            clock_time: Some(vec![]),
            bomb_planted: Some(vec![]),
            inventory: Some(vec![]),
            ..Self::default()
        };
        for obs in iter {
            table.push(obs);
        }
        table
    }
}

impl ObservationTable {
    fn push(&mut self, obs: Observation) {
        fn push_to<T>(column: &mut Option<Vec<T>>, value: T) {
            if let Some(values) = column {
                values.push(value);
            }
        }
        push_to(&mut self.round_num, obs.round_num);
        push_to(&mut self.player, obs.player);
        push_to(&mut self.team, obs.team);
        push_to(&mut self.side, obs.side);
        push_to(&mut self.area_name, obs.area_name);
        push_to(&mut self.x, obs.x);
        push_to(&mut self.y, obs.y);
        push_to(&mut self.z, obs.z);
        push_to(&mut self.clock_time, obs.clock_time);
        push_to(&mut self.bomb_planted, obs.bomb_planted);
        push_to(&mut self.inventory, obs.inventory);
        self.len += 1;
    }

    /// Builds a cleaned table from raw columns, dropping every row that has a
    /// null in any present column.
    ///
    /// Absent columns stay absent. Fails if the present columns disagree on
    /// their length.
    pub fn clean(raw: RawTable) -> Result<Self, crate::LoadError> {
        let raw_len = raw.row_count()?;
        let keep = raw.complete_rows();
        let len = keep.iter().filter(|&&k| k).count();
        let dropped = raw_len - len;
        if dropped > 0 {
            tracing::warn!(dropped, total = raw_len, "dropped rows containing null values");
        }
        tracing::info!(rows = len, "cleaned observation table");

        Ok(Self {
            len,
            round_num: keep_complete(raw.round_num, &keep),
            player: keep_complete(raw.player, &keep),
            team: keep_complete(raw.team, &keep),
            side: keep_complete(raw.side, &keep),
            area_name: keep_complete(raw.area_name, &keep),
            x: keep_complete(raw.x, &keep),
            y: keep_complete(raw.y, &keep),
            z: keep_complete(raw.z, &keep),
            clock_time: keep_complete(raw.clock_time, &keep),
            bomb_planted: keep_complete(raw.bomb_planted, &keep),
            inventory: keep_complete(raw.inventory, &keep),
            in_boundary: None,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn has_column(&self, column: Column) -> bool {
        match column {
            Column::RoundNum => self.round_num.is_some(),
            Column::Player => self.player.is_some(),
            Column::Team => self.team.is_some(),
            Column::Side => self.side.is_some(),
            Column::AreaName => self.area_name.is_some(),
            Column::X => self.x.is_some(),
            Column::Y => self.y.is_some(),
            Column::Z => self.z.is_some(),
            Column::ClockTime => self.clock_time.is_some(),
            Column::BombPlanted => self.bomb_planted.is_some(),
            Column::Inventory => self.inventory.is_some(),
            Column::InBoundary => self.in_boundary.is_some(),
        }
    }

    /// Fails with the first of `columns` that is absent.
    pub fn require(&self, columns: &[Column]) -> Result<(), SchemaError> {
        match columns.iter().find(|c| !self.has_column(**c)) {
            Some(&column) => Err(SchemaError::MissingColumn { column }),
            None => Ok(()),
        }
    }

    /// Removes a column, leaving it absent.
    pub fn drop_column(&mut self, column: Column) {
        match column {
            Column::RoundNum => self.round_num = None,
            Column::Player => self.player = None,
            Column::Team => self.team = None,
            Column::Side => self.side = None,
            Column::AreaName => self.area_name = None,
            Column::X => self.x = None,
            Column::Y => self.y = None,
            Column::Z => self.z = None,
            Column::ClockTime => self.clock_time = None,
            Column::BombPlanted => self.bomb_planted = None,
            Column::Inventory => self.inventory = None,
            Column::InBoundary => self.in_boundary = None,
        }
    }

    /// Writes the boundary-membership column, replacing any previous one.
    ///
    /// # Panics
    ///
    /// Panics if `mask` does not have one flag per row.
    pub fn set_in_boundary(&mut self, mask: Vec<bool>) {
        assert_eq!(mask.len(), self.len, "mask must have one flag per row");
        self.in_boundary = Some(mask);
    }

    pub fn round_num(&self) -> Result<&[u32], SchemaError> {
        present(self.round_num.as_ref(), Column::RoundNum)
    }

    pub fn player(&self) -> Result<&[String], SchemaError> {
        present(self.player.as_ref(), Column::Player)
    }

    pub fn team(&self) -> Result<&[String], SchemaError> {
        present(self.team.as_ref(), Column::Team)
    }

    pub fn side(&self) -> Result<&[Side], SchemaError> {
        present(self.side.as_ref(), Column::Side)
    }

    pub fn area_name(&self) -> Result<&[String], SchemaError> {
        present(self.area_name.as_ref(), Column::AreaName)
    }

    pub fn x(&self) -> Result<&[f64], SchemaError> {
        present(self.x.as_ref(), Column::X)
    }

    pub fn y(&self) -> Result<&[f64], SchemaError> {
        present(self.y.as_ref(), Column::Y)
    }

    pub fn z(&self) -> Result<&[f64], SchemaError> {
        present(self.z.as_ref(), Column::Z)
    }

    pub fn clock_time(&self) -> Result<&[String], SchemaError> {
        present(self.clock_time.as_ref(), Column::ClockTime)
    }

    pub fn bomb_planted(&self) -> Result<&[bool], SchemaError> {
        present(self.bomb_planted.as_ref(), Column::BombPlanted)
    }

    pub fn inventory(&self) -> Result<&[Inventory], SchemaError> {
        present(self.inventory.as_ref(), Column::Inventory)
    }

    pub fn in_boundary(&self) -> Result<&[bool], SchemaError> {
        present(self.in_boundary.as_ref(), Column::InBoundary)
    }

    /// Indices of rows played by `team` on `side`.
    pub fn team_side_rows(&self, team: &str, side: Side) -> Result<Vec<usize>, SchemaError> {
        let teams = self.team()?;
        let sides = self.side()?;
        Ok((0..self.len)
            .filter(|&i| teams[i] == team && sides[i] == side)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Item;

    fn observation(round_num: u32, player: &str) -> Observation {
        Observation {
            round_num,
            player: player.into(),
            team: "Team2".into(),
            side: Side::T,
            area_name: "BombsiteB".into(),
            x: 1.0,
            y: 2.0,
            z: 3.0,
            clock_time: "01:30".into(),
            bomb_planted: false,
            inventory: Inventory::new(vec![Item::new(Some("Rifle"))]),
        }
    }

    #[test]
    fn test_from_observations_fills_every_source_column() {
        let table = [observation(1, "a"), observation(2, "b")]
            .into_iter()
            .collect::<ObservationTable>();
        assert_eq!(table.len(), 2);
        for column in Column::SOURCE {
            assert!(table.has_column(column), "{column} should be present");
        }
        assert!(!table.has_column(Column::InBoundary));
        assert_eq!(table.round_num().unwrap(), &[1, 2]);
        assert_eq!(table.player().unwrap(), &["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_missing_column_error() {
        let mut table = [observation(1, "a")].into_iter().collect::<ObservationTable>();
        table.drop_column(Column::Inventory);
        assert_eq!(
            table.inventory().unwrap_err(),
            SchemaError::MissingColumn {
                column: Column::Inventory
            }
        );
        assert_eq!(
            table.require(&[Column::Team, Column::Inventory, Column::AreaName]),
            Err(SchemaError::MissingColumn {
                column: Column::Inventory
            })
        );
        assert_eq!(
            table.in_boundary().unwrap_err().to_string(),
            "no in_boundary column found"
        );
    }

    #[test]
    fn test_set_in_boundary_replaces() {
        let mut table = [observation(1, "a"), observation(1, "b")]
            .into_iter()
            .collect::<ObservationTable>();
        table.set_in_boundary(vec![true, false]);
        table.set_in_boundary(vec![false, true]);
        assert_eq!(table.in_boundary().unwrap(), &[false, true]);
    }

    #[test]
    #[should_panic(expected = "one flag per row")]
    fn test_set_in_boundary_rejects_wrong_length() {
        let mut table = [observation(1, "a")].into_iter().collect::<ObservationTable>();
        table.set_in_boundary(vec![true, true]);
    }

    #[test]
    fn test_team_side_rows() {
        let mut ct = observation(1, "c");
        ct.side = Side::CT;
        let mut other = observation(1, "d");
        other.team = "Team1".into();
        let table = [observation(1, "a"), ct, other, observation(2, "b")]
            .into_iter()
            .collect::<ObservationTable>();
        assert_eq!(table.team_side_rows("Team2", Side::T).unwrap(), vec![0, 3]);
        assert_eq!(table.team_side_rows("Team2", Side::CT).unwrap(), vec![1]);
        assert!(table.team_side_rows("Team3", Side::T).unwrap().is_empty());
    }
}
