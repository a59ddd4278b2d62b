//! Boundary and entry analysis over recorded match telemetry.
//!
//! The usual flow is through [`GameStateProcessor`]: point it at a frame data
//! file, [`process`](GameStateProcessor::process) it against a
//! [`GeometricBoundary`](zonewatch_core::GeometricBoundary) and run queries on
//! the classified table.
//!
//! - [`classify`] - Marks every row as inside or outside a boundary
//! - [`entry_frequency`] - Share of rounds in which a team entered the boundary
//! - [`entry_time`] - Average first-entry clock time into a named area
//! - [`heatmap`] - Projected positions and their density for radar overlays
//! - [`summary`] - Distinct weapon classes and area names
//!
//! # Example
//!
//! ```
//! use zonewatch_analysis::GameStateProcessor;
//! use zonewatch_core::{GeometricBoundary, Inventory, Item, Observation, ObservationTable, Side};
//!
//! let boundary: GeometricBoundary = serde_json::from_str(
//!     r#"{"XY": [[0, 0], [10, 0], [10, 10], [0, 10]], "Z": [0, 5]}"#,
//! ).unwrap();
//! let row = |round_num, x| Observation {
//!     round_num,
//!     player: "Player0".into(),
//!     team: "Team2".into(),
//!     side: Side::T,
//!     area_name: "BombsiteB".into(),
//!     x,
//!     y: 5.0,
//!     z: 1.0,
//!     clock_time: "01:30".into(),
//!     bomb_planted: false,
//!     inventory: Inventory::new(vec![Item::new(Some("Rifle"))]),
//! };
//! let table = [row(1, 5.0), row(2, 50.0)].into_iter().collect::<ObservationTable>();
//!
//! let mut processor = GameStateProcessor::from_table(table);
//! processor.process(&boundary).unwrap();
//! assert_eq!(processor.entry_frequency("Team2", Side::T).unwrap(), 0.5);
//! assert_eq!(
//!     processor.average_entry_time("Team2", Side::T, "BombsiteB", 1).unwrap().to_string(),
//!     "01:30",
//! );
//! ```

pub use self::{error::AnalysisError, processor::GameStateProcessor};

pub mod classify;
pub mod entry_frequency;
pub mod entry_time;
pub mod error;
pub mod heatmap;
pub mod processor;
pub mod summary;
