//! Data model for recorded match telemetry.
//!
//! This crate holds the types every analysis step works on:
//!
//! - [`ObservationTable`] - Cleaned per-tick player state, stored column by column
//! - [`RawTable`] - Nullable source columns as loaded from disk
//! - [`GeometricBoundary`] - Map polygon plus altitude band with containment tests
//! - [`Inventory`] / [`Item`] - Nested inventory records and weapon-class extraction
//! - [`ClockTime`] - Round clock readings parsed from `"MM:SS"`
//! - [`Side`] - The side a team plays in a round
//!
//! # Example
//!
//! ```
//! use zonewatch_core::{GeometricBoundary, Inventory, Item, ObservationTable, Observation, Side};
//!
//! let boundary: GeometricBoundary = serde_json::from_str(
//!     r#"{"XY": [[0, 0], [10, 0], [10, 10], [0, 10]], "Z": [0, 5]}"#,
//! ).unwrap();
//! assert!(boundary.contains(5.0, 5.0, 1.0));
//!
//! let table = [Observation {
//!     round_num: 1,
//!     player: "Player0".into(),
//!     team: "Team2".into(),
//!     side: Side::T,
//!     area_name: "BombsiteB".into(),
//!     x: 5.0,
//!     y: 5.0,
//!     z: 1.0,
//!     clock_time: "01:30".into(),
//!     bomb_planted: false,
//!     inventory: Inventory::new(vec![Item::new(Some("Rifle"))]),
//! }]
//! .into_iter()
//! .collect::<ObservationTable>();
//! assert_eq!(table.len(), 1);
//! ```

pub use self::{boundary::*, clock::*, inventory::*, raw::*, side::*, table::*};

pub mod boundary;
pub mod clock;
pub mod inventory;
pub mod raw;
pub mod side;
pub mod table;
