//! Data preparation for position heatmaps over a map radar image.
//!
//! Positions are shifted into the radar image's coordinate frame with a fixed
//! per-map offset ([`MapProjection`]). The view is the extent of the shifted
//! points widened by a padding margin; density is estimated over that view.

use serde::{Deserialize, Serialize};
use zonewatch_core::{ObservationTable, SchemaError, Side};
use zonewatch_stats::density::{Bounds, DensityGrid};

/// Placement of game coordinates on a radar image.
///
/// Defaults match the `de_overpass` radar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapProjection {
    /// Image extent in projected coordinates: `[x_min, x_max, y_min, y_max]`
    pub extent: [f64; 4],
    pub shift_x: f64,
    pub shift_y: f64,
    /// Margin added around the data extent
    pub padding: f64,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            extent: [-2650.0, 2650.0, -2650.0, 2650.0],
            shift_x: 2190.0,
            shift_y: 890.0,
            padding: 450.0,
        }
    }
}

impl MapProjection {
    #[must_use]
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.shift_x, y + self.shift_y)
    }

    /// Image extent as bounds, or `None` if it is degenerate.
    #[must_use]
    pub fn extent_bounds(&self) -> Option<Bounds> {
        let [x_min, x_max, y_min, y_max] = self.extent;
        Bounds::new(x_min, x_max, y_min, y_max)
    }
}

/// Projected positions of one team/side/area selection.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapData {
    pub title: String,
    pub points: Vec<(f64, f64)>,
    /// Data extent plus padding; `None` without points or with zero area
    pub viewport: Option<Bounds>,
}

impl HeatmapData {
    pub fn collect(
        table: &ObservationTable,
        projection: &MapProjection,
        team: &str,
        side: Side,
        area_name: &str,
    ) -> Result<Self, SchemaError> {
        let areas = table.area_name()?;
        let xs = table.x()?;
        let ys = table.y()?;
        let points = table
            .team_side_rows(team, side)?
            .into_iter()
            .filter(|&i| areas[i] == area_name)
            .map(|i| projection.project(xs[i], ys[i]))
            .collect::<Vec<_>>();

        let viewport = points.split_first().and_then(|(&(x0, y0), rest)| {
            let (x_min, x_max, y_min, y_max) = rest.iter().fold(
                (x0, x0, y0, y0),
                |(x_min, x_max, y_min, y_max), &(x, y)| {
                    (x_min.min(x), x_max.max(x), y_min.min(y), y_max.max(y))
                },
            );
            let pad = projection.padding;
            Bounds::new(x_min - pad, x_max + pad, y_min - pad, y_max + pad)
        });
        tracing::debug!(team, %side, area_name, points = points.len(), "collected heatmap points");

        Ok(Self {
            title: format!("{team} {side} {area_name} Heatmap"),
            points,
            viewport,
        })
    }

    /// Kernel density over the viewport on a `grid_size` square grid.
    #[must_use]
    pub fn density(&self, grid_size: usize) -> Option<DensityGrid> {
        DensityGrid::gaussian_kde(&self.points, self.viewport?, grid_size, grid_size)
    }
}

#[cfg(test)]
mod tests {
    use zonewatch_core::{Inventory, Observation};

    use super::*;

    fn obs(x: f64, y: f64, area_name: &str, side: Side) -> Observation {
        Observation {
            round_num: 1,
            player: "Player0".into(),
            team: "Team2".into(),
            side,
            area_name: area_name.into(),
            x,
            y,
            z: 0.0,
            clock_time: "01:00".into(),
            bomb_planted: false,
            inventory: Inventory::default(),
        }
    }

    #[test]
    fn test_points_are_shifted_and_padded() {
        let table = [
            obs(-100.0, 50.0, "BombsiteB", Side::CT),
            obs(100.0, -50.0, "BombsiteB", Side::CT),
            obs(0.0, 0.0, "BombsiteB", Side::T),
            obs(0.0, 0.0, "Mid", Side::CT),
        ]
        .into_iter()
        .collect::<ObservationTable>();
        let projection = MapProjection::default();
        let data =
            HeatmapData::collect(&table, &projection, "Team2", Side::CT, "BombsiteB").unwrap();
        assert_eq!(data.points, vec![(2090.0, 940.0), (2290.0, 840.0)]);
        assert_eq!(data.title, "Team2 CT BombsiteB Heatmap");
        let viewport = data.viewport.unwrap();
        assert_eq!(viewport.x_min, 2090.0 - 450.0);
        assert_eq!(viewport.x_max, 2290.0 + 450.0);
        assert_eq!(viewport.y_min, 840.0 - 450.0);
        assert_eq!(viewport.y_max, 940.0 + 450.0);
        assert!(data.density(20).is_some());
    }

    #[test]
    fn test_empty_selection_has_no_viewport() {
        let table = [obs(0.0, 0.0, "Mid", Side::T)]
            .into_iter()
            .collect::<ObservationTable>();
        let data = HeatmapData::collect(
            &table,
            &MapProjection::default(),
            "Team2",
            Side::CT,
            "BombsiteB",
        )
        .unwrap();
        assert!(data.points.is_empty());
        assert!(data.viewport.is_none());
        assert!(data.density(20).is_none());
    }

    #[test]
    fn test_projection_deserializes_with_defaults() {
        let projection: MapProjection = serde_json::from_str(r#"{"padding": 100}"#).unwrap();
        assert_eq!(projection.padding, 100.0);
        assert_eq!(projection.shift_x, 2190.0);
        assert!(projection.extent_bounds().is_some());
    }
}
