//! Spatial boundaries: a map polygon extruded over an altitude band.
//!
//! A [`GeometricBoundary`] is immutable after construction. Containment is
//! joint: a point is inside only when its `(x, y)` lies in the polygon and its
//! `z` lies in the inclusive [`AltitudeRange`].
//!
//! # Edge convention
//!
//! Polygon containment uses the even-odd ray-casting rule. A ray is cast
//! toward `+x`; an edge counts as crossed when it straddles the point's `y`
//! under the half-open rule `(yi > y) != (yj > y)` and the crossing lies
//! strictly to the right of the point. Points on edges are therefore
//! classified deterministically but not symmetrically: for an axis-aligned
//! square, points on the left edge are inside and points on the right edge are
//! outside.
//!
//! # Configuration format
//!
//! Boundaries deserialize from an object with a polygon under `XY` and an
//! inclusive altitude interval under `Z`:
//!
//! ```json
//! {
//!   "XY": [[-1735, 250], [-2024, 398], [-2806, 742], [-2472, 1233], [-1565, 580]],
//!   "Z": [285, 421]
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BoundaryError {
    #[display("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[display("boundary coordinates must be finite")]
    NonFiniteCoordinate,
    #[display("altitude range is inverted: {min} > {max}")]
    InvertedAltitude { min: f64, max: f64 },
}

/// A closed polygon in the map plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<(f64, f64)>,
}

impl Polygon {
    /// Creates a polygon from its vertices in order.
    ///
    /// The closing edge from the last vertex back to the first is implied;
    /// repeating the first vertex at the end is allowed and has no effect.
    pub fn new(vertices: Vec<(f64, f64)>) -> Result<Self, BoundaryError> {
        if vertices.len() < 3 {
            return Err(BoundaryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        if vertices.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(BoundaryError::NonFiniteCoordinate);
        }
        Ok(Self { vertices })
    }

    #[must_use]
    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];
            if (yi > y) != (yj > y) {
                let crossing_x = (xj - xi) * (y - yi) / (yj - yi) + xi;
                if x < crossing_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Tests every `(xs[i], ys[i])` pair, returning one flag per pair.
    ///
    /// # Panics
    ///
    /// Panics if `xs` and `ys` have different lengths.
    #[must_use]
    pub fn contains_points(&self, xs: &[f64], ys: &[f64]) -> Vec<bool> {
        assert_eq!(xs.len(), ys.len(), "coordinate columns must have equal length");
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| self.contains(x, y))
            .collect()
    }
}

/// Inclusive altitude interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeRange {
    min: f64,
    max: f64,
}

impl AltitudeRange {
    pub fn new(min: f64, max: f64) -> Result<Self, BoundaryError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(BoundaryError::NonFiniteCoordinate);
        }
        if min > max {
            return Err(BoundaryError::InvertedAltitude { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn contains(&self, z: f64) -> bool {
        self.min <= z && z <= self.max
    }

    #[must_use]
    pub fn contains_all(&self, zs: &[f64]) -> Vec<bool> {
        zs.iter().map(|&z| self.contains(z)).collect()
    }
}

/// A named map zone: polygon plus altitude band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundarySpec", into = "BoundarySpec")]
pub struct GeometricBoundary {
    polygon: Polygon,
    altitude: AltitudeRange,
}

/// Serialized form of a [`GeometricBoundary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySpec {
    /// Polygon vertices in order
    #[serde(rename = "XY")]
    pub xy: Vec<[f64; 2]>,
    /// Inclusive altitude interval `[min, max]`
    #[serde(rename = "Z")]
    pub z: [f64; 2],
}

impl TryFrom<BoundarySpec> for GeometricBoundary {
    type Error = BoundaryError;

    fn try_from(spec: BoundarySpec) -> Result<Self, Self::Error> {
        let polygon = Polygon::new(spec.xy.into_iter().map(|[x, y]| (x, y)).collect())?;
        let altitude = AltitudeRange::new(spec.z[0], spec.z[1])?;
        Ok(Self::new(polygon, altitude))
    }
}

impl From<GeometricBoundary> for BoundarySpec {
    fn from(boundary: GeometricBoundary) -> Self {
        Self {
            xy: boundary
                .polygon
                .vertices
                .iter()
                .map(|&(x, y)| [x, y])
                .collect(),
            z: [boundary.altitude.min, boundary.altitude.max],
        }
    }
}

impl GeometricBoundary {
    #[must_use]
    pub fn new(polygon: Polygon, altitude: AltitudeRange) -> Self {
        Self { polygon, altitude }
    }

    #[must_use]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[must_use]
    pub fn altitude(&self) -> AltitudeRange {
        self.altitude
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.polygon.contains(x, y) && self.altitude.contains(z)
    }

    /// Vectorized containment over coordinate columns.
    ///
    /// Polygon and altitude membership are evaluated independently over the
    /// whole columns and then combined, yielding one flag per row.
    ///
    /// # Panics
    ///
    /// Panics if the columns have different lengths.
    #[must_use]
    pub fn contains_points(&self, xs: &[f64], ys: &[f64], zs: &[f64]) -> Vec<bool> {
        assert_eq!(xs.len(), zs.len(), "coordinate columns must have equal length");
        let in_polygon = self.polygon.contains_points(xs, ys);
        let in_altitude = self.altitude.contains_all(zs);
        in_polygon
            .into_iter()
            .zip(in_altitude)
            .map(|(p, a)| p && a)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    fn light_blue() -> GeometricBoundary {
        let json = r#"{
            "XY": [[-1735, 250], [-2024, 398], [-2806, 742], [-2472, 1233], [-1565, 580]],
            "Z": [285, 421]
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_polygon_inside_and_outside() {
        let square = unit_square();
        assert!(square.contains(0.5, 0.5));
        assert!(square.contains(0.1, 0.9));
        assert!(!square.contains(1.5, 0.5));
        assert!(!square.contains(-0.1, 0.5));
        assert!(!square.contains(0.5, 1.5));
    }

    #[test]
    fn test_polygon_edge_convention_is_consistent() {
        let square = unit_square();
        // left edge in, right edge out
        assert!(square.contains(0.0, 0.5));
        assert!(!square.contains(1.0, 0.5));
        for _ in 0..3 {
            assert_eq!(square.contains(0.0, 0.5), square.contains(0.0, 0.5));
            assert_eq!(square.contains(0.5, 0.0), square.contains(0.5, 0.0));
        }
    }

    #[test]
    fn test_concave_polygon() {
        // U shape opening upward
        let u = Polygon::new(vec![
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ])
        .unwrap();
        assert!(u.contains(0.5, 2.0));
        assert!(u.contains(2.5, 2.0));
        assert!(!u.contains(1.5, 2.0));
        assert!(u.contains(1.5, 0.5));
    }

    #[test]
    fn test_invalid_boundaries_are_rejected() {
        assert_eq!(
            Polygon::new(vec![(0.0, 0.0), (1.0, 1.0)]),
            Err(BoundaryError::TooFewVertices { count: 2 })
        );
        assert_eq!(
            Polygon::new(vec![(0.0, 0.0), (1.0, f64::NAN), (1.0, 1.0)]),
            Err(BoundaryError::NonFiniteCoordinate)
        );
        assert!(matches!(
            AltitudeRange::new(10.0, 5.0),
            Err(BoundaryError::InvertedAltitude { .. })
        ));
        let json = r#"{"XY": [[0, 0], [1, 1]], "Z": [0, 1]}"#;
        assert!(serde_json::from_str::<GeometricBoundary>(json).is_err());
    }

    #[test]
    fn test_altitude_is_inclusive() {
        let range = AltitudeRange::new(285.0, 421.0).unwrap();
        assert!(range.contains(285.0));
        assert!(range.contains(421.0));
        assert!(!range.contains(284.9));
        assert!(!range.contains(421.1));
    }

    #[test]
    fn test_joint_containment() {
        let boundary = light_blue();
        let (x, y) = (-2200.0, 700.0);
        assert!(boundary.polygon().contains(x, y));
        assert!(boundary.contains(x, y, 300.0));
        assert!(!boundary.contains(x, y, 500.0));
        assert!(!boundary.contains(0.0, 0.0, 300.0));
    }

    #[test]
    fn test_contains_points_matches_scalar() {
        let boundary = light_blue();
        let xs = [-2200.0, -2200.0, 0.0, -1800.0, -2700.0];
        let ys = [700.0, 700.0, 0.0, 500.0, 1200.0];
        let zs = [300.0, 100.0, 300.0, 421.0, 300.0];
        let mask = boundary.contains_points(&xs, &ys, &zs);
        assert_eq!(mask.len(), xs.len());
        for i in 0..xs.len() {
            let expected = boundary.polygon().contains(xs[i], ys[i])
                && boundary.altitude().contains(zs[i]);
            assert_eq!(mask[i], expected);
            assert_eq!(mask[i], boundary.contains(xs[i], ys[i], zs[i]));
        }
    }

    #[test]
    fn test_spec_roundtrip_preserves_shape() {
        let boundary = light_blue();
        let spec = BoundarySpec::from(boundary.clone());
        assert_eq!(spec.z, [285.0, 421.0]);
        assert_eq!(spec.xy.len(), 5);
        assert_eq!(GeometricBoundary::try_from(spec).unwrap(), boundary);
    }
}
