use zonewatch_core::{AltitudeRange, BoundaryError, GeometricBoundary, Polygon};

/// Built-in boundaries on `de_overpass`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum BoundaryPreset {
    /// Light blue choke point leading to bombsite B
    #[default]
    LightBlue,
}

const LIGHT_BLUE_XY: [(f64, f64); 5] = [
    (-1735.0, 250.0),
    (-2024.0, 398.0),
    (-2806.0, 742.0),
    (-2472.0, 1233.0),
    (-1565.0, 580.0),
];
const LIGHT_BLUE_Z: (f64, f64) = (285.0, 421.0);

impl BoundaryPreset {
    pub fn boundary(self) -> Result<GeometricBoundary, BoundaryError> {
        match self {
            BoundaryPreset::LightBlue => {
                let polygon = Polygon::new(LIGHT_BLUE_XY.to_vec())?;
                let altitude = AltitudeRange::new(LIGHT_BLUE_Z.0, LIGHT_BLUE_Z.1)?;
                Ok(GeometricBoundary::new(polygon, altitude))
            }
        }
    }

    /// Name used in report lines.
    pub fn label(self) -> &'static str {
        match self {
            BoundaryPreset::LightBlue => "light blue",
        }
    }
}
