//! Density overlay on a map radar image.
//!
//! The radar image is stretched over the projection extent with its first
//! row at the top (`y_max`). The output covers the heatmap viewport at the
//! radar's pixel scale; parts of the viewport outside the extent are white.
//! Density cells below the iso-proportion level stay transparent, the rest
//! are blended in with a light-to-dark red ramp.

use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};
use zonewatch_analysis::heatmap::{HeatmapData, MapProjection};
use zonewatch_stats::density::{Bounds, DensityGrid};

/// Share of the density mass left unshaded.
pub const DENSITY_THRESHOLD: f64 = 0.4;

const OVERLAY_ALPHA: f64 = 0.5;
const RAMP_LOW: [f64; 3] = [254.0, 224.0, 210.0];
const RAMP_HIGH: [f64; 3] = [165.0, 15.0, 21.0];
const OUTSIDE_MAP: Rgb<u8> = Rgb([255, 255, 255]);
const MAX_SIDE: f64 = 4096.0;

#[derive(Debug)]
pub struct Overlay {
    pub image: RgbImage,
    /// Density level of the shading threshold, if a density was estimated
    pub level: Option<f64>,
}

pub fn load_background(path: &Path) -> anyhow::Result<RgbImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open map image: {}", path.display()))?;
    Ok(image.to_rgb8())
}

pub fn save_image(image: &RgbImage, path: &Path) -> anyhow::Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to save heatmap image: {}", path.display()))?;
    tracing::info!(path = %path.display(), width = image.width(), height = image.height(), "saved heatmap");
    Ok(())
}

pub fn render(
    background: &RgbImage,
    projection: &MapProjection,
    data: &HeatmapData,
    grid_size: usize,
) -> anyhow::Result<Overlay> {
    anyhow::ensure!(
        background.width() > 0 && background.height() > 0,
        "Map image is empty"
    );
    let extent = projection
        .extent_bounds()
        .context("Map extent must have a positive width and height")?;
    let viewport = data
        .viewport
        .with_context(|| format!("No observations to plot for {}", data.title))?;

    let density = data.density(grid_size);
    if density.is_none() {
        tracing::warn!(
            title = %data.title,
            points = data.points.len(),
            "too few distinct positions for a density estimate, drawing the map only"
        );
    }
    let level = density
        .as_ref()
        .map(|grid| grid.iso_proportion_level(DENSITY_THRESHOLD));

    let canvas = Canvas::new(background, extent, viewport);
    let mut image = RgbImage::new(canvas.width, canvas.height);
    for (px, py, pixel) in image.enumerate_pixels_mut() {
        let (x, y) = canvas.to_data(px, py);
        let mut color = sample_background(background, extent, x, y);
        if let (Some(grid), Some(level)) = (&density, level)
            && let Some(shade) = shade(grid, level, x, y)
        {
            color = blend(color, shade, OVERLAY_ALPHA);
        }
        *pixel = color;
    }

    tracing::debug!(
        title = %data.title,
        width = canvas.width,
        height = canvas.height,
        level,
        "rendered heatmap"
    );
    Ok(Overlay { image, level })
}

/// Output raster covering the viewport.
struct Canvas {
    viewport: Bounds,
    width: u32,
    height: u32,
}

impl Canvas {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn new(background: &RgbImage, extent: Bounds, viewport: Bounds) -> Self {
        let scale_x = f64::from(background.width()) / extent.width();
        let scale_y = f64::from(background.height()) / extent.height();
        let width = (viewport.width() * scale_x).round().clamp(1.0, MAX_SIDE) as u32;
        let height = (viewport.height() * scale_y).round().clamp(1.0, MAX_SIDE) as u32;
        Self {
            viewport,
            width,
            height,
        }
    }

    fn to_data(&self, px: u32, py: u32) -> (f64, f64) {
        let x = self.viewport.x_min
            + (f64::from(px) + 0.5) * self.viewport.width() / f64::from(self.width);
        let y = self.viewport.y_max
            - (f64::from(py) + 0.5) * self.viewport.height() / f64::from(self.height);
        (x, y)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_background(background: &RgbImage, extent: Bounds, x: f64, y: f64) -> Rgb<u8> {
    if !extent.contains(x, y) {
        return OUTSIDE_MAP;
    }
    let (w, h) = background.dimensions();
    let ix = ((x - extent.x_min) / extent.width() * f64::from(w)) as u32;
    let iy = ((extent.y_max - y) / extent.height() * f64::from(h)) as u32;
    *background.get_pixel(ix.min(w - 1), iy.min(h - 1))
}

fn shade(grid: &DensityGrid, level: f64, x: f64, y: f64) -> Option<[f64; 3]> {
    let value = grid.value_at(x, y)?;
    if value <= 0.0 || value < level {
        return None;
    }
    let max = grid.max_value();
    let t = if max > level {
        (value - level) / (max - level)
    } else {
        1.0
    };
    Some(ramp(t))
}

fn ramp(t: f64) -> [f64; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut color = [0.0; 3];
    for ((c, lo), hi) in color.iter_mut().zip(RAMP_LOW).zip(RAMP_HIGH) {
        *c = lo + (hi - lo) * t;
    }
    color
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(base: Rgb<u8>, over: [f64; 3], alpha: f64) -> Rgb<u8> {
    let mut out = base;
    for (c, over) in out.0.iter_mut().zip(over) {
        *c = (f64::from(*c) * (1.0 - alpha) + over * alpha)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn quadrants() -> RgbImage {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, RED);
        image.put_pixel(1, 0, GREEN);
        image.put_pixel(0, 1, BLUE);
        image.put_pixel(1, 1, BLACK);
        image
    }

    fn projection() -> MapProjection {
        MapProjection {
            extent: [-10.0, 10.0, -10.0, 10.0],
            shift_x: 0.0,
            shift_y: 0.0,
            padding: 0.0,
        }
    }

    #[test]
    fn test_background_first_row_is_top() {
        let background = quadrants();
        let extent = projection().extent_bounds().unwrap();
        assert_eq!(sample_background(&background, extent, -5.0, 5.0), RED);
        assert_eq!(sample_background(&background, extent, 5.0, 5.0), GREEN);
        assert_eq!(sample_background(&background, extent, -5.0, -5.0), BLUE);
        assert_eq!(sample_background(&background, extent, 5.0, -5.0), BLACK);
        assert_eq!(sample_background(&background, extent, 20.0, 0.0), OUTSIDE_MAP);
    }

    #[test]
    fn test_ramp_and_blend() {
        assert_eq!(ramp(0.0), RAMP_LOW);
        assert_eq!(ramp(1.0), RAMP_HIGH);
        assert_eq!(ramp(7.0), RAMP_HIGH);
        assert_eq!(blend(BLACK, [200.0, 100.0, 50.0], 0.5), Rgb([100, 50, 25]));
        assert_eq!(blend(RED, [0.0, 0.0, 0.0], 0.0), RED);
    }

    #[test]
    fn test_render_covers_viewport_at_map_scale() {
        let data = HeatmapData {
            title: "Team2 CT BombsiteB Heatmap".into(),
            points: vec![(0.0, 0.0), (2.0, 1.0), (1.0, 3.0)],
            viewport: Bounds::new(-50.0, 50.0, -25.0, 25.0),
        };
        // 2 pixels over 20 units
        let overlay = render(&quadrants(), &projection(), &data, 20).unwrap();
        assert_eq!(overlay.image.dimensions(), (10, 5));
        assert!(overlay.level.is_some_and(|level| level > 0.0));
        // far corner lies off the map and has no density
        assert_eq!(*overlay.image.get_pixel(0, 0), OUTSIDE_MAP);
    }

    #[test]
    fn test_render_without_points_fails() {
        let data = HeatmapData {
            title: "Team1 T Mid Heatmap".into(),
            points: vec![],
            viewport: None,
        };
        assert!(render(&quadrants(), &projection(), &data, 20).is_err());
    }
}
