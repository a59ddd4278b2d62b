//! Two-dimensional kernel density estimation on a regular grid.
//!
//! [`DensityGrid::gaussian_kde`] evaluates a Gaussian kernel density estimate
//! of a point cloud at the centers of an `nx` by `ny` grid. Bandwidths follow
//! Scott's rule per axis (`sigma * n^(-1/6)`), with kernels truncated at four
//! bandwidths.
//!
//! [`DensityGrid::iso_proportion_level`] turns a mass proportion into a
//! density threshold: the level below which the given fraction of the
//! estimated probability mass lies. Rendering only the cells at or above the
//! level for proportion `0.4` hides the sparsest 40% of the mass.
//!
//! # Examples
//!
//! ```
//! use zonewatch_stats::density::{Bounds, DensityGrid};
//!
//! let points = [(0.0, 0.0), (1.0, 0.5), (0.5, 1.0), (0.2, 0.3), (0.8, 0.9)];
//! let bounds = Bounds::new(-2.0, 3.0, -2.0, 3.0).unwrap();
//! let grid = DensityGrid::gaussian_kde(&points, bounds, 50, 50).unwrap();
//!
//! let level = grid.iso_proportion_level(0.4);
//! assert!(level > 0.0);
//! assert!(level <= grid.max_value());
//! ```

use std::{f64::consts::PI, ops::Range};

const KERNEL_REACH: f64 = 4.0;

/// Axis-aligned rectangle in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Creates bounds, or `None` unless both spans are finite and positive.
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Option<Self> {
        let valid = [x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite())
            && x_min < x_max
            && y_min < y_max;
        valid.then_some(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// Density values sampled at grid cell centers.
#[derive(Debug, Clone)]
pub struct DensityGrid {
    bounds: Bounds,
    nx: usize,
    ny: usize,
    bandwidth: (f64, f64),
    /// Row-major, row 0 at `y_min`
    values: Vec<f64>,
}

/// Scott's rule bandwidth per axis.
///
/// Returns `None` with fewer than two points or when either axis has no
/// spread.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn scott_bandwidth(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let var_x = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum::<f64>() / (n - 1.0);
    let var_y = points.iter().map(|p| (p.1 - mean_y).powi(2)).sum::<f64>() / (n - 1.0);
    let factor = n.powf(-1.0 / 6.0);
    let (hx, hy) = (var_x.sqrt() * factor, var_y.sqrt() * factor);
    (hx > 0.0 && hy > 0.0 && hx.is_finite() && hy.is_finite()).then_some((hx, hy))
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn cell_range(center: f64, reach: f64, min: f64, step: f64, n: usize) -> Range<usize> {
    let lo = ((center - reach - min) / step - 0.5).floor().max(0.0);
    let hi = ((center + reach - min) / step - 0.5).ceil() + 1.0;
    let hi = hi.clamp(0.0, n as f64);
    if lo >= hi {
        return 0..0;
    }
    (lo as usize)..(hi as usize)
}

impl DensityGrid {
    /// Estimates the density of `points` over `bounds`.
    ///
    /// Returns `None` if the grid is empty or no bandwidth can be derived from
    /// the points (see [`scott_bandwidth`]).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn gaussian_kde(points: &[(f64, f64)], bounds: Bounds, nx: usize, ny: usize) -> Option<Self> {
        if nx == 0 || ny == 0 {
            return None;
        }
        let (hx, hy) = scott_bandwidth(points)?;
        let dx = bounds.width() / nx as f64;
        let dy = bounds.height() / ny as f64;
        let norm = 1.0 / (points.len() as f64 * 2.0 * PI * hx * hy);

        let mut values = vec![0.0; nx * ny];
        for &(px, py) in points {
            let xs = cell_range(px, KERNEL_REACH * hx, bounds.x_min, dx, nx);
            let ys = cell_range(py, KERNEL_REACH * hy, bounds.y_min, dy, ny);
            for iy in ys {
                let cy = bounds.y_min + (iy as f64 + 0.5) * dy;
                let ky = ((cy - py) / hy).powi(2);
                for ix in xs.clone() {
                    let cx = bounds.x_min + (ix as f64 + 0.5) * dx;
                    let kx = ((cx - px) / hx).powi(2);
                    values[iy * nx + ix] += (-0.5 * (kx + ky)).exp();
                }
            }
        }
        for v in &mut values {
            *v *= norm;
        }

        Some(Self {
            bounds,
            nx,
            ny,
            bandwidth: (hx, hy),
            values,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[must_use]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[must_use]
    pub fn bandwidth(&self) -> (f64, f64) {
        self.bandwidth
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy * self.nx + ix]
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn cell_center(&self, ix: usize, iy: usize) -> (f64, f64) {
        (
            self.bounds.x_min + (ix as f64 + 0.5) * self.bounds.width() / self.nx as f64,
            self.bounds.y_min + (iy as f64 + 0.5) * self.bounds.height() / self.ny as f64,
        )
    }

    /// Density of the cell containing `(x, y)`, or `None` outside the grid.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn value_at(&self, x: f64, y: f64) -> Option<f64> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let fx = (x - self.bounds.x_min) / self.bounds.width() * self.nx as f64;
        let fy = (y - self.bounds.y_min) / self.bounds.height() * self.ny as f64;
        let ix = (fx as usize).min(self.nx - 1);
        let iy = (fy as usize).min(self.ny - 1);
        Some(self.value(ix, iy))
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Approximate integral of the density over the grid.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        let cell_area = self.bounds.width() * self.bounds.height() / (self.nx * self.ny) as f64;
        self.values.iter().sum::<f64>() * cell_area
    }

    /// Density level below which `proportion` of the gridded mass lies.
    ///
    /// `proportion` is clamped to `[0, 1]`. Returns `0.0` for a grid without
    /// mass.
    #[must_use]
    pub fn iso_proportion_level(&self, proportion: f64) -> f64 {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        let total = sorted.iter().sum::<f64>();
        if total <= 0.0 {
            return 0.0;
        }
        let target = proportion.clamp(0.0, 1.0) * total;
        let mut cumulative = 0.0;
        for &v in &sorted {
            cumulative += v;
            if cumulative >= target {
                return v;
            }
        }
        sorted.last().copied().unwrap_or(0.0)
    }
}
