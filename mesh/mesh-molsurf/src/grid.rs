//! Regular 3D grid of density samples.

// Grid indices stay far below 2^52
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use mesh_types::Aabb;
use nalgebra::Point3;
use rayon::prelude::*;

/// A 3D grid of scalar samples at the corners of cubic cells.
///
/// Values are stored with x varying fastest, then y, then z, so one
/// z-slice is a contiguous run of `nx * ny` values.
#[derive(Debug, Clone)]
pub struct ScalarGrid {
    values: Vec<f64>,
    dimensions: (usize, usize, usize),
    origin: Point3<f64>,
    spacing: f64,
}

impl ScalarGrid {
    /// Create a zero-filled grid.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_molsurf::ScalarGrid;
    /// use nalgebra::Point3;
    ///
    /// let grid = ScalarGrid::new((4, 5, 6), Point3::origin(), 0.5);
    /// assert_eq!(grid.len(), 120);
    /// assert_eq!(grid.position(2, 0, 1), Point3::new(1.0, 0.0, 0.5));
    /// ```
    #[must_use]
    pub fn new(dimensions: (usize, usize, usize), origin: Point3<f64>, spacing: f64) -> Self {
        let (nx, ny, nz) = dimensions;
        Self {
            values: vec![0.0; nx * ny * nz],
            dimensions,
            origin,
            spacing,
        }
    }

    /// Number of grid points needed to cover `bounds` grown by `margin`.
    #[must_use]
    pub fn dimensions_for(bounds: &Aabb, spacing: f64, margin: f64) -> (usize, usize, usize) {
        let size = bounds.expanded(margin).size();
        let axis = |extent: f64| (extent / spacing).ceil() as usize + 1;
        (axis(size.x), axis(size.y), axis(size.z))
    }

    /// Create a grid covering `bounds` grown by `margin` on every side.
    #[must_use]
    pub fn covering(bounds: &Aabb, spacing: f64, margin: f64) -> Self {
        let dimensions = Self::dimensions_for(bounds, spacing, margin);
        Self::new(dimensions, bounds.expanded(margin).min, spacing)
    }

    /// Grid dimensions `(nx, ny, nz)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        self.dimensions
    }

    /// Position of grid point `(0, 0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// Distance between neighbouring grid points.
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Total number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the grid has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at grid coordinates; `0.0` outside the grid.
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> f64 {
        if self.in_bounds(ix, iy, iz) {
            self.values[self.index(ix, iy, iz)]
        } else {
            0.0
        }
    }

    /// Overwrite a sample; ignored outside the grid.
    pub fn set(&mut self, ix: usize, iy: usize, iz: usize, value: f64) {
        if self.in_bounds(ix, iy, iz) {
            let idx = self.index(ix, iy, iz);
            self.values[idx] = value;
        }
    }

    /// World-space position of a grid point.
    #[must_use]
    pub fn position(&self, ix: usize, iy: usize, iz: usize) -> Point3<f64> {
        Point3::new(
            self.origin.x + ix as f64 * self.spacing,
            self.origin.y + iy as f64 * self.spacing,
            self.origin.z + iz as f64 * self.spacing,
        )
    }

    /// Linear index of a grid point.
    #[must_use]
    pub const fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + iy * self.dimensions.0 + iz * self.dimensions.0 * self.dimensions.1
    }

    /// Range of grid indices along one axis whose positions fall within
    /// `[center - radius, center + radius]`, clamped to the grid.
    #[must_use]
    pub fn axis_range(&self, axis: usize, center: f64, radius: f64) -> std::ops::Range<usize> {
        let n = match axis {
            0 => self.dimensions.0,
            1 => self.dimensions.1,
            _ => self.dimensions.2,
        };
        let lo = ((center - radius - self.origin[axis]) / self.spacing).ceil();
        let hi = ((center + radius - self.origin[axis]) / self.spacing).floor();
        let lo = lo.max(0.0) as usize;
        let hi = (hi + 1.0).clamp(0.0, n as f64) as usize;
        lo..hi.max(lo)
    }

    /// Fill every z-slice in parallel.
    ///
    /// The closure receives the slice index and the slice's `nx * ny`
    /// values, x fastest.
    pub fn par_fill_slices<F>(&mut self, fill: F)
    where
        F: Fn(usize, &mut [f64]) + Sync + Send,
    {
        let slice_len = self.dimensions.0 * self.dimensions.1;
        if slice_len == 0 {
            return;
        }
        self.values
            .par_chunks_mut(slice_len)
            .enumerate()
            .for_each(|(iz, slice)| fill(iz, slice));
    }

    /// Overwrite every sample on the outer faces of the grid.
    pub fn set_boundary(&mut self, value: f64) {
        let (nx, ny, nz) = self.dimensions;
        for iz in 0..nz {
            for iy in 0..ny {
                for ix in 0..nx {
                    let on_face = ix == 0
                        || iy == 0
                        || iz == 0
                        || ix + 1 == nx
                        || iy + 1 == ny
                        || iz + 1 == nz;
                    if on_face {
                        self.set(ix, iy, iz, value);
                    }
                }
            }
        }
    }

    /// Largest sample, or `None` for an empty grid.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    const fn in_bounds(&self, ix: usize, iy: usize, iz: usize) -> bool {
        ix < self.dimensions.0 && iy < self.dimensions.1 && iz < self.dimensions.2
    }
}
