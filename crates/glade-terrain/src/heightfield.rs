//! Heightfield storage and altitude sampling

use std::fmt;
use std::path::Path;

use glade_core::{GladeError, Result};

/// An altitude query resolved to a grid cell outside the heightfield.
///
/// This is not a failure of the query itself: callers are expected to
/// substitute a fallback altitude (see [`Heightfield::altitude_or`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfRange {
    pub x: f64,
    pub z: f64,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "altitude query ({}, {}) is outside the heightfield", self.x, self.z)
    }
}

impl std::error::Error for OutOfRange {}

/// A width × depth grid of altitude samples.
///
/// Cell `(x, z)` is stored at index `x + z * width`, the same order used by
/// level files.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    /// Row-major altitudes
    heights: Vec<f64>,
    /// Number of samples along X
    width: usize,
    /// Number of samples along Z
    depth: usize,
}

impl Heightfield {
    /// Create a flat heightfield at altitude zero
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            heights: vec![0.0; width * depth],
            width,
            depth,
        }
    }

    /// Create a heightfield from row-major data (`x + z * width`)
    pub fn from_raw(heights: Vec<f64>, width: usize, depth: usize) -> Result<Self> {
        let cells = width.checked_mul(depth).ok_or_else(|| {
            GladeError::ValidationError(format!("heightfield {width}x{depth} is too large"))
        })?;
        if heights.len() != cells {
            return Err(GladeError::ValidationError(format!(
                "heightfield {}x{} needs {} samples, got {}",
                width,
                depth,
                cells,
                heights.len()
            )));
        }
        Ok(Self {
            heights,
            width,
            depth,
        })
    }

    /// Load a heightfield from a grayscale image.
    /// Pixel values are normalized to [0..1] regardless of bit depth, then
    /// multiplied by `height_scale`.
    pub fn from_png(path: &Path, height_scale: f64) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            GladeError::ImageError(format!(
                "Failed to load heightmap '{}': {}",
                path.display(),
                e
            ))
        })?;

        let gray = img.into_luma16();
        let width = gray.width() as usize;
        let depth = gray.height() as usize;

        let heights: Vec<f64> = gray
            .pixels()
            .map(|p| p.0[0] as f64 / 65535.0 * height_scale)
            .collect();

        tracing::info!(width, depth, "loaded heightmap from {}", path.display());
        Self::from_raw(heights, width, depth)
    }

    /// Grid size as (width, depth)
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    /// Row-major altitudes (`x + z * width`)
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Whether the integer grid coordinate lies on the grid
    pub fn contains(&self, x: i64, z: i64) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.depth
    }

    /// Stored altitude of a grid cell. Panics if the cell is off the grid.
    pub fn grid_altitude(&self, x: usize, z: usize) -> f64 {
        self.heights[self.index(x, z)]
    }

    /// Overwrite the altitude of a grid cell. Panics if the cell is off the grid.
    pub fn set_grid_altitude(&mut self, x: usize, z: usize, h: f64) {
        let i = self.index(x, z);
        self.heights[i] = h;
    }

    /// Altitude at an arbitrary ground point.
    ///
    /// Integral coordinates return the stored cell. Otherwise the cells at
    /// `(floor(x), floor(z))` and `(floor(x), ceil(z))` are blended by the
    /// fractional part of `x`; the fractional part of `z` only selects the
    /// second cell. Levels authored against this sampling depend on it, so
    /// it is not a bilinear filter.
    pub fn altitude(&self, x: f64, z: f64) -> std::result::Result<f64, OutOfRange> {
        let out = OutOfRange { x, z };
        if !x.is_finite() || !z.is_finite() {
            return Err(out);
        }

        if x.fract() == 0.0 && z.fract() == 0.0 {
            return self.cell(x, z).ok_or(out);
        }

        let x0 = x.floor();
        let y0 = self.cell(x0, z.floor()).ok_or(out)?;
        let y1 = self.cell(x0, z.ceil()).ok_or(out)?;
        Ok(y0 + (y1 - y0) * (x - x0))
    }

    /// Altitude at a ground point, or `fallback` when the point is off the grid
    pub fn altitude_or(&self, x: f64, z: f64, fallback: f64) -> f64 {
        self.altitude(x, z).unwrap_or(fallback)
    }

    /// Resize the grid, keeping the overlapping region and zero-filling the rest
    pub fn resize(&mut self, width: usize, depth: usize) {
        let mut heights = vec![0.0; width * depth];
        for z in 0..depth.min(self.depth) {
            for x in 0..width.min(self.width) {
                heights[x + z * width] = self.heights[self.index(x, z)];
            }
        }
        self.heights = heights;
        self.width = width;
        self.depth = depth;
    }

    /// Lowest and highest stored altitude. `None` for an empty grid.
    pub fn altitude_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.heights.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), h| (lo.min(h), hi.max(h))))
    }

    fn cell(&self, x: f64, z: f64) -> Option<f64> {
        let (xi, zi) = (x as i64, z as i64);
        if self.contains(xi, zi) {
            Some(self.heights[self.index(xi as usize, zi as usize)])
        } else {
            None
        }
    }

    fn index(&self, x: usize, z: usize) -> usize {
        assert!(
            x < self.width && z < self.depth,
            "grid cell ({x}, {z}) outside {}x{} heightfield",
            self.width,
            self.depth
        );
        x + z * self.width
    }
}
