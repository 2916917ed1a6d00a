use serde::{Deserialize, Serialize};

use crate::GridSpec;

/// Per-cell leaf coverage over a grid, in \[0.0, 1.0\] after normalization.
///
/// Values are stored in row-major cell order (see [`GridSpec::cell_index`])
/// and are exactly the density portion of a feature vector. A map is built
/// by accumulating non-negative contributions ([`Self::accumulate`]) and
/// then scaling so the maximum cell is 1.0 ([`Self::normalize`]); an
/// all-zero map stays all-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityMap {
    cols: usize,
    rows: usize,
    values: Vec<f32>,
}

impl DensityMap {
    /// Creates an all-zero density map shaped for `spec`.
    #[must_use]
    pub fn zeros(spec: &GridSpec) -> Self {
        Self {
            cols: spec.cols(),
            rows: spec.rows(),
            values: vec![0.0; spec.cell_count()],
        }
    }

    /// Builds a normalized map by binning world-space leaf positions into
    /// cells. Points outside the grid bounds are skipped.
    pub fn from_world_points<I>(spec: &GridSpec, points: I) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let mut map = Self::zeros(spec);
        for (x, z) in points {
            if let Some((col, row)) = spec.world_to_cell(x, z) {
                map.accumulate(col, row, 1.0);
            }
        }
        map.normalize();
        map
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Flat row-major cell values.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[must_use]
    pub fn value(&self, col: usize, row: usize) -> f32 {
        self.values[row * self.cols + col]
    }

    /// Adds `amount` to the cell, saturating nothing; call
    /// [`Self::normalize`] once accumulation is complete.
    pub fn accumulate(&mut self, col: usize, row: usize, amount: f32) {
        self.values[row * self.cols + col] += amount;
    }

    /// The maximum cell value.
    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }

    /// Scales all cells so the maximum is exactly 1.0.
    ///
    /// An all-zero map is left unchanged.
    pub fn normalize(&mut self) {
        let max = self.max_value();
        if max > 0.0 {
            for v in &mut self.values {
                *v /= max;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_shape() {
        let spec = GridSpec::stage5();
        let map = DensityMap::zeros(&spec);
        assert_eq!(map.values().len(), spec.cell_count());
        assert!(map.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_normalize_scales_max_to_one() {
        let spec = GridSpec::new(4, 4, 1.0, 0.0, 0.0);
        let mut map = DensityMap::zeros(&spec);
        map.accumulate(0, 0, 0.5);
        map.accumulate(2, 1, 2.0);
        map.accumulate(3, 3, 1.0);
        map.normalize();

        assert!((map.max_value() - 1.0).abs() < 1e-6);
        assert!((map.value(2, 1) - 1.0).abs() < 1e-6);
        assert!((map.value(0, 0) - 0.25).abs() < 1e-6);
        assert!(map.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_normalize_leaves_empty_map_untouched() {
        let spec = GridSpec::new(4, 4, 1.0, 0.0, 0.0);
        let mut map = DensityMap::zeros(&spec);
        map.normalize();
        assert!(map.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_world_points_bins_and_normalizes() {
        let spec = GridSpec::new(2, 2, 1.0, 0.0, 0.0);
        // Two leaves in cell (0, 0), one in cell (1, 1), one outside.
        let points = [(0.2, 0.3), (0.7, 0.6), (1.5, 1.5), (5.0, 5.0)];
        let map = DensityMap::from_world_points(&spec, points);

        assert!((map.value(0, 0) - 1.0).abs() < 1e-6);
        assert!((map.value(1, 1) - 0.5).abs() < 1e-6);
        assert_eq!(map.value(1, 0), 0.0);
        assert_eq!(map.value(0, 1), 0.0);
    }
}
