use serde::{Deserialize, Serialize};

/// Fixed 2D target lattice over an axis-aligned rectangle of the stage.
///
/// The grid is `cols x rows` square cells of `cell_size` world units,
/// anchored at `(x_min, z_min)`. The world bounds are derived from the cell
/// geometry (`x_max = x_min + cols * cell_size`, likewise for z), so the
/// grid always tiles its bounds exactly.
///
/// Cell `(col, row)` flattens to index `row * cols + col` (row-major,
/// zero-based). The flattened index is the label space of the trained model
/// and the layout of the density portion of the feature vector; this type
/// owns that convention.
///
/// Inverted or degenerate configurations (zero dims, non-positive cell
/// size) are caller preconditions and are not validated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    cols: usize,
    rows: usize,
    cell_size: f32,
    x_min: f32,
    z_min: f32,
}

impl GridSpec {
    /// Creates a grid spec anchored at `(x_min, z_min)`.
    #[must_use]
    pub const fn new(cols: usize, rows: usize, cell_size: f32, x_min: f32, z_min: f32) -> Self {
        Self {
            cols,
            rows,
            cell_size,
            x_min,
            z_min,
        }
    }

    /// The stage-5 back yard: 20x16 cells of 1.5m covering
    /// X:\[105, 135\] x Z:\[-12, 12\].
    #[must_use]
    pub const fn stage5() -> Self {
        Self::new(20, 16, 1.5, 105.0, -12.0)
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total number of cells (`cols * rows`).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    #[must_use]
    pub const fn x_min(&self) -> f32 {
        self.x_min
    }

    #[must_use]
    pub const fn z_min(&self) -> f32 {
        self.z_min
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn x_max(&self) -> f32 {
        self.x_min + self.cols as f32 * self.cell_size
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn z_max(&self) -> f32 {
        self.z_min + self.rows as f32 * self.cell_size
    }

    /// Flattens `(col, row)` to a row-major cell index.
    ///
    /// Indices are assumed in range; this is checked only in debug builds.
    #[must_use]
    pub fn cell_index(&self, col: usize, row: usize) -> usize {
        debug_assert!(col < self.cols && row < self.rows);
        row * self.cols + col
    }

    /// Inverse of [`Self::cell_index`].
    #[must_use]
    pub fn index_to_cell(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.cell_count());
        (index % self.cols, index / self.cols)
    }

    /// World coordinate of the center of cell `(col, row)`.
    ///
    /// Indices are assumed in range by the caller; out-of-range indices
    /// produce points outside the bounds rather than an error.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn cell_to_world(&self, col: usize, row: usize) -> (f32, f32) {
        let x = self.x_min + (col as f32 + 0.5) * self.cell_size;
        let z = self.z_min + (row as f32 + 0.5) * self.cell_size;
        (x, z)
    }

    /// Affine map of a world point into \[0, 1\] relative to the bounds.
    ///
    /// Points outside the bounds map outside \[0, 1\]. The result is
    /// intentionally not clamped: how far outside the bounds a point lies
    /// is information the feature vector preserves.
    #[must_use]
    pub fn world_to_normalized(&self, x: f32, z: f32) -> (f32, f32) {
        let u = (x - self.x_min) / (self.x_max() - self.x_min);
        let v = (z - self.z_min) / (self.z_max() - self.z_min);
        (u, v)
    }

    /// Quantizes a world point to the cell containing it.
    ///
    /// Returns `None` for points outside the bounds.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn world_to_cell(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        if x < self.x_min || x > self.x_max() || z < self.z_min || z > self.z_max() {
            return None;
        }
        let col = (((x - self.x_min) / self.cell_size) as usize).min(self.cols - 1);
        let row = (((z - self.z_min) / self.cell_size) as usize).min(self.rows - 1);
        Some((col, row))
    }

    /// Iterates over all cells in row-major order as `(index, col, row)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| (self.cell_index(col, row), col, row))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage5_bounds() {
        let spec = GridSpec::stage5();
        assert_eq!(spec.cell_count(), 320);
        assert!((spec.x_max() - 135.0).abs() < 1e-5);
        assert!((spec.z_max() - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_flatten_roundtrip() {
        let spec = GridSpec::stage5();
        for (index, col, row) in spec.iter_cells() {
            assert_eq!(spec.cell_index(col, row), index);
            assert_eq!(spec.index_to_cell(index), (col, row));
        }
    }

    #[test]
    fn test_iter_cells_is_row_major() {
        let spec = GridSpec::new(3, 2, 1.0, 0.0, 0.0);
        let cells: Vec<_> = spec.iter_cells().collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, 0),
                (1, 1, 0),
                (2, 2, 0),
                (3, 0, 1),
                (4, 1, 1),
                (5, 2, 1),
            ],
        );
    }

    #[test]
    fn test_cell_center_normalizes_into_cell_footprint() {
        // world_to_normalized(cell_to_world(..)) must land within half a
        // cell of the cell's normalized center, for every cell.
        let spec = GridSpec::stage5();
        #[expect(clippy::cast_precision_loss)]
        for (_, col, row) in spec.iter_cells() {
            let (x, z) = spec.cell_to_world(col, row);
            let (u, v) = spec.world_to_normalized(x, z);
            let center_u = (col as f32 + 0.5) / spec.cols() as f32;
            let center_v = (row as f32 + 0.5) / spec.rows() as f32;
            let half_cell_u = 0.5 / spec.cols() as f32;
            let half_cell_v = 0.5 / spec.rows() as f32;
            assert!((u - center_u).abs() <= half_cell_u, "({col}, {row}): u={u}");
            assert!((v - center_v).abs() <= half_cell_v, "({col}, {row}): v={v}");
        }
    }

    #[test]
    fn test_world_to_cell_inverts_cell_to_world() {
        let spec = GridSpec::stage5();
        for (_, col, row) in spec.iter_cells() {
            let (x, z) = spec.cell_to_world(col, row);
            assert_eq!(spec.world_to_cell(x, z), Some((col, row)));
        }
    }

    #[test]
    fn test_world_to_cell_rejects_out_of_bounds() {
        let spec = GridSpec::stage5();
        assert_eq!(spec.world_to_cell(104.9, 0.0), None);
        assert_eq!(spec.world_to_cell(135.1, 0.0), None);
        assert_eq!(spec.world_to_cell(120.0, -12.1), None);
        assert_eq!(spec.world_to_cell(120.0, 12.1), None);
    }

    #[test]
    fn test_normalized_is_not_clamped() {
        let spec = GridSpec::stage5();
        let (u, _) = spec.world_to_normalized(105.0 - 3.0, 0.0);
        assert!(u < 0.0);
        let (_, v) = spec.world_to_normalized(120.0, 12.0 + 6.0);
        assert!(v > 1.0);
    }
}
