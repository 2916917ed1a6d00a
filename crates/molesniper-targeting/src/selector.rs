use molesniper_field::{DensityMap, GridSpec, PlayerPose};
use rand::{Rng, seq::IndexedRandom as _};

use crate::TargetingParams;

/// Which path produced a selected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTier {
    /// The arg-max over valid cells; the normal case.
    BestScore,
    /// No cell scored; a uniform draw among geometrically valid cells.
    RandomValid,
    /// Nothing was valid at all; a uniform draw over the whole grid. The
    /// result can violate the distance and cone constraints.
    RandomCell,
}

/// A selected target cell and the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub cell: usize,
    pub tier: SelectionTier,
}

/// Scores grid cells against a player pose and picks the best target.
#[derive(Debug, Clone, Copy)]
pub struct TargetSelector {
    spec: GridSpec,
    params: TargetingParams,
}

impl TargetSelector {
    #[must_use]
    pub const fn new(spec: GridSpec, params: TargetingParams) -> Self {
        Self { spec, params }
    }

    #[must_use]
    pub const fn spec(&self) -> &GridSpec {
        &self.spec
    }

    #[must_use]
    pub const fn params(&self) -> &TargetingParams {
        &self.params
    }

    /// Tests whether the cell at world position `(cell_x, cell_z)` is a
    /// geometrically admissible target for `pose`.
    ///
    /// A cell passes when its distance lies in the closed band
    /// `[min_distance, max_distance]` and the direction to it falls within
    /// the forward cone. Distances below `direction_epsilon` have no
    /// defined direction and always fail.
    #[must_use]
    pub fn is_valid_target(&self, pose: &PlayerPose, cell_x: f32, cell_z: f32) -> bool {
        let dx = cell_x - pose.x;
        let dz = cell_z - pose.z;
        let dist = (dx * dx + dz * dz).sqrt();

        if dist < self.params.min_distance || dist > self.params.max_distance {
            return false;
        }
        if dist < self.params.direction_epsilon {
            return false;
        }

        let dot = (dx / dist) * pose.fx + (dz / dist) * pose.fz;
        // Clamp before acos: the dot of two unit vectors can overshoot
        // [-1, 1] by a few ulps.
        let angle_deg = dot.clamp(-1.0, 1.0).acos().to_degrees();
        angle_deg <= self.params.cone_half_angle_deg
    }

    /// Heuristic desirability of the cell as an interception point.
    ///
    /// `alignment * distance_score`, clamped to be non-negative, where
    /// alignment is the cosine between the facing direction and the
    /// direction to the cell, and the distance score is a triangular
    /// preference peaking at `preferred_distance` and reaching zero
    /// `falloff_radius` away from it. Cells behind the player and cells far
    /// from the preferred distance score exactly zero.
    #[must_use]
    pub fn intercept_score(&self, pose: &PlayerPose, cell_x: f32, cell_z: f32) -> f32 {
        let dx = cell_x - pose.x;
        let dz = cell_z - pose.z;
        let dist = (dx * dx + dz * dz).sqrt();
        if dist < self.params.direction_epsilon {
            return 0.0;
        }

        let alignment = (dx / dist) * pose.fx + (dz / dist) * pose.fz;
        let distance_score =
            1.0 - (dist - self.params.preferred_distance).abs() / self.params.falloff_radius;
        (alignment * distance_score).max(0.0)
    }

    /// Full score of a cell: intercept score plus the weighted density
    /// bonus. Density is a minor tie-breaker, not a primary objective.
    #[must_use]
    pub fn cell_score(
        &self,
        pose: &PlayerPose,
        density: &DensityMap,
        col: usize,
        row: usize,
    ) -> f32 {
        let (cell_x, cell_z) = self.spec.cell_to_world(col, row);
        self.intercept_score(pose, cell_x, cell_z)
            + density.value(col, row) * self.params.density_weight
    }

    /// Picks the target cell for `pose` given the current leaf coverage.
    ///
    /// Sweeps every cell in row-major order and keeps the strictly highest
    /// score, so ties resolve to the lowest row-major index. When no cell
    /// is valid, falls back to a uniform draw among valid cells, then to a
    /// uniform draw over the entire grid; the returned [`SelectionTier`]
    /// records which path was taken. This never fails.
    pub fn select_cell<R>(&self, pose: &PlayerPose, density: &DensityMap, rng: &mut R) -> Selection
    where
        R: Rng + ?Sized,
    {
        let mut best: Option<(usize, f32)> = None;
        for (index, col, row) in self.spec.iter_cells() {
            let (cell_x, cell_z) = self.spec.cell_to_world(col, row);
            if !self.is_valid_target(pose, cell_x, cell_z) {
                continue;
            }
            let score = self.cell_score(pose, density, col, row);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        if let Some((cell, _)) = best {
            return Selection {
                cell,
                tier: SelectionTier::BestScore,
            };
        }

        let valid: Vec<usize> = self
            .spec
            .iter_cells()
            .filter(|&(_, col, row)| {
                let (cell_x, cell_z) = self.spec.cell_to_world(col, row);
                self.is_valid_target(pose, cell_x, cell_z)
            })
            .map(|(index, _, _)| index)
            .collect();

        if let Some(&cell) = valid.choose(rng) {
            return Selection {
                cell,
                tier: SelectionTier::RandomValid,
            };
        }

        Selection {
            cell: rng.random_range(0..self.spec.cell_count()),
            tier: SelectionTier::RandomCell,
        }
    }
}
