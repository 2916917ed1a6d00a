use serde::{Deserialize, Serialize};

/// Tunable constraints and scoring weights for target selection.
///
/// The `Default` values are the shipped stage-5 tuning; tests construct
/// narrower configurations to probe edge behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetingParams {
    /// Closest allowed throw distance in world units.
    pub min_distance: f32,
    /// Farthest allowed throw distance in world units.
    pub max_distance: f32,
    /// Half-angle of the forward-facing cone, in degrees.
    pub cone_half_angle_deg: f32,
    /// Distances below this have no defined direction; such cells are
    /// invalid and score zero.
    pub direction_epsilon: f32,
    /// Distance at which the intercept score peaks.
    pub preferred_distance: f32,
    /// Half-width of the triangular distance preference; beyond it the
    /// distance term goes negative and the score clamps to zero.
    pub falloff_radius: f32,
    /// Weight of the leaf-density bonus added to the intercept score.
    pub density_weight: f32,
}

impl Default for TargetingParams {
    fn default() -> Self {
        Self {
            min_distance: 4.0,
            max_distance: 9.0,
            cone_half_angle_deg: 55.0,
            direction_epsilon: 0.01,
            preferred_distance: 6.5,
            falloff_radius: 2.5,
            density_weight: 0.2,
        }
    }
}
