use molesniper_field::{DensityMap, GridSpec, PlayerPose};
use serde::{Deserialize, Serialize};

/// One labeled training example.
///
/// `features` is the flattened density map followed by
/// `[u, v, fx, fz]` — the normalized player position and the facing
/// direction. `label` is the flattened index of the cell the heuristic
/// selected. Feature layout and label space share the grid's row-major
/// convention; see [`GridSpec::cell_index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f32>,
    pub label: usize,
}

impl Sample {
    /// Feature vector length for a grid: one density value per cell plus
    /// the four pose values.
    #[must_use]
    pub const fn feature_len(spec: &GridSpec) -> usize {
        spec.cell_count() + 4
    }
}

/// Assembles the model input vector for a pose over a density map.
///
/// The density map must be shaped for `spec` and already normalized. The
/// normalized player position is intentionally not clamped to \[0, 1\].
#[must_use]
pub fn feature_vector(spec: &GridSpec, density: &DensityMap, pose: &PlayerPose) -> Vec<f32> {
    let mut features = Vec::with_capacity(Sample::feature_len(spec));
    features.extend_from_slice(density.values());
    let (u, v) = spec.world_to_normalized(pose.x, pose.z);
    features.extend_from_slice(&[u, v, pose.fx, pose.fz]);
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_layout() {
        let spec = GridSpec::stage5();
        let mut density = DensityMap::zeros(&spec);
        density.accumulate(3, 2, 1.0);
        density.normalize();
        let pose = PlayerPose::new(120.0, 0.0, 1.0, 0.0);

        let features = feature_vector(&spec, &density, &pose);
        assert_eq!(features.len(), Sample::feature_len(&spec));
        assert_eq!(features.len(), 324);

        // Density occupies the first cell_count entries, in row-major order.
        assert_eq!(features[spec.cell_index(3, 2)], 1.0);

        // Tail is [u, v, fx, fz].
        let (u, v) = spec.world_to_normalized(pose.x, pose.z);
        assert_eq!(&features[spec.cell_count()..], &[u, v, 1.0, 0.0]);
    }

    #[test]
    fn test_sample_serde_roundtrip() {
        let sample = Sample {
            features: vec![0.0, 0.5, 1.0],
            label: 17,
        };
        let json = serde_json::to_string(&sample).unwrap();
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(sample, back);
    }
}
