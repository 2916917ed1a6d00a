use std::f32::consts::TAU;

use molesniper_field::{DensityMap, PlayerPose};
use molesniper_targeting::TargetSelector;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Sample, feature_vector};

/// Random-draw ranges for synthesized scenes.
///
/// The `Default` values match the distribution the shipped model was
/// trained on: poses kept 2m off the stage edge, and 3-8 overlapping leaf
/// clusters of Manhattan radius 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterParams {
    /// Poses are drawn from the bounds shrunk by this margin on each side.
    pub position_margin: f32,
    /// Inclusive range for the number of leaf clusters per scene.
    pub min_clusters: usize,
    pub max_clusters: usize,
    /// Inclusive range for the Manhattan radius of one cluster, in cells.
    pub min_radius: i32,
    pub max_radius: i32,
    /// Inclusive range for the peak intensity of one cluster.
    pub min_intensity: f32,
    pub max_intensity: f32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            position_margin: 2.0,
            min_clusters: 3,
            max_clusters: 8,
            min_radius: 1,
            max_radius: 3,
            min_intensity: 0.3,
            max_intensity: 1.0,
        }
    }
}

/// Draws labeled samples by sweeping the target heuristic over random
/// scenes.
///
/// Each call to [`Self::synthesize`] is independent; batches are the same
/// draw repeated. All randomness flows through the caller's generator.
#[derive(Debug, Clone, Copy)]
pub struct SampleSynthesizer {
    selector: TargetSelector,
    params: ScatterParams,
}

impl SampleSynthesizer {
    #[must_use]
    pub const fn new(selector: TargetSelector, params: ScatterParams) -> Self {
        Self { selector, params }
    }

    #[must_use]
    pub const fn selector(&self) -> &TargetSelector {
        &self.selector
    }

    #[must_use]
    pub const fn params(&self) -> &ScatterParams {
        &self.params
    }

    /// Draws a pose uniformly inside the margin-shrunk bounds, facing a
    /// uniformly random heading.
    pub fn random_pose<R>(&self, rng: &mut R) -> PlayerPose
    where
        R: Rng + ?Sized,
    {
        let spec = self.selector.spec();
        let margin = self.params.position_margin;
        let x = rng.random_range(spec.x_min() + margin..=spec.x_max() - margin);
        let z = rng.random_range(spec.z_min() + margin..=spec.z_max() - margin);
        let heading = rng.random_range(0.0..TAU);
        PlayerPose::from_heading(x, z, heading)
    }

    /// Builds a normalized density map from randomly placed leaf clusters.
    ///
    /// Each cluster is a diamond-shaped blob: intensity falls off linearly
    /// with Manhattan distance from the center, `1 - (|dx| + |dz|) / (2r + 1)`.
    /// Clusters may overlap; contributions sum before normalization.
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    #[expect(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn scatter_density<R>(&self, rng: &mut R) -> DensityMap
    where
        R: Rng + ?Sized,
    {
        let spec = self.selector.spec();
        let mut density = DensityMap::zeros(spec);

        let cluster_count = rng.random_range(self.params.min_clusters..=self.params.max_clusters);
        for _ in 0..cluster_count {
            let center_col = rng.random_range(0..spec.cols()) as i32;
            let center_row = rng.random_range(0..spec.rows()) as i32;
            let radius = rng.random_range(self.params.min_radius..=self.params.max_radius);
            let intensity =
                rng.random_range(self.params.min_intensity..=self.params.max_intensity);

            for dz in -radius..=radius {
                for dx in -radius..=radius {
                    let col = center_col + dx;
                    let row = center_row + dz;
                    if col < 0 || col >= spec.cols() as i32 || row < 0 || row >= spec.rows() as i32
                    {
                        continue;
                    }
                    let falloff = 1.0 - (dx.abs() + dz.abs()) as f32 / (radius * 2 + 1) as f32;
                    density.accumulate(col as usize, row as usize, intensity * falloff);
                }
            }
        }

        density.normalize();
        density
    }

    /// Draws one labeled sample: random pose, random leaf scatter, and the
    /// heuristic's selected cell as the label.
    pub fn synthesize<R>(&self, rng: &mut R) -> Sample
    where
        R: Rng + ?Sized,
    {
        let pose = self.random_pose(rng);
        let density = self.scatter_density(rng);
        let selection = self.selector.select_cell(&pose, &density, rng);
        let features = feature_vector(self.selector.spec(), &density, &pose);
        Sample {
            features,
            label: selection.cell,
        }
    }

    /// Draws `count` independent samples.
    pub fn synthesize_batch<R>(&self, rng: &mut R, count: usize) -> Vec<Sample>
    where
        R: Rng + ?Sized,
    {
        (0..count).map(|_| self.synthesize(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use molesniper_field::{GridSpec, ScatterSeed};
    use molesniper_targeting::TargetingParams;

    use super::*;

    fn stage5_synthesizer() -> SampleSynthesizer {
        SampleSynthesizer::new(
            TargetSelector::new(GridSpec::stage5(), TargetingParams::default()),
            ScatterParams::default(),
        )
    }

    #[test]
    fn test_pose_respects_margin() {
        let synthesizer = stage5_synthesizer();
        let mut rng = ScatterSeed::from_u64(1).rng();
        for _ in 0..200 {
            let pose = synthesizer.random_pose(&mut rng);
            assert!((107.0..=133.0).contains(&pose.x));
            assert!((-10.0..=10.0).contains(&pose.z));
            let norm = (pose.fx * pose.fx + pose.fz * pose.fz).sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_density_normalized_with_unit_peak() {
        let synthesizer = stage5_synthesizer();
        let mut rng = ScatterSeed::from_u64(2).rng();
        for _ in 0..50 {
            let density = synthesizer.scatter_density(&mut rng);
            assert!(density.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
            // At least one cluster is always added, so the peak is exact.
            assert!((density.max_value() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_samples_are_well_formed() {
        let synthesizer = stage5_synthesizer();
        let spec = GridSpec::stage5();
        let mut rng = ScatterSeed::from_u64(3).rng();
        for sample in synthesizer.synthesize_batch(&mut rng, 100) {
            assert_eq!(sample.features.len(), Sample::feature_len(&spec));
            assert!(sample.label < spec.cell_count());
        }
    }

    #[test]
    fn test_same_seed_replays_stream() {
        let synthesizer = stage5_synthesizer();
        let mut rng1 = ScatterSeed::from_u64(42).rng();
        let mut rng2 = ScatterSeed::from_u64(42).rng();
        let batch1 = synthesizer.synthesize_batch(&mut rng1, 25);
        let batch2 = synthesizer.synthesize_batch(&mut rng2, 25);
        assert_eq!(batch1, batch2);
    }
}
