use molesniper_dataset::Sample;
use molesniper_stats::running::RunningStats;
use rand::{Rng, seq::SliceRandom as _};
use serde::{Deserialize, Serialize};

use crate::{Adam, AdamParams, Perceptron, softmax_cross_entropy};

/// Training run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    pub epochs: usize,
    pub batch_size: usize,
    pub adam: AdamParams,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 50,
            batch_size: 256,
            adam: AdamParams::default(),
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TrainingError {
    #[display("cannot train on an empty dataset")]
    EmptyDataset,
    #[display("sample {index} has {actual} features, expected {expected}")]
    FeatureLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[display("sample {index} label {label} out of range for {output_len} outputs")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        output_len: usize,
    },
}

/// Summary of one training epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// Zero-based epoch index.
    pub epoch: usize,
    /// Mean per-sample cross-entropy over the epoch.
    pub mean_loss: f32,
    /// Fraction of samples whose arg-max logit matched the label.
    pub accuracy: f32,
}

/// Minibatch gradient-descent driver for a [`Perceptron`].
///
/// The caller owns the epoch loop (so progress can be reported as it
/// happens) and the generator behind shuffling; [`train`] wraps the loop
/// for the common case.
#[derive(Debug)]
pub struct Trainer<'a> {
    model: &'a mut Perceptron,
    samples: &'a [Sample],
    batch_size: usize,
    opt_w1: Adam,
    opt_b1: Adam,
    opt_w2: Adam,
    opt_b2: Adam,
    order: Vec<usize>,
    epochs_run: usize,
}

impl<'a> Trainer<'a> {
    /// Validates the dataset against the model shape and prepares
    /// optimizer state.
    pub fn new(
        model: &'a mut Perceptron,
        samples: &'a [Sample],
        params: &TrainingParams,
    ) -> Result<Self, TrainingError> {
        if samples.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }
        for (index, sample) in samples.iter().enumerate() {
            if sample.features.len() != model.input_len() {
                return Err(TrainingError::FeatureLengthMismatch {
                    index,
                    expected: model.input_len(),
                    actual: sample.features.len(),
                });
            }
            if sample.label >= model.output_len() {
                return Err(TrainingError::LabelOutOfRange {
                    index,
                    label: sample.label,
                    output_len: model.output_len(),
                });
            }
        }

        let opt_w1 = Adam::new(params.adam, model.w1.len());
        let opt_b1 = Adam::new(params.adam, model.b1.len());
        let opt_w2 = Adam::new(params.adam, model.w2.len());
        let opt_b2 = Adam::new(params.adam, model.b2.len());
        let order = (0..samples.len()).collect();
        Ok(Self {
            model,
            samples,
            batch_size: params.batch_size.max(1),
            opt_w1,
            opt_b1,
            opt_w2,
            opt_b2,
            order,
            epochs_run: 0,
        })
    }

    /// Runs one epoch: shuffles the sample order, then descends one Adam
    /// step per minibatch.
    #[expect(clippy::cast_precision_loss)]
    pub fn epoch<R>(&mut self, rng: &mut R) -> EpochReport
    where
        R: Rng + ?Sized,
    {
        self.order.shuffle(rng);

        let hidden_len = self.model.hidden_len();
        let output_len = self.model.output_len();
        let mut gw1 = vec![0.0; self.model.w1.len()];
        let mut gb1 = vec![0.0; hidden_len];
        let mut gw2 = vec![0.0; self.model.w2.len()];
        let mut gb2 = vec![0.0; output_len];

        let mut loss_stats = RunningStats::new();
        let mut correct = 0_usize;

        for batch in self.order.chunks(self.batch_size) {
            gw1.fill(0.0);
            gb1.fill(0.0);
            gw2.fill(0.0);
            gb2.fill(0.0);

            for &sample_index in batch {
                let sample = &self.samples[sample_index];
                let (hidden, logits) = self.model.forward_with_hidden(&sample.features);
                let (loss, dlogits) = softmax_cross_entropy(&logits, sample.label);
                loss_stats.push(loss);
                if argmax(&logits) == sample.label {
                    correct += 1;
                }

                // Output layer gradients.
                for (k, &dl) in dlogits.iter().enumerate() {
                    gb2[k] += dl;
                }
                for (j, &h) in hidden.iter().enumerate() {
                    if h == 0.0 {
                        continue;
                    }
                    let row = &mut gw2[j * output_len..(j + 1) * output_len];
                    for (g, &dl) in row.iter_mut().zip(&dlogits) {
                        *g += h * dl;
                    }
                }

                // Backpropagate through the ReLU; units clipped to zero
                // pass no gradient.
                let mut dhidden = vec![0.0; hidden_len];
                for (j, &h) in hidden.iter().enumerate() {
                    if h == 0.0 {
                        continue;
                    }
                    let row = &self.model.w2[j * output_len..(j + 1) * output_len];
                    dhidden[j] = row.iter().zip(&dlogits).map(|(&w, &dl)| w * dl).sum();
                }

                for (j, &dh) in dhidden.iter().enumerate() {
                    gb1[j] += dh;
                }
                for (i, &x) in sample.features.iter().enumerate() {
                    if x == 0.0 {
                        continue;
                    }
                    let row = &mut gw1[i * hidden_len..(i + 1) * hidden_len];
                    for (g, &dh) in row.iter_mut().zip(&dhidden) {
                        *g += x * dh;
                    }
                }
            }

            let scale = 1.0 / batch.len() as f32;
            for g in gw1
                .iter_mut()
                .chain(&mut gb1)
                .chain(&mut gw2)
                .chain(&mut gb2)
            {
                *g *= scale;
            }

            self.opt_w1.step(&mut self.model.w1, &gw1);
            self.opt_b1.step(&mut self.model.b1, &gb1);
            self.opt_w2.step(&mut self.model.w2, &gw2);
            self.opt_b2.step(&mut self.model.b2, &gb2);
        }

        let report = EpochReport {
            epoch: self.epochs_run,
            mean_loss: loss_stats.mean(),
            accuracy: correct as f32 / self.samples.len() as f32,
        };
        self.epochs_run += 1;
        report
    }
}

/// Trains `model` on `samples` for the configured number of epochs.
///
/// Returns one report per epoch, in order.
pub fn train<R>(
    model: &mut Perceptron,
    samples: &[Sample],
    params: &TrainingParams,
    rng: &mut R,
) -> Result<Vec<EpochReport>, TrainingError>
where
    R: Rng + ?Sized,
{
    let mut trainer = Trainer::new(model, samples, params)?;
    Ok((0..params.epochs).map(|_| trainer.epoch(rng)).collect())
}

/// Fraction of samples whose predicted cell matches the label.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn accuracy(model: &Perceptron, samples: &[Sample]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let correct = samples
        .iter()
        .filter(|s| model.predict(&s.features) == s.label)
        .count();
    correct as f32 / samples.len() as f32
}

fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use molesniper_field::ScatterSeed;
    use rand::Rng;

    use super::*;

    /// Linearly separable toy task: label 0 when the first feature is
    /// larger, 1 otherwise.
    fn toy_samples(count: usize, rng: &mut impl Rng) -> Vec<Sample> {
        (0..count)
            .map(|_| {
                let a: f32 = rng.random_range(0.0..1.0);
                let b: f32 = rng.random_range(0.0..1.0);
                Sample {
                    features: vec![a, b],
                    label: usize::from(a <= b),
                }
            })
            .collect()
    }

    #[test]
    fn test_rejects_empty_dataset() {
        let mut rng = ScatterSeed::from_u64(1).rng();
        let mut model = Perceptron::random(&mut rng, 2, 4, 2);
        let result = Trainer::new(&mut model, &[], &TrainingParams::default());
        assert!(matches!(result, Err(TrainingError::EmptyDataset)));
    }

    #[test]
    fn test_rejects_feature_length_mismatch() {
        let mut rng = ScatterSeed::from_u64(1).rng();
        let mut model = Perceptron::random(&mut rng, 2, 4, 2);
        let samples = vec![Sample {
            features: vec![0.0; 3],
            label: 0,
        }];
        let result = Trainer::new(&mut model, &samples, &TrainingParams::default());
        assert!(matches!(
            result,
            Err(TrainingError::FeatureLengthMismatch {
                index: 0,
                expected: 2,
                actual: 3,
            }),
        ));
    }

    #[test]
    fn test_rejects_label_out_of_range() {
        let mut rng = ScatterSeed::from_u64(1).rng();
        let mut model = Perceptron::random(&mut rng, 2, 4, 2);
        let samples = vec![Sample {
            features: vec![0.0, 0.0],
            label: 2,
        }];
        let result = Trainer::new(&mut model, &samples, &TrainingParams::default());
        assert!(matches!(
            result,
            Err(TrainingError::LabelOutOfRange { label: 2, .. }),
        ));
    }

    #[test]
    fn test_learns_separable_task() {
        let mut rng = ScatterSeed::from_u64(11).rng();
        let samples = toy_samples(300, &mut rng);
        let mut model = Perceptron::random(&mut rng, 2, 8, 2);

        let params = TrainingParams {
            epochs: 60,
            batch_size: 32,
            adam: AdamParams {
                learning_rate: 0.01,
                ..AdamParams::default()
            },
        };
        let reports = train(&mut model, &samples, &params, &mut rng).unwrap();

        assert_eq!(reports.len(), 60);
        let first = reports.first().unwrap();
        let last = reports.last().unwrap();
        assert!(
            last.mean_loss < first.mean_loss,
            "loss did not decrease: {} -> {}",
            first.mean_loss,
            last.mean_loss,
        );
        assert!(
            accuracy(&model, &samples) > 0.9,
            "accuracy {}",
            accuracy(&model, &samples),
        );
    }

    #[test]
    fn test_training_is_seed_deterministic() {
        let mut data_rng = ScatterSeed::from_u64(21).rng();
        let samples = toy_samples(64, &mut data_rng);
        let params = TrainingParams {
            epochs: 3,
            batch_size: 16,
            adam: AdamParams::default(),
        };

        let run = |seed: u64| {
            let mut rng = ScatterSeed::from_u64(seed).rng();
            let mut model = Perceptron::random(&mut rng, 2, 4, 2);
            let reports = train(&mut model, &samples, &params, &mut rng).unwrap();
            (model, reports)
        };

        let (model_a, reports_a) = run(33);
        let (model_b, reports_b) = run(33);
        assert_eq!(model_a, model_b);
        assert_eq!(reports_a, reports_b);
    }
}
