use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

/// Two-layer perceptron: `output = W2 * relu(W1 * input + b1) + b2`.
///
/// Weight matrices are stored row-major by input:
/// `w1[i * hidden_len + j]` connects input `i` to hidden unit `j`, and
/// `w2[j * output_len + k]` connects hidden unit `j` to output `k`. This is
/// the same `[in, out]` layout the exported computation graph uses for its
/// `MatMul` initializers, so export is a plain copy of these buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perceptron {
    input_len: usize,
    hidden_len: usize,
    output_len: usize,
    pub(crate) w1: Vec<f32>,
    pub(crate) b1: Vec<f32>,
    pub(crate) w2: Vec<f32>,
    pub(crate) b2: Vec<f32>,
}

impl Perceptron {
    /// Creates a perceptron from explicit weights.
    ///
    /// # Panics
    ///
    /// Panics if any buffer length disagrees with the layer sizes.
    #[must_use]
    pub fn from_weights(
        input_len: usize,
        hidden_len: usize,
        output_len: usize,
        w1: Vec<f32>,
        b1: Vec<f32>,
        w2: Vec<f32>,
        b2: Vec<f32>,
    ) -> Self {
        assert_eq!(w1.len(), input_len * hidden_len);
        assert_eq!(b1.len(), hidden_len);
        assert_eq!(w2.len(), hidden_len * output_len);
        assert_eq!(b2.len(), output_len);
        Self {
            input_len,
            hidden_len,
            output_len,
            w1,
            b1,
            w2,
            b2,
        }
    }

    /// Creates a perceptron with He-initialized weights and zero biases.
    pub fn random<R>(rng: &mut R, input_len: usize, hidden_len: usize, output_len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let w1 = he_normal(rng, input_len, input_len * hidden_len);
        let w2 = he_normal(rng, hidden_len, hidden_len * output_len);
        Self::from_weights(
            input_len,
            hidden_len,
            output_len,
            w1,
            vec![0.0; hidden_len],
            w2,
            vec![0.0; output_len],
        )
    }

    #[must_use]
    pub const fn input_len(&self) -> usize {
        self.input_len
    }

    #[must_use]
    pub const fn hidden_len(&self) -> usize {
        self.hidden_len
    }

    #[must_use]
    pub const fn output_len(&self) -> usize {
        self.output_len
    }

    #[must_use]
    pub fn w1(&self) -> &[f32] {
        &self.w1
    }

    #[must_use]
    pub fn b1(&self) -> &[f32] {
        &self.b1
    }

    #[must_use]
    pub fn w2(&self) -> &[f32] {
        &self.w2
    }

    #[must_use]
    pub fn b2(&self) -> &[f32] {
        &self.b2
    }

    /// Computes per-cell logits for a feature vector.
    ///
    /// # Panics
    ///
    /// Panics if `features` does not have `input_len` elements.
    #[must_use]
    pub fn forward(&self, features: &[f32]) -> Vec<f32> {
        self.forward_with_hidden(features).1
    }

    /// Like [`Self::forward`], also returning the post-ReLU hidden layer
    /// (needed for backpropagation).
    pub(crate) fn forward_with_hidden(&self, features: &[f32]) -> (Vec<f32>, Vec<f32>) {
        assert_eq!(features.len(), self.input_len);

        let mut hidden = self.b1.clone();
        for (i, &x) in features.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            let row = &self.w1[i * self.hidden_len..(i + 1) * self.hidden_len];
            for (h, &w) in hidden.iter_mut().zip(row) {
                *h += x * w;
            }
        }
        for h in &mut hidden {
            *h = h.max(0.0);
        }

        let mut logits = self.b2.clone();
        for (j, &h) in hidden.iter().enumerate() {
            if h == 0.0 {
                continue;
            }
            let row = &self.w2[j * self.output_len..(j + 1) * self.output_len];
            for (out, &w) in logits.iter_mut().zip(row) {
                *out += h * w;
            }
        }

        (hidden, logits)
    }

    /// The index of the highest logit; ties keep the lowest index.
    ///
    /// # Panics
    ///
    /// Panics if `features` does not have `input_len` elements.
    #[must_use]
    pub fn predict(&self, features: &[f32]) -> usize {
        let logits = self.forward(features);
        let mut best = 0;
        for (i, &logit) in logits.iter().enumerate().skip(1) {
            if logit > logits[best] {
                best = i;
            }
        }
        best
    }
}

/// He-scaled normal draws: `N(0, sqrt(2 / fan_in))`.
fn he_normal<R>(rng: &mut R, fan_in: usize, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    #[expect(clippy::cast_precision_loss)]
    let std_dev = (2.0 / fan_in as f32).sqrt();
    let normal = Normal::new(0.0, std_dev).unwrap();
    (0..len).map(|_| rng.sample(normal)).collect()
}

#[cfg(test)]
mod tests {
    use molesniper_field::ScatterSeed;

    use super::*;

    #[test]
    fn test_forward_matches_hand_computation() {
        // 2 -> 2 -> 2 network with weights chosen so one hidden unit is
        // pushed negative and clipped by the ReLU.
        let model = Perceptron::from_weights(
            2,
            2,
            2,
            vec![
                1.0, -1.0, // input 0 -> hidden 0, 1
                0.5, 2.0, // input 1 -> hidden 0, 1
            ],
            vec![0.0, -3.0],
            vec![
                1.0, 2.0, // hidden 0 -> output 0, 1
                -1.0, 1.0, // hidden 1 -> output 0, 1
            ],
            vec![0.1, -0.1],
        );

        // hidden pre-activation: [1*1 + 2*0.5, 1*-1 + 2*2 - 3] = [2, 0]
        // hidden after relu:     [2, 0]
        // logits: [0.1 + 2*1, -0.1 + 2*2] = [2.1, 3.9]
        let logits = model.forward(&[1.0, 2.0]);
        assert!((logits[0] - 2.1).abs() < 1e-6);
        assert!((logits[1] - 3.9).abs() < 1e-6);
        assert_eq!(model.predict(&[1.0, 2.0]), 1);
    }

    #[test]
    fn test_predict_tie_keeps_lowest_index() {
        let model = Perceptron::from_weights(
            1,
            1,
            3,
            vec![0.0],
            vec![0.0],
            vec![0.0, 0.0, 0.0],
            vec![0.5, 0.5, 0.2],
        );
        assert_eq!(model.predict(&[1.0]), 0);
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let mut rng1 = ScatterSeed::from_u64(5).rng();
        let mut rng2 = ScatterSeed::from_u64(5).rng();
        let a = Perceptron::random(&mut rng1, 6, 4, 3);
        let b = Perceptron::random(&mut rng2, 6, 4, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut rng = ScatterSeed::from_u64(5).rng();
        let model = Perceptron::random(&mut rng, 3, 2, 4);
        let json = serde_json::to_string(&model).unwrap();
        let back: Perceptron = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
    }
}
