use serde::{Deserialize, Serialize};

/// Adam optimizer hyperparameters.
///
/// The `Default` values are the standard Adam settings and the ones the
/// shipped model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdamParams {
    pub learning_rate: f32,
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
}

impl Default for AdamParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
        }
    }
}

/// Adam state for one parameter tensor.
///
/// Keeps the first and second moment estimates and the step counter for a
/// single weight or bias buffer; the trainer holds one per tensor.
#[derive(Debug, Clone)]
pub struct Adam {
    params: AdamParams,
    step: i32,
    m: Vec<f32>,
    v: Vec<f32>,
}

impl Adam {
    #[must_use]
    pub fn new(params: AdamParams, len: usize) -> Self {
        Self {
            params,
            step: 0,
            m: vec![0.0; len],
            v: vec![0.0; len],
        }
    }

    /// Applies one update to `weights` from `grads`.
    ///
    /// # Panics
    ///
    /// Panics if the slice lengths disagree with the state length.
    pub fn step(&mut self, weights: &mut [f32], grads: &[f32]) {
        assert_eq!(weights.len(), self.m.len());
        assert_eq!(grads.len(), self.m.len());

        let AdamParams {
            learning_rate,
            beta1,
            beta2,
            epsilon,
        } = self.params;

        self.step += 1;
        let bias1 = 1.0 - beta1.powi(self.step);
        let bias2 = 1.0 - beta2.powi(self.step);

        for i in 0..weights.len() {
            let g = grads[i];
            self.m[i] = beta1 * self.m[i] + (1.0 - beta1) * g;
            self.v[i] = beta2 * self.v[i] + (1.0 - beta2) * g * g;
            let m_hat = self.m[i] / bias1;
            let v_hat = self.v[i] / bias2;
            weights[i] -= learning_rate * m_hat / (v_hat.sqrt() + epsilon);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_against_gradient() {
        let mut adam = Adam::new(AdamParams::default(), 2);
        let mut weights = vec![1.0, -1.0];
        adam.step(&mut weights, &[0.5, -0.5]);
        assert!(weights[0] < 1.0);
        assert!(weights[1] > -1.0);
    }

    #[test]
    fn test_first_step_size_is_learning_rate() {
        // With bias correction, the first Adam step has magnitude close to
        // the learning rate regardless of gradient scale.
        let params = AdamParams {
            learning_rate: 0.1,
            ..AdamParams::default()
        };
        let mut adam = Adam::new(params, 1);
        let mut weights = vec![0.0];
        adam.step(&mut weights, &[1000.0]);
        assert!((weights[0] + 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_zero_gradient_leaves_weights_unchanged() {
        let mut adam = Adam::new(AdamParams::default(), 3);
        let mut weights = vec![0.3, -0.7, 2.0];
        adam.step(&mut weights, &[0.0, 0.0, 0.0]);
        assert_eq!(weights, vec![0.3, -0.7, 2.0]);
    }

    #[test]
    fn test_repeated_steps_descend_quadratic() {
        // Minimize f(w) = w^2 from w = 2; gradient is 2w.
        let params = AdamParams {
            learning_rate: 0.05,
            ..AdamParams::default()
        };
        let mut adam = Adam::new(params, 1);
        let mut weights = vec![2.0];
        for _ in 0..500 {
            let grads = [2.0 * weights[0]];
            adam.step(&mut weights, &grads);
        }
        assert!(weights[0].abs() < 0.1, "w = {}", weights[0]);
    }
}
