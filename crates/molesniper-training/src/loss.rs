/// Softmax cross-entropy loss and its gradient with respect to the logits.
///
/// Returns `(loss, dloss/dlogits)` where the gradient is
/// `softmax(logits) - onehot(label)`. The softmax is computed with the
/// usual max-shift so large logits cannot overflow `exp`.
///
/// # Panics
///
/// Panics if `logits` is empty or `label` is out of range.
#[must_use]
pub fn softmax_cross_entropy(logits: &[f32], label: usize) -> (f32, Vec<f32>) {
    assert!(label < logits.len());

    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut grad: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = grad.iter().sum();

    let loss = sum.ln() - (logits[label] - max);

    for g in &mut grad {
        *g /= sum;
    }
    grad[label] -= 1.0;

    (loss, grad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_logits() {
        let (loss, grad) = softmax_cross_entropy(&[0.0, 0.0], 0);
        assert!((loss - 2.0_f32.ln()).abs() < 1e-6);
        assert!((grad[0] - (-0.5)).abs() < 1e-6);
        assert!((grad[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_confident_correct_prediction_has_low_loss() {
        let (loss, grad) = softmax_cross_entropy(&[10.0, -10.0], 0);
        assert!(loss < 1e-6);
        assert!(grad[0].abs() < 1e-6);
    }

    #[test]
    fn test_confident_wrong_prediction_has_high_loss() {
        let (loss, grad) = softmax_cross_entropy(&[10.0, -10.0], 1);
        assert!(loss > 10.0);
        // Gradient pushes logit 1 up and logit 0 down.
        assert!(grad[1] < 0.0);
        assert!(grad[0] > 0.0);
    }

    #[test]
    fn test_gradient_sums_to_zero() {
        let (_, grad) = softmax_cross_entropy(&[1.0, -2.0, 0.5, 3.0], 2);
        let sum: f32 = grad.iter().sum();
        assert!(sum.abs() < 1e-6);
    }

    #[test]
    fn test_large_logits_do_not_overflow() {
        let (loss, _) = softmax_cross_entropy(&[1000.0, 999.0], 0);
        assert!(loss.is_finite());
    }
}
