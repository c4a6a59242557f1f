use super::{EPSILON, validate_same_shape};
use crate::error::ModelError;
use crate::neural_network::Tensor;
use crate::neural_network::neural_network_trait::LossFunction;
use ndarray::Zip;

/// Binary Cross Entropy loss function for independent binary targets
///
/// `loss = -mean(y ln(p + ε) + (1 - y) ln(1 - p + ε))`
///
/// `grad = ((1 - y) / (1 - p + ε) - y / (p + ε)) / n`
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCrossEntropy;

impl BinaryCrossEntropy {
    /// Creates a new instance of BinaryCrossEntropy
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for BinaryCrossEntropy {
    fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_same_shape(y_true, y_pred, "BinaryCrossEntropy")?;

        let total: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&y, &p)| y * (p + EPSILON).ln() + (1.0 - y) * (1.0 - p + EPSILON).ln())
            .sum();

        Ok(-total / y_pred.len() as f64)
    }

    fn compute_grad(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_same_shape(y_true, y_pred, "BinaryCrossEntropy")?;

        let n = y_pred.len() as f64;
        Ok(Zip::from(y_true)
            .and(y_pred)
            .map_collect(|&y, &p| ((1.0 - y) / (1.0 - p + EPSILON) - y / (p + EPSILON)) / n))
    }
}
