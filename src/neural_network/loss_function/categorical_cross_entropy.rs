use super::{EPSILON, validate_same_shape};
use crate::error::ModelError;
use crate::neural_network::{LossFunction, Tensor};
use ndarray::Zip;

/// Categorical Cross Entropy loss function for multi-class classification
///
/// Expects a one-hot label with the prediction's shape.
///
/// `loss = -Σ y ln(p + ε)`, `grad = -y / (p + ε)`
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalCrossEntropy;

impl CategoricalCrossEntropy {
    /// Creates a new instance of CategoricalCrossEntropy
    pub fn new() -> Self {
        Self {}
    }
}

/// Loss value over a one-hot label, shared with the sparse variant.
pub(super) fn categorical_loss(y_true: &Tensor, y_pred: &Tensor) -> f64 {
    -y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&y, &p)| y * (p + EPSILON).ln())
        .sum::<f64>()
}

/// Loss gradient over a one-hot label, shared with the sparse variant.
pub(super) fn categorical_grad(y_true: &Tensor, y_pred: &Tensor) -> Tensor {
    Zip::from(y_true)
        .and(y_pred)
        .map_collect(|&y, &p| -y / (p + EPSILON))
}

impl LossFunction for CategoricalCrossEntropy {
    fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_same_shape(y_true, y_pred, "CategoricalCrossEntropy")?;
        Ok(categorical_loss(y_true, y_pred))
    }

    fn compute_grad(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_same_shape(y_true, y_pred, "CategoricalCrossEntropy")?;
        Ok(categorical_grad(y_true, y_pred))
    }
}
