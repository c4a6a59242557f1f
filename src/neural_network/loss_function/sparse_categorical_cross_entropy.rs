use super::categorical_cross_entropy::{categorical_grad, categorical_loss};
use crate::error::ModelError;
use crate::neural_network::{LossFunction, Tensor};

/// Sparse Categorical Cross Entropy loss function for multi-class classification
/// where the label is a class index instead of a one-hot vector
///
/// The label must hold exactly one element, a non-negative integer class index.
/// It is one-hot encoded against the prediction's shape, using the row-major flat index,
/// before the categorical cross-entropy formulas are applied.
///
/// # Example
///
/// ```rust
/// use minnet::neural_network::*;
/// use ndarray::array;
///
/// let scce = SparseCategoricalCrossEntropy::new();
/// let y_pred = array![[0.25], [0.5], [0.25]].into_dyn();
///
/// let loss = scce.compute_loss(&array![1.0].into_dyn(), &y_pred).unwrap();
/// assert!((loss - 2f64.ln()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseCategoricalCrossEntropy;

impl SparseCategoricalCrossEntropy {
    /// Creates a new instance of SparseCategoricalCrossEntropy
    pub fn new() -> Self {
        Self {}
    }

    /// One-hot encodes the class index held by `y_true` against the shape of `y_pred`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InputValidationError` if the label does not hold exactly one element,
    /// or the index is negative, fractional, not finite, or out of range for the prediction.
    pub fn one_hot(y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        if y_true.len() != 1 {
            return Err(ModelError::InputValidationError(format!(
                "SparseCategoricalCrossEntropy expects a single class index label, got shape {:?}",
                y_true.shape()
            )));
        }

        let raw = y_true.iter().next().copied().unwrap_or(f64::NAN);
        if !raw.is_finite() || raw.fract() != 0.0 {
            return Err(ModelError::InputValidationError(format!(
                "Class index must be an integer, got {}",
                raw
            )));
        }
        if raw < 0.0 || raw as usize >= y_pred.len() {
            return Err(ModelError::InputValidationError(format!(
                "Class index {} is out of range for a prediction with {} classes",
                raw,
                y_pred.len()
            )));
        }

        let mut one_hot = Tensor::zeros(y_pred.raw_dim());
        if let Some(slot) = one_hot.iter_mut().nth(raw as usize) {
            *slot = 1.0;
        }
        Ok(one_hot)
    }
}

impl LossFunction for SparseCategoricalCrossEntropy {
    fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        let one_hot = Self::one_hot(y_true, y_pred)?;
        Ok(categorical_loss(&one_hot, y_pred))
    }

    fn compute_grad(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        let one_hot = Self::one_hot(y_true, y_pred)?;
        Ok(categorical_grad(&one_hot, y_pred))
    }
}
