use super::validate_same_shape;
use crate::error::ModelError;
use crate::neural_network::Tensor;
use crate::neural_network::neural_network_trait::LossFunction;

/// Mean Squared Error loss function
///
/// `loss = mean((y_pred - y_true)^2)`, `grad = 2 (y_pred - y_true) / n`
///
/// # Example
///
/// ```rust
/// use minnet::neural_network::loss_function::*;
/// use minnet::neural_network::LossFunction;
/// use ndarray::ArrayD;
///
/// let mse = MeanSquaredError::new();
///
/// let y_true = ArrayD::from_shape_vec(vec![3, 1], vec![1.0, 2.0, 3.0]).unwrap();
/// let y_pred = ArrayD::from_shape_vec(vec![3, 1], vec![1.0, 2.0, 5.0]).unwrap();
///
/// let loss = mse.compute_loss(&y_true, &y_pred).unwrap();
/// assert!((loss - 4.0 / 3.0).abs() < 1e-12);
///
/// let gradients = mse.compute_grad(&y_true, &y_pred).unwrap();
/// assert!((gradients[[2, 0]] - 4.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquaredError;

impl MeanSquaredError {
    /// Creates a new instance of MeanSquaredError
    ///
    /// # Returns
    ///
    /// - `MeanSquaredError` - Returns a unit-like struct `MeanSquaredError`
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for MeanSquaredError {
    fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_same_shape(y_true, y_pred, "MeanSquaredError")?;

        let squared_diff = (y_pred - y_true).mapv(|x| x * x);
        Ok(squared_diff.sum() / squared_diff.len() as f64)
    }

    fn compute_grad(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_same_shape(y_true, y_pred, "MeanSquaredError")?;

        let n = y_pred.len() as f64;
        Ok((y_pred - y_true).mapv(|d| 2.0 * d / n))
    }
}
