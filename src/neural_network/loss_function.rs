use crate::error::ModelError;
use crate::neural_network::{LossFunction, Tensor};

/// Added inside logarithms and denominators of the cross-entropy losses to avoid `ln(0)`
/// and division by zero. Requires `f64`: the value underflows to zero in `f32`.
pub const EPSILON: f64 = 1e-100;

/// Validates that the label and the prediction have the same shape.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` naming the loss and both shapes on mismatch.
fn validate_same_shape(y_true: &Tensor, y_pred: &Tensor, loss_name: &str) -> Result<(), ModelError> {
    if y_true.shape() != y_pred.shape() {
        return Err(ModelError::InputValidationError(format!(
            "{}: label shape {:?} does not match prediction shape {:?}",
            loss_name,
            y_true.shape(),
            y_pred.shape()
        )));
    }
    if y_pred.is_empty() {
        return Err(ModelError::InputValidationError(format!(
            "{}: prediction tensor is empty",
            loss_name
        )));
    }
    Ok(())
}

/// Binary Cross Entropy loss function for independent binary targets
pub mod binary_cross_entropy;
/// Categorical Cross Entropy loss function for one-hot multi-class targets
pub mod categorical_cross_entropy;
/// Mean Squared Error loss function
pub mod mean_squared_error;
/// Sparse Categorical Cross Entropy loss function for class index targets
pub mod sparse_categorical_cross_entropy;

pub use binary_cross_entropy::*;
pub use categorical_cross_entropy::*;
pub use mean_squared_error::*;
pub use sparse_categorical_cross_entropy::*;
