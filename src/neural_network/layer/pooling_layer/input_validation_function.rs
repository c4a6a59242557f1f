use super::*;

/// Validates that the input shape has the expected number of dimensions.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` if the shape length doesn't match expected_dims.
pub(super) fn validate_input_shape_dims(
    input_shape: &[usize],
    expected_dims: usize,
    layer_name: &str,
) -> Result<(), ModelError> {
    if input_shape.len() != expected_dims {
        return Err(ModelError::InputValidationError(format!(
            "Input shape must be {}-dimensional: [channels, height, width] for {}, got {:?}",
            expected_dims, layer_name, input_shape
        )));
    }
    Ok(())
}

/// Validates pool size for 2D pooling.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` if:
/// - Any pool dimension is 0
/// - The pool is larger than the input's spatial dimensions
pub(super) fn validate_pool_size_2d(
    pool_size: (usize, usize),
    input_shape: &[usize],
) -> Result<(), ModelError> {
    if pool_size.0 == 0 || pool_size.1 == 0 {
        return Err(ModelError::InputValidationError(
            "pool_size dimensions must be greater than zero".to_string(),
        ));
    }
    if pool_size.0 > input_shape[1] || pool_size.1 > input_shape[2] {
        return Err(ModelError::InputValidationError(format!(
            "pool_size {:?} cannot be larger than the input's spatial dimensions ({}, {})",
            pool_size, input_shape[1], input_shape[2]
        )));
    }
    Ok(())
}
