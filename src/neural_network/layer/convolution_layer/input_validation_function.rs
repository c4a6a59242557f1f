use super::*;

/// Validates the filters parameter.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` if filters is 0.
pub(super) fn validate_filters(filters: usize) -> Result<(), ModelError> {
    if filters == 0 {
        return Err(ModelError::InputValidationError(
            "Number of filters must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Validates kernel size for 2D convolution.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` if any dimension is 0.
pub(super) fn validate_kernel_size_2d(kernel_size: (usize, usize)) -> Result<(), ModelError> {
    if kernel_size.0 == 0 || kernel_size.1 == 0 {
        return Err(ModelError::InputValidationError(
            "Kernel dimensions must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Validates the per-sample input shape for 2D convolution.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` if:
/// - Shape is not 3D
/// - Input channels is 0
/// - Input dimensions are smaller than the kernel
pub(super) fn validate_input_shape_2d(
    input_shape: &[usize],
    kernel_size: (usize, usize),
) -> Result<(), ModelError> {
    if input_shape.len() != 3 {
        return Err(ModelError::InputValidationError(format!(
            "Input shape must be 3D: [channels, height, width], got {:?}",
            input_shape
        )));
    }
    if input_shape[0] == 0 {
        return Err(ModelError::InputValidationError(
            "Number of input channels must be greater than 0".to_string(),
        ));
    }
    if input_shape[1] < kernel_size.0 || input_shape[2] < kernel_size.1 {
        return Err(ModelError::InputValidationError(format!(
            "Input dimensions ({}, {}) must be at least as large as the kernel size {:?}",
            input_shape[1], input_shape[2], kernel_size
        )));
    }
    Ok(())
}
