use crate::error::ModelError;
use crate::neural_network::Tensor;
use ndarray::{Array2, ArrayView2, IxDyn};

/// Formats a shape as a tuple-like string, e.g. `(5, 26, 26)`.
pub fn format_shape(shape: &[usize]) -> String {
    format!(
        "({})",
        shape
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// Validates that an observed tensor shape equals the shape a layer was configured with.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` naming the layer and both shapes on mismatch.
pub fn validate_input_shape(
    actual: &[usize],
    expected: &[usize],
    layer_name: &str,
) -> Result<(), ModelError> {
    if actual != expected {
        return Err(ModelError::InputValidationError(format!(
            "{} expected input shape {:?}, got {:?}",
            layer_name, expected, actual
        )));
    }
    Ok(())
}

/// Validates that a gradient arriving in `backward` has the shape the layer produced in `forward`.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` on mismatch.
pub fn validate_grad_shape(
    grad_shape: &[usize],
    output_shape: &[usize],
    layer_name: &str,
) -> Result<(), ModelError> {
    if grad_shape != output_shape {
        return Err(ModelError::InputValidationError(format!(
            "{} received gradient of shape {:?}, expected output shape {:?}",
            layer_name, grad_shape, output_shape
        )));
    }
    Ok(())
}

/// Validates that every dimension of a configured shape is non-zero.
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` if the shape is empty or has a zero dimension.
pub fn validate_all_dims_positive(shape: &[usize], layer_name: &str) -> Result<(), ModelError> {
    if shape.is_empty() || shape.iter().any(|&dim| dim == 0) {
        return Err(ModelError::InputValidationError(format!(
            "{} requires a non-empty shape with all dimensions greater than zero, got {:?}",
            layer_name, shape
        )));
    }
    Ok(())
}

/// Error returned when `backward` is called without a matching `forward`.
pub fn forward_not_run(layer_name: &str) -> ModelError {
    ModelError::ProcessingError(format!(
        "{}: forward pass has not been run before backward",
        layer_name
    ))
}

/// Reshapes a tensor into `shape`, keeping row-major element order.
///
/// # Errors
///
/// Returns `ModelError::ProcessingError` if the element counts differ.
pub fn reshape_tensor(tensor: &Tensor, shape: &[usize]) -> Result<Tensor, ModelError> {
    tensor
        .to_shape(IxDyn(shape))
        .map(|reshaped| reshaped.into_owned())
        .map_err(|e| {
            ModelError::ProcessingError(format!(
                "Failed to reshape tensor of shape {:?} into {:?}: {}",
                tensor.shape(),
                shape,
                e
            ))
        })
}

/// Valid 2D cross-correlation: slides `kernel` over `input` without flipping it and without padding.
///
/// The output has shape `(h - kh + 1, w - kw + 1)`; callers guarantee the kernel fits.
pub fn correlate2d_valid(input: ArrayView2<f64>, kernel: ArrayView2<f64>) -> Array2<f64> {
    let (h, w) = input.dim();
    let (kh, kw) = kernel.dim();
    let out_h = h - kh + 1;
    let out_w = w - kw + 1;

    Array2::from_shape_fn((out_h, out_w), |(i, j)| {
        let mut sum = 0.0;
        for ki in 0..kh {
            for kj in 0..kw {
                sum += input[[i + ki, j + kj]] * kernel[[ki, kj]];
            }
        }
        sum
    })
}

/// Full 2D convolution: the kernel is rotated 180° and the input is implicitly zero-padded
/// by `kernel - 1` on every side.
///
/// The output has shape `(h + kh - 1, w + kw - 1)`. Each input element scatters its kernel-weighted
/// contribution, which is the same sum as sliding the flipped kernel over the padded input.
pub fn convolve2d_full(input: ArrayView2<f64>, kernel: ArrayView2<f64>) -> Array2<f64> {
    let (h, w) = input.dim();
    let (kh, kw) = kernel.dim();
    let mut output = Array2::zeros((h + kh - 1, w + kw - 1));

    for i in 0..h {
        for j in 0..w {
            let value = input[[i, j]];
            for ki in 0..kh {
                for kj in 0..kw {
                    output[[i + ki, j + kj]] += value * kernel[[ki, kj]];
                }
            }
        }
    }

    output
}
