use super::*;

/// Calculates the output shape of a non-overlapping 2D pooling layer.
///
/// Rows and columns that do not fill a complete window are dropped.
///
/// # Parameters
///
/// - `input_shape` - Per-sample input shape \[channels, height, width\]
/// - `pool_size` - Pooling window as (height, width)
///
/// # Returns
///
/// * `Vec<usize>` - Output shape \[channels, height / pool_h, width / pool_w\]
fn calculate_output_shape_2d_pooling(input_shape: &[usize], pool_size: (usize, usize)) -> Vec<usize> {
    vec![
        input_shape[0],
        input_shape[1] / pool_size.0,
        input_shape[2] / pool_size.1,
    ]
}

/// Input validation functions for pooling layers
mod input_validation_function;
/// 2D Max Pooling Layer
pub mod max_pooling_2d;

use input_validation_function::*;
pub use max_pooling_2d::*;
