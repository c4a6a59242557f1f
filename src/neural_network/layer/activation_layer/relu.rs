use super::*;

/// ReLU (Rectified Linear Unit) activation layer.
///
/// Applies `max(0, x)` element-wise to the input tensor, keeping the original shape.
/// The backward pass lets gradient through only where the cached input was positive.
///
/// # Fields
///
/// - `input_cache` - Cached input tensor from the forward pass, used during backpropagation
/// - `last_shape` - Shape of the last input, reported by `output_shape`
///
/// # Examples
///
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::array;
///
/// let mut relu = ReLU::new();
/// let output = relu.forward(&array![[-1.0], [2.0]].into_dyn()).unwrap();
/// assert_eq!(output, array![[0.0], [2.0]].into_dyn());
/// ```
#[derive(Default)]
pub struct ReLU {
    input_cache: Option<Tensor>,
    last_shape: Option<Vec<usize>>,
}

impl ReLU {
    /// Creates a new ReLU activation layer.
    ///
    /// # Returns
    ///
    /// - `Self` - A new `ReLU` layer instance
    pub fn new() -> Self {
        ReLU::default()
    }
}

impl Layer for ReLU {
    elementwise_activation_layer_functions!(ElementwiseActivation::ReLU);
}
