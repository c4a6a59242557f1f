use super::*;

/// Sigmoid activation layer.
///
/// Maps every element to `1 / (1 + e^(-x))`. Inputs are clipped to `[-700, 700]` before
/// exponentiation, so very large magnitudes saturate to 0 or 1 instead of overflowing.
///
/// # Examples
///
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::array;
///
/// let mut sigmoid = Sigmoid::new();
/// let output = sigmoid.forward(&array![[0.0]].into_dyn()).unwrap();
/// assert_eq!(output[[0, 0]], 0.5);
/// ```
#[derive(Default)]
pub struct Sigmoid {
    input_cache: Option<Tensor>,
    last_shape: Option<Vec<usize>>,
}

impl Sigmoid {
    /// Creates a new Sigmoid activation layer.
    pub fn new() -> Self {
        Sigmoid::default()
    }
}

impl Layer for Sigmoid {
    elementwise_activation_layer_functions!(ElementwiseActivation::Sigmoid);
}
