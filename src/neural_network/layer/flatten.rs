use super::helper_function::{
    format_shape, forward_not_run, reshape_tensor, validate_all_dims_positive,
    validate_grad_shape, validate_input_shape,
};
use super::*;

/// A layer that flattens a per-sample tensor into a column vector.
///
/// Typically placed between convolutional/pooling layers and a `Dense` layer. Elements keep
/// their row-major order, and the backward pass reshapes the gradient back to the input shape.
///
/// # Input Shape
///
/// The configured input shape, e.g. \[channels, height, width\]
///
/// # Output Shape
///
/// \[channels * height * width, 1\]
///
/// # Example
///
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::Array3;
///
/// let mut flatten = Flatten::new(vec![3, 4, 4]).unwrap();
/// let output = flatten.forward(&Array3::ones((3, 4, 4)).into_dyn()).unwrap();
/// assert_eq!(output.shape(), &[48, 1]);
/// ```
pub struct Flatten {
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
    forward_done: bool,
}

impl Flatten {
    /// Creates a new Flatten layer.
    ///
    /// # Parameters
    ///
    /// * `input_shape` - Shape of the per-sample input tensor
    ///
    /// # Returns
    ///
    /// - `Ok(Flatten)` - A new layer instance
    /// - `Err(ModelError::InputValidationError)` - If the shape is empty or has a zero dimension
    pub fn new(input_shape: Vec<usize>) -> Result<Self, ModelError> {
        validate_all_dims_positive(&input_shape, "Flatten")?;

        let output_shape = vec![input_shape.iter().product(), 1];

        Ok(Flatten {
            input_shape,
            output_shape,
            forward_done: false,
        })
    }
}

impl Layer for Flatten {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        validate_input_shape(input.shape(), &self.input_shape, "Flatten")?;

        let output = reshape_tensor(input, &self.output_shape)?;
        self.forward_done = true;
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor, _learning_rate: f64) -> Result<Tensor, ModelError> {
        if !self.forward_done {
            return Err(forward_not_run("Flatten"));
        }
        validate_grad_shape(grad_output.shape(), &self.output_shape, "Flatten")?;
        self.forward_done = false;

        reshape_tensor(grad_output, &self.input_shape)
    }

    fn layer_type(&self) -> &str {
        "Flatten"
    }

    fn output_shape(&self) -> String {
        format_shape(&self.output_shape)
    }
}
