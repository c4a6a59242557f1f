use super::helper_function::{
    format_shape, forward_not_run, reshape_tensor, validate_all_dims_positive,
    validate_grad_shape, validate_input_shape,
};
use super::*;

/// A layer that reinterprets a per-sample tensor with a different shape of equal size.
///
/// Elements keep their row-major order. The backward pass applies the inverse reshape to
/// the gradient.
///
/// # Example
///
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::Array2;
///
/// let mut reshape = Reshape::new(vec![16, 1], vec![1, 4, 4]).unwrap();
/// let output = reshape.forward(&Array2::zeros((16, 1)).into_dyn()).unwrap();
/// assert_eq!(output.shape(), &[1, 4, 4]);
/// ```
pub struct Reshape {
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
    forward_done: bool,
}

impl Reshape {
    /// Creates a new Reshape layer.
    ///
    /// # Parameters
    ///
    /// - `input_shape` - Shape of the per-sample input tensor
    /// - `output_shape` - Shape of the output tensor
    ///
    /// # Returns
    ///
    /// - `Ok(Reshape)` - A new layer instance
    /// - `Err(ModelError::InputValidationError)` - If either shape has a zero dimension or the
    ///   element counts differ
    pub fn new(input_shape: Vec<usize>, output_shape: Vec<usize>) -> Result<Self, ModelError> {
        validate_all_dims_positive(&input_shape, "Reshape")?;
        validate_all_dims_positive(&output_shape, "Reshape")?;

        let input_size: usize = input_shape.iter().product();
        let output_size: usize = output_shape.iter().product();
        if input_size != output_size {
            return Err(ModelError::InputValidationError(format!(
                "Reshape cannot map {:?} ({} elements) to {:?} ({} elements)",
                input_shape, input_size, output_shape, output_size
            )));
        }

        Ok(Reshape {
            input_shape,
            output_shape,
            forward_done: false,
        })
    }
}

impl Layer for Reshape {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        validate_input_shape(input.shape(), &self.input_shape, "Reshape")?;

        let output = reshape_tensor(input, &self.output_shape)?;
        self.forward_done = true;
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor, _learning_rate: f64) -> Result<Tensor, ModelError> {
        if !self.forward_done {
            return Err(forward_not_run("Reshape"));
        }
        validate_grad_shape(grad_output.shape(), &self.output_shape, "Reshape")?;
        self.forward_done = false;

        reshape_tensor(grad_output, &self.input_shape)
    }

    fn layer_type(&self) -> &str {
        "Reshape"
    }

    fn output_shape(&self) -> String {
        format_shape(&self.output_shape)
    }
}
