use super::*;

/// Softmax activation layer.
///
/// Treats the whole per-sample tensor as one score vector and turns it into a probability
/// distribution:
///
/// `softmax(x_i) = exp(x_i - max(x)) / sum_j(exp(x_j - max(x)))`
///
/// The maximum is subtracted first so that `exp` cannot overflow.
///
/// The backward pass is the vector-Jacobian product with the Jacobian `diag(y) - y·yᵀ`,
/// which for an upstream gradient `g` reduces to `y ⊙ (g - ⟨y, g⟩)`.
///
/// # Fields
///
/// - `output_cache` - Output of the last forward pass, used during backpropagation
/// - `last_shape` - Shape of the last input, reported by `output_shape`
///
/// # Example
///
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::array;
///
/// let mut softmax = Softmax::new();
/// let output = softmax.forward(&array![[1.0], [2.0], [3.0]].into_dyn()).unwrap();
/// assert!((output.sum() - 1.0).abs() < 1e-12);
/// ```
#[derive(Default)]
pub struct Softmax {
    output_cache: Option<Tensor>,
    last_shape: Option<Vec<usize>>,
}

impl Softmax {
    /// Creates a new Softmax activation layer.
    ///
    /// # Returns
    ///
    /// * `Softmax` - A new `Softmax` layer instance
    pub fn new() -> Self {
        Softmax::default()
    }
}

impl Layer for Softmax {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        if input.is_empty() {
            return Err(ModelError::InputValidationError(
                "Softmax received an empty input tensor".to_string(),
            ));
        }

        let max_val = input.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut output = input.mapv(|x| (x - max_val).exp());
        let sum = output.sum();
        output.mapv_inplace(|x| x / sum);

        self.last_shape = Some(input.shape().to_vec());
        self.output_cache = Some(output.clone());
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor, _learning_rate: f64) -> Result<Tensor, ModelError> {
        let cached = self
            .output_cache
            .as_ref()
            .ok_or_else(|| forward_not_run("Softmax"))?;
        validate_grad_shape(grad_output.shape(), cached.shape(), "Softmax")?;
        let output = self
            .output_cache
            .take()
            .ok_or_else(|| forward_not_run("Softmax"))?;

        // (diag(y) - y·yᵀ)·g = y ⊙ (g - ⟨y, g⟩)
        let dot: f64 = output
            .iter()
            .zip(grad_output.iter())
            .map(|(y, g)| y * g)
            .sum();
        let mut grad_input = grad_output.mapv(|g| g - dot);
        grad_input *= &output;

        Ok(grad_input)
    }

    fn layer_type(&self) -> &str {
        "Softmax"
    }

    fn output_shape(&self) -> String {
        format_output_shape(&self.last_shape)
    }
}
