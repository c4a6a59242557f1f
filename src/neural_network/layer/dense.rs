use super::helper_function::{forward_not_run, validate_grad_shape, validate_input_shape};
use super::*;
use crate::neural_network::neural_network_trait::ApplyWeights;
use ndarray::{Array, Array2, Ix2};
use rand::Rng;
use rand_distr::StandardNormal;

/// Dense (Fully Connected) layer implementation for neural networks.
///
/// This layer performs the affine transformation `output = W · input + b` on a single
/// sample stored as a column vector. Weights and bias are drawn from the standard normal
/// distribution at construction and updated in place by every `backward` call.
///
/// # Dimensions
///
/// - Input shape: (input_size, 1)
/// - Output shape: (output_size, 1)
///
/// # Fields
///
/// - `input_size` - Number of input features
/// - `output_size` - Number of output features
/// - `weights` - Weight matrix with shape (output_size, input_size)
/// - `bias` - Bias column with shape (output_size, 1)
/// - `input_cache` - Input of the last forward pass, consumed by backward
///
/// # Example
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::array;
///
/// let mut dense = Dense::new(2, 2).unwrap();
/// dense
///     .set_weights(array![[1.0, 0.0], [0.0, 1.0]], array![[0.0], [0.0]])
///     .unwrap();
///
/// let output = dense.forward(&array![[2.0], [3.0]].into_dyn()).unwrap();
/// assert_eq!(output, array![[2.0], [3.0]].into_dyn());
/// ```
pub struct Dense {
    input_size: usize,
    output_size: usize,
    weights: Array2<f64>,
    bias: Array2<f64>,
    input_cache: Option<Array2<f64>>,
}

impl Dense {
    /// Creates a new dense layer with standard-normal weights and bias.
    ///
    /// # Parameters
    ///
    /// - `input_size` - Number of input features
    /// - `output_size` - Number of output features
    ///
    /// # Returns
    ///
    /// - `Ok(Dense)` - A new layer instance
    /// - `Err(ModelError::InputValidationError)` - If either size is zero
    pub fn new(input_size: usize, output_size: usize) -> Result<Self, ModelError> {
        Self::new_with_rng(input_size, output_size, &mut rand::rng())
    }

    /// Creates a new dense layer drawing its initial parameters from `rng`.
    ///
    /// Two layers built from identically seeded generators have identical parameters.
    pub fn new_with_rng<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        if input_size == 0 || output_size == 0 {
            return Err(ModelError::InputValidationError(format!(
                "Dense layer sizes must be greater than 0, got input_size={}, output_size={}",
                input_size, output_size
            )));
        }

        let weights = Array::from_shape_simple_fn((output_size, input_size), || {
            rng.sample(StandardNormal)
        });
        let bias = Array::from_shape_simple_fn((output_size, 1), || rng.sample(StandardNormal));

        Ok(Dense {
            input_size,
            output_size,
            weights,
            bias,
            input_cache: None,
        })
    }

    /// Replaces the weights and bias of this layer.
    ///
    /// # Parameters
    ///
    /// - `weights` - Weight matrix with shape (output_size, input_size)
    /// - `bias` - Bias column with shape (output_size, 1)
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If either array has the wrong shape
    pub fn set_weights(&mut self, weights: Array2<f64>, bias: Array2<f64>) -> Result<(), ModelError> {
        validate_input_shape(
            weights.shape(),
            &[self.output_size, self.input_size],
            "Dense weights",
        )?;
        validate_input_shape(bias.shape(), &[self.output_size, 1], "Dense bias")?;

        self.weights = weights;
        self.bias = bias;
        Ok(())
    }

    /// Weight matrix with shape (output_size, input_size).
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Bias column with shape (output_size, 1).
    pub fn bias(&self) -> &Array2<f64> {
        &self.bias
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }
}

impl Layer for Dense {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        validate_input_shape(input.shape(), &[self.input_size, 1], "Dense")?;

        let input_2d = input
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?
            .to_owned();

        let output = self.weights.dot(&input_2d) + &self.bias;
        self.input_cache = Some(input_2d);

        Ok(output.into_dyn())
    }

    fn backward(&mut self, grad_output: &Tensor, learning_rate: f64) -> Result<Tensor, ModelError> {
        if self.input_cache.is_none() {
            return Err(forward_not_run("Dense"));
        }
        validate_grad_shape(grad_output.shape(), &[self.output_size, 1], "Dense")?;
        let input = self.input_cache.take().ok_or_else(|| forward_not_run("Dense"))?;

        let grad = grad_output
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;

        // dW = g · xᵀ, dx = Wᵀ · g with the weights before the update
        let grad_weights = grad.dot(&input.t());
        let grad_input = self.weights.t().dot(&grad);

        self.weights.scaled_add(-learning_rate, &grad_weights);
        self.bias.scaled_add(-learning_rate, &grad);

        Ok(grad_input.into_dyn())
    }

    fn layer_type(&self) -> &str {
        "Dense"
    }

    fn output_shape(&self) -> String {
        format!("({}, 1)", self.output_size)
    }

    fn param_count(&self) -> TrainingParameters {
        TrainingParameters::Trainable(self.weights.len() + self.bias.len())
    }

    fn get_weights(&self) -> LayerWeight<'_> {
        LayerWeight::Dense(DenseLayerWeight {
            weight: &self.weights,
            bias: &self.bias,
        })
    }

    fn load_weights(&mut self, weights: &SerializableLayerWeight) -> Result<(), IoError> {
        match weights {
            SerializableLayerWeight::Dense(w) => w.apply_to_layer(self),
            other => Err(IoError::invalid_data(format!(
                "Expected Dense weights but got {}",
                other.kind()
            ))),
        }
    }
}
