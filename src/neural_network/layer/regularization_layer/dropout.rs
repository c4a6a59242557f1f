use super::super::helper_function::{
    format_shape, forward_not_run, validate_all_dims_positive, validate_grad_shape,
    validate_input_shape,
};
use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Bernoulli;

/// Dropout layer for neural networks, which randomly sets a fraction of input units to 0
/// during training.
///
/// In training mode every forward pass draws a fresh mask in which each element is kept
/// with probability `1 - rate`; the input is multiplied by that mask and the backward pass
/// multiplies the gradient by the same mask. Kept units are not rescaled by `1 / (1 - rate)`.
/// In inference mode the layer is the identity.
///
/// # Fields
///
/// - `rate` - Fraction of the input units to drop, in `[0, 1)`
/// - `input_shape` - Shape of the per-sample input tensor
/// - `keep` - Bernoulli distribution with success probability `1 - rate`
/// - `rng` - Random number generator used to draw masks
/// - `mask` - Mask from the last forward pass, consumed by backward
/// - `training` - Whether the layer is in training mode or inference mode
///
/// # Example
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::Array2;
///
/// let mut dropout = Dropout::with_random_state(0.5, vec![128, 1], 42).unwrap();
/// let input = Array2::ones((128, 1)).into_dyn();
///
/// let output = dropout.forward(&input).unwrap();
/// assert!(output.iter().all(|&v| v == 0.0 || v == 1.0));
///
/// dropout.set_training(false);
/// assert_eq!(dropout.forward(&input).unwrap(), input);
/// ```
pub struct Dropout {
    rate: f64,
    input_shape: Vec<usize>,
    keep: Bernoulli,
    rng: StdRng,
    mask: Option<Tensor>,
    training: bool,
}

impl Dropout {
    /// Creates a new Dropout layer seeded from the thread-local generator.
    ///
    /// # Parameters
    ///
    /// - `rate` - Fraction of the input units to drop. Must be in `[0, 1)`.
    /// - `input_shape` - Shape of the per-sample input tensor
    ///
    /// # Returns
    ///
    /// - `Ok(Dropout)` - A new layer instance in training mode
    /// - `Err(ModelError::InputValidationError)` - If the rate or shape is invalid
    pub fn new(rate: f64, input_shape: Vec<usize>) -> Result<Self, ModelError> {
        Self::with_rng(rate, input_shape, StdRng::from_rng(&mut rand::rng()))
    }

    /// Creates a new Dropout layer whose masks are drawn from a generator seeded with `seed`.
    ///
    /// Two layers with the same seed produce the same sequence of masks.
    pub fn with_random_state(
        rate: f64,
        input_shape: Vec<usize>,
        seed: u64,
    ) -> Result<Self, ModelError> {
        Self::with_rng(rate, input_shape, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rate: f64, input_shape: Vec<usize>, rng: StdRng) -> Result<Self, ModelError> {
        validate_rate_exclusive(rate, "Dropout rate")?;
        validate_all_dims_positive(&input_shape, "Dropout")?;

        let keep = Bernoulli::new(1.0 - rate)
            .map_err(|e| ModelError::InputValidationError(e.to_string()))?;

        Ok(Dropout {
            rate,
            input_shape,
            keep,
            rng,
            mask: None,
            training: true,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    mode_dependent_layer_set_training!();
}

impl Layer for Dropout {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        validate_input_shape(input.shape(), &self.input_shape, "Dropout")?;

        let mask = if self.training {
            let keep = self.keep;
            let rng = &mut self.rng;
            Tensor::from_shape_simple_fn(input.raw_dim(), || {
                if rng.sample(keep) { 1.0 } else { 0.0 }
            })
        } else {
            Tensor::ones(input.raw_dim())
        };

        let output = input * &mask;
        self.mask = Some(mask);
        Ok(output)
    }

    fn backward(&mut self, grad_output: &Tensor, _learning_rate: f64) -> Result<Tensor, ModelError> {
        let cached = self.mask.as_ref().ok_or_else(|| forward_not_run("Dropout"))?;
        validate_grad_shape(grad_output.shape(), cached.shape(), "Dropout")?;
        let mask = self.mask.take().ok_or_else(|| forward_not_run("Dropout"))?;

        Ok(grad_output * &mask)
    }

    fn layer_type(&self) -> &str {
        "Dropout"
    }

    fn output_shape(&self) -> String {
        format_shape(&self.input_shape)
    }

    mode_dependent_layer_trait!();
}
