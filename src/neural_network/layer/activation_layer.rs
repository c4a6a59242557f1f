use super::helper_function::{format_shape, forward_not_run, validate_grad_shape};
use super::*;
use ndarray::Zip;

/// Threshold for parallel computation (in number of elements)
/// For tensors with fewer elements, sequential computation is faster due to overhead
const ACTIVATION_PARALLEL_THRESHOLD: usize = 10_000;

/// Inputs to the sigmoid are clipped to this magnitude so that `exp` cannot overflow
const SIGMOID_INPUT_CLIP: f64 = 700.0;

/// Elementwise activation functions that share one forward/backward pattern.
///
/// Forward applies `f` to every element; backward multiplies the incoming gradient by
/// `f'` evaluated at the cached input.
///
/// # Variants
///
/// - `Tanh` - `f(x) = tanh(x)`, `f'(x) = 1 - tanh(x)^2`
/// - `Sigmoid` - `f(x) = 1 / (1 + e^(-x))` with `x` clipped to `[-700, 700]`, `f'(x) = f(x)(1 - f(x))`
/// - `ReLU` - `f(x) = x` if `x > 0` else `0`, `f'(x) = 1` if `x > 0` else `0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementwiseActivation {
    Tanh,
    Sigmoid,
    ReLU,
}

impl ElementwiseActivation {
    /// Evaluates the activation at `x`.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            ElementwiseActivation::Tanh => x.tanh(),
            ElementwiseActivation::Sigmoid => {
                let clipped = x.clamp(-SIGMOID_INPUT_CLIP, SIGMOID_INPUT_CLIP);
                1.0 / (1.0 + (-clipped).exp())
            }
            ElementwiseActivation::ReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
        }
    }

    /// Evaluates the derivative of the activation at `x`.
    pub fn derivative(self, x: f64) -> f64 {
        match self {
            ElementwiseActivation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ElementwiseActivation::Sigmoid => {
                let s = self.apply(x);
                s * (1.0 - s)
            }
            ElementwiseActivation::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementwiseActivation::Tanh => "Tanh",
            ElementwiseActivation::Sigmoid => "Sigmoid",
            ElementwiseActivation::ReLU => "ReLU",
        }
    }
}

/// Applies `activation` to every element of `input`.
fn elementwise_forward(activation: ElementwiseActivation, input: &Tensor) -> Tensor {
    let mut output = input.clone();
    if output.len() >= ACTIVATION_PARALLEL_THRESHOLD {
        output.par_mapv_inplace(|x| activation.apply(x));
    } else {
        output.mapv_inplace(|x| activation.apply(x));
    }
    output
}

/// Computes `grad_output ⊙ f'(input)`.
fn elementwise_backward(
    activation: ElementwiseActivation,
    input: &Tensor,
    grad_output: &Tensor,
) -> Tensor {
    let mut grad_input = grad_output.clone();
    let zip = Zip::from(&mut grad_input).and(input);
    if input.len() >= ACTIVATION_PARALLEL_THRESHOLD {
        zip.par_for_each(|grad, &x| *grad *= activation.derivative(x));
    } else {
        zip.for_each(|grad, &x| *grad *= activation.derivative(x));
    }
    grad_input
}

/// Formats the shape seen by the last forward pass, or "Unknown" before the first one.
fn format_output_shape(last_shape: &Option<Vec<usize>>) -> String {
    match last_shape {
        Some(shape) => format_shape(shape),
        None => "Unknown".to_string(),
    }
}

/// A macro that generates the `Layer` methods shared by every elementwise activation layer.
///
/// # Requirements
///
/// The implementing struct must have the following fields:
/// - `input_cache: Option<Tensor>` - Input of the last forward pass
/// - `last_shape: Option<Vec<usize>>` - Shape of the last input, kept for the model summary
macro_rules! elementwise_activation_layer_functions {
    ($activation:expr) => {
        fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
            if input.is_empty() {
                return Err(ModelError::InputValidationError(format!(
                    "{} received an empty input tensor",
                    $activation.name()
                )));
            }

            let output = elementwise_forward($activation, input);
            self.last_shape = Some(input.shape().to_vec());
            self.input_cache = Some(input.clone());
            Ok(output)
        }

        fn backward(
            &mut self,
            grad_output: &Tensor,
            _learning_rate: f64,
        ) -> Result<Tensor, ModelError> {
            let cached = self
                .input_cache
                .as_ref()
                .ok_or_else(|| forward_not_run($activation.name()))?;
            validate_grad_shape(grad_output.shape(), cached.shape(), $activation.name())?;
            let input = self
                .input_cache
                .take()
                .ok_or_else(|| forward_not_run($activation.name()))?;

            Ok(elementwise_backward($activation, &input, grad_output))
        }

        fn layer_type(&self) -> &str {
            $activation.name()
        }

        fn output_shape(&self) -> String {
            format_output_shape(&self.last_shape)
        }
    };
}

/// ReLU (Rectified Linear Unit) activation layer
pub mod relu;
/// Sigmoid activation layer
pub mod sigmoid;
/// Softmax activation layer
pub mod softmax;
/// Tanh (Hyperbolic Tangent) activation layer
pub mod tanh;

pub use relu::*;
pub use sigmoid::*;
pub use softmax::*;
pub use tanh::*;
