use crate::error::{IoError, ModelError};
use crate::neural_network::Tensor;
use crate::neural_network::neural_network_trait::Layer;

/// Number of parameters a layer carries, as reported in the model summary
///
/// # Variants
///
/// - `Trainable` - Parameters updated by gradient descent during `backward`
/// - `NonTrainable` - Parameters that are stored but never updated
/// - `NoTrainable` - The layer has no parameters at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingParameters {
    Trainable(usize),
    NonTrainable(usize),
    NoTrainable,
}

/// Activation layers (ReLU, Sigmoid, Tanh, Softmax)
pub mod activation_layer;
/// Convolutional layers
pub mod convolution_layer;
/// Fully connected layer
pub mod dense;
/// Flatten layer
pub mod flatten;
/// Shared numeric and validation helpers for layers
pub mod helper_function;
/// Borrowed views of layer parameters
pub mod layer_weight;
/// Pooling layers
pub mod pooling_layer;
/// Dropout and other regularization layers
pub mod regularization_layer;
/// Reshape layer
pub mod reshape;
/// JSON-friendly representations of layer parameters
pub mod serialize_weight;

pub use activation_layer::*;
pub use convolution_layer::*;
pub use dense::*;
pub use flatten::*;
pub use layer_weight::*;
pub use pooling_layer::*;
pub use regularization_layer::*;
pub use reshape::*;
pub use serialize_weight::*;
