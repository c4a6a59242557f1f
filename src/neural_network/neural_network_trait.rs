use crate::error::{IoError, ModelError};
use crate::neural_network::Tensor;
use crate::neural_network::layer::TrainingParameters;
use crate::neural_network::layer::layer_weight::LayerWeight;
use crate::neural_network::layer::serialize_weight::SerializableLayerWeight;

/// Defines the interface for neural network layers.
///
/// A layer instance serves one forward/backward pair at a time: `forward` caches whatever
/// `backward` needs, and `backward` consumes that cache. Layers are not reentrant; clone
/// the model per concurrent stream instead of sharing one.
pub trait Layer {
    /// Performs forward propagation through the layer.
    ///
    /// # Parameters
    ///
    /// - `input` - The input tensor to the layer, shaped as the layer's declared input shape
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - The output tensor after forward computation
    /// - `Err(ModelError::InputValidationError)` - If the input shape does not match the layer configuration
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError>;

    /// Performs backward propagation through the layer and applies a gradient descent step
    /// to the layer's own parameters.
    ///
    /// # Parameters
    ///
    /// - `grad_output` - Gradient of the loss with respect to this layer's output
    /// - `learning_rate` - Step size applied to the parameter gradients (ignored by layers without parameters)
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - Gradient of the loss with respect to this layer's input
    /// - `Err(ModelError::ProcessingError)` - If no matching forward pass has been run
    /// - `Err(ModelError::InputValidationError)` - If `grad_output` does not have the output shape
    fn backward(&mut self, grad_output: &Tensor, learning_rate: f64) -> Result<Tensor, ModelError>;

    /// Returns the type name of the layer (e.g. "Dense").
    ///
    /// # Returns
    ///
    /// * `&str` - A string slice representing the layer type
    fn layer_type(&self) -> &str {
        "Unknown"
    }

    /// Returns a description of the output shape of the layer.
    ///
    /// # Returns
    ///
    /// - `String` - A string describing the output dimensions
    fn output_shape(&self) -> String {
        "Unknown".to_string()
    }

    /// Returns the total number of trainable parameters in the layer.
    ///
    /// # Returns
    ///
    /// - `TrainingParameters` - The count of parameters as an enum variant
    fn param_count(&self) -> TrainingParameters {
        TrainingParameters::NoTrainable
    }

    /// Returns a reference to all weights in the layer.
    ///
    /// # Returns
    ///
    /// - `LayerWeight<'_>` - `LayerWeight::Dense` or `LayerWeight::Conv2D` for parametric layers,
    ///   `LayerWeight::Empty` for layers with no trainable parameters
    fn get_weights(&self) -> LayerWeight<'_> {
        LayerWeight::Empty
    }

    /// Replaces the layer's parameters with previously saved raw arrays.
    ///
    /// Layers without parameters accept only `SerializableLayerWeight::Empty`.
    ///
    /// # Errors
    ///
    /// - `IoError::StdIoError` - The weights belong to a different layer kind or have the wrong shape
    fn load_weights(&mut self, weights: &SerializableLayerWeight) -> Result<(), IoError> {
        match weights {
            SerializableLayerWeight::Empty => Ok(()),
            _ => Err(IoError::invalid_data(format!(
                "{} layer has no trainable parameters to load",
                self.layer_type()
            ))),
        }
    }

    /// Sets the training mode if the layer is mode-dependent.
    ///
    /// Layers that behave differently during training and inference (Dropout) override this;
    /// all other layers keep the default no-op.
    ///
    /// # Parameters
    ///
    /// - `_is_training` - `true` for training mode, `false` for inference mode
    fn set_training_if_mode_dependent(&mut self, _is_training: bool) {}
}

/// Defines the interface for loss functions used in neural network training.
///
/// A loss function is a stateless (value, gradient) pair over a label and a prediction.
pub trait LossFunction {
    /// Computes the loss between true and predicted values.
    ///
    /// # Parameters
    ///
    /// - `y_true` - Tensor containing the ground truth values
    /// - `y_pred` - Tensor containing the predicted values
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - The scalar loss value
    /// - `Err(ModelError::InputValidationError)` - If the label does not fit the prediction
    fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError>;

    /// Computes the gradient of the loss with respect to the predictions.
    ///
    /// # Parameters
    ///
    /// - `y_true` - Tensor containing the ground truth values
    /// - `y_pred` - Tensor containing the predicted values
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - Gradient with the same shape as `y_pred`
    /// - `Err(ModelError::InputValidationError)` - If the label does not fit the prediction
    fn compute_grad(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError>;
}

/// Applies a deserialized weight container to a concrete layer type.
///
/// Implemented by the serializable weight structs for the layer they describe; a layer's
/// `load_weights` delegates here once it has matched the enum variant.
pub trait ApplyWeights<T> {
    /// Converts the stored nested vectors to arrays and installs them in `layer`.
    ///
    /// # Errors
    ///
    /// - `IoError::StdIoError` - The stored arrays are ragged or do not match the layer's shapes
    fn apply_to_layer(&self, layer: &mut T) -> Result<(), IoError>;
}
