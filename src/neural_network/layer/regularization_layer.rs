use super::*;

/// A macro to define a layer-specific method for setting the training mode.
///
/// This macro generates a `set_training` method within the implementing object
/// to allow toggling the training mode between training (`true`) and inference (`false`).
macro_rules! mode_dependent_layer_set_training {
    () => {
        /// Sets the training mode for the layer.
        ///
        /// # Arguments
        ///
        /// * `is_training` - `true` for training mode, `false` for inference mode
        pub fn set_training(&mut self, is_training: bool) {
            self.training = is_training;
        }

        /// Returns `true` if the layer is in training mode.
        pub fn is_training(&self) -> bool {
            self.training
        }
    };
}

/// A macro that defines a method `set_training_if_mode_dependent` for a layer that may have
/// behavior dependent on whether it is in training or inference mode.
macro_rules! mode_dependent_layer_trait {
    () => {
        fn set_training_if_mode_dependent(&mut self, is_training: bool) {
            self.set_training(is_training);
        }
    };
}

/// Dropout layer
pub mod dropout;
/// Input validation functions for regularization layers
mod input_validation_function;

pub use dropout::*;
use input_validation_function::*;
