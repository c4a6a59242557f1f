/// Module that contains neural network layer implementations
pub mod layer;
/// Module that contains loss function implementations
pub mod loss_function;
/// Module that contains the traits every layer and loss function implements
pub mod neural_network_trait;
/// Module that contains implementations for sequential model architecture
pub mod sequential;
/// Module that contains the training configuration
pub mod train_config;
/// Module that contains the per-epoch training history
pub mod training_history;

pub use layer::*;
pub use loss_function::*;
pub use neural_network_trait::*;
pub use sequential::*;
pub use train_config::*;
pub use training_history::*;

use crate::ModelError;
use ndarray::ArrayD;

/// Type alias for n-dimensional arrays used as tensors in the neural network
///
/// Values are `f64` so that the loss functions' additive epsilon (`1e-100`) stays representable.
pub type Tensor = ArrayD<f64>;
