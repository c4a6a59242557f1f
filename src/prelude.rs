pub use crate::error::{IoError, ModelError};
pub use crate::neural_network::Tensor;
pub use crate::neural_network::layer::activation_layer::*;
pub use crate::neural_network::layer::convolution_layer::*;
pub use crate::neural_network::layer::pooling_layer::*;
pub use crate::neural_network::layer::regularization_layer::*;
pub use crate::neural_network::layer::{Dense, Flatten, Reshape, TrainingParameters};
pub use crate::neural_network::layer::{LayerWeight, SerializableLayerWeight};
pub use crate::neural_network::loss_function::*;
pub use crate::neural_network::neural_network_trait::{Layer, LossFunction};
pub use crate::neural_network::sequential::Sequential;
pub use crate::neural_network::train_config::TrainConfig;
pub use crate::neural_network::training_history::{EpochSummary, TrainingHistory};
