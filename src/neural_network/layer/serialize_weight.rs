use super::*;
use crate::neural_network::neural_network_trait::ApplyWeights;
use serde::{Deserialize, Serialize};

/// Serializable weight container for all supported layer types.
///
/// # Variants
///
/// - `Dense` - Weights for a Dense layer
/// - `Conv2D` - Filters and biases for a Conv2D layer
/// - `Empty` - No weights for layers without parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SerializableLayerWeight {
    Dense(SerializableDenseWeight),
    Conv2D(SerializableConv2DWeight),
    Empty,
}

impl SerializableLayerWeight {
    /// Converts a `LayerWeight` reference into an owned serializable weight.
    ///
    /// # Parameters
    ///
    /// - `weight` - Layer weights to convert into a serializable form
    ///
    /// # Returns
    ///
    /// - `SerializableLayerWeight` - Serializable representation of the provided weights
    pub fn from_layer_weight(weight: &LayerWeight) -> Self {
        match weight {
            LayerWeight::Empty => SerializableLayerWeight::Empty,

            LayerWeight::Dense(w) => SerializableLayerWeight::Dense(SerializableDenseWeight {
                weight: w.weight.outer_iter().map(|row| row.to_vec()).collect(),
                bias: w.bias.outer_iter().map(|row| row.to_vec()).collect(),
            }),
            LayerWeight::Conv2D(w) => SerializableLayerWeight::Conv2D(SerializableConv2DWeight {
                weight: w
                    .weight
                    .outer_iter()
                    .map(|filter| {
                        filter
                            .outer_iter()
                            .map(|channel| channel.outer_iter().map(|row| row.to_vec()).collect())
                            .collect()
                    })
                    .collect(),
                bias: w
                    .bias
                    .outer_iter()
                    .map(|plane| plane.outer_iter().map(|row| row.to_vec()).collect())
                    .collect(),
            }),
        }
    }

    /// Name of the layer kind these weights belong to, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SerializableLayerWeight::Dense(_) => "Dense",
            SerializableLayerWeight::Conv2D(_) => "Conv2D",
            SerializableLayerWeight::Empty => "Empty",
        }
    }
}

/// Serializable layer metadata.
///
/// # Fields
///
/// - `layer_type` - Layer type name
/// - `output_shape` - Layer output shape description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub layer_type: String,
    pub output_shape: String,
}

/// Serializable layer with metadata and weights.
///
/// # Fields
///
/// - `info` - Layer metadata describing type and output shape
/// - `weights` - Layer weights in a serializable format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLayer {
    pub info: LayerInfo,
    pub weights: SerializableLayerWeight,
}

/// Serializable representation of a Sequential model's parameters.
///
/// Only the raw parameter arrays and per-layer metadata are stored; the layer stack itself
/// is rebuilt by the caller before loading.
///
/// # Fields
///
/// - `layers` - Ordered list of layers with metadata and weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableSequential {
    pub layers: Vec<SerializableLayer>,
}

/// Helper functions used by multiple weight types
mod helper_function;
/// Serializable representation of a Conv2D layer's weights
pub mod serializable_conv_2d_weight;
/// Serializable representation of a Dense layer's weights
pub mod serializable_dense_weight;

use helper_function::*;
pub use serializable_conv_2d_weight::*;
pub use serializable_dense_weight::*;
