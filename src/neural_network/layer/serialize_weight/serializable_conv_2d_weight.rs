use super::*;

/// Serializable representation of Conv2D layer weights.
///
/// # Fields
///
/// - `weight` - 4D filter tensor (filters, channels, kernel_height, kernel_width) stored as nested vectors
/// - `bias` - 3D bias tensor (filters, output_height, output_width) stored as nested vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableConv2DWeight {
    pub weight: Vec<Vec<Vec<Vec<f64>>>>,
    pub bias: Vec<Vec<Vec<f64>>>,
}

impl ApplyWeights<Conv2D> for SerializableConv2DWeight {
    fn apply_to_layer(&self, layer: &mut Conv2D) -> Result<(), IoError> {
        let weight_array = vec4_to_array4(&self.weight)?;
        let bias_array = vec3_to_array3(&self.bias)?;
        layer.set_weights(weight_array, bias_array)?;
        Ok(())
    }
}
