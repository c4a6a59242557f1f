use ndarray::{Array2, Array3, Array4};

/// Container for borrowed views of a layer's parameters
///
/// # Variants
///
/// - `Dense` - Weights of a fully connected layer
/// - `Conv2D` - Filters and biases of a 2D convolutional layer
/// - `Empty` - The layer has no trainable parameters
pub enum LayerWeight<'a> {
    Dense(DenseLayerWeight<'a>),
    Conv2D(Conv2DLayerWeight<'a>),
    Empty,
}

/// Weights for a dense (fully connected) layer
///
/// # Fields
///
/// - `weight` - Weight matrix with shape (output_size, input_size)
/// - `bias` - Bias column with shape (output_size, 1)
pub struct DenseLayerWeight<'a> {
    pub weight: &'a Array2<f64>,
    pub bias: &'a Array2<f64>,
}

/// Weights for a 2D convolutional layer
///
/// # Fields
///
/// - `weight` - Filters with shape (filters, channels, kernel_height, kernel_width)
/// - `bias` - One bias per output element, shape (filters, output_height, output_width)
pub struct Conv2DLayerWeight<'a> {
    pub weight: &'a Array4<f64>,
    pub bias: &'a Array3<f64>,
}
