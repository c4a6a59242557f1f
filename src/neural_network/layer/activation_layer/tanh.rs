use super::*;

/// Tanh (Hyperbolic Tangent) activation layer.
#[derive(Default)]
pub struct Tanh {
    input_cache: Option<Tensor>,
    last_shape: Option<Vec<usize>>,
}

impl Tanh {
    pub fn new() -> Self {
        Tanh::default()
    }
}

impl Layer for Tanh {
    elementwise_activation_layer_functions!(ElementwiseActivation::Tanh);
}
