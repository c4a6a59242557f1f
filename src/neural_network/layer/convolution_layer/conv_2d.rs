use super::super::helper_function::{
    convolve2d_full, correlate2d_valid, format_shape, forward_not_run, validate_grad_shape,
    validate_input_shape,
};
use super::*;
use crate::neural_network::neural_network_trait::ApplyWeights;
use ndarray::{Array, ArrayViewMut, Dimension, Ix3, RemoveAxis};
use rayon::prelude::*;

/// Threshold for deciding when to use parallel computation in Conv2D operations.
/// If filters * channels * output_area * kernel_area < threshold, use sequential processing.
/// Otherwise, use parallel processing with Rayon.
const CONV_2D_PARALLEL_THRESHOLD: usize = 10000;

/// A 2D convolutional layer operating on one sample at a time.
///
/// The forward pass is a valid (unpadded, stride 1) cross-correlation of every input channel
/// with the matching kernel slice, summed over channels, plus a bias that has one entry per
/// output element:
///
/// `Y[f] = B[f] + Σ_c correlate_valid(X[c], K[f, c])`
///
/// # Fields
///
/// - `filters` - Number of convolution filters (output channels)
/// - `kernel_size` - Size of the convolution kernel as (height, width)
/// - `input_shape` - Per-sample input shape \[channels, height, width\]
/// - `output_shape` - Per-sample output shape \[filters, height - kh + 1, width - kw + 1\]
/// - `weights` - Filters with shape \[filters, channels, kernel_height, kernel_width\]
/// - `bias` - Biases with the output shape
/// - `input_cache` - Input of the last forward pass, consumed by backward
///
/// # Example
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::{Array3, Array4};
///
/// let mut conv = Conv2D::new(1, (2, 2), vec![1, 3, 3]).unwrap();
/// conv.set_weights(Array4::ones((1, 1, 2, 2)), Array3::zeros((1, 2, 2)))
///     .unwrap();
///
/// let output = conv.forward(&Array3::ones((1, 3, 3)).into_dyn()).unwrap();
/// assert_eq!(output, Array3::from_elem((1, 2, 2), 4.0).into_dyn());
/// ```
pub struct Conv2D {
    filters: usize,
    kernel_size: (usize, usize),
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
    weights: Array4<f64>,
    bias: Array3<f64>,
    input_cache: Option<Array3<f64>>,
}

impl Conv2D {
    /// Creates a new 2D convolutional layer with standard-normal filters and biases.
    ///
    /// # Parameters
    ///
    /// - `filters` - Number of convolution filters (output channels)
    /// - `kernel_size` - Size of the convolution kernel as (height, width)
    /// - `input_shape` - Per-sample input shape \[channels, height, width\]
    ///
    /// # Returns
    ///
    /// - `Ok(Conv2D)` - A new layer instance
    /// - `Err(ModelError::InputValidationError)` - If the configuration is invalid or the kernel
    ///   does not fit inside the input
    pub fn new(
        filters: usize,
        kernel_size: (usize, usize),
        input_shape: Vec<usize>,
    ) -> Result<Self, ModelError> {
        Self::new_with_rng(filters, kernel_size, input_shape, &mut rand::rng())
    }

    /// Creates a new 2D convolutional layer drawing its initial parameters from `rng`.
    pub fn new_with_rng<R: Rng + ?Sized>(
        filters: usize,
        kernel_size: (usize, usize),
        input_shape: Vec<usize>,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        validate_filters(filters)?;
        validate_kernel_size_2d(kernel_size)?;
        validate_input_shape_2d(&input_shape, kernel_size)?;

        let channels = input_shape[0];
        let output_shape = vec![
            filters,
            input_shape[1] - kernel_size.0 + 1,
            input_shape[2] - kernel_size.1 + 1,
        ];

        let weights = Array4::from_shape_simple_fn(
            (filters, channels, kernel_size.0, kernel_size.1),
            || rng.sample(StandardNormal),
        );
        let bias = Array3::from_shape_simple_fn(
            (output_shape[0], output_shape[1], output_shape[2]),
            || rng.sample(StandardNormal),
        );

        Ok(Conv2D {
            filters,
            kernel_size,
            input_shape,
            output_shape,
            weights,
            bias,
            input_cache: None,
        })
    }

    /// Sets the filters and biases for this layer.
    ///
    /// # Parameters
    ///
    /// - `weights` - Filters with shape \[filters, channels, kernel_height, kernel_width\]
    /// - `bias` - Biases with shape \[filters, output_height, output_width\]
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If either array has the wrong shape
    pub fn set_weights(&mut self, weights: Array4<f64>, bias: Array3<f64>) -> Result<(), ModelError> {
        validate_input_shape(weights.shape(), self.weights.shape(), "Conv2D weights")?;
        validate_input_shape(bias.shape(), &self.output_shape, "Conv2D bias")?;

        self.weights = weights;
        self.bias = bias;
        Ok(())
    }

    /// Filters with shape \[filters, channels, kernel_height, kernel_width\].
    pub fn weights(&self) -> &Array4<f64> {
        &self.weights
    }

    /// Biases with shape \[filters, output_height, output_width\].
    pub fn bias(&self) -> &Array3<f64> {
        &self.bias
    }

    pub fn filters(&self) -> usize {
        self.filters
    }

    pub fn kernel_size(&self) -> (usize, usize) {
        self.kernel_size
    }

    fn channels(&self) -> usize {
        self.input_shape[0]
    }

    fn use_parallel(&self) -> bool {
        let workload = self.filters
            * self.channels()
            * self.output_shape[1]
            * self.output_shape[2]
            * self.kernel_size.0
            * self.kernel_size.1;
        workload >= CONV_2D_PARALLEL_THRESHOLD
    }
}

/// Runs `op` on every sub-view along axis 0, on the rayon pool when `parallel` is set.
///
/// Each sub-view is written by exactly one call, so the result does not depend on scheduling.
fn for_each_outer<D, F>(array: &mut Array<f64, D>, parallel: bool, op: F)
where
    D: Dimension + RemoveAxis,
    F: Fn(usize, ArrayViewMut<'_, f64, D::Smaller>) + Sync + Send,
{
    if parallel {
        array
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(index, view)| op(index, view));
    } else {
        array
            .axis_iter_mut(Axis(0))
            .enumerate()
            .for_each(|(index, view)| op(index, view));
    }
}

impl Layer for Conv2D {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        validate_input_shape(input.shape(), &self.input_shape, "Conv2D")?;

        let input_3d = input
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?
            .to_owned();

        let mut output = self.bias.clone();
        for_each_outer(&mut output, self.use_parallel(), |f, mut plane| {
            for c in 0..self.channels() {
                plane += &correlate2d_valid(
                    input_3d.index_axis(Axis(0), c),
                    self.weights.slice(s![f, c, .., ..]),
                );
            }
        });

        self.input_cache = Some(input_3d);
        Ok(output.into_dyn())
    }

    fn backward(&mut self, grad_output: &Tensor, learning_rate: f64) -> Result<Tensor, ModelError> {
        if self.input_cache.is_none() {
            return Err(forward_not_run("Conv2D"));
        }
        validate_grad_shape(grad_output.shape(), &self.output_shape, "Conv2D")?;
        let input = self.input_cache.take().ok_or_else(|| forward_not_run("Conv2D"))?;

        let grad = grad_output
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;

        let parallel = self.use_parallel();

        // dK[f][c] = correlate_valid(X[c], dY[f])
        let mut weight_grads = Array4::zeros(self.weights.raw_dim());
        for_each_outer(&mut weight_grads, parallel, |f, mut filter_grad| {
            for c in 0..self.channels() {
                filter_grad.index_axis_mut(Axis(0), c).assign(&correlate2d_valid(
                    input.index_axis(Axis(0), c),
                    grad.index_axis(Axis(0), f),
                ));
            }
        });

        // dX[c] = Σ_f convolve_full(dY[f], K[f][c]), with the filters before the update
        let mut input_grads = Array3::zeros(input.raw_dim());
        for_each_outer(&mut input_grads, parallel, |c, mut channel_grad| {
            for f in 0..self.filters {
                channel_grad += &convolve2d_full(
                    grad.index_axis(Axis(0), f),
                    self.weights.slice(s![f, c, .., ..]),
                );
            }
        });

        self.weights.scaled_add(-learning_rate, &weight_grads);
        self.bias.scaled_add(-learning_rate, &grad);

        Ok(input_grads.into_dyn())
    }

    fn layer_type(&self) -> &str {
        "Conv2D"
    }

    fn output_shape(&self) -> String {
        format_shape(&self.output_shape)
    }

    fn param_count(&self) -> TrainingParameters {
        TrainingParameters::Trainable(self.weights.len() + self.bias.len())
    }

    fn get_weights(&self) -> LayerWeight<'_> {
        LayerWeight::Conv2D(Conv2DLayerWeight {
            weight: &self.weights,
            bias: &self.bias,
        })
    }

    fn load_weights(&mut self, weights: &SerializableLayerWeight) -> Result<(), IoError> {
        match weights {
            SerializableLayerWeight::Conv2D(w) => w.apply_to_layer(self),
            other => Err(IoError::invalid_data(format!(
                "Expected Conv2D weights but got {}",
                other.kind()
            ))),
        }
    }
}
