use super::super::helper_function::{
    format_shape, forward_not_run, validate_all_dims_positive, validate_grad_shape,
    validate_input_shape,
};
use super::*;
use ndarray::{Array3, ArrayView2, ArrayViewMut2, Axis, Ix3, s};
use rayon::prelude::*;

/// Threshold for deciding between parallel and sequential execution.
/// When channels >= this threshold, channels are processed in parallel.
const MAX_POOLING_2D_PARALLEL_THRESHOLD: usize = 32;

/// 2D max pooling layer with non-overlapping windows.
///
/// Input tensor shape: `[channels, height, width]`. Output tensor shape:
/// `[channels, height / pool_h, width / pool_w]`; trailing rows and columns that do not
/// fill a complete window are dropped.
///
/// The forward pass records a selection mask with a single `1` at the position of each
/// window's maximum (the first one in row-major order on ties). The backward pass routes each
/// output gradient entirely to that position; every other input position receives zero.
///
/// # Fields
///
/// - `pool_size` - Size of the pooling window as (height, width)
/// - `input_shape` - Per-sample input shape
/// - `output_shape` - Per-sample output shape
/// - `selection_cache` - Selection mask from the forward pass, consumed by backward
///
/// # Examples
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::array;
///
/// let mut pool = MaxPooling2D::new((2, 2), vec![1, 2, 2]).unwrap();
/// let output = pool
///     .forward(&array![[[1.0, 3.0], [2.0, 0.5]]].into_dyn())
///     .unwrap();
/// assert_eq!(output, array![[[3.0]]].into_dyn());
/// ```
pub struct MaxPooling2D {
    pool_size: (usize, usize),
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
    selection_cache: Option<Array3<f64>>,
}

impl MaxPooling2D {
    /// Creates a new 2D max pooling layer.
    ///
    /// # Parameters
    ///
    /// - `pool_size` - Size of the pooling window as (height, width)
    /// - `input_shape` - Per-sample input shape \[channels, height, width\]
    ///
    /// # Returns
    ///
    /// - `Ok(MaxPooling2D)` - A new layer instance
    /// - `Err(ModelError::InputValidationError)` - If the shape is not 3D, has a zero dimension,
    ///   or the window does not fit inside the input
    pub fn new(pool_size: (usize, usize), input_shape: Vec<usize>) -> Result<Self, ModelError> {
        validate_input_shape_dims(&input_shape, 3, "MaxPooling2D")?;
        validate_all_dims_positive(&input_shape, "MaxPooling2D")?;
        validate_pool_size_2d(pool_size, &input_shape)?;

        let output_shape = calculate_output_shape_2d_pooling(&input_shape, pool_size);

        Ok(MaxPooling2D {
            pool_size,
            input_shape,
            output_shape,
            selection_cache: None,
        })
    }

    /// Pools one channel, writing the window maxima to `output` and the argmax mask to `selection`.
    fn pool_channel(
        &self,
        input: ArrayView2<f64>,
        mut output: ArrayViewMut2<f64>,
        mut selection: ArrayViewMut2<f64>,
    ) {
        let (pool_h, pool_w) = self.pool_size;

        for i in 0..self.output_shape[1] {
            for j in 0..self.output_shape[2] {
                let row = i * pool_h;
                let col = j * pool_w;

                let mut best = (row, col);
                let mut best_val = input[[row, col]];
                for r in row..row + pool_h {
                    for c in col..col + pool_w {
                        if input[[r, c]] > best_val {
                            best_val = input[[r, c]];
                            best = (r, c);
                        }
                    }
                }

                output[[i, j]] = best_val;
                selection[[best.0, best.1]] = 1.0;
            }
        }
    }

    /// Routes one channel's output gradient back through its selection mask.
    fn unpool_channel(
        &self,
        grad: ArrayView2<f64>,
        selection: ArrayView2<f64>,
        mut grad_input: ArrayViewMut2<f64>,
    ) {
        let (pool_h, pool_w) = self.pool_size;

        for i in 0..self.output_shape[1] {
            for j in 0..self.output_shape[2] {
                let window = s![i * pool_h..(i + 1) * pool_h, j * pool_w..(j + 1) * pool_w];
                let g = grad[[i, j]];
                grad_input
                    .slice_mut(&window)
                    .zip_mut_with(&selection.slice(&window), |dst, &mask| *dst = mask * g);
            }
        }
    }
}

impl Layer for MaxPooling2D {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        validate_input_shape(input.shape(), &self.input_shape, "MaxPooling2D")?;

        let input_3d = input
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;

        let mut output = Array3::zeros((
            self.output_shape[0],
            self.output_shape[1],
            self.output_shape[2],
        ));
        let mut selection = Array3::zeros(input_3d.raw_dim());

        let channels = output
            .axis_iter_mut(Axis(0))
            .zip(selection.axis_iter_mut(Axis(0)))
            .zip(input_3d.axis_iter(Axis(0)));

        if self.input_shape[0] >= MAX_POOLING_2D_PARALLEL_THRESHOLD {
            channels
                .collect::<Vec<_>>()
                .into_par_iter()
                .for_each(|((out, sel), inp)| self.pool_channel(inp, out, sel));
        } else {
            channels.for_each(|((out, sel), inp)| self.pool_channel(inp, out, sel));
        }

        self.selection_cache = Some(selection);
        Ok(output.into_dyn())
    }

    fn backward(&mut self, grad_output: &Tensor, _learning_rate: f64) -> Result<Tensor, ModelError> {
        if self.selection_cache.is_none() {
            return Err(forward_not_run("MaxPooling2D"));
        }
        validate_grad_shape(grad_output.shape(), &self.output_shape, "MaxPooling2D")?;
        let selection = self
            .selection_cache
            .take()
            .ok_or_else(|| forward_not_run("MaxPooling2D"))?;

        let grad = grad_output
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;

        let mut grad_input = Array3::zeros(selection.raw_dim());

        let channels = grad_input
            .axis_iter_mut(Axis(0))
            .zip(selection.axis_iter(Axis(0)))
            .zip(grad.axis_iter(Axis(0)));

        if self.input_shape[0] >= MAX_POOLING_2D_PARALLEL_THRESHOLD {
            channels
                .collect::<Vec<_>>()
                .into_par_iter()
                .for_each(|((dst, sel), g)| self.unpool_channel(g, sel, dst));
        } else {
            channels.for_each(|((dst, sel), g)| self.unpool_channel(g, sel, dst));
        }

        Ok(grad_input.into_dyn())
    }

    fn layer_type(&self) -> &str {
        "MaxPooling2D"
    }

    fn output_shape(&self) -> String {
        format_shape(&self.output_shape)
    }
}
