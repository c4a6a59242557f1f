use super::*;
use crate::error::IoError;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{from_reader, to_writer_pretty};
use std::fs::File;
use std::io::{BufWriter, Write};

/// A Sequential neural network model trained one sample at a time.
///
/// Layers are stacked in a linear fashion: each layer feeds its output to the next one, and
/// during training the loss gradient flows back through the layers in reverse order, with
/// every parametric layer applying its own gradient descent step as it goes.
///
/// # Fields
///
/// - `layers` - A vector containing all the layers in the model. Each layer implements
///   the `Layer` trait and is stored as a boxed dynamic trait object that exclusively
///   owns its parameters.
/// - `loss` - An optional loss function used to compute the training loss and its gradient.
///
/// # Example
/// ```rust
/// use minnet::prelude::*;
/// use ndarray::Array;
///
/// // Ten samples of 4 features with one-hot targets over 3 classes
/// let x: Vec<Tensor> = (0..10)
///     .map(|i| Array::from_elem((4, 1), i as f64 / 10.0).into_dyn())
///     .collect();
/// let y: Vec<Tensor> = (0..10)
///     .map(|i| {
///         let mut t = Array::zeros((3, 1));
///         t[[i % 3, 0]] = 1.0;
///         t.into_dyn()
///     })
///     .collect();
///
/// let mut model = Sequential::new();
/// model
///     .add(Dense::new(4, 8).unwrap())
///     .add(Tanh::new())
///     .add(Dense::new(8, 3).unwrap())
///     .add(Softmax::new())
///     .compile(CategoricalCrossEntropy::new());
///
/// model.summary();
///
/// let config = TrainConfig::new(5, 0.05)
///     .unwrap()
///     .with_validation_split(0.2)
///     .unwrap()
///     .with_verbose(false);
/// let history = model.fit(&x, &y, &config).unwrap();
/// assert_eq!(history.val_losses().len(), 5);
///
/// let class = model.predict_class(&x[0]).unwrap();
/// assert!(class < 3);
/// ```
#[derive(Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
    loss: Option<Box<dyn LossFunction>>,
}

/// Runs `input` through every layer in order.
fn forward_pass(layers: &mut [Box<dyn Layer>], input: &Tensor) -> Result<Tensor, ModelError> {
    let mut output = input.clone();
    for layer in layers.iter_mut() {
        output = layer.forward(&output)?;
    }
    Ok(output)
}

/// Threads `grad` back through the layers in reverse order, letting each update its parameters.
fn backward_pass(
    layers: &mut [Box<dyn Layer>],
    grad: Tensor,
    learning_rate: f64,
) -> Result<Tensor, ModelError> {
    let mut grad = grad;
    for layer in layers.iter_mut().rev() {
        grad = layer.backward(&grad, learning_rate)?;
    }
    Ok(grad)
}

fn set_training_mode(layers: &mut [Box<dyn Layer>], is_training: bool) {
    for layer in layers.iter_mut() {
        layer.set_training_if_mode_dependent(is_training);
    }
}

/// Average loss over `(x, y)` pairs in inference mode, without any parameter update.
fn average_loss(
    layers: &mut [Box<dyn Layer>],
    loss: &dyn LossFunction,
    x: &[Tensor],
    y: &[Tensor],
) -> Result<f64, ModelError> {
    set_training_mode(layers, false);

    let mut total = 0.0;
    for (input, label) in x.iter().zip(y) {
        let prediction = forward_pass(layers, input)?;
        total += loss.compute_loss(label, &prediction)?;
    }
    Ok(total / x.len() as f64)
}

/// Index of the largest element in row-major order, the first one on ties.
///
/// # Errors
///
/// Returns `ModelError::ProcessingError` if the tensor is empty or holds a NaN.
fn argmax(tensor: &Tensor) -> Result<usize, ModelError> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in tensor.iter().enumerate() {
        if value.is_nan() {
            return Err(ModelError::ProcessingError(format!(
                "Model produced NaN at output index {}",
                index
            )));
        }
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index).ok_or_else(|| {
        ModelError::ProcessingError("Model produced an empty output tensor".to_string())
    })
}

fn validate_pairs(x: &[Tensor], y: &[Tensor]) -> Result<(), ModelError> {
    if x.is_empty() {
        return Err(ModelError::InputValidationError(
            "Input samples cannot be empty".to_string(),
        ));
    }
    if x.len() != y.len() {
        return Err(ModelError::InputValidationError(format!(
            "Sample count mismatch: {} inputs, {} labels",
            x.len(),
            y.len()
        )));
    }
    Ok(())
}

impl Sequential {
    /// Creates a new empty Sequential model
    ///
    /// # Returns
    ///
    /// * `Sequential` - an empty Sequential model
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            loss: None,
        }
    }

    /// Adds a layer to the model
    ///
    /// Supports method chaining pattern
    ///
    /// # Parameters
    ///
    /// * `layer` - The layer to add to the model
    ///
    /// # Returns
    ///
    /// * `&mut Sequential` - Mutable reference to self for method chaining
    pub fn add<L: 'static + Layer>(&mut self, layer: L) -> &mut Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Configures the loss function used by `fit` and `evaluate`
    ///
    /// # Parameters
    ///
    /// - `loss` - The loss function to use for training
    ///
    /// # Returns
    ///
    /// * `&mut Sequential` - Mutable reference to self for method chaining
    pub fn compile<LFunc>(&mut self, loss: LFunc) -> &mut Self
    where
        LFunc: 'static + LossFunction,
    {
        self.loss = Some(Box::new(loss));
        self
    }

    /// Number of layers in the model.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Validates the model state, the samples and the configuration before training
    fn validate_training_inputs(
        &self,
        x: &[Tensor],
        y: &[Tensor],
        config: &TrainConfig,
    ) -> Result<(), ModelError> {
        if self.loss.is_none() {
            return Err(ModelError::NotCompiled);
        }

        if self.layers.is_empty() {
            return Err(ModelError::InputValidationError(
                "Layers not specified".to_string(),
            ));
        }

        validate_pairs(x, y)?;
        config.validate()
    }

    /// Trains the model with online stochastic gradient descent
    ///
    /// Every training pair is run forward, its loss gradient is propagated backward, and each
    /// parametric layer updates itself before the next pair is processed. Pairs are visited
    /// in the order given.
    ///
    /// When `config.validation_split` is `Some(s)`, the leading `floor((1 - s) * n)` pairs are
    /// used for training and the trailing pairs are evaluated after every epoch in inference
    /// mode.
    ///
    /// # Parameters
    ///
    /// - `x` - Input samples
    /// - `y` - Labels, one per input, shaped as the compiled loss expects
    /// - `config` - Epoch count, learning rate, validation split and verbosity
    ///
    /// # Returns
    ///
    /// - `Ok(TrainingHistory)` - The average training (and validation) loss of every epoch
    /// - `Err(ModelError::NotCompiled)` - If `compile` has not been called
    /// - `Err(ModelError::InputValidationError)` - If the samples, the configuration or any
    ///   tensor shape is invalid
    pub fn fit(
        &mut self,
        x: &[Tensor],
        y: &[Tensor],
        config: &TrainConfig,
    ) -> Result<TrainingHistory, ModelError> {
        self.validate_training_inputs(x, y, config)?;

        let (x_train, y_train, validation) = match config.validation_split {
            Some(split) => {
                let train_size = ((1.0 - split) * x.len() as f64).floor() as usize;
                if train_size == 0 || train_size == x.len() {
                    return Err(ModelError::InputValidationError(format!(
                        "validation_split {} leaves an empty partition for {} samples",
                        split,
                        x.len()
                    )));
                }
                (
                    &x[..train_size],
                    &y[..train_size],
                    Some((&x[train_size..], &y[train_size..])),
                )
            }
            None => (x, y, None),
        };

        let loss = self.loss.as_deref().ok_or(ModelError::NotCompiled)?;
        let layers = &mut self.layers;

        let progress_bar = if config.verbose {
            ProgressBar::new(config.epochs as u64)
        } else {
            ProgressBar::hidden()
        };
        progress_bar.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | Loss: {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        let mut history = TrainingHistory::new();

        for epoch in 1..=config.epochs {
            set_training_mode(layers, true);

            let mut epoch_loss = 0.0;
            for (input, label) in x_train.iter().zip(y_train) {
                let prediction = forward_pass(layers, input)?;
                epoch_loss += loss.compute_loss(label, &prediction)?;

                let grad = loss.compute_grad(label, &prediction)?;
                backward_pass(layers, grad, config.learning_rate)?;
            }
            epoch_loss /= x_train.len() as f64;

            let val_loss = match validation {
                Some((x_val, y_val)) => Some(average_loss(layers, loss, x_val, y_val)?),
                None => None,
            };

            let summary = EpochSummary {
                epoch,
                loss: epoch_loss,
                val_loss,
            };
            if config.verbose {
                progress_bar.println(format_epoch_report(&summary, config.epochs));
            }
            progress_bar.set_message(format!("{:.6}", epoch_loss));
            progress_bar.inc(1);

            history.push(summary);
        }

        progress_bar.finish_with_message("Training completed");

        Ok(history)
    }

    /// Generates a prediction for one input sample
    ///
    /// Every mode-dependent layer is switched to inference mode first, so Dropout is the
    /// identity and repeated calls with the same input return the same output.
    ///
    /// # Parameters
    ///
    /// * `x` - Input sample shaped as the first layer expects
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - Output of the last layer
    /// - `Err(ModelError::InputValidationError)` - If the model has no layers or a shape does not match
    pub fn predict(&mut self, x: &Tensor) -> Result<Tensor, ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::InputValidationError(
                "Layers not specified".to_string(),
            ));
        }

        set_training_mode(&mut self.layers, false);
        forward_pass(&mut self.layers, x)
    }

    /// Predicts the class of one input sample as the index of the largest output element
    ///
    /// A NaN anywhere in the output is a `ModelError::ProcessingError`.
    pub fn predict_class(&mut self, x: &Tensor) -> Result<usize, ModelError> {
        let output = self.predict(x)?;
        argmax(&output)
    }

    /// Average loss over a set of samples, computed in inference mode without updating any
    /// parameter
    ///
    /// # Errors
    ///
    /// - `ModelError::NotCompiled` - If `compile` has not been called
    /// - `ModelError::InputValidationError` - If the sets are empty, differ in length, or a shape does not match
    pub fn evaluate(&mut self, x: &[Tensor], y: &[Tensor]) -> Result<f64, ModelError> {
        let loss = self.loss.as_deref().ok_or(ModelError::NotCompiled)?;
        validate_pairs(x, y)?;

        average_loss(&mut self.layers, loss, x, y)
    }

    /// Fraction of samples whose predicted class equals the given class index
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If the sets are empty, differ in length, or a shape does not match
    pub fn accuracy(&mut self, x: &[Tensor], classes: &[usize]) -> Result<f64, ModelError> {
        if x.is_empty() {
            return Err(ModelError::InputValidationError(
                "Input samples cannot be empty".to_string(),
            ));
        }
        if x.len() != classes.len() {
            return Err(ModelError::InputValidationError(format!(
                "Sample count mismatch: {} inputs, {} class labels",
                x.len(),
                classes.len()
            )));
        }

        let mut correct = 0usize;
        for (input, &class) in x.iter().zip(classes) {
            if self.predict_class(input)? == class {
                correct += 1;
            }
        }
        Ok(correct as f64 / x.len() as f64)
    }

    /// Prints a summary of the model's structure
    ///
    /// Displays each layer's information and parameter statistics in a tabular format
    pub fn summary(&self) {
        let col1_width = 33;
        let col2_width = 24;
        let col3_width = 15;
        println!("Model: \"sequential\"");
        println!(
            "┏{}┳{}┳{}┓",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width)
        );
        println!(
            "┃ {:<31} ┃ {:<22} ┃ {:>13} ┃",
            "Layer (type)", "Output Shape", "Param #"
        );
        println!(
            "┡{}╇{}╇{}┩",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width)
        );

        let mut trainable_param_count: usize = 0;
        let mut non_trainable_param_count: usize = 0;

        for (i, layer) in self.layers.iter().enumerate() {
            let layer_name = if i == 0 {
                "Layer".to_string()
            } else {
                format!("Layer_{}", i)
            };

            let param_count_num = match layer.param_count() {
                TrainingParameters::Trainable(count) => {
                    trainable_param_count += count;
                    count
                }
                TrainingParameters::NonTrainable(count) => {
                    non_trainable_param_count += count;
                    count
                }
                TrainingParameters::NoTrainable => 0,
            };

            println!(
                "│ {:<31} │ {:<22} │ {:>13} │",
                format!("{} ({})", layer_name, layer.layer_type()),
                layer.output_shape(),
                param_count_num
            );
        }
        println!(
            "└{}┴{}┴{}┘",
            "─".repeat(col1_width),
            "─".repeat(col2_width),
            "─".repeat(col3_width)
        );

        let param_bytes = std::mem::size_of::<f64>();
        let total_params = trainable_param_count + non_trainable_param_count;
        println!(
            " Total params: {} ({} B)",
            total_params,
            total_params * param_bytes
        );
        println!(
            " Trainable params: {} ({} B)",
            trainable_param_count,
            trainable_param_count * param_bytes
        );
        println!(
            " Non-trainable params: {} ({} B)",
            non_trainable_param_count,
            non_trainable_param_count * param_bytes
        );
    }

    /// Returns all the weights from each layer in the model.
    ///
    /// # Returns
    ///
    /// * `Vec<LayerWeight>` - One entry per layer, in order:
    ///   - `LayerWeight::Dense` for Dense layers with weight and bias
    ///   - `LayerWeight::Conv2D` for Conv2D layers with filters and biases
    ///   - `LayerWeight::Empty` for layers without parameters
    pub fn get_weights(&self) -> Vec<LayerWeight<'_>> {
        self.layers.iter().map(|layer| layer.get_weights()).collect()
    }

    /// Saves every layer's raw parameter arrays, with its type and output shape, to a JSON file.
    ///
    /// The loss function is not saved, and neither is the layer configuration: the loading side
    /// rebuilds the same layer stack and calls `load_from_path`.
    ///
    /// # Parameters
    ///
    /// * `path` - File path where the weights will be saved (e.g., "stored_model.json")
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Weights successfully saved to file
    /// - `Err(IoError::StdIoError)` - File creation or write operation failed
    /// - `Err(IoError::JsonError)` - Serialization to JSON failed
    pub fn save_to_path(&self, path: &str) -> Result<(), IoError> {
        let serializable_layers = self
            .layers
            .iter()
            .map(|layer| SerializableLayer {
                info: LayerInfo {
                    layer_type: layer.layer_type().to_string(),
                    output_shape: layer.output_shape(),
                },
                weights: SerializableLayerWeight::from_layer_weight(&layer.get_weights()),
            })
            .collect();

        let serializable_model = SerializableSequential {
            layers: serializable_layers,
        };

        let file = File::create(path).map_err(IoError::StdIoError)?;
        let mut writer = BufWriter::new(file);

        to_writer_pretty(&mut writer, &serializable_model).map_err(IoError::JsonError)?;
        writer.flush().map_err(IoError::StdIoError)?;

        Ok(())
    }

    /// Loads weights saved by `save_to_path` into the current model.
    ///
    /// The current model must have the same architecture (same number, types and shapes of
    /// layers) as the saved model. On any error the model keeps the weights it had before the call.
    ///
    /// # Parameters
    ///
    /// * `path` - File path from which to load the weights (e.g., "stored_model.json")
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Successfully loaded weights into the model
    /// - `Err(IoError::StdIoError)` - File not found, or the saved layers do not match the model
    /// - `Err(IoError::JsonError)` - Deserialization from JSON failed
    pub fn load_from_path(&mut self, path: &str) -> Result<(), IoError> {
        let reader = IoError::load_in_buf_reader(path)?;
        let serializable_model: SerializableSequential =
            from_reader(reader).map_err(IoError::JsonError)?;

        if serializable_model.layers.len() != self.layers.len() {
            return Err(IoError::invalid_data(format!(
                "Layer count mismatch: model has {} layers, file has {} layers",
                self.layers.len(),
                serializable_model.layers.len()
            )));
        }

        for (i, (layer, saved)) in self.layers.iter().zip(&serializable_model.layers).enumerate() {
            if layer.layer_type() != saved.info.layer_type {
                return Err(IoError::invalid_data(format!(
                    "Layer {} type mismatch: model has {}, file has {}",
                    i,
                    layer.layer_type(),
                    saved.info.layer_type
                )));
            }
        }

        // Array shapes are only checked while applying, so keep the current weights to roll back to
        let current: Vec<SerializableLayerWeight> = self
            .layers
            .iter()
            .map(|layer| SerializableLayerWeight::from_layer_weight(&layer.get_weights()))
            .collect();

        let applied = self
            .layers
            .iter_mut()
            .zip(&serializable_model.layers)
            .try_for_each(|(layer, saved)| layer.load_weights(&saved.weights));

        if let Err(err) = applied {
            for (layer, weights) in self.layers.iter_mut().zip(&current) {
                layer.load_weights(weights)?;
            }
            return Err(err);
        }

        Ok(())
    }
}
