/// Error types shared across the crate.
///
/// - `ModelError` - configuration, shape and processing failures of layers, losses and models
/// - `IoError` - failures while saving or loading weights and training configurations
pub mod error;

pub use error::{IoError, ModelError};

/// Components for building and training small neural networks one sample at a time.
///
/// # Core Components
///
/// ## Layer Types
/// - **Dense**: Fully connected layer `W · x + b` over column vectors
/// - **Conv2D**: Valid (unpadded) 2D cross-correlation over `[channels, height, width]` inputs
/// - **MaxPooling2D**: Non-overlapping max pooling with argmax gradient routing
/// - **Flatten / Reshape**: Pure shape transforms
/// - **Dropout**: Bernoulli masking during training, identity during inference
/// - **Activation**: Standalone activation layers (ReLU, Sigmoid, Tanh, Softmax)
///
/// ## Loss Functions
/// - **MeanSquaredError**: For regression and one-hot targets
/// - **BinaryCrossEntropy**: For independent binary targets
/// - **CategoricalCrossEntropy**: For one-hot multi-class targets
/// - **SparseCategoricalCrossEntropy**: For integer class index targets
///
/// ## Model Architecture
/// - **Sequential**: Linear stack of layers trained with online stochastic gradient descent
/// - **TrainConfig**: Epoch count, learning rate, validation split and verbosity
/// - **Tensor**: Type alias for n-dimensional `f64` arrays used throughout the framework
///
/// # Examples
/// ```rust
/// use minnet::neural_network::*;
/// use ndarray::array;
///
/// // XOR-style truth table as column vectors
/// let x: Vec<Tensor> = vec![
///     array![[0.0], [0.0]].into_dyn(),
///     array![[0.0], [1.0]].into_dyn(),
///     array![[1.0], [0.0]].into_dyn(),
///     array![[1.0], [1.0]].into_dyn(),
/// ];
/// let y: Vec<Tensor> = vec![
///     array![[0.0]].into_dyn(),
///     array![[1.0]].into_dyn(),
///     array![[1.0]].into_dyn(),
///     array![[0.0]].into_dyn(),
/// ];
///
/// let mut model = Sequential::new();
/// model
///     .add(Dense::new(2, 3).unwrap())
///     .add(Tanh::new())
///     .add(Dense::new(3, 1).unwrap())
///     .add(Tanh::new())
///     .compile(MeanSquaredError::new());
///
/// let config = TrainConfig::new(100, 0.1).unwrap().with_verbose(false);
/// let history = model.fit(&x, &y, &config).unwrap();
/// assert_eq!(history.len(), 100);
///
/// let prediction = model.predict(&x[1]).unwrap();
/// assert_eq!(prediction.shape(), &[1, 1]);
/// ```
pub mod neural_network;

/// A convenience module that re-exports the most commonly used types and traits from this crate.
///
/// # Examples
/// ```rust
/// use minnet::prelude::*;
///
/// let mut model = Sequential::new();
/// model.add(Flatten::new(vec![1, 4, 4]).unwrap());
/// ```
pub mod prelude;
