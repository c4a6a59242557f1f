use crate::error::{IoError, ModelError};
use serde::{Deserialize, Serialize};

/// Hyperparameters for `Sequential::fit`.
///
/// Parsed from JSON with serde; missing fields fall back to the defaults below.
///
/// # Fields
///
/// - `epochs` - Number of full passes over the training portion (default 1000)
/// - `learning_rate` - Gradient descent step size (default 0.01)
/// - `validation_split` - Fraction of trailing samples held out for validation (default none)
/// - `verbose` - Print one report line per epoch (default true)
///
/// # Example
///
/// ```json
/// {
///   "epochs": 20,
///   "learning_rate": 0.1,
///   "validation_split": 0.1,
///   "verbose": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub validation_split: Option<f64>,
    pub verbose: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 1000,
            learning_rate: 0.01,
            validation_split: None,
            verbose: true,
        }
    }
}

impl TrainConfig {
    /// Creates a configuration with the given epoch count and learning rate, no validation
    /// split and verbose output.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `epochs` is zero or `learning_rate` is not a
    ///   positive finite number
    pub fn new(epochs: usize, learning_rate: f64) -> Result<Self, ModelError> {
        let config = TrainConfig {
            epochs,
            learning_rate,
            ..TrainConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Holds out the trailing `split` fraction of the samples for validation.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `split` is not in the open interval (0, 1)
    pub fn with_validation_split(mut self, split: f64) -> Result<Self, ModelError> {
        self.validation_split = Some(split);
        self.validate()?;
        Ok(self)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - Describing the first invalid field
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.epochs == 0 {
            return Err(ModelError::InputValidationError(
                "epochs must be greater than 0".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ModelError::InputValidationError(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        if let Some(split) = self.validation_split {
            if !(split > 0.0 && split < 1.0) {
                return Err(ModelError::InputValidationError(format!(
                    "validation_split must be in the open interval (0, 1), got {}",
                    split
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// - `IoError::JsonError` - The text is not a valid configuration document
    /// - `IoError::StdIoError` - The parsed values fail validation
    pub fn from_json_str(json: &str) -> Result<Self, IoError> {
        let config: TrainConfig = serde_json::from_str(json).map_err(IoError::JsonError)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// - `IoError::StdIoError` - The file cannot be opened, or the values fail validation
    /// - `IoError::JsonError` - The file is not a valid configuration document
    pub fn load_from_path(path: &str) -> Result<Self, IoError> {
        let reader = IoError::load_in_buf_reader(path)?;
        let config: TrainConfig = serde_json::from_reader(reader).map_err(IoError::JsonError)?;
        config.validate()?;
        Ok(config)
    }
}
