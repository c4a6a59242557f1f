use std::fs::File;
use std::io::BufReader;

/// Error types that can occur during model operations
///
/// # Variants
///
/// - `NotCompiled` - Indicates that the model has no loss function configured yet
/// - `InputValidationError` - indicates the input data or layer configuration does not meet the expected shape, range, or validation rules
/// - `ProcessingError` - indicates that there is something wrong while processing, such as calling backward before forward
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    NotCompiled,
    InputValidationError(String),
    ProcessingError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::NotCompiled => {
                write!(
                    f,
                    "Model has not been compiled. Call `compile` with a loss function before training."
                )
            }
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

/// Input/Output error types that can occur during weight persistence and config loading
///
/// # Variants
///
/// - `StdIoError` - Wraps standard I/O errors from file system operations, and invalid data found while decoding
/// - `JsonError` - Wraps JSON serialization/deserialization errors
#[derive(Debug)]
pub enum IoError {
    StdIoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl IoError {
    pub fn load_in_buf_reader(path: &str) -> Result<BufReader<File>, IoError> {
        let file = File::open(path).map_err(IoError::StdIoError)?;
        Ok(BufReader::new(file))
    }

    /// Wraps a message describing malformed content as an `InvalidData` I/O error.
    pub fn invalid_data(msg: impl Into<String>) -> IoError {
        IoError::StdIoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            msg.into(),
        ))
    }
}

impl From<ModelError> for IoError {
    fn from(err: ModelError) -> Self {
        IoError::invalid_data(err.to_string())
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::StdIoError(e) => write!(f, "IO error: {}", e),
            IoError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for IoError {}
