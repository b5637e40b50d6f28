use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::new(4, format!("Projection failed: {err}"))
    }
}

/// Failures of the pure growth model.
///
/// These are never replaced by a guessed rate; callers decide what to do.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("division by zero: historical value is 0")]
    DivisionByZero,

    #[error("growth rate undefined for current={current}, historical={historical}")]
    InvalidDomain { current: f64, historical: f64 },

    #[error("growth period must be at least one year")]
    InvalidPeriod,
}

/// A remote table could not be used. Always recovered with a fallback table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RetrievalFailure {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("malformed table: {0}")]
    Malformed(String),
}

/// The tagger produced nothing usable for one input text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaggerError {
    #[error("tagger request failed: {0}")]
    Transport(String),

    #[error("tagger request failed with status {0}")]
    Status(u16),

    #[error("failed to decode tagger response: {0}")]
    Decode(String),
}
