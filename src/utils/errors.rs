use thiserror::Error;

/// Application-level error type for GenFin
///
/// Generation failures are not represented here; they are flattened into
/// warning answers at the model boundary.
#[derive(Error, Debug)]
pub enum GenFinError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("UI error: {0}")]
    UIError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}
