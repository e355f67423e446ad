use thiserror::Error;

/// Errors raised at the edges of the engine: loading configuration and
/// reading predictions. Reconciliation itself never fails.
#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (negative or non-finite tolerance, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Prediction text is not valid JSON.
    #[error("prediction parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error (file read, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
