#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Model version not found: {model} version {version}")]
    ModelVersionNotFound { model: String, version: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
