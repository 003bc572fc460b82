use std::path::PathBuf;

/// Errors raised while turning image bytes into a prediction.
///
/// None of these reach an HTTP client directly: the classifier absorbs them
/// into an estimated fallback prediction.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Unexpected model output: {0}")]
    Shape(String),

    #[error("Model runtime error: {0}")]
    Runtime(String),
}

/// Errors raised while loading the model artifact.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Model file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load model from {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

impl InferenceError {
    pub fn runtime(err: impl std::fmt::Display) -> Self {
        Self::Runtime(err.to_string())
    }
}
