/// # Crop Disease Classifier
/// Image preprocessing, model inference and fallback predictions
pub mod classifier;
pub mod error;
/// Random predictions used when the model is missing or fails
pub mod fallback;
/// ONNX model metadata for operator tooling
pub mod inspect;
pub mod labels;
pub mod model;
pub mod prediction;
pub mod preprocess;

pub use classifier::Classifier;
pub use error::InferenceError;
pub use labels::{CLASS_NAMES, NUM_CLASSES};
pub use model::{ClassificationModel, ModelHandle, OnnxModel};
pub use prediction::Prediction;

/// Default location of the model artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "model/crop_disease_model.onnx";
