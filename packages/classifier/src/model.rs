use crate::error::{InferenceError, LoadError};
use crate::preprocess::INPUT_SIZE;
use ndarray::{Array4, ArrayD, IxDyn};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

/// Anything that maps a `[1, 224, 224, 3]` image batch to class scores.
///
/// Implementations return every output tensor of the underlying graph; the
/// classifier reads the first one.
pub trait ClassificationModel: Send + Sync {
    fn run(&self, input: Array4<f32>) -> Result<Vec<ArrayD<f32>>, InferenceError>;
}

/// ONNX export of the crop disease model, optimized and ready to run.
pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let invalid = |e: TractError| LoadError::Invalid {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        };

        let side = INPUT_SIZE as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(invalid)?
            .with_input_fact(0, f32::fact([1, side, side, 3]).into())
            .map_err(invalid)?
            .into_optimized()
            .map_err(invalid)?
            .into_runnable()
            .map_err(invalid)?;

        Ok(Self { plan })
    }
}

impl ClassificationModel for OnnxModel {
    fn run(&self, input: Array4<f32>) -> Result<Vec<ArrayD<f32>>, InferenceError> {
        let shape = input.shape().to_vec();
        let data = input
            .as_slice()
            .ok_or_else(|| InferenceError::runtime("input tensor is not contiguous"))?;
        let tensor = Tensor::from_shape(&shape, data).map_err(InferenceError::runtime)?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(InferenceError::runtime)?;

        outputs
            .iter()
            .map(|value| {
                let values = value
                    .as_slice::<f32>()
                    .map_err(|e| InferenceError::Shape(format!("output is not f32: {e}")))?;
                ArrayD::from_shape_vec(IxDyn(value.shape()), values.to_vec())
                    .map_err(|e| InferenceError::Shape(e.to_string()))
            })
            .collect()
    }
}

/// The model as seen by request handlers: either loaded once at startup, or
/// permanently unavailable for the life of the process.
#[derive(Clone)]
pub enum ModelHandle {
    Loaded(Arc<dyn ClassificationModel>),
    Unavailable { reason: String },
}

impl ModelHandle {
    /// Attempts to load the ONNX artifact. Failure is logged and yields
    /// [`ModelHandle::Unavailable`]; there is no retry.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        tracing::info!("Loading model from {}...", path.display());
        match OnnxModel::load(path) {
            Ok(model) => {
                tracing::info!("Model loaded successfully!");
                Self::Loaded(Arc::new(model))
            }
            Err(e) => {
                tracing::error!("Model failed to load, predictions will use fallback: {}", e);
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn from_model(model: impl ClassificationModel + 'static) -> Self {
        Self::Loaded(Arc::new(model))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Loaded(_) => "loaded",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(_) => f.write_str("ModelHandle::Loaded"),
            Self::Unavailable { reason } => f
                .debug_struct("ModelHandle::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
