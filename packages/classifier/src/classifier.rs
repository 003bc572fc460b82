use crate::error::InferenceError;
use crate::fallback::{FallbackReason, fallback_prediction};
use crate::labels::{NUM_CLASSES, label_at};
use crate::model::{ClassificationModel, ModelHandle};
use crate::prediction::{Prediction, to_percentage};
use crate::preprocess::preprocess;
use ndarray::{ArrayD, Axis};
use rand::Rng;
use std::path::Path;

/// Turns uploaded image bytes into a [`Prediction`].
///
/// Never fails: a missing model or an inference error degrades into a random
/// fallback prediction so the endpoint keeps answering.
#[derive(Clone, Debug)]
pub struct Classifier {
    model: ModelHandle,
}

impl Classifier {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::new(ModelHandle::load(path))
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn classify(&self, image_bytes: &[u8]) -> Prediction {
        self.classify_with_rng(image_bytes, &mut rand::rng())
    }

    pub fn classify_with_rng<R: Rng + ?Sized>(&self, image_bytes: &[u8], rng: &mut R) -> Prediction {
        let model = match &self.model {
            ModelHandle::Loaded(model) => model,
            ModelHandle::Unavailable { .. } => {
                tracing::info!("Model not loaded, using fallback prediction.");
                return fallback_prediction(FallbackReason::ModelUnavailable, rng);
            }
        };

        match infer(model.as_ref(), image_bytes) {
            Ok(prediction) => prediction,
            Err(e) => {
                tracing::warn!("Error during prediction: {}", e);
                fallback_prediction(FallbackReason::InferenceFailed, rng)
            }
        }
    }
}

/// Runs the real inference path without any fallback.
pub fn infer(
    model: &dyn ClassificationModel,
    image_bytes: &[u8],
) -> Result<Prediction, InferenceError> {
    let input = preprocess(image_bytes)?;
    let outputs = model.run(input)?;
    let scores = outputs
        .into_iter()
        .next()
        .ok_or_else(|| InferenceError::Shape("model produced no outputs".to_string()))?;

    let (index, score) = top_class(&scores)?;
    let classes = scores.shape().last().copied().unwrap_or_default();
    if classes > NUM_CLASSES {
        return Err(InferenceError::Shape(format!(
            "model emits {classes} classes but only {NUM_CLASSES} labels are known"
        )));
    }
    let label = label_at(index).ok_or_else(|| {
        InferenceError::Shape(format!("class index {index} has no label"))
    })?;

    Ok(Prediction::Real {
        label: label.to_string(),
        confidence: to_percentage(score),
    })
}

/// Index and value of the highest score in the first row of `scores`.
///
/// Accepts `[batch, classes]` or a bare `[classes]` vector. Ties resolve to the
/// lowest index.
pub fn top_class(scores: &ArrayD<f32>) -> Result<(usize, f32), InferenceError> {
    let row = match scores.ndim() {
        1 => scores.view(),
        2 if scores.shape()[0] > 0 => scores.index_axis(Axis(0), 0),
        _ => {
            return Err(InferenceError::Shape(format!(
                "expected [1, classes] output, got {:?}",
                scores.shape()
            )));
        }
    };

    let mut best_idx = 0usize;
    let mut best_score = f32::NEG_INFINITY;
    for (i, v) in row.iter().enumerate() {
        if *v > best_score {
            best_idx = i;
            best_score = *v;
        }
    }

    if !best_score.is_finite() {
        return Err(InferenceError::Shape(format!(
            "no finite score in output of shape {:?}",
            scores.shape()
        )));
    }
    Ok((best_idx, best_score))
}
