use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use cropdoc_classifier::Prediction;
use serde::{Deserialize, Serialize};

pub const NO_FILE_UPLOADED: &str = "No file uploaded!";
pub const NO_FILE_SELECTED: &str = "No file selected!";
pub const EMPTY_FILE: &str = "Uploaded file is empty!";

/// Form field carrying the image.
pub const FILE_FIELD: &str = "file";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictResponse {
    pub disease: String,
    pub confidence: f64,
}

impl From<&Prediction> for PredictResponse {
    fn from(prediction: &Prediction) -> Self {
        Self {
            disease: prediction.display_label(),
            confidence: prediction.confidence(),
        }
    }
}

#[tracing::instrument(name = "POST /predict", skip(state, multipart))]
pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let bytes = read_upload(multipart).await?;

    let classifier = state.classifier.clone();
    let prediction = tokio::task::spawn_blocking(move || classifier.classify(&bytes)).await?;

    tracing::info!("Prediction result: {}", prediction);
    metrics::counter!("predictions_total", "outcome" => prediction.kind()).increment(1);

    Ok(Json(PredictResponse::from(&prediction)))
}

/// Finds the first `file` part that carries a filename and checks it is usable.
///
/// A `file` part without filename metadata is a plain form value, not an upload.
async fn read_upload(multipart: Result<Multipart, MultipartRejection>) -> Result<Bytes, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Not a multipart upload: {}", rejection.body_text());
        ApiError::bad_request(NO_FILE_UPLOADED)
    })?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(ApiError::bad_request(NO_FILE_SELECTED));
        }
        tracing::info!("Received prediction request for: {}", file_name);

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::bad_request(EMPTY_FILE));
        }
        return Ok(bytes);
    }

    Err(ApiError::bad_request(NO_FILE_UPLOADED))
}
