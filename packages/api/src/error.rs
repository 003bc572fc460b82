use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::backtrace::Backtrace;
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportPolicy {
    Ignore,
    Report,
}

/// Error returned by request handlers, rendered as `{"error": <message>}`.
///
/// Logged once when turned into a response: client errors at `warn`, reported
/// server faults at `error` with their cause chain and a backtrace.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    report_policy: ReportPolicy,
    detail: Option<String>,
}

impl ApiError {
    /// Client input problem, never reported as a server fault.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
            report_policy: ReportPolicy::Ignore,
            detail: None,
        }
    }

    fn internal(context: &str, err: &(dyn Error + 'static)) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            report_policy: ReportPolicy::Report,
            detail: Some(format!(
                "{context}: {}\nbacktrace:\n{}",
                error_chain(err),
                Backtrace::force_capture()
            )),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn log(&self) {
        match self.report_policy {
            ReportPolicy::Ignore => tracing::warn!("Bad request: {}", self.message),
            ReportPolicy::Report => tracing::error!(
                "{}",
                self.detail.as_deref().unwrap_or(&self.message)
            ),
        }
    }
}

/// `err` followed by each of its sources.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    std::iter::successors(Some(err), |&e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  caused by: ")
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (
            self.status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let mut api_err = Self::internal("Error reading upload", &err);
        api_err.message = err.body_text();
        api_err
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal("Inference task failed", &err)
    }
}
