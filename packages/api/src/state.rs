use cropdoc_classifier::Classifier;
use std::sync::Arc;

pub type AppState = Arc<State>;

/// Default cap on upload size accepted by `/predict`.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared, read-only request state. Built once at startup.
pub struct State {
    pub classifier: Arc<Classifier>,
    pub max_upload_bytes: usize,
}

impl State {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
