use iris_model::{Classifier, ModelResult};
use std::sync::Arc;

pub type AppState = Arc<State>;

/// Shared, read-only service state.
///
/// The classifier is loaded once at startup and never swapped; handlers only
/// take shared references to it.
#[derive(Clone, Default)]
pub struct State {
    model: Option<Arc<dyn Classifier>>,
}

impl State {
    pub fn with_model(model: impl Classifier + 'static) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    pub fn without_model() -> Self {
        Self { model: None }
    }

    /// Keep the service up when the artifact can't be loaded; predictions
    /// will answer 503 until it is restarted with a valid model.
    pub fn from_load_result<M: Classifier + 'static>(result: ModelResult<M>) -> Self {
        match result {
            Ok(model) => {
                tracing::info!("Model loaded, prediction endpoint is ready");
                Self::with_model(model)
            }
            Err(e) => {
                tracing::error!("Starting without a model: {}", e);
                Self::without_model()
            }
        }
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.model.as_deref()
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("model_loaded", &self.model_loaded())
            .finish()
    }
}
