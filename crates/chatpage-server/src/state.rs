use std::sync::Arc;

use chatpage_openai::generator::TextGenerator;

/// Shared application state, injected into all route handlers via Axum state.
///
/// `generator` is `None` when no provider credential was configured at
/// startup. The process still serves; each generation request then fails
/// with a configuration error.
#[derive(Clone)]
pub struct AppState {
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }
}
