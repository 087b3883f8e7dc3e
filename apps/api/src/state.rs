use std::sync::Arc;

use crate::scoring::AtsEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable scoring engine; shared across requests without locking.
    pub engine: Arc<AtsEngine>,
}
