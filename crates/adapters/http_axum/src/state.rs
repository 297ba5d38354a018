//! Shared application state for axum handlers.

use std::sync::Arc;

use globo_skill_app::ports::BridgeClient;
use globo_skill_app::services::directive_router::DirectiveRouter;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the bridge client does not need to be
/// `Clone`; only the `Arc` is cloned.
pub struct AppState<B> {
    /// Directive dispatcher.
    pub directive_router: Arc<DirectiveRouter<B>>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            directive_router: Arc::clone(&self.directive_router),
        }
    }
}

impl<B: BridgeClient + 'static> AppState<B> {
    /// Create a new application state from a directive router.
    pub fn new(directive_router: DirectiveRouter<B>) -> Self {
        Self {
            directive_router: Arc::new(directive_router),
        }
    }
}
