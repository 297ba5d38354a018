//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod directives;

use axum::Router;
use axum::routing::post;

use globo_skill_app::ports::BridgeClient;

use crate::state::AppState;

/// Build the directive sub-router.
pub fn routes<B>() -> Router<AppState<B>>
where
    B: BridgeClient + 'static,
{
    Router::new().route("/directive", post(directives::handle::<B>))
}
