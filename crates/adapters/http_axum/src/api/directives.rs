//! Directive invocation handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::Instrument;
use uuid::Uuid;

use globo_skill_app::ports::BridgeClient;
use globo_skill_domain::directive::DirectiveEnvelope;
use globo_skill_domain::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Handle one directive envelope.
///
/// Always answers `200 OK` with a single response once the body parses;
/// directive failures are reported inside the response payload.
pub async fn handle<B>(
    State(state): State<AppState<B>>,
    body: Result<Json<DirectiveEnvelope>, JsonRejection>,
) -> Result<Json<Response>, ApiError>
where
    B: BridgeClient + 'static,
{
    let Json(envelope) = body?;
    let invocation_id = Uuid::new_v4();
    let span = tracing::info_span!("invocation", %invocation_id);
    let response = state
        .directive_router
        .handle(&envelope.directive)
        .instrument(span)
        .await;
    tracing::debug!(%invocation_id, event = response.event_name(), "directive answered");
    Ok(Json(response))
}
