//! Axum router exposing the bridge REST protocol.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use tower_http::trace::TraceLayer;

use crate::VirtualBridge;
use crate::error::CommandError;

/// Build the bridge [`Router`].
///
/// Every route sits behind the Basic-Auth check; a missing or wrong
/// `Authorization` header yields `401 Unauthorized.`.
pub fn build(bridge: Arc<VirtualBridge>) -> Router {
    Router::new()
        .route("/{device}", get(status))
        .route("/{device}/{command}", put(command))
        .route("/{device}/{command}/{value}", put(command_with_value))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&bridge),
            require_basic_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(bridge)
}

async fn require_basic_auth(
    State(bridge): State<Arc<VirtualBridge>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| bridge.credentials().accepts(value));

    if authorized {
        next.run(request).await
    } else {
        tracing::warn!(uri = %request.uri(), "rejected unauthenticated bridge request");
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"globo\"")],
            "Unauthorized.",
        )
            .into_response()
    }
}

async fn status(
    State(bridge): State<Arc<VirtualBridge>>,
    Path(device): Path<String>,
) -> Result<String, CommandError> {
    bridge.status(&device)
}

async fn command(
    State(bridge): State<Arc<VirtualBridge>>,
    Path((device, command)): Path<(String, String)>,
) -> Result<&'static str, CommandError> {
    bridge
        .execute(&device, &command, None)
        .map(|ack| ack.message())
}

async fn command_with_value(
    State(bridge): State<Arc<VirtualBridge>>,
    Path((device, command, value)): Path<(String, String, String)>,
) -> Result<&'static str, CommandError> {
    bridge
        .execute(&device, &command, Some(&value))
        .map(|ack| ack.message())
}
