//! End-to-end tests for the full globo-skilld stack.
//!
//! Each test starts a virtual Globo bridge on an ephemeral port, points a real
//! reqwest bridge client at it, and exercises the skill's HTTP surface via
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use globo_skill_adapter_bridge_reqwest::{BridgeConfig, ReqwestBridgeClient};
use globo_skill_adapter_http_axum::router;
use globo_skill_adapter_http_axum::state::AppState;
use globo_skill_adapter_virtual_bridge::{Credentials, VirtualBridge};
use globo_skill_app::services::directive_router::DirectiveRouter;

/// Serve a fresh virtual bridge and return its base URL.
async fn start_bridge(credentials: Credentials) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = globo_skill_adapter_virtual_bridge::router::build(Arc::new(VirtualBridge::new(
        credentials,
    )));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn skill(base_url: String, authorization: String) -> axum::Router {
    let config = BridgeConfig {
        base_url,
        basic_auth: Some(authorization),
        connect_cancel_ms: 1000,
        request_timeout_ms: 2000,
        ..BridgeConfig::default()
    };
    let client = ReqwestBridgeClient::new(&config).expect("bridge client should build");
    router::build(AppState::new(DirectiveRouter::new(client)))
}

/// Full stack backed by a fresh virtual bridge with matching credentials.
async fn app() -> axum::Router {
    let credentials = Credentials::new("globo", "globo");
    let authorization = credentials.authorization();
    let base_url = start_bridge(credentials).await;
    skill(base_url, authorization)
}

fn envelope(namespace: &str, name: &str, endpoint_id: Option<&str>, payload: Value) -> Value {
    let mut directive = json!({
        "header": {
            "namespace": namespace,
            "name": name,
            "messageId": format!("msg-{name}"),
            "correlationToken": "token-1",
            "payloadVersion": "3"
        },
        "payload": payload
    });
    if let Some(id) = endpoint_id {
        directive["endpoint"] = json!({ "endpointId": id, "scope": { "type": "BearerToken" } });
    }
    json!({ "directive": directive })
}

async fn invoke(app: &axum::Router, envelope: Value) -> Value {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/directive")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(envelope.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn report_state(app: &axum::Router, endpoint_id: &str) -> Value {
    invoke(
        app,
        envelope("Alexa", "ReportState", Some(endpoint_id), json!({})),
    )
    .await
}

fn property<'a>(response: &'a Value, name: &str) -> &'a Value {
    response["context"]["properties"]
        .as_array()
        .and_then(|props| props.iter().find(|p| p["name"] == name))
        .map_or(&Value::Null, |p| &p["value"])
}

// ---------------------------------------------------------------------------
// Health & discovery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_list_light_and_fan_when_discovering() {
    let app = app().await;
    let response = invoke(
        &app,
        envelope("Alexa.Discovery", "Discover", None, json!({ "scope": {} })),
    )
    .await;

    assert_eq!(response["event"]["header"]["name"], "Discover.Response");
    let ids: Vec<&str> = response["event"]["payload"]["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["endpointId"].as_str())
        .collect();
    assert_eq!(ids, ["light-v3", "fan-v3"]);
}

// ---------------------------------------------------------------------------
// Light
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_light_off_when_bridge_starts() {
    let app = app().await;
    let response = report_state(&app, "light-v3").await;

    assert_eq!(response["event"]["header"]["name"], "StateReport");
    assert_eq!(response["event"]["header"]["correlationToken"], "token-1");
    assert_eq!(property(&response, "connectivity"), &json!({ "value": "OK" }));
    assert_eq!(property(&response, "powerState"), "OFF");
    assert_eq!(property(&response, "brightness"), "0");
}

#[tokio::test]
async fn should_report_light_on_when_turned_on() {
    let app = app().await;
    let response = invoke(
        &app,
        envelope("Alexa.PowerController", "TurnOn", Some("light-v3"), json!({})),
    )
    .await;
    assert_eq!(response["event"]["header"]["name"], "Response");
    assert_eq!(property(&response, "powerState"), "ON");

    let state = report_state(&app, "light-v3").await;
    assert_eq!(property(&state, "powerState"), "ON");
    assert_eq!(property(&state, "brightness"), "100");
}

#[tokio::test]
async fn should_dim_light_when_brightness_set() {
    let app = app().await;
    let response = invoke(
        &app,
        envelope(
            "Alexa.BrightnessController",
            "SetBrightness",
            Some("light-v3"),
            json!({ "brightness": 20 }),
        ),
    )
    .await;
    assert_eq!(property(&response, "brightness"), 20);

    let state = report_state(&app, "light-v3").await;
    assert_eq!(property(&state, "powerState"), "ON");
    assert_eq!(property(&state, "brightness"), "20");
}

#[tokio::test]
async fn should_echo_off_literal_when_turned_off() {
    let app = app().await;
    invoke(
        &app,
        envelope("Alexa.PowerController", "TurnOn", Some("light-v3"), json!({})),
    )
    .await;
    let response = invoke(
        &app,
        envelope("Alexa.PowerController", "TurnOff", Some("light-v3"), json!({})),
    )
    .await;
    assert_eq!(property(&response, "powerState"), "Off");

    let state = report_state(&app, "light-v3").await;
    assert_eq!(property(&state, "powerState"), "OFF");
}

// ---------------------------------------------------------------------------
// Fan
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_bucket_fan_power_level_to_medium() {
    let app = app().await;
    let response = invoke(
        &app,
        envelope(
            "Alexa.PowerLevelController",
            "SetPowerLevel",
            Some("fan-v3"),
            json!({ "powerLevel": 50 }),
        ),
    )
    .await;
    assert_eq!(property(&response, "powerLevel"), 50);

    let state = report_state(&app, "fan-v3").await;
    assert_eq!(property(&state, "powerState"), "ON");
    assert_eq!(property(&state, "powerLevel"), "66");
}

#[tokio::test]
async fn should_start_fan_at_low_when_turned_on() {
    let app = app().await;
    invoke(
        &app,
        envelope("Alexa.PowerController", "TurnOn", Some("fan-v3"), json!({})),
    )
    .await;

    let state = report_state(&app, "fan-v3").await;
    assert_eq!(property(&state, "powerLevel"), "33");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_out_of_range_power_level() {
    let app = app().await;
    let response = invoke(
        &app,
        envelope(
            "Alexa.PowerLevelController",
            "SetPowerLevel",
            Some("fan-v3"),
            json!({ "powerLevel": 150 }),
        ),
    )
    .await;
    assert_eq!(response["event"]["header"]["name"], "ErrorResponse");
    assert_eq!(response["event"]["payload"]["type"], "VALUE_OUT_OF_RANGE");

    let state = report_state(&app, "fan-v3").await;
    assert_eq!(property(&state, "powerState"), "OFF");
}

#[tokio::test]
async fn should_report_no_such_endpoint_for_unknown_endpoint() {
    let app = app().await;
    let response = report_state(&app, "toaster-v1").await;
    assert_eq!(response["event"]["payload"]["type"], "NO_SUCH_ENDPOINT");
    assert_eq!(response["event"]["header"]["messageId"], "msg-ReportState");
    assert_eq!(response["event"]["endpoint"]["endpointId"], "toaster-v1");
}

#[tokio::test]
async fn should_report_insufficient_permissions_when_credential_is_wrong() {
    let base_url = start_bridge(Credentials::new("globo", "globo")).await;
    let app = skill(base_url, Credentials::new("globo", "wrong").authorization());

    let response = report_state(&app, "light-v3").await;
    assert_eq!(
        response["event"]["payload"]["type"],
        "INSUFFICIENT_PERMISSIONS"
    );
}

#[tokio::test]
async fn should_report_bridge_unreachable_when_bridge_is_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let app = skill(
        format!("http://{addr}"),
        Credentials::new("globo", "globo").authorization(),
    );

    let response = report_state(&app, "fan-v3").await;
    assert_eq!(response["event"]["payload"]["type"], "BRIDGE_UNREACHABLE");
    assert_eq!(response["event"]["header"]["correlationToken"], "token-1");
}

#[tokio::test]
async fn should_return_400_when_body_is_not_an_envelope() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/directive")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("[]"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
