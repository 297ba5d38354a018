//! Directive router: top-level dispatch of one directive into one response.

use globo_skill_domain::command::{self, Action};
use globo_skill_domain::directive::{Directive, DirectiveName};
use globo_skill_domain::endpoint;
use globo_skill_domain::error::DirectiveError;
use globo_skill_domain::response::Response;
use globo_skill_domain::status;
use globo_skill_domain::time::now;

use crate::ports::BridgeClient;

/// Routes directives to the bridge and assembles the assistant response.
///
/// Validation failures (unknown endpoint, unsupported directive, value out of
/// range) short-circuit before any bridge call.
pub struct DirectiveRouter<B> {
    bridge: B,
}

impl<B: BridgeClient> DirectiveRouter<B> {
    /// Create a router backed by the given bridge client.
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    /// Handle one directive.
    ///
    /// Never fails: every internal failure becomes an error response carrying
    /// the directive's `messageId`, `correlationToken` and `endpointId`.
    #[tracing::instrument(
        skip_all,
        fields(
            name = %directive.name(),
            message_id = %directive.header.message_id,
            endpoint_id = directive.endpoint_id(),
        )
    )]
    pub async fn handle(&self, directive: &Directive) -> Response {
        if *directive.name() == DirectiveName::Discover {
            tracing::debug!("answering discovery from the static catalog");
            return Response::discover(directive, &endpoint::CATALOG);
        }

        match self.handle_endpoint_directive(directive).await {
            Ok(response) => response,
            Err(err) => {
                let kind = err.error_kind();
                tracing::warn!(error = %err, %kind, "directive failed");
                Response::error(directive, kind, err.to_string())
            }
        }
    }

    async fn handle_endpoint_directive(
        &self,
        directive: &Directive,
    ) -> Result<Response, DirectiveError> {
        let endpoint_id = directive
            .endpoint_id()
            .ok_or_else(|| DirectiveError::MissingEndpoint {
                name: directive.name().to_string(),
            })?;
        let endpoint = endpoint::resolve(endpoint_id)
            .ok_or_else(|| DirectiveError::UnknownEndpoint(endpoint_id.to_string()))?;
        let device = endpoint.class;

        let action = command::map_directive(device, directive)?;
        let request = action.request(device);
        tracing::debug!(%request, "calling bridge");
        let body = self.bridge.call(request).await.into_body()?;

        match action {
            Action::ReportState => {
                let state = status::translate(device, &body)?;
                Ok(Response::state_report(directive, &state, now()))
            }
            Action::Control { echo, .. } => Ok(Response::control(directive, echo, now())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globo_skill_domain::command::BridgeRequest;
    use globo_skill_domain::error::ErrorKind;
    use globo_skill_domain::outcome::BackendOutcome;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubBridge {
        outcome: BackendOutcome,
        calls: Mutex<Vec<String>>,
    }

    impl StubBridge {
        fn answering(outcome: BackendOutcome) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn ok(body: &str) -> Self {
            Self::answering(BackendOutcome::Success(body.to_string()))
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl BridgeClient for StubBridge {
        async fn call(&self, request: BridgeRequest) -> BackendOutcome {
            self.calls.lock().unwrap().push(request.to_string());
            self.outcome.clone()
        }
    }

    fn directive(name: &str, endpoint_id: &str) -> Directive {
        Directive::new("Alexa", name, "m1")
            .with_endpoint(endpoint_id)
            .with_correlation_token("c1")
    }

    fn property_value<'a>(response: &'a Response, name: &str) -> &'a serde_json::Value {
        &response
            .properties()
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("missing property {name}"))
            .value
    }

    #[tokio::test]
    async fn should_discover_both_endpoints_without_bridge_call() {
        let router = DirectiveRouter::new(StubBridge::answering(BackendOutcome::HttpFailure(500)));
        let discover = Directive::new("Alexa.Discovery", "Discover", "m1");

        let response = router.handle(&discover).await;

        assert_eq!(response.event_name(), "Discover.Response");
        let json = serde_json::to_value(&response).unwrap();
        let ids: Vec<_> = json["event"]["payload"]["endpoints"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["endpointId"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["light-v3", "fan-v3"]);
        assert!(router.bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn should_report_light_state() {
        let router = DirectiveRouter::new(StubBridge::ok("GloboLightStatus.OFF:0"));

        let response = router.handle(&directive("ReportState", "light-v3")).await;

        assert_eq!(response.event_name(), "StateReport");
        assert_eq!(property_value(&response, "connectivity"), &json!({"value": "OK"}));
        assert_eq!(property_value(&response, "powerState"), &json!("OFF"));
        assert_eq!(property_value(&response, "brightness"), &json!("0"));
        assert_eq!(router.bridge.calls(), ["GET /light"]);
    }

    #[tokio::test]
    async fn should_report_fan_state() {
        let router = DirectiveRouter::new(StubBridge::ok("GloboFanCommand.OFF"));

        let response = router.handle(&directive("ReportState", "fan-v3")).await;

        assert_eq!(property_value(&response, "powerState"), &json!("OFF"));
        assert_eq!(property_value(&response, "powerLevel"), &json!("0"));
        assert_eq!(router.bridge.calls(), ["GET /fan"]);
    }

    #[tokio::test]
    async fn should_answer_bridge_unreachable_when_status_is_malformed() {
        let router = DirectiveRouter::new(StubBridge::ok("malformed-response"));

        let response = router.handle(&directive("ReportState", "light-v3")).await;

        assert_eq!(response.error_kind(), Some(ErrorKind::BridgeUnreachable));
    }

    #[tokio::test]
    async fn should_turn_on_light_with_on_verb() {
        let router = DirectiveRouter::new(StubBridge::ok(""));

        let response = router.handle(&directive("TurnOn", "light-v3")).await;

        assert_eq!(response.event_name(), "Response");
        assert_eq!(property_value(&response, "powerState"), &json!("ON"));
        assert_eq!(router.bridge.calls(), ["PUT /light/ON"]);
    }

    #[tokio::test]
    async fn should_turn_on_fan_with_low_verb() {
        let router = DirectiveRouter::new(StubBridge::ok(""));

        router.handle(&directive("TurnOn", "fan-v3")).await;

        assert_eq!(router.bridge.calls(), ["PUT /fan/LOW"]);
    }

    #[tokio::test]
    async fn should_echo_off_literal_when_turning_off() {
        let router = DirectiveRouter::new(StubBridge::ok(""));

        let response = router.handle(&directive("TurnOff", "light-v3")).await;

        assert_eq!(property_value(&response, "powerState"), &json!("Off"));
        assert_eq!(router.bridge.calls(), ["PUT /light/OFF"]);
    }

    #[tokio::test]
    async fn should_dimm_light_when_setting_brightness() {
        let router = DirectiveRouter::new(StubBridge::ok(""));
        let set = directive("SetBrightness", "light-v3").with_payload("brightness", 20);

        let response = router.handle(&set).await;

        assert_eq!(property_value(&response, "brightness"), &json!(20));
        assert_eq!(router.bridge.calls(), ["PUT /light/DIMM/20"]);
    }

    #[tokio::test]
    async fn should_bucket_power_level_and_echo_requested_value() {
        let router = DirectiveRouter::new(StubBridge::ok(""));
        let set = directive("SetPowerLevel", "fan-v3").with_payload("powerLevel", 50);

        let response = router.handle(&set).await;

        assert_eq!(property_value(&response, "powerLevel"), &json!(50));
        assert_eq!(router.bridge.calls(), ["PUT /fan/MED"]);
    }

    #[tokio::test]
    async fn should_reject_out_of_range_values_without_bridge_call() {
        let router = DirectiveRouter::new(StubBridge::ok(""));

        for value in [-1, 101, 255, 10_000] {
            let brightness = directive("SetBrightness", "light-v3").with_payload("brightness", value);
            let power_level = directive("SetPowerLevel", "fan-v3").with_payload("powerLevel", value);

            let a = router.handle(&brightness).await;
            let b = router.handle(&power_level).await;

            assert_eq!(a.error_kind(), Some(ErrorKind::ValueOutOfRange));
            assert_eq!(b.error_kind(), Some(ErrorKind::ValueOutOfRange));
        }
        assert!(router.bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_unknown_endpoint_without_bridge_call() {
        let router = DirectiveRouter::new(StubBridge::ok(""));

        let response = router.handle(&directive("TurnOn", "oven-v1")).await;

        assert_eq!(response.error_kind(), Some(ErrorKind::NoSuchEndpoint));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["event"]["header"]["messageId"], "m1");
        assert_eq!(json["event"]["header"]["correlationToken"], "c1");
        assert_eq!(json["event"]["endpoint"]["endpointId"], "oven-v1");
        assert!(router.bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_directive_without_endpoint() {
        let router = DirectiveRouter::new(StubBridge::ok(""));

        let response = router.handle(&Directive::new("Alexa", "TurnOn", "m1")).await;

        assert_eq!(response.error_kind(), Some(ErrorKind::InvalidDirective));
        assert!(router.bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_unsupported_directive() {
        let router = DirectiveRouter::new(StubBridge::ok(""));

        let brightness_on_fan = directive("SetBrightness", "fan-v3").with_payload("brightness", 5);
        let unknown = directive("SetColor", "light-v3");

        assert_eq!(
            router.handle(&brightness_on_fan).await.error_kind(),
            Some(ErrorKind::InvalidDirective)
        );
        assert_eq!(
            router.handle(&unknown).await.error_kind(),
            Some(ErrorKind::InvalidDirective)
        );
        assert!(router.bridge.calls().is_empty());
    }

    #[tokio::test]
    async fn should_map_bridge_http_failures() {
        let cases = [
            (400, ErrorKind::InvalidValue),
            (401, ErrorKind::InsufficientPermissions),
            (404, ErrorKind::NoSuchEndpoint),
            (500, ErrorKind::InternalError),
        ];
        for (status, kind) in cases {
            let router =
                DirectiveRouter::new(StubBridge::answering(BackendOutcome::HttpFailure(status)));
            let response = router.handle(&directive("TurnOn", "light-v3")).await;
            assert_eq!(response.error_kind(), Some(kind), "status {status}");
        }
    }

    #[tokio::test]
    async fn should_carry_transport_message_in_bridge_unreachable() {
        let router = DirectiveRouter::new(StubBridge::answering(BackendOutcome::TransportFailure(
            "cancel timeout".to_string(),
        )));

        let response = router.handle(&directive("ReportState", "fan-v3")).await;

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["event"]["payload"]["type"], "BRIDGE_UNREACHABLE");
        assert_eq!(json["event"]["payload"]["message"], "cancel timeout");
    }
}
