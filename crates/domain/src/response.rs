//! Response envelopes returned to the assistant (payload version 3).
//!
//! Every response is an immutable value built from the originating
//! [`Directive`] plus domain data. Error responses always carry the
//! directive's `messageId`, `correlationToken` and `endpointId`.

use serde::Serialize;
use serde_json::{Value, json};

use crate::command::Echo;
use crate::directive::Directive;
use crate::endpoint::{self, Capability, Endpoint, interface};
use crate::error::ErrorKind;
use crate::status::DeviceState;
use crate::time::{Timestamp, serialize_millis};

const PAYLOAD_VERSION: &str = "3";

/// Any response the adapter produces.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Discover(DiscoverResponse),
    StateReport(ContextResponse),
    Control(ContextResponse),
    Error(ErrorResponse),
}

impl Response {
    /// `Discover.Response` listing `endpoints` with their capabilities.
    #[must_use]
    pub fn discover(directive: &Directive, endpoints: &[Endpoint]) -> Self {
        Self::Discover(DiscoverResponse {
            event: DiscoverEvent {
                header: EventHeader {
                    namespace: directive.header.namespace.clone(),
                    name: "Discover.Response".to_string(),
                    message_id: directive.header.message_id.clone(),
                    correlation_token: None,
                    payload_version: PAYLOAD_VERSION,
                },
                payload: DiscoverPayload {
                    endpoints: endpoints.iter().map(DiscoveredEndpoint::from).collect(),
                },
            },
        })
    }

    /// `StateReport` carrying the translated device state plus connectivity.
    #[must_use]
    pub fn state_report(directive: &Directive, state: &DeviceState, at: Timestamp) -> Self {
        Self::StateReport(ContextResponse::new(
            directive,
            "StateReport",
            Property::from_state(state, at),
        ))
    }

    /// `Response` to a control directive echoing a single property. The
    /// property namespace is the directive's namespace.
    #[must_use]
    pub fn control(directive: &Directive, echo: Echo, at: Timestamp) -> Self {
        let property = Property::new(
            directive.header.namespace.clone(),
            echo.property_name(),
            echo.value(),
            at,
        );
        Self::Control(ContextResponse::new(directive, "Response", vec![property]))
    }

    /// `ErrorResponse` of the given kind.
    #[must_use]
    pub fn error(directive: &Directive, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error(ErrorResponse {
            event: ErrorEvent {
                header: EventHeader::alexa(directive, "ErrorResponse"),
                endpoint: EventEndpoint::of(directive),
                payload: ErrorPayload {
                    kind,
                    message: message.into(),
                },
            },
        })
    }

    /// Header name of the event, e.g. `"StateReport"`.
    #[must_use]
    pub fn event_name(&self) -> &str {
        match self {
            Self::Discover(r) => &r.event.header.name,
            Self::StateReport(r) | Self::Control(r) => &r.event.header.name,
            Self::Error(r) => &r.event.header.name,
        }
    }

    /// The error kind, for error responses.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Error(r) => Some(r.event.payload.kind),
            _ => None,
        }
    }

    /// Reported properties, for state reports and control responses.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        match self {
            Self::StateReport(r) | Self::Control(r) => &r.context.properties,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHeader {
    pub namespace: String,
    pub name: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_token: Option<String>,
    pub payload_version: &'static str,
}

impl EventHeader {
    fn alexa(directive: &Directive, name: &str) -> Self {
        Self {
            namespace: interface::ALEXA.to_string(),
            name: name.to_string(),
            message_id: directive.header.message_id.clone(),
            correlation_token: directive.header.correlation_token.clone(),
            payload_version: PAYLOAD_VERSION,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEndpoint {
    pub endpoint_id: String,
}

impl EventEndpoint {
    fn of(directive: &Directive) -> Option<Self> {
        directive.endpoint_id().map(|id| Self {
            endpoint_id: id.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DiscoverResponse {
    pub event: DiscoverEvent,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoverEvent {
    pub header: EventHeader,
    pub payload: DiscoverPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoverPayload {
    pub endpoints: Vec<DiscoveredEndpoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredEndpoint {
    pub endpoint_id: &'static str,
    pub friendly_name: &'static str,
    pub description: &'static str,
    pub display_categories: &'static [&'static str],
    pub manufacturer_name: &'static str,
    pub capabilities: Vec<DiscoveredCapability>,
}

impl From<&Endpoint> for DiscoveredEndpoint {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            endpoint_id: endpoint.endpoint_id,
            friendly_name: endpoint.display_name,
            description: endpoint::DESCRIPTION,
            display_categories: endpoint.categories,
            manufacturer_name: endpoint::MANUFACTURER,
            capabilities: endpoint
                .capabilities
                .iter()
                .map(DiscoveredCapability::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredCapability {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub interface: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<CapabilityProperties>,
}

impl From<&Capability> for DiscoveredCapability {
    fn from(capability: &Capability) -> Self {
        Self {
            kind: "AlexaInterface",
            interface: capability.interface,
            version: PAYLOAD_VERSION,
            properties: capability.property.map(|name| CapabilityProperties {
                supported: vec![SupportedProperty { name }],
                proactively_reported: false,
                retrievable: true,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    pub supported: Vec<SupportedProperty>,
    pub proactively_reported: bool,
    pub retrievable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupportedProperty {
    pub name: &'static str,
}

// ---------------------------------------------------------------------------
// State report / control response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ContextResponse {
    pub event: ContextEvent,
    pub context: Context,
}

impl ContextResponse {
    fn new(directive: &Directive, name: &str, properties: Vec<Property>) -> Self {
        Self {
            event: ContextEvent {
                header: EventHeader::alexa(directive, name),
                endpoint: EventEndpoint::of(directive),
            },
            context: Context { properties },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextEvent {
    pub header: EventHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EventEndpoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Context {
    pub properties: Vec<Property>,
}

/// A reported property value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub namespace: String,
    pub name: String,
    pub value: Value,
    #[serde(serialize_with = "serialize_millis")]
    pub time_of_sample: Timestamp,
    pub uncertainty_in_milliseconds: u32,
}

impl Property {
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<Value>,
        at: Timestamp,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
            time_of_sample: at,
            uncertainty_in_milliseconds: 0,
        }
    }

    /// Connectivity, power state and the class-specific level, in that order.
    #[must_use]
    pub fn from_state(state: &DeviceState, at: Timestamp) -> Vec<Self> {
        let connectivity = Self::new(
            interface::ENDPOINT_HEALTH,
            "connectivity",
            json!({ "value": "OK" }),
            at,
        );
        let power = Self::new(
            interface::POWER_CONTROLLER,
            "powerState",
            state.power().as_str(),
            at,
        );
        let level = match state {
            DeviceState::Light { brightness, .. } => Self::new(
                interface::BRIGHTNESS_CONTROLLER,
                "brightness",
                brightness.as_str(),
                at,
            ),
            DeviceState::Fan { power_level, .. } => Self::new(
                interface::POWER_LEVEL_CONTROLLER,
                "powerLevel",
                *power_level,
                at,
            ),
        };
        vec![connectivity, power, level]
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub event: ErrorEvent,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    pub header: EventHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EventEndpoint>,
    pub payload: ErrorPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
}
