//! Directive: an incoming assistant request addressed to an endpoint or to
//! discovery.
//!
//! Directive names are a closed set of variants; anything else is carried
//! verbatim in [`DirectiveName::Other`] so it can be echoed in the error
//! response.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level invocation event: `{ "directive": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectiveEnvelope {
    pub directive: Directive,
}

/// A single directive. Immutable input; one per invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct Directive {
    pub header: Header,
    #[serde(default)]
    pub endpoint: Option<EndpointRef>,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

/// Directive header.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub namespace: String,
    pub name: DirectiveName,
    pub message_id: String,
    #[serde(default)]
    pub correlation_token: Option<String>,
    #[serde(default)]
    pub payload_version: Option<String>,
}

/// Endpoint addressed by a directive.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRef {
    pub endpoint_id: String,
}

/// Name of a directive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DirectiveName {
    Discover,
    ReportState,
    TurnOn,
    TurnOff,
    SetBrightness,
    SetPowerLevel,
    Other(String),
}

impl DirectiveName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Discover => "Discover",
            Self::ReportState => "ReportState",
            Self::TurnOn => "TurnOn",
            Self::TurnOff => "TurnOff",
            Self::SetBrightness => "SetBrightness",
            Self::SetPowerLevel => "SetPowerLevel",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for DirectiveName {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Discover" => Self::Discover,
            "ReportState" => Self::ReportState,
            "TurnOn" => Self::TurnOn,
            "TurnOff" => Self::TurnOff,
            "SetBrightness" => Self::SetBrightness,
            "SetPowerLevel" => Self::SetPowerLevel,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for DirectiveName {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl fmt::Display for DirectiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Directive {
    /// Create a directive with the given header fields, no endpoint and an
    /// empty payload.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<DirectiveName>,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            header: Header {
                namespace: namespace.into(),
                name: name.into(),
                message_id: message_id.into(),
                correlation_token: None,
                payload_version: Some("3".to_string()),
            },
            endpoint: None,
            payload: Map::new(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint_id: impl Into<String>) -> Self {
        self.endpoint = Some(EndpointRef {
            endpoint_id: endpoint_id.into(),
        });
        self
    }

    #[must_use]
    pub fn with_correlation_token(mut self, token: impl Into<String>) -> Self {
        self.header.correlation_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &DirectiveName {
        &self.header.name
    }

    /// The addressed endpoint id, if the directive carries an endpoint.
    #[must_use]
    pub fn endpoint_id(&self) -> Option<&str> {
        self.endpoint.as_ref().map(|e| e.endpoint_id.as_str())
    }

    #[must_use]
    pub fn payload_value(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_set_brightness_envelope() {
        let json = r#"{
            "directive": {
                "header": {
                    "namespace": "Alexa.BrightnessController",
                    "name": "SetBrightness",
                    "payloadVersion": "3",
                    "messageId": "m-1",
                    "correlationToken": "c-1"
                },
                "endpoint": {
                    "scope": { "type": "BearerToken", "token": "t" },
                    "endpointId": "light-v3",
                    "cookie": {}
                },
                "payload": { "brightness": 20 }
            }
        }"#;
        let envelope: DirectiveEnvelope = serde_json::from_str(json).unwrap();
        let directive = envelope.directive;
        assert_eq!(directive.name(), &DirectiveName::SetBrightness);
        assert_eq!(directive.header.message_id, "m-1");
        assert_eq!(directive.header.correlation_token.as_deref(), Some("c-1"));
        assert_eq!(directive.endpoint_id(), Some("light-v3"));
        assert_eq!(directive.payload_value("brightness"), Some(&Value::from(20)));
    }

    #[test]
    fn should_parse_discover_without_endpoint_or_token() {
        let json = r#"{
            "header": {
                "namespace": "Alexa.Discovery",
                "name": "Discover",
                "payloadVersion": "3",
                "messageId": "m1"
            },
            "payload": { "scope": { "type": "BearerToken", "token": "t" } }
        }"#;
        let directive: Directive = serde_json::from_str(json).unwrap();
        assert_eq!(directive.name(), &DirectiveName::Discover);
        assert!(directive.endpoint.is_none());
        assert!(directive.header.correlation_token.is_none());
    }

    #[test]
    fn should_keep_unknown_name_verbatim() {
        let name = DirectiveName::from("SetColor");
        assert_eq!(name, DirectiveName::Other("SetColor".to_string()));
        assert_eq!(name.to_string(), "SetColor");
    }

    #[test]
    fn should_default_payload_when_missing() {
        let json = r#"{"header":{"namespace":"Alexa","name":"ReportState","messageId":"m"}}"#;
        let directive: Directive = serde_json::from_str(json).unwrap();
        assert!(directive.payload.is_empty());
    }

    #[test]
    fn should_reject_directive_without_header() {
        let result: Result<Directive, _> = serde_json::from_str(r#"{"payload":{}}"#);
        assert!(result.is_err());
    }
}
