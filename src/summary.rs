// 入站摘要（列表展示用）
use crate::inbound::InboundDefinition;
use crate::protocol::Security;
use serde_json::Value;
use std::fmt;

/// One-line overview of an inbound: tag, protocol, network, security, port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundSummary {
    pub tag: String,
    pub protocol: String,
    pub network: String,
    /// `None` when the inbound has no transport security.
    pub security: Option<String>,
    pub port: Option<i64>,
}

impl InboundSummary {
    /// Build from a raw document entry; missing fields fall back to defaults.
    pub fn from_value(inbound: &Value) -> Self {
        fn text(value: Option<&Value>) -> &str {
            value.and_then(Value::as_str).unwrap_or_default()
        }
        let stream = inbound.get("streamSettings");

        let tag = text(inbound.get("tag"));
        let network = text(stream.and_then(|s| s.get("network")));
        let security = text(stream.and_then(|s| s.get("security")));

        Self {
            tag: if tag.is_empty() { "Unnamed".to_string() } else { tag.to_string() },
            protocol: text(inbound.get("protocol")).to_uppercase(),
            network: if network.is_empty() { "TCP".to_string() } else { network.to_uppercase() },
            security: match security {
                "" | "none" => None,
                other => Some(other.to_uppercase()),
            },
            port: inbound.get("port").and_then(Value::as_i64),
        }
    }
}

impl From<&InboundDefinition> for InboundSummary {
    fn from(inbound: &InboundDefinition) -> Self {
        let stream = &inbound.stream_settings;
        Self {
            tag: if inbound.tag.is_empty() { "Unnamed".to_string() } else { inbound.tag.clone() },
            protocol: inbound.protocol.as_str().to_uppercase(),
            network: stream.network.as_str().to_uppercase(),
            security: match stream.security {
                Security::None => None,
                other => Some(other.as_str().to_uppercase()),
            },
            port: Some(inbound.port),
        }
    }
}

impl fmt::Display for InboundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] [{}]", self.tag, self.protocol, self.network)?;
        if let Some(security) = &self.security {
            write!(f, " [{}]", security)?;
        }
        match self.port {
            Some(port) => write!(f, " :{}", port),
            None => f.write_str(" :?"),
        }
    }
}
