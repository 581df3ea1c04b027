// 入站定义及其默认子结构
use crate::protocol::{Network, Protocol, Security};
use crate::settings::{ProtocolSettings, SecuritySettings, StreamSettings, TransportSettings};
use serde::{Deserialize, Serialize};

/// Default bind address
pub const DEFAULT_LISTEN: &str = "0.0.0.0";

/// One inbound listener definition.
///
/// Serializes to the engine's JSON layout, so it can be appended to a
/// configuration's `inbounds` array as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundDefinition {
    pub tag: String,
    pub protocol: Protocol,
    /// Kept wider than `u16` so out-of-range input can be held and reported
    /// by validation instead of being rejected on entry.
    pub port: i64,
    pub listen: String,
    pub settings: ProtocolSettings,
    pub stream_settings: StreamSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sniffing: Option<Sniffing>,
}

/// Traffic sniffing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sniffing {
    pub enabled: bool,
    #[serde(default)]
    pub dest_override: Vec<String>,
}

impl Default for Sniffing {
    fn default() -> Self {
        Self {
            enabled: true,
            dest_override: vec!["http".to_string(), "tls".to_string()],
        }
    }
}

impl Default for InboundDefinition {
    fn default() -> Self {
        default_inbound()
    }
}

impl InboundDefinition {
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Fresh draft: vless over plain tcp on 443, sniffing on, empty tag.
pub fn default_inbound() -> InboundDefinition {
    InboundDefinition {
        tag: String::new(),
        protocol: Protocol::Vless,
        port: Protocol::Vless.default_port(),
        listen: DEFAULT_LISTEN.to_string(),
        settings: default_protocol_settings(Protocol::Vless),
        stream_settings: StreamSettings::new(Network::Tcp, Security::None),
        sniffing: Some(Sniffing::default()),
    }
}

pub fn default_protocol_settings(protocol: Protocol) -> ProtocolSettings {
    ProtocolSettings::for_protocol(protocol)
}

/// `None` for networks without builder-managed defaults.
pub fn default_transport_subobject(network: Network) -> Option<TransportSettings> {
    TransportSettings::defaults_for(network)
}

/// `None` for `Security::None`.
pub fn default_security_subobject(security: Security) -> Option<SecuritySettings> {
    SecuritySettings::defaults_for(security)
}
