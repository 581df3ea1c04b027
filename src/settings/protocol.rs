use crate::protocol::{Protocol, DEFAULT_SHADOWSOCKS_METHOD};
use serde::{Deserialize, Serialize};

/// A user entry in `settings.clients`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// UUID for vmess/vless
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Trojan password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
}

/// Protocol-specific `settings` object.
///
/// The populated fields depend on the protocol:
/// shadowsocks carries `method`, `password` and `network`; vmess, vless and
/// trojan carry `clients`, with `decryption` present only for vless.
/// [`ProtocolSettings::for_protocol`] is the only way the builder produces one,
/// so a protocol switch never leaves fields of the previous shape behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<Client>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decryption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

impl ProtocolSettings {
    pub fn for_protocol(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Shadowsocks => Self {
                method: Some(DEFAULT_SHADOWSOCKS_METHOD.to_string()),
                password: Some(String::new()),
                network: Some("tcp,udp".to_string()),
                ..Self::default()
            },
            Protocol::Vless => Self {
                clients: Some(Vec::new()),
                decryption: Some("none".to_string()),
                ..Self::default()
            },
            Protocol::Vmess | Protocol::Trojan => Self {
                clients: Some(Vec::new()),
                ..Self::default()
            },
        }
    }
}
