// 传输层子配置
use crate::protocol::Network;
use serde::{Deserialize, Serialize};

/// `tcpSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpSettings {
    #[serde(default)]
    pub header: TcpHeader,
}

/// TCP header obfuscation. `request` is only meaningful when the type is `http`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpHeader {
    #[serde(rename = "type")]
    pub header_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<HttpRequestHeader>,
}

impl Default for TcpHeader {
    fn default() -> Self {
        Self {
            header_type: "none".to_string(),
            request: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequestHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<RequestHeaders>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHeaders {
    #[serde(rename = "Host", default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Vec<String>>,
}

/// `wsSettings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsSettings {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub host: String,
}

impl Default for WsSettings {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            host: String::new(),
        }
    }
}

/// `grpcSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcSettings {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub multi_mode: bool,
}

/// `httpSettings` (HTTP/2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub host: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            host: Vec::new(),
        }
    }
}

/// Empty sub-object for networks without builder-managed defaults
/// (quic, kcp, httpupgrade, splithttp). Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BareSettings {}

/// Networks that only ever get an empty sub-object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BareNetwork {
    Quic,
    Kcp,
    HttpUpgrade,
    SplitHttp,
}

impl BareNetwork {
    /// `None` for networks with populated defaults.
    pub fn from_network(network: Network) -> Option<Self> {
        match network {
            Network::Quic => Some(BareNetwork::Quic),
            Network::Kcp => Some(BareNetwork::Kcp),
            Network::HttpUpgrade => Some(BareNetwork::HttpUpgrade),
            Network::SplitHttp => Some(BareNetwork::SplitHttp),
            Network::Tcp | Network::Ws | Network::Grpc | Network::Http => None,
        }
    }

    pub fn network(&self) -> Network {
        match self {
            BareNetwork::Quic => Network::Quic,
            BareNetwork::Kcp => Network::Kcp,
            BareNetwork::HttpUpgrade => Network::HttpUpgrade,
            BareNetwork::SplitHttp => Network::SplitHttp,
        }
    }
}

/// One transport sub-object, tagged by the network it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportSettings {
    Tcp(TcpSettings),
    Ws(WsSettings),
    Grpc(GrpcSettings),
    Http(HttpSettings),
    Bare(BareNetwork),
}

impl TransportSettings {
    /// Default sub-object for `network`, or `None` for bare networks.
    pub fn defaults_for(network: Network) -> Option<Self> {
        match network {
            Network::Tcp => Some(TransportSettings::Tcp(TcpSettings::default())),
            Network::Ws => Some(TransportSettings::Ws(WsSettings::default())),
            Network::Grpc => Some(TransportSettings::Grpc(GrpcSettings::default())),
            Network::Http => Some(TransportSettings::Http(HttpSettings::default())),
            Network::Quic | Network::Kcp | Network::HttpUpgrade | Network::SplitHttp => None,
        }
    }

    pub fn network(&self) -> Network {
        match self {
            TransportSettings::Tcp(_) => Network::Tcp,
            TransportSettings::Ws(_) => Network::Ws,
            TransportSettings::Grpc(_) => Network::Grpc,
            TransportSettings::Http(_) => Network::Http,
            TransportSettings::Bare(bare) => bare.network(),
        }
    }
}
