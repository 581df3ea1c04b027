// 协议 / 传输 / 安全 三个选择轴
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shadowsocks ciphers offered by the builder.
pub const SHADOWSOCKS_METHODS: [&str; 6] = [
    "chacha20-ietf-poly1305",
    "aes-256-gcm",
    "aes-128-gcm",
    "2022-blake3-aes-128-gcm",
    "2022-blake3-aes-256-gcm",
    "2022-blake3-chacha20-poly1305",
];

/// Default shadowsocks cipher
pub const DEFAULT_SHADOWSOCKS_METHOD: &str = "chacha20-ietf-poly1305";

/// Protocols accepted in `tlsSettings.alpn`
pub const ALPN_PROTOCOLS: [&str; 2] = ["h2", "http/1.1"];

/// ALPN choices offered for TLS; the combined entry is split on `,` before use.
pub const ALPN_OPTIONS: [&str; 3] = ["h2", "http/1.1", "h2,http/1.1"];

/// TCP header obfuscation types
pub const TCP_HEADER_TYPES: [&str; 2] = ["none", "http"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {axis}: {value}")]
pub struct ParseAxisError {
    pub axis: &'static str,
    pub value: String,
}

impl ParseAxisError {
    fn new(axis: &'static str, value: &str) -> Self {
        Self { axis, value: value.to_string() }
    }
}

/// Application-layer proxy protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Vmess,
    Vless,
    Trojan,
    Shadowsocks,
}

impl Protocol {
    pub const ALL: [Protocol; 4] = [
        Protocol::Vmess,
        Protocol::Vless,
        Protocol::Trojan,
        Protocol::Shadowsocks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Vmess => "vmess",
            Protocol::Vless => "vless",
            Protocol::Trojan => "trojan",
            Protocol::Shadowsocks => "shadowsocks",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Vmess => "VMess",
            Protocol::Vless => "VLESS",
            Protocol::Trojan => "Trojan",
            Protocol::Shadowsocks => "Shadowsocks",
        }
    }

    /// Conventional listening port, applied when the protocol is switched.
    pub fn default_port(&self) -> i64 {
        match self {
            Protocol::Shadowsocks => 8388,
            _ => 443,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseAxisError::new("protocol", s))
    }
}

/// Stream framing underneath the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Tcp,
    Ws,
    Grpc,
    Http,
    Quic,
    Kcp,
    HttpUpgrade,
    SplitHttp,
}

impl Network {
    pub const ALL: [Network; 8] = [
        Network::Tcp,
        Network::Ws,
        Network::Grpc,
        Network::Http,
        Network::Quic,
        Network::Kcp,
        Network::HttpUpgrade,
        Network::SplitHttp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Tcp => "tcp",
            Network::Ws => "ws",
            Network::Grpc => "grpc",
            Network::Http => "http",
            Network::Quic => "quic",
            Network::Kcp => "kcp",
            Network::HttpUpgrade => "httpupgrade",
            Network::SplitHttp => "splithttp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Network::Tcp => "TCP",
            Network::Ws => "WebSocket",
            Network::Grpc => "gRPC",
            Network::Http => "HTTP/2",
            Network::Quic => "QUIC",
            Network::Kcp => "mKCP",
            Network::HttpUpgrade => "HTTP Upgrade",
            Network::SplitHttp => "SplitHTTP",
        }
    }

    /// Whether the network has a populated default sub-object.
    /// The rest are "bare" transports whose handling is an option.
    pub fn has_defaults(&self) -> bool {
        matches!(self, Network::Tcp | Network::Ws | Network::Grpc | Network::Http)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| ParseAxisError::new("network", s))
    }
}

/// Transport-layer encryption mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    None,
    Tls,
    Reality,
}

impl Security {
    pub const ALL: [Security; 3] = [Security::None, Security::Tls, Security::Reality];

    pub fn as_str(&self) -> &'static str {
        match self {
            Security::None => "none",
            Security::Tls => "tls",
            Security::Reality => "reality",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Security::None => "None",
            Security::Tls => "TLS",
            Security::Reality => "Reality",
        }
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Security {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Security::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseAxisError::new("security", s))
    }
}
