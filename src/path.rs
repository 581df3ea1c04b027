// 字段路径：按点分路径深度更新草稿
use crate::inbound::{InboundDefinition, Sniffing};
use crate::protocol::{ALPN_PROTOCOLS, SHADOWSOCKS_METHODS, TCP_HEADER_TYPES};
use crate::settings::Client;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest sequence index a path may address.
pub const MAX_LIST_INDEX: usize = 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("unknown field path: {0}")]
    UnknownPath(String),

    #[error("`{path}` switches sub-structures; use {setter} instead")]
    Selector { path: String, setter: &'static str },

    #[error("`{path}` expects {expected}")]
    Type { path: String, expected: &'static str },

    #[error("index {index} in `{path}` exceeds {max}")]
    IndexTooLarge { path: String, index: usize, max: usize },

    #[error("`{path}` does not offer {value:?}; choose one of {}", .allowed.join(", "))]
    NotOffered {
        path: String,
        value: String,
        allowed: &'static [&'static str],
    },
}

/// Whole sequence or one element of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSlot {
    All,
    At(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientField {
    Id,
    Password,
    Email,
    Flow,
}

/// Every leaf of an [`InboundDefinition`] the builder can write.
///
/// Parsed from dotted paths such as
/// `streamSettings.tlsSettings.certificates.0.keyFile`. Wire names and the
/// aliases `transportSettings`, `protocolSettings`, `listenAddress`,
/// `trafficSniffing` and `destinationOverride` are both accepted. Applying a
/// path creates missing sub-objects with their defaults and is not gated on
/// the current network or security.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Tag,
    Port,
    Listen,
    // settings
    Method,
    Password,
    SettingsNetwork,
    Decryption,
    Client(usize, ClientField),
    // streamSettings.tcpSettings
    TcpHeaderType,
    TcpRequestPath(ListSlot),
    TcpRequestHost(ListSlot),
    // streamSettings.wsSettings
    WsPath,
    WsHost,
    // streamSettings.grpcSettings
    GrpcServiceName,
    GrpcMultiMode,
    // streamSettings.httpSettings
    HttpPath,
    HttpHost(ListSlot),
    // streamSettings.tlsSettings
    TlsServerName,
    TlsAlpn(ListSlot),
    TlsCertificateFile(usize),
    TlsKeyFile(usize),
    // streamSettings.realitySettings
    RealityShow,
    RealityDest,
    RealityServerNames(ListSlot),
    RealityPrivateKey,
    RealityPublicKey,
    RealityShortIds(ListSlot),
    // sniffing
    SniffingEnabled,
    SniffingDestOverride(ListSlot),
}

fn index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Saturate so an absurd index still reports IndexTooLarge.
    Some(segment.parse::<usize>().unwrap_or(usize::MAX))
}

fn slot(rest: &[&str]) -> Option<ListSlot> {
    match rest {
        [] => Some(ListSlot::All),
        [i] => index(i).map(ListSlot::At),
        _ => None,
    }
}

fn parse_settings(rest: &[&str]) -> Option<FieldPath> {
    let path = match rest {
        ["method"] => FieldPath::Method,
        ["password"] => FieldPath::Password,
        ["network"] => FieldPath::SettingsNetwork,
        ["decryption"] => FieldPath::Decryption,
        ["clients", i, field] => {
            let field = match *field {
                "id" => ClientField::Id,
                "password" => ClientField::Password,
                "email" => ClientField::Email,
                "flow" => ClientField::Flow,
                _ => return None,
            };
            FieldPath::Client(index(i)?, field)
        }
        _ => return None,
    };
    Some(path)
}

fn parse_stream(rest: &[&str]) -> Option<FieldPath> {
    let path = match rest {
        ["tcpSettings", "header", "type"] => FieldPath::TcpHeaderType,
        ["tcpSettings", "header", "request", "path", tail @ ..] => {
            FieldPath::TcpRequestPath(slot(tail)?)
        }
        ["tcpSettings", "header", "request", "headers", "Host", tail @ ..] => {
            FieldPath::TcpRequestHost(slot(tail)?)
        }
        ["wsSettings", "path"] => FieldPath::WsPath,
        ["wsSettings", "host"] => FieldPath::WsHost,
        ["grpcSettings", "serviceName"] => FieldPath::GrpcServiceName,
        ["grpcSettings", "multiMode"] => FieldPath::GrpcMultiMode,
        ["httpSettings", "path"] => FieldPath::HttpPath,
        ["httpSettings", "host", tail @ ..] => FieldPath::HttpHost(slot(tail)?),
        ["tlsSettings", "serverName"] => FieldPath::TlsServerName,
        ["tlsSettings", "alpn", tail @ ..] => FieldPath::TlsAlpn(slot(tail)?),
        ["tlsSettings", "certificates", i, "certificateFile"] => {
            FieldPath::TlsCertificateFile(index(i)?)
        }
        ["tlsSettings", "certificates", i, "keyFile"] => FieldPath::TlsKeyFile(index(i)?),
        ["realitySettings", "show"] => FieldPath::RealityShow,
        ["realitySettings", "dest"] => FieldPath::RealityDest,
        ["realitySettings", "serverNames", tail @ ..] => {
            FieldPath::RealityServerNames(slot(tail)?)
        }
        ["realitySettings", "privateKey"] => FieldPath::RealityPrivateKey,
        ["realitySettings", "publicKey"] => FieldPath::RealityPublicKey,
        ["realitySettings", "shortIds", tail @ ..] => FieldPath::RealityShortIds(slot(tail)?),
        _ => return None,
    };
    Some(path)
}

fn parse_sniffing(rest: &[&str]) -> Option<FieldPath> {
    match rest {
        ["enabled"] => Some(FieldPath::SniffingEnabled),
        ["destOverride" | "destinationOverride", tail @ ..] => {
            Some(FieldPath::SniffingDestOverride(slot(tail)?))
        }
        _ => None,
    }
}

impl FromStr for FieldPath {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();

        let selector = match segments.as_slice() {
            ["protocol"] => Some("set_protocol"),
            ["streamSettings" | "transportSettings", "network"] => Some("set_network"),
            ["streamSettings" | "transportSettings", "security"] => Some("set_security"),
            _ => None,
        };
        if let Some(setter) = selector {
            return Err(UpdateError::Selector { path: s.to_string(), setter });
        }

        let parsed = match segments.as_slice() {
            ["tag"] => Some(FieldPath::Tag),
            ["port"] => Some(FieldPath::Port),
            ["listen" | "listenAddress"] => Some(FieldPath::Listen),
            ["settings" | "protocolSettings", rest @ ..] => parse_settings(rest),
            ["streamSettings" | "transportSettings", rest @ ..] => parse_stream(rest),
            ["sniffing" | "trafficSniffing", rest @ ..] => parse_sniffing(rest),
            _ => None,
        };
        let path = parsed.ok_or_else(|| UpdateError::UnknownPath(s.to_string()))?;

        match path.index() {
            Some(index) if index > MAX_LIST_INDEX => Err(UpdateError::IndexTooLarge {
                path: s.to_string(),
                index,
                max: MAX_LIST_INDEX,
            }),
            _ => Ok(path),
        }
    }
}

fn write_slot(f: &mut fmt::Formatter<'_>, base: &str, slot: &ListSlot) -> fmt::Result {
    match slot {
        ListSlot::All => f.write_str(base),
        ListSlot::At(i) => write!(f, "{}.{}", base, i),
    }
}

impl fmt::Display for FieldPath {
    /// Canonical wire-name spelling
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Tag => f.write_str("tag"),
            FieldPath::Port => f.write_str("port"),
            FieldPath::Listen => f.write_str("listen"),
            FieldPath::Method => f.write_str("settings.method"),
            FieldPath::Password => f.write_str("settings.password"),
            FieldPath::SettingsNetwork => f.write_str("settings.network"),
            FieldPath::Decryption => f.write_str("settings.decryption"),
            FieldPath::Client(i, field) => {
                let name = match field {
                    ClientField::Id => "id",
                    ClientField::Password => "password",
                    ClientField::Email => "email",
                    ClientField::Flow => "flow",
                };
                write!(f, "settings.clients.{}.{}", i, name)
            }
            FieldPath::TcpHeaderType => f.write_str("streamSettings.tcpSettings.header.type"),
            FieldPath::TcpRequestPath(s) => {
                write_slot(f, "streamSettings.tcpSettings.header.request.path", s)
            }
            FieldPath::TcpRequestHost(s) => {
                write_slot(f, "streamSettings.tcpSettings.header.request.headers.Host", s)
            }
            FieldPath::WsPath => f.write_str("streamSettings.wsSettings.path"),
            FieldPath::WsHost => f.write_str("streamSettings.wsSettings.host"),
            FieldPath::GrpcServiceName => f.write_str("streamSettings.grpcSettings.serviceName"),
            FieldPath::GrpcMultiMode => f.write_str("streamSettings.grpcSettings.multiMode"),
            FieldPath::HttpPath => f.write_str("streamSettings.httpSettings.path"),
            FieldPath::HttpHost(s) => write_slot(f, "streamSettings.httpSettings.host", s),
            FieldPath::TlsServerName => f.write_str("streamSettings.tlsSettings.serverName"),
            FieldPath::TlsAlpn(s) => write_slot(f, "streamSettings.tlsSettings.alpn", s),
            FieldPath::TlsCertificateFile(i) => write!(
                f,
                "streamSettings.tlsSettings.certificates.{}.certificateFile",
                i
            ),
            FieldPath::TlsKeyFile(i) => {
                write!(f, "streamSettings.tlsSettings.certificates.{}.keyFile", i)
            }
            FieldPath::RealityShow => f.write_str("streamSettings.realitySettings.show"),
            FieldPath::RealityDest => f.write_str("streamSettings.realitySettings.dest"),
            FieldPath::RealityServerNames(s) => {
                write_slot(f, "streamSettings.realitySettings.serverNames", s)
            }
            FieldPath::RealityPrivateKey => {
                f.write_str("streamSettings.realitySettings.privateKey")
            }
            FieldPath::RealityPublicKey => f.write_str("streamSettings.realitySettings.publicKey"),
            FieldPath::RealityShortIds(s) => {
                write_slot(f, "streamSettings.realitySettings.shortIds", s)
            }
            FieldPath::SniffingEnabled => f.write_str("sniffing.enabled"),
            FieldPath::SniffingDestOverride(s) => write_slot(f, "sniffing.destOverride", s),
        }
    }
}

/// A converted value for a sequence slot
enum ListWrite {
    Replace(Vec<String>),
    Item(usize, String),
}

impl ListWrite {
    /// Reject the write if any item is outside `allowed`.
    fn restrict(
        self,
        path: &FieldPath,
        allowed: &'static [&'static str],
    ) -> Result<Self, UpdateError> {
        let stray = match &self {
            ListWrite::Replace(items) => items
                .iter()
                .find(|item| !allowed.contains(&item.as_str()))
                .cloned(),
            ListWrite::Item(_, item) => {
                (!allowed.contains(&item.as_str())).then(|| item.clone())
            }
        };
        match stray {
            Some(value) => Err(path.not_offered(value, allowed)),
            None => Ok(self),
        }
    }

    fn apply(self, list: &mut Vec<String>) {
        match self {
            ListWrite::Replace(items) => *list = items,
            ListWrite::Item(index, item) => *grow(list, index) = item,
        }
    }
}

fn grow<T: Default>(list: &mut Vec<T>, index: usize) -> &mut T {
    if list.len() <= index {
        list.resize_with(index + 1, T::default);
    }
    &mut list[index]
}

impl FieldPath {
    /// The sequence index this path addresses, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            FieldPath::Client(i, _)
            | FieldPath::TlsCertificateFile(i)
            | FieldPath::TlsKeyFile(i) => Some(*i),
            FieldPath::TcpRequestPath(ListSlot::At(i))
            | FieldPath::TcpRequestHost(ListSlot::At(i))
            | FieldPath::HttpHost(ListSlot::At(i))
            | FieldPath::TlsAlpn(ListSlot::At(i))
            | FieldPath::RealityServerNames(ListSlot::At(i))
            | FieldPath::RealityShortIds(ListSlot::At(i))
            | FieldPath::SniffingDestOverride(ListSlot::At(i)) => Some(*i),
            _ => None,
        }
    }

    /// Whether the leaf holds a single string, so any input text is taken verbatim.
    pub fn takes_text(&self) -> bool {
        match self {
            FieldPath::Port
            | FieldPath::GrpcMultiMode
            | FieldPath::RealityShow
            | FieldPath::SniffingEnabled => false,
            FieldPath::TcpRequestPath(slot)
            | FieldPath::TcpRequestHost(slot)
            | FieldPath::HttpHost(slot)
            | FieldPath::TlsAlpn(slot)
            | FieldPath::RealityServerNames(slot)
            | FieldPath::RealityShortIds(slot)
            | FieldPath::SniffingDestOverride(slot) => matches!(slot, ListSlot::At(_)),
            _ => true,
        }
    }

    fn mismatch(&self, expected: &'static str) -> UpdateError {
        UpdateError::Type { path: self.to_string(), expected }
    }

    fn not_offered(&self, value: String, allowed: &'static [&'static str]) -> UpdateError {
        UpdateError::NotOffered { path: self.to_string(), value, allowed }
    }

    /// A string from a fixed catalog
    fn choice(
        &self,
        value: Value,
        allowed: &'static [&'static str],
    ) -> Result<String, UpdateError> {
        let text = self.text(value)?;
        if allowed.contains(&text.as_str()) {
            Ok(text)
        } else {
            Err(self.not_offered(text, allowed))
        }
    }

    fn text(&self, value: Value) -> Result<String, UpdateError> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch("a string")),
        }
    }

    fn flag(&self, value: Value) -> Result<bool, UpdateError> {
        value.as_bool().ok_or_else(|| self.mismatch("a boolean"))
    }

    fn integer(&self, value: Value) -> Result<i64, UpdateError> {
        value.as_i64().ok_or_else(|| self.mismatch("an integer"))
    }

    /// An array of strings, or one comma-separated string.
    fn text_list(&self, value: Value) -> Result<Vec<String>, UpdateError> {
        match value {
            Value::String(s) => Ok(s.split(',').map(|item| item.trim().to_string()).collect()),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(self.mismatch("an array of strings")),
                })
                .collect(),
            _ => Err(self.mismatch("an array of strings")),
        }
    }

    fn list_write(&self, slot: ListSlot, value: Value) -> Result<ListWrite, UpdateError> {
        match slot {
            ListSlot::All => Ok(ListWrite::Replace(self.text_list(value)?)),
            ListSlot::At(i) => Ok(ListWrite::Item(i, self.text(value)?)),
        }
    }

    /// Write `value` at this path. On error the inbound is left untouched.
    pub fn apply(&self, inbound: &mut InboundDefinition, value: Value) -> Result<(), UpdateError> {
        let stream = &mut inbound.stream_settings;
        match *self {
            FieldPath::Tag => inbound.tag = self.text(value)?,
            FieldPath::Port => inbound.port = self.integer(value)?,
            FieldPath::Listen => inbound.listen = self.text(value)?,

            FieldPath::Method => {
                inbound.settings.method = Some(self.choice(value, &SHADOWSOCKS_METHODS)?)
            }
            FieldPath::Password => inbound.settings.password = Some(self.text(value)?),
            FieldPath::SettingsNetwork => inbound.settings.network = Some(self.text(value)?),
            FieldPath::Decryption => inbound.settings.decryption = Some(self.text(value)?),
            FieldPath::Client(i, field) => {
                let text = self.text(value)?;
                let clients = inbound.settings.clients.get_or_insert_with(Vec::new);
                let client: &mut Client = grow(clients, i);
                let target = match field {
                    ClientField::Id => &mut client.id,
                    ClientField::Password => &mut client.password,
                    ClientField::Email => &mut client.email,
                    ClientField::Flow => &mut client.flow,
                };
                *target = Some(text);
            }

            FieldPath::TcpHeaderType => {
                let text = self.choice(value, &TCP_HEADER_TYPES)?;
                stream.tcp_settings.get_or_insert_with(Default::default).header.header_type = text;
            }
            FieldPath::TcpRequestPath(slot) => {
                let write = self.list_write(slot, value)?;
                let request = stream
                    .tcp_settings
                    .get_or_insert_with(Default::default)
                    .header
                    .request
                    .get_or_insert_with(Default::default);
                write.apply(request.path.get_or_insert_with(Vec::new));
            }
            FieldPath::TcpRequestHost(slot) => {
                let write = self.list_write(slot, value)?;
                let headers = stream
                    .tcp_settings
                    .get_or_insert_with(Default::default)
                    .header
                    .request
                    .get_or_insert_with(Default::default)
                    .headers
                    .get_or_insert_with(Default::default);
                write.apply(headers.host.get_or_insert_with(Vec::new));
            }

            FieldPath::WsPath => {
                let text = self.text(value)?;
                stream.ws_settings.get_or_insert_with(Default::default).path = text;
            }
            FieldPath::WsHost => {
                let text = self.text(value)?;
                stream.ws_settings.get_or_insert_with(Default::default).host = text;
            }

            FieldPath::GrpcServiceName => {
                let text = self.text(value)?;
                stream.grpc_settings.get_or_insert_with(Default::default).service_name = text;
            }
            FieldPath::GrpcMultiMode => {
                let flag = self.flag(value)?;
                stream.grpc_settings.get_or_insert_with(Default::default).multi_mode = flag;
            }

            FieldPath::HttpPath => {
                let text = self.text(value)?;
                stream.http_settings.get_or_insert_with(Default::default).path = text;
            }
            FieldPath::HttpHost(slot) => {
                let write = self.list_write(slot, value)?;
                write.apply(&mut stream.http_settings.get_or_insert_with(Default::default).host);
            }

            FieldPath::TlsServerName => {
                let text = self.text(value)?;
                stream.tls_settings.get_or_insert_with(Default::default).server_name = text;
            }
            FieldPath::TlsAlpn(slot) => {
                let write = self.list_write(slot, value)?.restrict(self, &ALPN_PROTOCOLS)?;
                write.apply(&mut stream.tls_settings.get_or_insert_with(Default::default).alpn);
            }
            FieldPath::TlsCertificateFile(i) => {
                let text = self.text(value)?;
                let tls = stream.tls_settings.get_or_insert_with(Default::default);
                grow(&mut tls.certificates, i).certificate_file = text;
            }
            FieldPath::TlsKeyFile(i) => {
                let text = self.text(value)?;
                let tls = stream.tls_settings.get_or_insert_with(Default::default);
                grow(&mut tls.certificates, i).key_file = text;
            }

            FieldPath::RealityShow => {
                let flag = self.flag(value)?;
                stream.reality_settings.get_or_insert_with(Default::default).show = flag;
            }
            FieldPath::RealityDest => {
                let text = self.text(value)?;
                stream.reality_settings.get_or_insert_with(Default::default).dest = text;
            }
            FieldPath::RealityServerNames(slot) => {
                let write = self.list_write(slot, value)?;
                let reality = stream.reality_settings.get_or_insert_with(Default::default);
                write.apply(&mut reality.server_names);
            }
            FieldPath::RealityPrivateKey => {
                let text = self.text(value)?;
                stream.reality_settings.get_or_insert_with(Default::default).private_key = text;
            }
            FieldPath::RealityPublicKey => {
                let text = self.text(value)?;
                stream.reality_settings.get_or_insert_with(Default::default).public_key = text;
            }
            FieldPath::RealityShortIds(slot) => {
                let write = self.list_write(slot, value)?;
                let reality = stream.reality_settings.get_or_insert_with(Default::default);
                write.apply(&mut reality.short_ids);
            }

            FieldPath::SniffingEnabled => {
                let flag = self.flag(value)?;
                inbound.sniffing.get_or_insert_with(Sniffing::default).enabled = flag;
            }
            FieldPath::SniffingDestOverride(slot) => {
                let write = self.list_write(slot, value)?;
                let sniffing = inbound.sniffing.get_or_insert_with(Sniffing::default);
                write.apply(&mut sniffing.dest_override);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::default_inbound;
    use serde_json::json;

    fn apply(inbound: &mut InboundDefinition, path: &str, value: Value) {
        path.parse::<FieldPath>().unwrap().apply(inbound, value).unwrap();
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "transportSettings.wsSettings.path".parse::<FieldPath>().unwrap(),
            FieldPath::WsPath
        );
        assert_eq!("listenAddress".parse::<FieldPath>().unwrap(), FieldPath::Listen);
        assert_eq!(
            "trafficSniffing.destinationOverride.1".parse::<FieldPath>().unwrap(),
            FieldPath::SniffingDestOverride(ListSlot::At(1))
        );
        assert_eq!(
            "protocolSettings.clients.0.id".parse::<FieldPath>().unwrap(),
            FieldPath::Client(0, ClientField::Id)
        );
    }

    #[test]
    fn test_display_is_canonical() {
        let paths = [
            "streamSettings.tlsSettings.certificates.0.certificateFile",
            "streamSettings.realitySettings.shortIds.2",
            "streamSettings.tcpSettings.header.request.headers.Host",
            "settings.clients.3.flow",
            "sniffing.destOverride",
        ];
        for text in paths {
            assert_eq!(text.parse::<FieldPath>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_rejects_unknown_and_selector_paths() {
        assert_eq!(
            "streamSettings.wsSettings.nope".parse::<FieldPath>(),
            Err(UpdateError::UnknownPath("streamSettings.wsSettings.nope".to_string()))
        );
        assert!(matches!(
            "".parse::<FieldPath>(),
            Err(UpdateError::UnknownPath(_))
        ));
        assert!(matches!(
            "tag.extra".parse::<FieldPath>(),
            Err(UpdateError::UnknownPath(_))
        ));
        assert!(matches!(
            "protocol".parse::<FieldPath>(),
            Err(UpdateError::Selector { setter: "set_protocol", .. })
        ));
        assert!(matches!(
            "transportSettings.network".parse::<FieldPath>(),
            Err(UpdateError::Selector { setter: "set_network", .. })
        ));
        assert!(matches!(
            "streamSettings.realitySettings.shortIds.-1".parse::<FieldPath>(),
            Err(UpdateError::UnknownPath(_))
        ));
    }

    #[test]
    fn test_rejects_huge_index() {
        let err = "streamSettings.realitySettings.shortIds.99999999999999999999999"
            .parse::<FieldPath>()
            .unwrap_err();
        assert!(matches!(err, UpdateError::IndexTooLarge { .. }));
    }

    #[test]
    fn test_sets_leaf_and_keeps_siblings() {
        let mut inbound = default_inbound();
        apply(&mut inbound, "sniffing.enabled", json!(false));
        let sniffing = inbound.sniffing.as_ref().unwrap();
        assert!(!sniffing.enabled);
        assert_eq!(sniffing.dest_override, vec!["http", "tls"]);
        assert_eq!(inbound.tag, "");
    }

    #[test]
    fn test_creates_missing_subobjects() {
        let mut inbound = default_inbound();
        assert!(inbound.stream_settings.tls_settings.is_none());

        apply(
            &mut inbound,
            "streamSettings.tlsSettings.certificates.1.keyFile",
            json!("/etc/ssl/key.pem"),
        );
        let tls = inbound.stream_settings.tls_settings.as_ref().unwrap();
        assert_eq!(tls.certificates.len(), 2);
        assert_eq!(tls.certificates[1].key_file, "/etc/ssl/key.pem");
        assert_eq!(tls.alpn, vec!["h2", "http/1.1"]);
    }

    #[test]
    fn test_tcp_request_headers() {
        let mut inbound = default_inbound();
        apply(&mut inbound, "streamSettings.tcpSettings.header.type", json!("http"));
        apply(
            &mut inbound,
            "streamSettings.tcpSettings.header.request.headers.Host.1",
            json!("www.bing.com"),
        );
        let value = inbound.to_value().unwrap();
        assert_eq!(
            value["streamSettings"]["tcpSettings"],
            json!({"header": {"type": "http", "request": {"headers": {"Host": ["", "www.bing.com"]}}}})
        );
    }

    #[test]
    fn test_list_values() {
        let mut inbound = default_inbound();
        apply(&mut inbound, "streamSettings.tlsSettings.alpn", json!("h2,http/1.1"));
        apply(
            &mut inbound,
            "streamSettings.realitySettings.serverNames",
            json!(["a.example", "b.example"]),
        );
        apply(&mut inbound, "streamSettings.realitySettings.shortIds.0", json!("6ba85179e30d4fc2"));

        let stream = &inbound.stream_settings;
        assert_eq!(stream.tls_settings.as_ref().unwrap().alpn, vec!["h2", "http/1.1"]);
        let reality = stream.reality_settings.as_ref().unwrap();
        assert_eq!(reality.server_names, vec!["a.example", "b.example"]);
        assert_eq!(reality.short_ids, vec!["6ba85179e30d4fc2"]);
    }

    #[test]
    fn test_type_mismatch_leaves_draft_untouched() {
        let mut inbound = default_inbound();
        let before = inbound.clone();

        let err = FieldPath::WsPath.apply(&mut inbound, json!(42)).unwrap_err();
        assert_eq!(
            err,
            UpdateError::Type {
                path: "streamSettings.wsSettings.path".to_string(),
                expected: "a string"
            }
        );
        assert!(FieldPath::Port.apply(&mut inbound, json!("443")).is_err());
        assert!(FieldPath::TlsAlpn(ListSlot::All).apply(&mut inbound, json!([1, 2])).is_err());
        assert_eq!(inbound, before);
    }

    #[test]
    fn test_catalog_fields_reject_unknown_values() {
        let mut inbound = default_inbound();
        let before = inbound.clone();

        let err = FieldPath::Method.apply(&mut inbound, json!("rc4-md5")).unwrap_err();
        assert!(matches!(
            &err,
            UpdateError::NotOffered { value, .. } if value == "rc4-md5"
        ));
        assert!(err.to_string().contains("aes-256-gcm"));
        assert!(FieldPath::TcpHeaderType.apply(&mut inbound, json!("srtp")).is_err());
        assert!(FieldPath::TlsAlpn(ListSlot::All)
            .apply(&mut inbound, json!("h2,h3"))
            .is_err());
        assert!(FieldPath::TlsAlpn(ListSlot::At(0))
            .apply(&mut inbound, json!("spdy/3"))
            .is_err());
        assert_eq!(inbound, before);

        apply(&mut inbound, "settings.method", json!("2022-blake3-aes-256-gcm"));
        apply(&mut inbound, "streamSettings.tlsSettings.alpn.0", json!("http/1.1"));
        assert_eq!(inbound.settings.method.as_deref(), Some("2022-blake3-aes-256-gcm"));
        assert_eq!(
            inbound.stream_settings.tls_settings.as_ref().unwrap().alpn,
            vec!["http/1.1"]
        );
    }

    #[test]
    fn test_takes_text() {
        assert!(FieldPath::Tag.takes_text());
        assert!(FieldPath::RealityShortIds(ListSlot::At(0)).takes_text());
        assert!(FieldPath::Client(0, ClientField::Password).takes_text());
        assert!(!FieldPath::RealityShortIds(ListSlot::All).takes_text());
        assert!(!FieldPath::Port.takes_text());
        assert!(!FieldPath::SniffingEnabled.takes_text());
    }

    #[test]
    fn test_clients() {
        let mut inbound = default_inbound();
        apply(&mut inbound, "settings.clients.0.id", json!("b831381d-6324-4d53-ad4f-8cda48b30811"));
        apply(&mut inbound, "settings.clients.0.flow", json!("xtls-rprx-vision"));
        let clients = inbound.settings.clients.as_ref().unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].flow.as_deref(), Some("xtls-rprx-vision"));
    }

    #[test]
    fn test_port_accepts_out_of_range() {
        let mut inbound = default_inbound();
        apply(&mut inbound, "port", json!(70000));
        assert_eq!(inbound.port, 70000);
    }
}
