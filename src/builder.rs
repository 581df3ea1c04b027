// 入站构建器：草稿 + 上次提交的校验错误
use crate::config::{BuilderOptions, PortReset};
use crate::inbound::{default_inbound, default_protocol_settings, InboundDefinition};
use crate::path::{FieldPath, UpdateError};
use crate::protocol::{Network, Protocol, Security};
use crate::validate::{validate_inbound, ValidationErrors};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Leaves are written through [`InboundBuilder::update_field`]; protocol,
/// network and security go through their own setters, which rebuild the
/// affected part of the draft.
#[derive(Debug, Clone)]
pub struct InboundBuilder {
    draft: InboundDefinition,
    errors: ValidationErrors,
    options: BuilderOptions,
}

impl Default for InboundBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InboundBuilder {
    pub fn new() -> Self {
        Self::with_options(BuilderOptions::default())
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            draft: default_inbound(),
            errors: ValidationErrors::new(),
            options,
        }
    }

    pub fn draft(&self) -> &InboundDefinition {
        &self.draft
    }

    /// Errors recorded by the last failed [`submit`](Self::submit).
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Set one leaf addressed by a dotted path. No validation happens here.
    pub fn update_field(&mut self, path: &str, value: impl Into<Value>) -> Result<(), UpdateError> {
        let result = path
            .parse::<FieldPath>()
            .and_then(|field| field.apply(&mut self.draft, value.into()).map(|_| field));

        match result {
            Ok(field) => {
                debug!("Updated {}", field);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected update of {}: {}", path, e);
                Err(e)
            }
        }
    }

    /// Switch protocol: settings are rebuilt for the new protocol and the
    /// port follows the configured [`PortReset`] policy. Stream settings stay.
    pub fn set_protocol(&mut self, protocol: Protocol) {
        let previous = self.draft.protocol;
        let reset_port = match self.options.port_reset {
            PortReset::Always => true,
            PortReset::KeepCustom => self.draft.port == previous.default_port(),
        };

        self.draft.protocol = protocol;
        if reset_port {
            self.draft.port = protocol.default_port();
        }
        self.draft.settings = default_protocol_settings(protocol);

        debug!(
            "Protocol {} -> {}, port {}",
            previous, protocol, self.draft.port
        );
    }

    /// Switch security; tls/reality sub-objects are replaced by fresh defaults.
    pub fn set_security(&mut self, security: Security) {
        let previous = self.draft.stream_settings.security;
        self.draft.stream_settings = self.draft.stream_settings.switch_security(security);
        debug!("Security {} -> {}", previous, security);
    }

    /// Switch network; the security sub-object is kept as is.
    pub fn set_network(&mut self, network: Network) {
        let previous = self.draft.stream_settings.network;
        self.draft.stream_settings = self
            .draft
            .stream_settings
            .switch_network(network, self.options.bare_transports);
        debug!("Network {} -> {}", previous, network);
    }

    pub fn validate(&self, existing_tags: &HashSet<String>) -> Result<(), ValidationErrors> {
        validate_inbound(&self.draft, existing_tags)
    }

    /// Validate and emit the draft.
    ///
    /// On success the draft is replaced by a fresh default and the emitted
    /// inbound is returned. On failure the errors are recorded and returned,
    /// and the draft is left as it was.
    pub fn submit(
        &mut self,
        existing_tags: &HashSet<String>,
    ) -> Result<InboundDefinition, ValidationErrors> {
        if let Err(errors) = self.validate(existing_tags) {
            debug!("Submission rejected: {}", errors);
            self.errors = errors.clone();
            return Err(errors);
        }

        let mut inbound = std::mem::replace(&mut self.draft, default_inbound());
        self.errors.clear();

        if self.options.prune_on_submit {
            let removed = inbound.stream_settings.prune();
            if removed > 0 {
                debug!("Pruned {} stale sub-object(s) from {}", removed, inbound.tag);
            }
        }

        info!(
            "Inbound {} ready: {}/{}/{} on {}:{}",
            inbound.tag,
            inbound.protocol,
            inbound.stream_settings.network,
            inbound.stream_settings.security,
            inbound.listen,
            inbound.port
        );
        Ok(inbound)
    }

    /// Discard the draft and all recorded errors.
    pub fn reset(&mut self) {
        self.draft = default_inbound();
        self.errors.clear();
        debug!("Builder reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BareTransports;
    use crate::settings::{BareNetwork, ProtocolSettings, SecuritySettings, TransportSettings};
    use crate::validate::FieldError;
    use serde_json::json;

    fn tags(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_network_transitions() {
        let mut builder = InboundBuilder::new();
        for from in Network::ALL {
            for to in Network::ALL.into_iter().filter(|n| n.has_defaults()) {
                builder.set_network(from);
                builder.set_network(to);
                let transports = builder.draft().stream_settings.transports();
                assert_eq!(transports.len(), 1, "{} -> {}", from, to);
                assert_eq!(Some(transports[0].clone()), TransportSettings::defaults_for(to));
            }
        }
    }

    #[test]
    fn test_bare_network_transitions() {
        let mut builder = InboundBuilder::new();
        builder.set_network(Network::Ws);
        builder.set_network(Network::Quic);
        assert!(builder.draft().stream_settings.transports().is_empty());
        assert_eq!(builder.draft().stream_settings.network, Network::Quic);

        let mut builder = InboundBuilder::with_options(BuilderOptions {
            bare_transports: BareTransports::Empty,
            ..BuilderOptions::default()
        });
        builder.set_network(Network::Ws);
        builder.set_network(Network::SplitHttp);
        assert_eq!(
            builder.draft().stream_settings.transports(),
            vec![TransportSettings::Bare(BareNetwork::SplitHttp)]
        );
    }

    #[test]
    fn test_security_transitions_restore_defaults() {
        let mut builder = InboundBuilder::new();
        builder.set_security(Security::Reality);
        builder.update_field("streamSettings.realitySettings.privateKey", "secret").unwrap();
        builder.set_security(Security::Tls);
        builder.update_field("streamSettings.tlsSettings.serverName", "example.com").unwrap();

        builder.set_security(Security::Reality);
        let stream = &builder.draft().stream_settings;
        assert_eq!(
            stream.securities(),
            vec![SecuritySettings::defaults_for(Security::Reality).unwrap()]
        );

        builder.set_security(Security::Tls);
        assert_eq!(
            builder.draft().stream_settings.securities(),
            vec![SecuritySettings::defaults_for(Security::Tls).unwrap()]
        );

        builder.set_security(Security::None);
        assert!(builder.draft().stream_settings.securities().is_empty());
    }

    #[test]
    fn test_set_security_keeps_transport() {
        let mut builder = InboundBuilder::new();
        builder.set_network(Network::Grpc);
        builder.update_field("streamSettings.grpcSettings.serviceName", "tunnel").unwrap();
        builder.set_security(Security::Tls);

        let stream = &builder.draft().stream_settings;
        assert_eq!(stream.network, Network::Grpc);
        assert_eq!(stream.grpc_settings.as_ref().unwrap().service_name, "tunnel");
    }

    #[test]
    fn test_set_network_preserves_security_subobject() {
        let mut builder = InboundBuilder::new();
        builder.set_security(Security::Tls);
        builder
            .update_field("streamSettings.tlsSettings.certificates.0.certificateFile", "/c.pem")
            .unwrap();
        let before = builder.draft().stream_settings.tls_settings.clone();

        builder.set_network(Network::Ws);
        builder.set_network(Network::Http);
        let stream = &builder.draft().stream_settings;
        assert_eq!(stream.security, Security::Tls);
        assert_eq!(stream.tls_settings, before);
    }

    #[test]
    fn test_protocol_settings_shapes() {
        let mut builder = InboundBuilder::new();
        builder.set_protocol(Protocol::Shadowsocks);
        assert_eq!(
            serde_json::to_value(&builder.draft().settings).unwrap(),
            json!({"method": "chacha20-ietf-poly1305", "password": "", "network": "tcp,udp"})
        );
        assert_eq!(builder.draft().port, 8388);

        builder.set_protocol(Protocol::Vless);
        assert_eq!(
            serde_json::to_value(&builder.draft().settings).unwrap(),
            json!({"clients": [], "decryption": "none"})
        );
        assert_eq!(builder.draft().port, 443);
    }

    #[test]
    fn test_set_protocol_keeps_stream() {
        let mut builder = InboundBuilder::new();
        builder.set_network(Network::Ws);
        builder.set_security(Security::Tls);
        let stream = builder.draft().stream_settings.clone();

        builder.set_protocol(Protocol::Trojan);
        assert_eq!(builder.draft().stream_settings, stream);
        assert_eq!(builder.draft().settings, ProtocolSettings::for_protocol(Protocol::Trojan));
    }

    #[test]
    fn test_port_reset_policies() {
        let mut builder = InboundBuilder::new();
        builder.update_field("port", 2053).unwrap();
        builder.set_protocol(Protocol::Shadowsocks);
        assert_eq!(builder.draft().port, 8388);

        let mut builder = InboundBuilder::with_options(BuilderOptions {
            port_reset: PortReset::KeepCustom,
            ..BuilderOptions::default()
        });
        builder.set_protocol(Protocol::Shadowsocks);
        assert_eq!(builder.draft().port, 8388);
        builder.update_field("port", 2053).unwrap();
        builder.set_protocol(Protocol::Vmess);
        assert_eq!(builder.draft().port, 2053);
    }

    #[test]
    fn test_validate_tag_flow() {
        let mut builder = InboundBuilder::new();
        let errors = builder.validate(&HashSet::new()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("tag"), Some(&FieldError::TagRequired));

        builder.update_field("tag", "x").unwrap();
        let errors = builder.validate(&tags(&["x"])).unwrap_err();
        assert_eq!(errors.get("tag"), Some(&FieldError::TagExists));
        assert!(builder.validate(&tags(&["y"])).is_ok());
    }

    #[test]
    fn test_reality_errors_together() {
        let mut builder = InboundBuilder::new();
        builder.update_field("tag", "reality-in").unwrap();
        builder.set_security(Security::Reality);

        let errors = builder.validate(&HashSet::new()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("privateKey"), Some(&FieldError::PrivateKeyRequired));
        assert_eq!(errors.get("shortIds"), Some(&FieldError::ShortIdRequired));
    }

    #[test]
    fn test_update_is_not_gated_on_network() {
        let mut builder = InboundBuilder::new();
        assert_eq!(builder.draft().stream_settings.network, Network::Tcp);

        builder.update_field("transportSettings.wsSettings.path", "/ws").unwrap();
        let stream = &builder.draft().stream_settings;
        assert_eq!(stream.network, Network::Tcp);
        assert_eq!(stream.ws_settings.as_ref().unwrap().path, "/ws");
    }

    #[test]
    fn test_rejected_update_keeps_draft() {
        let mut builder = InboundBuilder::new();
        let before = builder.draft().clone();
        assert!(builder.update_field("streamSettings.bogus", "x").is_err());
        assert!(builder.update_field("protocol", "trojan").is_err());
        assert!(builder.update_field("port", "443").is_err());
        assert_eq!(builder.draft(), &before);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut builder = InboundBuilder::new();
        builder.update_field("tag", "dirty").unwrap();
        builder.set_protocol(Protocol::Shadowsocks);
        builder.set_network(Network::Grpc);
        builder.set_security(Security::Reality);
        builder.update_field("sniffing.enabled", false).unwrap();
        builder.update_field("port", 0).unwrap();
        assert!(builder.submit(&HashSet::new()).is_err());
        assert!(!builder.errors().is_empty());

        builder.reset();
        assert_eq!(builder.draft(), &default_inbound());
        assert_eq!(
            serde_json::to_string(builder.draft()).unwrap(),
            serde_json::to_string(&default_inbound()).unwrap()
        );
        assert!(builder.errors().is_empty());
    }

    #[test]
    fn test_failed_submit_is_idempotent() {
        let mut builder = InboundBuilder::new();
        builder.update_field("port", 70000).unwrap();
        let before = builder.draft().clone();

        let first = builder.submit(&HashSet::new()).unwrap_err();
        assert_eq!(builder.draft(), &before);
        let second = builder.submit(&HashSet::new()).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(builder.errors(), &second);
        assert!(first.contains("tag"));
        assert!(first.contains("port"));
    }

    #[test]
    fn test_successful_submit_resets() {
        let mut builder = InboundBuilder::new();
        builder.update_field("tag", "VLESS-WS-TLS").unwrap();
        builder.set_network(Network::Ws);
        builder.set_security(Security::Tls);
        builder.update_field("streamSettings.wsSettings.path", "/ray").unwrap();

        let inbound = builder.submit(&tags(&["other"])).unwrap();
        assert_eq!(inbound.tag, "VLESS-WS-TLS");
        assert_eq!(inbound.stream_settings.ws_settings.as_ref().unwrap().path, "/ray");
        assert!(inbound.stream_settings.tls_settings.is_some());

        assert_eq!(builder.draft(), &default_inbound());
        assert!(builder.errors().is_empty());
    }

    #[test]
    fn test_submit_errors_cleared_by_success() {
        let mut builder = InboundBuilder::new();
        assert!(builder.submit(&HashSet::new()).is_err());
        assert!(builder.errors().contains("tag"));

        builder.update_field("tag", "ok").unwrap();
        assert!(builder.submit(&HashSet::new()).is_ok());
        assert!(builder.errors().is_empty());
    }

    #[test]
    fn test_submit_prunes_stray_subobjects() {
        let mut builder = InboundBuilder::new();
        builder.update_field("tag", "tcp-in").unwrap();
        builder.set_network(Network::Tcp);
        builder.update_field("streamSettings.wsSettings.path", "/ws").unwrap();
        builder.update_field("streamSettings.realitySettings.privateKey", "k").unwrap();

        let inbound = builder.submit(&HashSet::new()).unwrap();
        let value = inbound.to_value().unwrap();
        assert!(value["streamSettings"].get("wsSettings").is_none());
        assert!(value["streamSettings"].get("realitySettings").is_none());
        assert!(value["streamSettings"].get("tcpSettings").is_some());

        let mut builder = InboundBuilder::with_options(BuilderOptions {
            prune_on_submit: false,
            ..BuilderOptions::default()
        });
        builder.update_field("tag", "tcp-in").unwrap();
        builder.update_field("streamSettings.wsSettings.path", "/ws").unwrap();
        let inbound = builder.submit(&HashSet::new()).unwrap();
        assert!(inbound.stream_settings.ws_settings.is_some());
    }
}
