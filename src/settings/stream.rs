use crate::config::BareTransports;
use crate::protocol::{Network, Security};
use crate::settings::security::{RealitySettings, SecuritySettings, TlsSettings};
use crate::settings::transport::{
    BareNetwork, BareSettings, GrpcSettings, HttpSettings, TcpSettings, TransportSettings,
    WsSettings,
};
use serde::{Deserialize, Serialize};

/// `streamSettings`: network + security selection and their sub-objects.
///
/// Every sub-object has its own slot so the struct serializes to the engine's
/// layout. The builder only reaches a new network or security through
/// [`StreamSettings::switch_network`] and [`StreamSettings::switch_security`],
/// which construct a fresh value rather than editing slots in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSettings {
    pub network: Network,
    pub security: Security,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_settings: Option<TlsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reality_settings: Option<RealitySettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_settings: Option<TcpSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_settings: Option<WsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc_settings: Option<GrpcSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_settings: Option<HttpSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quic_settings: Option<BareSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcp_settings: Option<BareSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub httpupgrade_settings: Option<BareSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splithttp_settings: Option<BareSettings>,
}

impl StreamSettings {
    /// Selection only, no sub-objects.
    pub fn new(network: Network, security: Security) -> Self {
        Self {
            network,
            security,
            tls_settings: None,
            reality_settings: None,
            tcp_settings: None,
            ws_settings: None,
            grpc_settings: None,
            http_settings: None,
            quic_settings: None,
            kcp_settings: None,
            httpupgrade_settings: None,
            splithttp_settings: None,
        }
    }

    /// Rebuild for `network`. The current security and its matching
    /// sub-object are carried over unchanged; every transport sub-object is
    /// dropped and the new network's defaults are installed.
    pub fn switch_network(&self, network: Network, bare: BareTransports) -> Self {
        let mut next = StreamSettings::new(network, self.security);
        if let Some(security) = self.active_security() {
            next.install_security(security);
        }

        if let Some(transport) = TransportSettings::defaults_for(network) {
            next.install_transport(transport);
        } else if bare == BareTransports::Empty {
            if let Some(kind) = BareNetwork::from_network(network) {
                next.install_transport(TransportSettings::Bare(kind));
            }
        }
        next
    }

    /// Replace the security mode. Existing tls/reality sub-objects are
    /// discarded, so switching back always yields fresh defaults.
    pub fn switch_security(&self, security: Security) -> Self {
        let mut next = self.clone();
        next.security = security;
        next.tls_settings = None;
        next.reality_settings = None;
        if let Some(settings) = SecuritySettings::defaults_for(security) {
            next.install_security(settings);
        }
        next
    }

    pub fn install_transport(&mut self, transport: TransportSettings) {
        match transport {
            TransportSettings::Tcp(s) => self.tcp_settings = Some(s),
            TransportSettings::Ws(s) => self.ws_settings = Some(s),
            TransportSettings::Grpc(s) => self.grpc_settings = Some(s),
            TransportSettings::Http(s) => self.http_settings = Some(s),
            TransportSettings::Bare(bare) => {
                let slot = match bare {
                    BareNetwork::Quic => &mut self.quic_settings,
                    BareNetwork::Kcp => &mut self.kcp_settings,
                    BareNetwork::HttpUpgrade => &mut self.httpupgrade_settings,
                    BareNetwork::SplitHttp => &mut self.splithttp_settings,
                };
                *slot = Some(BareSettings::default());
            }
        }
    }

    pub fn install_security(&mut self, security: SecuritySettings) {
        match security {
            SecuritySettings::Tls(s) => self.tls_settings = Some(s),
            SecuritySettings::Reality(s) => self.reality_settings = Some(s),
        }
    }

    /// All transport sub-objects currently present, in slot order.
    pub fn transports(&self) -> Vec<TransportSettings> {
        let mut present = Vec::new();
        if let Some(s) = &self.tcp_settings {
            present.push(TransportSettings::Tcp(s.clone()));
        }
        if let Some(s) = &self.ws_settings {
            present.push(TransportSettings::Ws(s.clone()));
        }
        if let Some(s) = &self.grpc_settings {
            present.push(TransportSettings::Grpc(s.clone()));
        }
        if let Some(s) = &self.http_settings {
            present.push(TransportSettings::Http(s.clone()));
        }
        let bare_slots = [
            (BareNetwork::Quic, &self.quic_settings),
            (BareNetwork::Kcp, &self.kcp_settings),
            (BareNetwork::HttpUpgrade, &self.httpupgrade_settings),
            (BareNetwork::SplitHttp, &self.splithttp_settings),
        ];
        for (kind, slot) in bare_slots {
            if slot.is_some() {
                present.push(TransportSettings::Bare(kind));
            }
        }
        present
    }

    /// All security sub-objects currently present.
    pub fn securities(&self) -> Vec<SecuritySettings> {
        let mut present = Vec::new();
        if let Some(s) = &self.tls_settings {
            present.push(SecuritySettings::Tls(s.clone()));
        }
        if let Some(s) = &self.reality_settings {
            present.push(SecuritySettings::Reality(s.clone()));
        }
        present
    }

    /// The security sub-object matching `security`, if present.
    pub fn active_security(&self) -> Option<SecuritySettings> {
        match self.security {
            Security::None => None,
            Security::Tls => self.tls_settings.clone().map(SecuritySettings::Tls),
            Security::Reality => self.reality_settings.clone().map(SecuritySettings::Reality),
        }
    }

    /// Drop sub-objects that don't match the selected network/security.
    /// Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.transports().len() + self.securities().len();

        let mut kept = StreamSettings::new(self.network, self.security);
        for transport in self.transports() {
            if transport.network() == self.network {
                kept.install_transport(transport);
            }
        }
        if let Some(security) = self.active_security() {
            kept.install_security(security);
        }

        let after = kept.transports().len() + kept.securities().len();
        *self = kept;
        before - after
    }
}
