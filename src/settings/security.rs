// 安全层子配置 (TLS / Reality)
use crate::protocol::Security;
use serde::{Deserialize, Serialize};

/// `tlsSettings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub alpn: Vec<String>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

impl Default for TlsSettings {
    fn default() -> Self {
        Self {
            server_name: String::new(),
            alpn: vec!["h2".to_string(), "http/1.1".to_string()],
            certificates: vec![Certificate::default()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(default)]
    pub certificate_file: String,
    #[serde(default)]
    pub key_file: String,
}

/// `realitySettings`
///
/// Key material is never generated here; `private_key` and `short_ids` start
/// empty and are checked on validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealitySettings {
    #[serde(default)]
    pub show: bool,
    #[serde(default)]
    pub dest: String,
    #[serde(default)]
    pub server_names: Vec<String>,
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub short_ids: Vec<String>,
}

impl Default for RealitySettings {
    fn default() -> Self {
        Self {
            show: false,
            dest: "www.google.com:443".to_string(),
            server_names: vec!["www.google.com".to_string()],
            private_key: String::new(),
            public_key: String::new(),
            short_ids: vec![String::new()],
        }
    }
}

/// One security sub-object, tagged by mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecuritySettings {
    Tls(TlsSettings),
    Reality(RealitySettings),
}

impl SecuritySettings {
    /// Default sub-object for `security`; `none` has no sub-object.
    pub fn defaults_for(security: Security) -> Option<Self> {
        match security {
            Security::None => None,
            Security::Tls => Some(SecuritySettings::Tls(TlsSettings::default())),
            Security::Reality => Some(SecuritySettings::Reality(RealitySettings::default())),
        }
    }

    pub fn security(&self) -> Security {
        match self {
            SecuritySettings::Tls(_) => Security::Tls,
            SecuritySettings::Reality(_) => Security::Reality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tls_defaults() {
        assert_eq!(
            serde_json::to_value(TlsSettings::default()).unwrap(),
            json!({
                "serverName": "",
                "alpn": ["h2", "http/1.1"],
                "certificates": [{"certificateFile": "", "keyFile": ""}]
            })
        );
    }

    #[test]
    fn test_reality_defaults() {
        assert_eq!(
            serde_json::to_value(RealitySettings::default()).unwrap(),
            json!({
                "show": false,
                "dest": "www.google.com:443",
                "serverNames": ["www.google.com"],
                "privateKey": "",
                "publicKey": "",
                "shortIds": [""]
            })
        );
    }

    #[test]
    fn test_none_has_no_subobject() {
        assert!(SecuritySettings::defaults_for(Security::None).is_none());
        let tls = SecuritySettings::defaults_for(Security::Tls).unwrap();
        assert_eq!(tls.security(), Security::Tls);
    }

    #[test]
    fn test_partial_reality_leaves_missing_fields_empty() {
        let reality: RealitySettings =
            serde_json::from_value(json!({"privateKey": "abc"})).unwrap();
        assert_eq!(reality.private_key, "abc");
        assert!(reality.short_ids.is_empty());
        assert!(reality.server_names.is_empty());
        assert_eq!(reality.dest, "");
        assert!(!reality.show);
    }
}
