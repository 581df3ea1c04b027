use crate::error::{BuilderError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tag of the engine's management inbound; never shown or edited as a user inbound.
pub const API_INBOUND_TAG: &str = "API_INBOUND";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Builder behaviour
    #[serde(default)]
    pub builder: BuilderOptions,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Server configuration document handling
    #[serde(default)]
    pub document: DocumentConfig,
}

/// What to install for networks without builder defaults
/// (quic, kcp, httpupgrade, splithttp).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BareTransports {
    /// No sub-object; the engine gets a bare network selection.
    #[default]
    Omit,
    /// An empty `{}` sub-object named after the network.
    Empty,
}

/// Port handling on protocol change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortReset {
    /// Always reset to the new protocol's default port.
    #[default]
    Always,
    /// Reset only while the port still equals the previous protocol's default.
    KeepCustom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    pub bare_transports: BareTransports,
    pub port_reset: PortReset,
    /// Strip transport/security sub-objects that don't match the selection
    /// from the emitted inbound.
    pub prune_on_submit: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            bare_transports: BareTransports::Omit,
            port_reset: PortReset::Always,
            prune_on_submit: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Inbound tags hidden from the user inbound list
    pub reserved_tags: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            reserved_tags: vec![API_INBOUND_TAG.to_string()],
        }
    }
}

fn is_ron<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().extension().map_or(false, |ext| ext == "ron")
}

impl AppConfig {
    /// Load configuration from a TOML file, or RON when the extension is `.ron`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: AppConfig = if is_ron(path) {
            ron::from_str(&content)
                .map_err(|e| BuilderError::Config(format!("Invalid RON config: {}", e)))?
        } else {
            toml::from_str(&content)
                .map_err(|e| BuilderError::Config(format!("Invalid configuration: {}", e)))?
        };

        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save configuration, format chosen by extension like [`AppConfig::from_file`]
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = if is_ron(path) {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| BuilderError::Config(format!("Failed to serialize config: {}", e)))?
        } else {
            toml::to_string_pretty(self)
                .map_err(|e| BuilderError::Config(format!("Failed to serialize config: {}", e)))?
        };

        fs::write(path, content)?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            other => {
                return Err(BuilderError::Config(format!("Invalid log level: {}", other)));
            }
        }

        if self.document.reserved_tags.iter().any(|tag| tag.is_empty()) {
            return Err(BuilderError::Config(
                "reserved_tags must not contain empty tags".to_string(),
            ));
        }

        Ok(())
    }
}
