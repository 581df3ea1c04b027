pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod inbound;
pub mod path;
pub mod protocol;
pub mod settings;
pub mod summary;
pub mod validate;

pub use builder::InboundBuilder;
pub use config::{AppConfig, BareTransports, BuilderOptions, PortReset};
pub use document::ConfigDocument;
pub use error::{BuilderError, Result};
pub use inbound::{
    default_inbound, default_protocol_settings, default_security_subobject,
    default_transport_subobject, InboundDefinition, Sniffing,
};
pub use path::{FieldPath, UpdateError};
pub use protocol::{Network, Protocol, Security};
pub use settings::{ProtocolSettings, SecuritySettings, StreamSettings, TransportSettings};
pub use summary::InboundSummary;
pub use validate::{validate_inbound, FieldError, ValidationErrors};
