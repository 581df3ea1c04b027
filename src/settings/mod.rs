// 入站子配置：协议设置、传输设置、安全设置
pub mod protocol;
pub mod security;
pub mod stream;
pub mod transport;

pub use protocol::{Client, ProtocolSettings};
pub use security::{Certificate, RealitySettings, SecuritySettings, TlsSettings};
pub use stream::StreamSettings;
pub use transport::{
    BareNetwork, BareSettings, GrpcSettings, HttpRequestHeader, HttpSettings, RequestHeaders, TcpHeader,
    TcpSettings, TransportSettings, WsSettings,
};
