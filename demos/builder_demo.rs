// 入站构建演示程序
use inbound_builder::{ConfigDocument, InboundBuilder, InboundSummary, Network, Protocol, Security};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut document = ConfigDocument::from_value(json!({
        "log": {"loglevel": "warning"},
        "inbounds": [
            {"tag": "API_INBOUND", "protocol": "dokodemo-door", "listen": "127.0.0.1", "port": 62789}
        ],
        "outbounds": [{"protocol": "freedom", "tag": "DIRECT"}]
    }))?;

    let mut builder = InboundBuilder::new();

    // First attempt: reality without key material
    builder.update_field("tag", "VLESS-TCP-REALITY")?;
    builder.set_security(Security::Reality);
    if let Err(errors) = builder.submit(&document.existing_tags()) {
        println!("Rejected:");
        for (field, message) in errors.messages() {
            println!("  {}: {}", field, message);
        }
    }

    // Fill in what validation asked for and resubmit
    builder.update_field(
        "streamSettings.realitySettings.privateKey",
        "MMX7m0Mj3faUstoEm5NBdegeXkHG6ZB78xzBv2n3ZUA",
    )?;
    builder.update_field("streamSettings.realitySettings.shortIds.0", "6ba85179e30d4fc2")?;
    builder.update_field("settings.clients.0.id", "b831381d-6324-4d53-ad4f-8cda48b30811")?;
    builder.update_field("settings.clients.0.flow", "xtls-rprx-vision")?;
    let inbound = builder.submit(&document.existing_tags())?;
    document.add_inbound(&inbound)?;

    // A second inbound on another protocol and transport
    builder.update_field("tag", "SS-WS")?;
    builder.set_protocol(Protocol::Shadowsocks);
    builder.set_network(Network::Ws);
    builder.update_field("streamSettings.wsSettings.path", "/ss")?;
    builder.update_field("settings.password", "changeme")?;
    let inbound = builder.submit(&document.existing_tags())?;
    document.add_inbound(&inbound)?;

    println!("\nUser inbounds:");
    for inbound in document.user_inbounds(&["API_INBOUND".to_string()]) {
        println!("  {}", InboundSummary::from_value(inbound));
    }

    println!("\n{}", document.to_string_pretty()?);
    Ok(())
}
