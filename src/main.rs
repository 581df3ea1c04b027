use clap::{Parser, Subcommand};
use inbound_builder::error::{BuilderError, Result};
use inbound_builder::protocol::{
    ALPN_OPTIONS, DEFAULT_SHADOWSOCKS_METHOD, SHADOWSOCKS_METHODS, TCP_HEADER_TYPES,
};
use inbound_builder::{
    AppConfig, ConfigDocument, FieldPath, InboundBuilder, InboundSummary, Network, Protocol,
    Security, UpdateError,
};
use log::{error, info, warn};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inbound-builder")]
#[command(about = "Compose proxy inbounds and merge them into a server configuration")]
struct Args {
    /// Server configuration document (JSON)
    document: PathBuf,

    /// Builder options file (TOML, or RON with a .ron extension)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List user-managed inbounds
    List,

    /// Build an inbound and append it to the document
    Add {
        #[arg(long)]
        tag: String,

        #[arg(long, default_value = "vless")]
        protocol: Protocol,

        #[arg(long, default_value = "tcp")]
        network: Network,

        #[arg(long, default_value = "none")]
        security: Security,

        /// Defaults to the protocol's conventional port
        #[arg(long)]
        port: Option<i64>,

        #[arg(long)]
        listen: Option<String>,

        /// Field update; VALUE is parsed as JSON, otherwise taken as a string
        #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, Value)>,

        /// Print the inbound instead of writing the document
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove inbounds by tag
    Remove {
        #[arg(long)]
        tag: String,
    },

    /// Show the selectable protocols, transports, security modes and option values
    Options,
}

/// Text leaves take VALUE verbatim; other leaves parse it as JSON first.
fn parse_assignment(raw: &str) -> std::result::Result<(String, Value), String> {
    let (path, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=VALUE, got `{}`", raw))?;
    let path = path.trim();
    let field: FieldPath = path.parse().map_err(|e: UpdateError| e.to_string())?;

    let value = if field.takes_text() {
        Value::String(text.to_string())
    } else {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    };
    Ok((path.to_string(), value))
}

fn catalog() -> Vec<String> {
    let mut lines = vec!["Protocols:".to_string()];
    for protocol in Protocol::ALL {
        lines.push(format!(
            "  {:<12} {} (port {})",
            protocol.as_str(),
            protocol.label(),
            protocol.default_port()
        ));
    }

    lines.push("Networks:".to_string());
    for network in Network::ALL {
        let note = if network.has_defaults() { "" } else { " (no defaults)" };
        lines.push(format!("  {:<12} {}{}", network.as_str(), network.label(), note));
    }

    lines.push("Security:".to_string());
    for security in Security::ALL {
        lines.push(format!("  {:<12} {}", security.as_str(), security.label()));
    }

    lines.push("Shadowsocks methods:".to_string());
    for method in SHADOWSOCKS_METHODS {
        let note = if method == DEFAULT_SHADOWSOCKS_METHOD { " (default)" } else { "" };
        lines.push(format!("  {}{}", method, note));
    }

    lines.push("ALPN:".to_string());
    lines.extend(ALPN_OPTIONS.iter().map(|alpn| format!("  {}", alpn)));

    lines.push("TCP header types:".to_string());
    lines.extend(TCP_HEADER_TYPES.iter().map(|header| format!("  {}", header)));
    lines
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(path) = &args.options {
        AppConfig::from_file(path)?
    } else {
        AppConfig::default()
    };

    if args.debug {
        config.logging.level = "debug".to_string();
    }

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .init();

    if let Command::Options = args.command {
        for line in catalog() {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut document = ConfigDocument::from_file(&args.document)?;
    info!("Loaded {}", args.document.display());

    match args.command {
        Command::Options => {}
        Command::List => {
            let inbounds = document.user_inbounds(&config.document.reserved_tags);
            if inbounds.is_empty() {
                println!("No inbounds configured yet.");
            }
            for inbound in inbounds {
                println!("{}", InboundSummary::from_value(inbound));
            }
        }
        Command::Add {
            tag,
            protocol,
            network,
            security,
            port,
            listen,
            set,
            dry_run,
        } => {
            let mut builder = InboundBuilder::with_options(config.builder.clone());
            builder.set_protocol(protocol);
            builder.set_network(network);
            builder.set_security(security);

            builder.update_field("tag", tag)?;
            if let Some(port) = port {
                builder.update_field("port", port)?;
            }
            if let Some(listen) = listen {
                builder.update_field("listen", listen)?;
            }
            for (path, value) in set {
                builder.update_field(&path, value)?;
            }

            let inbound = match builder.submit(&document.existing_tags()) {
                Ok(inbound) => inbound,
                Err(errors) => {
                    for (field, e) in errors.iter() {
                        error!("{}: {}", field, e);
                    }
                    return Err(BuilderError::Validation(errors));
                }
            };

            if dry_run {
                println!("{}", serde_json::to_string_pretty(&inbound)?);
            } else {
                document.add_inbound(&inbound)?;
                document.to_file(&args.document)?;
                println!("{}", InboundSummary::from(&inbound));
            }
        }
        Command::Remove { tag } => {
            let removed = document.remove_inbound(&tag);
            if removed == 0 {
                warn!("No inbound tagged {}", tag);
            } else {
                document.to_file(&args.document)?;
                println!("Removed {} inbound(s) tagged {}", removed, tag);
            }
        }
    }

    Ok(())
}
