use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use typedict_core::config::DictionaryConfig;
use typedict_core::impls::InventoryIntrospector;
use typedict_core::{Dispatcher, MessageEnvelope, MessageType, TypeDictionary, TypeDictionaryFactory};

mod demo;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Discovery {
    /// Link-time registrations (unspecified order)
    Inventory,
    /// Explicit registration list (fixed order)
    Manifest,
}

/// Builds the message type dictionary and optionally dispatches one message.
#[derive(Parser, Debug)]
#[command(name = "typedict")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// How handler and message types are discovered
    #[arg(long, value_enum, default_value_t = Discovery::Manifest)]
    discovery: Discovery,

    /// Message type to dispatch after the build
    #[arg(long, value_name = "MESSAGE_TYPE")]
    dispatch: Option<String>,

    /// JSON payload for --dispatch
    #[arg(long, default_value = "{}", requires = "dispatch")]
    payload: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DictionaryConfig::load(path)?,
        None => DictionaryConfig::default(),
    }
    .apply_env();

    // --debug > RUST_LOG > config
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let dictionary = match args.discovery {
        Discovery::Inventory => {
            TypeDictionaryFactory::new(InventoryIntrospector::new(), demo::container())
                .with_config(&config)
                .create_from_discovery()?
        }
        Discovery::Manifest => TypeDictionaryFactory::new(demo::manifest(), demo::container())
            .with_config(&config)
            .create_from_discovery()?,
    };
    print_dictionary(&dictionary)?;

    if let Some(message_type) = args.dispatch {
        let dispatcher = Dispatcher::new(Arc::new(dictionary));
        let envelope = MessageEnvelope::new(MessageType::new(message_type), args.payload.into_bytes());
        dispatcher.dispatch(&envelope).await?;
        info!(message_id = %envelope.id(), "Message handled");
    }

    Ok(())
}

fn print_dictionary(dictionary: &TypeDictionary) -> anyhow::Result<()> {
    for message_type in dictionary.handled_types() {
        if let Some(handler) = dictionary.handler_for(&message_type) {
            let parser = if dictionary.parser_for(&message_type).is_some() {
                "parser"
            } else {
                "no parser"
            };
            println!("{message_type} -> {} ({parser})", handler.handler_type());
        }
    }
    println!("{}", serde_json::to_string_pretty(&dictionary.summary())?);
    Ok(())
}
