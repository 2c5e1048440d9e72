#![forbid(unsafe_code)]

//! Command-line inspector for confstash config files

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level as TraceLevel, warn};
use tracing_subscriber::FmtSubscriber;

use confstash::{ConfigStore, codec};

#[derive(Parser)]
#[command(name = "confstash", version, about = "Inspect and edit confstash config files")]
struct Cli {
    /// Folder under the user config directory holding the file
    #[arg(long, default_value = "confstash")]
    folder: String,

    /// Config file name, without extension
    #[arg(long, default_value = "settings")]
    file: String,

    /// Operate on an explicit file path instead of the config directory
    #[arg(long)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the whole document as it would be saved
    Dump,
    /// Print one key's value as JSON
    Get { key: String },
    /// Set a key from a JSON literal (tagged wrappers accepted)
    Set { key: String, value: String },
    /// Remove a key
    Unset { key: String },
    /// Print the comment line, or replace it
    Comment { text: Option<String> },
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let mut store = match &cli.path {
        Some(path) => ConfigStore::open_at(path.clone()),
        None => ConfigStore::open(&cli.folder, &cli.file),
    }
    .context("failed to open config store")?;

    match cli.command {
        Command::Dump => {
            let document = store.to_document()?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Command::Get { key } => match store.get(&key) {
            Some(value) => {
                let encoded = codec::encode(value)?;
                println!("{}", serde_json::to_string_pretty(&encoded)?);
            }
            None => bail!("no such key: {key}"),
        },
        Command::Set { key, value } => {
            let node: serde_json::Value = serde_json::from_str(&value)
                .context("value must be a JSON literal")?;
            let decoded = codec::decode(&node)
                .context("value could not be decoded")?;
            store.set(key, decoded);
            store.save()?;
        }
        Command::Unset { key } => {
            if store.remove(&key).is_none() {
                warn!(key = %key, "Key was not set");
            }
            store.save()?;
        }
        Command::Comment { text } => match text {
            Some(text) => {
                store.set_comment(text);
                store.save()?;
            }
            None => println!("{}", store.comment()),
        },
    }

    Ok(())
}
