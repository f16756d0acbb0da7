use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paybridge::application::bridge::PaymentsBridge;
use paybridge::domain::card::CardDetails;
use paybridge::infrastructure::sandbox::{SandboxConnector, SandboxHost};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Card details JSON file
    input: PathBuf,

    /// Gateway authorization token
    #[arg(long, default_value = "sandbox_tokenization_key")]
    token: String,

    /// Also collect a device-data fingerprint
    #[arg(long)]
    device_data: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let bridge = PaymentsBridge::new(
        Arc::new(SandboxConnector::new()),
        Arc::new(SandboxHost::default()),
    );
    bridge.initialize(&cli.token).await.into_diagnostic()?;

    let raw = std::fs::read_to_string(&cli.input).into_diagnostic()?;
    let details: CardDetails = serde_json::from_str(&raw).into_diagnostic()?;

    let nonce = bridge.tokenize_card(details).await.into_diagnostic()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&Value::Object(nonce)).into_diagnostic()?
    );

    if cli.device_data {
        let data = bridge.collect_device_data().await.into_diagnostic()?;
        println!("{data}");
    }

    Ok(())
}
