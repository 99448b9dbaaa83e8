use crate::{gateway::supabase::SupabaseGateway, relay};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub supabase_url: String,
    pub supabase_service_key: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the gateway URL is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let gateway_url = Url::parse(&args.supabase_url).context("invalid SUPABASE_URL")?;

    log_startup_args(&args, &gateway_url);

    let gateway = SupabaseGateway::new(gateway_url.as_str(), args.supabase_service_key)
        .context("Failed to build auth gateway client")?;

    relay::new(args.port, Arc::new(gateway)).await
}

/// Print the relay's OpenAPI document to stdout.
/// # Errors
/// Returns an error if the document cannot be serialized.
pub fn print_openapi() -> Result<()> {
    let json = serde_json::to_string_pretty(&relay::openapi())?;
    println!("{json}");
    Ok(())
}

fn log_startup_args(args: &Args, gateway_url: &Url) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("gateway", gateway_url.to_string()),
        ("service_key", "***".to_string()),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "lipa relay - {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
