use super::resolve_config_path;
use cirrus_aws::{ProviderConfig, build_session};
use colored::Colorize;
use std::path::PathBuf;

pub async fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = resolve_config_path(file)?;
    let config = ProviderConfig::load(&path)?;

    println!("{}", "Building session...".blue());
    let session = build_session(&config).await?;

    println!("{}", "✓ Session ready".green().bold());
    println!("  region: {}", session.region().cyan());
    println!("  partition: {}", display_or_unknown(session.partition()));
    println!("  account: {}", display_or_unknown(session.account_id()));

    Ok(())
}

fn display_or_unknown(value: &str) -> String {
    if value.is_empty() {
        "(unknown)".dimmed().to_string()
    } else {
        value.cyan().to_string()
    }
}
