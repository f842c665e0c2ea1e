use super::resolve_config_path;
use cirrus_aws::ProviderConfig;
use cirrus_aws::credentials::credential_sources;
use colored::Colorize;
use std::path::PathBuf;

/// Offline checks: parsing, cross-field rules, region
pub fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "Validating provider configuration...".blue());
    let path = resolve_config_path(file)?;

    let result = ProviderConfig::load(&path).and_then(|config| {
        config.validate()?;
        if !config.skip_region_validation {
            cirrus_aws::validate_region(&config.region)?;
        }
        Ok(config)
    });

    let config = match result {
        Ok(config) => config,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ Invalid configuration".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", "✓ Configuration is valid".green().bold());
    println!();
    println!("Summary:");
    println!("  region: {}", config.region.cyan());
    println!("  max_retries: {}", config.max_retries);

    let sources = credential_sources(&config);
    println!("  credential sources: {}", sources.len());
    for source in &sources {
        println!("    - {}", source.name().cyan());
    }

    if let Some(role) = config.role_to_assume() {
        println!("  assume role: {}", role.role_arn.cyan());
    }
    if !config.allowed_account_ids.is_empty() {
        println!(
            "  allowed accounts: {}",
            config.allowed_account_ids.join(", ")
        );
    }
    if !config.forbidden_account_ids.is_empty() {
        println!(
            "  forbidden accounts: {}",
            config.forbidden_account_ids.join(", ")
        );
    }
    if config.insecure {
        println!("  {}", "TLS certificate verification disabled".yellow());
    }

    Ok(())
}
