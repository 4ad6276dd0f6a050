use anyhow::{Context, Result};
use colored::*;
use portfolio_app::{get_environment, EnvPaths, SiteConfig};

/// Print the effective site configuration
pub fn execute(format: String) -> Result<()> {
    let env_paths = EnvPaths::load()?;
    let config = SiteConfig::load(&env_paths.configuration_path).with_context(|| {
        format!(
            "Failed to load {}",
            env_paths.site_config_path().display()
        )
    })?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&config)?),
        "yaml" => print!("{}", serde_yaml::to_string(&config)?),
        _ => print_config_text(&env_paths, &config),
    }

    Ok(())
}

fn print_config_text(env_paths: &EnvPaths, config: &SiteConfig) {
    println!("{}", "=== Portfolio Configuration ===".bold());
    println!();
    println!("Environment: {}", get_environment().cyan());
    println!("Config file: {}", env_paths.site_config_path().display());
    if !env_paths.site_config_path().exists() {
        println!("  {}", "(not found, using defaults)".yellow());
    }
    println!();
    println!("{}", "Site:".bold());
    println!("{}", "─".repeat(50));
    println!("site_name: {}", config.site_name);
    println!("featured_post_limit: {}", config.featured_post_limit);
    println!("home_certificate_limit: {}", config.home_certificate_limit);
    println!(
        "admin_email: {}",
        config.admin_email.as_deref().unwrap_or("(none)")
    );
}
