use anyhow::Result;
use colored::*;
use database::{Collection, DatabaseConfig};
use portfolio_app::{get_environment, EnvPaths, SiteConfig};
use serde_json::json;

/// Execute the health check command
pub async fn execute(format: String) -> Result<()> {
    let env_paths = EnvPaths::load()?;
    let health_status = check_system_health(&env_paths).await;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&health_status)?),
        _ => print_health_status_text(&health_status),
    }

    Ok(())
}

/// Check the health of each system component
async fn check_system_health(env_paths: &EnvPaths) -> serde_json::Value {
    let components = json!({
        "data": check_data_health(env_paths),
        "configuration": check_configuration_health(env_paths),
        "database": check_database_health(env_paths).await,
    });

    let all_healthy = components
        .as_object()
        .map(|c| c.values().all(|v| v["status"] == "healthy"))
        .unwrap_or(false);

    let overall = if all_healthy { "healthy" } else { "degraded" };

    json!({
        "status": overall,
        "environment": get_environment(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "components": components,
    })
}

fn check_data_health(env_paths: &EnvPaths) -> serde_json::Value {
    let data_dir = &env_paths.data_path;

    if data_dir.is_dir() {
        json!({
            "status": "healthy",
            "message": "Data directory exists",
            "path": data_dir.display().to_string()
        })
    } else {
        json!({
            "status": "not_initialized",
            "message": "Data directory does not exist yet",
            "path": data_dir.display().to_string()
        })
    }
}

fn check_configuration_health(env_paths: &EnvPaths) -> serde_json::Value {
    let config_file = env_paths.site_config_path();

    if !config_file.exists() {
        return json!({
            "status": "warning",
            "message": "No site configuration found, using defaults",
            "path": config_file.display().to_string()
        });
    }

    match SiteConfig::load(&env_paths.configuration_path) {
        Ok(config) => json!({
            "status": "healthy",
            "message": format!("Site configuration loaded for '{}'", config.site_name),
            "path": config_file.display().to_string()
        }),
        Err(e) => json!({
            "status": "unhealthy",
            "message": format!("Site configuration is invalid: {}", e),
            "path": config_file.display().to_string()
        }),
    }
}

async fn check_database_health(env_paths: &EnvPaths) -> serde_json::Value {
    let db_path = env_paths.database_path();

    if !db_path.exists() {
        return json!({
            "status": "not_initialized",
            "message": "Database file does not exist yet",
            "path": db_path.display().to_string()
        });
    }

    // Open without creating tables so the check never writes
    let config = DatabaseConfig::new_with_path(db_path.clone()).with_create_tables(false);

    let db = match database::initialize_database(config).await {
        Ok(db) => db,
        Err(e) => {
            return json!({
                "status": "unhealthy",
                "message": format!("Database exists but cannot be accessed: {}", e),
                "path": db_path.display().to_string()
            })
        }
    };

    let mut missing = Vec::new();
    for collection in Collection::ALL {
        match db.table_exists(collection.table_name()).await {
            Ok(true) => {}
            Ok(false) => missing.push(collection.table_name()),
            Err(e) => {
                return json!({
                    "status": "unhealthy",
                    "message": format!("Failed to inspect database: {}", e),
                    "path": db_path.display().to_string()
                })
            }
        }
    }

    if missing.is_empty() {
        json!({
            "status": "healthy",
            "message": "Database file exists and is accessible",
            "path": db_path.display().to_string()
        })
    } else {
        json!({
            "status": "warning",
            "message": "Database is missing collection tables",
            "path": db_path.display().to_string(),
            "missing": missing
        })
    }
}

/// Print health status in a formatted text output
fn print_health_status_text(status: &serde_json::Value) {
    println!("{}", "=== Portfolio Health Check ===".bold());
    println!();

    let status_display = match status["status"].as_str().unwrap_or("unknown") {
        "healthy" => "HEALTHY".green().bold(),
        "degraded" => "DEGRADED".yellow().bold(),
        _ => "UNKNOWN".white().bold(),
    };

    println!("Overall Status: {}", status_display);
    println!("Environment: {}", status["environment"].as_str().unwrap_or(""));
    println!("Timestamp: {}", status["timestamp"].as_str().unwrap_or(""));
    println!();

    println!("{}", "Components:".bold());
    println!("{}", "─".repeat(50));

    if let Some(components) = status["components"].as_object() {
        for (name, component) in components {
            let comp_status = component["status"].as_str().unwrap_or("unknown");
            let status_icon = match comp_status {
                "healthy" => "✓".green(),
                "unhealthy" => "✗".red(),
                "warning" => "⚠".yellow(),
                _ => "○".white(),
            };

            println!("{} {} ({})", status_icon, name.to_uppercase().bold(), comp_status);

            if let Some(message) = component["message"].as_str() {
                println!("  {}", message);
            }
            if let Some(path) = component["path"].as_str() {
                println!("  Path: {}", path);
            }
            if let Some(missing) = component["missing"].as_array() {
                let names: Vec<_> = missing.iter().filter_map(|m| m.as_str()).collect();
                println!("  Missing tables: {}", names.join(", "));
            }

            println!();
        }
    }
}
