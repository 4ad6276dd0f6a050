use anyhow::Result;
use colored::*;
use portfolio_app::{ContactStats, DashboardStats, EnvPaths, Portfolio};
use serde_json::json;

/// Print dashboard counts and contact statistics
pub async fn execute(format: String) -> Result<()> {
    let env_paths = EnvPaths::load()?;
    let portfolio = Portfolio::open(&env_paths).await?;

    let dashboard = portfolio.admin.dashboard().await?;
    let contacts = portfolio.admin.contact_stats(chrono::Utc::now()).await?;

    match format.as_str() {
        "json" => {
            let output = json!({
                "dashboard": dashboard,
                "contacts": contacts,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => print_stats_text(&dashboard, &contacts),
    }

    Ok(())
}

fn print_stats_text(dashboard: &DashboardStats, contacts: &ContactStats) {
    println!("{}", "=== Portfolio Dashboard ===".bold());
    println!();
    println!("Blog posts:   {}", dashboard.blog_posts.to_string().cyan());
    println!("Projects:     {}", dashboard.projects.to_string().cyan());
    println!("Certificates: {}", dashboard.certificates.to_string().cyan());
    println!("Contacts:     {}", dashboard.contacts.to_string().cyan());
    println!();
    println!("{}", "Contact Messages:".bold());
    println!("{}", "─".repeat(50));
    println!("Total messages:  {}", contacts.total);
    println!("This month:      {}", contacts.this_month);
    println!("Unique contacts: {}", contacts.unique_contacts);
}
