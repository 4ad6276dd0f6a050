use anyhow::Result;
use colored::*;
use entities::ContactMessage;
use portfolio_app::{bulk_mail_link, reply_link, EnvPaths, Portfolio};
use serde_json::json;

/// List contact messages, newest first, with a reply link for each
pub async fn execute(format: String) -> Result<()> {
    let env_paths = EnvPaths::load()?;
    let portfolio = Portfolio::open(&env_paths).await?;
    let messages = portfolio.admin.list::<ContactMessage>().await?;

    match format.as_str() {
        "csv" => print!("{}", portfolio.admin.export_contacts_csv().await?),
        "json" => {
            let output: Vec<_> = messages
                .iter()
                .map(|m| {
                    json!({
                        "id": m.id,
                        "name": m.record.name,
                        "email": m.record.email,
                        "message": m.record.message,
                        "received_at": m.created_at.to_rfc3339(),
                        "reply_link": reply_link(&m.record),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!("{}", "=== Contact Messages ===".bold());
            println!();

            if messages.is_empty() {
                println!("{}", "No messages yet".yellow());
                return Ok(());
            }

            for message in &messages {
                println!(
                    "{} <{}>  {}",
                    message.record.name.bold(),
                    message.record.email,
                    message.created_at.format("%b %-d, %Y %H:%M")
                );
                println!("  {}", message.record.message);
                println!("  Reply: {}", reply_link(&message.record));
                println!();
            }

            let records: Vec<_> = messages.into_iter().map(|m| m.record).collect();
            println!("Email all: {}", bulk_mail_link(&records));
        }
    }

    Ok(())
}
