use anyhow::{Context, Result};
use colored::*;
use content::{import_document, ImportedDocument};
use entities::{BlogPostForm, EditorState};
use portfolio_app::{EnvPaths, Portfolio};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

/// Import converter HTML, print the resulting draft and optionally save it
pub async fn execute(html_file: PathBuf, save: bool, format: String) -> Result<()> {
    let html = fs::read_to_string(&html_file)
        .with_context(|| format!("Failed to read {}", html_file.display()))?;
    let document = import_document(&html);

    let saved_id = if save {
        let env_paths = EnvPaths::load()?;
        let portfolio = Portfolio::open(&env_paths).await?;
        let mut draft = EditorState::with_draft(BlogPostForm::from_import(document.clone()));
        let stored = portfolio.admin.submit(&mut draft).await?;
        Some(stored.id)
    } else {
        None
    };

    match format.as_str() {
        "json" => {
            let mut output = serde_json::to_value(&document)?;
            if let Some(id) = &saved_id {
                output["id"] = json!(id);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => print_document_text(&document, saved_id.as_deref()),
    }

    Ok(())
}

fn print_document_text(document: &ImportedDocument, saved_id: Option<&str>) {
    println!("{}", "=== Imported Document ===".bold());
    println!("Title: {}", document.title.cyan());
    println!("Slug: {}", document.slug);
    println!("Excerpt: {}", document.excerpt);
    println!("Content: {} characters", document.content.chars().count());

    if let Some(id) = saved_id {
        println!();
        println!("{} Saved as blog post {}", "✓".green(), id);
    }
}
