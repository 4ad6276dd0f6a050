use anyhow::{bail, Context, Result};
use content::{derive_excerpt, estimate_read_minutes, generate_slug, parse_list};
use std::fs;
use std::path::PathBuf;

/// Print the slug of a title
pub fn slug(title: &str) {
    println!("{}", generate_slug(title));
}

/// Print the entries of a comma-separated list
pub fn tags(raw: &str, format: &str) -> Result<()> {
    let tags = parse_list(raw);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&tags)?),
        _ => {
            for tag in tags {
                println!("{}", tag);
            }
        }
    }

    Ok(())
}

pub fn read_time(text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let content = read_input(text, file)?;
    println!("{} min read", estimate_read_minutes(&content));
    Ok(())
}

pub fn excerpt(text: Option<String>, file: Option<PathBuf>, explicit: Option<String>) -> Result<()> {
    let content = read_input(text, file)?;
    println!("{}", derive_excerpt(&content, explicit.as_deref()));
    Ok(())
}

/// Take content from the positional argument or from a file
fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => bail!("Provide the content as an argument or with --file"),
    }
}
