use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{config, contacts, health, import, stats, text};

/// Folio - Command line tools for the portfolio site
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the URL slug for a title
    Slug {
        /// Title to convert
        title: String,
    },

    /// Parse a comma-separated list of tags
    Tags {
        /// Raw list, e.g. "rust, web, cms"
        raw: String,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Estimate the reading time of some content
    ReadTime {
        /// Content to measure
        text: Option<String>,

        /// Read the content from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Derive the excerpt of some content
    Excerpt {
        /// Content to summarize
        text: Option<String>,

        /// Read the content from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Explicit excerpt, used verbatim when not empty
        #[arg(long)]
        excerpt: Option<String>,
    },

    /// Import a Word document converted to HTML as a blog post draft
    Import {
        /// HTML produced by the document converter
        html_file: PathBuf,

        /// Save the draft as a blog post
        #[arg(long)]
        save: bool,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show record counts and contact statistics
    Stats {
        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List contact messages with reply links
    Contacts {
        /// Output format (json, csv, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the effective site configuration
    Config {
        /// Output format (json, yaml, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check system health and status
    Health {
        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays machine-readable
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Slug { title } => text::slug(&title),
        Commands::Tags { raw, format } => text::tags(&raw, &format)?,
        Commands::ReadTime { text: input, file } => text::read_time(input, file)?,
        Commands::Excerpt {
            text: input,
            file,
            excerpt,
        } => text::excerpt(input, file, excerpt)?,
        Commands::Import {
            html_file,
            save,
            format,
        } => import::execute(html_file, save, format).await?,
        Commands::Stats { format } => stats::execute(format).await?,
        Commands::Contacts { format } => contacts::execute(format).await?,
        Commands::Config { format } => config::execute(format)?,
        Commands::Health { format } => health::execute(format).await?,
    }

    Ok(())
}
