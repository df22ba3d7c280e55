//! CLI administration tool for snaplink.
//!
//! Inspects and removes stored links directly in PostgreSQL, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links, newest first
//! cargo run --bin admin -- links list
//!
//! # Show one link
//! cargo run --bin admin -- links show abc123
//!
//! # Delete a link (asks for confirmation unless -y)
//! cargo run --bin admin -- links delete abc123
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use snaplink::config::{Config, mask_connection_string};
use snaplink::domain::entities::Link;
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and delete links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count links
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&database_url)
            )
        })?;

    let repo = PgLinkRepository::new(Arc::new(pool));

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &repo).await?,
        Commands::Db { action } => handle_db_action(action, &repo).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, repo: &PgLinkRepository) -> Result<()> {
    match action {
        LinkAction::List => list_links(repo).await,
        LinkAction::Show { code } => show_link(repo, &code).await,
        LinkAction::Delete { code, yes } => delete_link(repo, &code, yes).await,
    }
}

/// Prints all links as a table.
///
/// ```text
/// Links
///
///   Code                 Created            Clicks  Target
///   ─────────────────────────────────────────────────────────────────
///   abc123               2026-01-15 10:30   0       https://example.com
/// ```
async fn list_links(repo: &PgLinkRepository) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {:?}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<18} {:<7} {}",
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<20} {:<18} {:<7} {}",
            link.code.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.total_clicks,
            link.target_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn find_link(repo: &PgLinkRepository, code: &str) -> Result<Link> {
    repo.find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {:?}", e))?
        .with_context(|| format!("Link '{code}' not found"))
}

async fn show_link(repo: &PgLinkRepository, code: &str) -> Result<()> {
    let link = find_link(repo, code).await?;

    println!("{}", "Link".bright_blue().bold());
    println!();
    print_link(&link);
    println!();

    Ok(())
}

fn print_link(link: &Link) {
    let last_clicked = link
        .last_clicked_at
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  ID:           {}", link.id.to_string().bright_black());
    println!("  Code:         {}", link.code.cyan());
    println!("  Target:       {}", link.target_url);
    println!("  Clicks:       {}", link.total_clicks);
    println!("  Last clicked: {}", last_clicked);
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Updated:      {}",
        link.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(repo: &PgLinkRepository, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete Link".bright_blue().bold());
    println!();

    let link = find_link(repo, code).await?;
    print_link(&link);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {:?}", e))?;

    if deleted {
        println!("{}", "Link deleted successfully".green().bold());
    } else {
        println!("{}", "Link was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, repo: &PgLinkRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let count = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {:?}", e))?;

            println!("{}", "Database connection OK".green().bold());
            println!("  Links: {}", count.to_string().bright_green().bold());
        }
    }

    Ok(())
}
