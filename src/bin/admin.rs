//! CLI administration tool for shorturl.
//!
//! Provides commands for inspecting and deleting short URLs, viewing
//! statistics, and performing database checks without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all short URLs, newest first
//! cargo run --bin admin -- urls list
//!
//! # Show one short URL
//! cargo run --bin admin -- urls show example-1a2b3c
//!
//! # Delete a short URL (asks for confirmation unless -y)
//! cargo run --bin admin -- urls delete example-1a2b3c
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required): PostgreSQL connection

use shorturl::application::services::UrlService;
use shorturl::config::Config;
use shorturl::domain::entities::ShortenedUrl;
use shorturl::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorturl.
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
    /// Manage short URLs
    Urls {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short URL subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// List all short URLs
    List,

    /// Show a single short URL
    Show {
        /// Short code
        code: String,
    },

    /// Delete a short URL
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
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .context("DATABASE_URL (or DB_USER, DB_PASSWORD, DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Urls { action } => handle_url_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches short URL commands.
async fn handle_url_action(action: UrlAction, pool: &PgPool) -> Result<()> {
    let service = UrlService::new(Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))));

    match action {
        UrlAction::List => list_urls(&service).await?,
        UrlAction::Show { code } => show_url(&service, &code).await?,
        UrlAction::Delete { code, yes } => delete_url(&service, &code, yes).await?,
    }

    Ok(())
}

/// Lists all short URLs, newest first.
///
/// # Output Format
///
/// ```text
/// Short URLs
///
///   Code                 Clicks   Created            Destination
///   ----------------------------------------------------------------
///   example-1a2b3c       3        2025-08-11 10:30   https://www.example.com/page
/// ```
async fn list_urls(service: &UrlService) -> Result<()> {
    println!("{}", "🔗 Short URLs".bright_blue().bold());
    println!();

    let urls = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list short URLs: {}", e))?;

    if urls.is_empty() {
        println!("{}", "  No short URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for url in &urls {
        println!(
            "  {:<20} {:<8} {:<18} {}",
            url.code.cyan(),
            url.click_count.to_string().bright_green(),
            url.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            url.original_url
        );
    }

    println!();
    println!("  Total: {}", urls.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints every stored field of one short URL.
async fn show_url(service: &UrlService, code: &str) -> Result<()> {
    let url = service
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_details(&url);

    Ok(())
}

fn print_details(url: &ShortenedUrl) {
    let last_accessed = url
        .last_accessed_at
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:          {}", url.code.cyan().bold());
    println!("  Destination:   {}", url.original_url);
    println!(
        "  Created:       {}",
        url.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Clicks:        {}",
        url.click_count.to_string().bright_green().bold()
    );
    println!("  Last accessed: {}", last_accessed.bright_black());
    println!();
}

/// Deletes a short URL after confirmation (default: No).
async fn delete_url(service: &UrlService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short URL".bright_blue().bold());
    println!();

    let url = service
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_details(&url);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete short URL: {}", e))?;

    println!("{}", "✅ Short URL deleted".green().bold());
    println!();

    Ok(())
}

/// Displays the number of stored links and the sum of their clicks.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = UrlService::new(Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))));
    let totals = service
        .totals()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:  {}",
        totals.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        totals.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
