//! CLI administration tool for keylink.
//!
//! Reads the same environment as the server and talks to the database
//! directly, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Active URLs and total clicks
//! cargo run --bin admin -- stats
//!
//! # Show a short URL by its secret key
//! cargo run --bin admin -- info Ab3_x9Q_k2LmN0pQrSt
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```

use keylink::api::dto::url_info::UrlInfo;
use keylink::application::services::UrlService;
use keylink::config;
use keylink::error::AppError;
use keylink::infrastructure::persistence::PgUrlRepository;
use keylink::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing keylink.
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
    /// Show active URL and click totals
    Stats,

    /// Show a short URL by its secret key
    Info {
        /// The secret key from the admin URL
        secret_key: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
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

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    let service = UrlService::new(Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))));

    match cli.command {
        Commands::Stats => handle_stats(&service).await?,
        Commands::Info { secret_key } => {
            handle_info(&service, &secret_key, config.base_url.trim_end_matches('/')).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Displays active URL count and total clicks.
async fn handle_stats(service: &UrlService<PgUrlRepository>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let summary = service.summary().await?;

    println!(
        "  Active URLs:  {}",
        summary.active_urls.to_string().bright_green().bold()
    );
    println!(
        "  Total clicks: {}",
        summary.total_clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Displays one short URL, looked up by secret key.
async fn handle_info(
    service: &UrlService<PgUrlRepository>,
    secret_key: &str,
    base_url: &str,
) -> Result<()> {
    let record = match service.get_by_secret_key(secret_key).await {
        Ok(record) => record,
        Err(AppError::NotFound { .. }) => {
            println!("{}", "No active URL for this secret key".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let created_at = record.created_at.format("%Y-%m-%d %H:%M").to_string();
    let info = UrlInfo::from_record(record, base_url);

    println!("{}", "Short URL".bright_blue().bold());
    println!();
    println!("  Target:    {}", info.target_url.cyan());
    println!("  URL:       {}", info.url.bright_white());
    println!("  Admin URL: {}", info.admin_url.bright_black());
    println!("  Clicks:    {}", info.clicks.to_string().bright_green().bold());
    println!("  Created:   {}", created_at.bright_black());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
