//! Operator CLI for the bookshelf catalogue.

use std::path::PathBuf;

use bookshelf::app::{AppSettings, Services, init_tracing};
use bookshelf::domain::{BookDraft, Caller, UserId};
use bookshelf::outbound::persistence::run_pending_migrations;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "bookshelf", about = "Bookshelf catalogue maintenance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Create books from a JSON array of book drafts.
    Seed {
        /// Path to the seed file.
        #[arg(long)]
        file: PathBuf,
    },
    /// Print the active backend and page limits.
    Check,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let settings = AppSettings::load()?;

    match cli.command {
        Command::Migrate => migrate(&settings).await,
        Command::Seed { file } => seed(&settings, file).await,
        Command::Check => check(&settings).await,
    }
}

async fn migrate(settings: &AppSettings) -> color_eyre::Result<()> {
    let url = settings
        .pool_config()
        .map(|config| config.database_url().to_owned())
        .ok_or_else(|| eyre!("BOOKSHELF_DATABASE_URL must be set to run migrations"))?;
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .wrap_err("migration task panicked")??;
    if applied.is_empty() {
        info!("schema already up to date");
    }
    for version in applied {
        println!("applied {version}");
    }
    Ok(())
}

async fn seed(settings: &AppSettings, file: PathBuf) -> color_eyre::Result<()> {
    let raw = std::fs::read_to_string(&file)
        .wrap_err_with(|| format!("failed to read seed file {}", file.display()))?;
    let drafts: Vec<BookDraft> = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("seed file {} is not a JSON array of books", file.display()))?;

    let services = Services::from_settings(settings).await?;
    if settings.pool_config().is_none() {
        warn!("seeding the in-memory backend; books are discarded on exit");
    }
    let operator = Caller::admin(UserId::random());
    let mut created = 0_usize;
    for draft in drafts {
        let book = services.books.create(&operator, draft).await?;
        info!(book_id = %book.id, title = %book.title, "seeded book");
        created += 1;
    }
    println!("seeded {created} books into the {} backend", services.backend());
    Ok(())
}

async fn check(settings: &AppSettings) -> color_eyre::Result<()> {
    let services = Services::from_settings(settings).await?;
    let limits = services.limits();
    println!("backend: {}", services.backend());
    println!("default page size: {}", limits.default_size());
    println!("max page size: {}", limits.max_size());
    Ok(())
}
