mod ingest;
mod profiles;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "profiledb-cli")]
#[command(about = "profiledb command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Run the upload workflow on a local .xlsx file
    Ingest {
        /// Path to the spreadsheet
        path: PathBuf,
        /// Normalize and report without touching the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Query stored profiles
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Subcommand)]
enum ProfilesCommands {
    /// List every stored profile
    List,
    /// Case-insensitive substring search on username
    Search {
        /// Fragment to look for
        fragment: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("profiledb-cli: no command given; run with --help for usage");
        return Ok(());
    };

    init_tracing()?;

    match command {
        Commands::Db { command } => {
            let pool = connect().await?;
            match command {
                DbCommands::Ping => {
                    profiledb_db::ping(&pool).await?;
                    println!("database reachable");
                }
                DbCommands::Migrate => {
                    let applied = profiledb_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Commands::Ingest { path, dry_run } => {
            if dry_run {
                ingest::run_ingest_dry_run(&path).await?;
            } else {
                let pool = connect().await?;
                ingest::run_ingest(&pool, &path).await?;
            }
        }
        Commands::Profiles { command } => {
            let pool = connect().await?;
            match command {
                ProfilesCommands::List => profiles::run_profiles_list(&pool).await?,
                ProfilesCommands::Search { fragment } => {
                    profiles::run_profiles_search(&pool, &fragment).await?;
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() -> anyhow::Result<()> {
    let level = std::env::var("PROFILEDB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn connect() -> anyhow::Result<sqlx::PgPool> {
    let config = profiledb_core::load_app_config()?;
    let pool_config = profiledb_db::PoolConfig::from_app_config(&config);
    let pool = profiledb_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests;
