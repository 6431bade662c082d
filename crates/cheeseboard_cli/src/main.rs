//! Maintenance and smoke CLI for the cheese board store.
//!
//! # Responsibility
//! - Verify `cheeseboard_core` linkage (`ping`).
//! - Run schema lifecycle operations against a database file.
//! - Print deterministic row counts for quick local sanity checks.

use anyhow::{Context, Result};
use cheeseboard_core::{
    init_from_config, CoreConfig, LinkOptions, NewBoard, NewCheese, NewUser, Repository, Store,
    SyncOptions,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cheeseboard", version, about = "Cheese board store maintenance")]
struct Cli {
    /// Database file. Falls back to CHEESEBOARD_DB, then an in-memory store.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core version and health check.
    Ping,
    /// Create missing tables.
    Sync {
        /// Drop all tables first.
        #[arg(long)]
        force: bool,
    },
    /// Drop all tables.
    Drop,
    /// Print row counts per table.
    Stats,
    /// Insert a small sample data set.
    Seed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CoreConfig::from_env().context("reading CHEESEBOARD_* environment")?;
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_from_config(&config).context("initializing logging")?;

    if let Command::Ping = cli.command {
        println!("cheeseboard_core ping={}", cheeseboard_core::ping());
        println!("cheeseboard_core version={}", cheeseboard_core::core_version());
        return Ok(());
    }

    let mut store = Store::from_config(&config).context("opening store")?;
    match cli.command {
        Command::Ping => {}
        Command::Sync { force } => {
            store.sync(SyncOptions { force })?;
            println!("synced force={force}");
        }
        Command::Drop => {
            store.drop_all()?;
            println!("dropped");
        }
        Command::Stats => print_stats(&store)?,
        Command::Seed => {
            seed(&store)?;
            print_stats(&store)?;
        }
    }
    store.close()?;
    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn print_stats(store: &Store) -> Result<()> {
    println!("users={}", store.users()?.count()?);
    println!("cheeses={}", store.cheeses()?.count()?);
    println!("boards={}", store.boards()?.count()?);
    println!("cheese_boards={}", store.links()?.count()?);
    Ok(())
}

fn seed(store: &Store) -> Result<()> {
    let user = store
        .users()?
        .create(NewUser::new("John Doe", "johndoe@example.com"))?;
    let board = store.boards()?.create(NewBoard::new(
        "Cheese Board",
        "A wooden board used for serving cheese and crackers.",
        4,
    ))?;
    let cheddar = store
        .cheeses()?
        .create(NewCheese::new("Cheddar", "A hard, sharp-tasting cheese."))?;

    store.ownership()?.add_board(&user, &board)?;
    store
        .cheese_boards()?
        .add_board_to_cheese(&cheddar, &board, LinkOptions::default())?;
    Ok(())
}
