//! Milepost CLI
//!
//! Command-line front end for the Milepost learning log.
//!
//! # Commands
//!
//! - `register` - Create an account
//! - `login` / `logout` - Session management
//! - `log` - Record a learning milestone
//! - `entries` - List recorded milestones, newest first
//! - `badges` - Show unlocked badges
//! - `stats` - Show aggregate statistics
//! - `profile` - Update profile fields
//!
//! The remote store is configured through `MILEPOST_REMOTE_URL` and
//! `MILEPOST_REMOTE_KEY`; without them every command still works against
//! the local store only.

mod commands;

use clap::{Parser, Subcommand};
use milepost_remote::{DisabledRemote, RemoteConfig, RemoteStore, RestRemote};
use milepost_store::{FileBackend, LocalStore};
use milepost_sync::SyncCoordinator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Milepost learning-log command-line tools.
#[derive(Parser)]
#[command(name = "milepost")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data directory for the local store
    #[arg(global = true, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Unique login name
        #[arg(long)]
        username: String,

        /// Unique email address
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long)]
        full_name: String,
    },

    /// Log in by email or username
    Login {
        /// Email or username
        identifier: String,

        /// Password
        password: String,
    },

    /// Log out of the current session
    Logout,

    /// Record a learning milestone
    Log {
        /// Short title of the milestone
        title: String,

        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Category (tutorial, project, course, workshop, certification, ...)
        #[arg(short, long, default_value = "tutorial")]
        category: String,

        /// Date the learning occurred (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List your entries, newest first
    Entries,

    /// Show unlocked badges
    Badges,

    /// Show aggregate statistics
    Stats,

    /// Update profile fields
    Profile {
        /// New display name
        #[arg(long)]
        full_name: Option<String>,

        /// New password
        #[arg(long)]
        password: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let local = LocalStore::new(FileBackend::open(&data_dir)?);

    let remote: Box<dyn RemoteStore> = match RemoteConfig::from_env() {
        Some(config) => Box::new(RestRemote::open(config)?),
        None => {
            tracing::debug!("remote credentials missing, running local-only");
            Box::new(DisabledRemote)
        }
    };

    let coordinator = SyncCoordinator::new(remote, local);

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
            full_name,
        } => commands::register::run(&coordinator, &username, &email, &password, &full_name)?,
        Commands::Login {
            identifier,
            password,
        } => commands::login::run(&coordinator, &identifier, &password)?,
        Commands::Logout => commands::login::logout(&coordinator)?,
        Commands::Log {
            title,
            description,
            category,
            date,
        } => commands::entry::log(&coordinator, &title, &description, &category, date)?,
        Commands::Entries => commands::entry::list(&coordinator)?,
        Commands::Badges => commands::badges::badges(&coordinator)?,
        Commands::Stats => commands::badges::stats(&coordinator)?,
        Commands::Profile {
            full_name,
            password,
        } => commands::profile::run(&coordinator, full_name, password)?,
    }

    Ok(())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("milepost")
}
