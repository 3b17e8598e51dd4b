//! a2d - command-line host for the Apps2Desktop verbs.
//!
//! Runs exactly one verb per invocation and reports its outcome through the
//! exit code, the way the browser-side caller only ever sees a boolean.

use anyhow::{Context, Result};
use apps2desktop::{Apps2Desktop, DesktopEntryManager, ExtensionInfo, XdgDirs};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "a2d")]
#[command(about = "Mirror installed Chrome apps into desktop menu entries")]
struct Args {
    /// Enable debug logging (RUST_LOG directives still apply on top)
    #[arg(short, long)]
    debug: bool,

    /// Data directory (defaults to $XDG_DATA_HOME or ~/.local/share)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config directory (defaults to $XDG_CONFIG_HOME or ~/.config)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or update the entry of an app
    Add {
        app_name: String,
        app_id: String,
        app_version: String,
        /// Launch URL, empty for packaged apps
        launch_url: String,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Remove the entry of an app
    Remove { app_id: String },
    /// Show the entry of an app in menus
    Enable { app_id: String },
    /// Hide the entry of an app from menus
    Disable { app_id: String },
    /// Add every app of a chrome.management.getAll() JSON listing
    Sync {
        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Print the on-disk state of an app's entry as JSON
    Status { app_id: String },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Set up logging; stdout is reserved for command output
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    FmtSubscriber::builder()
        .with_env_filter(log_filter(args.debug, rust_log.as_deref()))
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let dirs = XdgDirs::from_env()?
        .with_overrides(args.data_dir.as_deref(), args.config_dir.as_deref());
    debug!(
        "Data dir: {}, config dir: {}",
        dirs.data_dir.display(),
        dirs.config_dir.display()
    );

    let manager = DesktopEntryManager::new(dirs);

    let success = match args.command {
        Command::Add {
            app_name,
            app_id,
            app_version,
            launch_url,
            enabled,
        } => Apps2Desktop::add(
            &manager,
            &app_name,
            &app_id,
            &app_version,
            &launch_url,
            enabled,
        ),
        Command::Remove { app_id } => Apps2Desktop::remove(&manager, &app_id),
        Command::Enable { app_id } => manager.enable(&app_id),
        Command::Disable { app_id } => manager.disable(&app_id),
        Command::Sync { input } => {
            let items = read_listing(&input)?;
            let report = manager.sync(&items);
            println!("{}", serde_json::to_string_pretty(&report)?);
            report.failed.is_empty()
        }
        Command::Status { app_id } => {
            let state = manager.entry_state(&app_id)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
            state.exists
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// INFO (DEBUG with `--debug`) plus any `RUST_LOG` directives.
fn log_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    let default = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

fn read_listing(input: &Path) -> Result<Vec<ExtensionInfo>> {
    let json = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read listing from stdin")?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read listing {}", input.display()))?
    };

    serde_json::from_str(&json).context("Listing is not a chrome.management JSON array")
}
