//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::actions;
use crate::config::{Config, FreeblockPaths};
use crate::platform::FileHostsStore;
use crate::reconcile::{Change, Reconciler, SystemClock};

#[derive(Parser)]
#[command(name = "freeblock")]
#[command(about = "Block and unblock websites using the hosts file")]
pub struct Cli {
    /// Hosts file to edit instead of the system one (default: /etc/hosts)
    #[arg(long, global = true)]
    pub hosts_file: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Point domains at 0.0.0.0, keeping the old address as a comment at the end of the line
    Block {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Restore the commented address of blocked domains, or comment their entry out
    Unblock {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Unblock domains until Ctrl-C or SIGTERM, then block them again
    Open {
        #[arg(required = true)]
        domains: Vec<String>,
    },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = FreeblockPaths::default_paths();
    let config = Config::load(&paths)
        .with_context(|| format!("load config {}", paths.config_file.display()))?;
    let hosts_path = cli.hosts_file.unwrap_or_else(|| config.hosts_path());
    tracing::debug!(hosts_file = %hosts_path.display(), "using hosts file");

    let store = FileHostsStore::new(hosts_path);
    let reconciler = Reconciler::new(config.markers());

    match cli.command {
        Commands::Block { domains } => {
            let changes = actions::block(&store, &reconciler, &domains)?;
            print_changes(&changes);
            Ok(())
        }
        Commands::Unblock { domains } => {
            let changes = actions::unblock(&store, &reconciler, &domains, &SystemClock)?;
            print_changes(&changes);
            Ok(())
        }
        Commands::Open { domains } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(actions::open(
                &store,
                &reconciler,
                &domains,
                &SystemClock,
                actions::shutdown_signal(),
            ))?;
            Ok(())
        }
    }
}

fn print_changes(changes: &[Change]) {
    for change in changes {
        println!("{change}");
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("freeblock={level}")));
    // Ignore a second init (e.g. when run() is called twice in one process).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
