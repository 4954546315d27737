// Copyright 2026 Hhwatch Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use hhwatch::cli;
use hhwatch::config::Config;

#[derive(Parser)]
#[command(
    name = "hhwatch",
    about = "hhwatch — watch a storefront listing for newly started happy hours",
    version,
    after_help = "Run 'hhwatch <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the listing once, record history, notify new happy hours
    Run {
        /// Listing page URL to watch
        #[arg(long)]
        base_url: Option<String>,
        /// Path to the history database
        #[arg(long)]
        db: Option<String>,
        /// Webhook URL for notifications
        #[arg(long)]
        webhook: Option<String>,
        /// Fetch and delivery timeout in milliseconds
        #[arg(long, default_value = "30000")]
        timeout: u64,
        /// Fetch over plain HTTP without a browser
        #[arg(long)]
        no_browser: bool,
        /// Detect and report without writing history or notifying
        #[arg(long)]
        dry_run: bool,
    },
    /// Check environment and diagnose issues
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Run {
            base_url,
            db,
            webhook,
            timeout,
            no_browser,
            dry_run,
        } => {
            let config = Config::resolve(
                base_url.as_deref(),
                db.as_deref(),
                webhook.as_deref(),
                timeout,
                no_browser,
            );
            cli::run_cmd::run(&config, dry_run).await
        }
        Commands::Doctor => cli::doctor::run().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "hhwatch", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success (including "no novel items"), 1=fatal error
    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    result
}

/// Initialize tracing on stderr; stdout stays free for command output.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "hhwatch=warn"
    } else if verbose {
        "hhwatch=debug"
    } else {
        "hhwatch=info"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default.parse().unwrap()),
        )
        .init();
}
