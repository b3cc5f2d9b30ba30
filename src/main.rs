//! git-merge-up - merge git branches up a chain

mod cli;

use clap::Parser;
use cli::merge::{MergeCommandOptions, run_merge};
use merge_up::error::Error;
use merge_up::report::{FailureReporter, StderrReporter};
use merge_up::types::{Invocation, MergeOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Merge one git branch to another and optionally push to the remote
///
/// Both branches are first reset to match the remote exactly: local
/// commits and uncommitted changes on them are discarded.
///
/// With --up, each branch in the list is merged into the next:
/// `--up "dev test main"` merges dev -> test, then test -> main, stopping
/// at the first failure.
#[derive(Parser)]
#[command(name = "git-merge-up")]
#[command(version, about)]
struct Cli {
    /// Branch to merge from
    #[arg(short = 'f', long = "from", value_name = "BRANCH")]
    from: Option<String>,

    /// Branch to merge to
    #[arg(short = 't', long = "to", value_name = "BRANCH")]
    to: Option<String>,

    /// Space-separated branches to merge up, first to last
    #[arg(short = 'u', long = "up", value_name = "BRANCHES")]
    up: Option<String>,

    /// Show debug messages and echo git commands
    #[arg(short, long)]
    debug: bool,

    /// Push merged branches to the remote
    #[arg(short, long)]
    push: bool,

    /// Delete local branches that have no remote counterpart
    #[arg(short, long)]
    clean_branches: bool,

    /// Remote to synchronize with (default: from config, else "origin")
    #[arg(long)]
    remote: Option<String>,

    /// Path to the repository
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Show what would be merged without making changes
    #[arg(long)]
    dry_run: bool,

    /// Preview the plan and ask before merging
    #[arg(long)]
    confirm: bool,
}

fn init_tracing(debug: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // --debug always echoes git commands, whatever RUST_LOG says
    if debug && let Ok(directive) = Directive::from_str("merge_up=debug") {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> merge_up::Result<()> {
    // Usage errors surface before any git command runs
    let invocation =
        Invocation::from_flags(cli.from.as_deref(), cli.to.as_deref(), cli.up.as_deref())?;

    let options = MergeCommandOptions {
        merge: MergeOptions {
            push: cli.push,
            clean_branches: cli.clean_branches,
            debug: cli.debug,
        },
        dry_run: cli.dry_run,
        confirm: cli.confirm,
    };

    run_merge(&cli.path, cli.remote.as_deref(), invocation, options).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            StderrReporter.report(&e);
            if matches!(e, Error::Usage(_)) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
