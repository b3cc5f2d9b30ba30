//! Merge command - merge one branch into another, or a chain of branches

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, arrow, check};
use anstream::println;
use dialoguer::Confirm;
use merge_up::error::{Error, Result};
use merge_up::merge::{MergePlan, MergeUpResult, create_merge_plan, merge_branches, merge_up};
use merge_up::types::{Invocation, MergeOptions, MergeOutcome};
use std::path::Path;

/// Options for the merge command
#[derive(Debug, Clone, Default)]
pub struct MergeCommandOptions {
    /// Flags passed through to the merge engine
    pub merge: MergeOptions,
    /// Dry run - show what would be merged without making changes
    pub dry_run: bool,
    /// Preview plan and prompt for confirmation before executing
    pub confirm: bool,
}

/// Run the merge command
pub async fn run_merge(
    path: &Path,
    remote: Option<&str>,
    invocation: Invocation,
    options: MergeCommandOptions,
) -> Result<()> {
    let ctx = CommandContext::new(path, remote)?;

    let plan = match &invocation {
        Invocation::Single { whence, whither } => create_merge_plan(&[whence, whither]),
        Invocation::Chain(branches) => create_merge_plan(branches),
    };

    // A previewed plan must be one the real run would accept
    if options.dry_run || options.confirm {
        invocation.check_names()?;
    }

    if options.dry_run {
        report_merge_dry_run(&plan, &ctx, &options);
        return Ok(());
    }

    if options.confirm {
        report_merge_dry_run(&plan, &ctx, &options);
        if !Confirm::new()
            .with_prompt("Proceed with merge?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
        println!();
    }

    let progress = CliProgress::new(options.merge.debug);

    match invocation {
        Invocation::Single { whence, whither } => {
            let outcome = merge_branches(
                &ctx.git,
                &whence,
                &whither,
                &options.merge,
                &ctx.config,
                &progress,
            )
            .await;
            progress.finish();

            let outcome = outcome?;
            print_outcomes(std::slice::from_ref(&outcome));
            println!("{} Merge complete!", check());
        }
        Invocation::Chain(branches) => {
            let result = merge_up(
                &ctx.git,
                &branches,
                &options.merge,
                &ctx.config,
                &progress,
            )
            .await;
            progress.finish();

            print_merge_summary(&result);
            result.into_result()?;
        }
    }

    Ok(())
}

/// Print one line per completed merge
fn print_outcomes(outcomes: &[MergeOutcome]) {
    for outcome in outcomes {
        let status = if outcome.is_no_change() {
            "no change".muted()
        } else {
            "merged".success()
        };
        let pushed = if outcome.pushed {
            format!(" {}", "(pushed)".accent())
        } else {
            String::new()
        };
        println!(
            "   {} {} {} ({status}){pushed}",
            outcome.whence.accent(),
            arrow(),
            outcome.whither.accent()
        );
    }
}

/// Print merge-up summary
fn print_merge_summary(result: &MergeUpResult) {
    println!();
    if result.plan.is_empty() {
        println!("{}", "No merges planned (need at least two branches).".muted());
        return;
    }

    if result.is_success() {
        println!(
            "{} {}",
            format!("{CHECK} Merge complete:").success(),
            format!("{} merge(s)", result.completed.len()).accent()
        );
    } else {
        println!("{} Merge stopped", "⚠️".warn());
    }

    print_outcomes(&result.completed);

    if let Some(ref failed) = result.failed {
        println!("   {} {}", "Failed:".warn(), failed.step.to_string().warn());
        let skipped = result.plan.merge_count() - result.completed.len() - 1;
        if skipped > 0 {
            println!(
                "   {}",
                format!("{skipped} later merge(s) not attempted").muted()
            );
        }
    }
}

/// Report what would be merged (dry run)
fn report_merge_dry_run(plan: &MergePlan, ctx: &CommandContext, options: &MergeCommandOptions) {
    println!("{}:", "Merge plan".emphasis());
    println!(
        "  Repository: {} (remote {})",
        ctx.repo_root.display().to_string().accent(),
        ctx.config.remote.accent()
    );
    println!();

    if plan.is_empty() {
        println!("  {}", "No merges to perform".muted());
        println!();
        return;
    }

    for step in &plan.steps {
        println!(
            "  {} {} {} {}",
            "Would merge".success(),
            step.whence.accent(),
            arrow(),
            step.whither.accent()
        );
    }

    println!();
    if options.merge.clean_branches {
        println!(
            "{}",
            "Local branches without a remote counterpart will be deleted.".warn()
        );
    }
    if options.merge.push {
        println!(
            "{}",
            format!("Merged branches will be pushed to {}.", ctx.config.remote).warn()
        );
    }
    println!(
        "{}",
        "Local changes on every listed branch will be discarded.".warn()
    );
    if options.dry_run {
        println!("{}", "Run without --dry-run to execute.".muted());
    }
}
