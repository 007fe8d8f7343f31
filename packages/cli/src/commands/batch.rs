use crate::cli::SummaryFormat;
use anyhow::Result;
use colored::Colorize;
use snapdiff_batch::{process_all_with, BatchOptions, BatchReport, OutcomeStatus, PairingOutcome};
use std::path::Path;

pub fn batch(
    artifacts: &Path,
    output: &Path,
    tests: &Path,
    options: &BatchOptions,
    format: SummaryFormat,
) -> Result<()> {
    let text = format == SummaryFormat::Text;

    if text {
        println!("🔍 {} snapshot diff", "Starting".green().bold());
        println!("   Failures:   {}", artifacts.display());
        println!("   References: {}", tests.display());
        println!("   Output:     {}", output.display());
        println!();
    }

    let report = process_all_with(artifacts, tests, output, options, |outcome| {
        if text {
            print_outcome(outcome, artifacts);
        }
    })?;

    match format {
        SummaryFormat::Text => print_summary(&report),
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_outcome(outcome: &PairingOutcome, artifacts: &Path) {
    let name = outcome
        .failure
        .strip_prefix(artifacts)
        .unwrap_or(&outcome.failure)
        .display();

    match &outcome.status {
        OutcomeStatus::Diffed {
            differing_pixels,
            total_pixels,
        } => {
            println!(
                "  {} {} ({} of {} pixels differ)",
                "✓".green(),
                name,
                differing_pixels,
                total_pixels
            );
        }
        OutcomeStatus::Unmatched => {
            println!("  {} {} - no reference found", "⚠️".yellow(), name);
        }
        OutcomeStatus::Failed { message, .. } => {
            println!("  {} {} - {}", "✗".red(), name, message.red());
        }
    }
}

fn print_summary(report: &BatchReport) {
    let summary = &report.summary;

    println!();
    if summary.found == 0 {
        println!("{}", "⚠️  No failed snapshots found".yellow());
    }
    println!(
        "✨ {} Snapshot diff complete!",
        if summary.failed() > 0 {
            "Done".yellow().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Found:     {}", summary.found);
    println!("   Processed: {}", summary.processed);
    println!("   Failed:    {}", summary.failed());

    if summary.unmatched > 0 {
        println!("   {} {}", "No reference:".yellow(), summary.unmatched);
    }
    if summary.diff_failed > 0 {
        println!("   {} {}", "Diff errors:".red(), summary.diff_failed);
    }
}
