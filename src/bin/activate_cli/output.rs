//! Output formatting for bundle-activate CLI
//!
//! Module output (the transcript) always goes to stdout so it can be piped.
//! Summaries go to stdout in JSON mode and to stderr otherwise.

use anyhow::Result;
use serde_json::json;

use activate_core::{
    ActivationContext, ActivationFailure, ActivationPlan, ActivationReport, PackageOutcome,
};
use activate_types::GroupSelection;

pub fn print_report(
    report: &ActivationReport,
    transcript: &[String],
    json_output: bool,
    verbose: bool,
) -> Result<()> {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "success": true,
                "transcript": transcript,
                "report": report,
            }))?
        );
        return Ok(());
    }

    for line in transcript {
        println!("{}", line);
    }

    if verbose {
        eprintln!(
            "Activated {} package(s) for groups [{}] on {}",
            report.activated.len(),
            report.groups.join(", "),
            report.platform
        );
        for pkg in &report.activated {
            eprintln!("  {} {}", pkg.name, describe_outcome(&pkg.outcome));
        }
        for skipped in &report.skipped {
            eprintln!("  {} skipped ({:?})", skipped.name, skipped.reason);
        }
    }
    Ok(())
}

pub fn print_failure(
    failure: &ActivationFailure,
    contexts: &[ActivationContext],
    transcript: &[String],
    json_output: bool,
) -> Result<()> {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "success": false,
                "transcript": transcript,
                "error": failure,
                "message": failure.message(),
            }))?
        );
        return Ok(());
    }

    for line in transcript {
        println!("{}", line);
    }
    for ctx in contexts {
        eprint!("{}", ctx);
    }
    Ok(())
}

pub fn print_plan(plan: &ActivationPlan<'_>, groups: &GroupSelection, json_output: bool) -> Result<()> {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "groups": groups,
                "packages": plan.selected.iter().map(|p| json!({
                    "name": p.package.name(),
                    "source": p.candidates.source,
                    "candidates": p.candidates.paths,
                })).collect::<Vec<_>>(),
                "skipped": plan.skipped,
            }))?
        );
        return Ok(());
    }

    println!("Groups: {}", groups);
    for (i, planned) in plan.selected.iter().enumerate() {
        println!(
            "{:>3}. {} [{:?}] {}",
            i + 1,
            planned.package.name(),
            planned.candidates.source,
            planned.candidates.paths.join(" | ")
        );
    }
    for skipped in &plan.skipped {
        println!("  -  {} skipped ({:?})", skipped.name, skipped.reason);
    }
    Ok(())
}

fn describe_outcome(outcome: &PackageOutcome) -> String {
    match outcome {
        PackageOutcome::Loaded { paths } => format!("loaded {}", paths.join(", ")),
        PackageOutcome::NoDefaultModule { tried } => {
            format!("no default module (tried {})", tried.join(", "))
        }
        PackageOutcome::Disabled => "require disabled".to_string(),
    }
}
