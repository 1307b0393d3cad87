//! Console output for the command-line tool.
//!
//! Human-oriented messages go to stderr. Stdout is reserved for the bare
//! release name so scripts can capture it.

use crate::bump::BumpOutcome;
use crate::domain::VersionRecord;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("\x1b[33m→\x1b[0m {}", message);
}

/// Describe the change between two records, one line per changed field.
pub fn format_transition(previous: &VersionRecord, next: &VersionRecord) -> Vec<String> {
    let mut lines = Vec::new();

    let mut push = |label: &str, from: String, to: String| {
        if from != to {
            lines.push(format!("{:<9} {} -> {}", label, from, to));
        }
    };

    push("version", previous.version_string(), next.version_string());
    push("release", previous.release.clone(), next.release.clone());
    push("build", previous.build.clone(), next.build.clone());
    push("branch", previous.branch.to_string(), next.branch.to_string());
    push(
        "maturity",
        previous.maturity.to_string(),
        next.maturity.to_string(),
    );
    push("comment", previous.comment.clone(), next.comment.clone());

    lines
}

/// Show the proposed (or applied) change of a bump.
pub fn display_outcome(outcome: &BumpOutcome) {
    if outcome.written {
        display_success(&format!("Updated {}", outcome.path.display()));
    } else {
        display_status(&format!(
            "Dry run: {} left untouched",
            outcome.path.display()
        ));
    }

    for line in format_transition(&outcome.previous, &outcome.next) {
        eprintln!("  {}", line);
    }
}
