//! Terminal output for command results.

use std::path::Path;

use bytesize::ByteSize;
use cloudseal::DisplayName;
use console::style;

use crate::types::{Mode, Outcome};

/// Prints one line per processed file and a summary.
pub fn show_outcomes(mode: Mode, outcomes: &[Outcome]) {
    for outcome in outcomes {
        println!("{} {} {} {} ({})", style("✓").green(), outcome.input.display(), style("→").dim(), style(outcome.output.display()).bold(), ByteSize(outcome.size));
    }

    if !outcomes.is_empty() {
        println!();
        println!("{}", style(format!("{} file(s) {} successfully", outcomes.len(), mode.past_tense())).green().bold());
    }
}

pub fn show_failure(path: &Path, error: &anyhow::Error) {
    eprintln!("{} {}: {error:#}", style("✗").red(), path.display());
}

pub fn show_token(token: &str) {
    println!("{token}");
}

/// Prints a resolved name; names that could not be decrypted are flagged on stderr.
pub fn show_display_name(name: &DisplayName) {
    println!("{name}");

    if name.is_fallback() {
        eprintln!("{} could not decrypt name, showing it as stored", style("!").yellow());
    }
}
