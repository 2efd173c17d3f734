//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use std::path::PathBuf;

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::VersionTag;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the proposed tag change (or initial tag).
///
/// Shows either:
/// - If updating: "From: old_tag -> To: new_tag"
/// - If initial: "Initial Tag: new_tag"
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Tag Change:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => {
            println!("\n{}", style("Initial Tag:").bold());
            println!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Display tags newest first, marking the ones that are not versions.
pub fn display_tags(tags: &[VersionTag]) {
    if tags.is_empty() {
        println!("No tags found");
        return;
    }

    println!("{}", style("Tags (newest first):").bold());
    for tag in tags {
        match &tag.version {
            Some(version) => println!("  {} {}", tag.name, style(format!("({})", version)).dim()),
            None => println!("  {} {}", tag.name, style("(not a version)").dim()),
        }
    }
}

/// Display the version files that were rewritten.
pub fn display_updated_files(files: &[PathBuf], version: &str) {
    for file in files {
        display_success(&format!("Updated {} to {}", file.display(), version));
    }
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
