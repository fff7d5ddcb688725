//! Pure formatting functions for console output.
//!
//! Everything here writes to stderr; stdout is reserved for the
//! `name=value` outputs emitted by the parent module.

use crate::boundary::BoundaryWarning;
use crate::cli::ReleaseOutcome;

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

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Display the resolved tag change.
///
/// Shows either:
/// - If a new tag was planned: "From: old_tag -> To: new_tag"
/// - If nothing changed: "Up to date: tag"
pub fn display_tag_change(outcome: &ReleaseOutcome) {
    if outcome.new_tag == outcome.tag {
        eprintln!("\n\x1b[1mUp to date:\x1b[0m {}", outcome.tag);
    } else {
        eprintln!("\n\x1b[1mTag Change on '{}':\x1b[0m", outcome.branch);
        eprintln!("  From: \x1b[31m{}\x1b[0m", outcome.tag);
        eprintln!("  To:   \x1b[32m{}\x1b[0m", outcome.new_tag);
    }
}

/// Display manual push instruction for a tag.
///
/// Shows the git command needed to push the tag to a remote.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    eprintln!(
        "\n\x1b[33m→\x1b[0m To push this tag later, run:\n  \x1b[36mgit push {} {}\x1b[0m",
        remote, tag
    );
}
