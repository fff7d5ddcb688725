//! User interface module - console rendering and CI outputs.
//!
//! Separates concerns:
//! - `formatter` - Human-readable status lines on stderr
//! - This module - Machine-readable `tag`, `version`, `new-tag` and
//!   `new-version` outputs

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};

use crate::cli::ReleaseOutcome;
use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_manual_push_instruction, display_status,
    display_success, display_tag_change,
};

/// Environment variable naming the file CI outputs are appended to
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Output names and values of an outcome, in emission order
pub fn output_pairs(outcome: &ReleaseOutcome) -> Vec<(&'static str, String)> {
    vec![
        ("tag", outcome.tag.clone()),
        ("version", outcome.version.clone()),
        ("new-tag", outcome.new_tag.clone()),
        ("new-version", outcome.new_version.clone()),
    ]
}

/// Write outputs as `name=value` lines
pub fn write_outputs_to<W: Write>(writer: &mut W, outcome: &ReleaseOutcome) -> io::Result<()> {
    for (name, value) in output_pairs(outcome) {
        writeln!(writer, "{}={}", name, value)?;
    }
    Ok(())
}

/// Emit the outputs of a run.
///
/// Appends to the file named by `GITHUB_OUTPUT` when it is set, otherwise
/// prints to stdout.
pub fn write_outputs(outcome: &ReleaseOutcome) -> Result<()> {
    match env::var_os(GITHUB_OUTPUT_ENV) {
        Some(path) if !path.is_empty() => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            write_outputs_to(&mut file, outcome)?;
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_outputs_to(&mut handle, outcome)?;
        }
    }
    Ok(())
}
