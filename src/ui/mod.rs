//! User interface module - console output for the CLI.
//!
//! - `formatter` - Pure formatting functions
//! - This module - Printing to stdout/stderr

use crate::boundary::BoundaryWarning;
use crate::domain::ReleaseGroup;

pub mod formatter;

/// Maximum number of releases listed after a run
const SUMMARY_LIMIT: usize = 10;

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", formatter::format_error(message));
}

/// Print a success message to stdout.
pub fn display_success(message: &str) {
    println!("{}", formatter::format_success(message));
}

/// Print a status message to stdout.
pub fn display_status(message: &str) {
    println!("{}", formatter::format_status(message));
}

/// Print a boundary warning to stderr.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", formatter::format_boundary_warning(warning));
}

/// Print the list of releases that went into the changelog.
pub fn display_release_summary(groups: &[ReleaseGroup]) {
    for line in formatter::format_release_summary(groups, SUMMARY_LIMIT) {
        println!("{}", line);
    }
}
