//! Pure formatting functions for UI output.
//!
//! Everything here builds strings; printing lives in the parent module so
//! the formatting stays testable.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::ReleaseGroup;

/// Red `ERROR:` prefix followed by the message.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

/// Green checkmark followed by the message.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Yellow arrow followed by the message.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Yellow warning icon followed by the warning text.
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// One line per release: label, date and commit count.
///
/// Shows at most `limit` releases, then a count of the rest.
///
/// # Arguments
/// * `groups` - Releases in changelog order
/// * `limit` - Maximum number of releases to list
pub fn format_release_summary(groups: &[ReleaseGroup], limit: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(groups.len().min(limit) + 2);
    lines.push(format!("{}", style("Releases:").bold()));

    for group in groups.iter().take(limit) {
        let noun = if group.len() == 1 { "commit" } else { "commits" };
        lines.push(format!(
            "  {} ({}) - {} {}",
            style(&group.label).cyan(),
            group.date.format("%Y-%m-%d"),
            group.len(),
            noun
        ));
    }

    if groups.len() > limit {
        lines.push(format!("  ... and {} more releases", groups.len() - limit));
    }

    lines
}
