use std::fmt::Write;

use crate::domain::ReleaseGroup;

/// Render release groups as Markdown sections.
///
/// Each group becomes `# YYYY-MM-DD - label`, a blank line, one
/// `* summary` bullet per commit, and a trailing blank line.
pub fn render(groups: &[ReleaseGroup]) -> String {
    let mut out = String::new();

    for group in groups {
        // writing to a String cannot fail
        let _ = writeln!(out, "# {} - {}\n", group.date.format("%Y-%m-%d"), group.label);
        for commit in &group.commits {
            let _ = writeln!(out, "* {}", commit.summary());
        }
        out.push('\n');
    }

    out
}
