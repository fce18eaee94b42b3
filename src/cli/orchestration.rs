//! Main workflow orchestration logic
//!
//! Keeps CLI argument parsing in `main.rs` and the changelog pipeline here:
//! configuration overrides, repository access, partitioning, rendering and
//! writing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::Config;
use crate::domain::ReleaseGroup;
use crate::git::{Git2Repository, RepositoryView};
use crate::output::{self, OutputFormat, RenderOptions};
use crate::partition::{Partition, ReleasePartitioner};
use crate::ui;

/// Arguments for the changelog workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogWorkflowArgs {
    /// Repository to read; discovery walks up from here
    pub repo_path: PathBuf,

    /// Output file, overriding `output.path`
    pub changelog_path: Option<String>,

    /// Tag prefix filter, overriding `tags.branch`
    pub branch: Option<String>,

    /// Output format, overriding `output.format`
    pub format: Option<OutputFormat>,

    /// Print the changelog instead of writing it
    pub dry_run: bool,
}

impl Default for ChangelogWorkflowArgs {
    fn default() -> Self {
        ChangelogWorkflowArgs {
            repo_path: PathBuf::from("."),
            changelog_path: None,
            branch: None,
            format: None,
            dry_run: false,
        }
    }
}

/// Result of a successful changelog run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Where the changelog was written; `None` on dry runs
    pub output_path: Option<PathBuf>,

    /// Number of release groups
    pub releases: usize,

    /// Number of commits across all groups
    pub commits: usize,

    /// The release groups, newest first
    pub groups: Vec<ReleaseGroup>,

    /// The rendered document
    pub rendered: String,
}

/// Fold CLI overrides into the loaded configuration
pub fn apply_overrides(config: &mut Config, args: &ChangelogWorkflowArgs) {
    if let Some(path) = &args.changelog_path {
        config.output.path = path.clone();
    }
    if let Some(branch) = &args.branch {
        config.tags.branch = Some(branch.clone());
    }
    if let Some(format) = args.format {
        config.output.format = Some(format);
    }
}

/// Partition and render a repository's history according to `config`
///
/// # Arguments
///
/// * `repo` - Repository view to read tags and commits from
/// * `config` - Fully resolved configuration
/// * `generated_at` - Timestamp for the initial release and generated dates
pub fn generate_changelog<R: RepositoryView + ?Sized>(
    repo: &R,
    config: &Config,
    generated_at: DateTime<Utc>,
) -> crate::error::Result<(Partition, String)> {
    let partitioner = ReleasePartitioner::new(config.partition_options()?);
    let partition = partitioner.partition(repo, generated_at)?;

    let render_options = RenderOptions {
        short_sha_length: config.labels.short_sha_length,
        include_full_sha: config.output.include_full_sha,
        json_indent: config.output.json_indent,
    };
    let rendered = output::render(&partition.groups, config.output_format(), &render_options)?;

    Ok((partition, rendered))
}

/// Main changelog workflow
///
/// Orchestrates the whole run:
/// 1. Apply CLI overrides to the configuration
/// 2. Open the git repository
/// 3. Partition history into releases
/// 4. Report boundary warnings
/// 5. Render and write (or print) the changelog
///
/// # Arguments
///
/// * `args` - Workflow arguments (paths, branch filter, format, dry_run)
/// * `config` - Loaded configuration
///
/// # Returns
///
/// Result containing the run summary or error
pub fn run_changelog_workflow(
    args: ChangelogWorkflowArgs,
    mut config: Config,
) -> Result<WorkflowResult> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let repo = Git2Repository::open(&args.repo_path)?;
    let (partition, rendered) = generate_changelog(&repo, &config, Utc::now())
        .context("Failed to build changelog")?;

    for warning in &partition.warnings {
        ui::display_boundary_warning(warning);
    }

    let output_path = if args.dry_run {
        print!("{}", rendered);
        None
    } else {
        let path = PathBuf::from(&config.output.path);
        output::write_changelog(&path, &rendered)?;
        info!(path = %path.display(), "wrote changelog");
        Some(path)
    };

    Ok(WorkflowResult {
        output_path,
        releases: partition.groups.len(),
        commits: partition.commit_count(),
        groups: partition.groups,
        rendered,
    })
}
