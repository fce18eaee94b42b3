use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_changelog::cli::{run_changelog_workflow, ChangelogWorkflowArgs};
use git_changelog::config;
use git_changelog::output::OutputFormat;
use git_changelog::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-changelog",
    version,
    about = "Generate a changelog from git tags and commit history"
)]
struct Args {
    #[arg(short = 'p', long, default_value = ".", help = "Path to the git repository")]
    repo_path: String,

    #[arg(
        short = 'f',
        long,
        help = "Output file path [default: CHANGELOG.json, or output.path from config]"
    )]
    changelog_path: Option<String>,

    #[arg(short = 'b', long, help = "Only use tags whose name starts with this branch name")]
    branch_name: Option<String>,

    #[arg(long, value_enum, help = "Output format (inferred from the output path if omitted)")]
    format: Option<OutputFormat>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Print the changelog instead of writing it")]
    dry_run: bool,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = ChangelogWorkflowArgs {
        repo_path: args.repo_path.into(),
        changelog_path: args.changelog_path,
        branch: args.branch_name,
        format: args.format,
        dry_run: args.dry_run,
    };
    let dry_run = workflow_args.dry_run;

    if !dry_run {
        ui::display_status(&format!(
            "Reading history from {}",
            workflow_args.repo_path.display()
        ));
    }

    let result = match run_changelog_workflow(workflow_args, config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Keep stdout clean for the document itself on dry runs
    if dry_run {
        return Ok(());
    }

    ui::display_release_summary(&result.groups);
    if let Some(path) = &result.output_path {
        ui::display_success(&format!(
            "Wrote {} releases ({} commits) to {}",
            result.releases,
            result.commits,
            path.display()
        ));
    }

    Ok(())
}
