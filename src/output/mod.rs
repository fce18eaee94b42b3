//! Changelog rendering and writing.
//!
//! - `json` - array of release objects
//! - `markdown` - `# date - label` headers with bullet summaries

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::ReleaseGroup;
use crate::error::{ChangelogError, Result};

pub mod json;
pub mod markdown;

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[value(alias = "md")]
    #[serde(alias = "md")]
    Markdown,
}

impl OutputFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("md") | Some("markdown") => OutputFormat::Markdown,
            _ => OutputFormat::Json,
        }
    }
}

/// Settings that affect how groups are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub short_sha_length: usize,
    pub include_full_sha: bool,
    pub json_indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            short_sha_length: 7,
            include_full_sha: false,
            json_indent: 4,
        }
    }
}

/// Render groups in the requested format
pub fn render(
    groups: &[ReleaseGroup],
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::render(groups, options),
        OutputFormat::Markdown => Ok(markdown::render(groups)),
    }
}

/// Write a rendered changelog, replacing any existing file
pub fn write_changelog(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| {
        ChangelogError::output(format!("Cannot write '{}': {}", path.display(), e))
    })
}
