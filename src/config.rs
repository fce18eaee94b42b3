use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{LabelStyle, TagFilter};
use crate::error::{ChangelogError, Result};
use crate::output::OutputFormat;
use crate::partition::{DateSource, PartitionOptions};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "gitchangelog.toml";

/// Represents the complete configuration for git-changelog.
///
/// Contains tag selection, release labelling and output settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub labels: LabelsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Which tags mark releases.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TagsConfig {
    /// Only tags whose name starts with this branch name are used
    #[serde(default)]
    pub branch: Option<String>,

    /// Additional regex a tag name must match
    #[serde(default)]
    pub pattern: Option<String>,
}

fn default_short_sha_length() -> usize {
    7
}

fn default_true() -> bool {
    true
}

/// How release groups are labelled and dated.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LabelsConfig {
    #[serde(default)]
    pub style: LabelStyle,

    #[serde(default = "default_short_sha_length")]
    pub short_sha_length: usize,

    #[serde(default)]
    pub date_source: DateSource,

    /// Emit a group for commits on head past the newest tag
    #[serde(default = "default_true")]
    pub unreleased: bool,

    /// Emit a group for the oldest tag's own ancestry
    #[serde(default)]
    pub oldest_tag_history: bool,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            style: LabelStyle::default(),
            short_sha_length: default_short_sha_length(),
            date_source: DateSource::default(),
            unreleased: true,
            oldest_tag_history: false,
        }
    }
}

fn default_output_path() -> String {
    "CHANGELOG.json".to_string()
}

fn default_json_indent() -> usize {
    4
}

/// Where and how the changelog is written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Explicit format; inferred from the path extension when unset
    #[serde(default)]
    pub format: Option<OutputFormat>,

    #[serde(default = "default_output_path")]
    pub path: String,

    #[serde(default)]
    pub include_full_sha: bool,

    #[serde(default = "default_json_indent")]
    pub json_indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: None,
            path: default_output_path(),
            include_full_sha: false,
            json_indent: default_json_indent(),
        }
    }
}

impl Config {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let sha_len = self.labels.short_sha_length;
        if !(4..=40).contains(&sha_len) {
            return Err(ChangelogError::config(format!(
                "labels.short_sha_length must be between 4 and 40, got {}",
                sha_len
            )));
        }

        if self.output.json_indent > 16 {
            return Err(ChangelogError::config(format!(
                "output.json_indent must be at most 16, got {}",
                self.output.json_indent
            )));
        }

        self.tag_filter()?;
        Ok(())
    }

    /// Build the tag filter from the `[tags]` section
    pub fn tag_filter(&self) -> Result<TagFilter> {
        TagFilter::new(self.tags.branch.as_deref(), self.tags.pattern.as_deref())
    }

    /// Build partitioning options from the `[tags]` and `[labels]` sections
    pub fn partition_options(&self) -> Result<PartitionOptions> {
        Ok(PartitionOptions {
            filter: self.tag_filter()?,
            label_style: self.labels.style,
            short_sha_length: self.labels.short_sha_length,
            date_source: self.labels.date_source,
            include_unreleased: self.labels.unreleased,
            include_oldest_tag_history: self.labels.oldest_tag_history,
        })
    }

    /// Resolve the output format, falling back to the path extension
    pub fn output_format(&self) -> OutputFormat {
        self.output
            .format
            .unwrap_or_else(|| OutputFormat::from_path(Path::new(&self.output.path)))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitchangelog.toml` in current directory
/// 3. `.gitchangelog.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded and validated configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config_file(Path::new(path))?
    } else if local.exists() {
        read_config_file(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            read_config_file(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ChangelogError::config(format!("Invalid configuration: {}", e)))?;
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        ChangelogError::config(format!("Cannot read '{}': {}", path.display(), e))
    })
}
