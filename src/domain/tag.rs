use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use git2::Oid;
use regex::Regex;

use crate::error::{ChangelogError, Result};

/// Represents a git tag resolved to the commit it marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Commit the tag peels to (annotated tags are resolved through)
    pub target: Oid,
    /// Commit time of `target`, not the tag object's creation time
    pub timestamp: DateTime<Utc>,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, target: Oid, timestamp: DateTime<Utc>) -> Self {
        Tag {
            name: name.into(),
            target,
            timestamp,
        }
    }

    /// Newest-first ordering by target commit time, ties broken by name
    pub fn newest_first(a: &Tag, b: &Tag) -> Ordering {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.name.cmp(&b.name))
    }
}

/// Selects which tags take part in the changelog
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    prefix: Option<String>,
    pattern: Option<Regex>,
}

impl TagFilter {
    /// Create a filter from a branch-name prefix and an optional regex
    pub fn new(prefix: Option<&str>, pattern: Option<&str>) -> Result<Self> {
        let pattern = pattern
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    ChangelogError::config(format!("Invalid tag pattern '{}': {}", p, e))
                })
            })
            .transpose()?;

        Ok(TagFilter {
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
            pattern,
        })
    }

    /// Filter that only matches on a name prefix
    pub fn prefix(prefix: impl Into<String>) -> Self {
        TagFilter {
            prefix: Some(prefix.into()),
            pattern: None,
        }
    }

    /// The configured branch prefix, if any
    pub fn branch(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Check a tag name against the prefix and the pattern
    pub fn matches(&self, name: &str) -> bool {
        let prefix_ok = self
            .prefix
            .as_deref()
            .map_or(true, |prefix| name.starts_with(prefix));
        let pattern_ok = self
            .pattern
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(name));

        prefix_ok && pattern_ok
    }

    /// Human-readable description used in warnings
    pub fn describe(&self) -> String {
        match (&self.prefix, &self.pattern) {
            (Some(prefix), Some(pattern)) => format!("prefix '{}' and /{}/", prefix, pattern),
            (Some(prefix), None) => format!("prefix '{}'", prefix),
            (None, Some(pattern)) => format!("/{}/", pattern),
            (None, None) => "any".to_string(),
        }
    }
}
