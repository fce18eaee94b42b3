pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod partition;
pub mod ui;

pub use error::{ChangelogError, Result};
pub use partition::{Partition, PartitionOptions, ReleasePartitioner};
