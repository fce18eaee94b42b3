//! Domain logic - pure changelog types independent of git operations

pub mod commit;
pub mod release;
pub mod tag;

pub use commit::Commit;
pub use release::{LabelFormatter, LabelStyle, ReleaseGroup, ReleaseKind};
pub use tag::{Tag, TagFilter};
