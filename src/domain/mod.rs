//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::{BranchDescriptor, ReleaseBranches};
pub use commit::Commit;
pub use prerelease::PreReleaseQualifier;
pub use tag::{Tag, TagIndex, VersionedTag};
pub use version::{BumpLevel, CleanVersion};
