use std::fmt;

/// Warnings raised around the repository state while preparing a tag.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The working tree has uncommitted or untracked changes
    DirtyWorkingTree,
    /// Tag exists but cannot be parsed as a version
    UnparsableTag { tag: String },
    /// No version tag exists yet; the initial version will be used
    NoVersionTags { initial_tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DirtyWorkingTree => {
                write!(f, "Git tree is not clean")
            }
            BoundaryWarning::UnparsableTag { tag } => {
                write!(f, "Ignoring tag '{}': not a version", tag)
            }
            BoundaryWarning::NoVersionTags { initial_tag } => {
                write!(
                    f,
                    "No version tags found; starting at '{}'",
                    initial_tag
                )
            }
        }
    }
}
