//! Git operations abstraction layer
//!
//! The tagging workflow only talks to the [Repository] trait, so it can run
//! against a real repository or against an in-memory one in tests.
//!
//! - [repository::Git2Repository]: implementation using the `git2` crate
//! - [mock::MockRepository]: mock implementation for testing
//!
//! ```rust
//! # use git_next_tag::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.head_oid()?;
//! let tags_on_head = repo.tags_pointing_at(head)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::path::Path;

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the matching
/// [crate::error::NextTagError] variants.
pub trait Repository {
    /// Working directory of the repository, `None` for a bare repository
    fn workdir(&self) -> Option<&Path>;

    /// Whether the working tree has no modified, staged or untracked files
    fn is_clean(&self) -> Result<bool>;

    /// Object ID of the commit HEAD points to
    fn head_oid(&self) -> Result<Oid>;

    /// Get all tag names in the repository
    ///
    /// Order is unspecified; callers sort by version.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Names of the tags whose target commit is `oid`
    ///
    /// Handles both lightweight and annotated tags.
    fn tags_pointing_at(&self, oid: Oid) -> Result<Vec<String>>;

    /// Create a tag at the given commit
    ///
    /// # Arguments
    /// * `name` - Name for the new tag
    /// * `oid` - Object ID of the commit to tag
    /// * `message` - Annotation message; `None` creates a lightweight tag
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists, OID doesn't exist, or Git error occurs
    fn create_tag(&self, name: &str, oid: Oid, message: Option<&str>) -> Result<()>;

    /// Push one tag to a remote
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `tag_name` - Tag to push
    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()>;
}
