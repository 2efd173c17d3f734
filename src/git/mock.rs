use crate::error::{NextTagError, Result};
use crate::git::Repository;
use git2::Oid;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A tag created through the mock, with its annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTag {
    pub name: String,
    pub oid: Oid,
    pub message: Option<String>,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    workdir: Option<PathBuf>,
    clean: Cell<bool>,
    head: Oid,
    tags: RefCell<BTreeMap<String, Oid>>,
    created: RefCell<Vec<CreatedTag>>,
    pushed: RefCell<Vec<(String, String)>>,
    fail_push: bool,
}

impl MockRepository {
    /// Create a new mock repository with a clean tree and no tags
    pub fn new() -> Self {
        MockRepository {
            workdir: None,
            clean: Cell::new(true),
            head: Oid::zero(),
            tags: RefCell::new(BTreeMap::new()),
            created: RefCell::new(Vec::new()),
            pushed: RefCell::new(Vec::new()),
            fail_push: false,
        }
    }

    /// Set the working directory reported by [Repository::workdir]
    pub fn with_workdir(mut self, path: impl Into<PathBuf>) -> Self {
        self.workdir = Some(path.into());
        self
    }

    /// Set the commit HEAD points to
    pub fn with_head(mut self, oid: Oid) -> Self {
        self.head = oid;
        self
    }

    /// Make every push fail with a remote error
    pub fn with_failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Mark the working tree clean or dirty
    pub fn set_clean(&self, clean: bool) {
        self.clean.set(clean);
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().insert(name.into(), oid);
    }

    /// Tags created through [Repository::create_tag]
    pub fn created_tags(&self) -> Vec<CreatedTag> {
        self.created.borrow().clone()
    }

    /// `(remote, tag)` pairs pushed through [Repository::push_tag]
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean.get())
    }

    fn head_oid(&self) -> Result<Oid> {
        Ok(self.head)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().keys().cloned().collect())
    }

    fn tags_pointing_at(&self, oid: Oid) -> Result<Vec<String>> {
        Ok(self
            .tags
            .borrow()
            .iter()
            .filter(|(_, target)| **target == oid)
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn create_tag(&self, name: &str, oid: Oid, message: Option<&str>) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(NextTagError::tag(format!("Tag '{}' already exists", name)));
        }
        tags.insert(name.to_string(), oid);
        self.created.borrow_mut().push(CreatedTag {
            name: name.to_string(),
            oid,
            message: message.map(str::to_string),
        });
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        if self.fail_push {
            return Err(NextTagError::remote(format!(
                "Cannot reach remote '{}'",
                remote
            )));
        }
        if !self.tags.borrow().contains_key(tag_name) {
            return Err(NextTagError::tag(format!("No tag named '{}'", tag_name)));
        }
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), tag_name.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        let oid = Oid::from_bytes(&[2; 20]).unwrap();

        repo.add_tag("v1.0.0", oid);

        assert_eq!(repo.tags_pointing_at(oid).unwrap(), vec!["v1.0.0"]);
        assert!(repo.tags_pointing_at(Oid::zero()).unwrap().is_empty());
    }

    #[test]
    fn test_mock_repository_list_tags() {
        let mut repo = MockRepository::new();
        let oid1 = Oid::from_bytes(&[1; 20]).unwrap();
        let oid2 = Oid::from_bytes(&[2; 20]).unwrap();

        repo.add_tag("v1.0.0", oid1);
        repo.add_tag("v2.0.0", oid2);

        let tags = repo.list_tags().unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(&"v1.0.0".to_string()));
        assert!(tags.contains(&"v2.0.0".to_string()));
    }

    #[test]
    fn test_mock_create_and_push() {
        let repo = MockRepository::new();
        repo.create_tag("v0.1.0", Oid::zero(), Some("Release")).unwrap();
        assert!(repo.create_tag("v0.1.0", Oid::zero(), None).is_err());

        repo.push_tag("origin", "v0.1.0").unwrap();
        assert!(repo.push_tag("origin", "v9.9.9").is_err());

        assert_eq!(repo.created_tags().len(), 1);
        assert_eq!(repo.created_tags()[0].message.as_deref(), Some("Release"));
        assert_eq!(
            repo.pushed_tags(),
            vec![("origin".to_string(), "v0.1.0".to_string())]
        );
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
        assert!(repo.is_clean().unwrap());
        assert!(repo.workdir().is_none());
    }
}
