use crate::error::{NextTagError, Result};
use git2::{Oid, Repository as Git2Repo, StatusOptions};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push rejected for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        callbacks
    }
}

impl super::Repository for Git2Repository {
    fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        debug!(entries = statuses.len(), "working tree status");
        Ok(statuses.is_empty())
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self
            .repo
            .head()
            .map_err(|e| NextTagError::tag(format!("Cannot resolve HEAD: {}", e)))?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn tags_pointing_at(&self, oid: Oid) -> Result<Vec<String>> {
        let mut found = Vec::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(e) if e.code() == git2::ErrorCode::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            // Tags on blobs or trees cannot point at a commit.
            if let Ok(commit) = reference.peel_to_commit() {
                if commit.id() == oid {
                    found.push(name.to_string());
                }
            }
        }

        Ok(found)
    }

    fn create_tag(&self, name: &str, oid: Oid, message: Option<&str>) -> Result<()> {
        let object = self
            .repo
            .find_object(oid, None)
            .map_err(|e| NextTagError::tag(format!("Cannot find object: {}", e)))?;

        match message {
            Some(message) => {
                let signature = self.repo.signature()?;
                self.repo
                    .tag(name, &object, &signature, message, false)
                    .map_err(|e| NextTagError::tag(format!("Cannot create tag: {}", e)))?;
            }
            None => {
                self.repo
                    .tag_lightweight(name, &object, false)
                    .map_err(|e| NextTagError::tag(format!("Cannot create tag: {}", e)))?;
            }
        }

        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote)
            .map_err(|e| NextTagError::remote(format!("Cannot find remote: {}", e)))?;

        let refspec = format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name);
        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(Self::remote_callbacks());

        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    NextTagError::remote(format!("Network error during push: {}", e))
                }
                _ => NextTagError::remote(format!("Push failed: {}", e)),
            })?;

        Ok(())
    }
}
