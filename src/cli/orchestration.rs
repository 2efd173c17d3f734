//! Main workflow orchestration logic
//!
//! One tagging run: inspect the repository, pick the current version, derive
//! the next one, create the tag and stamp the configured version files. CLI
//! argument parsing lives in `main.rs`; everything here can be driven
//! programmatically with any [Repository] and [Confirm] implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{self, BumpRequest, Version, VersionTag};
use crate::files;
use crate::git::Repository;
use crate::ui::{self, Confirm};

/// Version used when the repository has no version tag yet
pub const INITIAL_VERSION: Version = Version::new(0, 1, 0);

/// Arguments for the tagging workflow
///
/// Mirrors the CLI flags but does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct NextTagArgs {
    /// Requested bump
    pub bump: BumpRequest,

    /// Give the new version a `-pre` marker
    pub pre: bool,

    /// Skip confirmation prompts
    pub force: bool,

    /// Preview mode - don't create tags, push or touch files
    pub dry_run: bool,

    /// Push the tag after creating it, in addition to the `push` setting
    pub push: bool,

    /// Remote to push to, overriding the configured one
    pub remote: Option<String>,
}

impl NextTagArgs {
    pub fn new(bump: BumpRequest) -> Self {
        NextTagArgs {
            bump,
            pre: false,
            force: false,
            dry_run: false,
            push: false,
            remote: None,
        }
    }
}

/// Result of a tagging run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Tag the new version was derived from, `None` for the initial tag
    pub previous_tag: Option<String>,

    /// The new tag name
    pub tag: String,

    /// The new version
    pub version: Version,

    /// Whether the tag was created (false in dry-run mode)
    pub created: bool,

    /// Whether the tag was pushed to remote
    pub pushed: bool,

    /// Version files that were rewritten
    pub updated_files: Vec<PathBuf>,
}

/// Main tagging workflow
///
/// 1. Check the working tree is clean (or confirmed)
/// 2. Refuse a HEAD that already carries a version tag
/// 3. Find the latest version tag and derive the next version
/// 4. Confirm, create and optionally push the tag
/// 5. Rewrite configured version files
///
/// Nothing is created before every check has passed.
pub fn run_next_tag<R, C>(
    repo: &R,
    config: &Config,
    args: &NextTagArgs,
    confirm: &mut C,
) -> Result<WorkflowResult>
where
    R: Repository,
    C: Confirm + ?Sized,
{
    let interactive = !args.force && !args.dry_run;

    if !repo.is_clean()? {
        let warning = BoundaryWarning::DirtyWorkingTree;
        ui::display_boundary_warning(&warning);
        warn!("working tree is not clean");

        if interactive && !confirm.confirm("Git tree is not clean. Continue?")? {
            bail!("Cancelled tagging because tree was not clean");
        }
    }

    let head = repo.head_oid().context("Cannot resolve HEAD")?;
    let head_versions: Vec<String> = repo
        .tags_pointing_at(head)?
        .into_iter()
        .filter(|name| Version::parse(name).is_some())
        .collect();
    if !head_versions.is_empty() {
        bail!(
            "Repository is already tagged with {} and no more commits have been made",
            head_versions.join(", ")
        );
    }

    let version_files = resolve_version_files(repo, config)?;

    let tags = domain::parse_tags(repo.list_tags()?);
    for name in domain::tag::unparseable(&tags) {
        debug!(tag = name, "skipping tag that is not a version");
        ui::display_boundary_warning(&BoundaryWarning::UnparsableTag {
            tag: name.to_string(),
        });
    }

    let (previous, next) = match domain::latest(&tags) {
        Some(VersionTag {
            name,
            version: Some(current),
        }) => {
            info!(tag = %name, version = %current, "found latest version tag");
            let next = current.increment(args.bump, args.pre)?;
            info!(bump = %args.bump, next = %next, "derived next version");
            (Some(name.clone()), next)
        }
        _ => {
            let initial_tag = domain::format_tag(&INITIAL_VERSION, config.initial_v);
            ui::display_boundary_warning(&BoundaryWarning::NoVersionTags {
                initial_tag: initial_tag.clone(),
            });
            debug!(bump = %args.bump, "no version tag yet, ignoring bump request");

            if interactive
                && !confirm.confirm(&format!("Create initial tag to version {}", initial_tag))?
            {
                bail!("Cancelled initial tagging");
            }
            (None, INITIAL_VERSION)
        }
    };

    let tag = domain::format_tag(&next, config.initial_v);
    ui::display_proposed_tag(previous.as_deref(), &tag);

    let push = args.push || config.push;
    let remote = args.remote.clone().unwrap_or_else(|| config.remote.clone());
    let file_version = if config.always_leave_version_pre {
        domain::development_successor(&next)?
    } else {
        next
    };

    let mut result = WorkflowResult {
        previous_tag: previous,
        tag: tag.clone(),
        version: next,
        created: false,
        pushed: false,
        updated_files: Vec::new(),
    };

    if args.dry_run {
        ui::display_status("Dry run:");
        ui::display_success(&format!("  Would create tag: {}", tag));
        if push {
            ui::display_success(&format!("  Would push {} to {}", tag, remote));
        }
        for file in &version_files {
            ui::display_success(&format!(
                "  Would update {} to {}",
                file.display(),
                file_version
            ));
        }
        return Ok(result);
    }

    if interactive
        && !confirm.confirm(&format!("Creating tag for version {}. Continue?", tag))?
    {
        bail!("Tagging cancelled");
    }

    let message = config
        .tag_annotated
        .then(|| format!("Release {}", tag));
    repo.create_tag(&tag, head, message.as_deref())
        .with_context(|| format!("Failed to create tag '{}'", tag))?;
    result.created = true;
    info!(tag = %tag, commit = %head, annotated = config.tag_annotated, "created tag");
    ui::display_success(&format!("Created tag: {}", tag));

    if push {
        repo.push_tag(&remote, &tag).with_context(|| {
            format!("Tag '{}' was created locally but could not be pushed", tag)
        })?;
        result.pushed = true;
        info!(tag = %tag, remote = %remote, "pushed tag");
        ui::display_success(&format!("Pushed tag: {} to {}", tag, remote));
    } else {
        ui::display_manual_push_instruction(&tag, &remote);
    }

    if let Some(root) = repo.workdir() {
        let rendered = file_version.to_string();
        result.updated_files = files::replace_in_files(root, &version_files, &rendered)?;
        ui::display_updated_files(&result.updated_files, &rendered);
    }

    Ok(result)
}

/// Checks that every configured version file exists before anything is tagged.
fn resolve_version_files<R: Repository>(repo: &R, config: &Config) -> Result<Vec<PathBuf>> {
    if config.version_files.is_empty() {
        return Ok(Vec::new());
    }

    let Some(root) = repo.workdir() else {
        bail!("Version files are configured but the repository has no working directory");
    };

    for file in &config.version_files {
        if !root.join(file).is_file() {
            bail!("Configured version file '{}' does not exist", file.display());
        }
    }

    Ok(config.version_files.clone())
}
