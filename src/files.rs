//! Rewriting version strings inside text files

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::version::VERSION_PATTERN;
use crate::error::{NextTagError, Result};

static VERSION_IN_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b{}\b", VERSION_PATTERN)).expect("version grammar is a valid regex")
});

/// Replace every version occurrence in `content` that differs from `new_version`.
///
/// An occurrence written with a leading `v` keeps it. Returns the rewritten
/// text and the number of occurrences replaced.
pub fn replace_versions(content: &str, new_version: &str) -> (String, usize) {
    let mut replaced = 0;
    let output = VERSION_IN_TEXT_RE.replace_all(content, |caps: &regex::Captures<'_>| {
        let found = &caps[0];
        let embedded = caps
            .get(0)
            .is_some_and(|m| is_embedded(content, m.start(), m.end()));
        let (prefix, bare) = match found.strip_prefix(['v', 'V']) {
            Some(rest) => (&found[..1], rest),
            None => ("", found),
        };
        if embedded || bare == new_version {
            found.to_string()
        } else {
            replaced += 1;
            format!("{}{}", prefix, new_version)
        }
    });
    (output.into_owned(), replaced)
}

/// A match inside a longer dotted number such as `10.0.0.1`.
fn is_embedded(text: &str, start: usize, end: usize) -> bool {
    let dotted_before = text[..start].ends_with('.');
    let mut after = text[end..].chars();
    let dotted_after =
        after.next() == Some('.') && after.next().is_some_and(|c| c.is_ascii_digit());
    dotted_before || dotted_after
}

/// Rewrite the versions found in one file.
///
/// The file is only written when something changed; writing in place keeps
/// its permissions.
pub fn replace_in_file(path: &Path, new_version: &str) -> Result<usize> {
    let input = fs::read_to_string(path).map_err(|e| {
        NextTagError::Io(std::io::Error::new(
            e.kind(),
            format!("Could not read file {}: {}", path.display(), e),
        ))
    })?;

    let (output, replaced) = replace_versions(&input, new_version);
    if replaced == 0 {
        debug!(file = %path.display(), "no version to update");
        return Ok(0);
    }

    fs::write(path, output).map_err(|e| {
        NextTagError::Io(std::io::Error::new(
            e.kind(),
            format!("Could not write to file {}: {}", path.display(), e),
        ))
    })?;
    debug!(file = %path.display(), replaced, version = new_version, "updated version file");
    Ok(replaced)
}

/// Rewrite each configured file, resolved against `root`.
///
/// Returns the files that actually changed. Duplicate entries are processed once.
pub fn replace_in_files(root: &Path, files: &[PathBuf], new_version: &str) -> Result<Vec<PathBuf>> {
    let unique: BTreeSet<&PathBuf> = files.iter().collect();
    let mut changed = Vec::new();

    for relative in unique {
        let path = root.join(relative);
        if !path.is_file() {
            warn!(file = %path.display(), "configured version file does not exist");
            return Err(NextTagError::config(format!(
                "version file '{}' does not exist",
                relative.display()
            )));
        }
        if replace_in_file(&path, new_version)? > 0 {
            changed.push(relative.clone());
        }
    }

    Ok(changed)
}
