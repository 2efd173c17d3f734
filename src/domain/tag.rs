use std::cmp::Ordering;

use super::bump::BumpRequest;
use super::version::Version;
use crate::error::Result;

/// A git tag name together with the version it parses to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub name: String,
    /// `None` when the name is not a version
    pub version: Option<Version>,
}

impl VersionTag {
    /// Create a tag, parsing its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let version = Version::parse(&name);
        VersionTag { name, version }
    }
}

/// Ascending order where unparseable values sort after every version.
pub fn compare_optional(a: Option<&Version>, b: Option<&Version>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Parse every tag name
pub fn parse_tags<I, S>(names: I) -> Vec<VersionTag>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(VersionTag::new).collect()
}

/// Names of the tags that are not versions
pub fn unparseable(tags: &[VersionTag]) -> Vec<&str> {
    tags.iter()
        .filter(|t| t.version.is_none())
        .map(|t| t.name.as_str())
        .collect()
}

/// Sort newest version first; unparseable tags go last, by name.
pub fn sort_newest_first(tags: &mut [VersionTag]) {
    tags.sort_by(|a, b| match (&a.version, &b.version) {
        (Some(va), Some(vb)) => vb.cmp(va).then_with(|| a.name.cmp(&b.name)),
        (None, None) => a.name.cmp(&b.name),
        (va, vb) => compare_optional(va.as_ref(), vb.as_ref()),
    });
}

/// The tag carrying the highest version, ignoring unparseable names.
///
/// When two names parse to the same version (`v1.0.0` and `1.0.0`) the
/// lexicographically greater name wins, so the choice does not depend on
/// input order.
pub fn latest(tags: &[VersionTag]) -> Option<&VersionTag> {
    tags.iter()
        .filter(|t| t.version.is_some())
        .max_by(|a, b| {
            compare_optional(a.version.as_ref(), b.version.as_ref())
                .then_with(|| a.name.cmp(&b.name))
        })
}

/// Tag name for a version, with or without the leading `v`
pub fn format_tag(version: &Version, v_prefix: bool) -> String {
    if v_prefix {
        format!("v{}", version)
    } else {
        version.to_string()
    }
}

/// Pre-marked version to leave in files after releasing `released`.
///
/// A final release continues with the next patch, a maturity release with
/// the next counter of its stage.
pub fn development_successor(released: &Version) -> Result<Version> {
    let request =
        BumpRequest::for_category(released.maturity()).unwrap_or(BumpRequest::Patch);
    released.increment(request, true)
}
