use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::bump::{self, BumpRequest};
use super::maturity::MaturityCategory;
use crate::error::{NextTagError, Result};

/// Version grammar without anchors, shared with the version-file rewriter.
///
/// Groups: 1-3 numbers, 4 maturity keyword, 5 maturity counter, 6 pre marker.
pub(crate) const VERSION_PATTERN: &str =
    r"[vV]?([0-9]+)\.([0-9]+)\.([0-9]+)(?:-((?i:alpha|beta|gamma|rc))\.([0-9]+))?(-(?i:pre))?";

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{})$", VERSION_PATTERN)).expect("version grammar is a valid regex")
});

/// One release version: numbers, maturity stage and pre marker
///
/// Values are only built by [`Version::parse`], the constructors below, or the
/// increment engine, all of which keep the maturity counter consistent with the
/// category: zero for a final release, at least one otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    category: MaturityCategory,
    counter: u64,
    pre_marker: bool,
}

impl Version {
    /// Create a final release version without pre marker
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            category: MaturityCategory::Final,
            counter: 0,
            pre_marker: false,
        }
    }

    /// Same numbers and pre marker with a different maturity stage.
    ///
    /// Fails when the counter does not fit the category (zero for a
    /// pre-release stage, non-zero for a final release).
    pub fn with_maturity(self, category: MaturityCategory, counter: u64) -> Result<Self> {
        let consistent = if category.is_final() {
            counter == 0
        } else {
            counter >= 1
        };
        if !consistent {
            return Err(NextTagError::version(format!(
                "Maturity counter {} is not valid for a {} version",
                counter, category
            )));
        }

        Ok(Version {
            category,
            counter,
            ..self
        })
    }

    /// Same version with the pre marker set or cleared
    pub const fn with_pre_marker(self, pre_marker: bool) -> Self {
        Version { pre_marker, ..self }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn maturity(&self) -> MaturityCategory {
        self.category
    }

    pub fn maturity_counter(&self) -> u64 {
        self.counter
    }

    pub fn is_pre_marked(&self) -> bool {
        self.pre_marker
    }

    /// Parse a version string such as `v1.2.3-rc.2-pre`.
    ///
    /// The whole input must match; the optional `v` prefix is accepted but
    /// not kept. Returns `None` for anything outside the grammar, including
    /// numbers too large for `u64` and a maturity counter of zero.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(input)?;

        let major = caps[1].parse::<u64>().ok()?;
        let minor = caps[2].parse::<u64>().ok()?;
        let patch = caps[3].parse::<u64>().ok()?;

        let (category, counter) = match caps.get(4) {
            Some(keyword) => {
                let category = keyword.as_str().parse::<MaturityCategory>().ok()?;
                let counter = caps[5].parse::<u64>().ok()?;
                (category, counter)
            }
            None => (MaturityCategory::Final, 0),
        };

        Version::new(major, minor, patch)
            .with_maturity(category, counter)
            .ok()
            .map(|v| v.with_pre_marker(caps.get(6).is_some()))
    }

    /// Derive the next version for a bump request.
    ///
    /// See [`bump::increment`] for the transition rules.
    pub fn increment(&self, request: BumpRequest, want_pre: bool) -> Result<Self> {
        bump::increment(self, request, want_pre)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(keyword) = self.category.keyword() {
            write!(f, "-{}.{}", keyword, self.counter)?;
        }
        if self.pre_marker {
            write!(f, "-pre")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = NextTagError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s).ok_or_else(|| NextTagError::Unparseable(s.to_string()))
    }
}

impl Ord for Version {
    /// Numbers first; at equal numbers every maturity stage precedes the final
    /// release, then the counter decides, and a pre-marked snapshot comes
    /// before the otherwise identical version.
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then(self.category.sort_rank().cmp(&other.category.sort_rank()))
            .then(self.counter.cmp(&other.counter))
            .then(other.pre_marker.cmp(&self.pre_marker))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let version = v("1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.maturity(), MaturityCategory::Final);
        assert_eq!(version.maturity_counter(), 0);
        assert!(!version.is_pre_marked());
    }

    #[test]
    fn test_parse_rejects_incomplete() {
        assert!(Version::parse("").is_none());
        assert!(Version::parse("1.0").is_none());
        assert!(Version::parse("1.0.").is_none());
        assert!(Version::parse("a.b.c").is_none());
    }

    #[test]
    fn test_parse_pre_marker() {
        let version = v("1.0.0-pre");
        assert!(version.is_pre_marked());
        assert_eq!(version.to_string(), "1.0.0-pre");
        assert!(Version::parse("1.0.0-pre.2").is_none());
    }

    #[test]
    fn test_parse_drops_v_prefix() {
        assert_eq!(v("v1.0.0-alpha.2").to_string(), "1.0.0-alpha.2");
        assert_eq!(v("V2.0.0").to_string(), "2.0.0");
    }

    #[test]
    fn test_parse_single_maturity_clause() {
        assert!(Version::parse("1.0.0-alpha.2-beta.1").is_none());
        assert!(Version::parse("1.0.0-pre-pre").is_none());
        assert!(Version::parse("1.0.0-pre-alpha.1").is_none());
    }

    #[test]
    fn test_parse_maturity_with_pre() {
        let version = v("1.2.3-alpha.2-pre");
        assert_eq!(version.maturity(), MaturityCategory::Alpha);
        assert_eq!(version.maturity_counter(), 2);
        assert!(version.is_pre_marked());
        assert_eq!(version.to_string(), "1.2.3-alpha.2-pre");
    }

    #[test]
    fn test_parse_is_anchored() {
        assert!(Version::parse("release-1.2.3").is_none());
        assert!(Version::parse("1.2.3-final").is_none());
        assert!(Version::parse(" 1.2.3").is_none());
        assert!(Version::parse("1.2.3.4").is_none());
        assert!(Version::parse("vv1.2.3").is_none());
    }

    #[test]
    fn test_parse_keyword_case_insensitive() {
        assert_eq!(v("1.0.0-RC.1").to_string(), "1.0.0-rc.1");
        assert_eq!(v("1.0.0-Beta.4-PRE").to_string(), "1.0.0-beta.4-pre");
    }

    #[test]
    fn test_parse_rejects_zero_counter() {
        assert!(Version::parse("1.0.0-alpha.0").is_none());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Version::parse("18446744073709551616.0.0").is_none());
        assert!(Version::parse("18446744073709551615.0.0").is_some());
    }

    #[test]
    fn test_parse_leading_zeros() {
        assert_eq!(v("01.002.3"), Version::new(1, 2, 3));
    }

    #[test]
    fn test_round_trip() {
        for s in [
            "0.0.0",
            "1.2.3",
            "1.2.3-pre",
            "1.2.3-alpha.1",
            "1.2.3-beta.12-pre",
            "1.2.3-gamma.7",
            "10.20.30-rc.2-pre",
        ] {
            let parsed = v(s);
            assert_eq!(parsed.to_string(), s);
            assert_eq!(Version::parse(&parsed.to_string()), Some(parsed));
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<Version>().unwrap_err();
        assert!(matches!(err, NextTagError::Unparseable(ref s) if s == "nope"));
        assert_eq!("v3.1.4".parse::<Version>().unwrap(), Version::new(3, 1, 4));
    }

    #[test]
    fn test_with_maturity_checks_counter() {
        let base = Version::new(1, 0, 0);
        assert!(base.with_maturity(MaturityCategory::Beta, 0).is_err());
        assert!(base.with_maturity(MaturityCategory::Final, 3).is_err());
        let beta = base.with_maturity(MaturityCategory::Beta, 3).unwrap();
        assert_eq!(beta.to_string(), "1.0.0-beta.3");
    }

    #[test]
    fn test_order_numbers() {
        assert!(v("1.0.0") < v("2.0.0"));
        assert!(v("1.2.0") < v("1.10.0"));
        assert!(v("1.2.3") < v("1.2.4"));
    }

    #[test]
    fn test_order_final_after_maturity() {
        assert!(v("1.0.0-rc.9") < v("1.0.0"));
        assert!(v("1.0.0-alpha.1") < v("1.0.0-beta.1"));
        assert!(v("1.0.0-beta.1") < v("1.0.0-gamma.1"));
        assert!(v("1.0.0-gamma.5") < v("1.0.0-rc.1"));
        assert!(v("1.0.0") < v("1.0.1-alpha.1"));
    }

    #[test]
    fn test_order_counter_then_pre_marker() {
        assert!(v("1.0.0-beta.2") < v("1.0.0-beta.10"));
        assert!(v("1.0.0-beta.2-pre") < v("1.0.0-beta.2"));
        assert!(v("1.0.0-pre") < v("1.0.0"));
        assert!(v("1.0.0-beta.2") < v("1.0.0-beta.3-pre"));
    }

    #[test]
    fn test_order_consistent_with_eq() {
        assert_eq!(v("v1.0.0-rc.1").cmp(&v("1.0.0-rc.1")), Ordering::Equal);
    }
}
