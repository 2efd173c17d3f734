//! Increment engine: requested bump + current version -> next version

use std::fmt;
use std::str::FromStr;

use super::maturity::MaturityCategory;
use super::version::Version;
use crate::error::{NextTagError, Result};

/// Target chosen by the caller for the next version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpRequest {
    Major,
    Minor,
    Patch,
    Alpha,
    Beta,
    Gamma,
    ReleaseCandidate,
    /// Keep the current version and only set or clear its pre marker
    MarkPre,
    /// No target was chosen
    Unspecified,
}

impl BumpRequest {
    /// Maturity stage requested, for the four maturity bumps
    pub fn target_category(self) -> Option<MaturityCategory> {
        match self {
            BumpRequest::Alpha => Some(MaturityCategory::Alpha),
            BumpRequest::Beta => Some(MaturityCategory::Beta),
            BumpRequest::Gamma => Some(MaturityCategory::Gamma),
            BumpRequest::ReleaseCandidate => Some(MaturityCategory::ReleaseCandidate),
            _ => None,
        }
    }

    /// Bump that advances the counter of an existing maturity stage.
    ///
    /// `None` for the final release, which has no counter.
    pub fn for_category(category: MaturityCategory) -> Option<Self> {
        match category {
            MaturityCategory::Final => None,
            MaturityCategory::Alpha => Some(BumpRequest::Alpha),
            MaturityCategory::Beta => Some(BumpRequest::Beta),
            MaturityCategory::Gamma => Some(BumpRequest::Gamma),
            MaturityCategory::ReleaseCandidate => Some(BumpRequest::ReleaseCandidate),
        }
    }
}

impl fmt::Display for BumpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpRequest::Major => "major",
            BumpRequest::Minor => "minor",
            BumpRequest::Patch => "patch",
            BumpRequest::Alpha => "alpha",
            BumpRequest::Beta => "beta",
            BumpRequest::Gamma => "gamma",
            BumpRequest::ReleaseCandidate => "rc",
            BumpRequest::MarkPre => "pre",
            BumpRequest::Unspecified => "unspecified",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for BumpRequest {
    type Err = NextTagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(BumpRequest::Major),
            "minor" => Ok(BumpRequest::Minor),
            "patch" => Ok(BumpRequest::Patch),
            "alpha" => Ok(BumpRequest::Alpha),
            "beta" => Ok(BumpRequest::Beta),
            "gamma" => Ok(BumpRequest::Gamma),
            "rc" => Ok(BumpRequest::ReleaseCandidate),
            "pre" => Ok(BumpRequest::MarkPre),
            _ => Err(NextTagError::version(format!(
                "Unknown bump request: '{}'",
                s
            ))),
        }
    }
}

/// Outcome of requesting a maturity stage from the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Forbidden,
    /// Same stage, or first stage off a final release: counter + 1
    Continue,
    /// Strictly more mature stage: counter restarts at 1
    Advance,
}

use Transition::{Advance, Continue, Forbidden};

// Rows: requested alpha, beta, gamma, rc.
// Columns: current final, alpha, beta, gamma, rc.
const TRANSITIONS: [[Transition; 5]; 4] = [
    [Continue, Continue, Forbidden, Forbidden, Forbidden],
    [Continue, Advance, Continue, Forbidden, Forbidden],
    [Continue, Advance, Advance, Continue, Forbidden],
    [Continue, Advance, Advance, Advance, Continue],
];

fn transition(requested: MaturityCategory, current: MaturityCategory) -> Transition {
    let row = match requested {
        MaturityCategory::Alpha => 0,
        MaturityCategory::Beta => 1,
        MaturityCategory::Gamma => 2,
        MaturityCategory::ReleaseCandidate => 3,
        MaturityCategory::Final => return Forbidden,
    };
    let column = match current {
        MaturityCategory::Final => 0,
        MaturityCategory::Alpha => 1,
        MaturityCategory::Beta => 2,
        MaturityCategory::Gamma => 3,
        MaturityCategory::ReleaseCandidate => 4,
    };
    TRANSITIONS[row][column]
}

fn bumped(value: u64, what: &str) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| NextTagError::version(format!("{} version overflows", what)))
}

/// Compute the version following `current` for `request`.
///
/// - major/minor/patch bump their number, zero the lower ones and drop any
///   maturity stage;
/// - a maturity bump continues the current stage (counter + 1), advances to a
///   more mature stage (counter 1), or fails when the stage was already passed;
/// - [`BumpRequest::MarkPre`] only applies to a pre-marked version;
/// - [`BumpRequest::Unspecified`] always fails.
///
/// `want_pre` sets the pre marker of every successful result.
pub fn increment(current: &Version, request: BumpRequest, want_pre: bool) -> Result<Version> {
    let next = match request {
        BumpRequest::Major => Version::new(bumped(current.major(), "major")?, 0, 0),
        BumpRequest::Minor => Version::new(current.major(), bumped(current.minor(), "minor")?, 0),
        BumpRequest::Patch => Version::new(
            current.major(),
            current.minor(),
            bumped(current.patch(), "patch")?,
        ),
        BumpRequest::Alpha
        | BumpRequest::Beta
        | BumpRequest::Gamma
        | BumpRequest::ReleaseCandidate => {
            let requested = request
                .target_category()
                .ok_or(NextTagError::UnspecifiedBump)?;
            let counter = match transition(requested, current.maturity()) {
                Forbidden => {
                    return Err(NextTagError::ForbiddenTransition {
                        requested,
                        current: current.maturity(),
                    })
                }
                Continue => bumped(current.maturity_counter(), "maturity counter")?,
                Advance => 1,
            };
            Version::new(current.major(), current.minor(), current.patch())
                .with_maturity(requested, counter)?
        }
        BumpRequest::MarkPre => {
            if !current.is_pre_marked() {
                return Err(NextTagError::PreMarkerGuard {
                    current: current.to_string(),
                });
            }
            *current
        }
        BumpRequest::Unspecified => return Err(NextTagError::UnspecifiedBump),
    };

    Ok(next.with_pre_marker(want_pre))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn next(s: &str, request: BumpRequest) -> Result<String> {
        increment(&v(s), request, false).map(|n| n.to_string())
    }

    #[test]
    fn test_number_bumps() {
        assert_eq!(next("1.2.3", BumpRequest::Major).unwrap(), "2.0.0");
        assert_eq!(next("1.2.3", BumpRequest::Minor).unwrap(), "1.3.0");
        assert_eq!(next("1.2.3", BumpRequest::Patch).unwrap(), "1.2.4");
    }

    #[test]
    fn test_number_bumps_drop_maturity() {
        assert_eq!(next("1.2.3-rc.2-pre", BumpRequest::Patch).unwrap(), "1.2.4");
        assert_eq!(next("1.2.3-alpha.1", BumpRequest::Minor).unwrap(), "1.3.0");
    }

    #[test]
    fn test_number_bumps_honor_want_pre() {
        let bumped = increment(&v("1.2.3"), BumpRequest::Minor, true).unwrap();
        assert_eq!(bumped.to_string(), "1.3.0-pre");
    }

    #[test]
    fn test_first_maturity_step_from_final() {
        assert_eq!(next("1.2.3", BumpRequest::Alpha).unwrap(), "1.2.3-alpha.1");
        assert_eq!(next("1.2.3", BumpRequest::ReleaseCandidate).unwrap(), "1.2.3-rc.1");
    }

    #[test]
    fn test_same_category_continues_counter() {
        assert_eq!(next("1.2.3-gamma.4", BumpRequest::Gamma).unwrap(), "1.2.3-gamma.5");
        assert_eq!(next("1.2.3-rc.1", BumpRequest::ReleaseCandidate).unwrap(), "1.2.3-rc.2");
    }

    #[test]
    fn test_higher_category_restarts_counter() {
        assert_eq!(next("1.2.3-alpha.7", BumpRequest::Beta).unwrap(), "1.2.3-beta.1");
        assert_eq!(next("1.2.3-alpha.7", BumpRequest::ReleaseCandidate).unwrap(), "1.2.3-rc.1");
    }

    #[test]
    fn test_higher_category_honors_want_pre() {
        let bumped = increment(&v("1.2.3-alpha.7"), BumpRequest::Gamma, true).unwrap();
        assert_eq!(bumped.to_string(), "1.2.3-gamma.1-pre");
    }

    #[test]
    fn test_lower_category_forbidden() {
        let err = increment(&v("1.2.3-rc.1"), BumpRequest::Gamma, false).unwrap_err();
        match err {
            NextTagError::ForbiddenTransition { requested, current } => {
                assert_eq!(requested, MaturityCategory::Gamma);
                assert_eq!(current, MaturityCategory::ReleaseCandidate);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_transition_table_matches_legality() {
        let requested = [
            MaturityCategory::Alpha,
            MaturityCategory::Beta,
            MaturityCategory::Gamma,
            MaturityCategory::ReleaseCandidate,
        ];
        for (row, req) in requested.iter().enumerate() {
            for cur in MaturityCategory::ALL {
                let expected = if cur.is_final() || cur == *req {
                    Continue
                } else if cur.sort_rank() < req.sort_rank() {
                    Advance
                } else {
                    Forbidden
                };
                assert_eq!(transition(*req, cur), expected, "row {row} from {cur}");
            }
        }
    }

    #[test]
    fn test_mark_pre_requires_pre_marked() {
        let err = increment(&v("1.2.3"), BumpRequest::MarkPre, false).unwrap_err();
        assert!(matches!(err, NextTagError::PreMarkerGuard { .. }));

        let released = increment(&v("1.2.3-beta.2-pre"), BumpRequest::MarkPre, false).unwrap();
        assert_eq!(released.to_string(), "1.2.3-beta.2");

        let kept = increment(&v("1.2.3-pre"), BumpRequest::MarkPre, true).unwrap();
        assert_eq!(kept.to_string(), "1.2.3-pre");
    }

    #[test]
    fn test_unspecified_fails() {
        let err = increment(&v("1.2.3"), BumpRequest::Unspecified, false).unwrap_err();
        assert!(matches!(err, NextTagError::UnspecifiedBump));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let max = Version::new(u64::MAX, 0, 0);
        assert!(increment(&max, BumpRequest::Major, false).is_err());
        assert!(increment(&max, BumpRequest::Minor, false).is_ok());
    }

    #[test]
    fn test_request_parse_and_display() {
        for name in ["major", "minor", "patch", "alpha", "beta", "gamma", "rc", "pre"] {
            let request: BumpRequest = name.parse().unwrap();
            assert_eq!(request.to_string(), name);
        }
        assert!("huge".parse::<BumpRequest>().is_err());
    }

    #[test]
    fn test_for_category() {
        assert_eq!(BumpRequest::for_category(MaturityCategory::Final), None);
        assert_eq!(
            BumpRequest::for_category(MaturityCategory::Beta),
            Some(BumpRequest::Beta)
        );
    }
}
