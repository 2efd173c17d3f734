//! Maturity categories carried inside a version
//!
//! A version is either a final release or one of four pre-release maturity
//! stages, each with its own counter (`1.2.0-beta.3`).

use std::fmt;
use std::str::FromStr;

use crate::error::{NextTagError, Result};

/// Maturity stage stored inside a [`Version`](super::Version)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaturityCategory {
    /// Final release, no maturity suffix
    Final,
    Alpha,
    Beta,
    Gamma,
    /// Release candidate (`rc`)
    ReleaseCandidate,
}

impl MaturityCategory {
    /// All categories in increasing maturity, the final release last.
    pub const ALL: [MaturityCategory; 5] = [
        MaturityCategory::Alpha,
        MaturityCategory::Beta,
        MaturityCategory::Gamma,
        MaturityCategory::ReleaseCandidate,
        MaturityCategory::Final,
    ];

    /// Keyword used in version strings, `None` for a final release
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            MaturityCategory::Final => None,
            MaturityCategory::Alpha => Some("alpha"),
            MaturityCategory::Beta => Some("beta"),
            MaturityCategory::Gamma => Some("gamma"),
            MaturityCategory::ReleaseCandidate => Some("rc"),
        }
    }

    /// Position used when ordering versions with equal numbers.
    ///
    /// A final release ranks above every pre-release stage.
    pub fn sort_rank(self) -> u8 {
        match self {
            MaturityCategory::Alpha => 0,
            MaturityCategory::Beta => 1,
            MaturityCategory::Gamma => 2,
            MaturityCategory::ReleaseCandidate => 3,
            MaturityCategory::Final => 4,
        }
    }

    pub fn is_final(self) -> bool {
        self == MaturityCategory::Final
    }
}

impl fmt::Display for MaturityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("final"))
    }
}

impl FromStr for MaturityCategory {
    type Err = NextTagError;

    /// Parses a maturity keyword, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" => Ok(MaturityCategory::Alpha),
            "beta" => Ok(MaturityCategory::Beta),
            "gamma" => Ok(MaturityCategory::Gamma),
            "rc" => Ok(MaturityCategory::ReleaseCandidate),
            _ => Err(NextTagError::version(format!(
                "Invalid maturity keyword: '{}'",
                s
            ))),
        }
    }
}
