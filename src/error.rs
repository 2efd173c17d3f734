use thiserror::Error;

use crate::domain::MaturityCategory;

/// Unified error type for git-next-tag operations
#[derive(Error, Debug)]
pub enum NextTagError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Cannot parse '{0}' as a version")]
    Unparseable(String),

    #[error("Cannot create an {requested} version if the current version is already a(n) {current} one")]
    ForbiddenTransition {
        requested: MaturityCategory,
        current: MaturityCategory,
    },

    #[error("Cannot change the pre marker of {current}: it is not a pre-marked version")]
    PreMarkerGuard { current: String },

    #[error("Did not specify how to upgrade the version")]
    UnspecifiedBump,

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Cannot write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

/// Convenience type alias for Results in git-next-tag
pub type Result<T> = std::result::Result<T, NextTagError>;

impl NextTagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextTagError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        NextTagError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        NextTagError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        NextTagError::Remote(msg.into())
    }

    /// True for errors caused by the requested bump rather than by the environment.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            NextTagError::Unparseable(_)
                | NextTagError::ForbiddenTransition { .. }
                | NextTagError::PreMarkerGuard { .. }
                | NextTagError::UnspecifiedBump
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NextTagError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NextTagError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_forbidden_transition_names_both_categories() {
        let err = NextTagError::ForbiddenTransition {
            requested: MaturityCategory::Alpha,
            current: MaturityCategory::Beta,
        };
        let msg = err.to_string();
        assert!(msg.contains("alpha"), "got: {}", msg);
        assert!(msg.contains("beta"), "got: {}", msg);
    }

    #[test]
    fn test_pre_marker_guard_names_version() {
        let err = NextTagError::PreMarkerGuard {
            current: "1.2.3".to_string(),
        };
        assert!(err.to_string().contains("1.2.3"));
    }

    #[test]
    fn test_user_input_classification() {
        assert!(NextTagError::UnspecifiedBump.is_user_input());
        assert!(NextTagError::Unparseable("x".into()).is_user_input());
        assert!(!NextTagError::tag("exists").is_user_input());
        assert!(!NextTagError::remote("offline").is_user_input());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (NextTagError::config("x"), "Configuration error"),
            (NextTagError::version("x"), "Version error"),
            (NextTagError::tag("x"), "Tag error"),
            (NextTagError::remote("x"), "Remote operation failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
