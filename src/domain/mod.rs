//! Domain logic - version values and their transitions, independent of git

pub mod bump;
pub mod maturity;
pub mod tag;
pub mod version;

pub use bump::{increment, BumpRequest};
pub use maturity::MaturityCategory;
pub use tag::{
    development_successor, format_tag, latest, parse_tags, sort_newest_first, VersionTag,
};
pub use version::Version;
