//! Application layer: the tagging workflow behind the command line

pub mod orchestration;

pub use orchestration::{run_next_tag, NextTagArgs, WorkflowResult, INITIAL_VERSION};
