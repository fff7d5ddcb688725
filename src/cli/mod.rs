//! Release workflow driven by the command-line front end

pub mod orchestration;

pub use orchestration::{run_release, ReleaseOutcome, ReleaseRequest};
