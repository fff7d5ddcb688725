pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod issues;
pub mod ui;

pub use error::{AutotagError, Result};
