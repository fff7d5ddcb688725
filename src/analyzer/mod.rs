//! Analysis engine: from commit history to the next version

pub mod history_scanner;
pub mod version_planner;

pub use history_scanner::HistoryScanner;
pub use version_planner::{plan, VersionPlanner};
