use crate::boundary::BoundaryWarning;
use crate::conventional::{builtin_rules, merge_rules, parse_rule_overlay, RuleTable};
use crate::domain::{BumpLevel, ReleaseBranches};
use crate::error::{AutotagError, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-autotag.
///
/// Every field can be overridden from the command line or the matching
/// `INPUT_*` environment variable.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Comma-separated regular expressions naming the release branches
    #[serde(default = "default_release_branches")]
    pub release_branches: String,

    /// Bump applied on a release branch when no commit asks for one
    #[serde(default = "default_bump")]
    pub bump: BumpLevel,

    /// Prefix new tags with `v`
    #[serde(default)]
    pub with_v: bool,

    /// Issue labels that turn a `fixes #N` commit into a minor change
    #[serde(default = "default_issue_labels")]
    pub issue_labels: Vec<String>,

    /// Extra or overriding commit type rules (e.g. `docs = "minor"`)
    #[serde(default)]
    pub commit_types: BTreeMap<String, BumpLevel>,

    /// Remote to push created tags to
    #[serde(default)]
    pub remote: Option<String>,
}

/// Returns the default release branch patterns.
fn default_release_branches() -> String {
    "master,main".to_string()
}

/// Returns the default bump level for release branches.
fn default_bump() -> BumpLevel {
    BumpLevel::Minor
}

/// Returns the default escalation labels.
fn default_issue_labels() -> Vec<String> {
    vec!["enhancement".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            release_branches: default_release_branches(),
            bump: default_bump(),
            with_v: false,
            issue_labels: default_issue_labels(),
            commit_types: BTreeMap::new(),
            remote: None,
        }
    }
}

impl Config {
    /// Check settings that cannot be expressed in the file format
    pub fn validate(&self) -> Result<()> {
        if self.bump == BumpLevel::None {
            return Err(AutotagError::config(
                "bump must be one of patch, minor or major",
            ));
        }

        self.parsed_release_branches()?;
        Ok(())
    }

    /// Compiled release branch patterns
    pub fn parsed_release_branches(&self) -> Result<ReleaseBranches> {
        ReleaseBranches::parse(&self.release_branches)
    }

    /// Layer a JSON object of commit type rules over `commit_types`.
    ///
    /// Blank input changes nothing. Input that does not decode drops every
    /// custom rule, file entries included, so only the built-ins apply; the
    /// returned warning says why.
    pub fn apply_rule_overlay(&mut self, json: &str) -> Option<BoundaryWarning> {
        if json.trim().is_empty() {
            return None;
        }

        match parse_rule_overlay(json) {
            Ok(overlay) => {
                info!("Loaded custom commit type rules: {:?}", overlay);
                self.commit_types.extend(overlay);
                None
            }
            Err(e) => {
                let warning = BoundaryWarning::MalformedRuleOverlay {
                    reason: e.to_string(),
                };
                warn!("{}", warning);
                self.commit_types.clear();
                Some(warning)
            }
        }
    }

    /// Built-in rules with `commit_types` overlaid
    pub fn rule_table(&self) -> RuleTable {
        merge_rules(&builtin_rules(), &self.commit_types)
    }
}

/// Split a comma-separated label list, falling back to the default labels
/// when nothing remains.
///
/// ```ignore
/// assert_eq!(parse_issue_labels("bug, feature"), vec!["bug", "feature"]);
/// assert_eq!(parse_issue_labels(""), vec!["enhancement"]);
/// ```
pub fn parse_issue_labels(input: &str) -> Vec<String> {
    let labels: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();

    if labels.is_empty() {
        default_issue_labels()
    } else {
        labels
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autotag.toml` in current directory
/// 3. `.autotag.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./autotag.toml").exists() {
        fs::read_to_string("./autotag.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".autotag.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| AutotagError::config(format!("Invalid configuration file: {}", e)))?;
    Ok(config)
}
