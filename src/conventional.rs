//! Commit classification against an ordered rule table
//!
//! A rule maps a commit-message shape to a [`BumpLevel`]. The shape is derived
//! from the rule key:
//!
//! - `BREAKING CHANGE` matches a `BREAKING CHANGE:` token anywhere in the message
//! - `breaking` matches a message starting with the word `breaking`
//! - any other key `T` matches a conventional header `T: ...` or `T(scope): ...`
//!
//! All three are case-insensitive. Legacy hash-tag markers (`#wip`, `#major`,
//! `#minor`, `#patch`) are separate from the table and case-sensitive.

use crate::domain::BumpLevel;
use std::collections::BTreeMap;

/// Hash-tag markers recognised anywhere in a commit message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyMarker {
    Wip,
    Major,
    Minor,
    Patch,
}

impl LegacyMarker {
    fn token(self) -> &'static str {
        match self {
            LegacyMarker::Wip => "#wip",
            LegacyMarker::Major => "#major",
            LegacyMarker::Minor => "#minor",
            LegacyMarker::Patch => "#patch",
        }
    }

    /// Check for the marker followed by a word boundary
    pub fn matches(self, message: &str) -> bool {
        let token = self.token();
        message
            .match_indices(token)
            .any(|(start, _)| !starts_with_word_char(&message[start + token.len()..]))
    }
}

/// How a rule key is matched against a commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// `type:` or `type(scope):` at the start of the message
    HeaderType(String),
    /// `breaking` at the start of the message, followed by a colon or a word boundary
    BreakingBare,
    /// `BREAKING CHANGE:` anywhere in the message
    BreakingChangeFooter,
    /// `#wip`, `#major`, `#minor` or `#patch` anywhere in the message
    LegacyHashTag(LegacyMarker),
}

impl Matcher {
    /// Derive the matcher for a rule key
    pub fn for_key(key: &str) -> Self {
        match key {
            "BREAKING CHANGE" => Matcher::BreakingChangeFooter,
            "breaking" => Matcher::BreakingBare,
            other => Matcher::HeaderType(other.to_string()),
        }
    }

    pub fn matches(&self, message: &str) -> bool {
        match self {
            Matcher::HeaderType(key) => match strip_prefix_ignore_case(message, key) {
                Some(rest) if rest.starts_with(':') => true,
                Some(rest) if rest.starts_with('(') => {
                    rest.lines().next().is_some_and(|line| line.contains("):"))
                }
                _ => false,
            },
            Matcher::BreakingBare => strip_prefix_ignore_case(message, "breaking")
                .is_some_and(|rest| !starts_with_word_char(rest)),
            Matcher::BreakingChangeFooter => {
                message.to_ascii_lowercase().contains("breaking change:")
            }
            Matcher::LegacyHashTag(marker) => marker.matches(message),
        }
    }
}

fn strip_prefix_ignore_case<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    let head = message.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&message[prefix.len()..])
    } else {
        None
    }
}

fn starts_with_word_char(s: &str) -> bool {
    s.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A classification rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub key: String,
    pub level: BumpLevel,
    matcher: Matcher,
}

impl Rule {
    pub fn new(key: impl Into<String>, level: BumpLevel) -> Self {
        let key = key.into();
        let matcher = Matcher::for_key(&key);
        Rule { key, level, matcher }
    }
}

/// Rules in classification order; keys are unique
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Build a table from `(key, level)` pairs, later duplicates replacing
    /// the level of an earlier key in place
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, BumpLevel)>) -> Self {
        let mut table = RuleTable::default();
        for (key, level) in pairs {
            table.upsert(key.into(), level);
        }
        table
    }

    fn upsert(&mut self, key: String, level: BumpLevel) {
        match self.rules.iter_mut().find(|rule| rule.key == key) {
            Some(rule) => rule.level = level,
            None => self.rules.push(Rule::new(key, level)),
        }
    }

    /// Level configured for a key
    pub fn get(&self, key: &str) -> Option<BumpLevel> {
        self.rules
            .iter()
            .find(|rule| rule.key == key)
            .map(|rule| rule.level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The built-in rule table
pub fn builtin_rules() -> RuleTable {
    RuleTable::from_pairs([
        ("BREAKING CHANGE", BumpLevel::Major),
        ("breaking", BumpLevel::Major),
        ("feat", BumpLevel::Minor),
        ("feature", BumpLevel::Minor),
        ("fix", BumpLevel::Patch),
        ("perf", BumpLevel::Patch),
        ("build", BumpLevel::Patch),
        ("chore", BumpLevel::Patch),
        ("ci", BumpLevel::Patch),
        ("docs", BumpLevel::Patch),
        ("refactor", BumpLevel::Patch),
        ("revert", BumpLevel::Patch),
        ("style", BumpLevel::Patch),
        ("test", BumpLevel::Patch),
    ])
}

/// Overlay user rules on a base table.
///
/// Keys already in `base` keep their position and take the override's level;
/// keys new to the table are appended in key order. `base` is not modified.
pub fn merge_rules(base: &RuleTable, overrides: &BTreeMap<String, BumpLevel>) -> RuleTable {
    let mut merged = base.clone();
    for (key, level) in overrides {
        merged.upsert(key.clone(), *level);
    }
    merged
}

/// Decode a JSON object of rule overrides (e.g. `{"docs": "minor"}`)
pub fn parse_rule_overlay(json: &str) -> serde_json::Result<BTreeMap<String, BumpLevel>> {
    serde_json::from_str(json)
}

/// The rule a commit message matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub key: &'a str,
    pub level: BumpLevel,
}

/// Classify a commit message: the first rule in table order that matches wins
pub fn classify<'a>(message: &str, table: &'a RuleTable) -> Option<Classification<'a>> {
    table
        .iter()
        .find(|rule| rule.matcher.matches(message))
        .map(|rule| Classification {
            key: &rule.key,
            level: rule.level,
        })
}
