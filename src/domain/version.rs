use crate::error::{AutotagError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Magnitude of a version increment.
///
/// Totally ordered: `None < Patch < Minor < Major`, so the aggregate of a
/// history scan can be folded with `max`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    /// Parse a bump level from a string (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for BumpLevel {
    type Err = AutotagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(BumpLevel::None),
            "patch" => Ok(BumpLevel::Patch),
            "minor" => Ok(BumpLevel::Minor),
            "major" => Ok(BumpLevel::Major),
            other => Err(AutotagError::version(format!(
                "Invalid bump level: '{}' - expected none, patch, minor or major",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpLevel::None => write!(f, "none"),
            BumpLevel::Patch => write!(f, "patch"),
            BumpLevel::Minor => write!(f, "minor"),
            BumpLevel::Major => write!(f, "major"),
        }
    }
}

/// A normalized semantic version derived from a tag name.
///
/// Cleaning trims whitespace, strips any leading run of `=`/`v` characters and
/// drops build metadata. Whether a `v` was stripped is remembered so the tag
/// name can be reproduced, but it never takes part in comparisons.
#[derive(Debug, Clone)]
pub struct CleanVersion {
    version: semver::Version,
    had_leading_v: bool,
}

impl CleanVersion {
    /// Wrap an already clean version
    pub fn new(version: semver::Version) -> Self {
        CleanVersion {
            version: semver::Version {
                build: semver::BuildMetadata::EMPTY,
                ..version
            },
            had_leading_v: false,
        }
    }

    /// The `0.0.0` version used when a repository has no release yet
    pub fn baseline() -> Self {
        CleanVersion::new(semver::Version::new(0, 0, 0))
    }

    /// Clean a raw tag name into a version, or `None` if it is not one.
    ///
    /// ```ignore
    /// assert_eq!(CleanVersion::clean("v1.2.3").unwrap().to_string(), "1.2.3");
    /// assert!(CleanVersion::clean("release-1.2.3").is_none());
    /// ```
    pub fn clean(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let rest = trimmed.trim_start_matches(['=', 'v']);
        let prefix = &trimmed[..trimmed.len() - rest.len()];

        let version = semver::Version::parse(rest).ok()?;

        Some(CleanVersion {
            had_leading_v: prefix.contains('v'),
            ..CleanVersion::new(version)
        })
    }

    pub fn version(&self) -> &semver::Version {
        &self.version
    }

    pub fn had_leading_v(&self) -> bool {
        self.had_leading_v
    }

    /// Whether the version carries a pre-release component
    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }

    /// Increment by a release bump level.
    ///
    /// A pre-release whose release already sits at the requested level is
    /// promoted rather than incremented: `1.3.0-rc.1` bumped by minor gives
    /// `1.3.0`, `1.2.4-rc.1` bumped by minor gives `1.3.0`.
    /// `BumpLevel::None` leaves the version unchanged. Fails when the
    /// incremented component would overflow.
    pub fn increment(&self, level: BumpLevel) -> Result<Self> {
        let current = &self.version;
        let is_release = current.pre.is_empty();
        let mut next = current.clone();

        match level {
            BumpLevel::None => return Ok(self.clone()),
            BumpLevel::Major => {
                if current.minor != 0 || current.patch != 0 || is_release {
                    next.major = bump_component(current.major, "major")?;
                }
                next.minor = 0;
                next.patch = 0;
            }
            BumpLevel::Minor => {
                if current.patch != 0 || is_release {
                    next.minor = bump_component(current.minor, "minor")?;
                }
                next.patch = 0;
            }
            BumpLevel::Patch => {
                if is_release {
                    next.patch = bump_component(current.patch, "patch")?;
                }
            }
        }
        next.pre = semver::Prerelease::EMPTY;

        Ok(CleanVersion {
            version: next,
            had_leading_v: self.had_leading_v,
        })
    }

    /// Render the version as a tag name, with or without a leading `v`
    pub fn tag_name(&self, with_v: bool) -> String {
        if with_v {
            format!("v{}", self.version)
        } else {
            self.version.to_string()
        }
    }
}

/// Add one to a version component
pub(crate) fn bump_component(value: u64, component: &str) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        AutotagError::version(format!("Cannot increment {} version {}", component, value))
    })
}

impl PartialEq for CleanVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for CleanVersion {}

impl PartialOrd for CleanVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CleanVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl fmt::Display for CleanVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}
