use crate::domain::CleanVersion;

/// A git tag and the commit it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit_sha: String,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit_sha: commit_sha.into(),
        }
    }
}

/// A tag whose name cleaned into a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedTag {
    pub tag: Tag,
    pub version: CleanVersion,
}

/// Version-ordered view over the tags of a repository snapshot.
///
/// Tags whose names are not semantic versions are dropped on construction and
/// never take part in "latest" queries.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    entries: Vec<VersionedTag>,
    skipped: Vec<String>,
}

impl TagIndex {
    /// Build an index from raw tag records
    pub fn new(tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        for tag in tags {
            match CleanVersion::clean(&tag.name) {
                Some(version) => entries.push(VersionedTag { tag, version }),
                None => skipped.push(tag.name),
            }
        }

        TagIndex { entries, skipped }
    }

    /// Latest tag by semantic-version precedence.
    ///
    /// With `include_prerelease` false, tags carrying a pre-release component
    /// are ignored. When two tags clean to the same version the later one in
    /// input order is returned.
    pub fn latest(&self, include_prerelease: bool) -> Option<&VersionedTag> {
        self.entries
            .iter()
            .filter(|entry| include_prerelease || !entry.version.is_prerelease())
            .max_by(|a, b| a.version.cmp(&b.version))
    }

    /// Latest stable (non-prerelease) tag
    pub fn latest_stable(&self) -> Option<&VersionedTag> {
        self.latest(false)
    }

    /// Names of tags that are not semantic versions
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
