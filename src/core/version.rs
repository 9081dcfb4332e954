//! Version declarations - WHERE a package version comes from.
//!
//! A version maps a label to a fetch method: a tagged release archive
//! with a checksum, a moving branch, or a pinned commit.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// How the source for a version is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum FetchMethod {
    /// Tagged release archive with a sha256 checksum
    Archive { url: Url, sha256: String },

    /// Tip of a git branch
    Branch { branch: String },

    /// Pinned git commit
    Commit { commit: String },
}

impl FetchMethod {
    /// Get the declared checksum, if this version is checksummable.
    pub fn sha256(&self) -> Option<&str> {
        match self {
            FetchMethod::Archive { sha256, .. } => Some(sha256),
            _ => None,
        }
    }
}

/// A declared package version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDecl {
    /// Version label (e.g. "0.28.0", "main", "develop")
    pub label: String,

    /// Source fetch method
    pub fetch: FetchMethod,
}

impl VersionDecl {
    /// Create a version fetched from a release archive.
    pub fn archive(label: impl Into<String>, url: Url, sha256: impl Into<String>) -> Self {
        VersionDecl {
            label: label.into(),
            fetch: FetchMethod::Archive {
                url,
                sha256: sha256.into(),
            },
        }
    }

    /// Create a version tracking a git branch.
    pub fn branch(label: impl Into<String>, branch: impl Into<String>) -> Self {
        VersionDecl {
            label: label.into(),
            fetch: FetchMethod::Branch {
                branch: branch.into(),
            },
        }
    }

    /// Create a version pinned to a git commit.
    pub fn commit(label: impl Into<String>, commit: impl Into<String>) -> Self {
        VersionDecl {
            label: label.into(),
            fetch: FetchMethod::Commit {
                commit: commit.into(),
            },
        }
    }

    /// Parse the label as a release version, if it is one.
    pub fn as_semver(&self) -> Option<semver::Version> {
        self.label.parse().ok()
    }
}

impl fmt::Display for VersionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fetch {
            FetchMethod::Archive { url, .. } => write!(f, "{} (archive {})", self.label, url),
            FetchMethod::Branch { branch } => write!(f, "{} (branch {})", self.label, branch),
            FetchMethod::Commit { commit } => {
                write!(f, "{} (commit {})", self.label, &commit[..commit.len().min(12)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_version_has_checksum() {
        let url = Url::parse("https://example.com/pkg/v1.2.3.tar.gz").unwrap();
        let v = VersionDecl::archive("1.2.3", url, "abc123");
        assert_eq!(v.fetch.sha256(), Some("abc123"));
        assert_eq!(v.as_semver(), Some(semver::Version::new(1, 2, 3)));
    }

    #[test]
    fn test_branch_version_is_not_checksummable() {
        let v = VersionDecl::branch("main", "main");
        assert_eq!(v.fetch.sha256(), None);
        assert_eq!(v.as_semver(), None);
    }

    #[test]
    fn test_commit_display_truncates() {
        let v = VersionDecl::commit("develop", "fd6feb9b2c961d6f8d93f31b6015b37e9aeac759");
        assert_eq!(v.to_string(), "develop (commit fd6feb9b2c96)");
    }
}
