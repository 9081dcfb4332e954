//! Implementation of `slipway verify`.
//!
//! Checks a locally downloaded source archive against the checksum
//! declared for an archive-fetched version. Branch and commit versions
//! carry nothing to checksum and are rejected.

use std::path::Path;

use anyhow::{bail, Result};

use crate::core::descriptor::PackageDescriptor;
use crate::util::hash::sha256_file;

/// Verify an archive file against a declared version checksum.
pub fn verify_archive(
    descriptor: &PackageDescriptor,
    label: &str,
    archive: &Path,
) -> Result<()> {
    let version = descriptor.version(label)?;

    let expected = match version.fetch.sha256() {
        Some(sha) => sha,
        None => bail!(
            "version `{}` is fetched from git ({}), not an archive; nothing to verify",
            label,
            version
        ),
    };

    let actual = sha256_file(archive)?;

    if actual != expected {
        bail!(
            "checksum mismatch for {}:\n  expected: {}\n  actual:   {}",
            archive.display(),
            expected,
            actual
        );
    }

    tracing::debug!("checksum ok for {}", archive.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::RecipeBuilder;
    use crate::core::version::VersionDecl;
    use crate::util::hash::sha256_bytes;
    use tempfile::TempDir;

    fn descriptor_with_archive(sha256: &str) -> PackageDescriptor {
        let mut builder = RecipeBuilder::new("demo");
        builder
            .version(VersionDecl::archive(
                "1.0.0",
                url::Url::parse("https://example.com/v1.0.0.tar.gz").unwrap(),
                sha256,
            ))
            .unwrap()
            .version(VersionDecl::branch("main", "main"))
            .unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_matching_checksum_passes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("v1.0.0.tar.gz");
        std::fs::write(&path, b"archive bytes").unwrap();

        let desc = descriptor_with_archive(&sha256_bytes(b"archive bytes"));
        verify_archive(&desc, "1.0.0", &path).unwrap();
    }

    #[test]
    fn test_mismatched_checksum_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("v1.0.0.tar.gz");
        std::fs::write(&path, b"tampered bytes").unwrap();

        let desc = descriptor_with_archive(&sha256_bytes(b"archive bytes"));
        let err = verify_archive(&desc, "1.0.0", &path).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn test_branch_version_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("anything");
        std::fs::write(&path, b"x").unwrap();

        let desc = descriptor_with_archive(&sha256_bytes(b"x"));
        let err = verify_archive(&desc, "main", &path).unwrap_err();
        assert!(err.to_string().contains("nothing to verify"));
    }
}
