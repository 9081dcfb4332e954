//! Build context - directory layout and environment-derived paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variables consulted for the Kokkos install prefix,
/// in order of precedence.
const KOKKOS_PREFIX_VARS: &[&str] = &["SLIPWAY_KOKKOS_PREFIX", "KOKKOS_PREFIX"];

/// Environment variable for the ROCm install location.
const ROCM_PATH_VAR: &str = "ROCM_PATH";

/// Default ROCm install location when the environment gives none.
const DEFAULT_ROCM_PREFIX: &str = "/opt/rocm";

/// Build context for one pipeline run.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Source checkout directory
    pub source_dir: PathBuf,

    /// Out-of-tree build directory
    pub build_dir: PathBuf,

    /// Install prefix for both the Python package and the native install
    pub install_prefix: PathBuf,

    /// Install prefix of the Kokkos runtime dependency
    pub kokkos_prefix: PathBuf,

    /// ROCm install prefix (only consulted when the rocm variant is on)
    pub rocm_prefix: PathBuf,

    /// Parallel build jobs (None = build tool default)
    pub jobs: Option<usize>,

    /// Stream full build output
    pub verbose: bool,

    /// Run the test suite after install
    pub run_tests: bool,
}

impl BuildContext {
    /// Create a context with every path given explicitly. No
    /// environment lookups.
    pub fn explicit(
        source_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
        install_prefix: impl Into<PathBuf>,
        kokkos_prefix: impl Into<PathBuf>,
    ) -> Self {
        BuildContext {
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
            install_prefix: install_prefix.into(),
            kokkos_prefix: kokkos_prefix.into(),
            rocm_prefix: PathBuf::from(DEFAULT_ROCM_PREFIX),
            jobs: None,
            verbose: false,
            run_tests: false,
        }
    }

    /// Override the ROCm prefix.
    pub fn with_rocm_prefix(mut self, dir: impl Into<PathBuf>) -> Self {
        self.rocm_prefix = dir.into();
        self
    }

    /// Set the parallel job count.
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Enable verbose build output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Request the post-install test run.
    pub fn with_run_tests(mut self, run_tests: bool) -> Self {
        self.run_tests = run_tests;
        self
    }

    /// Path of the HIP compiler under the ROCm prefix.
    pub fn hipcc(&self) -> PathBuf {
        self.rocm_prefix.join("bin").join("hipcc")
    }
}

/// Read the Kokkos install prefix from the environment.
pub fn kokkos_prefix_from_env() -> Option<PathBuf> {
    KOKKOS_PREFIX_VARS
        .iter()
        .find_map(|var| std::env::var_os(var))
        .map(PathBuf::from)
}

/// Read the ROCm prefix from the environment, defaulting to /opt/rocm.
pub fn rocm_prefix_from_env() -> PathBuf {
    std::env::var_os(ROCM_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROCM_PREFIX))
}

/// Resolve the Kokkos prefix: explicit override first, environment second.
pub fn resolve_kokkos_prefix(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    kokkos_prefix_from_env().context(
        "kokkos install prefix not set; \
         set SLIPWAY_KOKKOS_PREFIX (or KOKKOS_PREFIX), or pass --kokkos-prefix",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_layout() {
        let ctx = BuildContext::explicit("/src", "/src/build", "/opt/out", "/opt/kokkos");
        assert_eq!(ctx.build_dir, PathBuf::from("/src/build"));
        assert_eq!(ctx.kokkos_prefix, PathBuf::from("/opt/kokkos"));
        assert!(!ctx.run_tests);
    }

    #[test]
    fn test_hipcc_under_rocm_prefix() {
        let ctx = BuildContext::explicit("/src", "/b", "/p", "/k").with_rocm_prefix("/opt/rocm-5.4");
        assert_eq!(ctx.hipcc(), PathBuf::from("/opt/rocm-5.4/bin/hipcc"));
    }

    #[test]
    fn test_explicit_override_beats_env() {
        let prefix = resolve_kokkos_prefix(Some(Path::new("/explicit/kokkos"))).unwrap();
        assert_eq!(prefix, PathBuf::from("/explicit/kokkos"));
    }
}
