//! Configuration file support.
//!
//! A project may carry a `slipway.toml` pinning a version, variant
//! selections, and directory layout. Command-line flags take
//! precedence over file values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::variant::VariantValue;

/// Slipway project configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version label to build
    pub version: Option<String>,

    /// Variant selections (bool or string values)
    pub variants: BTreeMap<String, RawVariantValue>,

    /// Directory layout
    pub paths: PathsConfig,

    /// Build settings
    pub build: BuildSettings,
}

/// Variant value as written in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawVariantValue {
    Bool(bool),
    Str(String),
}

impl From<RawVariantValue> for VariantValue {
    fn from(raw: RawVariantValue) -> Self {
        match raw {
            RawVariantValue::Bool(b) => VariantValue::Bool(b),
            RawVariantValue::Str(s) => VariantValue::Str(s),
        }
    }
}

/// Directory layout from the `[paths]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Source checkout directory
    pub source_dir: Option<PathBuf>,

    /// Out-of-tree build directory
    pub build_dir: Option<PathBuf>,

    /// Install prefix
    pub prefix: Option<PathBuf>,

    /// Kokkos install prefix
    pub kokkos_prefix: Option<PathBuf>,

    /// ROCm install prefix
    pub rocm_prefix: Option<PathBuf>,
}

/// Build settings from the `[build]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Number of parallel build jobs
    pub jobs: Option<usize>,

    /// Run the test suite after install
    pub run_tests: bool,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Variant selections as typed (name, value) pairs.
    pub fn selections(&self) -> Vec<(String, VariantValue)> {
        self.variants
            .iter()
            .map(|(name, value)| (name.clone(), value.clone().into()))
            .collect()
    }
}
