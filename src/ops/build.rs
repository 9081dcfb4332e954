//! Implementation of `slipway plan` and `slipway build`.
//!
//! Both commands share the resolution path: merge config-file and
//! command-line inputs, resolve the variant selection against the
//! descriptor, assemble the build context, and generate the plan. The
//! build operation then hands the plan to the executor.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::builder::context::{resolve_kokkos_prefix, rocm_prefix_from_env, BuildContext};
use crate::builder::executor::Executor;
use crate::builder::plan::BuildPlan;
use crate::core::descriptor::PackageDescriptor;
use crate::core::variant::{VariantSet, VariantValue};
use crate::core::version::VersionDecl;
use crate::util::config::Config;

/// Options for plan generation and building.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Version label (None = preferred version)
    pub version: Option<String>,

    /// Variant selections from the command line
    pub selections: Vec<(String, VariantValue)>,

    /// Source checkout directory
    pub source_dir: Option<PathBuf>,

    /// Out-of-tree build directory
    pub build_dir: Option<PathBuf>,

    /// Install prefix
    pub prefix: Option<PathBuf>,

    /// Kokkos install prefix override
    pub kokkos_prefix: Option<PathBuf>,

    /// ROCm prefix override
    pub rocm_prefix: Option<PathBuf>,

    /// Parallel build jobs
    pub jobs: Option<usize>,

    /// Verbose output
    pub verbose: bool,

    /// Run the test suite after install
    pub run_tests: bool,

    /// Optional slipway.toml to merge under the CLI values
    pub config: Option<Config>,
}

/// The outcome of resolution: everything needed to print or execute.
#[derive(Debug)]
pub struct ResolvedBuild {
    pub version: VersionDecl,
    pub variants: VariantSet,
    pub context: BuildContext,
    pub plan: BuildPlan,
}

/// Resolve options into a concrete build plan without executing it.
pub fn plan(descriptor: &PackageDescriptor, opts: &BuildOptions) -> Result<ResolvedBuild> {
    let config = opts.config.clone().unwrap_or_default();

    let version = match opts.version.as_deref().or(config.version.as_deref()) {
        Some(label) => descriptor.version(label)?.clone(),
        None => descriptor.preferred_version().clone(),
    };

    // Config-file selections first, CLI selections on top.
    let mut selections = config.selections();
    selections.extend(opts.selections.iter().cloned());
    let variants = descriptor.resolve(&selections)?;

    let source_dir = opts
        .source_dir
        .clone()
        .or(config.paths.source_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let build_dir = opts
        .build_dir
        .clone()
        .or(config.paths.build_dir)
        .unwrap_or_else(|| source_dir.join("build"));
    let prefix = opts
        .prefix
        .clone()
        .or(config.paths.prefix)
        .context("install prefix not set; pass --prefix or set [paths].prefix")?;

    let kokkos_prefix = resolve_kokkos_prefix(
        opts.kokkos_prefix
            .as_deref()
            .or(config.paths.kokkos_prefix.as_deref()),
    )?;
    let rocm_prefix = opts
        .rocm_prefix
        .clone()
        .or(config.paths.rocm_prefix)
        .unwrap_or_else(rocm_prefix_from_env);

    let context = BuildContext::explicit(source_dir, build_dir, prefix, kokkos_prefix)
        .with_rocm_prefix(rocm_prefix)
        .with_jobs(opts.jobs.or(config.build.jobs))
        .with_verbose(opts.verbose)
        .with_run_tests(opts.run_tests || config.build.run_tests);

    let plan = BuildPlan::generate(descriptor, &variants, &context);

    Ok(ResolvedBuild {
        version,
        variants,
        context,
        plan,
    })
}

/// Resolve and execute the full pipeline.
pub fn build(descriptor: &PackageDescriptor, opts: &BuildOptions) -> Result<()> {
    let resolved = plan(descriptor, opts)?;

    tracing::info!(
        "building {} {} into {}",
        descriptor.name(),
        resolved.version.label,
        resolved.context.install_prefix.display()
    );

    Executor::new().verbose(opts.verbose).execute(&resolved.plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::plan::Phase;
    use crate::recipes::lightning_kokkos;

    fn opts() -> BuildOptions {
        BuildOptions {
            source_dir: Some(PathBuf::from("/src")),
            prefix: Some(PathBuf::from("/opt/out")),
            kokkos_prefix: Some(PathBuf::from("/opt/kokkos")),
            ..Default::default()
        }
    }

    #[test]
    fn test_plan_defaults_to_preferred_version() {
        let desc = lightning_kokkos().unwrap();
        let resolved = plan(&desc, &opts()).unwrap();
        assert_eq!(resolved.version.label, "0.28.0");
        assert!(resolved.plan.phase_commands(Phase::Test).is_empty());
    }

    #[test]
    fn test_plan_unknown_version_fails() {
        let desc = lightning_kokkos().unwrap();
        let mut o = opts();
        o.version = Some("0.1.0".to_string());
        assert!(plan(&desc, &o).is_err());
    }

    #[test]
    fn test_cli_selection_overrides_config() {
        let desc = lightning_kokkos().unwrap();

        let config: Config = toml::from_str(
            r#"
[variants]
native = true
"#,
        )
        .unwrap();

        let mut o = opts();
        o.config = Some(config);
        o.selections = vec![("native".to_string(), false.into())];

        let resolved = plan(&desc, &o).unwrap();
        assert!(!resolved.variants.is_enabled("native"));
    }

    #[test]
    fn test_missing_prefix_is_a_config_error() {
        let desc = lightning_kokkos().unwrap();
        let mut o = opts();
        o.prefix = None;
        let err = plan(&desc, &o).unwrap_err();
        assert!(err.to_string().contains("install prefix not set"));
    }

    #[test]
    fn test_run_tests_from_config_file() {
        let desc = lightning_kokkos().unwrap();

        let config: Config = toml::from_str(
            r#"
[build]
run_tests = true
"#,
        )
        .unwrap();

        let mut o = opts();
        o.config = Some(config);

        let resolved = plan(&desc, &o).unwrap();
        assert_eq!(resolved.plan.phase_commands(Phase::Test).len(), 1);
    }
}
