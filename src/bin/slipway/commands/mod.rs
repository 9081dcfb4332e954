//! Command implementations

pub mod build;
pub mod info;
pub mod plan;
pub mod verify;

use anyhow::Result;
use slipway::core::variant::{parse_selection, VariantValue};
use slipway::ops::BuildOptions;
use slipway::util::Config;

use crate::cli::SelectionArgs;

/// Parse repeated `-V name[=value]` flags into typed selections.
pub fn parse_selections(raw: &[String]) -> Vec<(String, VariantValue)> {
    raw.iter().map(|s| parse_selection(s)).collect()
}

/// Turn shared CLI selection args into build options.
pub fn to_build_options(args: &SelectionArgs, verbose: bool) -> Result<BuildOptions> {
    let config = args.config.as_deref().map(Config::load).transpose()?;

    Ok(BuildOptions {
        version: args.package_version.clone(),
        selections: parse_selections(&args.variants),
        source_dir: args.source_dir.clone(),
        build_dir: args.build_dir.clone(),
        prefix: args.prefix.clone(),
        kokkos_prefix: args.kokkos_prefix.clone(),
        rocm_prefix: args.rocm_prefix.clone(),
        jobs: None,
        verbose,
        run_tests: false,
        config,
    })
}
