//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Slipway - a recipe-driven build orchestrator for native simulator
/// libraries with Python bindings
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the built-in recipe: versions, variants, dependencies
    Info(InfoArgs),

    /// Resolve variants and show the build plan without running it
    Plan(PlanArgs),

    /// Run the build pipeline: configure, build, extension, install
    Build(BuildArgs),

    /// Verify a downloaded source archive against its declared checksum
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct InfoArgs {
    /// Only show dependencies active for the given selection
    #[arg(short = 'V', long = "variant", value_name = "NAME[=VALUE]")]
    pub variants: Vec<String>,
}

/// Inputs shared by `plan` and `build`.
#[derive(Args)]
pub struct SelectionArgs {
    /// Version label to build (defaults to the preferred release)
    #[arg(long, value_name = "LABEL")]
    pub package_version: Option<String>,

    /// Variant selection, repeatable (e.g. -V rocm -V build_type=Debug)
    #[arg(short = 'V', long = "variant", value_name = "NAME[=VALUE]")]
    pub variants: Vec<String>,

    /// Source checkout directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Build directory (defaults to <source-dir>/build)
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Install prefix
    #[arg(long, value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// Kokkos install prefix (overrides SLIPWAY_KOKKOS_PREFIX)
    #[arg(long, value_name = "DIR")]
    pub kokkos_prefix: Option<PathBuf>,

    /// ROCm install prefix (overrides ROCM_PATH)
    #[arg(long, value_name = "DIR")]
    pub rocm_prefix: Option<PathBuf>,

    /// Path to a slipway.toml with defaults for the above
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Include the post-install test run in the plan
    #[arg(long)]
    pub run_tests: bool,

    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Run the test suite after install
    #[arg(long)]
    pub run_tests: bool,

    /// Number of parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Path to the downloaded archive
    pub archive: PathBuf,

    /// Version label the archive should match
    #[arg(long, value_name = "LABEL")]
    pub package_version: String,
}
