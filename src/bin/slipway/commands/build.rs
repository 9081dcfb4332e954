//! `slipway build` command

use anyhow::Result;

use slipway::ops;
use slipway::recipes::lightning_kokkos;

use crate::cli::BuildArgs;
use crate::commands::to_build_options;

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    let desc = lightning_kokkos()?;

    let mut opts = to_build_options(&args.selection, verbose)?;
    opts.run_tests = args.run_tests;
    opts.jobs = args.jobs;

    ops::build(&desc, &opts)
}
