//! `slipway verify` command

use anyhow::Result;

use slipway::ops::verify_archive;
use slipway::recipes::lightning_kokkos;

use crate::cli::VerifyArgs;

pub fn execute(args: VerifyArgs) -> Result<()> {
    let desc = lightning_kokkos()?;

    verify_archive(&desc, &args.package_version, &args.archive)?;

    println!(
        "ok: {} matches version {}",
        args.archive.display(),
        args.package_version
    );
    Ok(())
}
