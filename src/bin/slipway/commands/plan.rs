//! `slipway plan` command

use anyhow::Result;

use slipway::ops;
use slipway::recipes::lightning_kokkos;

use crate::cli::PlanArgs;
use crate::commands::to_build_options;

pub fn execute(args: PlanArgs, verbose: bool) -> Result<()> {
    let desc = lightning_kokkos()?;

    let mut opts = to_build_options(&args.selection, verbose)?;
    opts.run_tests = args.run_tests;

    let resolved = ops::plan(&desc, &opts)?;

    if args.json {
        println!("{}", resolved.plan.to_json()?);
        return Ok(());
    }

    println!(
        "{} {} -> {}",
        desc.name(),
        resolved.version.label,
        resolved.context.install_prefix.display()
    );

    println!("\nVariants:");
    for (name, value) in resolved.variants.iter() {
        println!("  {} = {}", name, value);
    }

    println!("\nConfigure flags:");
    for flag in &resolved.plan.configure_flags {
        println!("  {}", flag);
    }

    println!("\nActive dependencies:");
    for dep in desc.active_dependencies(&resolved.variants) {
        println!("  {}", dep);
    }

    println!("\nPipeline:");
    for command in &resolved.plan.commands {
        println!("  [{}] {}", command.phase.label(), command.display());
    }

    Ok(())
}
