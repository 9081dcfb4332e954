//! `slipway info` command

use anyhow::Result;

use slipway::recipes::lightning_kokkos;

use crate::cli::InfoArgs;
use crate::commands::parse_selections;

pub fn execute(args: InfoArgs) -> Result<()> {
    let desc = lightning_kokkos()?;
    let meta = desc.metadata();

    println!("{}", desc.name());
    if let Some(ref description) = meta.description {
        println!("  {}", description);
    }
    if let Some(ref homepage) = meta.homepage {
        println!("  homepage: {}", homepage);
    }
    if !meta.maintainers.is_empty() {
        println!("  maintainers: {}", meta.maintainers.join(", "));
    }

    println!("\nVersions:");
    for version in desc.versions() {
        let marker = if version.label == desc.preferred_version().label {
            "*"
        } else {
            " "
        };
        println!("  {} {}", marker, version);
    }

    println!("\nVariants:");
    for variant in desc.variants() {
        let values = match &variant.values {
            Some(allowed) => format!(" [{}]", allowed.join(", ")),
            None => String::new(),
        };
        println!(
            "  {:<14} default={:<14}{} - {}",
            variant.name,
            variant.default.to_string(),
            values,
            variant.description
        );
    }

    if args.variants.is_empty() {
        println!("\nDependencies:");
        for dep in desc.dependencies() {
            println!("  {}", dep);
        }
    } else {
        let variants = desc.resolve(&parse_selections(&args.variants))?;
        println!("\nActive dependencies:");
        for dep in desc.active_dependencies(&variants) {
            println!("  {}", dep);
        }
    }

    Ok(())
}
