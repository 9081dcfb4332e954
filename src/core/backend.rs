//! Hardware/parallelism backend table.
//!
//! Each entry drives the generation of exactly one variant and one
//! conditional `kokkos` dependency: selecting the variant activates a
//! Kokkos build with the matching backend enabled.

use crate::core::dependency::{DependencyKind, Predicate};
use crate::core::descriptor::RecipeBuilder;
use crate::core::error::RecipeError;
use crate::core::variant::Variant;

/// A backend table entry.
#[derive(Debug, Clone, Copy)]
pub struct BackendEntry {
    /// Backend identifier (also the variant name)
    pub name: &'static str,

    /// Whether the backend is enabled by default
    pub default: bool,

    /// Human-readable description
    pub description: &'static str,
}

/// The supported Kokkos execution backends.
pub const BACKENDS: &[BackendEntry] = &[
    BackendEntry {
        name: "cuda",
        default: false,
        description: "Whether to build CUDA backend",
    },
    BackendEntry {
        name: "openmp",
        default: false,
        description: "Whether to build OpenMP backend",
    },
    BackendEntry {
        name: "openmptarget",
        default: false,
        description: "Whether to build the OpenMPTarget backend",
    },
    BackendEntry {
        name: "pthread",
        default: false,
        description: "Whether to build Pthread backend",
    },
    BackendEntry {
        name: "rocm",
        default: false,
        description: "Whether to build HIP backend",
    },
    BackendEntry {
        name: "serial",
        default: true,
        description: "Whether to build serial backend",
    },
];

/// Register one variant and one conditional dependency per table entry.
pub fn register_backends(builder: &mut RecipeBuilder) -> Result<(), RecipeError> {
    for entry in BACKENDS {
        builder.variant(Variant::boolean(
            entry.name,
            entry.default,
            entry.description,
        ))?;
        builder.depends_on(
            format!("kokkos+{}", entry.name),
            Predicate::Enabled(entry.name.to_string()),
            &[DependencyKind::Run, DependencyKind::Build],
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::version::VersionDecl;

    #[test]
    fn test_one_variant_and_one_dependency_per_entry() {
        let mut builder = RecipeBuilder::new("demo");
        builder
            .version(VersionDecl::branch("main", "main"))
            .unwrap();
        register_backends(&mut builder).unwrap();
        let desc = builder.finish().unwrap();

        for entry in BACKENDS {
            let variant = desc.variant(entry.name).unwrap_or_else(|| {
                panic!("backend `{}` did not generate a variant", entry.name)
            });
            assert_eq!(variant.default, entry.default.into());

            let deps: Vec<_> = desc
                .dependencies()
                .iter()
                .filter(|d| d.spec == format!("kokkos+{}", entry.name))
                .collect();
            assert_eq!(deps.len(), 1, "backend `{}`", entry.name);
        }

        assert_eq!(
            desc.dependencies()
                .iter()
                .filter(|d| d.name == "kokkos")
                .count(),
            BACKENDS.len()
        );
    }

    #[test]
    fn test_backend_dependency_activates_iff_variant_selected() {
        let mut builder = RecipeBuilder::new("demo");
        builder
            .version(VersionDecl::branch("main", "main"))
            .unwrap();
        register_backends(&mut builder).unwrap();
        let desc = builder.finish().unwrap();

        for entry in BACKENDS {
            let on = desc
                .resolve(&[(entry.name.to_string(), true.into())])
                .unwrap();
            let off = desc
                .resolve(&[(entry.name.to_string(), false.into())])
                .unwrap();

            let spec = format!("kokkos+{}", entry.name);
            assert!(desc
                .active_dependencies(&on)
                .iter()
                .any(|d| d.spec == spec));
            assert!(!desc
                .active_dependencies(&off)
                .iter()
                .any(|d| d.spec == spec));
        }
    }

    #[test]
    fn test_only_serial_defaults_on() {
        let enabled: Vec<_> = BACKENDS.iter().filter(|b| b.default).collect();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].name, "serial");
    }
}
