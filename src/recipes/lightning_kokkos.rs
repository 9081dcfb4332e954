//! Recipe for the PennyLane Lightning-Kokkos simulator.
//!
//! A fast state-vector simulator with Kokkos kernels: a native CMake
//! library plus a Python extension module. The backend table generates
//! one variant and one conditional Kokkos dependency per execution
//! backend; the scalar variants feed CMake cache options directly.

use anyhow::{Context, Result};
use url::Url;

use crate::core::backend::register_backends;
use crate::core::dependency::{DependencyKind, Predicate};
use crate::core::descriptor::{PackageDescriptor, RecipeBuilder};
use crate::core::variant::Variant;
use crate::core::version::VersionDecl;

const GIT_URL: &str = "https://github.com/PennyLaneAI/pennylane-lightning-kokkos.git";
const RELEASE_URL: &str =
    "https://github.com/PennyLaneAI/pennylane-lightning-kokkos/archive/refs/tags/v0.28.0.tar.gz";
const RELEASE_SHA256: &str = "1d6f0ad9658e70cc6875e9df5710d1fa83a0ccbe21c5fc8daf4e76ab3ff59b73";

/// Build the pennylane-lightning-kokkos descriptor.
pub fn lightning_kokkos() -> Result<PackageDescriptor> {
    let mut recipe = RecipeBuilder::new("py-pennylane-lightning-kokkos");
    recipe
        .description(
            "The PennyLane-Lightning-Kokkos plugin provides a fast state-vector \
             simulator with Kokkos kernels.",
        )
        .homepage("https://docs.pennylane.ai/projects/lightning-kokkos")
        .git(GIT_URL)
        .maintainer("vincentmr");

    recipe
        .version(VersionDecl::branch("main", "main"))?
        .version(VersionDecl::commit(
            "develop",
            "fd6feb9b2c961d6f8d93f31b6015b37e9aeac759",
        ))?
        .version(VersionDecl::archive(
            "0.28.0",
            Url::parse(RELEASE_URL).context("invalid release URL")?,
            RELEASE_SHA256,
        ))?;

    register_backends(&mut recipe)?;

    recipe
        .variant(Variant::enumerated(
            "build_type",
            "Release",
            "CMake build type",
            ["Debug", "Release", "RelWithDebInfo", "MinSizeRel"],
        ))?
        .variant(Variant::boolean(
            "cppbenchmarks",
            false,
            "Build CPP benchmark examples",
        ))?
        .variant(Variant::boolean("cpptests", false, "Build CPP tests"))?
        .variant(Variant::boolean(
            "native",
            false,
            "Build natively for given hardware",
        ))?
        .variant(Variant::boolean(
            "sanitize",
            false,
            "Build with address sanitization",
        ))?
        .variant(Variant::boolean(
            "verbose",
            false,
            "Build with full verbosity",
        ))?;

    // hard dependencies
    recipe
        .depends_on(
            "cmake@3.21:3.24,3.25.2:",
            Predicate::Always,
            &[DependencyKind::Build],
        )
        .depends_on(
            "ninja",
            Predicate::Always,
            &[DependencyKind::Run, DependencyKind::Build],
        )
        .depends_on(
            "python@3.8:",
            Predicate::Always,
            &[DependencyKind::Build, DependencyKind::Run],
        )
        .depends_on("py-setuptools", Predicate::Always, &[DependencyKind::Build])
        .depends_on("py-pybind11", Predicate::Always, &[DependencyKind::Build])
        .depends_on(
            "py-pip",
            Predicate::Always,
            &[DependencyKind::Build, DependencyKind::Run],
        )
        .depends_on("py-wheel", Predicate::Always, &[DependencyKind::Build])
        .depends_on("py-pennylane", Predicate::Always, &[DependencyKind::Run])
        .depends_on(
            "py-pennylane-lightning~kokkos",
            Predicate::Always,
            &[DependencyKind::Run],
        );

    // test dependencies
    recipe
        .depends_on("py-pytest", Predicate::Always, &[DependencyKind::Test])
        .depends_on("py-pytest-mock", Predicate::Always, &[DependencyKind::Test])
        .depends_on("py-flaky", Predicate::Always, &[DependencyKind::Test]);

    // variant options that map straight onto CMake cache entries
    recipe
        .define_from_variant("CMAKE_BUILD_TYPE", "build_type")
        .define_from_variant("CMAKE_VERBOSE_MAKEFILE:BOOL", "verbose")
        .define_from_variant("PLKOKKOS_ENABLE_NATIVE", "native")
        .define_from_variant("PLKOKKOS_BUILD_TESTS", "cpptests")
        .define_from_variant("PLKOKKOS_ENABLE_SANITIZER", "sanitize");

    recipe
        .finish()
        .context("lightning-kokkos recipe failed validation")
}
