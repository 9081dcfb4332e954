//! Slipway - a recipe-driven build orchestrator.
//!
//! This crate provides the core library functionality for Slipway,
//! including the package descriptor model, build configuration
//! derivation, and pipeline execution.

pub mod builder;
pub mod core;
pub mod ops;
pub mod recipes;
pub mod util;

pub use crate::core::{
    dependency::{Dependency, DependencyKind, Predicate},
    descriptor::{PackageDescriptor, RecipeBuilder},
    error::RecipeError,
    variant::{Variant, VariantSet, VariantValue},
    version::{FetchMethod, VersionDecl},
};

pub use crate::builder::{BuildContext, BuildPlan, Phase};
