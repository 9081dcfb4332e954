//! Build configuration and pipeline.

pub mod context;
pub mod executor;
pub mod flags;
pub mod plan;

pub use context::BuildContext;
pub use executor::Executor;
pub use plan::{BuildPlan, Phase, PlannedCommand};
