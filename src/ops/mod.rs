//! Operation implementations behind the CLI commands.

pub mod build;
pub mod verify;

pub use build::{build, plan, BuildOptions, ResolvedBuild};
pub use verify::verify_archive;
