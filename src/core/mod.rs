//! Package descriptor domain model.

pub mod backend;
pub mod dependency;
pub mod descriptor;
pub mod error;
pub mod variant;
pub mod version;
