//! Recipe configuration error types.
//!
//! Every error in this taxonomy is detected before any external
//! process is spawned: either while a recipe is being declared,
//! at `RecipeBuilder::finish`, or while resolving a variant
//! selection against a finished descriptor.

use thiserror::Error;

/// Error in a recipe declaration or a variant selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeError {
    #[error("version `{0}` is declared more than once")]
    DuplicateVersion(String),

    #[error("variant `{0}` is already declared with different parameters")]
    ConflictingVariant(String),

    #[error("unknown variant `{variant}` referenced by {referrer}")]
    UnknownVariant { variant: String, referrer: String },

    #[error("invalid value `{value}` for variant `{variant}` (allowed: {allowed})")]
    InvalidValue {
        variant: String,
        value: String,
        allowed: String,
    },

    #[error("variant `{variant}` is boolean, got `{value}`")]
    ExpectedBool { variant: String, value: String },

    #[error("unknown variant `{0}` in selection")]
    UnknownSelection(String),

    #[error("unknown version `{label}` (available: {available})")]
    UnknownVersion { label: String, available: String },

    #[error("recipe `{0}` declares no versions")]
    NoVersions(String),
}
