//! Build variants - user-selectable build options.
//!
//! A variant is either a boolean toggle or an enumerated choice over a
//! fixed value set. Declared defaults live on the [`Variant`]; the
//! resolved per-build state lives in a [`VariantSet`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The value a variant holds: a boolean toggle or an enumerated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantValue {
    Bool(bool),
    Str(String),
}

impl VariantValue {
    /// Whether this value counts as "enabled" for predicate evaluation.
    pub fn is_enabled(&self) -> bool {
        matches!(self, VariantValue::Bool(true))
    }

    /// Render the value the way CMake expects it: booleans as ON/OFF,
    /// enumerated values verbatim.
    pub fn as_cmake_value(&self) -> String {
        match self {
            VariantValue::Bool(true) => "ON".to_string(),
            VariantValue::Bool(false) => "OFF".to_string(),
            VariantValue::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for VariantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantValue::Bool(b) => write!(f, "{}", b),
            VariantValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for VariantValue {
    fn from(b: bool) -> Self {
        VariantValue::Bool(b)
    }
}

impl From<&str> for VariantValue {
    fn from(s: &str) -> Self {
        VariantValue::Str(s.to_string())
    }
}

/// A declared build variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant name, unique within a descriptor
    pub name: String,

    /// Default value when no override is given
    pub default: VariantValue,

    /// Human-readable description
    pub description: String,

    /// Allowed values for enumerated variants (None for booleans)
    pub values: Option<Vec<String>>,
}

impl Variant {
    /// Create a boolean variant.
    pub fn boolean(name: impl Into<String>, default: bool, description: impl Into<String>) -> Self {
        Variant {
            name: name.into(),
            default: VariantValue::Bool(default),
            description: description.into(),
            values: None,
        }
    }

    /// Create an enumerated variant with a fixed value set.
    pub fn enumerated(
        name: impl Into<String>,
        default: impl Into<String>,
        description: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Variant {
            name: name.into(),
            default: VariantValue::Str(default.into()),
            description: description.into(),
            values: Some(values.into_iter().map(|v| v.into()).collect()),
        }
    }

    /// Check if this is a boolean variant.
    pub fn is_boolean(&self) -> bool {
        self.values.is_none()
    }
}

/// Resolved variant state for one build invocation.
///
/// Produced by [`PackageDescriptor::resolve`] from defaults plus
/// overrides; read-only afterwards.
///
/// [`PackageDescriptor::resolve`]: crate::core::descriptor::PackageDescriptor::resolve
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantSet {
    values: BTreeMap<String, VariantValue>,
}

impl VariantSet {
    /// Create from already-validated (name, value) pairs.
    pub(crate) fn from_values(values: BTreeMap<String, VariantValue>) -> Self {
        VariantSet { values }
    }

    /// Get the value of a variant, if present.
    pub fn value(&self, name: &str) -> Option<&VariantValue> {
        self.values.get(name)
    }

    /// Check whether a boolean variant is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| v.is_enabled())
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &VariantValue)> {
        self.values.iter()
    }

    /// Number of resolved variants.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse a `name`, `name=value` selection as given on the command line.
///
/// A bare `name` enables a boolean variant. Values `true`/`false`
/// (case-insensitive, also `on`/`off`) parse as booleans; anything else
/// is kept as an enumerated string and validated at resolution time.
pub fn parse_selection(s: &str) -> (String, VariantValue) {
    match s.split_once('=') {
        None => (s.trim().to_string(), VariantValue::Bool(true)),
        Some((name, value)) => {
            let value = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "on" => VariantValue::Bool(true),
                "false" | "off" => VariantValue::Bool(false),
                _ => VariantValue::Str(value.trim().to_string()),
            };
            (name.trim().to_string(), value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name_enables() {
        let (name, value) = parse_selection("rocm");
        assert_eq!(name, "rocm");
        assert_eq!(value, VariantValue::Bool(true));
    }

    #[test]
    fn test_parse_boolean_values() {
        assert_eq!(parse_selection("native=true").1, VariantValue::Bool(true));
        assert_eq!(parse_selection("native=off").1, VariantValue::Bool(false));
        assert_eq!(parse_selection("native=FALSE").1, VariantValue::Bool(false));
    }

    #[test]
    fn test_parse_enumerated_value() {
        let (name, value) = parse_selection("build_type=Release");
        assert_eq!(name, "build_type");
        assert_eq!(value, VariantValue::Str("Release".to_string()));
    }

    #[test]
    fn test_cmake_value_rendering() {
        assert_eq!(VariantValue::Bool(true).as_cmake_value(), "ON");
        assert_eq!(VariantValue::Bool(false).as_cmake_value(), "OFF");
        assert_eq!(
            VariantValue::Str("RelWithDebInfo".to_string()).as_cmake_value(),
            "RelWithDebInfo"
        );
    }

    #[test]
    fn test_variant_set_lookup() {
        let mut values = BTreeMap::new();
        values.insert("serial".to_string(), VariantValue::Bool(true));
        values.insert("openmp".to_string(), VariantValue::Bool(false));
        let set = VariantSet::from_values(values);

        assert!(set.is_enabled("serial"));
        assert!(!set.is_enabled("openmp"));
        assert!(!set.is_enabled("missing"));
    }
}
