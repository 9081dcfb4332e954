//! Dependency specification.
//!
//! A Dependency names what a package requires, when the requirement is
//! active, and at which stage of the package lifecycle it is needed.
//! Activation conditions are typed predicates over variant state, not
//! parsed condition strings.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::variant::{VariantSet, VariantValue};

/// When in the package lifecycle a dependency is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Needed to build the package
    Build,
    /// Needed at run time
    Run,
    /// Needed only to run the test suite
    Test,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Build => write!(f, "build"),
            DependencyKind::Run => write!(f, "run"),
            DependencyKind::Test => write!(f, "test"),
        }
    }
}

/// Activation condition over variant state.
///
/// Evaluated once per build invocation against the resolved
/// [`VariantSet`]; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Predicate {
    /// Unconditionally active
    Always,

    /// Active when a boolean variant is enabled
    Enabled(String),

    /// Active when a variant holds a specific value
    Equals(String, VariantValue),

    /// Active when all sub-predicates hold
    All(Vec<Predicate>),
}

impl Predicate {
    /// Evaluate against resolved variant state.
    pub fn eval(&self, variants: &VariantSet) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Enabled(name) => variants.is_enabled(name),
            Predicate::Equals(name, value) => variants.value(name) == Some(value),
            Predicate::All(preds) => preds.iter().all(|p| p.eval(variants)),
        }
    }

    /// Collect every variant name this predicate references.
    pub fn referenced_variants(&self) -> Vec<&str> {
        match self {
            Predicate::Always => Vec::new(),
            Predicate::Enabled(name) | Predicate::Equals(name, _) => vec![name.as_str()],
            Predicate::All(preds) => preds
                .iter()
                .flat_map(|p| p.referenced_variants())
                .collect(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => write!(f, "always"),
            Predicate::Enabled(name) => write!(f, "+{}", name),
            Predicate::Equals(name, value) => write!(f, "{}={}", name, value),
            Predicate::All(preds) => {
                let parts: Vec<String> = preds.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", parts.join(" "))
            }
        }
    }
}

/// A dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Dependency package name
    pub name: String,

    /// Full spec as handed to the external resolver (e.g. "kokkos+cuda")
    pub spec: String,

    /// Activation condition
    pub when: Predicate,

    /// Lifecycle stages this dependency is needed for
    pub kinds: BTreeSet<DependencyKind>,
}

impl Dependency {
    /// Create a dependency from a spec string.
    ///
    /// The package name is the spec up to the first qualifier
    /// (`+`, `~`, or `@`).
    pub fn new(spec: impl Into<String>, when: Predicate, kinds: &[DependencyKind]) -> Self {
        let spec = spec.into();
        let name = spec
            .split(['+', '~', '@'])
            .next()
            .unwrap_or(&spec)
            .to_string();

        Dependency {
            name,
            spec,
            when,
            kinds: kinds.iter().copied().collect(),
        }
    }

    /// Check whether this dependency is active for the given variant state.
    pub fn is_active(&self, variants: &VariantSet) -> bool {
        self.when.eval(variants)
    }

    /// Check whether this dependency covers a lifecycle stage.
    pub fn is_kind(&self, kind: DependencyKind) -> bool {
        self.kinds.contains(&kind)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<String> = self.kinds.iter().map(|k| k.to_string()).collect();
        write!(f, "{} [{}]", self.spec, kinds.join(", "))?;
        if self.when != Predicate::Always {
            write!(f, " when {}", self.when)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn variants(pairs: &[(&str, VariantValue)]) -> VariantSet {
        let values: BTreeMap<String, VariantValue> = pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.clone()))
            .collect();
        VariantSet::from_values(values)
    }

    #[test]
    fn test_name_extracted_from_spec() {
        let dep = Dependency::new(
            "kokkos+cuda",
            Predicate::Enabled("cuda".to_string()),
            &[DependencyKind::Build, DependencyKind::Run],
        );
        assert_eq!(dep.name, "kokkos");
        assert_eq!(dep.spec, "kokkos+cuda");
    }

    #[test]
    fn test_name_from_tilde_spec() {
        let dep = Dependency::new(
            "py-pennylane-lightning~kokkos",
            Predicate::Always,
            &[DependencyKind::Run],
        );
        assert_eq!(dep.name, "py-pennylane-lightning");
    }

    #[test]
    fn test_enabled_predicate_activation() {
        let dep = Dependency::new(
            "kokkos+rocm",
            Predicate::Enabled("rocm".to_string()),
            &[DependencyKind::Build, DependencyKind::Run],
        );

        let on = variants(&[("rocm", VariantValue::Bool(true))]);
        let off = variants(&[("rocm", VariantValue::Bool(false))]);

        assert!(dep.is_active(&on));
        assert!(!dep.is_active(&off));
    }

    #[test]
    fn test_equals_predicate() {
        let pred = Predicate::Equals(
            "build_type".to_string(),
            VariantValue::Str("Debug".to_string()),
        );

        let debug = variants(&[("build_type", VariantValue::Str("Debug".to_string()))]);
        let release = variants(&[("build_type", VariantValue::Str("Release".to_string()))]);

        assert!(pred.eval(&debug));
        assert!(!pred.eval(&release));
    }

    #[test]
    fn test_all_predicate_requires_every_condition() {
        let pred = Predicate::All(vec![
            Predicate::Enabled("openmp".to_string()),
            Predicate::Enabled("native".to_string()),
        ]);

        let both = variants(&[
            ("openmp", VariantValue::Bool(true)),
            ("native", VariantValue::Bool(true)),
        ]);
        let one = variants(&[
            ("openmp", VariantValue::Bool(true)),
            ("native", VariantValue::Bool(false)),
        ]);

        assert!(pred.eval(&both));
        assert!(!pred.eval(&one));
        assert_eq!(pred.referenced_variants(), vec!["openmp", "native"]);
    }

    #[test]
    fn test_always_active() {
        let dep = Dependency::new("cmake", Predicate::Always, &[DependencyKind::Build]);
        assert!(dep.is_active(&VariantSet::default()));
        assert!(dep.is_kind(DependencyKind::Build));
        assert!(!dep.is_kind(DependencyKind::Run));
    }
}
