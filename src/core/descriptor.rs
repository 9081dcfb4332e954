//! Package descriptor and its registration builder.
//!
//! Declarations accumulate into a mutable [`RecipeBuilder`]; an
//! explicit [`RecipeBuilder::finish`] validates every cross-reference
//! and produces an immutable [`PackageDescriptor`]. All configuration
//! errors surface here, before any build step runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::dependency::{Dependency, DependencyKind, Predicate};
use crate::core::error::RecipeError;
use crate::core::variant::{Variant, VariantSet, VariantValue};
use crate::core::version::VersionDecl;

/// Package metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name
    pub name: String,

    /// One-line description
    #[serde(default)]
    pub description: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Git repository URL
    #[serde(default)]
    pub git: Option<String>,

    /// Maintainer handles
    #[serde(default)]
    pub maintainers: Vec<String>,
}

/// A registered variant-to-CMake-option mapping.
///
/// Drives one `-D<option>=<value>` configure flag per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmakeDefine {
    /// CMake cache option, possibly with a type suffix
    /// (e.g. "CMAKE_VERBOSE_MAKEFILE:BOOL")
    pub option: String,

    /// Name of the variant supplying the value
    pub variant: String,
}

/// Mutable registration state for a package recipe.
#[derive(Debug)]
pub struct RecipeBuilder {
    metadata: PackageMetadata,
    versions: Vec<VersionDecl>,
    variants: Vec<Variant>,
    dependencies: Vec<Dependency>,
    defines: Vec<CmakeDefine>,
}

impl RecipeBuilder {
    /// Start a recipe for the named package.
    pub fn new(name: impl Into<String>) -> Self {
        RecipeBuilder {
            metadata: PackageMetadata {
                name: name.into(),
                ..Default::default()
            },
            versions: Vec::new(),
            variants: Vec::new(),
            dependencies: Vec::new(),
            defines: Vec::new(),
        }
    }

    /// Set the package description.
    pub fn description(&mut self, text: impl Into<String>) -> &mut Self {
        self.metadata.description = Some(text.into());
        self
    }

    /// Set the homepage URL.
    pub fn homepage(&mut self, url: impl Into<String>) -> &mut Self {
        self.metadata.homepage = Some(url.into());
        self
    }

    /// Set the git repository URL.
    pub fn git(&mut self, url: impl Into<String>) -> &mut Self {
        self.metadata.git = Some(url.into());
        self
    }

    /// Add a maintainer handle.
    pub fn maintainer(&mut self, handle: impl Into<String>) -> &mut Self {
        self.metadata.maintainers.push(handle.into());
        self
    }

    /// Declare a version. Labels must be unique.
    pub fn version(&mut self, decl: VersionDecl) -> Result<&mut Self, RecipeError> {
        if self.versions.iter().any(|v| v.label == decl.label) {
            return Err(RecipeError::DuplicateVersion(decl.label));
        }
        self.versions.push(decl);
        Ok(self)
    }

    /// Declare a variant.
    ///
    /// Re-declaring with identical parameters is idempotent; a
    /// conflicting re-declaration is a configuration error.
    pub fn variant(&mut self, variant: Variant) -> Result<&mut Self, RecipeError> {
        if let Some(existing) = self.variants.iter().find(|v| v.name == variant.name) {
            if *existing == variant {
                return Ok(self);
            }
            return Err(RecipeError::ConflictingVariant(variant.name));
        }
        self.variants.push(variant);
        Ok(self)
    }

    /// Declare a dependency.
    ///
    /// Multiple declarations for the same dependency name are additive,
    /// never overwriting.
    pub fn depends_on(
        &mut self,
        spec: impl Into<String>,
        when: Predicate,
        kinds: &[DependencyKind],
    ) -> &mut Self {
        self.dependencies.push(Dependency::new(spec, when, kinds));
        self
    }

    /// Register a configure flag fed from a variant's value.
    pub fn define_from_variant(
        &mut self,
        option: impl Into<String>,
        variant: impl Into<String>,
    ) -> &mut Self {
        self.defines.push(CmakeDefine {
            option: option.into(),
            variant: variant.into(),
        });
        self
    }

    /// Validate cross-references and produce the immutable descriptor.
    pub fn finish(self) -> Result<PackageDescriptor, RecipeError> {
        if self.versions.is_empty() {
            return Err(RecipeError::NoVersions(self.metadata.name));
        }

        let known = |name: &str| self.variants.iter().any(|v| v.name == name);

        for define in &self.defines {
            if !known(&define.variant) {
                return Err(RecipeError::UnknownVariant {
                    variant: define.variant.clone(),
                    referrer: format!("define `{}`", define.option),
                });
            }
        }

        for dep in &self.dependencies {
            for name in dep.when.referenced_variants() {
                if !known(name) {
                    return Err(RecipeError::UnknownVariant {
                        variant: name.to_string(),
                        referrer: format!("dependency `{}`", dep.spec),
                    });
                }
            }
        }

        // Enumerated defaults must sit inside their own allowed set.
        for variant in &self.variants {
            if let (Some(values), VariantValue::Str(default)) = (&variant.values, &variant.default)
            {
                if !values.contains(default) {
                    return Err(RecipeError::InvalidValue {
                        variant: variant.name.clone(),
                        value: default.clone(),
                        allowed: values.join(", "),
                    });
                }
            }
        }

        Ok(PackageDescriptor {
            metadata: self.metadata,
            versions: self.versions,
            variants: self.variants,
            dependencies: self.dependencies,
            defines: self.defines,
        })
    }
}

/// An immutable, fully validated package descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDescriptor {
    metadata: PackageMetadata,
    versions: Vec<VersionDecl>,
    variants: Vec<Variant>,
    dependencies: Vec<Dependency>,
    defines: Vec<CmakeDefine>,
}

impl PackageDescriptor {
    /// Package metadata.
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Declared versions, in declaration order.
    pub fn versions(&self) -> &[VersionDecl] {
        &self.versions
    }

    /// Look up a version by label.
    pub fn version(&self, label: &str) -> Result<&VersionDecl, RecipeError> {
        self.versions
            .iter()
            .find(|v| v.label == label)
            .ok_or_else(|| RecipeError::UnknownVersion {
                label: label.to_string(),
                available: self
                    .versions
                    .iter()
                    .map(|v| v.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// The preferred version: the highest release, falling back to the
    /// first declared version when no label parses as a release.
    pub fn preferred_version(&self) -> &VersionDecl {
        self.versions
            .iter()
            .filter(|v| v.as_semver().is_some())
            .max_by_key(|v| v.as_semver())
            .unwrap_or(&self.versions[0])
    }

    /// Declared variants, in declaration order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Look up a variant by name.
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// All dependency declarations.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Registered configure defines.
    pub fn defines(&self) -> &[CmakeDefine] {
        &self.defines
    }

    /// Resolve a selection into full variant state.
    ///
    /// Starts from declared defaults, overlays the overrides, and
    /// validates each override against its variant's type and allowed
    /// values.
    pub fn resolve(
        &self,
        overrides: &[(String, VariantValue)],
    ) -> Result<VariantSet, RecipeError> {
        let mut values: BTreeMap<String, VariantValue> = self
            .variants
            .iter()
            .map(|v| (v.name.clone(), v.default.clone()))
            .collect();

        for (name, value) in overrides {
            let variant = self
                .variant(name)
                .ok_or_else(|| RecipeError::UnknownSelection(name.clone()))?;

            let coerced = match (&variant.values, value) {
                (None, VariantValue::Bool(b)) => VariantValue::Bool(*b),
                (None, VariantValue::Str(s)) => {
                    return Err(RecipeError::ExpectedBool {
                        variant: name.clone(),
                        value: s.clone(),
                    });
                }
                (Some(allowed), VariantValue::Str(s)) if allowed.contains(s) => {
                    VariantValue::Str(s.clone())
                }
                (Some(allowed), other) => {
                    return Err(RecipeError::InvalidValue {
                        variant: name.clone(),
                        value: other.to_string(),
                        allowed: allowed.join(", "),
                    });
                }
            };

            values.insert(name.clone(), coerced);
        }

        Ok(VariantSet::from_values(values))
    }

    /// Dependencies active under the given variant state.
    pub fn active_dependencies(&self, variants: &VariantSet) -> Vec<&Dependency> {
        self.dependencies
            .iter()
            .filter(|d| d.is_active(variants))
            .collect()
    }
}
