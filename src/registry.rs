//! The fixed table of commit types accepted by the validator.

use std::fmt;

use crate::Type;

/// A registered commit type.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeDefinition {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    ty: Type<'static>,
    description: &'static str,
    required: bool,
}

impl TypeDefinition {
    const fn required(ty: Type<'static>, description: &'static str) -> Self {
        Self {
            ty,
            description,
            required: true,
        }
    }

    const fn optional(ty: Type<'static>, description: &'static str) -> Self {
        Self {
            ty,
            description,
            required: false,
        }
    }

    /// The type token, e.g. `feat`.
    pub fn type_(&self) -> Type<'static> {
        self.ty
    }

    /// A short human-readable description.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Whether the Conventional Commits specification mandates this type for
    /// its scenario (`feat` for features, `fix` for bug fixes).
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Every accepted commit type, required types first.
pub static COMMIT_TYPES: &[TypeDefinition] = &[
    TypeDefinition::required(Type::FEAT, "A new feature (MINOR in SemVer)"),
    TypeDefinition::required(Type::FIX, "A bug fix (PATCH in SemVer)"),
    TypeDefinition::optional(Type::DOCS, "Documentation changes"),
    TypeDefinition::optional(Type::STYLE, "Code style changes"),
    TypeDefinition::optional(Type::REFACTOR, "Code refactoring"),
    TypeDefinition::optional(Type::PERF, "Performance improvements"),
    TypeDefinition::optional(Type::TEST, "Test updates"),
    TypeDefinition::optional(Type::BUILD, "Build system changes"),
    TypeDefinition::optional(Type::CI, "CI configuration changes"),
    TypeDefinition::optional(Type::CHORE, "Maintenance tasks"),
    TypeDefinition::optional(Type::REVERT, "Revert previous changes"),
];

/// Find the registered definition of `ty`, ignoring case.
pub fn lookup(ty: &str) -> Option<&'static TypeDefinition> {
    let ty = Type::new_unchecked(ty);
    COMMIT_TYPES.iter().find(|def| def.ty == ty)
}

/// The types mandated by the Conventional Commits specification.
pub fn required_types() -> impl Iterator<Item = &'static TypeDefinition> {
    COMMIT_TYPES.iter().filter(|def| def.required)
}

/// The remaining accepted types.
pub fn optional_types() -> impl Iterator<Item = &'static TypeDefinition> {
    COMMIT_TYPES.iter().filter(|def| !def.required)
}

/// Comma-separated list of every registered type, in registry order.
pub(crate) struct TypeNames;

impl fmt::Display for TypeNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, def) in COMMIT_TYPES.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            f.write_str(def.ty.as_str())?;
        }
        Ok(())
    }
}
