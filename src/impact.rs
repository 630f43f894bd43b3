//! Semantic-versioning impact of a commit.

use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorKind, ParsedCommit, Type};

/// How a commit affects the next version number.
///
/// Impacts are ordered, so the impact of a series of commits is their `max`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SemverImpact {
    /// No release is implied.
    #[default]
    None,
    /// A bug fix.
    Patch,
    /// A new feature.
    Minor,
    /// A breaking change.
    Major,
}

impl SemverImpact {
    /// Access `str` representation of the impact.
    pub fn as_str(self) -> &'static str {
        match self {
            SemverImpact::None => "NONE",
            SemverImpact::Patch => "PATCH",
            SemverImpact::Minor => "MINOR",
            SemverImpact::Major => "MAJOR",
        }
    }
}

impl fmt::Display for SemverImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemverImpact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            SemverImpact::None,
            SemverImpact::Patch,
            SemverImpact::Minor,
            SemverImpact::Major,
        ]
        .into_iter()
        .find(|impact| impact.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| Error::new(ErrorKind::UnknownImpact).set_context(s))
    }
}

/// Derive the semantic-versioning impact of a parsed commit.
///
/// A breaking change outranks the commit type, so `fix!:` is [`SemverImpact::Major`].
pub fn classify(parsed: &ParsedCommit<'_>) -> SemverImpact {
    if parsed.is_breaking() {
        return SemverImpact::Major;
    }
    match parsed.type_().map(|ty| ty.normalized()) {
        Some(ty) if ty == Type::FEAT => SemverImpact::Minor,
        Some(ty) if ty == Type::FIX => SemverImpact::Patch,
        _ => SemverImpact::None,
    }
}
