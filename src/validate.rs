//! Rule-based validation of commit messages.

use std::fmt;

use crate::impact::{classify, SemverImpact};
use crate::parser;
use crate::registry::{self, TypeNames};
use crate::{ParsedCommit, Scope, Type};

/// Headers longer than this are rejected.
pub const MAX_HEADER_LENGTH: usize = 100;

/// Headers longer than this draw an [`Advisory`].
pub const PREFERRED_HEADER_LENGTH: usize = 72;

/// Validate a commit message and classify its semantic-versioning impact.
///
/// Every rule runs, in a fixed order, regardless of earlier failures, so the
/// reported errors are reproducible.
pub fn validate(message: &str) -> ValidationResult<'_> {
    let parsed = ParsedCommit::parse(message);

    let mut report = Report::default();
    for rule in RULES {
        rule(&parsed, &mut report);
    }

    let semver_impact = classify(&parsed);
    let is_valid = report.errors.is_empty();
    tracing::debug!(
        is_valid,
        errors = report.errors.len(),
        advisories = report.advisories.len(),
        %semver_impact,
        "validated commit message"
    );

    ValidationResult {
        is_valid,
        errors: report.errors,
        advisories: report.advisories,
        parsed,
        semver_impact,
    }
}

/// The outcome of [`validate`].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult<'a> {
    is_valid: bool,
    errors: Vec<Violation<'a>>,
    advisories: Vec<Advisory>,
    parsed: ParsedCommit<'a>,
    semver_impact: SemverImpact,
}

impl<'a> ValidationResult<'a> {
    /// Whether the message passed every blocking rule.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Blocking violations, in rule order.
    pub fn errors(&self) -> &[Violation<'a>] {
        &self.errors
    }

    /// The violations rendered as human-readable messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// All violations joined by newlines, or `None` when the message is valid.
    pub fn error_message(&self) -> Option<String> {
        (!self.is_valid).then(|| self.error_messages().join("\n"))
    }

    /// Non-blocking recommendations.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// The parsed message.
    pub fn parsed(&self) -> &ParsedCommit<'a> {
        &self.parsed
    }

    /// The semantic-versioning impact of the message.
    pub fn semver_impact(&self) -> SemverImpact {
        self.semver_impact
    }
}

/// A blocking rule violation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Violation<'a> {
    /// The header does not start with a type, a colon and a description.
    MissingTypePrefix,
    /// The header exceeds [`MAX_HEADER_LENGTH`].
    HeaderTooLong {
        /// Header length in characters.
        length: usize,
    },
    /// The type is not in the registry.
    InvalidType {
        /// The type as written.
        ty: Type<'a>,
    },
    /// The scope contains characters other than letters, digits, `-` and `_`.
    InvalidScope {
        /// The scope as written.
        scope: Scope<'a>,
    },
    /// A `!` header has no description.
    MissingBreakingDescription,
    /// A line in the footer block is not a footer note.
    MalformedFooter {
        /// The offending line.
        line: &'a str,
    },
    /// The body is not separated from the header by a blank line.
    MissingBodySeparator,
}

impl fmt::Display for Violation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingTypePrefix => f.write_str(
                "Commit MUST be prefixed with a type, followed by a colon and space, then a description.",
            ),
            Violation::HeaderTooLong { .. } => write!(
                f,
                "First line (type, scope, and description) MUST not exceed {MAX_HEADER_LENGTH} characters."
            ),
            Violation::InvalidType { ty } => {
                write!(f, "Invalid type \"{ty}\". Valid types are: {TypeNames}.")
            }
            Violation::InvalidScope { .. } => {
                f.write_str("Scope MUST consist of a noun describing a section of the codebase.")
            }
            Violation::MissingBreakingDescription => {
                f.write_str("Breaking changes with ! MUST include a description.")
            }
            Violation::MalformedFooter { .. } => f.write_str(
                "Footer MUST consist of a token, followed by \": \" or \" #\", followed by a string value.",
            ),
            Violation::MissingBodySeparator => {
                f.write_str("Commit body MUST begin one blank line after the description.")
            }
        }
    }
}

/// A non-blocking recommendation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Advisory {
    /// The header exceeds [`PREFERRED_HEADER_LENGTH`].
    LongHeader {
        /// Header length in characters.
        length: usize,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::LongHeader { .. } => write!(
                f,
                "First line should preferably not exceed {PREFERRED_HEADER_LENGTH} characters."
            ),
        }
    }
}

macro_rules! display_serialized {
    ($($ty:ident$(<$lt:lifetime>)?),+) => (
        $(
            #[cfg(feature = "serde")]
            impl serde::Serialize for $ty$(<$lt>)? {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.collect_str(self)
                }
            }

            #[cfg(feature = "schemars")]
            impl schemars::JsonSchema for $ty$(<$lt>)? {
                fn schema_name() -> std::borrow::Cow<'static, str> {
                    stringify!($ty).into()
                }

                fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
                    <str as schemars::JsonSchema>::json_schema(generator)
                }
            }
        )+
    )
}

display_serialized![Violation<'_>, Advisory];

#[derive(Default)]
struct Report<'a> {
    errors: Vec<Violation<'a>>,
    advisories: Vec<Advisory>,
}

type Rule = for<'a> fn(&ParsedCommit<'a>, &mut Report<'a>);

/// Evaluated in order; each rule only appends.
const RULES: &[Rule] = &[
    header_shape,
    header_length,
    type_membership,
    scope_charset,
    breaking_marker,
    footer_shape,
    body_separation,
];

fn header_shape<'a>(commit: &ParsedCommit<'a>, report: &mut Report<'a>) {
    if (commit.type_().is_none() || commit.subject().is_none())
        && !parser::is_type_prefixed(commit.header())
    {
        report.errors.push(Violation::MissingTypePrefix);
    }
}

fn header_length<'a>(commit: &ParsedCommit<'a>, report: &mut Report<'a>) {
    let length = commit.header().chars().count();
    if MAX_HEADER_LENGTH < length {
        report.errors.push(Violation::HeaderTooLong { length });
    } else if PREFERRED_HEADER_LENGTH < length {
        report.advisories.push(Advisory::LongHeader { length });
    }
}

fn type_membership<'a>(commit: &ParsedCommit<'a>, report: &mut Report<'a>) {
    if let Some(ty) = commit.type_() {
        if registry::lookup(ty.normalized().as_str()).is_none() {
            report.errors.push(Violation::InvalidType { ty });
        }
    }
}

fn scope_charset<'a>(commit: &ParsedCommit<'a>, report: &mut Report<'a>) {
    if let Some(scope) = commit.scope() {
        if !scope.is_identifier() {
            report.errors.push(Violation::InvalidScope { scope });
        }
    }
}

fn breaking_marker<'a>(commit: &ParsedCommit<'a>, report: &mut Report<'a>) {
    if commit.breaking() && commit.subject().is_none() {
        report.errors.push(Violation::MissingBreakingDescription);
    }
}

fn footer_shape<'a>(commit: &ParsedCommit<'a>, report: &mut Report<'a>) {
    let Some(footer) = commit.footer() else {
        return;
    };
    for line in footer.lines() {
        if !line.trim().is_empty() && parser::footer_line(line).is_none() {
            report.errors.push(Violation::MalformedFooter { line });
        }
    }
}

// Only checks that a blank line exists somewhere, not that it follows the header.
fn body_separation<'a>(commit: &ParsedCommit<'a>, report: &mut Report<'a>) {
    if commit.body().is_some() && !commit.raw().contains("\n\n") {
        report.errors.push(Violation::MissingBodySeparator);
    }
}
