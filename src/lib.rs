//! A linter for commit messages following the [Conventional Commit]
//! specification.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! [`validate`] parses a message, runs every validation rule against it and
//! reports the semantic-versioning impact the message implies. Neither parsing
//! nor validation can fail: malformed messages simply produce violations.
//!
//! # Example
//!
//! ```rust
//! use conventional_lint::{SemverImpact, Type, Violation};
//! use indoc::indoc;
//!
//! let message = indoc!("
//!     docs(example)!: add tested usage example
//!
//!     This example is tested using Rust's doctest capabilities. Having this
//!     example helps people understand how to use the linter.
//!
//!     BREAKING CHANGE: Going from nothing to something.
//!     Co-Authored-By: Lisa Simpson <lisa@simpsons.fam>
//!     Closes #12
//! ");
//!
//! let result = conventional_lint::validate(message);
//! assert!(result.is_valid());
//!
//! // The parsed components of the header.
//! let commit = result.parsed();
//! assert_eq!(commit.type_(), Some(Type::DOCS));
//! assert_eq!(commit.scope().unwrap(), "example");
//! assert_eq!(commit.subject(), Some("add tested usage example"));
//! assert!(commit.breaking());
//!
//! // The free-form body, and the footer notes in source order.
//! assert!(commit.body().unwrap().contains("helps people understand"));
//! assert_eq!(commit.footer_notes()[1].title(), "Co-Authored-By");
//! assert_eq!(commit.footer_notes()[2].text(), "12");
//!
//! // A breaking change outranks the commit type.
//! assert_eq!(result.semver_impact(), SemverImpact::Major);
//!
//! // Violations are collected rather than returned as errors.
//! let result = conventional_lint::validate("feet(my scope): typo");
//! assert!(!result.is_valid());
//! assert!(matches!(result.errors()[0], Violation::InvalidType { .. }));
//! assert_eq!(
//!     result.errors()[1].to_string(),
//!     "Scope MUST consist of a noun describing a section of the codebase."
//! );
//! ```

#![warn(missing_docs)]

mod commit;
mod error;
mod impact;
mod lines;
mod parser;
pub mod registry;
mod validate;

pub use commit::{FooterNote, ParsedCommit, Scope, Type};
pub use error::{Error, ErrorKind};
pub use impact::{classify, SemverImpact};
pub use registry::{TypeDefinition, COMMIT_TYPES};
pub use validate::{
    validate, Advisory, ValidationResult, Violation, MAX_HEADER_LENGTH, PREFERRED_HEADER_LENGTH,
};
