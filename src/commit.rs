//! The parsed commit message and its components.

use std::fmt;
use std::ops::Deref;

use crate::impact::{classify, SemverImpact};
use crate::parser;
use crate::{Error, ErrorKind};

const BREAKING_PHRASE: &str = "BREAKING CHANGE";
const BREAKING_ARROW: &str = "BREAKING-CHANGE";

/// A commit message decomposed into its Conventional Commit fields.
///
/// Parsing never fails: a message that does not follow the grammar yields a
/// `ParsedCommit` whose optional fields are absent.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommit<'a> {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    ty: Option<Type<'a>>,
    scope: Option<Scope<'a>>,
    breaking: bool,
    subject: Option<&'a str>,
    body: Option<&'a str>,
    #[cfg_attr(feature = "serde", serde(skip))]
    header: &'a str,
    #[cfg_attr(feature = "serde", serde(skip))]
    footer: Option<&'a str>,
    footer_notes: Vec<FooterNote<'a>>,
    raw: &'a str,
}

impl<'a> ParsedCommit<'a> {
    /// Decompose a commit message.
    ///
    /// Surrounding whitespace is trimmed before parsing; the trimmed text is
    /// kept as [`ParsedCommit::raw`].
    pub fn parse(message: &'a str) -> Self {
        let raw = message.trim();
        let details = parser::message(raw);

        Self {
            ty: details.ty.map(Type::new_unchecked),
            scope: details.scope.map(Scope::new_unchecked),
            breaking: details.breaking,
            subject: details.subject,
            body: details.body,
            header: details.header,
            footer: details.footer,
            footer_notes: details
                .notes
                .into_iter()
                .map(|(title, text)| FooterNote::new(title, text))
                .collect(),
            raw,
        }
    }

    /// The type of the commit, if the header follows the grammar.
    pub fn type_(&self) -> Option<Type<'a>> {
        self.ty
    }

    /// The optional scope of the commit.
    pub fn scope(&self) -> Option<Scope<'a>> {
        self.scope
    }

    /// Whether the header carries the `!` breaking marker.
    ///
    /// See [`ParsedCommit::is_breaking`] to also account for
    /// `BREAKING CHANGE` footers.
    pub fn breaking(&self) -> bool {
        self.breaking
    }

    /// The description following the colon on the header line.
    pub fn subject(&self) -> Option<&'a str> {
        self.subject
    }

    /// The free-form text between the header and the footer block.
    pub fn body(&self) -> Option<&'a str> {
        self.body
    }

    /// The first line of the message.
    pub fn header(&self) -> &'a str {
        self.header
    }

    /// The footer block, starting at the first line shaped like a footer.
    ///
    /// Unlike [`ParsedCommit::footer_notes`], this keeps lines that are not
    /// well-formed notes.
    pub fn footer(&self) -> Option<&'a str> {
        self.footer
    }

    /// The recognized footer notes, in source order.
    pub fn footer_notes(&self) -> &[FooterNote<'a>] {
        &self.footer_notes
    }

    /// The trimmed message this was parsed from.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// A breaking change is signalled either by the `!` marker or by a
    /// `BREAKING CHANGE` / `BREAKING-CHANGE` footer note.
    pub fn is_breaking(&self) -> bool {
        self.breaking || self.footer_notes.iter().any(FooterNote::breaking)
    }

    /// Explanation for the breaking change.
    ///
    /// Note: if no `BREAKING CHANGE` footer is provided, the subject is expected
    /// to describe the breaking change.
    pub fn breaking_description(&self) -> Option<&'a str> {
        self.footer_notes
            .iter()
            .find(|note| note.breaking())
            .map(FooterNote::text)
            .or_else(|| self.breaking.then_some(self.subject).flatten())
    }

    /// The semantic-versioning impact of this commit.
    pub fn semver_impact(&self) -> SemverImpact {
        classify(self)
    }
}

/// A single footer note, such as `Reviewed-by: Z` or `Closes #12`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FooterNote<'a> {
    title: &'a str,
    text: &'a str,
}

impl<'a> FooterNote<'a> {
    /// Piece together a footer note.
    pub const fn new(title: &'a str, text: &'a str) -> Self {
        Self { title, text }
    }

    /// The token leading the note, e.g. `Reviewed-by` or `BREAKING CHANGE`.
    pub const fn title(&self) -> &'a str {
        self.title
    }

    /// The value following the separator.
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// A flag to signal that the note describes a breaking change.
    pub fn breaking(&self) -> bool {
        self.title == BREAKING_PHRASE || self.title == BREAKING_ARROW
    }
}

macro_rules! unicase_components {
    ($($ty:ident),+) => (
        $(
            /// A component of the conventional commit.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $ty<'a>(unicase::UniCase<&'a str>);

            impl<'a> $ty<'a> {
                /// See `parse` for ensuring the data is valid.
                pub const fn new_unchecked(value: &'a str) -> Self {
                    $ty(unicase::UniCase::unicode(value))
                }

                /// Access `str` representation
                pub fn as_str(&self) -> &'a str {
                    self.0.into_inner()
                }
            }

            impl Deref for $ty<'_> {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    self.as_str()
                }
            }

            impl PartialEq<&'_ str> for $ty<'_> {
                fn eq(&self, other: &&str) -> bool {
                    *self == $ty::new_unchecked(*other)
                }
            }

            impl fmt::Display for $ty<'_> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            #[cfg(feature = "serde")]
            impl serde::Serialize for $ty<'_> {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.serialize_str(self)
                }
            }

            #[cfg(feature = "schemars")]
            impl schemars::JsonSchema for $ty<'_> {
                fn schema_name() -> std::borrow::Cow<'static, str> {
                    stringify!($ty).into()
                }

                fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
                    <str as schemars::JsonSchema>::json_schema(generator)
                }

                fn inline_schema() -> bool {
                    true
                }
            }
        )+
    )
}

unicase_components![Type, Scope];

impl<'a> Type<'a> {
    /// Parse a `str` into a `Type`.
    pub fn parse(ty: &'a str) -> Result<Self, Error> {
        let mut input = ty;
        match parser::type_(&mut input) {
            Ok(t) if input.is_empty() => Ok(Type::new_unchecked(t)),
            _ => Err(Error::new(ErrorKind::InvalidType).set_context(ty)),
        }
    }

    /// The type with any trailing `!` stripped, for registry comparisons.
    ///
    /// Comparisons between types already ignore case.
    pub fn normalized(&self) -> Type<'a> {
        Type::new_unchecked(self.as_str().trim_end_matches('!'))
    }
}

/// Registered commit types
impl Type<'static> {
    /// Commit type when introducing new features (correlates with `minor` in semver)
    pub const FEAT: Type<'static> = Type::new_unchecked("feat");
    /// Commit type when patching a bug (correlates with `patch` in semver)
    pub const FIX: Type<'static> = Type::new_unchecked("fix");
    /// Possible commit type for changing documentation.
    pub const DOCS: Type<'static> = Type::new_unchecked("docs");
    /// Possible commit type for changing code style.
    pub const STYLE: Type<'static> = Type::new_unchecked("style");
    /// Possible commit type for refactoring code structure.
    pub const REFACTOR: Type<'static> = Type::new_unchecked("refactor");
    /// Possible commit type for performance optimizations.
    pub const PERF: Type<'static> = Type::new_unchecked("perf");
    /// Possible commit type for addressing tests.
    pub const TEST: Type<'static> = Type::new_unchecked("test");
    /// Possible commit type for build system changes.
    pub const BUILD: Type<'static> = Type::new_unchecked("build");
    /// Possible commit type for CI configuration changes.
    pub const CI: Type<'static> = Type::new_unchecked("ci");
    /// Possible commit type for other things.
    pub const CHORE: Type<'static> = Type::new_unchecked("chore");
    /// Possible commit type when reverting changes.
    pub const REVERT: Type<'static> = Type::new_unchecked("revert");
}

impl<'a> Scope<'a> {
    /// Parse a `str` into a `Scope`.
    pub fn parse(scope: &'a str) -> Result<Self, Error> {
        let mut input = scope;
        match parser::scope(&mut input) {
            Ok(s) if input.is_empty() => Ok(Scope::new_unchecked(s)),
            _ => Err(Error::new(ErrorKind::InvalidScope).set_context(scope)),
        }
    }

    /// Whether the scope is a plain identifier (ASCII letters, digits, `-`
    /// and `_`), i.e. a noun naming a section of the codebase.
    pub fn is_identifier(&self) -> bool {
        self.as_str().chars().all(parser::is_scope_char)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;
    use indoc::indoc;
    #[cfg(feature = "serde")]
    use serde_test::Token;

    #[test]
    fn test_valid_simple_commit() {
        let commit = ParsedCommit::parse("feat(auth): add OAuth2 login support");

        assert_eq!(commit.type_().unwrap(), "feat");
        assert_eq!(commit.scope().unwrap(), "auth");
        assert!(!commit.breaking());
        assert_eq!(commit.subject(), Some("add OAuth2 login support"));
        assert_eq!(commit.body(), None);
        assert!(commit.footer_notes().is_empty());
    }

    #[test]
    fn test_case_is_preserved() {
        let commit = ParsedCommit::parse("FeAt(Auth): add");

        assert_eq!(commit.type_(), Some(Type::FEAT));
        assert_eq!(commit.type_().unwrap().as_str(), "FeAt");
        assert_eq!(commit.scope().unwrap().as_str(), "Auth");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let commit = ParsedCommit::parse("\n\n  fix: hello world\n\n\n");

        assert_eq!(commit.raw(), "fix: hello world");
        assert_eq!(commit.header(), "fix: hello world");
        assert_eq!(commit.type_(), Some(Type::FIX));
        assert_eq!(commit.subject(), Some("hello world"));
    }

    #[test]
    fn test_parenthetical_statement() {
        let commit = ParsedCommit::parse("chore: add .hello.txt (#1)");

        assert_eq!(commit.type_(), Some(Type::CHORE));
        assert_eq!(commit.scope(), None);
        assert_eq!(commit.subject(), Some("add .hello.txt (#1)"));
    }

    #[test]
    fn test_malformed_header() {
        let commit = ParsedCommit::parse("fix Improved error messages");

        assert_eq!(commit.type_(), None);
        assert_eq!(commit.scope(), None);
        assert_eq!(commit.subject(), None);
        assert!(!commit.breaking());
    }

    #[test]
    fn test_breaking_change() {
        let commit = ParsedCommit::parse("feat!: redesign user interface");
        assert_eq!(commit.type_(), Some(Type::FEAT));
        assert_eq!(commit.scope(), None);
        assert!(commit.breaking());
        assert!(commit.is_breaking());
        assert_eq!(
            commit.breaking_description(),
            Some("redesign user interface")
        );

        let commit = ParsedCommit::parse(indoc!(
            "feat: message

            BREAKING CHANGE: breaking change"
        ));
        assert!(!commit.breaking());
        assert!(commit.is_breaking());
        assert_eq!(commit.footer_notes()[0].title(), "BREAKING CHANGE");
        assert_eq!(commit.breaking_description(), Some("breaking change"));

        let commit = ParsedCommit::parse(indoc!(
            "fix: message

            BREAKING-CHANGE: it's broken"
        ));
        assert_eq!(commit.footer_notes()[0].title(), "BREAKING-CHANGE");
        assert!(commit.is_breaking());
        assert_eq!(commit.breaking_description(), Some("it's broken"));

        let commit = ParsedCommit::parse("fix: message");
        assert!(!commit.is_breaking());
        assert_eq!(commit.breaking_description(), None);
    }

    #[test]
    fn test_valid_complex_commit() {
        let commit = indoc! {"
            chore: improve changelog readability

            Change date notation from YYYY-MM-DD to YYYY.MM.DD to make it a tiny bit
            easier to parse while reading.

            BREAKING CHANGE: Just kidding!
            Co-Authored-By: Lisa Simpson <lisa@simpsons.fam>
            Closes #12
        "};

        let commit = ParsedCommit::parse(commit);

        assert_eq!(Some(Type::CHORE), commit.type_());
        assert_eq!(None, commit.scope());
        assert_eq!(Some("improve changelog readability"), commit.subject());
        assert_eq!(
            Some(indoc!(
                "Change date notation from YYYY-MM-DD to YYYY.MM.DD to make it a tiny bit
                 easier to parse while reading."
            )),
            commit.body()
        );
        assert_eq!(
            commit.footer_notes(),
            [
                FooterNote::new("BREAKING CHANGE", "Just kidding!"),
                FooterNote::new("Co-Authored-By", "Lisa Simpson <lisa@simpsons.fam>"),
                FooterNote::new("Closes", "12"),
            ]
        );
    }

    #[test]
    fn test_missing_type() {
        let commit = ParsedCommit::parse("");

        assert_eq!(commit.type_(), None);
        assert_eq!(commit.raw(), "");
        assert_eq!(commit.header(), "");
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(Type::parse("Feat").unwrap(), Type::FEAT);
        assert_eq!(Type::parse("").unwrap_err().kind(), ErrorKind::InvalidType);
        assert_eq!(
            Type::parse("feat!").unwrap_err().to_string(),
            "invalid type format: \"feat!\""
        );
        assert_eq!(Type::new_unchecked("FIX!").normalized(), Type::FIX);
    }

    #[test]
    fn test_scope_parse() {
        let scope = Scope::parse("my scope").unwrap();
        assert_eq!(scope, "MY SCOPE");
        assert!(!scope.is_identifier());
        assert!(Scope::parse("api_v2-beta").unwrap().is_identifier());
        assert_eq!(Scope::parse("").unwrap_err().kind(), ErrorKind::InvalidScope);
        assert_eq!(Scope::parse("a)b").unwrap_err().kind(), ErrorKind::InvalidScope);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_commit_serialize() {
        let commit = ParsedCommit::parse("type(my scope): hello world\n\nCloses #1");
        serde_test::assert_ser_tokens(
            &commit,
            &[
                Token::Struct {
                    name: "ParsedCommit",
                    len: 7,
                },
                Token::Str("type"),
                Token::Some,
                Token::Str("type"),
                Token::Str("scope"),
                Token::Some,
                Token::Str("my scope"),
                Token::Str("breaking"),
                Token::Bool(false),
                Token::Str("subject"),
                Token::Some,
                Token::Str("hello world"),
                Token::Str("body"),
                Token::None,
                Token::Str("footerNotes"),
                Token::Seq { len: Some(1) },
                Token::Struct {
                    name: "FooterNote",
                    len: 2,
                },
                Token::Str("title"),
                Token::Str("Closes"),
                Token::Str("text"),
                Token::Str("1"),
                Token::StructEnd,
                Token::SeqEnd,
                Token::Str("raw"),
                Token::Str("type(my scope): hello world\n\nCloses #1"),
                Token::StructEnd,
            ],
        );
    }
}
