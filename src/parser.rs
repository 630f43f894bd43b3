use winnow::combinator::{alt, delimited, eof, opt, terminated, trace};
use winnow::error::StrContext;
use winnow::prelude::*;
use winnow::token::{one_of, take_till, take_while};

use crate::lines::{self, LinesWithTerminator};
use crate::registry;

type Summary<'a> = (&'a str, Option<&'a str>, bool, Option<&'a str>);

/// Fields recognized in a (trimmed) commit message.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CommitDetails<'a> {
    pub(crate) header: &'a str,
    pub(crate) ty: Option<&'a str>,
    pub(crate) scope: Option<&'a str>,
    pub(crate) breaking: bool,
    pub(crate) subject: Option<&'a str>,
    pub(crate) body: Option<&'a str>,
    pub(crate) footer: Option<&'a str>,
    pub(crate) notes: Vec<(&'a str, &'a str)>,
}

// <message>         ::= <header>, [<newline>, [<blank>, <newline>]], <body>?, <footer>?
// <body>            ::= <line not matching <note>>, (<newline>, <line not matching <note>>)*
// <footer>          ::= <note>, (<newline>, <line>)*
pub(crate) fn message(raw: &str) -> CommitDetails<'_> {
    let (header_line, rest) = match raw.find('\n') {
        Some(i) => raw.split_at(i + 1),
        None => (raw, ""),
    };
    let header = lines::content(header_line);

    let mut input = header;
    let (ty, scope, breaking, subject) = match summary.parse_next(&mut input) {
        Ok((ty, scope, breaking, subject)) => (Some(ty), scope, breaking, subject),
        Err(_) => (None, None, false, None),
    };

    // A single blank line separates the header from what follows.
    let rest = match LinesWithTerminator::new(rest).next() {
        Some(line) if line.trim().is_empty() => &rest[line.len()..],
        _ => rest,
    };

    let mut offset = 0;
    for line in LinesWithTerminator::new(rest) {
        if footer_line(lines::content(line)).is_some() {
            break;
        }
        offset += line.len();
    }
    let (body, footer) = rest.split_at(offset);

    let body = Some(body.trim_start_matches(['\n', '\r']).trim_end()).filter(|b| !b.is_empty());
    let footer = Some(footer.trim_end()).filter(|f| !f.is_empty());
    let notes: Vec<_> = footer
        .map(|footer| footer.lines().filter_map(footer_line).collect())
        .unwrap_or_default();

    tracing::trace!(
        header_matched = ty.is_some(),
        has_body = body.is_some(),
        notes = notes.len(),
        "segmented commit message"
    );

    CommitDetails {
        header,
        ty,
        scope,
        breaking,
        subject,
        body,
        footer,
        notes,
    }
}

/// Recognize a complete footer line, returning its title and text.
pub(crate) fn footer_line(line: &str) -> Option<(&str, &str)> {
    let mut input = line;
    terminated(footer_note, eof).parse_next(&mut input).ok()
}

/// Whether the header starts with a registered type, an optional identifier
/// scope, an optional `!` and a colon.
pub(crate) fn is_type_prefixed(header: &str) -> bool {
    let mut input = header;
    type_prefix.parse_next(&mut input).is_ok()
}

// <newline>         ::= [<CR>], <LF>
fn is_line_ending(c: char) -> bool {
    c == '\n' || c == '\r'
}

// <identifier>      ::= <ASCII alphanumeric> | "-" | "_"
pub(crate) fn is_scope_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

// <header>          ::= <type>, ["(", <scope>, ")"], ["!"], ":", [<whitespace>], <text>
fn summary<'a>(i: &mut &'a str) -> ModalResult<Summary<'a>> {
    trace(
        "summary",
        (
            type_,
            opt(delimited('(', scope, ')')),
            opt('!'),
            ':',
            opt(one_of(|c: char| c.is_whitespace())),
            text,
        ),
    )
    .map(|(ty, scope, bang, _, _, subject)| {
        let subject = (!subject.is_empty()).then_some(subject);
        (ty, scope, bang.is_some(), subject)
    })
    .parse_next(i)
}

// <type>            ::= <ASCII alphanumeric>+
pub(crate) fn type_<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    trace("type", take_while(1.., |c: char| c.is_ascii_alphanumeric()))
        .context(StrContext::Label("type"))
        .parse_next(i)
}

// <scope>           ::= <any UTF8-octets except ")">+
pub(crate) fn scope<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    trace("scope", take_while(1.., |c: char| c != ')'))
        .context(StrContext::Label("scope"))
        .parse_next(i)
}

// <text>            ::= <any UTF8-octets except newline>*
fn text<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    take_till(0.., is_line_ending).parse_next(i)
}

// <value>           ::= <any UTF8-octets except newline>+
fn value<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    take_till(1.., is_line_ending).parse_next(i)
}

// <type-prefix>     ::= <registered type>, ["(", <identifier>+, ")"], ["!"], ":"
fn type_prefix<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    trace(
        "type_prefix",
        (
            type_.verify(|ty: &str| registry::lookup(ty).is_some()),
            opt(delimited('(', take_while(1.., is_scope_char), ')')),
            opt('!'),
            ':',
        ),
    )
    .take()
    .parse_next(i)
}

// <note>            ::= <breaking-note> | <token-note>
fn footer_note<'a>(i: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    trace("footer", alt((breaking_note, token_note))).parse_next(i)
}

// <breaking-note>   ::= "BREAKING", (" " | "-"), "CHANGE", ": ", <value>
fn breaking_note<'a>(i: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    (
        ("BREAKING", one_of([' ', '-']), "CHANGE").take(),
        ": ",
        value,
    )
        .map(|(title, _, text)| (title, text))
        .parse_next(i)
}

// <token-note>      ::= <token>, (": " | " #"), <value>
// <token>           ::= (<ASCII letter> | "-")+
fn token_note<'a>(i: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '-'),
        alt((": ", " #")),
        value,
    )
        .map(|(title, _, text)| (title, text))
        .parse_next(i)
}
