//! Provides parsers for the markup tokens of a serialised hierarchy.
//!
//! Tags are split into an opening token (`<component`), a run of attributes
//! and a tag end (`>` or `/>`), so that the parsers built on top can report
//! which part of a tag is malformed.

use nom::{
    Parser as _,
    bytes::complete::{tag, take_till, take_until, take_while1},
    character::complete::{char, multispace0, one_of, satisfy},
    combinator::{eof, peek, value},
};

use crate::token::{
    InputSpan, Parser, Result,
    error::{ErrorHandlingParser, TokenError},
    util::{Token, token, whitespace},
};

/// The element names the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagName {
    /// `component`
    Component,
    /// `component_ref`
    ComponentRef,
    /// `encapsulation`
    Encapsulation,
    /// `model`
    Model,
    /// `variable`
    Variable,
}

impl TagName {
    /// Returns the name as it appears in markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::ComponentRef => "component_ref",
            Self::Encapsulation => "encapsulation",
            Self::Model => "model",
            Self::Variable => "variable",
        }
    }
}

/// How a start tag was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEnd {
    /// `/>`, the element has no content
    Empty,
    /// `>`, content and a closing tag follow
    Open,
}

/// An attribute with its raw, still escaped, value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// The attribute name
    pub name: InputSpan<'a>,
    /// The text between the quotes
    pub value: InputSpan<'a>,
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

/// Succeeds when the next character cannot continue a name.
///
/// This keeps `<component` from matching the start of `<component_ref`.
fn name_ends<'a>() -> impl Parser<'a, (), TokenError> {
    let next_char_ends_name = peek(satisfy(|next_char: char| !is_name_char(next_char))).map(|_| ());
    let reached_end_of_file = eof.map(|_| ());
    let mut parser = value((), next_char_ends_name.or(reached_end_of_file));

    move |input: InputSpan<'a>| parser.parse(input)
}

/// Parses the opening of a start tag, such as `<component`.
pub fn open_tag<'a>(name: TagName) -> impl Parser<'a, Token<'a>, TokenError> {
    token(
        (char('<'), tag(name.as_str()), name_ends()),
        TokenError::expected_open_tag(name),
    )
}

/// Parses the end of a start tag, either `/>` or `>`.
pub fn tag_end(input: InputSpan<'_>) -> Result<'_, (Token<'_>, TagEnd), TokenError> {
    let empty = token(tag("/>"), TokenError::expected_tag_end).map(|token| (token, TagEnd::Empty));
    let open = token(char('>'), TokenError::expected_tag_end).map(|token| (token, TagEnd::Open));

    empty.or(open).parse(input)
}

/// Parses a closing tag, such as `</component>`.
pub fn close_tag<'a>(name: TagName) -> impl Parser<'a, Token<'a>, TokenError> {
    token(
        (tag("</"), tag(name.as_str()), multispace0, char('>')),
        TokenError::expected_closing_tag(name),
    )
}

/// Parses a `name="value"` or `name='value'` attribute.
pub fn attribute(input: InputSpan<'_>) -> Result<'_, Attribute<'_>, TokenError> {
    let (rest, name) = take_while1(is_name_char)
        .convert_error_to(TokenError::expected_attribute)
        .parse(input)?;

    let (rest, _) = (multispace0, char('='), multispace0)
        .or_fail_with(TokenError::expected_attribute_value)
        .parse(rest)?;

    let open_quote_span = rest;
    let (rest, quote) = one_of("\"'")
        .or_fail_with(TokenError::expected_attribute_value)
        .parse(rest)?;

    let (rest, value) = take_till(|c: char| c == quote || c == '<').parse(rest)?;

    let (rest, _) = char(quote)
        .or_fail_with(TokenError::unclosed_attribute_value(open_quote_span))
        .parse(rest)?;

    let (rest, _) = whitespace.parse(rest)?;

    Ok((rest, Attribute { name, value }))
}

/// Parses an `<?xml ...?>` declaration.
pub fn xml_declaration(input: InputSpan<'_>) -> Result<'_, Token<'_>, TokenError> {
    token(
        (tag("<?xml"), take_until("?>"), tag("?>")),
        TokenError::expected_xml_declaration,
    )
    .parse(input)
}

/// Parses raw character data up to, but not including, the closing tag of
/// `name`.
pub fn text_until_close<'a>(name: TagName) -> impl Parser<'a, InputSpan<'a>, TokenError> {
    let closing = match name {
        TagName::Component => "</component",
        TagName::ComponentRef => "</component_ref",
        TagName::Encapsulation => "</encapsulation",
        TagName::Model => "</model",
        TagName::Variable => "</variable",
    };

    take_until(closing).convert_error_to(TokenError::expected_text(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::token::error::{ExpectKind, IncompleteKind, TokenErrorKind};

    fn span(input: &str) -> InputSpan<'_> {
        InputSpan::new_extra(input, Config::default())
    }

    mod open_tag_tests {
        use super::*;

        #[test]
        fn component() {
            let (rest, matched) = open_tag(TagName::Component)
                .parse(span("<component name=\"a\"/>"))
                .expect("should parse component tag");
            assert_eq!(matched.lexeme(), "<component");
            assert_eq!(rest.fragment(), &"name=\"a\"/>");
        }

        #[test]
        fn component_does_not_match_component_ref() {
            let error = open_tag(TagName::Component)
                .parse(span("<component_ref/>"))
                .expect_err("should not parse component_ref as component");
            let nom::Err::Error(error) = error else {
                panic!("expected a recoverable error, got {error:?}");
            };
            assert_eq!(
                error.kind,
                TokenErrorKind::Expect(ExpectKind::OpenTag(TagName::Component))
            );
        }

        #[test]
        fn component_ref() {
            let (rest, matched) = open_tag(TagName::ComponentRef)
                .parse(span("<component_ref/>"))
                .expect("should parse component_ref tag");
            assert_eq!(matched.lexeme(), "<component_ref");
            assert_eq!(rest.fragment(), &"/>");
        }
    }

    mod tag_end_tests {
        use super::*;

        #[test]
        fn empty() {
            let (rest, (_, end)) = tag_end(span("/> <x")).expect("should parse `/>`");
            assert_eq!(end, TagEnd::Empty);
            assert_eq!(rest.fragment(), &"<x");
        }

        #[test]
        fn open() {
            let (rest, (_, end)) = tag_end(span(">text")).expect("should parse `>`");
            assert_eq!(end, TagEnd::Open);
            assert_eq!(rest.fragment(), &"text");
        }

        #[test]
        #[expect(
            clippy::assertions_on_result_states,
            reason = "we don't care about the result, just that it's an error"
        )]
        fn missing() {
            let result = tag_end(span("name"));
            assert!(result.is_err(), "should not parse a name as a tag end");
        }
    }

    mod close_tag_tests {
        use super::*;

        #[test]
        fn with_inner_whitespace() {
            let (rest, matched) = close_tag(TagName::Model)
                .parse(span("</model >\n"))
                .expect("should parse closing tag");
            assert_eq!(matched.lexeme(), "</model >");
            assert_eq!(rest.fragment(), &"");
        }

        #[test]
        #[expect(
            clippy::assertions_on_result_states,
            reason = "we don't care about the result, just that it's an error"
        )]
        fn wrong_name() {
            let result = close_tag(TagName::Model).parse(span("</component>"));
            assert!(result.is_err(), "should not parse a different closing tag");
        }
    }

    mod attribute_tests {
        use super::*;

        #[test]
        fn double_quoted() {
            let (rest, attribute) =
                attribute(span("name=\"membrane\" id='m'")).expect("should parse attribute");
            assert_eq!(attribute.name.fragment(), &"name");
            assert_eq!(attribute.value.fragment(), &"membrane");
            assert_eq!(rest.fragment(), &"id='m'");
        }

        #[test]
        fn single_quoted_with_spaces() {
            let (_, attribute) =
                attribute(span("id = 'a \"b\"'")).expect("should parse attribute");
            assert_eq!(attribute.value.fragment(), &"a \"b\"");
        }

        #[test]
        fn empty_value() {
            let (_, attribute) = attribute(span("name=\"\"/>")).expect("should parse attribute");
            assert_eq!(attribute.value.fragment(), &"");
        }

        #[test]
        fn missing_value_fails() {
            let error = attribute(span("name/>")).expect_err("should fail without `=`");
            let nom::Err::Failure(error) = error else {
                panic!("expected an unrecoverable error, got {error:?}");
            };
            assert_eq!(error.kind, TokenErrorKind::Expect(ExpectKind::AttributeValue));
        }

        #[test]
        fn unclosed_value() {
            let error = attribute(span("name=\"abc/>")).expect_err("should fail unclosed");
            let nom::Err::Failure(error) = error else {
                panic!("expected an unrecoverable error, got {error:?}");
            };
            assert_eq!(
                error.kind,
                TokenErrorKind::Incomplete(IncompleteKind::UnclosedAttributeValue {
                    open_quote_offset: 5
                })
            );
        }

        #[test]
        fn not_an_attribute() {
            let error = attribute(span("/>")).expect_err("should not parse `/>`");
            assert!(matches!(error, nom::Err::Error(_)));
        }
    }

    #[test]
    fn xml_declaration_with_encoding() {
        let input = span("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<model");
        let (rest, _) = xml_declaration(input).expect("should parse declaration");
        assert_eq!(rest.fragment(), &"<model");
    }

    #[test]
    fn text_until_component_close() {
        let (rest, text) = text_until_close(TagName::Component)
            .parse(span("<math/></component>"))
            .expect("should parse text");
        assert_eq!(text.fragment(), &"<math/>");
        assert_eq!(rest.fragment(), &"</component>");
    }

    #[test]
    #[expect(
        clippy::assertions_on_result_states,
        reason = "we don't care about the result, just that it's an error"
    )]
    fn text_without_close() {
        let result = text_until_close(TagName::Component).parse(span("<math/>"));
        assert!(result.is_err(), "should not parse text without a closing tag");
    }
}
