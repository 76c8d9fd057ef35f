//! Errors raised by the markup tokenizer

use nom::error::ParseError;

use super::{InputSpan, markup::TagName};

pub use super::super::error::ErrorHandlingParser;

/// A tokenizer error and the byte offset it was raised at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenError {
    /// What went wrong
    pub kind: TokenErrorKind,
    /// Byte offset into the document
    pub offset: usize,
}

/// Tokenizer error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenErrorKind {
    /// A particular piece of markup was required
    Expect(ExpectKind),
    /// The input ended inside a construct
    Incomplete(IncompleteKind),
    /// Raw nom error, not yet given a kind
    NomError(nom::error::ErrorKind),
}

/// Markup that a tokenizer requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectKind {
    /// Expected an attribute name
    Attribute,
    /// Expected `=` followed by a quoted value
    AttributeValue,
    /// Expected a closing tag such as `</component>`
    ClosingTag(TagName),
    /// Expected an opening tag such as `<component`
    OpenTag(TagName),
    /// Expected `>` or `/>`
    TagEnd,
    /// Expected character data up to a closing tag
    Text(TagName),
    /// Expected an `<?xml ...?>` declaration
    XmlDeclaration,
}

/// Constructs that can be left open at the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteKind {
    /// Unclosed attribute value
    UnclosedAttributeValue {
        /// The offset of the opening quote
        open_quote_offset: usize,
    },
}

impl TokenError {
    /// Gives a raw nom error its tokenizer kind.
    ///
    /// Panics if the error already has a kind, which means a kind was
    /// assigned twice to the same markup.
    fn update_kind(self, kind: TokenErrorKind) -> Self {
        let is_nom_error = matches!(self.kind, TokenErrorKind::NomError(_));
        assert!(
            is_nom_error,
            "token error kind assigned twice (already {:?})",
            self.kind
        );

        Self { kind, ..self }
    }

    /// An attribute name was missing.
    pub fn expected_attribute(error: Self) -> Self {
        error.update_kind(TokenErrorKind::Expect(ExpectKind::Attribute))
    }

    /// `=` and a quoted value were missing.
    pub fn expected_attribute_value(error: Self) -> Self {
        error.update_kind(TokenErrorKind::Expect(ExpectKind::AttributeValue))
    }

    /// `</name>` was missing.
    pub fn expected_closing_tag(name: TagName) -> impl Fn(Self) -> Self {
        move |error: Self| error.update_kind(TokenErrorKind::Expect(ExpectKind::ClosingTag(name)))
    }

    /// `<name` was missing.
    pub fn expected_open_tag(name: TagName) -> impl Fn(Self) -> Self {
        move |error: Self| error.update_kind(TokenErrorKind::Expect(ExpectKind::OpenTag(name)))
    }

    /// Neither `>` nor `/>` followed the attributes.
    pub fn expected_tag_end(error: Self) -> Self {
        error.update_kind(TokenErrorKind::Expect(ExpectKind::TagEnd))
    }

    /// Character data up to `</name>` was missing.
    pub fn expected_text(name: TagName) -> impl Fn(Self) -> Self {
        move |error: Self| error.update_kind(TokenErrorKind::Expect(ExpectKind::Text(name)))
    }

    /// The `<?xml ...?>` declaration was malformed.
    pub fn expected_xml_declaration(error: Self) -> Self {
        error.update_kind(TokenErrorKind::Expect(ExpectKind::XmlDeclaration))
    }

    /// The value opened at `open_quote_span` has no closing quote.
    pub fn unclosed_attribute_value(open_quote_span: InputSpan<'_>) -> impl Fn(Self) -> Self {
        move |error: Self| {
            let open_quote_offset = open_quote_span.location_offset();
            error.update_kind(TokenErrorKind::Incomplete(
                IncompleteKind::UnclosedAttributeValue { open_quote_offset },
            ))
        }
    }
}

impl ParseError<InputSpan<'_>> for TokenError {
    fn from_error_kind(input: InputSpan<'_>, kind: nom::error::ErrorKind) -> Self {
        Self {
            kind: TokenErrorKind::NomError(kind),
            offset: input.location_offset(),
        }
    }

    fn append(_input: InputSpan<'_>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> From<nom::error::Error<InputSpan<'a>>> for TokenError {
    fn from(error: nom::error::Error<InputSpan<'a>>) -> Self {
        Self::from_error_kind(error.input, error.code)
    }
}
