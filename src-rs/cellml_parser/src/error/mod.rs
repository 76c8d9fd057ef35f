//! Error handling for the CellML parser.

use std::fmt;

use cellml_shared::error::{AsCellmlError, Context, ErrorLocation};

use crate::{
    InputSpan,
    token::{
        Token,
        error::{TokenError, TokenErrorKind},
        markup::TagName,
    },
};

mod context;

mod display;

pub mod reason;
use reason::ParserErrorReason;

mod parser_trait;
pub use parser_trait::ErrorHandlingParser;

/// An error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    /// The location in the source where the error occurred
    pub error_offset: usize,
    /// The reason for the error
    pub reason: ParserErrorReason,
}

impl ParserError {
    /// Creates a new `ParserError` at `error_offset`
    #[must_use]
    pub const fn new(error_offset: usize, reason: ParserErrorReason) -> Self {
        Self {
            error_offset,
            reason,
        }
    }

    /// Converts the error kind to a new kind
    ///
    /// Only errors that say something was expected may be converted; any
    /// other reason is already final.
    fn convert_reason(self, reason: ParserErrorReason) -> Self {
        let is_token_expect_error = matches!(
            self.reason,
            ParserErrorReason::TokenError(TokenErrorKind::Expect(_))
        );

        let is_parser_expect_error = matches!(self.reason, ParserErrorReason::Expect(_));

        assert!(
            is_token_expect_error || is_parser_expect_error,
            "Cannot convert a non-expect error to a parser error (attempted to convert {:?} to {:?})",
            self.reason,
            reason,
        );

        Self { reason, ..self }
    }

    /// Creates a new `ParserError` from a `TokenError` with a specific reason
    const fn new_from_token_error(error: TokenError, reason: ParserErrorReason) -> Self {
        Self::new(error.offset, reason)
    }

    /// Creates a new `ParserError` for an expected component
    pub(crate) const fn expect_component(error: TokenError) -> Self {
        Self::new_from_token_error(error, ParserErrorReason::expect_component())
    }

    /// Creates a new `ParserError` for an expected component reference
    pub(crate) const fn expect_component_ref(error: TokenError) -> Self {
        Self::new_from_token_error(error, ParserErrorReason::expect_component_ref())
    }

    /// Creates a new `ParserError` for an expected encapsulation block
    pub(crate) const fn expect_encapsulation(error: TokenError) -> Self {
        Self::new_from_token_error(error, ParserErrorReason::expect_encapsulation())
    }

    /// Creates a new `ParserError` for an expected model
    pub(crate) const fn expect_model(error: TokenError) -> Self {
        Self::new_from_token_error(error, ParserErrorReason::expect_model())
    }

    /// Creates a new `ParserError` for an expected variable
    pub(crate) const fn expect_variable(error: TokenError) -> Self {
        Self::new_from_token_error(error, ParserErrorReason::expect_variable())
    }

    /// Creates a new `ParserError` for a start tag that is not ended
    pub(crate) fn missing_tag_end(
        open_tag: &Token<'_>,
        element: TagName,
    ) -> impl Fn(TokenError) -> Self {
        let open_tag_offset = open_tag.offset();
        move |error| {
            Self::new_from_token_error(
                error,
                ParserErrorReason::missing_tag_end(open_tag_offset, element),
            )
        }
    }

    /// Creates a new `ParserError` for an element that is not closed
    pub(crate) fn unclosed(open_tag: &Token<'_>, element: TagName) -> impl Fn(TokenError) -> Self {
        let open_tag_offset = open_tag.offset();
        move |error| {
            Self::new_from_token_error(error, ParserErrorReason::unclosed(open_tag_offset, element))
        }
    }

    /// Creates a new `ParserError` for an encapsulation block with no
    /// references in it
    pub(crate) fn encapsulation_missing_reference(open_tag: &Token<'_>) -> impl Fn(Self) -> Self {
        let open_tag_offset = open_tag.offset();
        move |error| {
            error.convert_reason(ParserErrorReason::encapsulation_missing_reference(
                open_tag_offset,
            ))
        }
    }

    /// Creates a new `ParserError` for an attribute the element does not have
    pub(crate) fn unknown_attribute(offset: usize, element: TagName, name: &str) -> Self {
        Self::new(
            offset,
            ParserErrorReason::UnknownAttribute {
                element,
                name: name.to_string(),
            },
        )
    }

    /// Creates a new `ParserError` for an attribute given twice
    pub(crate) fn duplicate_attribute(offset: usize, name: &str, original_offset: usize) -> Self {
        Self::new(
            offset,
            ParserErrorReason::DuplicateAttribute {
                name: name.to_string(),
                original_offset,
            },
        )
    }

    /// Creates a new `ParserError` for an entity that cannot be decoded
    pub(crate) const fn unknown_entity(offset: usize) -> Self {
        Self::new(offset, ParserErrorReason::UnknownEntity)
    }

    /// Creates a new `ParserError` for a reference naming the wrong component
    pub(crate) fn reference_mismatch(
        offset: usize,
        expected: Option<&str>,
        found: Option<&str>,
    ) -> Self {
        Self::new(
            offset,
            ParserErrorReason::ReferenceMismatch {
                expected: expected.map(str::to_string),
                found: found.map(str::to_string),
            },
        )
    }

    /// Creates a new `ParserError` for a component with no reference
    pub(crate) const fn missing_reference(offset: usize) -> Self {
        Self::new(offset, ParserErrorReason::MissingReference)
    }

    /// Creates a new `ParserError` for a reference with no component
    pub(crate) const fn extra_reference(offset: usize) -> Self {
        Self::new(offset, ParserErrorReason::ExtraReference)
    }

    /// Creates a new `ParserError` for a second top-level component
    pub(crate) const fn multiple_roots(offset: usize) -> Self {
        Self::new(offset, ParserErrorReason::MultipleRoots)
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for ParserError {}

impl<'a> nom::error::ParseError<InputSpan<'a>> for ParserError {
    fn from_error_kind(input: InputSpan<'a>, kind: nom::error::ErrorKind) -> Self {
        #[expect(
            clippy::wildcard_enum_match_arm,
            reason = "this will only ever care about the EOF error kind"
        )]
        let reason = match kind {
            // `all_consuming` reports leftover input as `Eof`
            nom::error::ErrorKind::Eof => ParserErrorReason::unexpected_token(),
            _ => ParserErrorReason::nom_error(kind),
        };

        Self {
            reason,
            error_offset: input.location_offset(),
        }
    }

    fn append(_input: InputSpan<'a>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

/// Implements conversion from `TokenError` to `ParserError`.
///
/// This allows token-level errors to be converted into parser-level errors
/// while preserving the error information.
impl From<TokenError> for ParserError {
    fn from(e: TokenError) -> Self {
        Self {
            reason: ParserErrorReason::token_error(e.kind),
            error_offset: e.offset,
        }
    }
}

impl AsCellmlError for ParserError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn error_location(&self, source: &str) -> Option<ErrorLocation> {
        let location = ErrorLocation::from_source_and_offset(source, self.error_offset);
        Some(location)
    }

    fn context_with_source(&self, source: &str) -> Vec<(Context, Option<ErrorLocation>)> {
        context::from_source(&self.reason, source)
    }
}
