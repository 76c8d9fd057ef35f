use nom::{Parser as NomParser, character::complete::multispace0, combinator::recognize};

use crate::token::{
    InputSpan, Parser, Result,
    error::{ErrorHandlingParser, TokenError},
};

/// A token representing a lexical element of the markup, such as
/// `<component` or `/>`.
///
/// The whitespace after the lexeme is consumed with it but not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    lexeme: InputSpan<'a>,
}

impl<'a> Token<'a> {
    /// Creates a token from its lexeme.
    pub const fn new(lexeme: InputSpan<'a>) -> Self {
        Self { lexeme }
    }

    /// Returns the text of the lexeme.
    #[cfg(test)]
    pub fn lexeme(&self) -> &'a str {
        self.lexeme.fragment()
    }

    /// Returns the offset of the start of the lexeme.
    pub fn offset(&self) -> usize {
        self.lexeme.location_offset()
    }
}

/// Parses whitespace, including line breaks, and returns the parsed whitespace.
///
/// This function consumes any amount of whitespace (including none) and always succeeds.
pub fn whitespace(input: InputSpan<'_>) -> Result<'_, InputSpan<'_>, TokenError> {
    multispace0.parse(input)
}

/// Wraps a parser to handle trailing whitespace after the matched content.
///
/// This function takes a parser `f` and returns a new parser that:
/// 1. Recognizes the content matched by `f`
/// 2. Consumes any trailing whitespace after the match
/// 3. Returns the matched content, without the whitespace, as a `Token`
///
/// Errors from `f` are passed through `convert_error`.
pub fn token<'a, O>(
    mut f: impl Parser<'a, O, TokenError>,
    convert_error: impl Fn(TokenError) -> TokenError,
) -> impl Parser<'a, Token<'a>, TokenError> {
    move |input| {
        // capture the parser and convert the error function
        let f = |input| (&mut f).parse(input);
        let convert_error = |error| (&convert_error)(error);

        let (rest, lexeme) = recognize(f).convert_error_to(convert_error).parse(input)?;
        let (rest, _) = whitespace.parse(rest)?;

        Ok((rest, Token::new(lexeme)))
    }
}
