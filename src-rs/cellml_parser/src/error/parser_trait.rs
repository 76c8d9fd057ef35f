use nom::{Parser, error::ParseError};

/// Error conversions for nom parsers.
///
/// Token parsers fail with [`TokenError`](crate::token::error::TokenError)
/// while element parsers fail with [`ParserError`](super::ParserError). These
/// methods move a parser from one error type to the other and decide whether
/// a failure can be backtracked from.
///
/// In every method an unrecoverable error (`nom::Err::Failure`) is carried
/// over unchanged through `From`, since it has already been given its final
/// reason further down.
pub trait ErrorHandlingParser<I, O, E>: Parser<I, Output = O, Error = E>
where
    E: ParseError<I>,
{
    /// Converts recoverable errors with `convert_error`, keeping them
    /// recoverable.
    ///
    /// ```ignore
    /// let parser = open_tag(TagName::Component).convert_error_to(ParserError::expect_component);
    /// ```
    fn convert_error_to<E2>(
        self,
        convert_error: impl Fn(E) -> E2,
    ) -> impl Parser<I, Output = O, Error = E2>
    where
        Self: Sized,
        E2: ParseError<I> + From<E>,
    {
        map_errors(self, move |error| nom::Err::Error(convert_error(error)))
    }

    /// Converts recoverable errors with `convert_error` and makes them
    /// unrecoverable.
    ///
    /// Used once enough of an element has been seen that no other
    /// alternative could match.
    ///
    /// ```ignore
    /// let parser = close_tag(TagName::Model).or_fail_with(ParserError::unclosed(&open, TagName::Model));
    /// ```
    fn or_fail_with<E2>(
        self,
        convert_error: impl Fn(E) -> E2,
    ) -> impl Parser<I, Output = O, Error = E2>
    where
        Self: Sized,
        E2: ParseError<I> + From<E>,
    {
        map_errors(self, move |error| nom::Err::Failure(convert_error(error)))
    }

    /// Converts every error through `From`.
    fn convert_errors<E2>(self) -> impl Parser<I, Output = O, Error = E2>
    where
        Self: Sized,
        E2: ParseError<I> + From<E>,
    {
        map_errors(self, |error: E| nom::Err::Error(error.into()))
    }
}

impl<I, O, E, P> ErrorHandlingParser<I, O, E> for P
where
    P: Parser<I, Output = O, Error = E>,
    E: ParseError<I>,
{
}

/// Applies `on_error` to recoverable errors and `From` to failures.
fn map_errors<I, O, E, E2>(
    mut parser: impl Parser<I, Output = O, Error = E>,
    on_error: impl Fn(E) -> nom::Err<E2>,
) -> impl Parser<I, Output = O, Error = E2>
where
    E: ParseError<I>,
    E2: ParseError<I> + From<E>,
{
    move |input| {
        parser.parse(input).map_err(|error| match error {
            nom::Err::Error(error) => on_error(error),
            nom::Err::Failure(error) => nom::Err::Failure(error.into()),
            nom::Err::Incomplete(needed) => nom::Err::Incomplete(needed),
        })
    }
}
