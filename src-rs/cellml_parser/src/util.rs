use nom::{IResult, Parser as NomParser, error::Error};
use nom_locate::LocatedSpan;

use super::config::Config;

/// The remaining markup, tagged with its byte offset into the document.
///
/// The parser configuration rides along as the span's extra data.
pub type InputSpan<'a> = LocatedSpan<&'a str, Config>;

/// `IResult` over [`InputSpan`].
pub type Result<'a, O, E = Error<InputSpan<'a>>> = IResult<InputSpan<'a>, O, E>;

/// Shorthand for a nom parser that consumes an [`InputSpan`].
///
/// Every `nom::Parser` over [`InputSpan`] implements this.
pub trait Parser<'a, O, E = Error<InputSpan<'a>>>:
    NomParser<InputSpan<'a>, Output = O, Error = E>
{
}

impl<'a, O, E, P> Parser<'a, O, E> for P where P: NomParser<InputSpan<'a>, Output = O, Error = E> {}
