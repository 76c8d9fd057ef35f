//! Attribute lists of start tags.

use indexmap::{IndexMap, map::Entry};
use nom::{Parser as _, multi::many0};

use crate::{
    error::{ErrorHandlingParser, ParserError},
    token::{
        markup::{TagName, attribute},
        text::unescape,
    },
    util::{InputSpan, Parser},
};

/// The attributes of one start tag, in the order they were written.
#[derive(Debug)]
pub struct Attributes<'a> {
    element: TagName,
    /// Name offset and raw value, keyed by name
    values: IndexMap<&'a str, (usize, InputSpan<'a>)>,
}

/// Parses the attributes of a start tag of `element`.
///
/// Fails if the same attribute is given twice.
pub fn parse<'a>(element: TagName) -> impl Parser<'a, Attributes<'a>, ParserError> {
    move |input: InputSpan<'a>| {
        let (rest, parsed) = many0(attribute).convert_errors().parse(input)?;

        let mut values = IndexMap::with_capacity(parsed.len());

        for attribute in parsed {
            let name = *attribute.name.fragment();
            let offset = attribute.name.location_offset();

            match values.entry(name) {
                Entry::Occupied(original) => {
                    let (original_offset, _) = *original.get();
                    return Err(nom::Err::Failure(ParserError::duplicate_attribute(
                        offset,
                        name,
                        original_offset,
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert((offset, attribute.value));
                }
            }
        }

        Ok((rest, Attributes { element, values }))
    }
}

impl Attributes<'_> {
    /// Removes the attribute called `name` and returns its decoded value.
    pub fn take(&mut self, name: &str) -> Result<Option<String>, nom::Err<ParserError>> {
        let Some((_, value)) = self.values.shift_remove(name) else {
            return Ok(None);
        };

        match unescape(value.fragment()) {
            Ok(decoded) => Ok(Some(decoded.into_owned())),
            Err(index) => Err(nom::Err::Failure(ParserError::unknown_entity(
                value.location_offset() + index,
            ))),
        }
    }

    /// Fails on the first attribute that was not taken.
    pub fn finish(self) -> Result<(), nom::Err<ParserError>> {
        match self.values.first() {
            Some((name, (offset, _))) => Err(nom::Err::Failure(ParserError::unknown_attribute(
                *offset,
                self.element,
                name,
            ))),
            None => Ok(()),
        }
    }
}
