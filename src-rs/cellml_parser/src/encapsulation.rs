//! Parser for the `<encapsulation>` block.
//!
//! Nested `<component_ref>` tags are read in a loop that keeps the open
//! tags on a stack, so a block of any depth parses without recursion.

use nom::Parser as _;

use crate::{
    attribute,
    error::{ErrorHandlingParser, ParserError, reason::ParserErrorReason},
    token::{
        Token,
        markup::{TagEnd, TagName, close_tag, open_tag, tag_end},
    },
    util::{InputSpan, Result},
};

/// A parsed `<encapsulation>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encapsulation {
    /// Every reference in the block, in pre-order
    pub references: Vec<ComponentRef>,
}

/// A single `<component_ref>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef {
    /// The offset of `<component_ref`
    pub offset: usize,
    /// The value of the `component` attribute
    pub name: Option<String>,
    /// How many `<component_ref>` tags enclose this one
    pub depth: usize,
}

/// Parses an `<encapsulation>` block holding at least one reference.
pub fn parse(input: InputSpan<'_>) -> Result<'_, Encapsulation, ParserError> {
    let (rest, open) = open_tag(TagName::Encapsulation)
        .convert_error_to(ParserError::expect_encapsulation)
        .parse(input)?;

    let (rest, attributes) = attribute::parse(TagName::Encapsulation).parse(rest)?;
    attributes.finish()?;

    let (mut rest, (_, end)) = tag_end
        .or_fail_with(ParserError::missing_tag_end(&open, TagName::Encapsulation))
        .parse(rest)?;

    if end == TagEnd::Empty {
        return Err(nom::Err::Failure(ParserError::new(
            rest.location_offset(),
            ParserErrorReason::encapsulation_missing_reference(open.offset()),
        )));
    }

    let mut references = Vec::new();
    let mut open_references: Vec<Token<'_>> = Vec::new();

    loop {
        match component_ref.parse(rest) {
            Ok((after, (token, name, end))) => {
                rest = after;
                references.push(ComponentRef {
                    offset: token.offset(),
                    name,
                    depth: open_references.len(),
                });
                if end == TagEnd::Open {
                    open_references.push(token);
                }
            }
            Err(nom::Err::Error(error)) => {
                if let Some(reference) = open_references.pop() {
                    (rest, _) = close_tag(TagName::ComponentRef)
                        .or_fail_with(ParserError::unclosed(&reference, TagName::ComponentRef))
                        .parse(rest)?;
                } else if references.is_empty() {
                    return Err(nom::Err::Failure(
                        ParserError::encapsulation_missing_reference(&open)(error),
                    ));
                } else {
                    break;
                }
            }
            Err(error) => return Err(error),
        }
    }

    let (rest, _) = close_tag(TagName::Encapsulation)
        .or_fail_with(ParserError::unclosed(&open, TagName::Encapsulation))
        .parse(rest)?;

    Ok((rest, Encapsulation { references }))
}

/// Parses the start of a `<component_ref>` tag, up to and including `>` or
/// `/>`.
fn component_ref(
    input: InputSpan<'_>,
) -> Result<'_, (Token<'_>, Option<String>, TagEnd), ParserError> {
    let (rest, open) = open_tag(TagName::ComponentRef)
        .convert_error_to(ParserError::expect_component_ref)
        .parse(input)?;

    let (rest, mut attributes) = attribute::parse(TagName::ComponentRef).parse(rest)?;
    let name = attributes.take("component")?.filter(|name| !name.is_empty());
    attributes.finish()?;

    let (rest, (_, end)) = tag_end
        .or_fail_with(ParserError::missing_tag_end(&open, TagName::ComponentRef))
        .parse(rest)?;

    Ok((rest, (open, name, end)))
}
