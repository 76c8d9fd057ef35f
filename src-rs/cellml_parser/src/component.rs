//! Parser for `<component>` tags and the `<variable>` tags they hold.

use cellml_component::{Component, Variable};
use nom::{Parser as _, multi::many0};

use crate::{
    attribute,
    error::{ErrorHandlingParser, ParserError},
    token::markup::{TagEnd, TagName, close_tag, open_tag, tag_end, text_until_close},
    util::{InputSpan, Result},
};

/// A component tag together with where it starts in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDecl {
    /// The offset of `<component`
    pub offset: usize,
    /// The parsed component, with no children yet
    pub component: Component,
}

/// Parses a `<component>` element.
///
/// Anything other than `<variable>` tags inside the element is kept as the
/// component's math, with surrounding whitespace removed.
pub fn parse(input: InputSpan<'_>) -> Result<'_, ComponentDecl, ParserError> {
    let (rest, open) = open_tag(TagName::Component)
        .convert_error_to(ParserError::expect_component)
        .parse(input)?;

    let (rest, mut attributes) = attribute::parse(TagName::Component).parse(rest)?;

    let mut component = Component::new();
    if let Some(name) = attributes.take("name")? {
        component.set_name(name);
    }
    if let Some(id) = attributes.take("id")? {
        component.set_id(id);
    }
    attributes.finish()?;

    let (rest, (_, end)) = tag_end
        .or_fail_with(ParserError::missing_tag_end(&open, TagName::Component))
        .parse(rest)?;

    let rest = match end {
        TagEnd::Empty => rest,
        TagEnd::Open => {
            let (rest, variables) = many0(variable).parse(rest)?;
            for variable in variables {
                component.add_variable(variable);
            }

            let (rest, math) = text_until_close(TagName::Component)
                .or_fail_with(ParserError::unclosed(&open, TagName::Component))
                .parse(rest)?;
            component.set_math(*math.fragment());

            let (rest, _) = close_tag(TagName::Component)
                .or_fail_with(ParserError::unclosed(&open, TagName::Component))
                .parse(rest)?;
            rest
        }
    };

    Ok((
        rest,
        ComponentDecl {
            offset: open.offset(),
            component,
        },
    ))
}

fn variable(input: InputSpan<'_>) -> Result<'_, Variable, ParserError> {
    let (rest, open) = open_tag(TagName::Variable)
        .convert_error_to(ParserError::expect_variable)
        .parse(input)?;

    let (rest, mut attributes) = attribute::parse(TagName::Variable).parse(rest)?;

    let mut variable = Variable::new(attributes.take("name")?.unwrap_or_default());
    if let Some(units) = attributes.take("units")? {
        variable.set_units(units);
    }
    if let Some(initial_value) = attributes.take("initial_value")? {
        variable.set_initial_value(initial_value);
    }
    if let Some(id) = attributes.take("id")? {
        variable = variable.with_id(id);
    }
    attributes.finish()?;

    let (rest, (_, end)) = tag_end
        .or_fail_with(ParserError::missing_tag_end(&open, TagName::Variable))
        .parse(rest)?;

    // variables carry no content, but `<variable ...></variable>` is accepted
    let rest = match end {
        TagEnd::Empty => rest,
        TagEnd::Open => {
            let (rest, _) = close_tag(TagName::Variable)
                .or_fail_with(ParserError::unclosed(&open, TagName::Variable))
                .parse(rest)?;
            rest
        }
    };

    Ok((rest, variable))
}
