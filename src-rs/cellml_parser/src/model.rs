//! Parsers for whole documents: a `<model>` element or a bare list of
//! components.

use nom::{
    Parser as _,
    combinator::{all_consuming, opt},
    multi::{many0, many1},
};

use crate::{
    attribute,
    component::{self, ComponentDecl},
    encapsulation::{self, Encapsulation},
    error::{ErrorHandlingParser, ParserError},
    token::{
        markup::{TagEnd, TagName, close_tag, open_tag, tag_end, xml_declaration},
        whitespace,
    },
    util::{InputSpan, Result},
};

/// A parsed `<model>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDecl {
    /// The `name` attribute
    pub name: Option<String>,
    /// The `id` attribute
    pub id: Option<String>,
    /// The component tags, in order
    pub body: Body,
}

/// The component tags of a document and the block that arranges them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    /// The component tags, in order
    pub components: Vec<ComponentDecl>,
    /// The encapsulation block, if there is one
    pub encapsulation: Option<Encapsulation>,
}

/// Parses a complete document holding a single `<model>` element.
///
/// An XML declaration may come first. Whitespace around the element is
/// ignored, anything else is an error.
pub fn parse_complete(input: InputSpan<'_>) -> Result<'_, ModelDecl, ParserError> {
    all_consuming(model).parse(input)
}

/// Parses a complete document holding one or more `<component>` elements,
/// optionally followed by an `<encapsulation>` block.
pub fn parse_fragment_complete(input: InputSpan<'_>) -> Result<'_, Body, ParserError> {
    all_consuming(fragment).parse(input)
}

fn model(input: InputSpan<'_>) -> Result<'_, ModelDecl, ParserError> {
    let (rest, _) = whitespace.convert_errors().parse(input)?;
    let (rest, _) = opt(xml_declaration).convert_errors().parse(rest)?;

    let (rest, open) = open_tag(TagName::Model)
        .convert_error_to(ParserError::expect_model)
        .parse(rest)?;

    let (rest, mut attributes) = attribute::parse(TagName::Model).parse(rest)?;
    // the namespace is written on output but not checked on input
    attributes.take("xmlns")?;
    let name = attributes.take("name")?;
    let id = attributes.take("id")?;
    attributes.finish()?;

    let (rest, (_, end)) = tag_end
        .or_fail_with(ParserError::missing_tag_end(&open, TagName::Model))
        .parse(rest)?;

    let (rest, body) = match end {
        TagEnd::Empty => (rest, Body::default()),
        TagEnd::Open => {
            let (rest, components) = many0(component::parse).parse(rest)?;
            let (rest, encapsulation) = opt(encapsulation::parse).parse(rest)?;
            let (rest, _) = close_tag(TagName::Model)
                .or_fail_with(ParserError::unclosed(&open, TagName::Model))
                .parse(rest)?;
            (
                rest,
                Body {
                    components,
                    encapsulation,
                },
            )
        }
    };

    Ok((rest, ModelDecl { name, id, body }))
}

fn fragment(input: InputSpan<'_>) -> Result<'_, Body, ParserError> {
    let (rest, _) = whitespace.convert_errors().parse(input)?;
    let (rest, components) = many1(component::parse).parse(rest)?;
    let (rest, encapsulation) = opt(encapsulation::parse).parse(rest)?;

    Ok((
        rest,
        Body {
            components,
            encapsulation,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Config,
        error::reason::{ExpectKind, IncompleteKind, ParserErrorReason},
    };

    fn span(input: &str) -> InputSpan<'_> {
        InputSpan::new_extra(input, Config::default())
    }

    mod model_tests {
        use super::*;

        #[test]
        fn empty_model() {
            let input = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                <model xmlns=\"http://www.cellml.org/cellml/2.0#\" name=\"m\"/>\n";
            let (_, model) = parse_complete(span(input)).expect("should parse model");
            assert_eq!(model.name.as_deref(), Some("m"));
            assert_eq!(model.id, None);
            assert_eq!(model.body, Body::default());
        }

        #[test]
        fn without_declaration() {
            let input = "  <model id=\"x\"></model>";
            let (_, model) = parse_complete(span(input)).expect("should parse model");
            assert_eq!(model.name, None);
            assert_eq!(model.id.as_deref(), Some("x"));
        }

        #[test]
        fn components_and_encapsulation() {
            let input = "<model><component name=\"a\"/><component name=\"b\"/>\
                <encapsulation><component_ref component=\"a\">\
                <component_ref component=\"b\"/></component_ref></encapsulation></model>";
            let (_, model) = parse_complete(span(input)).expect("should parse model");
            assert_eq!(model.body.components.len(), 2);
            let encapsulation = model
                .body
                .encapsulation
                .expect("should have an encapsulation block");
            assert_eq!(encapsulation.references.len(), 2);
            assert_eq!(encapsulation.references[1].depth, 1);
        }

        #[test]
        fn trailing_content() {
            let error = parse_complete(span("<model/><model/>"))
                .expect_err("should reject a second model");
            let nom::Err::Error(error) = error else {
                panic!("expected a recoverable error, got {error:?}");
            };
            assert_eq!(error.error_offset, 8);
            assert_eq!(error.reason, ParserErrorReason::UnexpectedToken);
        }

        #[test]
        fn unclosed_model() {
            let error = parse_complete(span("<model>\n<component/>"))
                .expect_err("should reject unclosed model");
            let nom::Err::Failure(error) = error else {
                panic!("expected an unrecoverable error, got {error:?}");
            };
            assert_eq!(
                error.reason,
                ParserErrorReason::Incomplete {
                    cause: 0,
                    kind: IncompleteKind::Unclosed(TagName::Model),
                }
            );
        }

        #[test]
        fn component_after_encapsulation() {
            let input = "<model><encapsulation><component_ref/></encapsulation>\
                <component/></model>";
            let error = parse_complete(span(input)).expect_err("should reject late component");
            let nom::Err::Failure(error) = error else {
                panic!("expected an unrecoverable error, got {error:?}");
            };
            assert_eq!(error.error_offset, 54);
        }

        #[test]
        fn not_a_model() {
            let error = parse_complete(span("<component/>")).expect_err("should reject");
            let nom::Err::Error(error) = error else {
                panic!("expected a recoverable error, got {error:?}");
            };
            assert_eq!(error.reason, ParserErrorReason::Expect(ExpectKind::Model));
        }
    }

    mod fragment_tests {
        use super::*;

        #[test]
        fn single_component() {
            let (_, body) = parse_fragment_complete(span("\n<component name=\"a\"/>\n"))
                .expect("should parse fragment");
            assert_eq!(body.components.len(), 1);
            assert_eq!(body.encapsulation, None);
        }

        #[test]
        fn with_encapsulation() {
            let input = "<component name=\"a\"/><component name=\"b\"/>\
                <encapsulation><component_ref component=\"a\">\
                <component_ref component=\"b\"/></component_ref></encapsulation>";
            let (_, body) = parse_fragment_complete(span(input)).expect("should parse fragment");
            assert_eq!(body.components.len(), 2);
            assert!(body.encapsulation.is_some());
        }

        #[test]
        fn empty_input() {
            let error = parse_fragment_complete(span("  ")).expect_err("should reject");
            let nom::Err::Error(error) = error else {
                panic!("expected a recoverable error, got {error:?}");
            };
            assert_eq!(error.error_offset, 2);
            assert_eq!(error.reason, ParserErrorReason::Expect(ExpectKind::Component));
        }
    }
}
