use std::fmt;

use crate::{
    error::reason::{ExpectKind, IncompleteKind, ParserErrorReason},
    token::error::{
        ExpectKind as TokenExpectKind, IncompleteKind as TokenIncompleteKind, TokenErrorKind,
    },
};

pub fn reason_to_string(reason: &ParserErrorReason) -> String {
    match reason {
        ParserErrorReason::Expect(expect_kind) => match expect_kind {
            ExpectKind::Component => "expected `<component>`".to_string(),
            ExpectKind::ComponentRef => "expected `<component_ref>`".to_string(),
            ExpectKind::Encapsulation => "expected `<encapsulation>`".to_string(),
            ExpectKind::Model => "expected `<model>`".to_string(),
            ExpectKind::Variable => "expected `<variable>`".to_string(),
        },
        ParserErrorReason::Incomplete { cause: _, kind } => match kind {
            IncompleteKind::MissingTagEnd(element) => {
                format!("expected `>` or `/>` to end the `<{}>` tag", element.as_str())
            }
            IncompleteKind::Unclosed(element) => {
                format!("expected `</{}>`", element.as_str())
            }
            IncompleteKind::EncapsulationMissingReference => {
                "expected `<component_ref>` inside `<encapsulation>`".to_string()
            }
        },
        ParserErrorReason::UnexpectedToken => "unexpected token".to_string(),
        ParserErrorReason::UnknownAttribute { element, name } => {
            format!(
                "unexpected attribute `{name}` on `<{}>`",
                element.as_str()
            )
        }
        ParserErrorReason::DuplicateAttribute {
            name,
            original_offset: _,
        } => format!("attribute `{name}` is defined multiple times"),
        ParserErrorReason::UnknownEntity => "unknown character entity".to_string(),
        ParserErrorReason::ReferenceMismatch { expected, found } => {
            format!(
                "`component_ref` refers to {} but the matching component is {}",
                describe_name(found.as_deref()),
                describe_name(expected.as_deref())
            )
        }
        ParserErrorReason::MissingReference => {
            "component has no matching `<component_ref>`".to_string()
        }
        ParserErrorReason::ExtraReference => {
            "`<component_ref>` has no matching component".to_string()
        }
        ParserErrorReason::MultipleRoots => "expected a single top-level component".to_string(),
        ParserErrorReason::TokenError(token_error_kind) => match token_error_kind {
            TokenErrorKind::Expect(expect_kind) => match expect_kind {
                TokenExpectKind::Attribute => "expected attribute name".to_string(),
                TokenExpectKind::AttributeValue => {
                    "expected `=` followed by a quoted value".to_string()
                }
                TokenExpectKind::ClosingTag(element) => {
                    format!("expected `</{}>`", element.as_str())
                }
                TokenExpectKind::OpenTag(element) => format!("expected `<{}>`", element.as_str()),
                TokenExpectKind::TagEnd => "expected `>` or `/>`".to_string(),
                TokenExpectKind::Text(element) => {
                    format!("expected content ending in `</{}>`", element.as_str())
                }
                TokenExpectKind::XmlDeclaration => "expected `<?xml ... ?>`".to_string(),
            },
            TokenErrorKind::Incomplete(incomplete_kind) => match incomplete_kind {
                TokenIncompleteKind::UnclosedAttributeValue {
                    open_quote_offset: _,
                } => "unclosed attribute value".to_string(),
            },
            TokenErrorKind::NomError(error_kind) => {
                format!("unexpected token error `{error_kind:?}`")
            }
        },
        ParserErrorReason::NomError(error_kind) => {
            format!("unexpected nom parser error `{error_kind:?}`")
        }
    }
}

fn describe_name(name: Option<&str>) -> String {
    name.map_or_else(
        || "an unnamed component".to_string(),
        |name| format!("`{name}`"),
    )
}

impl fmt::Display for ParserErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&reason_to_string(self))
    }
}
