use cellml_shared::error::{Context, ErrorLocation};

use crate::{
    error::reason::{IncompleteKind, ParserErrorReason},
    token::error::{IncompleteKind as TokenIncompleteKind, TokenErrorKind},
};

pub fn from_source(reason: &ParserErrorReason, source: &str) -> Vec<(Context, Option<ErrorLocation>)> {
    [
        opened_here(reason, source),
        first_definition(reason, source),
        reference_order(reason),
        single_root(reason),
        supported_entities(reason),
    ]
    .into_iter()
    .flatten() // get rid of any None values
    .collect()
}

fn opened_here(reason: &ParserErrorReason, source: &str) -> Option<(Context, Option<ErrorLocation>)> {
    let (message, offset) = match reason {
        ParserErrorReason::Incomplete { cause, kind } => {
            let message = match kind {
                IncompleteKind::MissingTagEnd(element) | IncompleteKind::Unclosed(element) => {
                    format!("`<{}>` opened here", element.as_str())
                }
                IncompleteKind::EncapsulationMissingReference => {
                    "`<encapsulation>` opened here".to_string()
                }
            };
            (message, *cause)
        }
        ParserErrorReason::TokenError(TokenErrorKind::Incomplete(
            TokenIncompleteKind::UnclosedAttributeValue { open_quote_offset },
        )) => ("attribute value opened here".to_string(), *open_quote_offset),
        ParserErrorReason::Expect(_)
        | ParserErrorReason::UnexpectedToken
        | ParserErrorReason::UnknownAttribute { .. }
        | ParserErrorReason::DuplicateAttribute { .. }
        | ParserErrorReason::UnknownEntity
        | ParserErrorReason::ReferenceMismatch { .. }
        | ParserErrorReason::MissingReference
        | ParserErrorReason::ExtraReference
        | ParserErrorReason::MultipleRoots
        | ParserErrorReason::TokenError(_)
        | ParserErrorReason::NomError(_) => return None,
    };

    let location = ErrorLocation::from_source_and_offset(source, offset);
    Some((Context::Note(message), Some(location)))
}

fn first_definition(
    reason: &ParserErrorReason,
    source: &str,
) -> Option<(Context, Option<ErrorLocation>)> {
    let ParserErrorReason::DuplicateAttribute {
        name,
        original_offset,
    } = reason
    else {
        return None;
    };

    let location = ErrorLocation::from_source_and_span(source, *original_offset, name.len());
    Some((
        Context::Note("first defined here".to_string()),
        Some(location),
    ))
}

fn reference_order(reason: &ParserErrorReason) -> Option<(Context, Option<ErrorLocation>)> {
    let is_reference_error = matches!(
        reason,
        ParserErrorReason::ReferenceMismatch { .. }
            | ParserErrorReason::MissingReference
            | ParserErrorReason::ExtraReference
    );

    is_reference_error.then(|| {
        let message = "`<component_ref>` tags are matched with `<component>` tags in the order both appear";
        (Context::Note(message.to_string()), None)
    })
}

fn single_root(reason: &ParserErrorReason) -> Option<(Context, Option<ErrorLocation>)> {
    matches!(reason, ParserErrorReason::MultipleRoots).then(|| {
        let message = "put the components in a `<model>` to keep more than one at the top level";
        (Context::Help(message.to_string()), None)
    })
}

fn supported_entities(reason: &ParserErrorReason) -> Option<(Context, Option<ErrorLocation>)> {
    matches!(reason, ParserErrorReason::UnknownEntity).then(|| {
        let message = "supported entities are `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;` and numeric character references";
        (Context::Note(message.to_string()), None)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::markup::TagName;

    #[test]
    fn unclosed_points_at_open_tag() {
        let source = "<model>\n<component/>";
        let reason = ParserErrorReason::unclosed(0, TagName::Model);

        let context = from_source(&reason, source);
        assert_eq!(context.len(), 1);

        let (note, location) = &context[0];
        assert_eq!(note, &Context::Note("`<model>` opened here".to_string()));
        let location = location.as_ref().expect("should have a location");
        assert_eq!(location.line(), 1);
        assert_eq!(location.column(), 1);
    }

    #[test]
    fn duplicate_attribute_points_at_first() {
        let source = "<component name=\"a\" name=\"b\"/>";
        let reason = ParserErrorReason::DuplicateAttribute {
            name: "name".to_string(),
            original_offset: 11,
        };

        let context = from_source(&reason, source);
        let (_, location) = &context[0];
        let location = location.as_ref().expect("should have a location");
        assert_eq!(location.column(), 12);
        assert_eq!(location.length(), 4);
    }

    #[test]
    fn reference_errors_explain_matching() {
        let context = from_source(&ParserErrorReason::ExtraReference, "");
        assert_eq!(context.len(), 1);
        assert!(context[0].1.is_none());
    }

    #[test]
    fn unexpected_token_has_no_context() {
        assert!(from_source(&ParserErrorReason::UnexpectedToken, "x").is_empty());
    }
}
