#![cfg_attr(doc, doc = include_str!("../README.md"))]
//! Parser for serialised CellML component hierarchies

use cellml_component::{ComponentId, ComponentTree, Model};

mod config;
pub mod error;
mod token;

mod util;
use util::{InputSpan, Result as InternalResult};

mod attribute;
mod build;
mod component;
mod encapsulation;
mod model;

pub use config::Config;

/// Parses a document holding one or more components, optionally followed by
/// an `<encapsulation>` block, as produced by
/// [`ComponentTree::serialise`].
///
/// Returns the tree and its top-level components in document order.
///
/// # Errors
///
/// Returns an error if the input is not well formed or if the encapsulation
/// block does not line up with the component tags.
pub fn parse_components(
    input: &str,
    config: Option<Config>,
) -> Result<(ComponentTree, Vec<ComponentId>), error::ParserError> {
    let config = config.unwrap_or_default();
    let body = parse(input, config, model::parse_fragment_complete)?;

    let mut tree = ComponentTree::new();
    let roots = build::assemble(&mut tree, body, config)?;
    tracing::debug!(components = tree.len(), roots = roots.len(), "parsed components");

    Ok((tree, roots.into_iter().map(|root| root.id).collect()))
}

/// Parses a document holding a single top-level component and everything it
/// encapsulates.
///
/// # Errors
///
/// Returns an error under the same conditions as [`parse_components`], or
/// if there is more than one top-level component.
pub fn parse_component(
    input: &str,
    config: Option<Config>,
) -> Result<(ComponentTree, ComponentId), error::ParserError> {
    let config = config.unwrap_or_default();
    let body = parse(input, config, model::parse_fragment_complete)?;

    let mut tree = ComponentTree::new();
    let roots = build::assemble(&mut tree, body, config)?;

    match roots.as_slice() {
        [root] => Ok((tree, root.id)),
        [_, second, ..] => Err(error::ParserError::multiple_roots(second.offset)),
        [] => Err(error::ParserError::new(
            0,
            error::reason::ParserErrorReason::Expect(error::reason::ExpectKind::Component),
        )),
    }
}

/// Parses a complete `<model>` document, as produced by
/// [`Model::serialise`].
///
/// # Errors
///
/// Returns an error if the input is not well formed or if the encapsulation
/// block does not line up with the component tags.
pub fn parse_model(input: &str, config: Option<Config>) -> Result<Model, error::ParserError> {
    let config = config.unwrap_or_default();
    let decl = parse(input, config, model::parse_complete)?;

    let mut model = Model::new();
    if let Some(name) = decl.name {
        model.set_name(name);
    }
    if let Some(id) = decl.id {
        model.set_id(id);
    }

    let roots = build::assemble(model.tree_mut(), decl.body, config)?;
    for root in roots {
        model.add_component(root.id);
    }
    tracing::debug!(
        components = model.tree().len(),
        roots = model.component_count(),
        "parsed model"
    );

    Ok(model)
}

/// Internal parsing function that handles the common parsing logic.
fn parse<T, E>(
    input: &str,
    config: Config,
    parser: impl Fn(InputSpan<'_>) -> InternalResult<'_, T, E>,
) -> Result<T, E> {
    let input = InputSpan::new_extra(input, config);
    let result = parser(input);

    match result {
        Ok((_rest, parsed)) => Ok(parsed),
        Err(nom::Err::Incomplete(_needed)) => unreachable!(
            "This should never happen because we use `complete` combinators rather than `stream` combinators"
        ),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e),
    }
}
