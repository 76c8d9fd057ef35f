//! Detailed error reasons and categories for parser errors.
//!
//! # Error Categories
//!
//! - **Expect**: Expected a specific element but found something else
//! - **Incomplete**: An element was started but not finished; the cause
//!   points at the opening tag
//! - **Attribute and entity errors**: Attributes that are unknown, repeated
//!   or contain an entity that cannot be decoded
//! - **Reference errors**: The encapsulation block does not line up with
//!   the component tags
//! - **TokenError**: Low-level tokenization errors
//! - **NomError**: Internal nom parsing library errors

use crate::token::{error::TokenErrorKind, markup::TagName};

/// The different kinds of errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorReason {
    /// Expected an element but found something else
    Expect(ExpectKind),
    /// Found an element that was opened but not finished
    Incomplete {
        /// The offset of the opening tag
        cause: usize,
        /// The specific type of incomplete input that was found
        kind: IncompleteKind,
    },
    /// Found an unexpected token
    UnexpectedToken,
    /// Found an attribute the element does not have
    UnknownAttribute {
        /// The element carrying the attribute
        element: TagName,
        /// The attribute name
        name: String,
    },
    /// Found the same attribute twice on one element
    DuplicateAttribute {
        /// The attribute name
        name: String,
        /// The offset of the first definition
        original_offset: usize,
    },
    /// Found a character entity that cannot be decoded
    UnknownEntity,
    /// A `component_ref` names a different component than the one it is
    /// matched with
    ReferenceMismatch {
        /// The name on the matched component tag
        expected: Option<String>,
        /// The name on the `component_ref` tag
        found: Option<String>,
    },
    /// A component tag has no `component_ref` to place it in the hierarchy
    MissingReference,
    /// A `component_ref` has no component tag left to refer to
    ExtraReference,
    /// More than one top-level component where a single one was expected
    MultipleRoots,
    /// A token-level error occurred
    TokenError(TokenErrorKind),
    /// A low-level nom parsing error
    NomError(nom::error::ErrorKind),
}

impl ParserErrorReason {
    pub(crate) const fn expect_component() -> Self {
        Self::Expect(ExpectKind::Component)
    }

    pub(crate) const fn expect_component_ref() -> Self {
        Self::Expect(ExpectKind::ComponentRef)
    }

    pub(crate) const fn expect_encapsulation() -> Self {
        Self::Expect(ExpectKind::Encapsulation)
    }

    pub(crate) const fn expect_model() -> Self {
        Self::Expect(ExpectKind::Model)
    }

    pub(crate) const fn expect_variable() -> Self {
        Self::Expect(ExpectKind::Variable)
    }

    pub(crate) const fn missing_tag_end(open_tag_offset: usize, element: TagName) -> Self {
        Self::Incomplete {
            cause: open_tag_offset,
            kind: IncompleteKind::MissingTagEnd(element),
        }
    }

    pub(crate) const fn unclosed(open_tag_offset: usize, element: TagName) -> Self {
        Self::Incomplete {
            cause: open_tag_offset,
            kind: IncompleteKind::Unclosed(element),
        }
    }

    pub(crate) const fn encapsulation_missing_reference(open_tag_offset: usize) -> Self {
        Self::Incomplete {
            cause: open_tag_offset,
            kind: IncompleteKind::EncapsulationMissingReference,
        }
    }

    pub(crate) const fn unexpected_token() -> Self {
        Self::UnexpectedToken
    }

    pub(crate) const fn token_error(kind: TokenErrorKind) -> Self {
        Self::TokenError(kind)
    }

    pub(crate) const fn nom_error(kind: nom::error::ErrorKind) -> Self {
        Self::NomError(kind)
    }
}

/// The different kinds of elements that can be expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectKind {
    /// Expected a `component` element
    Component,
    /// Expected a `component_ref` element
    ComponentRef,
    /// Expected an `encapsulation` element
    Encapsulation,
    /// Expected a `model` element
    Model,
    /// Expected a `variable` element
    Variable,
}

/// The different kinds of incomplete elements that can be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteKind {
    /// A start tag is missing its `>` or `/>`
    MissingTagEnd(TagName),
    /// An element is missing its closing tag
    Unclosed(TagName),
    /// An `encapsulation` element holds no `component_ref`
    EncapsulationMissingReference,
}
