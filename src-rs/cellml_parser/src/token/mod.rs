//! Provides token parsing functionality for serialised CellML markup.
//!
//! This module contains parsers for the lexical pieces of the markup,
//! organized into submodules by token category:
//!
//! - `markup`: Tags, attributes, the XML declaration and raw text content
//! - `text`: Decoding of character entities in attribute values
//!
//! All token parsers consume trailing whitespace, including line breaks,
//! after the matched content and return the matched content as a `Token`.

use super::util::{InputSpan, Parser, Result};

pub mod error;
mod util;
pub use util::{Token, whitespace};

pub mod markup;
pub mod text;
