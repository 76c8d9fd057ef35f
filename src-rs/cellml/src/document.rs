//! Loading of CellML documents from disk

use std::{fs, io, path::Path};

use cellml_component::{ComponentId, ComponentTree, Format, Model};
use cellml_parser::{Config, error::ParserError};
use cellml_shared::error::{AsCellmlError, CellmlError};

/// A parsed input file.
#[derive(Debug)]
pub enum Document {
    /// A `<model>` document
    Model(Model),
    /// One or more bare `<component>` tags with their encapsulation block
    Components {
        tree: ComponentTree,
        roots: Vec<ComponentId>,
    },
}

impl Document {
    /// Writes the document back out in the form it was read in.
    pub fn serialise(&self) -> String {
        match self {
            Self::Model(model) => model.serialise(Format::Xml),
            Self::Components { tree, roots } => tree.serialise_components(roots, Format::Xml),
        }
    }
}

/// Error for a file that could not be read
#[derive(Debug)]
struct ReadError(io::Error);

impl AsCellmlError for ReadError {
    fn message(&self) -> String {
        format!("couldn't read file - {}", self.0)
    }
}

/// Reads and parses the file at `path`.
pub fn load(path: &Path, config: Config) -> Result<Document, CellmlError> {
    let source = fs::read_to_string(path)
        .map_err(|error| CellmlError::from_error(&ReadError(error), path.to_path_buf()))?;

    tracing::debug!(path = %path.display(), bytes = source.len(), "read file");

    parse(&source, config)
        .map_err(|error| CellmlError::from_error_with_source(&error, path.to_path_buf(), &source))
}

/// Parses `source` as a model when it opens with an XML declaration or a
/// `<model>` tag, and as a list of components otherwise.
pub fn parse(source: &str, config: Config) -> Result<Document, ParserError> {
    let start = source.trim_start();

    if start.starts_with("<?xml") || start.starts_with("<model") {
        cellml_parser::parse_model(source, Some(config)).map(Document::Model)
    } else {
        cellml_parser::parse_components(source, Some(config))
            .map(|(tree, roots)| Document::Components { tree, roots })
    }
}
