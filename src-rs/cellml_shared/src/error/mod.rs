//! Errors for the CellML encapsulation tools

mod context;
mod location;
mod traits;

use std::path::PathBuf;

pub use context::Context;
pub use location::ErrorLocation;
pub use traits::AsCellmlError;

/// An error resolved against the file it came from, ready to print.
///
/// Parser errors only know byte offsets. Once the source text is at hand
/// they become lines and columns here, and any note that points back into
/// the document ("`<component>` opened here") is located the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellmlError {
    path: PathBuf,
    message: String,
    location: Option<ErrorLocation>,
    context: Vec<Context>,
    context_with_source: Vec<(Context, ErrorLocation)>,
}

impl CellmlError {
    /// Creates a new `CellmlError` without source location information.
    ///
    /// Use `from_error_with_source` if the source text is available.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cellml_shared::error::{AsCellmlError, CellmlError};
    /// use std::path::PathBuf;
    ///
    /// struct SimpleError(String);
    ///
    /// impl AsCellmlError for SimpleError {
    ///     fn message(&self) -> String {
    ///         self.0.clone()
    ///     }
    /// }
    ///
    /// let error = SimpleError("Something went wrong".to_string());
    /// let error = CellmlError::from_error(&error, PathBuf::from("model.cellml"));
    /// assert_eq!(error.message(), "Something went wrong");
    /// assert!(error.location().is_none());
    /// ```
    pub fn from_error(error: &impl AsCellmlError, path: PathBuf) -> Self {
        Self {
            path,
            message: error.message(),
            location: None,
            context: error.context(),
            context_with_source: vec![],
        }
    }

    /// Creates a new `CellmlError` with line and column information computed
    /// from `source`.
    ///
    /// Context items that could not be located in the source are kept as
    /// plain context.
    pub fn from_error_with_source(
        error: &impl AsCellmlError,
        path: PathBuf,
        source: &str,
    ) -> Self {
        let message = error.message();
        let location = error.error_location(source);

        let mut context = error.context();
        let mut context_with_source = vec![];

        for (context_item, location) in error.context_with_source(source) {
            match location {
                Some(location) => context_with_source.push((context_item, location)),
                None => context.push(context_item),
            }
        }

        Self {
            path,
            message,
            location,
            context,
            context_with_source,
        }
    }

    /// Returns the path to the file where the error occurred
    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the human-readable error message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the source location, if available
    #[must_use]
    pub const fn location(&self) -> Option<&ErrorLocation> {
        self.location.as_ref()
    }

    /// Returns the context information that has no location
    #[must_use]
    pub fn context(&self) -> &[Context] {
        &self.context
    }

    /// Returns the context information with source locations
    #[must_use]
    pub fn context_with_source(&self) -> &[(Context, ErrorLocation)] {
        &self.context_with_source
    }
}
