use crate::error::{Context, ErrorLocation};

/// Trait for types that can be converted to user-facing error messages.
///
/// Every error produced by the workspace implements this trait so that the
/// CLI can render it uniformly.
pub trait AsCellmlError {
    /// Returns the primary error message.
    ///
    /// This should be a concise, user-friendly description of what went wrong.
    fn message(&self) -> String;

    /// Returns additional context information about the error.
    ///
    /// Returns an empty vector if no context is available.
    fn context(&self) -> Vec<Context> {
        vec![]
    }

    /// Returns the location of the error in the source text, if the error
    /// refers to one.
    fn error_location(&self, source: &str) -> Option<ErrorLocation> {
        let _ = source;
        None
    }

    /// Returns context with optional source locations.
    ///
    /// Similar to `context()`, but each context item can point at a specific
    /// position, e.g. "element opened here".
    fn context_with_source(&self, source: &str) -> Vec<(Context, Option<ErrorLocation>)> {
        let _ = source;
        vec![]
    }
}
