/// Additional information attached to an error message.
///
/// Parsers attach notes and help text to their errors so that the CLI can
/// print them beneath the primary message.
///
/// # Examples
///
/// ```rust
/// use cellml_shared::error::Context;
///
/// let note = Context::Note("`component_ref` tags must name a component".to_string());
/// let help = Context::Help("add a `component` attribute".to_string());
///
/// let contexts = vec![note, help];
/// assert_eq!(contexts.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// Supplementary details about the error, such as where a related
    /// element was opened.
    Note(String),

    /// An actionable suggestion for fixing the error.
    Help(String),
}
