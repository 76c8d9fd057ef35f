/// Configuration for the CellML parser.
///
/// The configuration travels with the input span, so every parser can read
/// it without it being threaded through by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Whether each `component_ref` must name the `component` tag it is
    /// matched with.
    ///
    /// References are always matched by position. When this is `false`, a
    /// reference whose name differs from its component is accepted and the
    /// component keeps the name from its own tag.
    pub check_references: bool,
}

impl Config {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            check_references: true,
        }
    }

    /// Returns a copy of this configuration with reference checking set.
    #[must_use]
    pub const fn with_check_references(self, check_references: bool) -> Self {
        Self { check_references }
    }
}

impl Default for Config {
    /// Creates a default configuration.
    fn default() -> Self {
        Self::new()
    }
}
