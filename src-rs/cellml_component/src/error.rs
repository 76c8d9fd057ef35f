use std::fmt;

/// Represents an error returned by a lookup or mutation on a
/// [`ComponentTree`](crate::ComponentTree).
///
/// A failed operation never leaves the tree partially modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// No child with the requested name exists where the operation looked.
    NotFound {
        /// The name that was searched for
        name: String,
    },
    /// A read-only lookup found no descendant with the requested name.
    OutOfRange {
        /// The name that was searched for
        name: String,
    },
}

impl ComponentError {
    /// Creates a new error indicating that no matching child exists.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates a new error indicating that a lookup ran past every descendant.
    #[must_use]
    pub fn out_of_range(name: impl Into<String>) -> Self {
        Self::OutOfRange { name: name.into() }
    }

    /// Returns the name the failed operation searched for.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound { name } | Self::OutOfRange { name } => name,
        }
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "component `{name}` was not found"),
            Self::OutOfRange { name } => {
                write!(f, "component `{name}` is not encapsulated by this component")
            }
        }
    }
}

impl std::error::Error for ComponentError {}
