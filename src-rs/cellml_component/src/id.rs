//! Handles into a component arena.

use std::{fmt, num::NonZeroU32};

/// A stable handle to a component stored in a [`ComponentTree`](crate::ComponentTree).
///
/// Handles are plain indices: copying one does not copy the component, and
/// every copy observes every mutation made through any other copy. A handle
/// is only meaningful for the tree that created it.
///
/// Using `NonZeroU32` keeps `Option<ComponentId>` the same size as the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(NonZeroU32);

impl ComponentId {
    /// Creates an id from a 0-based arena index.
    ///
    /// Returns `None` if the index does not fit in a `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        let raw = u32::try_from(index).ok()?.checked_add(1)?;
        NonZeroU32::new(raw).map(Self)
    }

    /// Returns the 0-based arena index.
    #[must_use]
    pub const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_index())
    }
}
