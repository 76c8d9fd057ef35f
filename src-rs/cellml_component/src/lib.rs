//! Component encapsulation hierarchy for CellML models
//!
//! Components live in a [`ComponentTree`] arena and refer to their children
//! by [`ComponentId`]. A component may be encapsulated by more than one
//! parent and may be its own ancestor; the serialiser terminates on such
//! hierarchies by leaving out the edges that close a cycle.
//!
//! ```
//! use cellml_component::{Component, ComponentTree, Format};
//!
//! let mut tree = ComponentTree::new();
//! let parent = tree.insert(Component::named("parent_component"));
//! let child = tree.insert(Component::named("child_component"));
//! tree.add_component(parent, child);
//!
//! assert_eq!(
//!     tree.serialise(parent, Format::Xml),
//!     concat!(
//!         r#"<component name="parent_component"/><component name="child_component"/>"#,
//!         r#"<encapsulation><component_ref component="parent_component">"#,
//!         r#"<component_ref component="child_component"/></component_ref></encapsulation>"#,
//!     )
//! );
//! ```

mod component;
mod error;
mod id;
mod model;
mod serialise;
mod tree;

pub use component::{Component, Variable};
pub use error::ComponentError;
pub use id::ComponentId;
pub use model::Model;
pub use serialise::{Appearance, Encapsulation, Format, escape_into};
pub use tree::ComponentTree;
