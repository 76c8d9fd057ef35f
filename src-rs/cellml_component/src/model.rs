//! A CellML model document: a named set of top-level components.

use crate::{
    ComponentError, ComponentId, ComponentTree, Format,
    serialise::{self, Encapsulation},
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const CELLML_NAMESPACE: &str = "http://www.cellml.org/cellml/2.0#";

/// A model owning a component arena and an ordered list of the components
/// that sit directly in the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    name: String,
    id: String,
    tree: ComponentTree,
    components: Vec<ComponentId>,
}

impl Model {
    /// Creates an unnamed model with no components.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: String::new(),
            id: String::new(),
            tree: ComponentTree::new(),
            components: Vec::new(),
        }
    }

    /// Creates a model with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Returns the name of the model, or `None` if it is unset.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    /// Sets the name of the model. An empty string unsets it.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the id of the model, or `None` if it is unset.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        (!self.id.is_empty()).then_some(self.id.as_str())
    }

    /// Sets the id of the model. An empty string unsets it.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Returns the arena holding every component of the model.
    #[must_use]
    pub const fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Returns the arena holding every component of the model, mutably.
    #[must_use]
    pub const fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    /// Returns the top-level components, in insertion order.
    #[must_use]
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Returns the number of top-level components.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Appends `component` to the top-level components.
    ///
    /// A component that is already top-level moves to the end.
    pub fn add_component(&mut self, component: ComponentId) {
        self.components.retain(|&id| id != component);
        self.components.push(component);
        tracing::debug!(component = %component, "added component to model");
    }

    /// Removes the first top-level component called `name`.
    ///
    /// Returns `true` if a component was removed.
    pub fn remove_component(&mut self, name: &str) -> bool {
        let Some(position) = self.position(name) else {
            return false;
        };

        let component = self.components.remove(position);
        tracing::debug!(component = %component, name, "removed component from model");
        true
    }

    /// Removes `component` from the top-level components.
    ///
    /// Returns `true` if it was top-level.
    pub fn remove_component_by_id(&mut self, component: ComponentId) -> bool {
        let before = self.components.len();
        self.components.retain(|&id| id != component);
        before != self.components.len()
    }

    /// Removes every top-level component. The arena keeps them.
    pub fn remove_all_components(&mut self) {
        self.components.clear();
    }

    /// Removes the first top-level component called `name` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::NotFound`] if no top-level component is
    /// called `name`.
    pub fn take_component(&mut self, name: &str) -> Result<ComponentId, ComponentError> {
        let position = self
            .position(name)
            .ok_or_else(|| ComponentError::not_found(name))?;

        Ok(self.components.remove(position))
    }

    /// Puts `new_component` in place of the first top-level component called
    /// `name` and returns the component it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::NotFound`] if no top-level component is
    /// called `name`.
    pub fn replace_component(
        &mut self,
        name: &str,
        new_component: ComponentId,
    ) -> Result<ComponentId, ComponentError> {
        let position = self
            .position(name)
            .ok_or_else(|| ComponentError::not_found(name))?;

        let old = std::mem::replace(&mut self.components[position], new_component);

        let mut index = 0;
        self.components.retain(|&id| {
            let keep = id != new_component || index == position;
            index += 1;
            keep
        });

        Ok(old)
    }

    /// Returns `true` if a top-level component, or anything it encapsulates,
    /// is called `name`.
    #[must_use]
    pub fn contains_component(&self, name: &str) -> bool {
        self.find_component(name).is_some()
    }

    /// Returns the first component called `name`, searching each top-level
    /// component and then its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::OutOfRange`] if no component is called `name`.
    pub fn get_component(&self, name: &str) -> Result<ComponentId, ComponentError> {
        self.find_component(name)
            .ok_or_else(|| ComponentError::out_of_range(name))
    }

    /// Returns the first component called `name`, searching each top-level
    /// component and then its descendants.
    #[must_use]
    pub fn find_component(&self, name: &str) -> Option<ComponentId> {
        self.components.iter().find_map(|&top| {
            if self.tree[top].has_name(name) {
                Some(top)
            } else {
                self.tree.find_component(top, name)
            }
        })
    }

    /// Serialises the whole model document.
    #[must_use]
    pub fn serialise(&self, format: Format) -> String {
        let mut output = String::new();

        match format {
            Format::Xml => {
                output.push_str(XML_DECLARATION);
                output.push('\n');
                output.push_str("<model xmlns=\"");
                output.push_str(CELLML_NAMESPACE);
                output.push('"');
                self.write_attributes(&mut output);

                if self.components.is_empty() {
                    output.push_str("/>");
                } else {
                    output.push('>');
                    self.write_components(&mut output);
                    output.push_str("</model>");
                }
            }
        }

        tracing::debug!(components = self.components.len(), bytes = output.len(), "serialised model");
        output
    }

    fn write_attributes(&self, output: &mut String) {
        serialise::write_attribute(output, "name", self.name());
        serialise::write_attribute(output, "id", self.id());
    }

    fn write_components(&self, output: &mut String) {
        serialise::write_components(output, &self.tree, &self.encapsulation());
    }

    /// Returns the serialisation walk of every top-level component, in
    /// order.
    #[must_use]
    pub fn encapsulation(&self) -> Encapsulation {
        Encapsulation::build(&self.tree, &self.components)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.components
            .iter()
            .position(|&id| self.tree[id].has_name(name))
    }
}
