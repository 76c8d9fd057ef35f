//! The component arena and its encapsulation operations.
//!
//! A [`ComponentTree`] owns every component and every child list. Parents
//! refer to children by [`ComponentId`], which lets a component appear under
//! more than one parent and lets a component be its own ancestor. Cycles are
//! never rejected at mutation time; every traversal in this module tracks
//! the components it has already visited instead.

use std::ops::Index;

use indexmap::IndexSet;

use crate::{
    Component, ComponentError, ComponentId,
    serialise::{self, Encapsulation, Format},
};

/// An arena of components and their encapsulation relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentTree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    component: Component,
    children: Vec<ComponentId>,
}

/// The position of a child entry inside some component's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    owner: ComponentId,
    position: usize,
}

impl ComponentTree {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Stores `component` with no parent and no children and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` components.
    pub fn insert(&mut self, component: Component) -> ComponentId {
        let id = ComponentId::from_index(self.nodes.len())
            .expect("component arena should not exceed u32::MAX entries");

        self.nodes.push(Node {
            component,
            children: Vec::new(),
        });

        tracing::trace!(id = %id, name = ?self.nodes[id.to_index()].component.name(), "inserted component");

        id
    }

    /// Returns the number of components stored in the arena.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena holds no components.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every component in the arena, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.nodes.iter().enumerate().filter_map(|(index, node)| {
            ComponentId::from_index(index).map(|id| (id, &node.component))
        })
    }

    /// Returns the component behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this arena.
    #[must_use]
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.node(id).component
    }

    /// Returns the component behind `id`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this arena.
    #[must_use]
    pub fn component_mut(&mut self, id: ComponentId) -> &mut Component {
        &mut self.node_mut(id).component
    }

    /// Returns the direct children of `id`, in insertion order.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        &self.node(id).children
    }

    /// Returns the number of direct children of `id`.
    #[must_use]
    pub fn component_count(&self, id: ComponentId) -> usize {
        self.node(id).children.len()
    }

    /// Returns the direct child of `id` at `index`.
    #[must_use]
    pub fn child(&self, id: ComponentId, index: usize) -> Option<ComponentId> {
        self.node(id).children.get(index).copied()
    }

    /// Appends `child` to the child list of `parent`.
    ///
    /// `child` is first removed from every child list reachable from
    /// `parent`, including the list of `parent` itself, so adding a child
    /// again moves it to the end. Lists that cannot be reached from `parent`
    /// keep their entry, which is how a component comes to have two parents.
    ///
    /// Adding a component to itself or to one of its descendants is allowed
    /// and creates a cycle.
    pub fn add_component(&mut self, parent: ComponentId, child: ComponentId) {
        for owner in self.reachable(parent) {
            self.node_mut(owner).children.retain(|&id| id != child);
        }

        self.node_mut(parent).children.push(child);

        tracing::debug!(parent = %parent, child = %child, "added component");
    }

    /// Stores `component` as the last child of `parent` and returns its
    /// handle.
    ///
    /// A fresh component is in no child list yet, so unlike
    /// [`add_component`](Self::add_component) nothing is searched and the
    /// cost does not grow with the size of the hierarchy.
    pub fn insert_child(&mut self, parent: ComponentId, component: Component) -> ComponentId {
        let child = self.insert(component);
        self.node_mut(parent).children.push(child);

        tracing::debug!(parent = %parent, child = %child, "inserted child component");

        child
    }

    /// Removes the first direct child of `parent` called `name`.
    ///
    /// Returns `true` if a child was removed.
    pub fn remove_component(&mut self, parent: ComponentId, name: &str) -> bool {
        let Some(position) = self.direct_position(parent, name) else {
            tracing::trace!(parent = %parent, name, "no child to remove");
            return false;
        };

        let child = self.node_mut(parent).children.remove(position);
        tracing::debug!(parent = %parent, child = %child, name, "removed component");
        true
    }

    /// Removes `child` from the direct children of `parent`.
    ///
    /// Returns `true` if `child` was a direct child.
    pub fn remove_component_by_id(&mut self, parent: ComponentId, child: ComponentId) -> bool {
        let children = &mut self.node_mut(parent).children;
        let Some(position) = children.iter().position(|&id| id == child) else {
            return false;
        };

        children.remove(position);
        tracing::debug!(parent = %parent, child = %child, "removed component");
        true
    }

    /// Removes every direct child of `parent`.
    pub fn remove_all_components(&mut self, parent: ComponentId) {
        let removed = std::mem::take(&mut self.node_mut(parent).children);
        tracing::debug!(parent = %parent, count = removed.len(), "removed all components");
    }

    /// Removes the first direct child of `parent` called `name` and returns it.
    ///
    /// The returned component keeps its own children.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::NotFound`] if no direct child is called `name`.
    pub fn take_component(
        &mut self,
        parent: ComponentId,
        name: &str,
    ) -> Result<ComponentId, ComponentError> {
        let position = self
            .direct_position(parent, name)
            .ok_or_else(|| ComponentError::not_found(name))?;

        let child = self.node_mut(parent).children.remove(position);
        tracing::debug!(parent = %parent, child = %child, name, "took component");
        Ok(child)
    }

    /// Puts `new_component` in place of the first direct child of `parent`
    /// called `name` and returns the component it replaced.
    ///
    /// The children of the replaced component are not carried over. If
    /// `new_component` already appeared elsewhere in the same list, that
    /// entry is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::NotFound`] if no direct child is called `name`.
    pub fn replace_component(
        &mut self,
        parent: ComponentId,
        name: &str,
        new_component: ComponentId,
    ) -> Result<ComponentId, ComponentError> {
        let position = self
            .direct_position(parent, name)
            .ok_or_else(|| ComponentError::not_found(name))?;

        let old = self.replace_at(
            Slot {
                owner: parent,
                position,
            },
            new_component,
        );
        tracing::debug!(parent = %parent, old = %old, new = %new_component, name, "replaced component");
        Ok(old)
    }

    /// Returns `true` if any descendant of `root` is called `name`.
    ///
    /// `root` itself is not considered.
    #[must_use]
    pub fn contains_component(&self, root: ComponentId, name: &str) -> bool {
        self.find_slot(root, |component| component.has_name(name))
            .is_some()
    }

    /// Returns the first descendant of `root` called `name`, searching in
    /// pre-order.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::OutOfRange`] if no descendant is called `name`.
    pub fn get_component(
        &self,
        root: ComponentId,
        name: &str,
    ) -> Result<ComponentId, ComponentError> {
        self.find_component(root, name)
            .ok_or_else(|| ComponentError::out_of_range(name))
    }

    /// Returns the first descendant of `root` called `name`, searching in
    /// pre-order.
    #[must_use]
    pub fn find_component(&self, root: ComponentId, name: &str) -> Option<ComponentId> {
        self.find_slot(root, |component| component.has_name(name))
            .map(|slot| self.slot_child(slot))
    }

    /// Returns the first descendant of `root` called `name`, mutably.
    #[must_use]
    pub fn get_component_mut(&mut self, root: ComponentId, name: &str) -> Option<&mut Component> {
        let id = self.find_component(root, name)?;
        Some(self.component_mut(id))
    }

    /// Removes the first descendant of `root` called `name` from the list
    /// that holds it.
    ///
    /// Returns `true` if a component was removed.
    pub fn remove_encapsulated_component(&mut self, root: ComponentId, name: &str) -> bool {
        let Some(slot) = self.find_slot(root, |component| component.has_name(name)) else {
            return false;
        };

        let child = self.node_mut(slot.owner).children.remove(slot.position);
        tracing::debug!(parent = %slot.owner, child = %child, name, "removed encapsulated component");
        true
    }

    /// Removes the first appearance of `child` among the descendants of
    /// `root` from the list that holds it.
    ///
    /// Returns `true` if `child` was found.
    pub fn remove_encapsulated_component_by_id(
        &mut self,
        root: ComponentId,
        child: ComponentId,
    ) -> bool {
        let Some(slot) = self.find_id_slot(root, child) else {
            return false;
        };

        self.node_mut(slot.owner).children.remove(slot.position);
        tracing::debug!(parent = %slot.owner, child = %child, "removed encapsulated component");
        true
    }

    /// Removes the first descendant of `root` called `name` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::NotFound`] if no descendant is called `name`.
    pub fn take_encapsulated_component(
        &mut self,
        root: ComponentId,
        name: &str,
    ) -> Result<ComponentId, ComponentError> {
        let slot = self
            .find_slot(root, |component| component.has_name(name))
            .ok_or_else(|| ComponentError::not_found(name))?;

        let child = self.node_mut(slot.owner).children.remove(slot.position);
        tracing::debug!(parent = %slot.owner, child = %child, name, "took encapsulated component");
        Ok(child)
    }

    /// Puts `new_component` in place of the first descendant of `root`
    /// called `name` and returns the component it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::NotFound`] if no descendant is called `name`.
    pub fn replace_encapsulated_component(
        &mut self,
        root: ComponentId,
        name: &str,
        new_component: ComponentId,
    ) -> Result<ComponentId, ComponentError> {
        let slot = self
            .find_slot(root, |component| component.has_name(name))
            .ok_or_else(|| ComponentError::not_found(name))?;

        let old = self.replace_at(slot, new_component);
        tracing::debug!(parent = %slot.owner, old = %old, new = %new_component, name, "replaced encapsulated component");
        Ok(old)
    }

    /// Serialises `root` and everything it encapsulates.
    ///
    /// The output is a flat list of component tags in pre-order, followed by
    /// an encapsulation block when `root` has any child to reference. A
    /// child that is already on the path from `root` is left out.
    #[must_use]
    pub fn serialise(&self, root: ComponentId, format: Format) -> String {
        serialise::components(self, &[root], format)
    }

    /// Serialises several top-level components into one document.
    ///
    /// The flat lists of all `roots` come first, in order, followed by a
    /// single encapsulation block referencing every root when any of them
    /// has a child.
    #[must_use]
    pub fn serialise_components(&self, roots: &[ComponentId], format: Format) -> String {
        serialise::components(self, roots, format)
    }

    /// Returns the serialisation walk below `root`.
    #[must_use]
    pub fn encapsulation(&self, root: ComponentId) -> Encapsulation {
        Encapsulation::build(self, &[root])
    }

    fn node(&self, id: ComponentId) -> &Node {
        &self.nodes[id.to_index()]
    }

    fn node_mut(&mut self, id: ComponentId) -> &mut Node {
        &mut self.nodes[id.to_index()]
    }

    fn slot_child(&self, slot: Slot) -> ComponentId {
        self.node(slot.owner).children[slot.position]
    }

    fn direct_position(&self, parent: ComponentId, name: &str) -> Option<usize> {
        self.node(parent)
            .children
            .iter()
            .position(|&id| self.component(id).has_name(name))
    }

    fn replace_at(&mut self, slot: Slot, new_component: ComponentId) -> ComponentId {
        let children = &mut self.node_mut(slot.owner).children;
        let old = std::mem::replace(&mut children[slot.position], new_component);

        let mut index = 0;
        children.retain(|&id| {
            let keep = id != new_component || index == slot.position;
            index += 1;
            keep
        });

        old
    }

    /// Returns every component whose child list can be reached from
    /// `start`, including `start`.
    fn reachable(&self, start: ComponentId) -> IndexSet<ComponentId> {
        let mut visited = IndexSet::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if visited.insert(id) {
                stack.extend(self.children(id).iter().rev());
            }
        }

        visited
    }

    fn find_id_slot(&self, root: ComponentId, child: ComponentId) -> Option<Slot> {
        self.find_slot_by(root, |id, _| id == child)
    }

    fn find_slot(&self, root: ComponentId, matches: impl Fn(&Component) -> bool) -> Option<Slot> {
        self.find_slot_by(root, |_, component| matches(component))
    }

    /// Walks the descendants of `root` in pre-order and returns the slot of
    /// the first child entry accepted by `matches`.
    ///
    /// Each component is visited at most once and `root` is never matched.
    fn find_slot_by(
        &self,
        root: ComponentId,
        matches: impl Fn(ComponentId, &Component) -> bool,
    ) -> Option<Slot> {
        let mut visited = IndexSet::from([root]);
        let mut stack: Vec<Slot> = self.child_slots(root).collect();

        while let Some(slot) = stack.pop() {
            let id = self.slot_child(slot);
            if !visited.insert(id) {
                continue;
            }

            if matches(id, self.component(id)) {
                return Some(slot);
            }

            stack.extend(self.child_slots(id));
        }

        None
    }

    /// Yields the slots of the children of `owner`, last child first, ready
    /// to be pushed onto a depth-first stack.
    fn child_slots(&self, owner: ComponentId) -> impl Iterator<Item = Slot> {
        (0..self.component_count(owner))
            .rev()
            .map(move |position| Slot { owner, position })
    }
}

impl Index<ComponentId> for ComponentTree {
    type Output = Component;

    fn index(&self, id: ComponentId) -> &Self::Output {
        self.component(id)
    }
}
