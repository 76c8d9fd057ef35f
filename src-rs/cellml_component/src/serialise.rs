//! Serialisation of component hierarchies.
//!
//! A component is written in two parts: a flat list of `<component>` tags,
//! one per appearance in a pre-order walk, followed by an `<encapsulation>`
//! block of nested `<component_ref>` tags that mirrors the same walk.
//!
//! The walk keeps the components on the current path in a stack. A child
//! that is already on the stack closes a cycle and is left out of both
//! parts, so the output of a cyclic hierarchy is finite and does not change
//! when further edges are added to an already closed cycle.

use indexmap::IndexSet;

use crate::{Component, ComponentId, ComponentTree, Variable};

/// The textual form produced by the serialiser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// CellML 2.0 XML markup
    #[default]
    Xml,
}

/// The serialisation walk of one or more top-level components.
///
/// Appearances are stored flat, in pre-order, each with its depth below the
/// top-level component it belongs to. Nothing about the walk is recursive,
/// so hierarchies of any depth can be built, written and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encapsulation {
    appearances: Vec<Appearance>,
}

/// One appearance of a component in an [`Encapsulation`] walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    component: ComponentId,
    depth: usize,
    child_count: usize,
}

/// A component on the current path and the next child to look at.
struct Frame {
    appearance: usize,
    next_child: usize,
}

impl Encapsulation {
    /// Walks the hierarchy below each of `roots` in turn, skipping children
    /// that close a cycle.
    pub(crate) fn build(tree: &ComponentTree, roots: &[ComponentId]) -> Self {
        let mut appearances = Vec::new();

        for &root in roots {
            let mut path = IndexSet::from([root]);
            let mut frames = vec![Frame {
                appearance: appearances.len(),
                next_child: 0,
            }];
            appearances.push(Appearance {
                component: root,
                depth: 0,
                child_count: 0,
            });

            while let Some(frame) = frames.last_mut() {
                let parent = frame.appearance;
                let id = appearances[parent].component;

                let Some(&child) = tree.children(id).get(frame.next_child) else {
                    frames.pop();
                    path.pop();
                    continue;
                };
                frame.next_child += 1;

                if path.contains(&child) {
                    tracing::trace!(parent = %id, child = %child, "skipping back-edge");
                    continue;
                }

                appearances[parent].child_count += 1;
                frames.push(Frame {
                    appearance: appearances.len(),
                    next_child: 0,
                });
                appearances.push(Appearance {
                    component: child,
                    depth: path.len(),
                    child_count: 0,
                });
                path.insert(child);
            }
        }

        Self { appearances }
    }

    /// Returns every appearance in pre-order.
    #[must_use]
    pub fn appearances(&self) -> &[Appearance] {
        &self.appearances
    }

    /// Returns the number of appearances, which is the number of
    /// `<component>` tags the walk serialises to.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.appearances.len()
    }

    /// Returns `true` if the walk has no top-level component.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.appearances.is_empty()
    }

    /// Returns `true` if any appearance has a child, in which case an
    /// encapsulation block is written.
    #[must_use]
    pub fn has_children(&self) -> bool {
        self.appearances.iter().any(|appearance| !appearance.is_leaf())
    }
}

impl Appearance {
    /// Returns the component this is an appearance of.
    #[must_use]
    pub const fn component(&self) -> ComponentId {
        self.component
    }

    /// Returns how many levels below its top-level component this appearance
    /// sits. Top-level components have depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of children walked below this appearance. Children
    /// that close a cycle are not counted.
    #[must_use]
    pub const fn child_count(&self) -> usize {
        self.child_count
    }

    /// Returns `true` if no child was walked below this appearance.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.child_count == 0
    }
}

/// Serialises `roots` and everything they encapsulate.
pub(crate) fn components(tree: &ComponentTree, roots: &[ComponentId], format: Format) -> String {
    let encapsulation = Encapsulation::build(tree, roots);

    let mut output = String::new();
    match format {
        Format::Xml => write_components(&mut output, tree, &encapsulation),
    }

    tracing::debug!(roots = roots.len(), bytes = output.len(), "serialised components");
    output
}

/// Writes one `<component>` tag per appearance, followed by an
/// encapsulation block unless no appearance has a child.
pub(crate) fn write_components(
    output: &mut String,
    tree: &ComponentTree,
    encapsulation: &Encapsulation,
) {
    for appearance in encapsulation.appearances() {
        write_component_tag(output, &tree[appearance.component]);
    }

    if encapsulation.has_children() {
        write_encapsulation(output, tree, encapsulation);
    }
}

/// Writes an `<encapsulation>` block of nested `<component_ref>` tags.
fn write_encapsulation(output: &mut String, tree: &ComponentTree, encapsulation: &Encapsulation) {
    // depths of the references still open
    let mut open = Vec::new();

    output.push_str("<encapsulation>");
    for appearance in encapsulation.appearances() {
        close_references(output, &mut open, appearance.depth);

        output.push_str("<component_ref");
        write_attribute(output, "component", tree[appearance.component].name());

        if appearance.is_leaf() {
            output.push_str("/>");
        } else {
            output.push('>');
            open.push(appearance.depth);
        }
    }
    close_references(output, &mut open, 0);
    output.push_str("</encapsulation>");
}

/// Closes every open reference at `depth` or deeper.
fn close_references(output: &mut String, open: &mut Vec<usize>, depth: usize) {
    while open.last().is_some_and(|&open_depth| open_depth >= depth) {
        open.pop();
        output.push_str("</component_ref>");
    }
}

fn write_component_tag(output: &mut String, component: &Component) {
    output.push_str("<component");
    write_attribute(output, "name", component.name());
    write_attribute(output, "id", component.id());

    if !component.has_content() {
        output.push_str("/>");
        return;
    }

    output.push('>');
    for variable in component.variables() {
        write_variable(output, variable);
    }
    if let Some(math) = component.math() {
        output.push_str(math);
    }
    output.push_str("</component>");
}

fn write_variable(output: &mut String, variable: &Variable) {
    output.push_str("<variable");
    write_attribute(output, "name", variable.name());
    write_attribute(output, "units", variable.units());
    write_attribute(output, "initial_value", variable.initial_value());
    write_attribute(output, "id", variable.id());
    output.push_str("/>");
}

/// Writes ` key="value"`, or nothing when `value` is unset.
pub(crate) fn write_attribute(output: &mut String, key: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };

    output.push(' ');
    output.push_str(key);
    output.push_str("=\"");
    escape_into(output, value);
    output.push('"');
}

/// Escapes the characters that cannot appear literally in an attribute value.
pub fn escape_into(output: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            c => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_attribute_values() {
        let mut output = String::new();
        escape_into(&mut output, r#"a<b & "c">"#);
        assert_eq!(output, "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn lone_component() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());

        assert_eq!(components(&tree, &[id], Format::Xml), "<component/>");
    }

    #[test]
    fn name_and_id_attributes() {
        let mut tree = ComponentTree::new();
        let mut membrane = Component::named("membrane");
        membrane.set_id("m1");
        let id = tree.insert(membrane);

        assert_eq!(
            components(&tree, &[id], Format::Xml),
            r#"<component name="membrane" id="m1"/>"#
        );
    }

    #[test]
    fn variables_and_math_are_content() {
        let mut tree = ComponentTree::new();
        let mut gate = Component::named("gate");
        gate.add_variable(
            Variable::new("alpha")
                .with_units("per_ms")
                .with_initial_value("0.1"),
        );
        gate.set_math("<math/>");
        let id = tree.insert(gate);

        assert_eq!(
            components(&tree, &[id], Format::Xml),
            r#"<component name="gate"><variable name="alpha" units="per_ms" initial_value="0.1"/><math/></component>"#
        );
    }

    #[test]
    fn several_roots_share_one_block() {
        let mut tree = ComponentTree::new();
        let a = tree.insert(Component::named("a"));
        let b = tree.insert(Component::named("b"));
        let c = tree.insert(Component::named("c"));
        tree.add_component(b, c);

        assert_eq!(
            components(&tree, &[a, b], Format::Xml),
            concat!(
                r#"<component name="a"/><component name="b"/><component name="c"/>"#,
                r#"<encapsulation><component_ref component="a"/>"#,
                r#"<component_ref component="b"><component_ref component="c"/></component_ref>"#,
                r#"</encapsulation>"#,
            )
        );
        assert_eq!(
            components(&tree, &[a, c], Format::Xml),
            r#"<component name="a"/><component name="c"/>"#
        );
    }

    #[test]
    fn back_edges_are_skipped() {
        let mut tree = ComponentTree::new();
        let a = tree.insert(Component::named("a"));
        let b = tree.insert(Component::named("b"));
        tree.add_component(a, b);
        tree.add_component(b, a);

        let walk = Encapsulation::build(&tree, &[a]);
        assert_eq!(walk.len(), 2);
        assert_eq!(walk.appearances()[0].child_count(), 1);
        assert!(walk.appearances()[1].is_leaf());
        assert_eq!(tree.component_count(b), 1);
    }

    #[test]
    fn shared_child_is_walked_on_every_path() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::named("root"));
        let left = tree.insert(Component::named("left"));
        let shared = tree.insert(Component::named("shared"));
        tree.add_component(root, left);
        tree.add_component(root, shared);
        tree.add_component(left, shared);

        let walk = Encapsulation::build(&tree, &[root]);
        let depths: Vec<_> = walk.appearances().iter().map(Appearance::depth).collect();
        assert_eq!(depths, [0, 1, 2, 1]);
        assert_eq!(walk.appearances()[2].component(), shared);
        assert_eq!(walk.appearances()[3].component(), shared);
    }

    #[test]
    fn references_close_back_to_a_shallower_depth() {
        let mut tree = ComponentTree::new();
        let a = tree.insert(Component::named("a"));
        let b = tree.insert(Component::named("b"));
        let c = tree.insert(Component::named("c"));
        let d = tree.insert(Component::named("d"));
        tree.add_component(a, b);
        tree.add_component(b, c);
        tree.add_component(a, d);

        assert_eq!(
            components(&tree, &[a], Format::Xml),
            concat!(
                r#"<component name="a"/><component name="b"/><component name="c"/><component name="d"/>"#,
                r#"<encapsulation><component_ref component="a">"#,
                r#"<component_ref component="b"><component_ref component="c"/></component_ref>"#,
                r#"<component_ref component="d"/>"#,
                r#"</component_ref></encapsulation>"#,
            )
        );
    }

    #[test]
    fn deep_chain() {
        const DEPTH: usize = 20_000;

        let mut tree = ComponentTree::new();
        let ids: Vec<_> = (0..DEPTH)
            .map(|index| tree.insert(Component::named(format!("c{index}"))))
            .collect();
        for pair in ids.windows(2) {
            tree.add_component(pair[0], pair[1]);
        }

        let walk = Encapsulation::build(&tree, &ids[..1]);
        assert_eq!(walk.len(), DEPTH);
        assert_eq!(walk.appearances()[DEPTH - 1].depth(), DEPTH - 1);

        let output = components(&tree, &ids[..1], Format::Xml);
        assert_eq!(output.matches("<component ").count(), DEPTH);
        assert_eq!(output.matches("</component_ref>").count(), DEPTH - 1);
        assert!(output.ends_with("<component_ref component=\"c19999\"/></component_ref></encapsulation>"));
    }
}
