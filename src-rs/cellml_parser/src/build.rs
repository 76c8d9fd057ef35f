//! Turns parsed component tags and references into a component tree.
//!
//! Component tags and `<component_ref>` tags are paired by position: the
//! n-th reference in a pre-order walk of the encapsulation block stands for
//! the n-th component tag. This is the order the serialiser writes both in,
//! so a component that appears more than once in a hierarchy is parsed back
//! as separate, equal components.

use std::collections::VecDeque;

use cellml_component::{ComponentId, ComponentTree};

use crate::{
    Config,
    component::ComponentDecl,
    encapsulation::ComponentRef,
    error::ParserError,
    model::Body,
};

/// A top-level component and the offset of its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    /// The offset of the `<component` tag
    pub offset: usize,
    /// The component in the tree
    pub id: ComponentId,
}

/// Inserts the components of `body` into `tree` and returns the top-level
/// ones in order.
///
/// Without an encapsulation block every component is top-level.
pub fn assemble(
    tree: &mut ComponentTree,
    body: Body,
    config: Config,
) -> Result<Vec<Root>, ParserError> {
    let Some(encapsulation) = body.encapsulation else {
        return Ok(body
            .components
            .into_iter()
            .map(|decl| Root {
                offset: decl.offset,
                id: tree.insert(decl.component),
            })
            .collect());
    };

    let mut decls = VecDeque::from(body.components);
    let mut roots = Vec::new();
    // the component placed at each depth on the current path
    let mut path: Vec<ComponentId> = Vec::new();

    for reference in &encapsulation.references {
        let decl = take_matching(&mut decls, reference, config)?;

        path.truncate(reference.depth);
        let id = match path.last() {
            Some(&parent) => tree.insert_child(parent, decl.component),
            None => {
                let id = tree.insert(decl.component);
                roots.push(Root {
                    offset: decl.offset,
                    id,
                });
                id
            }
        };
        path.push(id);
    }

    if let Some(unreferenced) = decls.front() {
        return Err(ParserError::missing_reference(unreferenced.offset));
    }

    tracing::trace!(
        roots = roots.len(),
        components = tree.len(),
        "assembled encapsulation"
    );

    Ok(roots)
}

/// Takes the component tag paired with `reference`, which is the next one
/// in document order.
fn take_matching(
    decls: &mut VecDeque<ComponentDecl>,
    reference: &ComponentRef,
    config: Config,
) -> Result<ComponentDecl, ParserError> {
    let decl = decls
        .pop_front()
        .ok_or_else(|| ParserError::extra_reference(reference.offset))?;

    let expected = decl.component.name();
    let found = reference.name.as_deref();
    if config.check_references && expected != found {
        return Err(ParserError::reference_mismatch(
            reference.offset,
            expected,
            found,
        ));
    }

    Ok(decl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encapsulation::Encapsulation, error::reason::ParserErrorReason};
    use cellml_component::Component;

    fn decl(offset: usize, name: &str) -> ComponentDecl {
        ComponentDecl {
            offset,
            component: Component::named(name),
        }
    }

    fn reference(offset: usize, depth: usize, name: &str) -> ComponentRef {
        ComponentRef {
            offset,
            name: Some(name.to_string()),
            depth,
        }
    }

    fn body(components: Vec<ComponentDecl>, references: Vec<ComponentRef>) -> Body {
        Body {
            components,
            encapsulation: Some(Encapsulation { references }),
        }
    }

    fn names(tree: &ComponentTree, ids: &[ComponentId]) -> Vec<Option<String>> {
        ids.iter()
            .map(|&id| tree[id].name().map(str::to_string))
            .collect()
    }

    #[test]
    fn no_encapsulation() {
        let mut tree = ComponentTree::new();
        let body = Body {
            components: vec![decl(0, "a"), decl(10, "b")],
            encapsulation: None,
        };

        let roots = assemble(&mut tree, body, Config::default()).expect("should assemble");
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1].offset, 10);
        assert_eq!(tree.len(), 2);
        assert!(tree.children(roots[0].id).is_empty());
    }

    #[test]
    fn nested() {
        let mut tree = ComponentTree::new();
        let body = body(
            vec![decl(0, "a"), decl(10, "b"), decl(20, "c")],
            vec![
                reference(110, 0, "a"),
                reference(120, 1, "b"),
                reference(130, 1, "c"),
            ],
        );

        let roots = assemble(&mut tree, body, Config::default()).expect("should assemble");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].offset, 0);

        let children = tree.children(roots[0].id);
        assert_eq!(
            names(&tree, children),
            vec![Some("b".to_string()), Some("c".to_string())]
        );
    }

    #[test]
    fn repeated_name_becomes_separate_components() {
        let mut tree = ComponentTree::new();
        let body = body(
            vec![decl(0, "a"), decl(10, "b"), decl(20, "b")],
            vec![
                reference(110, 0, "a"),
                reference(120, 1, "b"),
                reference(130, 2, "b"),
            ],
        );

        let roots = assemble(&mut tree, body, Config::default()).expect("should assemble");
        assert_eq!(tree.len(), 3);

        let outer_b = tree.children(roots[0].id)[0];
        let inner_b = tree.children(outer_b)[0];
        assert_ne!(outer_b, inner_b);
        assert_eq!(tree[outer_b], tree[inner_b]);
    }

    #[test]
    fn siblings_after_a_deep_branch() {
        let mut tree = ComponentTree::new();
        let body = body(
            vec![
                decl(0, "a"),
                decl(10, "b"),
                decl(20, "c"),
                decl(30, "d"),
                decl(40, "e"),
            ],
            vec![
                reference(110, 0, "a"),
                reference(120, 1, "b"),
                reference(130, 2, "c"),
                reference(140, 1, "d"),
                reference(150, 0, "e"),
            ],
        );

        let roots = assemble(&mut tree, body, Config::default()).expect("should assemble");
        let root_ids: Vec<_> = roots.iter().map(|root| root.id).collect();
        assert_eq!(
            names(&tree, &root_ids),
            vec![Some("a".to_string()), Some("e".to_string())]
        );
        assert_eq!(roots[1].offset, 40);

        let children = tree.children(roots[0].id);
        assert_eq!(
            names(&tree, children),
            vec![Some("b".to_string()), Some("d".to_string())]
        );
        assert_eq!(
            names(&tree, tree.children(children[0])),
            vec![Some("c".to_string())]
        );
    }

    #[test]
    fn deep_chain() {
        const DEPTH: usize = 50_000;

        let mut tree = ComponentTree::new();
        let body = body(
            (0..DEPTH).map(|index| decl(index, "c")).collect(),
            (0..DEPTH)
                .map(|depth| reference(DEPTH + depth, depth, "c"))
                .collect(),
        );

        let roots = assemble(&mut tree, body, Config::default()).expect("should assemble");
        assert_eq!(roots.len(), 1);
        assert_eq!(tree.len(), DEPTH);

        let mut id = roots[0].id;
        for _ in 1..DEPTH {
            assert_eq!(tree.component_count(id), 1);
            id = tree.children(id)[0];
        }
        assert!(tree.children(id).is_empty());
    }

    #[test]
    fn mismatched_name() {
        let mut tree = ComponentTree::new();
        let body = body(
            vec![decl(0, "a"), decl(10, "b")],
            vec![reference(110, 0, "a"), reference(120, 1, "c")],
        );

        let error = assemble(&mut tree, body, Config::default()).expect_err("should fail");
        assert_eq!(error.error_offset, 120);
        assert_eq!(
            error.reason,
            ParserErrorReason::ReferenceMismatch {
                expected: Some("b".to_string()),
                found: Some("c".to_string()),
            }
        );
    }

    #[test]
    fn mismatched_name_unchecked() {
        let mut tree = ComponentTree::new();
        let body = body(
            vec![decl(0, "a"), decl(10, "b")],
            vec![reference(110, 0, "a"), reference(120, 1, "c")],
        );
        let config = Config::default().with_check_references(false);

        let roots = assemble(&mut tree, body, config).expect("should assemble");
        let child = tree.children(roots[0].id)[0];
        assert_eq!(tree[child].name(), Some("b"));
    }

    #[test]
    fn extra_reference() {
        let mut tree = ComponentTree::new();
        let body = body(
            vec![decl(0, "a")],
            vec![reference(110, 0, "a"), reference(120, 1, "b")],
        );

        let error = assemble(&mut tree, body, Config::default()).expect_err("should fail");
        assert_eq!(error, ParserError::extra_reference(120));
    }

    #[test]
    fn missing_reference() {
        let mut tree = ComponentTree::new();
        let body = body(
            vec![decl(0, "a"), decl(10, "b")],
            vec![reference(110, 0, "a")],
        );

        let error = assemble(&mut tree, body, Config::default()).expect_err("should fail");
        assert_eq!(error, ParserError::missing_reference(10));
    }
}
