//! Text report of an encapsulation hierarchy
//!
//! ```text
//! Model 'hh' has 1 components
//!   - Component 'membrane' has 2 child components
//!       - Component 'sodium_channel' has 0 child components
//!       - Component 'potassium_channel' has 0 child components
//! ```

use anstream::print;
use cellml_component::{ComponentTree, Encapsulation};
use owo_colors::Style;

use crate::{document::Document, stylesheet};

const FIRST_SPACER: &str = "  - ";
const INDENT: &str = "    ";

/// Prints the encapsulation hierarchy of `document` to stdout.
pub fn print(document: &Document, use_colors: bool) {
    let report = encapsulation_to_string(document, use_colors);
    print!("{report}");
}

/// Applies stylesheet colors, or leaves text plain when colors are off.
#[derive(Debug, Clone, Copy)]
struct Painter {
    use_colors: bool,
}

impl Painter {
    fn paint(self, style: Style, text: &str) -> String {
        if self.use_colors {
            style.style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn encapsulation_to_string(document: &Document, use_colors: bool) -> String {
    let painter = Painter { use_colors };
    let mut lines = Vec::new();

    match document {
        Document::Model(model) => {
            let name = model.name().unwrap_or_default();
            let name = painter.paint(stylesheet::MODEL_NAME, name);
            lines.push(format!(
                "Model '{name}' has {} components",
                model.component_count()
            ));

            component_lines(&mut lines, model.tree(), &model.encapsulation(), painter);
        }
        Document::Components { tree, roots } => {
            lines.push(format!("Document has {} top-level components", roots.len()));

            for &root in roots {
                component_lines(&mut lines, tree, &tree.encapsulation(root), painter);
            }
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn component_lines(
    lines: &mut Vec<String>,
    tree: &ComponentTree,
    encapsulation: &Encapsulation,
    painter: Painter,
) {
    // cycle notes waiting for their component's subtree to end, by depth
    let mut pending_notes: Vec<(usize, String)> = Vec::new();

    for appearance in encapsulation.appearances() {
        flush_notes(lines, &mut pending_notes, appearance.depth());

        let spacer = format!("{}{FIRST_SPACER}", INDENT.repeat(appearance.depth()));
        let id = appearance.component();
        let name = tree[id].name().unwrap_or_default();
        let name = painter.paint(stylesheet::COMPONENT_NAME, name);
        let child_count = tree.component_count(id);
        lines.push(format!(
            "{spacer}Component '{name}' has {child_count} child components"
        ));

        // children that enclose this component are counted but not walked again
        let skipped = child_count - appearance.child_count();
        if skipped > 0 {
            let note = painter.paint(
                stylesheet::CYCLE_NOTE,
                &format!("({skipped} enclosing components not repeated)"),
            );
            pending_notes.push((appearance.depth(), format!("{INDENT}{spacer}{note}")));
        }
    }

    flush_notes(lines, &mut pending_notes, 0);
}

/// Emits the notes of every component at `depth` or deeper.
fn flush_notes(lines: &mut Vec<String>, pending_notes: &mut Vec<(usize, String)>, depth: usize) {
    // depths only grow towards the top of the stack
    let keep = pending_notes.partition_point(|(note_depth, _)| *note_depth < depth);
    lines.extend(pending_notes.drain(keep..).rev().map(|(_, note)| note));
}
