//! Draws a tree as an indented diagram, one vertex per line:
//!
//! ```text
//! 5
//! ├─›3
//! │  └─›1
//! └─»8
//! ```
//!
//! `›` marks a left child and `»` a right child. Diagnostic only.

use std::fmt::{self, Display, Write};

use crate::engine::Engine;
use crate::vertex::{Augment, Color, VertexId};

const BRANCH: &str = "├─";
const LAST: &str = "└─";
const LEFT: &str = "›";
const RIGHT: &str = "»";
const BAR: &str = "│  ";
const GAP: &str = "   ";

/// Writes the label of one vertex; what it shows depends on the vertex's augment.
fn label<T, W>(out: &mut W, engine: &Engine<T>, id: VertexId) -> fmt::Result
where
    T: Display,
    W: Write,
{
    let element = engine.element(id);
    match engine.augment(id) {
        Augment::Plain => write!(out, "{element}"),
        Augment::Height(height) => {
            let child_height = |child: Option<VertexId>| match child.map(|c| engine.augment(c)) {
                Some(Augment::Height(h)) => h,
                _ => -1,
            };
            let balance = child_height(engine.left(id)) - child_height(engine.right(id));
            write!(out, "{element} {height}/{balance}")
        }
        Augment::Color(Color::Red) => write!(out, "R{{{element}}}"),
        Augment::Color(Color::Black) => write!(out, "B{{{element}}}"),
        Augment::Color(Color::Uncolored) => write!(out, "?{{{element}}}"),
    }
}

/// Writes the diagram of the whole tree. An empty tree renders as nothing.
pub(crate) fn render<T, W>(out: &mut W, engine: &Engine<T>) -> fmt::Result
where
    T: Display,
    W: Write,
{
    // (vertex, text before its label, indentation handed to its children)
    let mut stack: Vec<(VertexId, String, String)> = engine
        .root_id()
        .map(|root| (root, String::new(), String::new()))
        .into_iter()
        .collect();

    while let Some((id, lead, indent)) = stack.pop() {
        out.write_str(&lead)?;
        label(out, engine, id)?;
        out.write_char('\n')?;

        match (engine.left(id), engine.right(id)) {
            (Some(left), Some(right)) => {
                stack.push((right, format!("{indent}{LAST}{RIGHT}"), format!("{indent}{GAP}")));
                stack.push((left, format!("{indent}{BRANCH}{LEFT}"), format!("{indent}{BAR}")));
            }
            (Some(left), None) => {
                stack.push((left, format!("{indent}{LAST}{LEFT}"), format!("{indent}{GAP}")));
            }
            (None, Some(right)) => {
                stack.push((right, format!("{indent}{LAST}{RIGHT}"), format!("{indent}{GAP}")));
            }
            (None, None) => {}
        }
    }
    Ok(())
}
