//! Treeviz formatter for parse trees
//!
//! One line per node, nesting drawn with box connectors:
//!
//!     ≔ E
//!     ├─ ≔ E
//!     │  ├─ ◦ 1 : int
//!     │  └─ ◦ 2 : int
//!     └─ ◦ 3 : int
//!
//! Icons
//!     Branch (rule): ≔
//!     Leaf with a token class: ◦
//!     Literal spelled by several tokens: "
//!     Empty leaf (epsilon): ∅

use crate::formats::registry::{FormatError, Formatter};
use crate::parsing::Node;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(node: &Node) -> &'static str {
    match node {
        Node::Branch { .. } => "≔",
        Node::Leaf { value, .. } if value.is_empty() => "∅",
        Node::Leaf { class: Some(_), .. } => "◦",
        Node::Leaf { class: None, .. } => "\"",
    }
}

fn label(node: &Node) -> String {
    match node {
        Node::Branch { rule, .. } => rule.clone(),
        Node::Leaf { value, .. } if value.is_empty() => "(empty)".to_string(),
        Node::Leaf { value, class } => match class {
            Some(class) => format!("{} : {}", truncate(value, 30), class),
            None => truncate(value, 30),
        },
    }
}

/// Render `node` one line per node. Walks with an explicit stack, since trees of
/// left-recursive rules run as deep as the input is long.
pub fn to_treeviz_str(node: &Node) -> String {
    let mut output = format!("{} {}\n", icon(node), label(node));
    // (node, depth, last among its siblings); `open[d]` is whether depth d still has
    // siblings below, which decides between "│  " and "   " in the prefix.
    let mut stack: Vec<(&Node, usize, bool)> = Vec::new();
    let mut open: Vec<bool> = Vec::new();
    push_children(&mut stack, node, 0);
    while let Some((current, depth, is_last)) = stack.pop() {
        open.truncate(depth);
        for &more in &open {
            output.push_str(if more { "│  " } else { "   " });
        }
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!("{} {} {}\n", connector, icon(current), label(current)));
        open.push(!is_last);
        push_children(&mut stack, current, depth + 1);
    }
    output
}

fn push_children<'n>(stack: &mut Vec<(&'n Node, usize, bool)>, node: &'n Node, depth: usize) {
    let children = node.children();
    for (i, child) in children.iter().enumerate().rev() {
        stack.push((child, depth, i == children.len() - 1));
    }
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(node))
    }

    fn description(&self) -> &str {
        "One line per node with Unicode icons"
    }
}
