//! Persistent tree edits
//!
//! Edits rebuild the green spine from the edited node up to the root and
//! share every untouched subtree with the old tree. The old tree stays valid.

use rowan::{GreenNode, NodeOrToken};

use super::{GreenElement, SyntaxKind, SyntaxNode, trivia};
use crate::error::TrellisError;
use crate::result::Result;

/// Child indices (including tokens) from the root down to `node`.
fn path_from_root(node: &SyntaxNode) -> Vec<usize> {
    let mut path: Vec<usize> = node
        .ancestors()
        .filter(|n| n.parent().is_some())
        .map(|n| n.index())
        .collect();
    path.reverse();
    path
}

fn node_at_path(root: SyntaxNode, path: &[usize]) -> Option<SyntaxNode> {
    path.iter().try_fold(root, |node, &index| {
        node.children_with_tokens().nth(index)?.into_node()
    })
}

/// Replace `old` with `replacement` and return the replacement positioned
/// in the new tree.
pub fn replace_node(old: &SyntaxNode, replacement: GreenNode) -> Result<SyntaxNode> {
    let path = path_from_root(old);
    let root = SyntaxNode::new_root(old.replace_with(replacement));
    node_at_path(root, &path).ok_or_else(|| {
        TrellisError::internal("edited node is missing from the rebuilt tree")
    })
}

/// Replace the children of `node` and return the rebuilt node in the new tree.
pub fn replace_children(node: &SyntaxNode, children: Vec<GreenElement>) -> Result<SyntaxNode> {
    replace_node(node, GreenNode::new(node.kind().into(), children))
}

/// Require `child` to be a direct child node of `parent`.
pub fn ensure_child(parent: &SyntaxNode, child: &SyntaxNode, name: &'static str) -> Result<()> {
    if child.parent().as_ref() == Some(parent) {
        Ok(())
    } else {
        Err(TrellisError::invalid_argument(
            name,
            format!("{:?} is not a child of {:?}", child.kind(), parent.kind()),
        ))
    }
}

/// Position just past the line break that ends the line of the element at
/// `index`, or `index + 1` when something significant follows on that line.
pub fn end_of_line(children: &[GreenElement], index: usize) -> usize {
    for (i, child) in children.iter().enumerate().skip(index + 1) {
        match child {
            NodeOrToken::Token(t) if trivia::kind_of(t) == SyntaxKind::Newline => return i + 1,
            NodeOrToken::Token(t) if trivia::kind_of(t).is_trivia() => continue,
            _ => break,
        }
    }
    index + 1
}
