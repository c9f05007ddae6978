//! Tree type aliases bound to [`TrellisLanguage`]

use super::TrellisLanguage;

pub type SyntaxNode = rowan::SyntaxNode<TrellisLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TrellisLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TrellisLanguage>;

/// Owned child of a green node.
pub type GreenElement = rowan::NodeOrToken<rowan::GreenNode, rowan::GreenToken>;
