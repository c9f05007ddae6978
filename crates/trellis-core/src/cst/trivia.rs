//! Trivia handling for the declaration tree
//!
//! Trivia (whitespace, line breaks, comments, directive lines) is stored as
//! ordinary tokens in the green tree. Logically every run of trivia belongs to
//! the significant token it is adjacent to, and it is stored inside the
//! innermost node containing that token:
//!
//! - **Leading trivia** of a node: the trivia tokens in front of its first
//!   significant token, wherever they sit along the first-child path.
//! - **Trailing trivia** of a node: the trivia tokens after its last
//!   significant token, along the last-child path.
//!
//! Sequence elements (members, modifiers, statements) own their whole line:
//! indentation, blank lines and comments in front of them are leading trivia,
//! the end-of-line break is trailing trivia.
//!
//! All functions here work on green nodes and return new green nodes; nothing
//! is mutated in place.
//!
//! # Example
//!
//! ```rust
//! use trellis_core::cst::{make, trivia::{TriviaList, leading_trivia, with_leading_trivia}};
//!
//! let field = make::field(&[], "int", "x");
//! let indented = with_leading_trivia(&field, TriviaList::indent("    "));
//! assert_eq!(indented.to_string(), "    int x;");
//! assert_eq!(leading_trivia(&indented).text(), "    ");
//! ```

use rowan::{GreenNode, GreenNodeData, GreenToken, NodeOrToken};

use super::{GreenElement, SyntaxKind};

/// An ordered run of trivia tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TriviaList {
    tokens: Vec<GreenToken>,
}

impl TriviaList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single whitespace token, or an empty list for an empty indent.
    pub fn indent(text: &str) -> Self {
        if text.is_empty() {
            Self::new()
        } else {
            Self::from(vec![whitespace(text)])
        }
    }

    pub fn space() -> Self {
        Self::indent(" ")
    }

    pub fn newline() -> Self {
        Self::from(vec![newline("\n")])
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GreenToken> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[GreenToken] {
        &self.tokens
    }

    pub fn push(&mut self, token: GreenToken) {
        self.tokens.push(token);
    }

    pub fn extend(&mut self, other: TriviaList) {
        self.tokens.extend(other.tokens);
    }

    /// `self` followed by `other`.
    pub fn concat(mut self, other: TriviaList) -> Self {
        self.extend(other);
        self
    }

    /// True when every token is a space, tab or line break (or the list is empty).
    pub fn is_whitespace_only(&self) -> bool {
        self.tokens.iter().all(|t| kind_of(t).is_whitespace())
    }

    pub fn has_comments(&self) -> bool {
        self.tokens.iter().any(|t| kind_of(t).is_comment())
    }

    pub fn has_directives(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| kind_of(t) == SyntaxKind::Directive)
    }

    pub fn has_newline(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| kind_of(t) == SyntaxKind::Newline)
    }

    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text()).collect()
    }

    /// Whitespace after the last line break, i.e. the indentation of the
    /// line the next token starts on.
    pub fn indentation(&self) -> TriviaList {
        let start = self
            .tokens
            .iter()
            .rposition(|t| kind_of(t) == SyntaxKind::Newline)
            .map_or(0, |i| i + 1);
        let tail = &self.tokens[start..];
        if tail.iter().all(|t| kind_of(t) == SyntaxKind::Whitespace) {
            tail.iter().cloned().collect()
        } else {
            tail.iter()
                .rev()
                .take_while(|t| kind_of(t) == SyntaxKind::Whitespace)
                .cloned()
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect()
        }
    }

    /// Everything up to and including the last line break. Lists without a
    /// line break are returned unchanged.
    pub fn through_last_newline(&self) -> TriviaList {
        match self
            .tokens
            .iter()
            .rposition(|t| kind_of(t) == SyntaxKind::Newline)
        {
            Some(i) => self.tokens[..=i].iter().cloned().collect(),
            None => self.clone(),
        }
    }

    /// The list without its leading spaces and tabs.
    pub fn trim_start_whitespace(&self) -> TriviaList {
        self.tokens
            .iter()
            .skip_while(|t| kind_of(t) == SyntaxKind::Whitespace)
            .cloned()
            .collect()
    }

    /// Tokens as green children, ready to splice into a node.
    pub fn into_elements(self) -> impl Iterator<Item = GreenElement> {
        self.tokens.into_iter().map(NodeOrToken::Token)
    }
}

impl From<Vec<GreenToken>> for TriviaList {
    fn from(tokens: Vec<GreenToken>) -> Self {
        debug_assert!(tokens.iter().all(|t| kind_of(t).is_trivia()));
        Self { tokens }
    }
}

impl FromIterator<GreenToken> for TriviaList {
    fn from_iter<I: IntoIterator<Item = GreenToken>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl IntoIterator for TriviaList {
    type Item = GreenToken;
    type IntoIter = std::vec::IntoIter<GreenToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Leading and trailing trivia of one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriviaInfo {
    pub leading: TriviaList,
    pub trailing: TriviaList,
}

impl TriviaInfo {
    pub fn of(node: &GreenNodeData) -> Self {
        Self {
            leading: leading_trivia(node),
            trailing: trailing_trivia(node),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }

    pub fn has_comments(&self) -> bool {
        self.leading.has_comments() || self.trailing.has_comments()
    }
}

pub fn whitespace(text: &str) -> GreenToken {
    GreenToken::new(SyntaxKind::Whitespace.into(), text)
}

pub fn newline(text: &str) -> GreenToken {
    GreenToken::new(SyntaxKind::Newline.into(), text)
}

pub(crate) fn kind_of(token: &GreenToken) -> SyntaxKind {
    kind_of_raw(token.kind())
}

pub(crate) fn kind_of_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
    <super::TrellisLanguage as rowan::Language>::kind_from_raw(raw)
}

fn is_trivia_token(raw: rowan::SyntaxKind) -> bool {
    kind_of_raw(raw).is_trivia()
}

/// Whether the node contains at least one non-trivia token.
pub fn has_significant_token(node: &GreenNodeData) -> bool {
    node.children().any(|child| match child {
        NodeOrToken::Token(t) => !is_trivia_token(t.kind()),
        NodeOrToken::Node(n) => has_significant_token(n),
    })
}

/// Owned copies of a green node's children.
pub fn owned_children(node: &GreenNodeData) -> Vec<GreenElement> {
    node.children()
        .map(|child| match child {
            NodeOrToken::Node(n) => NodeOrToken::Node(n.to_owned()),
            NodeOrToken::Token(t) => NodeOrToken::Token(t.to_owned()),
        })
        .collect()
}

pub fn leading_trivia(node: &GreenNodeData) -> TriviaList {
    fn collect(node: &GreenNodeData, out: &mut Vec<GreenToken>) -> bool {
        for child in node.children() {
            match child {
                NodeOrToken::Token(t) if is_trivia_token(t.kind()) => out.push(t.to_owned()),
                NodeOrToken::Token(_) => return true,
                NodeOrToken::Node(n) => {
                    if collect(n, out) {
                        return true;
                    }
                }
            }
        }
        false
    }

    let mut tokens = Vec::new();
    collect(node, &mut tokens);
    TriviaList::from(tokens)
}

pub fn trailing_trivia(node: &GreenNodeData) -> TriviaList {
    fn collect(node: &GreenNodeData, out: &mut Vec<GreenToken>) -> bool {
        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            match child {
                NodeOrToken::Token(t) if is_trivia_token(t.kind()) => out.push(t.to_owned()),
                NodeOrToken::Token(_) => return true,
                NodeOrToken::Node(n) => {
                    if collect(n, out) {
                        return true;
                    }
                }
            }
        }
        false
    }

    let mut tokens = Vec::new();
    collect(node, &mut tokens);
    tokens.reverse();
    TriviaList::from(tokens)
}

/// Replace the node's leading trivia.
pub fn with_leading_trivia(node: &GreenNodeData, trivia: TriviaList) -> GreenNode {
    let (stripped, _) = strip_leading(node);
    if trivia.is_empty() {
        stripped
    } else {
        place_leading(&stripped, trivia)
    }
}

/// Replace the node's trailing trivia.
pub fn with_trailing_trivia(node: &GreenNodeData, trivia: TriviaList) -> GreenNode {
    let (stripped, _) = strip_trailing(node);
    if trivia.is_empty() {
        stripped
    } else {
        place_trailing(&stripped, trivia)
    }
}

/// The node with both leading and trailing trivia removed.
pub fn without_trivia(node: &GreenNodeData) -> GreenNode {
    let (stripped, _) = strip_leading(node);
    strip_trailing(&stripped).0
}

/// Every trivia token in the subtree, in document order.
pub fn collect_trivia(node: &GreenNodeData) -> TriviaList {
    fn walk(node: &GreenNodeData, out: &mut Vec<GreenToken>) {
        for child in node.children() {
            match child {
                NodeOrToken::Token(t) if is_trivia_token(t.kind()) => out.push(t.to_owned()),
                NodeOrToken::Token(_) => {}
                NodeOrToken::Node(n) => walk(n, out),
            }
        }
    }

    let mut tokens = Vec::new();
    walk(node, &mut tokens);
    TriviaList::from(tokens)
}

fn strip_leading(node: &GreenNodeData) -> (GreenNode, bool) {
    let mut children = Vec::new();
    let mut found = false;
    for child in node.children() {
        if found {
            children.push(owned(child));
            continue;
        }
        match child {
            NodeOrToken::Token(t) if is_trivia_token(t.kind()) => {}
            NodeOrToken::Token(t) => {
                found = true;
                children.push(NodeOrToken::Token(t.to_owned()));
            }
            NodeOrToken::Node(n) => {
                let (stripped, hit) = strip_leading(n);
                found = hit;
                children.push(NodeOrToken::Node(stripped));
            }
        }
    }
    (GreenNode::new(node.kind(), children), found)
}

fn strip_trailing(node: &GreenNodeData) -> (GreenNode, bool) {
    let mut children = Vec::new();
    let mut found = false;
    let originals: Vec<_> = node.children().collect();
    for child in originals.into_iter().rev() {
        if found {
            children.push(owned(child));
            continue;
        }
        match child {
            NodeOrToken::Token(t) if is_trivia_token(t.kind()) => {}
            NodeOrToken::Token(t) => {
                found = true;
                children.push(NodeOrToken::Token(t.to_owned()));
            }
            NodeOrToken::Node(n) => {
                let (stripped, hit) = strip_trailing(n);
                found = hit;
                children.push(NodeOrToken::Node(stripped));
            }
        }
    }
    children.reverse();
    (GreenNode::new(node.kind(), children), found)
}

fn place_leading(node: &GreenNodeData, trivia: TriviaList) -> GreenNode {
    let mut children = owned_children(node);
    let target = children.iter().position(|child| match child {
        NodeOrToken::Token(t) => !is_trivia_token(t.kind()),
        NodeOrToken::Node(n) => has_significant_token(n),
    });
    match target {
        Some(i) => {
            if let NodeOrToken::Node(n) = &children[i] {
                children[i] = NodeOrToken::Node(place_leading(n, trivia));
            } else {
                children.splice(i..i, trivia.into_elements());
            }
        }
        None => {
            children.splice(0..0, trivia.into_elements());
        }
    }
    GreenNode::new(node.kind(), children)
}

fn place_trailing(node: &GreenNodeData, trivia: TriviaList) -> GreenNode {
    let mut children = owned_children(node);
    let target = children.iter().rposition(|child| match child {
        NodeOrToken::Token(t) => !is_trivia_token(t.kind()),
        NodeOrToken::Node(n) => has_significant_token(n),
    });
    match target {
        Some(i) => {
            if let NodeOrToken::Node(n) = &children[i] {
                children[i] = NodeOrToken::Node(place_trailing(n, trivia));
            } else {
                children.splice(i + 1..i + 1, trivia.into_elements());
            }
        }
        None => {
            let end = children.len();
            children.splice(end..end, trivia.into_elements());
        }
    }
    GreenNode::new(node.kind(), children)
}

fn owned(child: NodeOrToken<&GreenNodeData, &rowan::GreenTokenData>) -> GreenElement {
    match child {
        NodeOrToken::Node(n) => NodeOrToken::Node(n.to_owned()),
        NodeOrToken::Token(t) => NodeOrToken::Token(t.to_owned()),
    }
}
