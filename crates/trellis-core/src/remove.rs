//! Node removal with trivia preservation
//!
//! Removing a node must not lose information carried by its trivia. For each
//! edge of the removed node:
//!
//! - trivia that is only whitespace and line breaks is dropped with the node;
//! - anything else (comments, directive lines) is kept and moved onto the
//!   element that follows, or left in place when nothing follows.
//!
//! Before that, a `///` documentation block directly above the node is
//! stripped, since it documents nothing once the node is gone. The block is
//! adjacent only when no blank line separates it from the node.

use rowan::{GreenNode, GreenNodeData, NodeOrToken};

use crate::config::TrellisConfiguration;
use crate::cst::trivia::{
    TriviaInfo, TriviaList, collect_trivia, has_significant_token, kind_of, kind_of_raw,
    leading_trivia, owned_children, trailing_trivia, with_leading_trivia, with_trailing_trivia,
};
use crate::cst::{GreenElement, SyntaxKind, SyntaxNode, SyntaxToken, edit};
use crate::error::TrellisError;
use crate::ordering::ModifierKind;
use crate::result::Result;

/// Options for removal operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Strip an adjacent `///` block together with the node
    pub strip_documentation_comments: bool,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self {
            strip_documentation_comments: true,
        }
    }
}

impl From<&TrellisConfiguration> for RemoveOptions {
    fn from(config: &TrellisConfiguration) -> Self {
        Self {
            strip_documentation_comments: config.strip_documentation_comments(),
        }
    }
}

/// Tree-level removal operations.
#[derive(Debug, Clone, Default)]
pub struct Remover {
    options: RemoveOptions,
}

impl Remover {
    pub fn new(options: RemoveOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &TrellisConfiguration) -> Self {
        Self::new(RemoveOptions::from(config))
    }

    /// Remove `target` from `container`, returning the container in the new
    /// tree.
    pub fn remove_node(&self, container: &SyntaxNode, target: &SyntaxNode) -> Result<SyntaxNode> {
        edit::ensure_child(container, target, "target")?;

        let mut children = owned_children(&container.green());
        let index = target.index();
        let mut removed = target.green().into_owned();
        if self.options.strip_documentation_comments {
            removed = strip_documentation_comment(&removed);
        }

        let kept = kept_trivia(&removed);
        children.remove(index);
        if !kept.is_empty() {
            prepend_leading(&mut children, index, kept);
        }

        tracing::debug!(kind = ?target.kind(), index, "removed node");
        edit::replace_children(container, children)
    }

    pub fn remove_member(&self, container: &SyntaxNode, member: &SyntaxNode) -> Result<SyntaxNode> {
        if !container.kind().is_member_container() {
            return Err(TrellisError::unsupported(container.kind(), "remove a member"));
        }
        if !member.kind().is_member() {
            return Err(TrellisError::invalid_argument(
                "member",
                format!("{:?} is not a member declaration", member.kind()),
            ));
        }
        self.remove_node(container, member)
    }

    /// Remove the member at `index` among the container's members.
    pub fn remove_member_at(&self, container: &SyntaxNode, index: usize) -> Result<SyntaxNode> {
        let member = container
            .children()
            .filter(|n| n.kind().is_member())
            .nth(index)
            .ok_or_else(|| {
                TrellisError::invalid_argument(
                    "index",
                    format!("no member at index {index} of {:?}", container.kind()),
                )
            })?;
        self.remove_member(container, &member)
    }

    /// Remove a statement from a block or switch section.
    pub fn remove_statement(&self, container: &SyntaxNode, statement: &SyntaxNode) -> Result<SyntaxNode> {
        if !matches!(
            container.kind(),
            SyntaxKind::Block | SyntaxKind::SwitchSection
        ) {
            return Err(TrellisError::unsupported(container.kind(), "remove a statement"));
        }
        if !statement.kind().is_statement() {
            return Err(TrellisError::invalid_argument(
                "statement",
                format!("{:?} is not a statement", statement.kind()),
            ));
        }
        self.remove_node(container, statement)
    }
}

/// Trivia of a removed node that must survive: non-whitespace leading
/// trivia up to its last line break, and non-whitespace trailing trivia
/// moved onto its own line at the node's indentation.
fn kept_trivia(removed: &GreenNodeData) -> TriviaList {
    let TriviaInfo { leading, trailing } = TriviaInfo::of(removed);
    let mut kept = TriviaList::new();
    if !leading.is_whitespace_only() {
        kept.extend(leading.through_last_newline());
    }
    if !trailing.is_whitespace_only() {
        kept.extend(leading.indentation());
        kept.extend(trailing.trim_start_whitespace());
    }
    kept
}

/// Put `trivia` in front of the element at `index`: into the leading trivia
/// of a following node, or as tokens at that position.
fn prepend_leading(children: &mut Vec<GreenElement>, index: usize, trivia: TriviaList) {
    match children.get(index) {
        Some(NodeOrToken::Node(next)) if has_significant_token(next) => {
            let own = leading_trivia(next);
            children[index] = NodeOrToken::Node(with_leading_trivia(next, trivia.concat(own)));
        }
        _ => {
            children.splice(index..index, trivia.into_elements());
        }
    }
}

fn is_documentation_comment(token: &rowan::GreenToken) -> bool {
    kind_of(token) == SyntaxKind::DocComment && token.text().starts_with("///")
}

/// `node` without the `///` block directly above it.
///
/// Scanning backward from the node over its indentation, at most one line
/// break may separate the node from the last comment line. Preceding `///`
/// lines are consumed too. The cut keeps the indentation in front of the
/// first comment line, which becomes the node's indentation.
pub fn strip_documentation_comment(node: &GreenNodeData) -> GreenNode {
    let leading = leading_trivia(node);
    let tokens = leading.tokens();

    let mut end = tokens.len();
    let mut line_breaks = 0;
    while end > 0 && kind_of(&tokens[end - 1]).is_whitespace() {
        if kind_of(&tokens[end - 1]) == SyntaxKind::Newline {
            line_breaks += 1;
        }
        end -= 1;
    }
    if end == 0 || line_breaks > 1 || !is_documentation_comment(&tokens[end - 1]) {
        return node.to_owned();
    }

    let mut first = end - 1;
    loop {
        let mut k = first;
        while k > 0 && kind_of(&tokens[k - 1]) == SyntaxKind::Whitespace {
            k -= 1;
        }
        if k == 0 || kind_of(&tokens[k - 1]) != SyntaxKind::Newline {
            break;
        }
        let mut m = k - 1;
        while m > 0 && kind_of(&tokens[m - 1]) == SyntaxKind::Whitespace {
            m -= 1;
        }
        if m > 0 && is_documentation_comment(&tokens[m - 1]) {
            first = m - 1;
        } else {
            break;
        }
    }

    let remaining: TriviaList = tokens[..first].iter().cloned().collect();
    tracing::trace!(
        lines = tokens[first..end].iter().filter(|t| is_documentation_comment(t)).count(),
        "stripped documentation comment"
    );
    with_leading_trivia(node, remaining)
}

// ============================================================================
// Modifiers
// ============================================================================

fn modifier_list_index(children: &[GreenElement]) -> Option<usize> {
    children.iter().position(|c| {
        c.as_node()
            .is_some_and(|n| kind_of_raw(n.kind()) == SyntaxKind::ModifierList)
    })
}

/// Remove one modifier from a declaration. A declaration without that
/// modifier is returned unchanged.
pub fn remove_modifier(declaration: &SyntaxNode, kind: ModifierKind) -> Result<SyntaxNode> {
    let mut children = owned_children(&declaration.green());
    let Some(list_index) = modifier_list_index(&children) else {
        return Ok(declaration.clone());
    };
    let Some(list) = children[list_index].as_node().cloned() else {
        return Ok(declaration.clone());
    };
    let mut list_children = owned_children(&list);
    let Some(position) = list_children.iter().position(|c| {
        c.as_node()
            .is_some_and(|n| ModifierKind::of(n) == Some(kind))
    }) else {
        return Ok(declaration.clone());
    };
    let Some(removed) = list_children.remove(position).into_node() else {
        return Err(TrellisError::internal("modifier slot held a token"));
    };

    let leading = leading_trivia(&removed);
    let trailing = trailing_trivia(&removed);
    let carried = if trailing.is_whitespace_only() {
        TriviaList::new()
    } else {
        trailing
    };

    let previous = list_children[..position]
        .iter()
        .rposition(|c| c.as_node().is_some());
    match previous {
        // The line start, with its indentation, moves to the next element
        None => {
            let moved = leading.concat(carried);
            if list_children.iter().any(|c| c.as_node().is_some()) {
                prepend_leading(&mut list_children, position, moved);
            } else if !moved.is_empty() {
                prepend_leading(&mut children, list_index + 1, moved);
            }
        }
        Some(previous) => {
            let mut extra = TriviaList::new();
            if !leading.is_whitespace_only() {
                extra.extend(leading);
            }
            extra.extend(carried);
            if !extra.is_empty() {
                if let Some(node) = list_children[previous].as_node().cloned() {
                    let own = trailing_trivia(&node);
                    list_children[previous] =
                        NodeOrToken::Node(with_trailing_trivia(&node, own.concat(extra)));
                }
            }
        }
    }

    if list_children.iter().any(|c| c.as_node().is_some()) {
        children[list_index] = NodeOrToken::Node(GreenNode::new(
            SyntaxKind::ModifierList.into(),
            list_children,
        ));
    } else {
        children.remove(list_index);
    }

    tracing::debug!(modifier = %kind, "removed modifier");
    edit::replace_children(declaration, children)
}

/// Remove the whole modifier list. Its leading trivia moves to the next
/// element; comments between modifiers are kept.
pub fn remove_all_modifiers(declaration: &SyntaxNode) -> Result<SyntaxNode> {
    let mut children = owned_children(&declaration.green());
    let Some(list_index) = modifier_list_index(&children) else {
        return Ok(declaration.clone());
    };
    let Some(list) = children.remove(list_index).into_node() else {
        return Err(TrellisError::internal("modifier list slot held a token"));
    };

    let mut moved = leading_trivia(&list);
    let inner = collect_trivia(&list);
    for token in inner.iter().skip(moved.len()) {
        if kind_of(token).is_comment() {
            moved.push(token.clone());
            moved.extend(TriviaList::space());
        }
    }
    if !moved.is_empty() {
        prepend_leading(&mut children, list_index, moved);
    }

    tracing::debug!("removed all modifiers");
    edit::replace_children(declaration, children)
}

// ============================================================================
// Comments and directives
// ============================================================================

/// Remove a comment token. A comment alone on its line takes the line with
/// it; a comment at the end of a line takes the space in front of it.
/// Returns the root of the new tree.
pub fn remove_comment(comment: &SyntaxToken) -> Result<SyntaxNode> {
    if !comment.kind().is_comment() {
        return Err(TrellisError::invalid_argument(
            "comment",
            format!("{:?} is not a comment", comment.kind()),
        ));
    }
    let parent = comment
        .parent()
        .ok_or_else(|| TrellisError::invalid_argument("comment", "comment has no parent"))?;

    let alone = is_alone_on_line(comment);
    let mut children = owned_children(&parent.green());
    let index = comment.index();
    let kind_at = |i: usize| match children.get(i) {
        Some(NodeOrToken::Token(t)) => Some(kind_of(t)),
        _ => None,
    };

    let mut start = index;
    let mut end = index + 1;
    if index > 0 && kind_at(index - 1) == Some(SyntaxKind::Whitespace) {
        let at_line_end = end == children.len() || kind_at(end) == Some(SyntaxKind::Newline);
        if alone || at_line_end {
            start -= 1;
        }
    }
    if alone {
        if kind_at(end) == Some(SyntaxKind::Whitespace) {
            end += 1;
        }
        if kind_at(end) == Some(SyntaxKind::Newline) {
            end += 1;
        }
    }
    children.drain(start..end);

    tracing::debug!(alone, "removed comment");
    let parent = edit::replace_children(&parent, children)?;
    Ok(parent.ancestors().last().unwrap_or(parent))
}

fn is_alone_on_line(token: &SyntaxToken) -> bool {
    let Some(root) = token.parent_ancestors().last() else {
        return false;
    };
    let text = root.text().to_string();
    let range = token.text_range();
    let start: usize = range.start().into();
    let end: usize = range.end().into();
    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);
    text[line_start..start].trim().is_empty() && text[end..line_end].trim().is_empty()
}

/// Directive lines (`#if`, `#endif`, ...) inside `node`, in document order.
pub fn directive_boundaries(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::Directive)
        .collect()
}

/// Remove `target` with default options. See [`Remover::remove_node`].
pub fn remove_node(container: &SyntaxNode, target: &SyntaxNode) -> Result<SyntaxNode> {
    Remover::default().remove_node(container, target)
}

pub fn remove_member(container: &SyntaxNode, member: &SyntaxNode) -> Result<SyntaxNode> {
    Remover::default().remove_member(container, member)
}

pub fn remove_member_at(container: &SyntaxNode, index: usize) -> Result<SyntaxNode> {
    Remover::default().remove_member_at(container, index)
}

pub fn remove_statement(container: &SyntaxNode, statement: &SyntaxNode) -> Result<SyntaxNode> {
    Remover::default().remove_statement(container, statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::make::{self, line};
    use crate::cst::trivia::{newline, whitespace};
    use ModifierKind::*;

    fn comment(kind: SyntaxKind, text: &str) -> rowan::GreenToken {
        make::token(kind, text)
    }

    fn with_leading(node: GreenNode, tokens: Vec<rowan::GreenToken>) -> GreenNode {
        with_leading_trivia(&node, TriviaList::from(tokens))
    }

    fn class(members: Vec<GreenNode>) -> SyntaxNode {
        let unit = make::compilation_unit(vec![make::class_decl("", &[], "C", members)]);
        SyntaxNode::new_root(unit).first_child().unwrap()
    }

    fn member(class: &SyntaxNode, index: usize) -> SyntaxNode {
        class
            .children()
            .filter(|n| n.kind().is_member())
            .nth(index)
            .unwrap()
    }

    #[test]
    fn test_strip_adjacent_documentation() {
        let documented = with_leading(
            make::line("", make::method(&[], "void", "M")),
            vec![
                whitespace("    "),
                comment(SyntaxKind::DocComment, "/// Summary"),
                newline("\n"),
                whitespace("    "),
                comment(SyntaxKind::DocComment, "/// More"),
                newline("\n"),
                whitespace("    "),
            ],
        );
        let stripped = strip_documentation_comment(&documented);
        assert_eq!(stripped.to_string(), "    void M() { }\n");
    }

    #[test]
    fn test_blank_line_breaks_adjacency() {
        let documented = with_leading(
            make::field(&[], "int", "x"),
            vec![
                comment(SyntaxKind::DocComment, "/// Summary"),
                newline("\n"),
                newline("\n"),
            ],
        );
        let stripped = strip_documentation_comment(&documented);
        assert_eq!(stripped, documented);
    }

    #[test]
    fn test_regular_comment_is_not_documentation() {
        let commented = with_leading(
            make::field(&[], "int", "x"),
            vec![comment(SyntaxKind::LineComment, "// note"), newline("\n")],
        );
        assert_eq!(strip_documentation_comment(&commented), commented);
    }

    #[test]
    fn test_remove_member_with_documentation() {
        let documented = with_leading(
            line("", make::method(&[], "void", "M")),
            vec![
                whitespace("    "),
                comment(SyntaxKind::DocComment, "/// Gone"),
                newline("\n"),
                whitespace("    "),
            ],
        );
        let class = class(vec![line("    ", make::field(&[], "int", "a")), documented]);

        let edited = remove_member(&class, &member(&class, 1)).unwrap();
        assert_eq!(edited.text().to_string(), "class C\n{\n    int a;\n}\n");
    }

    #[test]
    fn test_leading_comment_survives() {
        let commented = with_leading(
            line("", make::field(&[], "int", "a")),
            vec![
                whitespace("    "),
                comment(SyntaxKind::LineComment, "// keep"),
                newline("\n"),
                whitespace("    "),
            ],
        );
        let class = class(vec![commented, line("    ", make::field(&[], "int", "b"))]);

        let edited = remove_member_at(&class, 0).unwrap();
        assert_eq!(
            edited.text().to_string(),
            "class C\n{\n    // keep\n    int b;\n}\n"
        );
    }

    #[test]
    fn test_trailing_comment_moves_to_own_line() {
        let annotated = with_trailing_trivia(
            &line("    ", make::field(&[], "int", "a")),
            TriviaList::from(vec![
                whitespace(" "),
                comment(SyntaxKind::LineComment, "// note"),
                newline("\n"),
            ]),
        );
        let class = class(vec![annotated, line("    ", make::field(&[], "int", "b"))]);

        let edited = remove_member_at(&class, 0).unwrap();
        assert_eq!(
            edited.text().to_string(),
            "class C\n{\n    // note\n    int b;\n}\n"
        );
    }

    #[test]
    fn test_directive_is_kept() {
        let guarded = with_leading(
            line("", make::field(&[], "int", "a")),
            vec![
                comment(SyntaxKind::Directive, "#if DEBUG"),
                newline("\n"),
                whitespace("    "),
            ],
        );
        let class = class(vec![guarded]);

        let edited = remove_member_at(&class, 0).unwrap();
        assert_eq!(edited.text().to_string(), "class C\n{\n#if DEBUG\n}\n");
        assert_eq!(directive_boundaries(&edited).len(), 1);
    }

    #[test]
    fn test_documentation_kept_when_disabled() {
        let documented = with_leading(
            line("", make::field(&[], "int", "a")),
            vec![
                whitespace("    "),
                comment(SyntaxKind::DocComment, "/// Docs"),
                newline("\n"),
                whitespace("    "),
            ],
        );
        let class = class(vec![documented]);
        let remover = Remover::new(RemoveOptions {
            strip_documentation_comments: false,
        });

        let edited = remover.remove_member_at(&class, 0).unwrap();
        assert_eq!(edited.text().to_string(), "class C\n{\n    /// Docs\n}\n");
    }

    #[test]
    fn test_remove_requires_child() {
        let class = class(vec![line("    ", make::field(&[], "int", "a"))]);
        let type_ref = member(&class, 0).first_child().unwrap();
        let err = remove_node(&class, &type_ref).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);

        assert!(remove_member_at(&class, 3).is_err());
    }

    #[test]
    fn test_remove_statement() {
        let block = SyntaxNode::new_root(make::block(
            "",
            vec![
                line("    ", make::expr_stmt("a()")),
                line("    ", make::expr_stmt("b()")),
            ],
        ));
        let first = block.children().next().unwrap();
        let edited = remove_statement(&block, &first).unwrap();
        assert_eq!(edited.text().to_string(), "{\n    b();\n}");
    }

    #[test]
    fn test_remove_first_modifier_keeps_indentation() {
        let field = SyntaxNode::new_root(line("    ", make::field(&[Public, Static], "int", "x")));
        let edited = remove_modifier(&field, Public).unwrap();
        assert_eq!(edited.text().to_string(), "    static int x;\n");
    }

    #[test]
    fn test_remove_last_modifier() {
        let field = SyntaxNode::new_root(make::field(&[Public, Static], "int", "x"));
        let edited = remove_modifier(&field, Static).unwrap();
        assert_eq!(edited.text().to_string(), "public int x;");
    }

    #[test]
    fn test_remove_only_modifier_drops_list() {
        let field = SyntaxNode::new_root(line("    ", make::field(&[Private], "int", "x")));
        let edited = remove_modifier(&field, Private).unwrap();
        assert_eq!(edited.text().to_string(), "    int x;\n");
        assert!(
            edited
                .children()
                .all(|n| n.kind() != SyntaxKind::ModifierList)
        );
    }

    #[test]
    fn test_remove_missing_modifier_is_noop() {
        let field = SyntaxNode::new_root(make::field(&[Public], "int", "x"));
        let edited = remove_modifier(&field, Static).unwrap();
        assert_eq!(edited.text().to_string(), "public int x;");
    }

    #[test]
    fn test_remove_all_modifiers() {
        let field = SyntaxNode::new_root(line(
            "    ",
            make::field(&[Private, Static, ReadOnly], "int", "x"),
        ));
        let edited = remove_all_modifiers(&field).unwrap();
        assert_eq!(edited.text().to_string(), "    int x;\n");
    }

    #[test]
    fn test_remove_comment_alone_on_line() {
        let commented = with_leading(
            line("", make::field(&[], "int", "a")),
            vec![
                whitespace("    "),
                comment(SyntaxKind::LineComment, "// drop me"),
                newline("\n"),
                whitespace("    "),
            ],
        );
        let class = class(vec![commented]);
        let token = class
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::LineComment)
            .unwrap();

        let root = remove_comment(&token).unwrap();
        assert_eq!(root.text().to_string(), "class C\n{\n    int a;\n}\n");
    }

    #[test]
    fn test_remove_trailing_comment() {
        let annotated = with_trailing_trivia(
            &line("    ", make::field(&[], "int", "a")),
            TriviaList::from(vec![
                whitespace(" "),
                comment(SyntaxKind::LineComment, "// note"),
                newline("\n"),
            ]),
        );
        let class = class(vec![annotated]);
        let token = class
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::LineComment)
            .unwrap();

        let root = remove_comment(&token).unwrap();
        assert_eq!(root.text().to_string(), "class C\n{\n    int a;\n}\n");
    }
}
