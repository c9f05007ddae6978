//! Branch chain analysis
//!
//! An `if` / `else if` / `else` chain is discovered from any of its members:
//! walk up through enclosing `else` clauses to the topmost `if`, then follow
//! the `else` links forward. Each branch is either *delimited* (its body is a
//! block) or *bare* (an embedded statement). The analyzer decides once per
//! chain whether braces should be added, removed, or both offered, and the
//! edit functions apply that decision to every branch at once.
//!
//! The same reasoning is available for single-body statements (`while`,
//! `foreach`) through the embedded-statement functions, and for switch
//! sections through [`analyze_switch_section`].

use rowan::{GreenNode, GreenNodeData, NodeOrToken};

use crate::config::FormattingOptions;
use crate::cst::ast::{self, AstNode, Block, ElseClause, IfStmt, LoopStmt, SwitchSection};
use crate::cst::trivia::{
    TriviaList, kind_of, kind_of_raw, leading_trivia, owned_children, trailing_trivia,
    with_leading_trivia, with_trailing_trivia,
};
use crate::cst::{GreenElement, SyntaxKind, SyntaxNode, edit, is_single_line, make};
use crate::error::TrellisError;
use crate::result::Result;

/// Where a branch sits in its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchPosition {
    /// The outermost `if`
    Top,
    /// An `else if`
    Middle,
    /// A final `else` without a condition
    TerminalElse,
}

/// What should happen to the braces of a chain or switch section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterAction {
    NoChange,
    AddDelimiters,
    RemoveDelimiters,
    /// Branches are mixed and either direction is valid
    AddOrRemove,
}

impl DelimiterAction {
    pub fn can_add(self) -> bool {
        matches!(
            self,
            DelimiterAction::AddDelimiters | DelimiterAction::AddOrRemove
        )
    }

    pub fn can_remove(self) -> bool {
        matches!(
            self,
            DelimiterAction::RemoveDelimiters | DelimiterAction::AddOrRemove
        )
    }
}

/// One conditional branch: an `if` node or a terminal `else` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    node: SyntaxNode,
    position: BranchPosition,
}

impl Branch {
    pub fn node(&self) -> &SyntaxNode {
        &self.node
    }

    pub fn position(&self) -> BranchPosition {
        self.position
    }

    /// The branch body
    pub fn statement(&self) -> Option<SyntaxNode> {
        match self.position {
            BranchPosition::TerminalElse => ElseClause::cast(self.node.clone())?.statement(),
            _ => IfStmt::cast(self.node.clone())?.statement(),
        }
    }

    pub fn condition(&self) -> Option<SyntaxNode> {
        IfStmt::cast(self.node.clone())?.condition()
    }

    pub fn is_delimited(&self) -> bool {
        self.statement()
            .is_some_and(|s| s.kind() == SyntaxKind::Block)
    }

    /// Whether the body could be written without braces.
    pub fn supports_bare(&self) -> bool {
        if self.condition().is_some_and(|c| !is_single_line(&c)) {
            return false;
        }
        let Some(statement) = self.statement().and_then(|s| unwrap_single(&s)) else {
            return false;
        };
        if matches!(
            statement.kind(),
            SyntaxKind::LocalDeclStmt | SyntaxKind::LabeledStmt
        ) {
            return false;
        }
        if statement.kind() == SyntaxKind::IfStmt
            && self.is_followed_by_else()
            && ends_without_else(&statement)
        {
            return false;
        }
        is_single_line(&statement)
    }

    fn is_followed_by_else(&self) -> bool {
        IfStmt::cast(self.node.clone()).is_some_and(|s| s.else_clause().is_some())
    }
}

/// A block with exactly one statement yields that statement; any other
/// statement is returned as is.
fn unwrap_single(statement: &SyntaxNode) -> Option<SyntaxNode> {
    match Block::cast(statement.clone()) {
        Some(block) => {
            let mut statements = block.statements();
            let first = statements.next()?;
            statements.next().is_none().then_some(first)
        }
        None => Some(statement.clone()),
    }
}

/// Whether the chain starting at `statement` has no final `else`, so a
/// following `else` would bind to it.
fn ends_without_else(statement: &SyntaxNode) -> bool {
    let mut current = IfStmt::cast(statement.clone());
    while let Some(if_stmt) = current {
        let Some(else_clause) = if_stmt.else_clause() else {
            return true;
        };
        current = else_clause.statement().and_then(IfStmt::cast);
    }
    false
}

/// The `if`/`else if`/`else` branches of one chain, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchChain {
    branches: Vec<Branch>,
}

impl BranchChain {
    /// Chain containing `node`, which may be any `if` or `else` clause of it.
    pub fn of(node: &SyntaxNode) -> Option<Self> {
        let mut top = match node.kind() {
            SyntaxKind::IfStmt => IfStmt::cast(node.clone())?,
            SyntaxKind::ElseClause => ElseClause::cast(node.clone())?.parent_if()?,
            _ => return None,
        };
        while let Some(parent) = top.parent_else().and_then(|e| e.parent_if()) {
            top = parent;
        }

        let mut branches = Vec::new();
        let mut current = top;
        loop {
            let position = if branches.is_empty() {
                BranchPosition::Top
            } else {
                BranchPosition::Middle
            };
            branches.push(Branch {
                node: current.syntax().clone(),
                position,
            });
            let Some(else_clause) = current.else_clause() else {
                break;
            };
            match else_clause.statement().and_then(IfStmt::cast) {
                Some(next) => current = next,
                None => {
                    branches.push(Branch {
                        node: else_clause.syntax().clone(),
                        position: BranchPosition::TerminalElse,
                    });
                    break;
                }
            }
        }
        Some(Self { branches })
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// The topmost `if`
    pub fn top(&self) -> &SyntaxNode {
        &self.branches[0].node
    }

    pub fn analyze(&self) -> DelimiterAction {
        let any_bare = self.branches.iter().any(|b| !b.is_delimited());
        let any_delimited = self.branches.iter().any(Branch::is_delimited);
        let all_support_bare = self.branches.iter().all(Branch::supports_bare);
        let several = self.branches.len() > 1;

        if several && any_bare && !all_support_bare {
            DelimiterAction::AddDelimiters
        } else if several && all_support_bare && any_delimited {
            if any_bare {
                DelimiterAction::AddOrRemove
            } else {
                DelimiterAction::RemoveDelimiters
            }
        } else {
            DelimiterAction::NoChange
        }
    }
}

fn chain_of(node: &SyntaxNode) -> Result<BranchChain> {
    BranchChain::of(node)
        .ok_or_else(|| TrellisError::unsupported(node.kind(), "analyze a branch chain"))
}

/// Brace decision for the chain containing `node`.
pub fn analyze_chain(node: &SyntaxNode) -> Result<DelimiterAction> {
    let chain = chain_of(node)?;
    let action = chain.analyze();
    tracing::trace!(branches = chain.len(), ?action, "analyzed branch chain");
    Ok(action)
}

/// Brace decision for a switch section.
pub fn analyze_switch_section(section: &SyntaxNode) -> Result<DelimiterAction> {
    let section = SwitchSection::cast(section.clone())
        .ok_or_else(|| TrellisError::unsupported(section.kind(), "analyze a switch section"))?;
    let statements: Vec<_> = section.statements().collect();
    Ok(match statements.as_slice() {
        [] => DelimiterAction::NoChange,
        [only] if only.kind() == SyntaxKind::Block => DelimiterAction::RemoveDelimiters,
        _ => DelimiterAction::AddDelimiters,
    })
}

// ============================================================================
// Chain edits
// ============================================================================

/// Wrap every bare branch body of the chain containing `node` in a block.
/// Returns the top `if` in the new tree.
pub fn add_delimiters(node: &SyntaxNode, formatting: &FormattingOptions) -> Result<SyntaxNode> {
    let chain = chain_of(node)?;
    let flags: Vec<bool> = chain.branches().iter().map(|b| !b.is_delimited()).collect();
    let indent = leading_trivia(&chain.top().green()).indentation();
    let wrap = |children: &mut Vec<GreenElement>, index: usize| {
        wrap_in_block(children, index, &indent, formatting)
    };
    let green = rewrite_branches(&chain.top().green(), &flags, &indent, &wrap);
    tracing::debug!(
        wrapped = flags.iter().filter(|f| **f).count(),
        "added delimiters to branch chain"
    );
    edit::replace_node(chain.top(), green)
}

/// Unwrap every block body of the chain containing `node` that supports the
/// bare form. Headers that shared a line with their opening brace get a line
/// break before the body. Returns the top `if` in the new tree.
pub fn remove_delimiters(node: &SyntaxNode, formatting: &FormattingOptions) -> Result<SyntaxNode> {
    let chain = chain_of(node)?;
    let flags: Vec<bool> = chain
        .branches()
        .iter()
        .map(|b| b.is_delimited() && b.supports_bare())
        .collect();
    let indent = leading_trivia(&chain.top().green()).indentation();
    let unwrap = |children: &mut Vec<GreenElement>, index: usize| {
        unwrap_block(children, index, formatting)
    };
    let green = rewrite_branches(&chain.top().green(), &flags, &indent, &unwrap);
    tracing::debug!(
        unwrapped = flags.iter().filter(|f| **f).count(),
        "removed delimiters from branch chain"
    );
    edit::replace_node(chain.top(), green)
}

/// Apply `rewrite` to the body of every flagged branch, walking the
/// `if` -> `else` -> `if` spine.
fn rewrite_branches(
    if_stmt: &GreenNodeData,
    flags: &[bool],
    indent: &TriviaList,
    rewrite: &dyn Fn(&mut Vec<GreenElement>, usize),
) -> GreenNode {
    let mut children = owned_children(if_stmt);
    let rewritten = flags.first() == Some(&true);
    if rewritten {
        if let Some(index) = statement_index(&children) {
            rewrite(&mut children, index);
        }
    }

    let else_clause = node_index(&children, SyntaxKind::ElseClause)
        .and_then(|position| Some((position, children[position].as_node().cloned()?)));
    if let Some((position, clause)) = else_clause {
        let mut clause_children = owned_children(&clause);
        if let Some(index) = statement_index(&clause_children) {
            let is_if = clause_children[index]
                .as_node()
                .is_some_and(|n| kind_of_raw(n.kind()) == SyntaxKind::IfStmt);
            if is_if {
                if let Some(inner) = clause_children[index].as_node().cloned() {
                    let rest = flags.get(1..).unwrap_or_default();
                    clause_children[index] =
                        NodeOrToken::Node(rewrite_branches(&inner, rest, indent, rewrite));
                }
            } else if flags.get(1) == Some(&true) {
                rewrite(&mut clause_children, index);
            }
        }
        let mut clause = GreenNode::new(SyntaxKind::ElseClause.into(), clause_children);
        if rewritten && leading_trivia(&clause).is_whitespace_only() {
            clause = with_leading_trivia(&clause, indent.clone());
        }
        children[position] = NodeOrToken::Node(clause);
    }

    GreenNode::new(if_stmt.kind(), children)
}

fn statement_index(children: &[GreenElement]) -> Option<usize> {
    children.iter().position(|c| {
        c.as_node()
            .is_some_and(|n| kind_of_raw(n.kind()).is_statement())
    })
}

fn node_index(children: &[GreenElement], kind: SyntaxKind) -> Option<usize> {
    children
        .iter()
        .position(|c| c.as_node().is_some_and(|n| kind_of_raw(n.kind()) == kind))
}

/// Replace the trivia between a header and its body at `index` with a line
/// break unless it already contains one. Returns the body's new index.
fn break_header_line(children: &mut Vec<GreenElement>, index: usize, newline: &str) -> usize {
    let header_trivia = children[..index]
        .iter()
        .rev()
        .take_while(|c| c.as_token().is_some_and(|t| kind_of(t).is_trivia()))
        .count();
    let run_start = index - header_trivia;
    let run: TriviaList = children[run_start..index]
        .iter()
        .filter_map(|c| c.as_token().cloned())
        .collect();
    if run.has_newline() {
        return index;
    }
    let newline = make::token(SyntaxKind::Newline, newline);
    children.splice(run_start..index, [NodeOrToken::Token(newline)]);
    run_start + 1
}

fn wrap_in_block(
    children: &mut Vec<GreenElement>,
    index: usize,
    indent: &TriviaList,
    formatting: &FormattingOptions,
) {
    let Some(statement) = children[index].as_node().cloned() else {
        return;
    };

    // The header must end its line before the opening brace
    let index = break_header_line(children, index, &formatting.newline);

    let statement = if leading_trivia(&statement).is_empty() {
        let inner = format!("{}{}", indent.text(), formatting.indent_unit);
        with_leading_trivia(&statement, TriviaList::indent(&inner))
    } else {
        statement
    };
    let statement = if trailing_trivia(&statement).has_newline() {
        statement
    } else {
        let own = trailing_trivia(&statement);
        let newline = TriviaList::from(vec![make::token(SyntaxKind::Newline, &formatting.newline)]);
        with_trailing_trivia(&statement, own.concat(newline))
    };

    let mut block = Vec::new();
    block.extend(indent.clone().into_elements());
    block.push(NodeOrToken::Token(make::keyword(SyntaxKind::LBrace)));
    block.push(NodeOrToken::Token(make::token(
        SyntaxKind::Newline,
        &formatting.newline,
    )));
    block.push(NodeOrToken::Node(statement));
    block.extend(indent.clone().into_elements());
    block.push(NodeOrToken::Token(make::keyword(SyntaxKind::RBrace)));
    block.push(NodeOrToken::Token(make::token(
        SyntaxKind::Newline,
        &formatting.newline,
    )));
    children[index] = NodeOrToken::Node(GreenNode::new(SyntaxKind::Block.into(), block));
}

fn unwrap_block(children: &mut Vec<GreenElement>, index: usize, formatting: &FormattingOptions) {
    let Some(block) = children[index].as_node().cloned() else {
        return;
    };
    let block_children = owned_children(&block);
    let Some(inner_index) = statement_index(&block_children) else {
        return;
    };
    let Some(statement) = block_children[inner_index].as_node().cloned() else {
        return;
    };
    let index = break_header_line(children, index, &formatting.newline);

    // Comments attached to the braces move in front of the statement
    let indentation = leading_trivia(&statement).indentation();
    let newline = TriviaList::from(vec![make::token(SyntaxKind::Newline, &formatting.newline)]);
    let mut moved = TriviaList::new();
    for child in &block_children {
        if let NodeOrToken::Token(t) = child {
            if kind_of(t).is_comment() {
                moved.extend(indentation.clone());
                moved.push(t.clone());
                moved.extend(newline.clone());
            }
        }
    }

    let mut statement = statement;
    if !moved.is_empty() {
        let own = leading_trivia(&statement);
        statement = with_leading_trivia(&statement, moved.concat(own));
    }

    // A closing brace followed by `else` on the same line leaves only spaces
    // behind; the statement then keeps ending its own line.
    let block_trailing = trailing_trivia(&block);
    if block_trailing.has_newline() || !block_trailing.is_whitespace_only() {
        statement = with_trailing_trivia(&statement, block_trailing);
    } else if !block_trailing.is_empty() {
        let own = trailing_trivia(&statement);
        let trailing = if own.has_newline() {
            own.through_last_newline()
        } else {
            own.concat(newline)
        };
        statement = with_trailing_trivia(&statement, trailing);
    }
    children[index] = NodeOrToken::Node(statement);
}

// ============================================================================
// Embedded statements
// ============================================================================

/// Whether `kind` has a single embedded statement as its body.
pub fn supports_embedded_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IfStmt | SyntaxKind::ElseClause | SyntaxKind::WhileStmt | SyntaxKind::ForEachStmt
    )
}

/// The body of a single-body statement. An `else` only has one when it ends
/// its chain.
fn body_of(node: &SyntaxNode) -> Option<SyntaxNode> {
    match node.kind() {
        SyntaxKind::IfStmt => IfStmt::cast(node.clone())?.statement(),
        SyntaxKind::WhileStmt | SyntaxKind::ForEachStmt => LoopStmt::cast(node.clone())?.statement(),
        SyntaxKind::ElseClause => ElseClause::cast(node.clone())?
            .statement()
            .filter(|s| s.kind() != SyntaxKind::IfStmt),
        _ => None,
    }
}

/// Whether the header of `node` allows a bare body on the next line.
fn allows_embedded_statement(node: &SyntaxNode) -> bool {
    match node.kind() {
        SyntaxKind::IfStmt => ast::child_of_kind(node, SyntaxKind::Expr).is_none_or(|c| is_single_line(&c)),
        SyntaxKind::ElseClause => true,
        SyntaxKind::WhileStmt => {
            ast::child_of_kind(node, SyntaxKind::Expr).is_none_or(|c| is_single_line(&c))
                || body_of(node).is_some_and(|s| s.kind() == SyntaxKind::EmptyStmt)
        }
        SyntaxKind::ForEachStmt => parentheses_on_same_line(node),
        _ => false,
    }
}

fn parentheses_on_same_line(node: &SyntaxNode) -> bool {
    let (Some(open), Some(close)) = (
        ast::token_of_kind(node, SyntaxKind::LParen),
        ast::token_of_kind(node, SyntaxKind::RParen),
    ) else {
        return false;
    };
    let start = open.text_range().start();
    let end = close.text_range().end();
    !node
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.text_range().start() >= start && t.text_range().end() <= end)
        .any(|t| t.text().contains('\n'))
}

/// The bare body of `node`, or `None` when it is a block.
pub fn embedded_statement(node: &SyntaxNode) -> Option<SyntaxNode> {
    body_of(node).filter(|s| s.kind() != SyntaxKind::Block)
}

/// A bare body that should be wrapped: it spans lines, or the header does
/// not allow a bare body.
pub fn embedded_statement_that_should_be_in_block(node: &SyntaxNode) -> Option<SyntaxNode> {
    let statement = embedded_statement(node)?;
    if is_single_line(&statement) && allows_embedded_statement(node) {
        None
    } else {
        Some(statement)
    }
}

/// The block body of `node` when it could be replaced by its only statement.
pub fn block_that_can_be_embedded(node: &SyntaxNode) -> Option<SyntaxNode> {
    let block = body_of(node).and_then(Block::cast)?;
    let mut statements = block.statements();
    let statement = statements.next()?;
    if statements.next().is_some() {
        return None;
    }
    let embeddable = !matches!(
        statement.kind(),
        SyntaxKind::LocalDeclStmt | SyntaxKind::LabeledStmt
    ) && is_single_line(&statement)
        && allows_embedded_statement(node);
    embeddable.then(|| block.syntax().clone())
}

/// Whether `block` is the body of a single-body statement and holds one
/// statement that may stand alone.
pub fn is_embeddable_block(block: &SyntaxNode) -> bool {
    let Some(block) = Block::cast(block.clone()) else {
        return false;
    };
    let parent_supports = block
        .syntax()
        .parent()
        .is_some_and(|p| supports_embedded_statement(p.kind()));
    let statements: Vec<_> = block.statements().collect();
    parent_supports
        && statements.len() == 1
        && !matches!(
            statements[0].kind(),
            SyntaxKind::LocalDeclStmt | SyntaxKind::LabeledStmt
        )
}
