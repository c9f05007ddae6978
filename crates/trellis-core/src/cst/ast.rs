//! Typed AST layer over the CST
//!
//! Thin, type-safe wrappers over raw syntax nodes. Each wrapper is created
//! with `cast()` and exposes the children the editing operations navigate.
//!
//! # Example
//!
//! ```rust
//! use trellis_core::cst::{SyntaxNode, make, ast::{AstNode, IfStmt}};
//!
//! let tree = make::if_stmt("ready", make::line("    ", make::expr_stmt("go()")), None);
//! let stmt = IfStmt::cast(SyntaxNode::new_root(tree)).unwrap();
//!
//! assert_eq!(stmt.condition().unwrap().text().to_string(), "ready");
//! assert!(stmt.else_clause().is_none());
//! ```

use super::{SyntaxKind, SyntaxNode, SyntaxToken, trivia};
use crate::ordering::ModifierKind;

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

/// First child node of a specific kind
pub fn child_of_kind(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    parent.children().find(|n| n.kind() == kind)
}

/// First direct token of a specific kind
pub fn token_of_kind(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// First child node that is a statement
fn statement_child(parent: &SyntaxNode) -> Option<SyntaxNode> {
    parent.children().find(|n| n.kind().is_statement())
}

/// Whether the node's text, without its leading and trailing trivia, fits on
/// one line.
pub fn is_single_line(node: &SyntaxNode) -> bool {
    let text = node.text().to_string();
    let green = node.green();
    let leading = trivia::leading_trivia(&green).text().len();
    let trailing = trivia::trailing_trivia(&green).text().len();
    if leading + trailing >= text.len() {
        return true;
    }
    !text[leading..text.len() - trailing].contains('\n')
}

// ============================================================================
// Declarations
// ============================================================================

ast_node!(
    /// The modifiers of a declaration
    ModifierList,
    ModifierList
);

impl ModifierList {
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> {
        self.syntax.children().filter_map(Modifier::cast)
    }
}

ast_node!(Modifier, Modifier);

impl Modifier {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
    }

    pub fn kind(&self) -> Option<ModifierKind> {
        self.keyword().and_then(|t| ModifierKind::from_syntax(t.kind()))
    }
}

/// The modifier list of a declaration, if it has one.
pub fn modifier_list(declaration: &SyntaxNode) -> Option<ModifierList> {
    declaration.children().find_map(ModifierList::cast)
}

// ============================================================================
// Statements
// ============================================================================

ast_node!(IfStmt, IfStmt);

impl IfStmt {
    pub fn condition(&self) -> Option<SyntaxNode> {
        child_of_kind(&self.syntax, SyntaxKind::Expr)
    }

    /// The statement executed when the condition holds
    pub fn statement(&self) -> Option<SyntaxNode> {
        statement_child(&self.syntax)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        self.syntax.children().find_map(ElseClause::cast)
    }

    /// The `else` clause this `if` is nested in, if it is an `else if`.
    pub fn parent_else(&self) -> Option<ElseClause> {
        self.syntax.parent().and_then(ElseClause::cast)
    }
}

ast_node!(ElseClause, ElseClause);

impl ElseClause {
    pub fn statement(&self) -> Option<SyntaxNode> {
        statement_child(&self.syntax)
    }

    /// The `if` this clause belongs to
    pub fn parent_if(&self) -> Option<IfStmt> {
        self.syntax.parent().and_then(IfStmt::cast)
    }
}

ast_node!(Block, Block);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax.children().filter(|n| n.kind().is_statement())
    }

    pub fn open_brace(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn close_brace(&self) -> Option<SyntaxToken> {
        token_of_kind(&self.syntax, SyntaxKind::RBrace)
    }
}

ast_node!(SwitchSection, SwitchSection);

impl SwitchSection {
    pub fn labels(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax
            .children()
            .filter(|n| n.kind() == SyntaxKind::SwitchLabel)
    }

    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> {
        self.syntax.children().filter(|n| n.kind().is_statement())
    }
}

ast_node!(
    /// `while` and `foreach`: loops with a single embedded statement
    LoopStmt,
    WhileStmt | ForEachStmt
);

impl LoopStmt {
    pub fn statement(&self) -> Option<SyntaxNode> {
        statement_child(&self.syntax)
    }
}

// ============================================================================
// Arguments
// ============================================================================

ast_node!(
    /// `(...)`, `[...]` or an attribute's `(...)`
    ArgumentList,
    ArgumentList | BracketedArgumentList | AttributeArgumentList
);

impl ArgumentList {
    pub fn arguments(&self) -> impl Iterator<Item = Argument> {
        self.syntax.children().filter_map(Argument::cast)
    }

    /// The call-like node owning this list
    pub fn owner(&self) -> Option<SyntaxNode> {
        self.syntax.parent()
    }
}

ast_node!(Argument, Argument | AttributeArgument);

impl Argument {
    /// Name of a `name: value` argument
    pub fn name_colon(&self) -> Option<String> {
        child_of_kind(&self.syntax, SyntaxKind::NameColon)
            .and_then(|n| token_of_kind(&n, SyntaxKind::Ident))
            .map(|t| t.text().to_string())
    }

    /// Name of a `Name = value` attribute argument
    pub fn name_equals(&self) -> Option<String> {
        child_of_kind(&self.syntax, SyntaxKind::NameEquals)
            .and_then(|n| token_of_kind(&n, SyntaxKind::Ident))
            .map(|t| t.text().to_string())
    }

    pub fn expression(&self) -> Option<SyntaxNode> {
        child_of_kind(&self.syntax, SyntaxKind::Expr)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.syntax.parent().and_then(ArgumentList::cast)
    }

    /// Zero-based position among the list's arguments
    pub fn position(&self) -> Option<usize> {
        let list = self.argument_list()?;
        list.arguments().position(|a| a == *self)
    }
}
