//! Node factory
//!
//! Constructors for the green nodes callers hand to the editing operations
//! (a new modifier, a new member, a replacement block). Nodes are built
//! without surrounding trivia unless the function takes an `indent`; use
//! [`line`] to put a node on its own indented line.
//!
//! This is a construction API, not a parser: expression text is stored as
//! opaque [`SyntaxKind::RawText`] tokens.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use super::trivia::{self, TriviaList};
use super::{GreenElement, SyntaxKind};
use crate::ordering::ModifierKind;

fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind.into(), children)
}

pub fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind.into(), text)
}

/// Token for a keyword or punctuation kind with fixed text.
pub fn keyword(kind: SyntaxKind) -> GreenToken {
    token(kind, kind.text().unwrap_or_default())
}

fn tok(kind: SyntaxKind) -> GreenElement {
    NodeOrToken::Token(keyword(kind))
}

fn ident(text: &str) -> GreenElement {
    NodeOrToken::Token(token(SyntaxKind::Ident, text))
}

fn ws(text: &str) -> GreenElement {
    NodeOrToken::Token(trivia::whitespace(text))
}

fn nl() -> GreenElement {
    NodeOrToken::Token(trivia::newline("\n"))
}

fn child(node: GreenNode) -> GreenElement {
    NodeOrToken::Node(node)
}

/// Put `node` on its own line: `indent` as leading trivia and a line break
/// as trailing trivia, replacing whatever trivia it had.
pub fn line(indent: &str, node: GreenNode) -> GreenNode {
    let node = trivia::with_leading_trivia(&node, TriviaList::indent(indent));
    trivia::with_trailing_trivia(&node, TriviaList::newline())
}

// ============================================================================
// Declarations
// ============================================================================

/// A single modifier keyword followed by one space.
pub fn modifier(kind: ModifierKind) -> GreenNode {
    node(
        SyntaxKind::Modifier,
        vec![tok(kind.syntax_kind()), ws(" ")],
    )
}

pub fn modifier_list(kinds: &[ModifierKind]) -> GreenNode {
    node(
        SyntaxKind::ModifierList,
        kinds.iter().map(|&k| child(modifier(k))).collect(),
    )
}

fn with_modifiers(kinds: &[ModifierKind], mut rest: Vec<GreenElement>) -> Vec<GreenElement> {
    if kinds.is_empty() {
        return rest;
    }
    let mut children = vec![child(modifier_list(kinds))];
    children.append(&mut rest);
    children
}

pub fn type_ref(name: &str) -> GreenNode {
    node(SyntaxKind::TypeRef, vec![ident(name)])
}

/// `[Name]` or `[Name(args)]`
pub fn attribute_list(name: &str, arguments: Option<Vec<GreenNode>>) -> GreenNode {
    node(
        SyntaxKind::AttributeList,
        vec![
            tok(SyntaxKind::LBracket),
            child(attribute(name, arguments)),
            tok(SyntaxKind::RBracket),
        ],
    )
}

pub fn attribute(name: &str, arguments: Option<Vec<GreenNode>>) -> GreenNode {
    let mut children = vec![ident(name)];
    if let Some(arguments) = arguments {
        children.push(child(attribute_argument_list(arguments)));
    }
    node(SyntaxKind::Attribute, children)
}

/// Prefix a declaration with an attribute list (which should carry its own
/// line formatting).
pub fn attributed(attributes: GreenNode, declaration: GreenNode) -> GreenNode {
    let mut children = vec![child(attributes)];
    children.extend(trivia::owned_children(&declaration));
    GreenNode::new(declaration.kind(), children)
}

/// `modifiers ty name;`
pub fn field(modifiers: &[ModifierKind], ty: &str, name: &str) -> GreenNode {
    node(
        SyntaxKind::FieldDecl,
        with_modifiers(
            modifiers,
            vec![
                child(type_ref(ty)),
                ws(" "),
                ident(name),
                tok(SyntaxKind::Semicolon),
            ],
        ),
    )
}

/// `modifiers event ty name;`
pub fn event_field(modifiers: &[ModifierKind], ty: &str, name: &str) -> GreenNode {
    node(
        SyntaxKind::EventFieldDecl,
        with_modifiers(
            modifiers,
            vec![
                tok(SyntaxKind::EventKw),
                ws(" "),
                child(type_ref(ty)),
                ws(" "),
                ident(name),
                tok(SyntaxKind::Semicolon),
            ],
        ),
    )
}

fn empty_parameter_list() -> GreenNode {
    node(
        SyntaxKind::ParameterList,
        vec![tok(SyntaxKind::LParen), tok(SyntaxKind::RParen)],
    )
}

fn empty_body() -> GreenNode {
    node(
        SyntaxKind::Block,
        vec![tok(SyntaxKind::LBrace), ws(" "), tok(SyntaxKind::RBrace)],
    )
}

/// `modifiers ty name() { }`
pub fn method(modifiers: &[ModifierKind], return_type: &str, name: &str) -> GreenNode {
    node(
        SyntaxKind::MethodDecl,
        with_modifiers(
            modifiers,
            vec![
                child(type_ref(return_type)),
                ws(" "),
                ident(name),
                child(empty_parameter_list()),
                ws(" "),
                child(empty_body()),
            ],
        ),
    )
}

/// `modifiers name() { }`
pub fn constructor(modifiers: &[ModifierKind], name: &str) -> GreenNode {
    node(
        SyntaxKind::ConstructorDecl,
        with_modifiers(
            modifiers,
            vec![
                ident(name),
                child(empty_parameter_list()),
                ws(" "),
                child(empty_body()),
            ],
        ),
    )
}

/// `modifiers ty name { get; set; }`
pub fn property(modifiers: &[ModifierKind], ty: &str, name: &str) -> GreenNode {
    let accessors = node(
        SyntaxKind::AccessorList,
        vec![
            tok(SyntaxKind::LBrace),
            ws(" "),
            NodeOrToken::Token(token(SyntaxKind::RawText, "get;")),
            ws(" "),
            NodeOrToken::Token(token(SyntaxKind::RawText, "set;")),
            ws(" "),
            tok(SyntaxKind::RBrace),
        ],
    );
    node(
        SyntaxKind::PropertyDecl,
        with_modifiers(
            modifiers,
            vec![
                child(type_ref(ty)),
                ws(" "),
                ident(name),
                ws(" "),
                child(accessors),
            ],
        ),
    )
}

/// Any member kind with an opaque signature, e.g.
/// `member(SyntaxKind::OperatorDecl, &[Public, Static], "int operator +(C a, C b) { }")`.
pub fn member(kind: SyntaxKind, modifiers: &[ModifierKind], signature: &str) -> GreenNode {
    node(
        kind,
        with_modifiers(
            modifiers,
            vec![NodeOrToken::Token(token(SyntaxKind::RawText, signature))],
        ),
    )
}

/// A class, struct or interface on its own lines, braces at `indent`.
/// `members` should already be formatted with [`line`].
pub fn type_decl(
    kind: SyntaxKind,
    indent: &str,
    modifiers: &[ModifierKind],
    name: &str,
    members: Vec<GreenNode>,
) -> GreenNode {
    let keyword = match kind {
        SyntaxKind::StructDecl => SyntaxKind::StructKw,
        SyntaxKind::InterfaceDecl => SyntaxKind::InterfaceKw,
        _ => SyntaxKind::ClassKw,
    };
    let mut rest = vec![tok(keyword), ws(" "), ident(name)];
    rest.extend(braced(indent, members));
    line(indent, node(kind, with_modifiers(modifiers, rest)))
}

pub fn class_decl(
    indent: &str,
    modifiers: &[ModifierKind],
    name: &str,
    members: Vec<GreenNode>,
) -> GreenNode {
    type_decl(SyntaxKind::ClassDecl, indent, modifiers, name, members)
}

pub fn namespace_decl(indent: &str, name: &str, members: Vec<GreenNode>) -> GreenNode {
    let mut children = vec![tok(SyntaxKind::NamespaceKw), ws(" "), ident(name)];
    children.extend(braced(indent, members));
    line(indent, node(SyntaxKind::NamespaceDecl, children))
}

pub fn compilation_unit(members: Vec<GreenNode>) -> GreenNode {
    node(
        SyntaxKind::CompilationUnit,
        members.into_iter().map(child).collect(),
    )
}

/// `\n{indent}{\n` members `{indent}}`
fn braced(indent: &str, members: Vec<GreenNode>) -> Vec<GreenElement> {
    let mut children = vec![nl()];
    if !indent.is_empty() {
        children.push(ws(indent));
    }
    children.push(tok(SyntaxKind::LBrace));
    children.push(nl());
    children.extend(members.into_iter().map(child));
    if !indent.is_empty() {
        children.push(ws(indent));
    }
    children.push(tok(SyntaxKind::RBrace));
    children
}

// ============================================================================
// Statements
// ============================================================================

/// Opaque expression; line breaks inside `text` become trivia so that
/// multi-line expressions stay multi-line.
pub fn expr(text: &str) -> GreenNode {
    let mut children = Vec::new();
    for (i, line_text) in text.split('\n').enumerate() {
        if i > 0 {
            children.push(nl());
        }
        let trimmed = line_text.trim_start();
        let indent = &line_text[..line_text.len() - trimmed.len()];
        if !indent.is_empty() {
            children.push(ws(indent));
        }
        if !trimmed.is_empty() {
            children.push(NodeOrToken::Token(token(SyntaxKind::RawText, trimmed)));
        }
    }
    node(SyntaxKind::Expr, children)
}

/// `text;`
pub fn expr_stmt(text: &str) -> GreenNode {
    node(
        SyntaxKind::ExprStmt,
        vec![child(expr(text)), tok(SyntaxKind::Semicolon)],
    )
}

/// `ty name = init;`
pub fn local_decl(ty: &str, name: &str, init: &str) -> GreenNode {
    node(
        SyntaxKind::LocalDeclStmt,
        vec![
            child(type_ref(ty)),
            ws(" "),
            ident(name),
            ws(" "),
            tok(SyntaxKind::Equals),
            ws(" "),
            child(expr(init)),
            tok(SyntaxKind::Semicolon),
        ],
    )
}

/// `label: statement`
pub fn labeled_stmt(label: &str, statement: GreenNode) -> GreenNode {
    node(
        SyntaxKind::LabeledStmt,
        vec![
            ident(label),
            tok(SyntaxKind::Colon),
            ws(" "),
            child(statement),
        ],
    )
}

pub fn return_stmt(value: Option<&str>) -> GreenNode {
    let mut children = vec![tok(SyntaxKind::ReturnKw)];
    if let Some(value) = value {
        children.push(ws(" "));
        children.push(child(expr(value)));
    }
    children.push(tok(SyntaxKind::Semicolon));
    node(SyntaxKind::ReturnStmt, children)
}

pub fn break_stmt() -> GreenNode {
    node(
        SyntaxKind::BreakStmt,
        vec![tok(SyntaxKind::BreakKw), tok(SyntaxKind::Semicolon)],
    )
}

/// Multi-line block with its closing brace at `indent`. Statements should
/// already be formatted with [`line`].
pub fn block(indent: &str, statements: Vec<GreenNode>) -> GreenNode {
    let mut children = vec![tok(SyntaxKind::LBrace), nl()];
    children.extend(statements.into_iter().map(child));
    if !indent.is_empty() {
        children.push(ws(indent));
    }
    children.push(tok(SyntaxKind::RBrace));
    node(SyntaxKind::Block, children)
}

/// `{ a(); b(); }` on one line.
pub fn inline_block(statements: Vec<GreenNode>) -> GreenNode {
    let mut children = vec![tok(SyntaxKind::LBrace)];
    for statement in statements {
        children.push(ws(" "));
        children.push(child(statement));
    }
    children.push(ws(" "));
    children.push(tok(SyntaxKind::RBrace));
    node(SyntaxKind::Block, children)
}

/// `if (condition)` followed by `body` on the next line. `body` is expected
/// to be a complete line (see [`line`]).
pub fn if_stmt(condition: &str, body: GreenNode, else_clause: Option<GreenNode>) -> GreenNode {
    let mut children = vec![
        tok(SyntaxKind::IfKw),
        ws(" "),
        tok(SyntaxKind::LParen),
        child(expr(condition)),
        tok(SyntaxKind::RParen),
        nl(),
        child(body),
    ];
    if let Some(else_clause) = else_clause {
        children.push(child(else_clause));
    }
    node(SyntaxKind::IfStmt, children)
}

/// `{indent}else` followed by `body` on the next line.
pub fn else_clause(indent: &str, body: GreenNode) -> GreenNode {
    let clause = node(
        SyntaxKind::ElseClause,
        vec![tok(SyntaxKind::ElseKw), nl(), child(body)],
    );
    trivia::with_leading_trivia(&clause, TriviaList::indent(indent))
}

/// `{indent}else if ...`
pub fn else_if(indent: &str, if_stmt: GreenNode) -> GreenNode {
    let clause = node(
        SyntaxKind::ElseClause,
        vec![tok(SyntaxKind::ElseKw), ws(" "), child(if_stmt)],
    );
    trivia::with_leading_trivia(&clause, TriviaList::indent(indent))
}

/// `while (condition)` followed by `body` on the next line.
pub fn while_stmt(condition: &str, body: GreenNode) -> GreenNode {
    node(
        SyntaxKind::WhileStmt,
        vec![
            tok(SyntaxKind::WhileKw),
            ws(" "),
            tok(SyntaxKind::LParen),
            child(expr(condition)),
            tok(SyntaxKind::RParen),
            nl(),
            child(body),
        ],
    )
}

/// `foreach (ty name in collection)` followed by `body` on the next line.
pub fn foreach_stmt(ty: &str, name: &str, collection: &str, body: GreenNode) -> GreenNode {
    node(
        SyntaxKind::ForEachStmt,
        vec![
            tok(SyntaxKind::ForeachKw),
            ws(" "),
            tok(SyntaxKind::LParen),
            child(type_ref(ty)),
            ws(" "),
            ident(name),
            ws(" "),
            tok(SyntaxKind::InKw),
            ws(" "),
            child(expr(collection)),
            tok(SyntaxKind::RParen),
            nl(),
            child(body),
        ],
    )
}

/// `case value:` or, for `None`, `default:`
pub fn switch_label(value: Option<&str>) -> GreenNode {
    let children = match value {
        Some(value) => vec![
            tok(SyntaxKind::CaseKw),
            ws(" "),
            child(expr(value)),
            tok(SyntaxKind::Colon),
        ],
        None => vec![tok(SyntaxKind::DefaultKw), tok(SyntaxKind::Colon)],
    };
    node(SyntaxKind::SwitchLabel, children)
}

/// Labels and statements should already be formatted with [`line`].
pub fn switch_section(labels: Vec<GreenNode>, statements: Vec<GreenNode>) -> GreenNode {
    node(
        SyntaxKind::SwitchSection,
        labels.into_iter().chain(statements).map(child).collect(),
    )
}

/// `switch (value)` with its braces at `indent`.
pub fn switch_stmt(indent: &str, value: &str, sections: Vec<GreenNode>) -> GreenNode {
    let mut children = vec![
        tok(SyntaxKind::SwitchKw),
        ws(" "),
        tok(SyntaxKind::LParen),
        child(expr(value)),
        tok(SyntaxKind::RParen),
    ];
    children.extend(braced(indent, sections));
    node(SyntaxKind::SwitchStmt, children)
}

// ============================================================================
// Arguments
// ============================================================================

pub fn argument(value: &str) -> GreenNode {
    node(SyntaxKind::Argument, vec![child(expr(value))])
}

/// `name: value`
pub fn named_argument(name: &str, value: &str) -> GreenNode {
    node(
        SyntaxKind::Argument,
        vec![child(name_colon(name)), child(expr(value))],
    )
}

fn name_colon(name: &str) -> GreenNode {
    node(
        SyntaxKind::NameColon,
        vec![ident(name), tok(SyntaxKind::Colon), ws(" ")],
    )
}

pub fn attribute_argument(value: &str) -> GreenNode {
    node(SyntaxKind::AttributeArgument, vec![child(expr(value))])
}

/// `name: value` inside an attribute.
pub fn attribute_named_argument(name: &str, value: &str) -> GreenNode {
    node(
        SyntaxKind::AttributeArgument,
        vec![child(name_colon(name)), child(expr(value))],
    )
}

/// `Name = value` inside an attribute (a property assignment).
pub fn attribute_property_argument(name: &str, value: &str) -> GreenNode {
    let name_equals = node(
        SyntaxKind::NameEquals,
        vec![ident(name), ws(" "), tok(SyntaxKind::Equals), ws(" ")],
    );
    node(
        SyntaxKind::AttributeArgument,
        vec![child(name_equals), child(expr(value))],
    )
}

fn separated(
    kind: SyntaxKind,
    open: SyntaxKind,
    close: SyntaxKind,
    arguments: Vec<GreenNode>,
) -> GreenNode {
    let mut children = vec![tok(open)];
    for (i, argument) in arguments.into_iter().enumerate() {
        if i > 0 {
            children.push(tok(SyntaxKind::Comma));
            children.push(ws(" "));
        }
        children.push(child(argument));
    }
    children.push(tok(close));
    node(kind, children)
}

pub fn argument_list(arguments: Vec<GreenNode>) -> GreenNode {
    separated(
        SyntaxKind::ArgumentList,
        SyntaxKind::LParen,
        SyntaxKind::RParen,
        arguments,
    )
}

pub fn bracketed_argument_list(arguments: Vec<GreenNode>) -> GreenNode {
    separated(
        SyntaxKind::BracketedArgumentList,
        SyntaxKind::LBracket,
        SyntaxKind::RBracket,
        arguments,
    )
}

pub fn attribute_argument_list(arguments: Vec<GreenNode>) -> GreenNode {
    separated(
        SyntaxKind::AttributeArgumentList,
        SyntaxKind::LParen,
        SyntaxKind::RParen,
        arguments,
    )
}

/// `callee(arguments)`
pub fn invocation(callee: &str, arguments: Vec<GreenNode>) -> GreenNode {
    node(
        SyntaxKind::InvocationExpr,
        vec![child(expr(callee)), child(argument_list(arguments))],
    )
}

/// `new ty(arguments)`
pub fn object_creation(ty: &str, arguments: Vec<GreenNode>) -> GreenNode {
    node(
        SyntaxKind::ObjectCreationExpr,
        vec![
            tok(SyntaxKind::NewKw),
            ws(" "),
            child(type_ref(ty)),
            child(argument_list(arguments)),
        ],
    )
}

/// `target[arguments]`
pub fn element_access(target: &str, arguments: Vec<GreenNode>) -> GreenNode {
    node(
        SyntaxKind::ElementAccessExpr,
        vec![child(expr(target)), child(bracketed_argument_list(arguments))],
    )
}
