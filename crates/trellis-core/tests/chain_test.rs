//! Integration tests for branch chain analysis and brace rewriting
//!
//! Chains are built inside an indented method body so that rewrites have to
//! reproduce the surrounding indentation.

use insta::assert_snapshot;
use rowan::{GreenNode, GreenToken, NodeOrToken};
use trellis_core::chain::{self, BranchChain, BranchPosition, DelimiterAction};
use trellis_core::cst::make::{self, line};
use trellis_core::cst::trivia::{self, TriviaList};
use trellis_core::{FormattingOptions, SyntaxKind, SyntaxNode, TrellisConfiguration};

const IF_INDENT: &str = "        ";
const BODY_INDENT: &str = "            ";

fn bare(statement: &str) -> GreenNode {
    line(BODY_INDENT, make::expr_stmt(statement))
}

fn braced(statement: &str) -> GreenNode {
    line(IF_INDENT, make::block(IF_INDENT, vec![bare(statement)]))
}

/// `{ <if statement> }` with the `if` at method-body depth.
fn method_body(if_stmt: GreenNode) -> SyntaxNode {
    SyntaxNode::new_root(make::block("    ", vec![line(IF_INDENT, if_stmt)]))
}

fn first_if(root: &SyntaxNode) -> SyntaxNode {
    root.descendants()
        .find(|n| n.kind() == SyntaxKind::IfStmt)
        .expect("tree has an if statement")
}

fn root_text(node: &SyntaxNode) -> String {
    node.ancestors()
        .last()
        .map(|root| root.text().to_string())
        .unwrap_or_default()
}

/// `{` on the header line, `newline` ending each line, `after` following `}`.
fn same_line_block(prefix: Vec<GreenToken>, statement: &str, after: GreenToken, newline: &str) -> GreenNode {
    let statement = trivia::with_trailing_trivia(
        &line("    ", make::expr_stmt(statement)),
        TriviaList::from(vec![trivia::newline(newline)]),
    );
    let mut children = vec![NodeOrToken::Token(make::keyword(SyntaxKind::LBrace))];
    children.extend(prefix.into_iter().map(NodeOrToken::Token));
    children.push(NodeOrToken::Token(trivia::newline(newline)));
    children.push(NodeOrToken::Node(statement));
    children.push(NodeOrToken::Token(make::keyword(SyntaxKind::RBrace)));
    children.push(NodeOrToken::Token(after));
    GreenNode::new(SyntaxKind::Block.into(), children)
}

/// `if (condition) {` ... `} else {` ... `}`
fn same_line_chain(condition: &str, then_block: GreenNode, else_block: GreenNode) -> SyntaxNode {
    let else_clause = GreenNode::new(
        SyntaxKind::ElseClause.into(),
        vec![
            NodeOrToken::Token(make::keyword(SyntaxKind::ElseKw)),
            NodeOrToken::Token(trivia::whitespace(" ")),
            NodeOrToken::Node(else_block),
        ],
    );
    SyntaxNode::new_root(GreenNode::new(
        SyntaxKind::IfStmt.into(),
        vec![
            NodeOrToken::Token(make::keyword(SyntaxKind::IfKw)),
            NodeOrToken::Token(trivia::whitespace(" ")),
            NodeOrToken::Token(make::keyword(SyntaxKind::LParen)),
            NodeOrToken::Node(make::expr(condition)),
            NodeOrToken::Token(make::keyword(SyntaxKind::RParen)),
            NodeOrToken::Token(trivia::whitespace(" ")),
            NodeOrToken::Node(then_block),
            NodeOrToken::Node(else_clause),
        ],
    ))
}

#[test]
fn test_add_delimiters_keeps_indentation() {
    let body = method_body(make::if_stmt(
        "a",
        bare("x()"),
        Some(make::else_clause(IF_INDENT, bare("y()"))),
    ));
    let top = first_if(&body);
    assert_eq!(chain::analyze_chain(&top).unwrap(), DelimiterAction::NoChange);

    let edited = chain::add_delimiters(&top, &FormattingOptions::default()).unwrap();

    assert_snapshot!(root_text(&edited), @r"
{
        if (a)
        {
            x();
        }
        else
        {
            y();
        }
    }
");
    assert_eq!(
        chain::analyze_chain(&edited).unwrap(),
        DelimiterAction::RemoveDelimiters
    );
}

#[test]
fn test_remove_then_add_round_trips() {
    let body = method_body(make::if_stmt(
        "ready",
        braced("start()"),
        Some(make::else_clause(IF_INDENT, braced("wait()"))),
    ));
    let original = body.text().to_string();
    let top = first_if(&body);

    let unwrapped = chain::remove_delimiters(&top, &FormattingOptions::default()).unwrap();
    assert_eq!(
        root_text(&unwrapped),
        "{\n        if (ready)\n            start();\n        else\n            wait();\n    }"
    );
    assert_eq!(chain::analyze_chain(&unwrapped).unwrap(), DelimiterAction::NoChange);

    // A bare chain has no opinion, but adding braces is still a valid edit
    let rewrapped = chain::add_delimiters(&unwrapped, &FormattingOptions::default()).unwrap();
    assert_eq!(root_text(&rewrapped), original);
}

#[test]
fn test_remove_delimiters_from_same_line_braces() {
    let tree = same_line_chain(
        "a",
        same_line_block(vec![], "x()", trivia::whitespace(" "), "\n"),
        same_line_block(vec![], "y()", trivia::newline("\n"), "\n"),
    );
    assert_eq!(
        tree.text().to_string(),
        "if (a) {\n    x();\n} else {\n    y();\n}\n"
    );
    assert_eq!(
        chain::analyze_chain(&tree).unwrap(),
        DelimiterAction::RemoveDelimiters
    );

    let edited = chain::remove_delimiters(&tree, &FormattingOptions::default()).unwrap();

    assert_eq!(edited.text().to_string(), "if (a)\n    x();\nelse\n    y();\n");
    assert_eq!(chain::analyze_chain(&edited).unwrap(), DelimiterAction::NoChange);
}

#[test]
fn test_remove_delimiters_uses_configured_line_break() {
    let config = TrellisConfiguration::from_jsonc_str(
        r#"{ "formatting": { "newline": "crlf" } }"#,
    )
    .unwrap();
    let commented = vec![
        trivia::whitespace(" "),
        make::token(SyntaxKind::LineComment, "// go"),
    ];
    let tree = same_line_chain(
        "a",
        same_line_block(commented, "x()", trivia::whitespace(" "), "\r\n"),
        same_line_block(vec![], "y()", trivia::newline("\r\n"), "\r\n"),
    );

    let edited = chain::remove_delimiters(&tree, &config.formatting_options()).unwrap();

    assert_eq!(
        edited.text().to_string(),
        "if (a)\r\n    // go\r\n    x();\r\nelse\r\n    y();\r\n"
    );
}

#[test]
fn test_else_if_chain_rewritten_from_terminal_else() {
    let tree = SyntaxNode::new_root(make::if_stmt(
        "a",
        line("    ", make::expr_stmt("x()")),
        Some(make::else_if(
            "",
            make::if_stmt(
                "b",
                line("    ", make::expr_stmt("y()")),
                Some(make::else_clause("", line("    ", make::expr_stmt("z()")))),
            ),
        )),
    ));
    assert_eq!(
        tree.text().to_string(),
        "if (a)\n    x();\nelse if (b)\n    y();\nelse\n    z();\n"
    );
    let terminal = tree
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::ElseClause)
        .last()
        .unwrap();

    let chain = BranchChain::of(&terminal).unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.branches()[1].position(), BranchPosition::Middle);
    assert_eq!(
        chain.branches()[1].condition().map(|c| c.text().to_string()),
        Some("b".to_string())
    );

    let top = chain::add_delimiters(&terminal, &FormattingOptions::default()).unwrap();
    assert_eq!(top.kind(), SyntaxKind::IfStmt);
    assert_snapshot!(top.text().to_string().trim_end(), @r"
if (a)
{
    x();
}
else if (b)
{
    y();
}
else
{
    z();
}
");
}

#[test]
fn test_configured_indent_unit_for_new_bodies() {
    let config = TrellisConfiguration::from_jsonc_str(
        r#"{ "formatting": { "indentSize": 2 } }"#,
    )
    .unwrap();
    let tree = SyntaxNode::new_root(make::if_stmt(
        "a",
        make::expr_stmt("x()"),
        Some(make::else_clause("", line("  ", make::expr_stmt("y()")))),
    ));

    let edited = chain::add_delimiters(&tree, &config.formatting_options()).unwrap();

    assert_eq!(
        edited.text().to_string(),
        "if (a)\n{\n  x();\n}\nelse\n{\n  y();\n}\n"
    );
}

#[test]
fn test_one_branch_needing_braces_decides_for_all() {
    let declares = line(
        IF_INDENT,
        make::block(
            IF_INDENT,
            vec![line(BODY_INDENT, make::local_decl("int", "v", "1"))],
        ),
    );
    let body = method_body(make::if_stmt(
        "a",
        braced("x()"),
        Some(make::else_if(
            IF_INDENT,
            make::if_stmt("b", declares, Some(make::else_clause(IF_INDENT, bare("z()")))),
        )),
    ));
    let top = first_if(&body);

    let chain = BranchChain::of(&top).unwrap();
    let supports: Vec<bool> = chain.branches().iter().map(|b| b.supports_bare()).collect();
    assert_eq!(supports, vec![true, false, true]);

    let action = chain::analyze_chain(&top).unwrap();
    assert_eq!(action, DelimiterAction::AddDelimiters);
    assert!(action.can_add());
    assert!(!action.can_remove());

    // Only the bare terminal branch changes
    let edited = chain::add_delimiters(&top, &FormattingOptions::default()).unwrap();
    let text = root_text(&edited);
    assert!(text.contains("        else\n        {\n            z();\n        }\n"));
    assert!(text.contains("int v = 1;"));
    assert_eq!(
        chain::analyze_chain(&edited).unwrap(),
        DelimiterAction::NoChange
    );
}

#[test]
fn test_labeled_statement_keeps_its_braces() {
    let labeled = line(
        IF_INDENT,
        make::block(
            IF_INDENT,
            vec![line(BODY_INDENT, make::labeled_stmt("retry", make::expr_stmt("x()")))],
        ),
    );
    let body = method_body(make::if_stmt(
        "a",
        labeled,
        Some(make::else_clause(IF_INDENT, bare("y()"))),
    ));
    let top = first_if(&body);
    assert!(root_text(&top).contains("retry: x();"));

    let chain = BranchChain::of(&top).unwrap();
    let supports: Vec<bool> = chain.branches().iter().map(|b| b.supports_bare()).collect();
    assert_eq!(supports, vec![false, true]);
    assert_eq!(chain::analyze_chain(&top).unwrap(), DelimiterAction::AddDelimiters);

    assert!(chain::block_that_can_be_embedded(&top).is_none());
    let block = top
        .children()
        .find(|n| n.kind() == SyntaxKind::Block)
        .unwrap();
    assert!(!chain::is_embeddable_block(&block));

    // Removing braces leaves the labeled body alone
    let unchanged = chain::remove_delimiters(&top, &FormattingOptions::default()).unwrap();
    assert_eq!(root_text(&unchanged), body.text().to_string());
}

#[test]
fn test_analysis_is_the_same_from_every_branch() {
    let body = method_body(make::if_stmt(
        "a",
        braced("x()"),
        Some(make::else_if(
            IF_INDENT,
            make::if_stmt("b", bare("y()"), Some(make::else_clause(IF_INDENT, braced("z()")))),
        )),
    ));
    let members: Vec<SyntaxNode> = body
        .descendants()
        .filter(|n| matches!(n.kind(), SyntaxKind::IfStmt | SyntaxKind::ElseClause))
        .collect();
    assert_eq!(members.len(), 4);

    for member in &members {
        assert_eq!(
            chain::analyze_chain(member).unwrap(),
            DelimiterAction::AddOrRemove
        );
    }
}

#[test]
fn test_switch_sections_in_statement() {
    let switch = SyntaxNode::new_root(make::switch_stmt(
        "",
        "mode",
        vec![
            make::switch_section(
                vec![line("    ", make::switch_label(Some("1")))],
                vec![line(
                    "    ",
                    make::block("    ", vec![line("        ", make::break_stmt())]),
                )],
            ),
            make::switch_section(
                vec![line("    ", make::switch_label(None))],
                vec![
                    line("        ", make::expr_stmt("reset()")),
                    line("        ", make::break_stmt()),
                ],
            ),
        ],
    ));
    let actions: Vec<DelimiterAction> = switch
        .children()
        .filter(|n| n.kind() == SyntaxKind::SwitchSection)
        .map(|section| chain::analyze_switch_section(&section).unwrap())
        .collect();

    assert_eq!(
        actions,
        vec![DelimiterAction::RemoveDelimiters, DelimiterAction::AddDelimiters]
    );
    assert!(chain::analyze_switch_section(&switch).is_err());
}

#[test]
fn test_loop_bodies() {
    let multi_line_header = SyntaxNode::new_root(make::while_stmt(
        "a &&\n    b",
        line("    ", make::expr_stmt("step()")),
    ));
    assert!(chain::supports_embedded_statement(multi_line_header.kind()));
    assert!(chain::embedded_statement_that_should_be_in_block(&multi_line_header).is_some());

    let declares = SyntaxNode::new_root(make::foreach_stmt(
        "int",
        "i",
        "items",
        line(
            "",
            make::block("", vec![line("    ", make::local_decl("int", "j", "i"))]),
        ),
    ));
    assert!(chain::block_that_can_be_embedded(&declares).is_none());
    let block = declares
        .children()
        .find(|n| n.kind() == SyntaxKind::Block)
        .unwrap();
    assert!(!chain::is_embeddable_block(&block));
}
