//! Integration tests for ordered insertion of members and modifiers
//!
//! These tests build small declaration trees with the node factory, insert
//! into them through the public API and check both the resulting text and
//! the canonical order of the edited sequence.

use insta::assert_snapshot;
use rowan::GreenNode;
use trellis_core::cst::make::{self, line};
use trellis_core::cst::trivia::{self, TriviaList};
use trellis_core::insert::{self, Inserter};
use trellis_core::ordering::{
    Accessibility, MemberComparer, MemberKind, MemberOrder, ModifierComparer, ModifierKind,
    ModifierOrder,
};
use trellis_core::{ErrorKind, SyntaxKind, SyntaxNode, TrellisConfiguration};

use ModifierKind::*;

fn root_child(green: GreenNode) -> SyntaxNode {
    SyntaxNode::new_root(make::compilation_unit(vec![green]))
        .first_child()
        .expect("compilation unit has a child")
}

fn sample_member(kind: MemberKind) -> GreenNode {
    let member = match kind {
        MemberKind::ConstField => make::field(&[Const], "int", "K"),
        MemberKind::Field => make::field(&[], "int", "f"),
        other => make::member(other.syntax_kind(), &[], &format!("{other:?}")),
    };
    line("    ", member)
}

fn members_of(node: &SyntaxNode) -> Vec<GreenNode> {
    node.children()
        .filter(|n| n.kind().is_member())
        .map(|n| n.green().into_owned())
        .collect()
}

fn trivia_texts(nodes: &[GreenNode]) -> Vec<String> {
    let mut texts: Vec<String> = nodes
        .iter()
        .flat_map(|n| {
            trivia::collect_trivia(n)
                .iter()
                .map(|t| t.text().to_string())
                .collect::<Vec<_>>()
        })
        .collect();
    texts.sort();
    texts
}

#[test]
fn test_const_field_goes_after_last_const() {
    let class = root_child(make::class_decl(
        "",
        &[],
        "C",
        vec![
            line("    ", make::field(&[Const], "int", "A")),
            line("    ", make::field(&[], "int", "B")),
            line("    ", make::method(&[], "void", "Method1")),
        ],
    ));

    let insertion = insert::insert_member(&class, make::field(&[Const], "int", "C")).unwrap();

    assert_eq!(insertion.index, 1);
    assert_eq!(insertion.element.kind(), SyntaxKind::FieldDecl);
    assert_eq!(insertion.element.text().to_string(), "    const int C;\n");
    assert_snapshot!(insertion.node.text().to_string().trim_end(), @r"
class C
{
    const int A;
    const int C;
    int B;
    void Method1() { }
}
");
}

#[test]
fn test_insert_index_queries() {
    let class = root_child(make::class_decl(
        "",
        &[],
        "C",
        vec![
            line("    ", make::field(&[Const], "int", "A")),
            line("    ", make::field(&[], "int", "B")),
            line("    ", make::method(&[], "void", "Method1")),
        ],
    ));

    assert_eq!(insert::field_insert_index(&class, true).unwrap(), 1);
    assert_eq!(insert::field_insert_index(&class, false).unwrap(), 2);
    assert_eq!(insert::member_insert_index(&class, MemberKind::Constructor).unwrap(), 2);
    assert_eq!(insert::member_insert_index(&class, MemberKind::Method).unwrap(), 3);
    assert_eq!(insert::member_insert_index(&class, MemberKind::Class).unwrap(), 3);

    let method = class.children().find(|n| n.kind() == SyntaxKind::MethodDecl).unwrap();
    assert_eq!(insert::modifier_insert_index(&method, Public).unwrap(), 0);
}

#[test]
fn test_insert_into_empty_class() {
    let class = root_child(make::class_decl("", &[Public], "Empty", vec![]));

    let insertion = insert::insert_member(&class, make::method(&[Public], "void", "Run")).unwrap();

    assert_eq!(insertion.index, 0);
    assert_eq!(
        insertion.node.text().to_string(),
        "public class Empty\n{\n    public void Run() { }\n}\n"
    );
}

#[test]
fn test_insert_into_nested_empty_class() {
    let namespace = root_child(make::namespace_decl(
        "",
        "N",
        vec![make::class_decl("    ", &[], "C", vec![])],
    ));
    let class = namespace.first_child().unwrap();
    assert_eq!(class.kind(), SyntaxKind::ClassDecl);

    let insertion = insert::insert_member(&class, make::field(&[], "int", "x")).unwrap();
    let root = insertion.node.ancestors().last().unwrap();

    assert_eq!(
        root.text().to_string(),
        "namespace N\n{\n    class C\n    {\n        int x;\n    }\n}\n"
    );
}

#[test]
fn test_insert_into_empty_compilation_unit() {
    let unit = SyntaxNode::new_root(make::compilation_unit(vec![]));

    let insertion = insert::insert_member(&unit, make::class_decl("", &[], "C", vec![])).unwrap();

    assert_eq!(insertion.node.kind(), SyntaxKind::CompilationUnit);
    assert_eq!(insertion.node.text().to_string(), "class C\n{\n}\n");
}

#[test]
fn test_configured_indentation_for_first_member() {
    let config = TrellisConfiguration::from_jsonc_str(
        r#"{ "formatting": { "indentStyle": "tabs" } }"#,
    )
    .unwrap();
    let inserter = Inserter::from_config(&config);
    let class = root_child(make::class_decl("", &[], "C", vec![]));

    let insertion = inserter.insert_member(&class, make::field(&[], "int", "x")).unwrap();

    assert_eq!(insertion.node.text().to_string(), "class C\n{\n\tint x;\n}\n");
}

#[test]
fn test_modifier_takes_documentation_from_type() {
    let documented = trivia::with_leading_trivia(
        &line("", make::method(&[], "void", "Run")),
        TriviaList::from(vec![
            trivia::whitespace("    "),
            make::token(SyntaxKind::DocComment, "/// Runs"),
            trivia::newline("\n"),
            trivia::whitespace("    "),
        ]),
    );
    let method = SyntaxNode::new_root(documented);

    let public = insert::insert_modifier_kind(&method, Public).unwrap();
    assert_eq!(public.index, 0);
    assert_eq!(
        public.node.text().to_string(),
        "    /// Runs\n    public void Run() { }\n"
    );

    let stat = insert::insert_modifier_kind(&public.node, Static).unwrap();
    assert_eq!(stat.index, 1);
    assert_eq!(stat.element.text().to_string(), "static ");
    assert_eq!(
        stat.node.text().to_string(),
        "    /// Runs\n    public static void Run() { }\n"
    );

    let new = insert::insert_modifier_kind(&stat.node, New).unwrap();
    assert_eq!(new.index, 0);
    assert_eq!(
        new.node.text().to_string(),
        "    /// Runs\n    new public static void Run() { }\n"
    );
}

#[test]
fn test_modifier_goes_after_attributes() {
    let declaration = make::attributed(
        line("    ", make::attribute_list("Obsolete", None)),
        line("    ", make::method(&[], "void", "Run")),
    );
    let method = SyntaxNode::new_root(declaration);

    let insertion = insert::insert_modifier_kind(&method, Public).unwrap();

    assert_eq!(
        insertion.node.text().to_string(),
        "    [Obsolete]\n    public void Run() { }\n"
    );
}

#[test]
fn test_insert_accessibility() {
    let method = SyntaxNode::new_root(line("    ", make::method(&[Static], "void", "Run")));

    let edited = insert::insert_accessibility(&method, Accessibility::PrivateProtected).unwrap();
    assert_eq!(
        edited.text().to_string(),
        "    private protected static void Run() { }\n"
    );

    let edited = insert::insert_accessibility(&method, Accessibility::ProtectedInternal).unwrap();
    assert_eq!(
        edited.text().to_string(),
        "    protected internal static void Run() { }\n"
    );
}

#[test]
fn test_structural_misuse_is_an_error() {
    let class = root_child(make::class_decl(
        "",
        &[],
        "C",
        vec![line("    ", make::method(&[], "void", "Run"))],
    ));
    let method = class.first_child().unwrap();

    let err = insert::insert_member(&method, make::field(&[], "int", "x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    let err = insert::insert_member(&class, make::expr_stmt("x()")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = insert::insert_modifier(&method, make::type_ref("int")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let namespace = root_child(make::namespace_decl("", "N", vec![]));
    let err = insert::insert_modifier_kind(&namespace, Public).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_every_member_kind_keeps_order() {
    let base: Vec<GreenNode> = MemberKind::ALL.iter().map(|&k| sample_member(k)).collect();
    let comparer = MemberComparer::default();
    assert!(comparer.is_sorted(&base));

    for kind in MemberKind::ALL {
        let (sequence, index) = insert::insert::<MemberOrder>(&base, sample_member(kind));
        assert_eq!(index, kind.rank() + 1, "{kind:?}");
        assert_eq!(sequence.len(), base.len() + 1);
        assert!(comparer.is_sorted(&sequence), "{kind:?} broke the order");
    }
}

#[test]
fn test_every_modifier_keeps_order() {
    let base: Vec<GreenNode> = [Public, Static, ReadOnly]
        .iter()
        .map(|&k| make::modifier(k))
        .collect();

    for kind in ModifierKind::ALL {
        let (sequence, _) = insert::insert::<ModifierOrder>(&base, make::modifier(kind));
        assert!(ModifierComparer.is_sorted(&sequence), "{kind:?} broke the order");
    }
}

#[test]
fn test_modifier_trivia_is_conserved() {
    let base = vec![
        trivia::with_leading_trivia(&make::modifier(Public), TriviaList::indent("    ")),
        make::modifier(Static),
    ];
    let new = make::modifier(New);

    let mut before = base.clone();
    before.push(new.clone());
    let (after, index) = insert::insert::<ModifierOrder>(&base, new);

    assert_eq!(index, 0);
    assert_eq!(trivia_texts(&before), trivia_texts(&after));
    let text: String = after.iter().map(|m| m.to_string()).collect();
    assert_eq!(text, "    new public static ");
}

#[test]
fn test_reinserting_removed_member_restores_sequence() {
    let base: Vec<GreenNode> = [
        MemberKind::ConstField,
        MemberKind::Field,
        MemberKind::Constructor,
        MemberKind::Property,
        MemberKind::Method,
        MemberKind::Class,
    ]
    .iter()
    .map(|&k| sample_member(k))
    .collect();

    for i in 0..base.len() {
        let mut without = base.clone();
        let removed = without.remove(i);
        let (restored, index) = insert::insert::<MemberOrder>(&without, removed);

        assert_eq!(index, i);
        let expected: Vec<String> = base.iter().map(|n| n.to_string()).collect();
        let actual: Vec<String> = restored.iter().map(|n| n.to_string()).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_tree_members_stay_sorted_after_insertions() {
    let mut class = root_child(make::class_decl("", &[], "C", vec![]));
    let additions = [
        make::method(&[], "void", "Run"),
        make::field(&[], "int", "count"),
        make::constructor(&[Public], "C"),
        make::field(&[Const], "int", "Max"),
        make::property(&[Public], "string", "Name"),
        make::event_field(&[Public], "EventHandler", "Changed"),
    ];

    for member in additions {
        class = insert::insert_member(&class, member).unwrap().node;
        assert!(MemberComparer::default().is_sorted(&members_of(&class)));
    }

    assert_snapshot!(class.text().to_string().trim_end(), @r"
class C
{
    const int Max;
    int count;
    public C() { }
    public event EventHandler Changed;
    public string Name { get; set; }
    void Run() { }
}
");
}
