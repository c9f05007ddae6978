use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use trellis_core::cst::make::{self, line};
use trellis_core::{FormattingOptions, ModifierKind, SyntaxKind, SyntaxNode, chain, insert, remove};

/// A class with `size` fields followed by `size` methods
fn class_with_members(size: usize) -> SyntaxNode {
    let mut members = Vec::with_capacity(size * 2);
    for i in 0..size {
        members.push(line(
            "    ",
            make::field(&[ModifierKind::Private], "int", &format!("field{i}")),
        ));
    }
    for i in 0..size {
        members.push(line(
            "    ",
            make::method(&[ModifierKind::Public], "void", &format!("Method{i}")),
        ));
    }
    let unit = make::compilation_unit(vec![make::class_decl("", &[], "Sample", members)]);
    SyntaxNode::new_root(unit)
        .first_child()
        .expect("class declaration")
}

/// An if/else-if chain of `length` branches with braced bodies
fn chain_of(length: usize) -> SyntaxNode {
    let body = |i: usize| {
        line(
            "",
            make::block("", vec![line("    ", make::expr_stmt(&format!("branch{i}()")))]),
        )
    };
    let mut tail = make::else_clause("", body(length));
    for i in (1..length).rev() {
        tail = make::else_if("", make::if_stmt(&format!("c{i}"), body(i), Some(tail)));
    }
    SyntaxNode::new_root(make::if_stmt("c0", body(0), Some(tail)))
}

/// Benchmark ordered insertion into member sequences of growing size
fn bench_insert_member(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_member");

    for &size in &[10, 100, 1000] {
        let class = class_with_members(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &class, |b, class| {
            b.iter(|| {
                let field = make::field(&[ModifierKind::Const], "int", "Limit");
                black_box(insert::insert_member(class, field))
            });
        });
    }

    group.finish();
}

fn bench_insert_modifier(c: &mut Criterion) {
    let class = class_with_members(10);
    let method = class
        .children()
        .find(|n| n.kind() == SyntaxKind::MethodDecl)
        .expect("method");

    c.bench_function("insert_modifier", |b| {
        b.iter(|| black_box(insert::insert_modifier_kind(&method, ModifierKind::Static)))
    });
}

/// Benchmark chain analysis and brace removal over long chains
fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    let formatting = FormattingOptions::default();

    for &length in &[2, 16, 128] {
        let top = chain_of(length);
        group.bench_with_input(BenchmarkId::new("analyze", length), &top, |b, top| {
            b.iter(|| black_box(chain::analyze_chain(top)))
        });
        group.bench_with_input(BenchmarkId::new("remove_delimiters", length), &top, |b, top| {
            b.iter(|| black_box(chain::remove_delimiters(top, &formatting)))
        });
    }

    group.finish();
}

fn bench_remove_member(c: &mut Criterion) {
    let class = class_with_members(100);

    c.bench_function("remove_member_at", |b| {
        b.iter(|| black_box(remove::remove_member_at(&class, 50)))
    });
}

criterion_group!(
    benches,
    bench_insert_member,
    bench_insert_modifier,
    bench_chain,
    bench_remove_member
);
criterion_main!(benches);
