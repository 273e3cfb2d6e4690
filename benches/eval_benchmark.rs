use bumpalo::Bump;
use calc_rs::arena::NodeArena;
use calc_rs::session::Session;
use calc_rs::types::{BinaryOperator, Node, UnaryOperator};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// a * sin(deg(b)) + sqrt(a * a + b * b) - !!5
fn build_mixed<'a>(nodes: NodeArena<'a>) -> &'a Node<'a> {
    let a = nodes.identifier("a");
    let b = nodes.identifier("b");
    let call = |name: &str, arg: &'a Node<'a>| {
        nodes.call(nodes.identifier(name), nodes.arg_list(Some(arg), None))
    };

    let sin = call("sin", call("deg", b));
    let scaled = nodes.binary(BinaryOperator::Multiply, a, sin);
    let sum_sq = nodes.binary(
        BinaryOperator::Add,
        nodes.binary(BinaryOperator::Multiply, a, a),
        nodes.binary(BinaryOperator::Multiply, b, b),
    );
    let fac = nodes.unary(UnaryOperator::Factorial, nodes.number(5.0));
    let total = nodes.binary(BinaryOperator::Add, scaled, call("sqrt", sum_sq));
    nodes.binary(BinaryOperator::Subtract, total, fac)
}

/// x = x + 1 repeated `depth` times as a sequence
fn build_sequence<'a>(nodes: NodeArena<'a>, depth: usize) -> &'a Node<'a> {
    let step = || {
        let inc = nodes.binary(BinaryOperator::Add, nodes.identifier("x"), nodes.number(1.0));
        nodes.binary(BinaryOperator::Assign, nodes.identifier("x"), inc)
    };
    let mut tree = step();
    for _ in 1..depth {
        tree = nodes.binary(BinaryOperator::Comma, tree, step());
    }
    tree
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    group.bench_function("mixed_expression", |bench| {
        let arena = Bump::with_capacity(16 * 1024);
        let mut session = Session::new(&arena);
        let expr = build_mixed(session.arena());
        session.variables_mut().set("a", 3.0);
        session.variables_mut().set("b", 4.0);

        bench.iter(|| black_box(session.evaluate(black_box(expr))));
    });

    group.bench_function("mixed_expression_checked", |bench| {
        let arena = Bump::with_capacity(16 * 1024);
        let mut session = Session::new(&arena);
        let expr = build_mixed(session.arena());
        session.variables_mut().set("a", 3.0);
        session.variables_mut().set("b", 4.0);

        bench.iter(|| black_box(session.evaluate_checked(black_box(expr))));
    });

    group.bench_function("assignment_sequence_100", |bench| {
        let arena = Bump::with_capacity(64 * 1024);
        let mut session = Session::new(&arena);
        let expr = build_sequence(session.arena(), 100);
        session.variables_mut().set("x", 0.0);

        bench.iter(|| black_box(session.evaluate(black_box(expr))));
    });

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("build_and_release_mixed", |bench| {
        let mut arena = Bump::with_capacity(16 * 1024);
        bench.iter(|| {
            {
                let session = Session::new(&arena);
                let expr = build_mixed(session.arena());
                black_box(session.release(expr));
            }
            arena.reset();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_build);
criterion_main!(benches);
