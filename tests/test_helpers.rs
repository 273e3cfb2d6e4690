use calc_rs::arena::NodeArena;
use calc_rs::types::{BinaryOperator, Node};
use calc_rs::Real;

/// Installs a tracing subscriber that writes through the test harness.
/// Only active when `RUST_LOG` is set, e.g. `RUST_LOG=calc_rs=trace`.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer().with_target(true))
            .with(EnvFilter::from_default_env())
            .try_init();
    }
}

/// Builds a left-nested argument list the way a grammar does for
/// `f(a, b, c)`: `((a), b), c`.
#[allow(dead_code)]
pub fn args<'a>(nodes: NodeArena<'a>, values: &[&'a Node<'a>]) -> &'a Node<'a> {
    let mut list = nodes.arg_list(None, None);
    for (i, &value) in values.iter().enumerate() {
        list = if i == 0 {
            nodes.arg_list(Some(value), None)
        } else {
            nodes.arg_list(Some(list), Some(value))
        };
    }
    list
}

/// `name(x)` with a single numeric argument.
#[allow(dead_code)]
pub fn call1<'a>(nodes: NodeArena<'a>, name: &str, x: Real) -> &'a Node<'a> {
    nodes.call(nodes.identifier(name), args(nodes, &[nodes.number(x)]))
}

/// `name = value`.
#[allow(dead_code)]
pub fn assign<'a>(nodes: NodeArena<'a>, name: &str, value: &'a Node<'a>) -> &'a Node<'a> {
    nodes.binary(BinaryOperator::Assign, nodes.identifier(name), value)
}
