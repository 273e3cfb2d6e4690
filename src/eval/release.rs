//! Release pass over an expression tree.
//!
//! The tree is a DAG: subtrees may be reachable from several parents. The pass
//! visits every distinct node and every distinct text payload exactly once,
//! which is the order bulk deallocation would follow. Nothing is freed here;
//! the memory itself goes back when the owning [`bumpalo::Bump`] is dropped or
//! reset.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::types::Node;

/// Initial capacity of the traversal stack, enough for typical lines.
const INITIAL_STACK_CAPACITY: usize = 16;

/// What a release pass visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Distinct nodes reached from the root.
    pub nodes: usize,
    /// Distinct owned text payloads (identifier names and string literals).
    pub payloads: usize,
}

/// Walks the tree under `root` depth-first, counting each distinct node and
/// payload once.
pub fn release<'a>(root: &'a Node<'a>) -> ReleaseReport {
    let mut report = ReleaseReport::default();
    let mut seen_nodes: BTreeSet<usize> = BTreeSet::new();
    let mut seen_payloads: BTreeSet<(usize, usize)> = BTreeSet::new();

    let mut stack: Vec<&'a Node<'a>> = Vec::with_capacity(INITIAL_STACK_CAPACITY);
    stack.push(root);

    while let Some(node) = stack.pop() {
        let address: *const Node<'a> = node;
        if !seen_nodes.insert(address as usize) {
            continue;
        }
        report.nodes += 1;
        tracing::debug!(address = ?address, tag = %node.tag(), "releasing node");

        match *node {
            Node::Identifier(text) | Node::String(text) => {
                if seen_payloads.insert((text.as_ptr() as usize, text.len())) {
                    report.payloads += 1;
                    tracing::debug!(text, "releasing payload");
                }
            }
            // Numbers are inline and function names are static
            Node::Number(_) | Node::FunctionIdentifier(_) => {}
            Node::Unary { operand, .. } => stack.push(operand),
            // Push right first so the left subtree is visited first
            Node::Binary { left, right, .. } => {
                stack.push(right);
                stack.push(left);
            }
            Node::Call { callee, args } => {
                stack.push(args);
                stack.push(callee);
            }
            Node::ArgList { left, right } => {
                stack.extend(right);
                stack.extend(left);
            }
        }
    }

    report
}
