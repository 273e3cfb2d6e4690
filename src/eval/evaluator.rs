//! Recursive tree-walking evaluator.
//!
//! Reduces a node and its subtree to a single [`Real`]. Evaluation never
//! fails: every unevaluable condition produces NaN. A checked evaluator walks
//! the tree exactly the same way (same side effects, same NaN propagation) and
//! additionally remembers the first reason a NaN was produced.

use alloc::string::ToString;

use libm::{fabs, fmod, pow};

use crate::Real;
use crate::constants::{EPSILON, MAX_ARGUMENTS};
use crate::error::ExprError;
use crate::functions::{factorial, lookup_function, max};
use crate::types::{BinaryOperator, Node, Tag, UnaryOperator};
use crate::variables::VariableStore;

/// Argument values gathered for one call.
pub type ArgumentValues = heapless::Vec<Real, MAX_ARGUMENTS>;

/// Walks expression trees against a variable store.
pub struct Evaluator<'v> {
    variables: &'v mut VariableStore,
    checked: bool,
    first_failure: Option<ExprError>,
}

impl<'v> Evaluator<'v> {
    /// Creates an evaluator that only produces values.
    pub fn new(variables: &'v mut VariableStore) -> Self {
        Self {
            variables,
            checked: false,
            first_failure: None,
        }
    }

    /// Creates an evaluator that also records the first failure it meets.
    pub fn checked(variables: &'v mut VariableStore) -> Self {
        Self {
            variables,
            checked: true,
            first_failure: None,
        }
    }

    /// Evaluates `node`.
    pub fn eval<'a>(&mut self, node: &'a Node<'a>) -> Real {
        self.eval_node(node, 0)
    }

    /// The first failure recorded by a checked evaluator.
    pub fn failure(&self) -> Option<&ExprError> {
        self.first_failure.as_ref()
    }

    pub fn into_failure(self) -> Option<ExprError> {
        self.first_failure
    }

    fn eval_node<'a>(&mut self, node: &'a Node<'a>, depth: usize) -> Real {
        tracing::trace!(depth, tag = %node.tag(), "visit");

        match *node {
            Node::Number(value) => value,
            Node::String(_) => self.fail(|| ExprError::MalformedNode {
                tag: Tag::String,
                reason: "text has no numeric value",
            }),
            Node::Identifier(name) => self.read_variable(name),
            // A bare function name reads the variable of the same name
            Node::FunctionIdentifier(name) => self.read_variable(name),
            Node::Unary { op, operand } => {
                let value = self.eval_node(operand, depth + 1);
                apply_unary(op, value)
            }
            Node::Binary {
                op: BinaryOperator::Assign,
                left,
                right,
            } => self.eval_assign(left, right, depth),
            Node::Binary { op, left, right } => {
                let l = self.eval_node(left, depth + 1);
                let r = self.eval_node(right, depth + 1);
                apply_binary(op, l, r)
            }
            Node::Call { callee, args } => self.eval_call(callee, args, depth),
            Node::ArgList {
                left: Some(left),
                right: Some(right),
            } => {
                self.eval_node(left, depth + 1);
                self.eval_node(right, depth + 1)
            }
            Node::ArgList { .. } => self.fail(|| ExprError::MalformedNode {
                tag: Tag::ArgList,
                reason: "incomplete argument list outside of a call",
            }),
        }
    }

    fn read_variable(&mut self, name: &str) -> Real {
        if self.variables.contains(name) {
            self.variables.get(name)
        } else {
            self.fail(|| ExprError::UnknownVariable {
                name: name.to_string(),
            })
        }
    }

    fn eval_assign<'a>(&mut self, target: &'a Node<'a>, value: &'a Node<'a>, depth: usize) -> Real {
        let value = self.eval_node(value, depth + 1);
        match target.name() {
            Some(name) => {
                self.variables.set(name, value);
                // Re-read so the result is exactly what later reads will see
                self.variables.get(name)
            }
            None => self.fail(|| ExprError::InvalidAssignmentTarget),
        }
    }

    fn eval_call<'a>(&mut self, callee: &'a Node<'a>, args: &'a Node<'a>, depth: usize) -> Real {
        let Some(name) = callee.name() else {
            return self.fail(|| ExprError::MalformedNode {
                tag: callee.tag(),
                reason: "callee is not a function identifier",
            });
        };
        let Some(function) = lookup_function(name) else {
            return self.fail(|| ExprError::UnknownFunction {
                name: name.to_string(),
            });
        };

        let mut values = ArgumentValues::new();
        self.collect_arguments(args, depth + 1, &mut values);

        match values.first() {
            Some(&x) => function.call(x),
            None => self.fail(|| ExprError::EmptyArguments {
                name: function.name,
            }),
        }
    }

    /// Flattens an argument list left to right. Every `,` node is a branch,
    /// whether it was built as an argument list or as a sequence.
    fn collect_arguments<'a>(
        &mut self,
        node: &'a Node<'a>,
        depth: usize,
        values: &mut ArgumentValues,
    ) {
        match *node {
            Node::ArgList { left, right } => {
                if let Some(left) = left {
                    self.collect_arguments(left, depth, values);
                }
                if let Some(right) = right {
                    self.collect_arguments(right, depth, values);
                }
            }
            Node::Binary {
                op: BinaryOperator::Comma,
                left,
                right,
            } => {
                self.collect_arguments(left, depth, values);
                self.collect_arguments(right, depth, values);
            }
            _ => {
                let value = self.eval_node(node, depth);
                if values.push(value).is_err() {
                    tracing::trace!(depth, "argument beyond capacity evaluated and dropped");
                }
            }
        }
    }

    fn fail(&mut self, failure: impl FnOnce() -> ExprError) -> Real {
        if self.checked || tracing::enabled!(tracing::Level::DEBUG) {
            let err = failure();
            tracing::debug!(error = %err, "evaluation yields NaN");
            if self.checked && self.first_failure.is_none() {
                self.first_failure = Some(err);
            }
        }
        Real::NAN
    }
}

fn truth(value: bool) -> Real {
    if value { 1.0 } else { 0.0 }
}

/// Applies a prefix operator to an evaluated operand.
pub fn apply_unary(op: UnaryOperator, value: Real) -> Real {
    match op {
        UnaryOperator::Plus => value,
        UnaryOperator::Minus => -value,
        UnaryOperator::Not => truth(value == 0.0),
        UnaryOperator::Factorial => factorial(value),
    }
}

/// Applies an infix operator to two evaluated operands.
///
/// Assignment needs the unevaluated left node and is handled by the
/// evaluator; here it degrades to yielding the right operand like `,`.
pub fn apply_binary(op: BinaryOperator, l: Real, r: Real) -> Real {
    match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => l / r,
        BinaryOperator::Greater => truth(l > r),
        BinaryOperator::Less => truth(l < r),
        // NaN is non-zero, hence true
        BinaryOperator::And => truth(l != 0.0 && r != 0.0),
        BinaryOperator::Or => truth(l != 0.0 || r != 0.0),
        BinaryOperator::Equal => truth(approx_equal(l, r)),
        BinaryOperator::Power => pow(l, r),
        BinaryOperator::Modulo => fmod(l, r),
        BinaryOperator::Comma | BinaryOperator::Assign => r,
    }
}

/// `|l - r| <= EPSILON * max(|l|, |r|)`.
pub fn approx_equal(l: Real, r: Real) -> bool {
    fabs(l - r) <= EPSILON * max(fabs(l), fabs(r))
}
