//! Arena allocation of expression nodes.
//!
//! Every node and every piece of node text is allocated from a caller-owned
//! [`bumpalo::Bump`]. Nothing is freed individually: the whole tree goes away
//! when the arena is reset or dropped, and the borrow checker rejects any node
//! reference that would outlive that point.
//!
//! This is also where identifiers are promoted. An identifier whose name is in
//! the built-in function table is stored as [`Node::FunctionIdentifier`] with
//! the table's canonical name, so evaluation never has to decide again.

use bumpalo::Bump;

use crate::Real;
use crate::error::{ExprError, Result};
use crate::functions::lookup_function;
use crate::types::{BinaryOperator, Node, Tag, UnaryOperator};

/// The first construction argument: a child node or a literal payload.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'src, 'arena> {
    Empty,
    Number(Real),
    /// Copied into the arena, so it may borrow from a transient buffer
    Text(&'src str),
    Node(&'arena Node<'arena>),
}

/// Allocates nodes into a bump arena.
///
/// # Examples
///
/// ```
/// use bumpalo::Bump;
/// use calc_rs::arena::NodeArena;
/// use calc_rs::types::Node;
///
/// let bump = Bump::new();
/// let nodes = NodeArena::new(&bump);
///
/// assert!(matches!(nodes.identifier("x"), Node::Identifier("x")));
/// assert!(matches!(nodes.identifier("cos"), Node::FunctionIdentifier("cos")));
/// ```
#[derive(Clone, Copy)]
pub struct NodeArena<'arena> {
    bump: &'arena Bump,
}

impl<'arena> NodeArena<'arena> {
    pub fn new(bump: &'arena Bump) -> Self {
        Self { bump }
    }

    /// Bytes currently held by the underlying arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    fn alloc(&self, node: Node<'arena>) -> &'arena Node<'arena> {
        self.bump.alloc(node)
    }

    /// Builds a node from a tag and up to two operands.
    ///
    /// `+`, `-` and `,` are resolved by the presence of `right`: without it
    /// `+`/`-` become unary and `,` becomes an argument list; with it they are
    /// binary. A `,` with both children is a binary sequence node, which the
    /// evaluator also accepts as an argument list branch.
    ///
    /// Returns [`ExprError::MalformedNode`] only when the tag and operands do
    /// not describe any node shape. [`ExprError::UnknownFunction`] is returned
    /// for a [`Tag::FunctionIdentifier`] whose name is not a built-in.
    pub fn construct(
        &self,
        tag: Tag,
        left: Operand<'_, 'arena>,
        right: Option<&'arena Node<'arena>>,
    ) -> Result<&'arena Node<'arena>> {
        let malformed = |reason| Err(ExprError::MalformedNode { tag, reason });

        match (tag, left, right) {
            (Tag::Number, Operand::Number(value), None) => Ok(self.number(value)),
            (Tag::String, Operand::Text(text), None) => Ok(self.string(text)),
            (Tag::Identifier, Operand::Text(name), None) => Ok(self.identifier(name)),
            (Tag::FunctionIdentifier, Operand::Text(name), None) => match lookup_function(name) {
                Some(function) => Ok(self.alloc(Node::FunctionIdentifier(function.name))),
                None => Err(ExprError::UnknownFunction { name: name.into() }),
            },
            (Tag::Number | Tag::String | Tag::Identifier | Tag::FunctionIdentifier, _, _) => {
                malformed("leaf nodes take a single literal payload")
            }

            (Tag::Function, Operand::Node(callee), Some(args)) => Ok(self.call(callee, args)),
            (Tag::Function, _, _) => malformed("a call needs a callee and an argument list"),

            (Tag::ArgList, Operand::Node(left), right) => Ok(self.arg_list(Some(left), right)),
            (Tag::ArgList, Operand::Empty, right) => Ok(self.arg_list(None, right)),
            (Tag::Comma, Operand::Node(left), None) => Ok(self.arg_list(Some(left), None)),
            (Tag::Comma, Operand::Empty, right) => Ok(self.arg_list(None, right)),
            (Tag::ArgList | Tag::Comma, Operand::Number(_) | Operand::Text(_), _) => {
                malformed("argument lists only hold nodes")
            }

            (_, Operand::Node(operand), None) => match tag.unary_operator() {
                Some(op) => Ok(self.unary(op, operand)),
                None => malformed("binary operator is missing its right operand"),
            },
            (_, Operand::Node(left), Some(right)) => match tag.binary_operator() {
                Some(op) => Ok(self.binary(op, left, right)),
                None => malformed("unary operator given a second operand"),
            },
            (_, _, _) => malformed("operators take node operands"),
        }
    }

    pub fn number(&self, value: Real) -> &'arena Node<'arena> {
        self.alloc(Node::Number(value))
    }

    /// Copies `text` into the arena.
    pub fn string(&self, text: &str) -> &'arena Node<'arena> {
        let text = self.bump.alloc_str(text);
        self.alloc(Node::String(text))
    }

    /// Builds an identifier, promoting it to a function identifier when the
    /// name is a built-in.
    pub fn identifier(&self, name: &str) -> &'arena Node<'arena> {
        match lookup_function(name) {
            Some(function) => self.alloc(Node::FunctionIdentifier(function.name)),
            None => {
                let name = self.bump.alloc_str(name);
                self.alloc(Node::Identifier(name))
            }
        }
    }

    pub fn unary(&self, op: UnaryOperator, operand: &'arena Node<'arena>) -> &'arena Node<'arena> {
        self.alloc(Node::Unary { op, operand })
    }

    pub fn binary(
        &self,
        op: BinaryOperator,
        left: &'arena Node<'arena>,
        right: &'arena Node<'arena>,
    ) -> &'arena Node<'arena> {
        self.alloc(Node::Binary { op, left, right })
    }

    pub fn call(
        &self,
        callee: &'arena Node<'arena>,
        args: &'arena Node<'arena>,
    ) -> &'arena Node<'arena> {
        self.alloc(Node::Call { callee, args })
    }

    pub fn arg_list(
        &self,
        left: Option<&'arena Node<'arena>>,
        right: Option<&'arena Node<'arena>>,
    ) -> &'arena Node<'arena> {
        self.alloc(Node::ArgList { left, right })
    }

    /// Copies a node.
    ///
    /// Identifier and number leaves get fresh storage for their payload.
    /// Function identifiers keep sharing their static name and stay promoted.
    /// Composite nodes and strings are copied shallowly: the new node refers
    /// to the very same children as the original.
    pub fn clone_node(&self, node: &'arena Node<'arena>) -> &'arena Node<'arena> {
        match *node {
            Node::Identifier(name) => self.identifier(name),
            Node::Number(value) => self.number(value),
            shallow => self.alloc(shallow),
        }
    }
}
