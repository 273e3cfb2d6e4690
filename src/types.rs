//! Type definitions for the expression tree.
//!
//! This module contains the core data structures shared by the arena and the
//! evaluator: the [`Node`] tree itself, the closed operator enumerations and
//! the [`Tag`] a grammar uses to request a node through the construction
//! contract.

use core::fmt;

use crate::Real;

/// Abstract Syntax Tree (AST) node representing an expression.
///
/// Nodes are allocated in a [`NodeArena`](crate::arena::NodeArena) and refer
/// to their children through shared `&'arena` references, so the same child
/// may be reachable from several parents after cloning. A node is immutable
/// once built and its children always exist before it does, so a tree can
/// never contain a cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node<'arena> {
    /// A literal numerical value.
    ///
    /// Examples: `3.14`, `42`
    Number(Real),

    /// Immutable text. Strings have no numeric value and evaluate to NaN.
    String(&'arena str),

    /// A named variable reference.
    ///
    /// Examples: `x`, `total`
    Identifier(&'arena str),

    /// An identifier whose name is in the built-in function table.
    ///
    /// Holds the table's canonical spelling rather than the parsed text.
    FunctionIdentifier(&'static str),

    /// A prefix operator applied to one operand.
    ///
    /// Examples: `-x`, `!flag`, `!!5`
    Unary {
        op: UnaryOperator,
        operand: &'arena Node<'arena>,
    },

    /// An infix operator. Both sides are always evaluated, left first.
    ///
    /// Examples: `a + b`, `x = 3`, `a, b`
    Binary {
        op: BinaryOperator,
        left: &'arena Node<'arena>,
        right: &'arena Node<'arena>,
    },

    /// A call of a built-in function.
    ///
    /// Examples: `sqrt(9)`, `sin(x, y = 2)`
    Call {
        /// Normally a `FunctionIdentifier`
        callee: &'arena Node<'arena>,
        /// Normally an `ArgList`
        args: &'arena Node<'arena>,
    },

    /// Comma-chained call arguments, left-recursive.
    ///
    /// Either side may be absent; `f()` carries an `ArgList` with both sides
    /// absent.
    ArgList {
        left: Option<&'arena Node<'arena>>,
        right: Option<&'arena Node<'arena>>,
    },
}

impl<'arena> Node<'arena> {
    /// Returns the node's classification.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::FunctionIdentifier(_) => NodeKind::FunctionIdentifier,
            Node::Unary { .. } => NodeKind::Unary,
            Node::Binary { .. } => NodeKind::Binary,
            Node::Call { .. } => NodeKind::Call,
            Node::ArgList { .. } => NodeKind::ArgList,
        }
    }

    /// The tag that would rebuild this node through
    /// [`NodeArena::construct`](crate::arena::NodeArena::construct).
    pub fn tag(&self) -> Tag {
        match self {
            Node::Number(_) => Tag::Number,
            Node::String(_) => Tag::String,
            Node::Identifier(_) => Tag::Identifier,
            Node::FunctionIdentifier(_) => Tag::FunctionIdentifier,
            Node::Unary { op, .. } => op.tag(),
            Node::Binary { op, .. } => op.tag(),
            Node::Call { .. } => Tag::Function,
            Node::ArgList { .. } => Tag::ArgList,
        }
    }

    /// The name carried by an identifier or function identifier.
    pub fn name(&self) -> Option<&'arena str> {
        match *self {
            Node::Identifier(name) => Some(name),
            Node::FunctionIdentifier(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for nodes without children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Node::Number(_) | Node::String(_) | Node::Identifier(_) | Node::FunctionIdentifier(_)
        )
    }
}

/// Classifies the kind of node without exposing its payload.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum NodeKind {
    Number,
    String,
    Identifier,
    FunctionIdentifier,
    Unary,
    Binary,
    Call,
    ArgList,
}

/// Prefix operators.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
    /// `!x`: `1` when the operand is zero, `0` otherwise
    Not,
    /// `!!x`: factorial through the gamma function
    Factorial,
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::Factorial => "!!",
        }
    }

    fn tag(self) -> Tag {
        match self {
            UnaryOperator::Plus => Tag::Plus,
            UnaryOperator::Minus => Tag::Minus,
            UnaryOperator::Not => Tag::Not,
            UnaryOperator::Factorial => Tag::Factorial,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Infix operators.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Greater,
    Less,
    /// `&&`, without short-circuit
    And,
    /// `||`, without short-circuit
    Or,
    /// `==` with relative-epsilon tolerance
    Equal,
    /// `^^`
    Power,
    /// `%` with `fmod` semantics
    Modulo,
    /// `,`: evaluates both sides and yields the right one
    Comma,
    /// `=`: the left side must be an identifier
    Assign,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Greater => ">",
            BinaryOperator::Less => "<",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Equal => "==",
            BinaryOperator::Power => "^^",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Comma => ",",
            BinaryOperator::Assign => "=",
        }
    }

    fn tag(self) -> Tag {
        match self {
            BinaryOperator::Add => Tag::Plus,
            BinaryOperator::Subtract => Tag::Minus,
            BinaryOperator::Multiply => Tag::Star,
            BinaryOperator::Divide => Tag::Slash,
            BinaryOperator::Greater => Tag::Greater,
            BinaryOperator::Less => Tag::Less,
            BinaryOperator::And => Tag::AndAnd,
            BinaryOperator::Or => Tag::OrOr,
            BinaryOperator::Equal => Tag::EqEq,
            BinaryOperator::Power => Tag::Power,
            BinaryOperator::Modulo => Tag::Percent,
            BinaryOperator::Comma => Tag::Comma,
            BinaryOperator::Assign => Tag::Assign,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What a grammar asks the arena to build.
///
/// Symbols shared between arities (`+`, `-`, `,`) are a single tag; the
/// construction contract picks the unary, binary or argument-list form from
/// whether a second child is supplied.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tag {
    Number,
    String,
    Identifier,
    FunctionIdentifier,
    /// A call: callee on the left, argument list on the right
    Function,
    /// An argument list regardless of which children are present
    ArgList,
    Plus,
    Minus,
    Not,
    Factorial,
    Star,
    Slash,
    Greater,
    Less,
    AndAnd,
    OrOr,
    EqEq,
    Power,
    Percent,
    Comma,
    Assign,
}

impl Tag {
    const ALL: [Tag; 21] = [
        Tag::Number,
        Tag::String,
        Tag::Identifier,
        Tag::FunctionIdentifier,
        Tag::Function,
        Tag::ArgList,
        Tag::Plus,
        Tag::Minus,
        Tag::Not,
        Tag::Factorial,
        Tag::Star,
        Tag::Slash,
        Tag::Greater,
        Tag::Less,
        Tag::AndAnd,
        Tag::OrOr,
        Tag::EqEq,
        Tag::Power,
        Tag::Percent,
        Tag::Comma,
        Tag::Assign,
    ];

    /// The textual tag a generated grammar emits for this node.
    pub fn symbol(self) -> &'static str {
        match self {
            Tag::Number => "number",
            Tag::String => "string",
            Tag::Identifier => "identifier",
            Tag::FunctionIdentifier => "function identifier",
            Tag::Function => "function",
            Tag::ArgList => "arguments",
            Tag::Plus => "+",
            Tag::Minus => "-",
            Tag::Not => "!",
            Tag::Factorial => "!!",
            Tag::Star => "*",
            Tag::Slash => "/",
            Tag::Greater => ">",
            Tag::Less => "<",
            Tag::AndAnd => "&&",
            Tag::OrOr => "||",
            Tag::EqEq => "==",
            Tag::Power => "^^",
            Tag::Percent => "%",
            Tag::Comma => ",",
            Tag::Assign => "=",
        }
    }

    /// Parses a textual tag. Returns `None` for anything outside the fixed set.
    pub fn from_symbol(symbol: &str) -> Option<Tag> {
        Tag::ALL.iter().copied().find(|tag| tag.symbol() == symbol)
    }

    /// The unary operator this tag denotes when no second child is given.
    pub fn unary_operator(self) -> Option<UnaryOperator> {
        match self {
            Tag::Plus => Some(UnaryOperator::Plus),
            Tag::Minus => Some(UnaryOperator::Minus),
            Tag::Not => Some(UnaryOperator::Not),
            Tag::Factorial => Some(UnaryOperator::Factorial),
            _ => None,
        }
    }

    /// The binary operator this tag denotes when both children are given.
    pub fn binary_operator(self) -> Option<BinaryOperator> {
        match self {
            Tag::Plus => Some(BinaryOperator::Add),
            Tag::Minus => Some(BinaryOperator::Subtract),
            Tag::Star => Some(BinaryOperator::Multiply),
            Tag::Slash => Some(BinaryOperator::Divide),
            Tag::Greater => Some(BinaryOperator::Greater),
            Tag::Less => Some(BinaryOperator::Less),
            Tag::AndAnd => Some(BinaryOperator::And),
            Tag::OrOr => Some(BinaryOperator::Or),
            Tag::EqEq => Some(BinaryOperator::Equal),
            Tag::Power => Some(BinaryOperator::Power),
            Tag::Percent => Some(BinaryOperator::Modulo),
            Tag::Comma => Some(BinaryOperator::Comma),
            Tag::Assign => Some(BinaryOperator::Assign),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_symbol(tag.symbol()), Some(tag));
        }
        assert_eq!(Tag::from_symbol("**"), None);
        assert_eq!(Tag::from_symbol(""), None);
    }

    #[test]
    fn test_shared_symbols_resolve_both_ways() {
        assert_eq!(Tag::Plus.unary_operator(), Some(UnaryOperator::Plus));
        assert_eq!(Tag::Plus.binary_operator(), Some(BinaryOperator::Add));
        assert_eq!(Tag::Minus.unary_operator(), Some(UnaryOperator::Minus));
        assert_eq!(Tag::Minus.binary_operator(), Some(BinaryOperator::Subtract));

        assert_eq!(Tag::Factorial.binary_operator(), None);
        assert_eq!(Tag::Star.unary_operator(), None);
        assert_eq!(Tag::Number.unary_operator(), None);
        assert_eq!(Tag::Number.binary_operator(), None);
    }

    #[test]
    fn test_node_tag_matches_operator_symbol() {
        let one = Node::Number(1.0);
        let neg = Node::Unary {
            op: UnaryOperator::Minus,
            operand: &one,
        };
        let pow = Node::Binary {
            op: BinaryOperator::Power,
            left: &one,
            right: &one,
        };
        assert_eq!(neg.tag(), Tag::Minus);
        assert_eq!(pow.tag().symbol(), "^^");
        assert_eq!(pow.kind(), NodeKind::Binary);
        assert!(one.is_leaf());
        assert!(!neg.is_leaf());
    }

    #[test]
    fn test_name_only_for_identifiers() {
        assert_eq!(Node::Identifier("x").name(), Some("x"));
        assert_eq!(Node::FunctionIdentifier("sin").name(), Some("sin"));
        assert_eq!(Node::String("x").name(), None);
        assert_eq!(Node::Number(1.0).name(), None);
    }
}
