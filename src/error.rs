//! Error types and handling for the calc-rs crate.
//!
//! Evaluation itself never fails: every unevaluable condition becomes NaN.
//! The variants here describe *why* a NaN was produced, for callers that use
//! [`Session::evaluate_checked`](crate::session::Session::evaluate_checked),
//! and report node shapes that [`NodeArena::construct`](crate::arena::NodeArena::construct)
//! cannot represent.

use alloc::string::String;
use core::fmt;
use core::result;

use crate::types::Tag;

/// Result type used throughout the crate.
pub type Result<T> = result::Result<T, ExprError>;

/// Error type for node construction and checked evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// A variable was read before anything was assigned to it.
    UnknownVariable { name: String },

    /// A call named something that is not in the built-in function table.
    ///
    /// The arguments of such a call are not evaluated.
    UnknownFunction { name: String },

    /// A built-in was called with an argument list that produced no values.
    EmptyArguments {
        /// Canonical name of the built-in
        name: &'static str,
    },

    /// The left side of `=` was not an identifier.
    InvalidAssignmentTarget,

    /// A node has no numeric meaning in the position it was found, or a
    /// construction request did not describe any node shape.
    MalformedNode {
        /// Tag of the offending node
        tag: Tag,
        /// What was wrong with it
        reason: &'static str,
    },
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::UnknownVariable { name } => {
                write!(f, "Unknown variable: '{}'", name)
            }
            ExprError::UnknownFunction { name } => {
                write!(f, "Unknown function: '{}'", name)
            }
            ExprError::EmptyArguments { name } => {
                write!(f, "Function '{}' called without arguments", name)
            }
            ExprError::InvalidAssignmentTarget => {
                write!(f, "Left side of '=' must be an identifier")
            }
            ExprError::MalformedNode { tag, reason } => {
                write!(f, "Malformed '{}' node: {}", tag, reason)
            }
        }
    }
}
