//! Calculator session.
//!
//! A [`Session`] pairs the node arena a grammar builds into with the variable
//! store that assignments write to. Variables persist across every expression
//! evaluated through the same session; nodes are reclaimed in bulk when the
//! caller drops or resets the [`Bump`] backing the session.

use bumpalo::Bump;

use crate::Real;
use crate::arena::{NodeArena, Operand};
use crate::error::Result;
use crate::eval::{Evaluator, ReleaseReport, release};
use crate::types::{Node, Tag};
use crate::variables::VariableStore;

/// One calculator session.
///
/// The arena is borrowed so that nodes (`&'arena Node<'arena>`) never borrow
/// the session itself: a tree can be built and then evaluated with `&mut
/// self` without conflict.
pub struct Session<'arena> {
    nodes: NodeArena<'arena>,
    variables: VariableStore,
}

impl<'arena> Session<'arena> {
    /// Creates a session with an empty variable store.
    pub fn new(bump: &'arena Bump) -> Self {
        Self::with_variables(bump, VariableStore::new())
    }

    /// Creates a session that starts from existing variables.
    pub fn with_variables(bump: &'arena Bump, variables: VariableStore) -> Self {
        Self {
            nodes: NodeArena::new(bump),
            variables,
        }
    }

    /// The node builder backing this session.
    pub fn arena(&self) -> NodeArena<'arena> {
        self.nodes
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableStore {
        &mut self.variables
    }

    /// Builds a node from a textual tag and operands. See
    /// [`NodeArena::construct`].
    pub fn construct(
        &self,
        tag: Tag,
        left: Operand<'_, 'arena>,
        right: Option<&'arena Node<'arena>>,
    ) -> Result<&'arena Node<'arena>> {
        self.nodes.construct(tag, left, right)
    }

    /// Shallow-copies `node` into the arena.
    pub fn clone_node(&self, node: &'arena Node<'arena>) -> &'arena Node<'arena> {
        self.nodes.clone_node(node)
    }

    /// Evaluates `node`, applying any assignments to the session's variables.
    ///
    /// Never fails; unevaluable input yields NaN.
    #[tracing::instrument(level = "debug", skip_all, ret)]
    pub fn evaluate(&mut self, node: &Node<'_>) -> Real {
        Evaluator::new(&mut self.variables).eval(node)
    }

    /// Evaluates `node` like [`Session::evaluate`] and reports the first
    /// reason a NaN was produced, if any.
    ///
    /// Side effects are identical to the unchecked walk: every assignment
    /// reached is applied even when an error is returned.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate_checked(&mut self, node: &Node<'_>) -> Result<Real> {
        let mut evaluator = Evaluator::checked(&mut self.variables);
        let value = evaluator.eval(node);
        match evaluator.into_failure() {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }

    /// Visits every distinct node under `node` once.
    pub fn release(&self, node: &Node<'_>) -> ReleaseReport {
        release(node)
    }
}
