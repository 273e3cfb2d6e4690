#![no_std]
#![doc = r#"
# calc-rs

The core of an interactive calculator: an arena-backed abstract syntax tree,
a fixed table of unary built-in functions, a per-session variable store and
a recursive tree-walking evaluator.

## Overview

A grammar (not part of this crate) turns each line of input into nodes by
calling the session's construction contract. The evaluator then reduces the
tree to a single `f64`. Variables assigned with `=` survive from one
expression to the next for as long as the session lives.

Key properties:
- Nodes live in a [`bumpalo::Bump`] arena and are released in bulk
- Identifiers naming a built-in are promoted to function identifiers when built
- Evaluation never fails: any unevaluable condition produces NaN
- An additive checked mode reports the first failure reason
- `==` compares with a relative machine-epsilon tolerance
- `!!x` is the gamma-function factorial, so non-integers are accepted

## Quick Start

```rust
use bumpalo::Bump;
use calc_rs::session::Session;
use calc_rs::types::BinaryOperator;

let arena = Bump::new();
let mut session = Session::new(&arena);
let nodes = session.arena();

// y = 2 + 3
let sum = nodes.binary(BinaryOperator::Add, nodes.number(2.0), nodes.number(3.0));
let assign = nodes.binary(BinaryOperator::Assign, nodes.identifier("y"), sum);

assert_eq!(session.evaluate(assign), 5.0);
assert_eq!(session.variables().get("y"), 5.0);
```

## Calling Built-in Functions

```rust
use bumpalo::Bump;
use calc_rs::session::Session;
use calc_rs::types::Node;

let arena = Bump::new();
let mut session = Session::new(&arena);
let nodes = session.arena();

// "sqrt" is in the function table, so the identifier is promoted
let callee = nodes.identifier("sqrt");
assert!(matches!(callee, Node::FunctionIdentifier("sqrt")));

let call = nodes.call(callee, nodes.arg_list(Some(nodes.number(9.0)), None));
assert_eq!(session.evaluate(call), 3.0);
```

## Diagnostics

```rust
use bumpalo::Bump;
use calc_rs::error::ExprError;
use calc_rs::session::Session;

let arena = Bump::new();
let mut session = Session::new(&arena);
let missing = session.arena().identifier("missing");

assert!(session.evaluate(missing).is_nan());
match session.evaluate_checked(missing) {
    Err(ExprError::UnknownVariable { name }) => assert_eq!(name, "missing"),
    other => panic!("unexpected {:?}", other),
}
```

## Operators

| Symbol | Arity | Meaning |
|--------|-------|---------|
| `+` `-` | 1 | identity, negation |
| `!` | 1 | `1` if the operand is zero, else `0` |
| `!!` | 1 | factorial via `Γ(x+1)` |
| `+` `-` `*` `/` | 2 | arithmetic |
| `>` `<` | 2 | comparison, `1`/`0` |
| `&&` `\|\|` | 2 | boolean and/or, both sides always evaluated |
| `==` | 2 | relative-epsilon equality |
| `^^` | 2 | power |
| `%` | 2 | `fmod`, sign of the left operand |
| `,` | 2 | sequence, value of the right operand |
| `=` | 2 | assignment to an identifier |

### Built-in Functions

`sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `deg`, `rad`, `abs`, `sqrt`,
`log2`, `log`, `log10`, `exp`, `cbrt`, `floor`, `ceil`, `lgamma`, `gamma`,
`round`, `fac`. All are unary; extra arguments are evaluated and ignored.

## Logging

The crate emits [`tracing`] events: a `trace` event for every visited node,
`debug` events for evaluation failures and for the release pass. No
subscriber is installed by the library.
"#]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod arena;
pub mod error;
pub mod eval;
pub mod functions;
pub mod session;
pub mod types;
pub mod variables;

pub use arena::{NodeArena, Operand};
pub use error::{ExprError, Result};
pub use eval::ReleaseReport;
pub use functions::{BuiltinFunction, UnaryFn, lookup_function};
pub use session::Session;
pub use types::{BinaryOperator, Node, NodeKind, Tag, UnaryOperator};
pub use variables::VariableStore;

/// The floating-point type every expression evaluates to.
pub type Real = f64;

pub mod constants {
    use super::Real;

    pub const PI: Real = core::f64::consts::PI;

    /// Machine epsilon used as the relative tolerance of `==`.
    pub const EPSILON: Real = Real::EPSILON;

    /// Argument values kept per call. Arguments past this count are still
    /// evaluated but their values are not stored.
    pub const MAX_ARGUMENTS: usize = 16;

    pub const TEST_PRECISION: Real = 1e-10;
}

/// Utility macro to check if two floating point values are approximately equal
/// within a specified epsilon. Supports optional format arguments like assert_eq!.
#[macro_export]
macro_rules! assert_approx_eq {
    // Case 1: assert_approx_eq!(left, right) -> use default epsilon
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    // Case 2: assert_approx_eq!(left, right, epsilon) -> use specified epsilon
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val: $crate::Real = $left;
        let right_val: $crate::Real = $right;
        let eps: $crate::Real = $epsilon;

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite()
            && right_val.is_infinite()
            && left_val.signum() == right_val.signum()
        {
            // Same-signed infinities are equal
        } else {
            assert!(
                (left_val - right_val).abs() < eps,
                "assertion failed: `(left ≈ right)` (left: `{}`, right: `{}`, epsilon: `{}`)",
                left_val,
                right_val,
                eps
            );
        }
    }};
    // Case 3: assert_approx_eq!(left, right, epsilon, "format message with args", args...)
    ($left:expr, $right:expr, $epsilon:expr, $($arg:tt)+) => {{
        let left_val: $crate::Real = $left;
        let right_val: $crate::Real = $right;
        let eps: $crate::Real = $epsilon;

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite()
            && right_val.is_infinite()
            && left_val.signum() == right_val.signum()
        {
            // Same-signed infinities are equal
        } else {
            assert!((left_val - right_val).abs() < eps, $($arg)+);
        }
    }};
}
