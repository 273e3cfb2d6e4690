//! Built-in mathematical functions for expression evaluation.
//!
//! This module holds the fixed function table consulted when an identifier is
//! built and when a call is evaluated. Every entry is a one-argument transform.
//! The table is immutable and lives for the whole process.
//!
//! All functions use the `libm` crate for their implementations, which keeps
//! the crate usable in no_std environments and provides the gamma functions
//! that `core` does not.

use libm::{
    acos, asin, atan, cbrt, ceil, cos, exp, fabs, floor, fmod, lgamma, log, log2, log10, round,
    sin, sqrt, tan, tgamma,
};

use crate::Real;
use crate::constants::PI;

/// Signature of every built-in function.
pub type UnaryFn = fn(Real) -> Real;

/// One entry of the built-in function table.
#[derive(Clone, Copy)]
pub struct BuiltinFunction {
    /// The name of the function as it is written in expressions.
    pub name: &'static str,

    /// The actual implementation of the function.
    pub implementation: UnaryFn,
}

impl BuiltinFunction {
    /// Applies the function to a single argument.
    pub fn call(&self, x: Real) -> Real {
        (self.implementation)(x)
    }
}

impl core::fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .finish()
    }
}

/// The built-in function table.
pub static BUILTIN_FUNCTIONS: [BuiltinFunction; 21] = [
    BuiltinFunction { name: "sin", implementation: sin },
    BuiltinFunction { name: "cos", implementation: cos },
    BuiltinFunction { name: "tan", implementation: tan },
    BuiltinFunction { name: "asin", implementation: asin },
    BuiltinFunction { name: "acos", implementation: acos },
    BuiltinFunction { name: "atan", implementation: atan },
    BuiltinFunction { name: "deg", implementation: deg_to_rad },
    BuiltinFunction { name: "rad", implementation: rad_to_deg },
    BuiltinFunction { name: "abs", implementation: fabs },
    BuiltinFunction { name: "sqrt", implementation: sqrt },
    BuiltinFunction { name: "log2", implementation: log2 },
    BuiltinFunction { name: "log", implementation: log },
    BuiltinFunction { name: "log10", implementation: log10 },
    BuiltinFunction { name: "exp", implementation: exp },
    BuiltinFunction { name: "cbrt", implementation: cbrt },
    BuiltinFunction { name: "floor", implementation: floor },
    BuiltinFunction { name: "ceil", implementation: ceil },
    BuiltinFunction { name: "lgamma", implementation: lgamma },
    BuiltinFunction { name: "gamma", implementation: tgamma },
    BuiltinFunction { name: "round", implementation: round },
    BuiltinFunction { name: "fac", implementation: factorial },
];

/// Looks up a built-in function by name.
///
/// The returned entry's `name` is the canonical `'static` spelling, which is
/// what a promoted function identifier stores.
pub fn lookup_function(name: &str) -> Option<&'static BuiltinFunction> {
    BUILTIN_FUNCTIONS.iter().find(|f| f.name == name)
}

/// Factorial extended to the reals through the gamma function.
///
/// Integral arguments are rounded to remove the error `tgamma` accumulates;
/// other arguments return `Γ(x+1)` unrounded.
pub fn factorial(x: Real) -> Real {
    let ret = tgamma(x + 1.0);
    if fmod(x, 1.0) == 0.0 { round(ret) } else { ret }
}

/// Converts an angle in degrees to radians. Bound to `deg`.
pub fn deg_to_rad(x: Real) -> Real {
    x * PI / 180.0
}

/// Converts an angle in radians to degrees. Bound to `rad`.
pub fn rad_to_deg(x: Real) -> Real {
    x * 180.0 / PI
}

/// Returns the larger of two values, preferring `b` when they compare unordered.
pub fn max(a: Real, b: Real) -> Real {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_table_names_are_unique() {
        for (i, f) in BUILTIN_FUNCTIONS.iter().enumerate() {
            assert!(
                BUILTIN_FUNCTIONS[i + 1..].iter().all(|g| g.name != f.name),
                "duplicate entry {}",
                f.name
            );
        }
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let f = lookup_function("sqrt").unwrap();
        assert_eq!(f.name, "sqrt");
        assert_eq!(f.call(16.0), 4.0);

        assert!(lookup_function("atan2").is_none());
        assert!(lookup_function("SQRT").is_none());
        assert!(lookup_function("").is_none());
    }

    #[test]
    fn test_lookup_returns_canonical_static_name() {
        let owned = std::string::String::from("floor");
        let f = lookup_function(&owned).unwrap();
        assert!(!core::ptr::eq(f.name.as_ptr(), owned.as_ptr()));
        assert_eq!(f.name, "floor");
    }

    #[test]
    fn test_factorial_integers() {
        assert_eq!(factorial(0.0), 1.0);
        assert_eq!(factorial(1.0), 1.0);
        assert_eq!(factorial(5.0), 120.0);
        assert_eq!(factorial(10.0), 3628800.0);
    }

    #[test]
    fn test_factorial_non_integer_uses_gamma() {
        assert_eq!(factorial(2.5), tgamma(3.5));
        assert_approx_eq!(factorial(0.5), 0.886226925452758, 1e-12);
    }

    #[test]
    fn test_factorial_nan() {
        assert!(factorial(Real::NAN).is_nan());
    }

    #[test]
    fn test_angle_conversions() {
        assert_approx_eq!(deg_to_rad(180.0), PI);
        assert_approx_eq!(rad_to_deg(PI), 180.0);
        assert_approx_eq!(lookup_function("deg").unwrap().call(90.0), PI / 2.0);
        assert_approx_eq!(lookup_function("rad").unwrap().call(PI / 2.0), 90.0);
    }

    #[test]
    fn test_table_entries() {
        let call = |name: &str, x: Real| lookup_function(name).unwrap().call(x);

        assert_approx_eq!(call("sin", 0.0), 0.0);
        assert_approx_eq!(call("cos", 0.0), 1.0);
        assert_approx_eq!(call("tan", 0.0), 0.0);
        assert_approx_eq!(call("asin", 1.0), PI / 2.0);
        assert_approx_eq!(call("acos", 1.0), 0.0);
        assert_approx_eq!(call("atan", 1.0), PI / 4.0);
        assert_eq!(call("abs", -5.0), 5.0);
        assert_eq!(call("log2", 8.0), 3.0);
        assert_approx_eq!(call("log", core::f64::consts::E), 1.0);
        assert_approx_eq!(call("log10", 1000.0), 3.0);
        assert_approx_eq!(call("exp", 1.0), core::f64::consts::E);
        assert_approx_eq!(call("cbrt", 27.0), 3.0);
        assert_eq!(call("floor", 2.7), 2.0);
        assert_eq!(call("ceil", 2.3), 3.0);
        assert_approx_eq!(call("lgamma", 5.0), log(24.0));
        assert_approx_eq!(call("gamma", 5.0), 24.0, 1e-9);
        assert_eq!(call("round", 2.5), 3.0);
        assert_eq!(call("round", -2.5), -3.0);
        assert_eq!(call("fac", 4.0), 24.0);
    }

    #[test]
    fn test_domain_errors_are_nan() {
        let call = |name: &str, x: Real| lookup_function(name).unwrap().call(x);

        assert!(call("sqrt", -1.0).is_nan());
        assert!(call("asin", 2.0).is_nan());
        assert!(call("log", -1.0).is_nan());
    }

    #[test]
    fn test_max_prefers_larger() {
        assert_eq!(max(1.0, 2.0), 2.0);
        assert_eq!(max(-1.0, -2.0), -1.0);
        assert_eq!(max(3.0, 3.0), 3.0);
    }
}
