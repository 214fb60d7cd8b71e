//! Arithmetic on two numbers.
//!
//! Pure and total over `f64`: NaN and infinities propagate per IEEE 754.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Body of `POST /calculate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberPair {
    pub x: f64,
    pub y: f64,
}

/// Response of `POST /calculate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticResult {
    pub sum: f64,
    #[serde(rename = "mult")]
    pub product: f64,
}

/// Body of `POST /sum`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SumRequest {
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SumResponse {
    pub result: f64,
}

pub fn evaluate(pair: NumberPair) -> ArithmeticResult {
    debug!(x = pair.x, y = pair.y, "evaluating");
    ArithmeticResult {
        sum: pair.x + pair.y,
        product: pair.x * pair.y,
    }
}

pub fn sum(req: SumRequest) -> SumResponse {
    SumResponse {
        result: evaluate(NumberPair { x: req.a, y: req.b }).sum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn eval(x: f64, y: f64) -> ArithmeticResult {
        evaluate(NumberPair { x, y })
    }

    #[test]
    fn test_known_pairs() {
        assert_eq!(eval(10.0, 5.0), ArithmeticResult { sum: 15.0, product: 50.0 });
        assert_eq!(eval(7.5, 2.5), ArithmeticResult { sum: 10.0, product: 18.75 });
        assert_eq!(eval(-3.0, 4.0), ArithmeticResult { sum: 1.0, product: -12.0 });
        assert_eq!(eval(0.0, 100.0), ArithmeticResult { sum: 100.0, product: 0.0 });
    }

    #[test]
    fn test_non_finite_propagates() {
        let r = eval(f64::INFINITY, 2.0);
        assert_eq!(r.sum, f64::INFINITY);
        assert_eq!(r.product, f64::INFINITY);

        let r = eval(f64::NAN, 1.0);
        assert!(r.sum.is_nan());
        assert!(r.product.is_nan());

        // inf * 0 is NaN, not an error
        assert!(eval(f64::INFINITY, 0.0).product.is_nan());
    }

    #[test]
    fn test_serializes_product_as_mult() {
        let json = serde_json::to_value(eval(2.0, 3.0)).unwrap();
        assert_eq!(json, serde_json::json!({"sum": 5.0, "mult": 6.0}));
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(SumRequest { a: 1.5, b: 2.0 }).result, 3.5);
    }

    proptest! {
        #[test]
        fn prop_matches_native_arithmetic(x in -1e12f64..1e12, y in -1e12f64..1e12) {
            let r = eval(x, y);
            prop_assert_eq!(r.sum, x + y);
            prop_assert_eq!(r.product, x * y);
        }

        #[test]
        fn prop_commutative(x in any::<f64>().prop_filter("finite", |v| v.is_finite()),
                            y in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let a = eval(x, y);
            let b = eval(y, x);
            prop_assert_eq!(a.sum.to_bits(), b.sum.to_bits());
            prop_assert_eq!(a.product.to_bits(), b.product.to_bits());
        }
    }
}
