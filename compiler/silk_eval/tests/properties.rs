//! Property-based tests for expression evaluation and parallel merging.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use silk_eval::{EvalErrorKind, EvalResult, Interpreter, Value};
use silk_ir::Node;

fn eval(node: &Node) -> EvalResult {
    Interpreter::new().execute(node)
}

fn number_of(result: EvalResult) -> f64 {
    result.unwrap().as_number().unwrap()
}

/// Finite doubles, zero excluded so division stays well defined.
fn nonzero() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL
}

proptest! {
    #[test]
    fn arithmetic_matches_ieee(a in prop::num::f64::NORMAL, b in prop::num::f64::NORMAL) {
        let (l, r) = (Node::number(a), Node::number(b));
        prop_assert_eq!(number_of(eval(&Node::binary("+", l.clone(), r.clone()))).to_bits(), (a + b).to_bits());
        prop_assert_eq!(number_of(eval(&Node::binary("-", l.clone(), r.clone()))).to_bits(), (a - b).to_bits());
        prop_assert_eq!(number_of(eval(&Node::binary("*", l, r))).to_bits(), (a * b).to_bits());
    }

    #[test]
    fn division_matches_ieee_for_nonzero_divisor(a in prop::num::f64::NORMAL, b in nonzero()) {
        let result = number_of(eval(&Node::binary("/", Node::number(a), Node::number(b))));
        prop_assert_eq!(result.to_bits(), (a / b).to_bits());
    }

    #[test]
    fn division_by_zero_always_fails(a in prop::num::f64::ANY, negative in any::<bool>()) {
        let zero = if negative { -0.0 } else { 0.0 };
        let err = eval(&Node::binary("/", Node::number(a), Node::number(zero))).unwrap_err();
        prop_assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    }

    #[test]
    fn comparisons_match_f64(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let gt = eval(&Node::compare(">", Node::number(a), Node::number(b))).unwrap();
        let lt = eval(&Node::compare("<", Node::number(a), Node::number(b))).unwrap();
        let eq = eval(&Node::compare("==", Node::number(a), Node::number(b))).unwrap();
        prop_assert_eq!(gt, Value::Bool(a > b));
        prop_assert_eq!(lt, Value::Bool(a < b));
        prop_assert_eq!(eq, Value::Bool(a == b));
    }

    #[test]
    fn string_concatenation(a in ".{0,16}", b in ".{0,16}") {
        let result = eval(&Node::binary("+", Node::string(&a), Node::string(&b))).unwrap();
        prop_assert_eq!(result, Value::from(format!("{a}{b}")));
    }

    #[test]
    fn string_plus_number_fails(s in ".{0,8}", n in prop::num::f64::ANY) {
        let err = eval(&Node::binary("+", Node::string(&s), Node::number(n))).unwrap_err();
        let is_mismatch = matches!(err.kind, EvalErrorKind::BinaryTypeMismatch { .. });
        prop_assert!(is_mismatch);
    }

    #[test]
    fn parallel_writes_all_land(count in 1usize..24, limit in 1usize..6) {
        let body = (0..count)
            .map(|i| Node::assign(format!("v{i}"), Node::number(i as f64)))
            .collect();
        let mut interp = Interpreter::builder().max_concurrency(limit).build();
        prop_assert_eq!(interp.execute(&Node::parallel(body)), Ok(Value::Void));
        prop_assert_eq!(interp.globals().len(), count);
        for i in 0..count {
            prop_assert_eq!(interp.global(&format!("v{i}")), Some(Value::number(i as f64)));
        }
    }
}
