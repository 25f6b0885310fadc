//! Binary and comparison operator implementations.
//!
//! The value set is closed, so dispatch is a direct match on the operand
//! pair. Arithmetic follows IEEE-754 doubles except for division by zero,
//! which is an error instead of an infinity or NaN.

use silk_ir::{BinaryOp, ComparisonOp};

use crate::errors::{
    arithmetic_operands, binary_type_mismatch, comparison_operands, division_by_zero,
};
use crate::{EvalResult, Value};

/// Apply an arithmetic operator to two evaluated operands.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => eval_number_binary(op, *a, *b),
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::from(joined))
        }
        _ if op == BinaryOp::Add => Err(binary_type_mismatch(op, left, right)),
        _ => Err(arithmetic_operands(op, left, right)),
    }
}

#[inline]
fn eval_number_binary(op: BinaryOp, a: f64, b: f64) -> EvalResult {
    let n = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            a / b
        }
    };
    Ok(Value::Number(n))
}

/// Apply a comparison operator. Both operands must be numbers.
pub fn evaluate_comparison(op: ComparisonOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(op.compare(*a, *b))),
        _ => Err(comparison_operands(op, left, right)),
    }
}
