//! Arithmetic and comparison operators.
//!
//! Trees carry operators as the symbol text they were built with; the
//! evaluator resolves the symbol with `from_symbol` when the node runs, so an
//! unrecognized symbol surfaces as an execution error instead of being
//! rejected while the tree is assembled.

use std::fmt;

/// Arithmetic operators accepted by `Node::Binary`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Every arithmetic operator, in symbol order.
    pub const ALL: [BinaryOp; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// Resolve a source symbol (`+ - * /`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Comparison operators accepted by `Node::Comparison`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ComparisonOp {
    Gt,
    Lt,
    Eq,
}

impl ComparisonOp {
    /// Every comparison operator.
    pub const ALL: [ComparisonOp; 3] = [Self::Gt, Self::Lt, Self::Eq];

    /// Resolve a source symbol (`> < ==`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            "==" => Some(Self::Eq),
            _ => None,
        }
    }

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Eq => "==",
        }
    }

    /// Apply the comparison to two numbers.
    #[inline]
    #[expect(clippy::float_cmp, reason = "`==` compares doubles exactly")]
    pub fn compare(self, left: f64, right: f64) -> bool {
        match self {
            Self::Gt => left > right,
            Self::Lt => left < right,
            Self::Eq => left == right,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests;
