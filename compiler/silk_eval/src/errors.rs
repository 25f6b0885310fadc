//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured data of each failure and renders
//! the user-facing message. `EvalError` wraps a kind together with the chain
//! of user functions the error unwound through.
//!
//! Errors are built through the `#[cold]` factory functions below rather
//! than by naming variants at every call site, so messages stay in one place.
//!
//! Inside the evaluator a `return` travels on the same channel as errors
//! (`ControlAction`), which lets `?` carry it through nested `if`/loop bodies
//! up to the function boundary that consumes it.

use std::fmt;

use silk_ir::{BinaryOp, ComparisonOp, Name};

use crate::Value;

/// Result of evaluation at the public boundary.
pub type EvalResult = Result<Value, EvalError>;

/// Broad classification of an error kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Undefined variable or function.
    UnresolvedReference,
    /// Operand of the wrong runtime type, or a non-boolean condition.
    TypeMismatch,
    /// Argument count differs from parameter count.
    ArityMismatch,
    /// Division by zero.
    Arithmetic,
    /// Unrecognized operator symbol.
    UnknownConstruct,
    /// One or more children of a parallel block failed.
    Aggregate,
    /// Configured call depth exceeded.
    ResourceLimit,
    /// Raised by a native builtin.
    Native,
}

/// Structured error category with its data.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: Name },

    #[error("undefined function: {name}")]
    UndefinedFunction { name: Name },

    #[error("unknown operator: {symbol}")]
    UnknownOperator { symbol: String },

    #[error("unknown comparison operator: {symbol}")]
    UnknownComparisonOperator { symbol: String },

    #[error("operands must be numbers: cannot apply `{op}` to {left} and {right}")]
    OperandsMustBeNumbers {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("unsupported operand types for `{op}`: {left} and {right}")]
    BinaryTypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("condition must evaluate to a boolean, got {got}")]
    NonBooleanCondition { got: &'static str },

    #[error("function {name} expects {expected} {}, but got {got}", plural_args(*.expected))]
    ArityMismatch {
        name: Name,
        expected: usize,
        got: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("maximum call depth exceeded (limit: {limit})")]
    CallDepthExceeded { limit: usize },

    #[error("{} in parallel block: [{}]", count_errors(.errors.len()), join_errors(.errors))]
    Parallel { errors: Vec<EvalError> },

    #[error("{message}")]
    Custom { message: String },
}

fn plural_args(n: usize) -> &'static str {
    if n == 1 {
        "argument"
    } else {
        "arguments"
    }
}

fn count_errors(n: usize) -> String {
    if n == 1 {
        "1 error".to_string()
    } else {
        format!("{n} errors")
    }
}

fn join_errors(errors: &[EvalError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedVariable { .. } | Self::UndefinedFunction { .. } => {
                ErrorCategory::UnresolvedReference
            }
            Self::OperandsMustBeNumbers { .. }
            | Self::BinaryTypeMismatch { .. }
            | Self::NonBooleanCondition { .. } => ErrorCategory::TypeMismatch,
            Self::ArityMismatch { .. } => ErrorCategory::ArityMismatch,
            Self::DivisionByZero => ErrorCategory::Arithmetic,
            Self::UnknownOperator { .. } | Self::UnknownComparisonOperator { .. } => {
                ErrorCategory::UnknownConstruct
            }
            Self::Parallel { .. } => ErrorCategory::Aggregate,
            Self::CallDepthExceeded { .. } => ErrorCategory::ResourceLimit,
            Self::Custom { .. } => ErrorCategory::Native,
        }
    }
}

/// An evaluation failure.
///
/// `trace` lists the user functions the error unwound through, innermost
/// first. It is not part of `Display`; use [`EvalError::render`] for the
/// multi-line form.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    trace: Vec<Name>,
}

impl EvalError {
    /// Free-form error, typically raised by a builtin.
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            trace: Vec::new(),
        }
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Functions the error unwound through, innermost first.
    pub fn trace(&self) -> &[Name] {
        &self.trace
    }

    /// Children's errors when this is an aggregate, otherwise empty.
    pub fn aggregated(&self) -> &[EvalError] {
        match &self.kind {
            EvalErrorKind::Parallel { errors } => errors,
            _ => &[],
        }
    }

    /// Record that the error left the body of `function`.
    #[must_use]
    pub(crate) fn unwound_through(mut self, function: &Name) -> Self {
        self.trace.push(function.clone());
        self
    }

    /// Message followed by one `in <function>` line per traced call.
    pub fn render(&self) -> String {
        RenderedError(self).to_string()
    }
}

struct RenderedError<'a>(&'a EvalError);

impl fmt::Display for RenderedError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.0.kind)?;
        for function in &self.0.trace {
            write!(f, "\n  in {function}")?;
        }
        Ok(())
    }
}

// Factories

#[cold]
pub fn undefined_variable(name: &Name) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable { name: name.clone() })
}

#[cold]
pub fn undefined_function(name: &Name) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction { name: name.clone() })
}

#[cold]
pub fn unknown_operator(symbol: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownOperator {
        symbol: symbol.to_string(),
    })
}

#[cold]
pub fn unknown_comparison_operator(symbol: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownComparisonOperator {
        symbol: symbol.to_string(),
    })
}

#[cold]
pub fn operands_must_be_numbers(op: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperandsMustBeNumbers {
        op,
        left: left.type_name(),
        right: right.type_name(),
    })
}

#[cold]
pub fn arithmetic_operands(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    operands_must_be_numbers(op.as_symbol(), left, right)
}

#[cold]
pub fn comparison_operands(op: ComparisonOp, left: &Value, right: &Value) -> EvalError {
    operands_must_be_numbers(op.as_symbol(), left, right)
}

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op: op.as_symbol(),
        left: left.type_name(),
        right: right.type_name(),
    })
}

#[cold]
pub fn non_boolean_condition(got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonBooleanCondition {
        got: got.type_name(),
    })
}

#[cold]
pub fn arity_mismatch(name: &Name, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.clone(),
        expected,
        got,
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallDepthExceeded { limit })
}

#[cold]
pub fn parallel_failures(errors: Vec<EvalError>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Parallel { errors })
}

#[cold]
pub fn task_panicked(message: &str) -> EvalError {
    EvalError::new(format!("parallel task panicked: {message}"))
}

// Control flow

/// Non-local exit from a statement: a failure, or a `return` on its way to
/// the enclosing function boundary.
#[derive(Debug)]
pub(crate) enum ControlAction {
    Error(EvalError),
    Return(Value),
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

/// Result of executing a statement inside the evaluator.
pub(crate) type ExecResult = Result<Value, ControlAction>;

/// Settle a statement result at a boundary that consumes `return`.
#[inline]
pub(crate) fn settle(result: ExecResult) -> EvalResult {
    match result {
        Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
        Err(ControlAction::Error(err)) => Err(err),
    }
}
