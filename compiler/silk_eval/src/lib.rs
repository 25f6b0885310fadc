//! Silk Eval - tree-walking execution engine for Silk program trees.
//!
//! Executes already-built [`silk_ir::Node`] trees: arithmetic, comparisons,
//! assignments, conditionals, loops, user function calls, native builtins and
//! bounded-concurrency parallel blocks.
//!
//! # Architecture
//!
//! - [`Interpreter`]: one execution session, dispatching over node variants
//! - [`Environment`]: frame stack with innermost-frame lookup and frame pooling
//! - [`FunctionRegistry`] / [`SharedBuiltins`]: callable tables shared with
//!   parallel children, with a per-call-chain [`BuiltinCache`]
//! - [`run_bounded`]: bounded worker fan-out used by parallel blocks
//! - [`errors`]: error kinds, factories and the aggregate parallel error
//!
//! ```text
//! let mut interp = Interpreter::builder().print_handler(stdout_handler()).build();
//! interp.execute(&program)?;
//! let z = interp.global("z");
//! ```

mod environment;
pub mod errors;
mod interpreter;
mod operators;
mod parallel;
mod print_handler;
mod registry;
mod shared;
mod stack;
mod tracing_setup;
mod value;

pub use environment::{Environment, Frame, FramePool};
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{CallFrameGuard, EvalConfig, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, evaluate_comparison};
pub use parallel::{panic_message, run_bounded};
pub use print_handler::{
    buffer_handler, print_builtin, silent_handler, stdout_handler, PrintHandler,
    SharedPrintHandler,
};
pub use registry::{
    Builtin, BuiltinCache, BuiltinFn, BuiltinRegistry, FunctionRegistry, SharedBuiltins,
};
pub use shared::SharedMutableRegistry;
pub use stack::ensure_sufficient_stack;
pub use tracing_setup::init_tracing;
pub use value::Value;
