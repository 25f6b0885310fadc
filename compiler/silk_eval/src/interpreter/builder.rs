//! `InterpreterBuilder` and the session configuration it produces.

use std::num::NonZeroUsize;

use super::Interpreter;
use crate::environment::{Environment, FramePool};
use crate::print_handler::SharedPrintHandler;
use crate::registry::{BuiltinCache, FunctionRegistry, SharedBuiltins};
use crate::shared::SharedMutableRegistry;

/// Session limits and sizing. Parallel children inherit their parent's copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Children of one parallel block allowed to run at the same time.
    pub max_concurrency: NonZeroUsize,
    /// Deepest allowed nesting of user function calls. `None` is unlimited.
    pub max_call_depth: Option<usize>,
    /// Retired call frames kept for reuse.
    pub frame_pool_capacity: usize,
    /// Bindings a fresh call frame is pre-sized for.
    pub frame_capacity: usize,
}

impl EvalConfig {
    pub(crate) fn frame_pool(&self) -> FramePool {
        FramePool::new(self.frame_pool_capacity, self.frame_capacity)
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_concurrency: std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            max_call_depth: None,
            frame_pool_capacity: 64,
            frame_capacity: 8,
        }
    }
}

/// Builder for [`Interpreter`] sessions.
///
/// Registries default to fresh, empty tables. Passing shared ones lets
/// several sessions see the same functions or builtins.
#[derive(Debug, Default)]
pub struct InterpreterBuilder {
    config: EvalConfig,
    print_handler: Option<SharedPrintHandler>,
    builtins: Option<SharedBuiltins>,
    functions: Option<SharedMutableRegistry<FunctionRegistry>>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Bound on concurrently running parallel children. Zero is treated as one.
    #[must_use]
    pub fn max_concurrency(mut self, limit: usize) -> Self {
        self.config.max_concurrency = NonZeroUsize::new(limit).unwrap_or(NonZeroUsize::MIN);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, limit: usize) -> Self {
        self.config.max_call_depth = Some(limit);
        self
    }

    #[must_use]
    pub fn frame_pool_capacity(mut self, capacity: usize) -> Self {
        self.config.frame_pool_capacity = capacity;
        self
    }

    #[must_use]
    pub fn frame_capacity(mut self, capacity: usize) -> Self {
        self.config.frame_capacity = capacity;
        self
    }

    /// Register the `print` builtin writing to `handler`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Share an existing builtin table.
    #[must_use]
    pub fn builtins(mut self, builtins: SharedBuiltins) -> Self {
        self.builtins = Some(builtins);
        self
    }

    /// Share an existing function table.
    #[must_use]
    pub fn functions(mut self, functions: SharedMutableRegistry<FunctionRegistry>) -> Self {
        self.functions = Some(functions);
        self
    }

    pub fn build(self) -> Interpreter {
        let interpreter = Interpreter {
            env: Environment::with_pool(self.config.frame_pool()),
            functions: self.functions.unwrap_or_default(),
            builtins: self.builtins.unwrap_or_default(),
            builtin_cache: BuiltinCache::new(),
            config: self.config,
            call_depth: 0,
        };
        if let Some(handler) = self.print_handler {
            interpreter.register_print(handler);
        }
        interpreter
    }
}
